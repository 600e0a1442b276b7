//! CSV parsers for the export payloads.
//!
//! Cronometer has shipped several header spellings over the years, so every
//! lookup tries the known alternatives in order. Numeric cells are coerced
//! leniently (empty or malformed values become 0.0); dates are not, since a
//! row without a parseable date is useless.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    error::ExportError,
    models::{BiometricEntry, DailyNutrition, Exercise, Note, Serving},
};

const DATE_KEYS: &[&str] = &["Day", "Date", "date"];
const TIME_KEYS: &[&str] = &["Time", "time"];

fn row_map(headers: &csv::StringRecord, record: &csv::StringRecord) -> HashMap<String, String> {
    headers
        .iter()
        .zip(record.iter())
        .map(|(header, value)| (header.to_string(), value.to_string()))
        .collect()
}

/// First non-empty value among the given header alternatives.
fn first<'a>(row: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| row.get(*key).map(String::as_str).filter(|v| !v.is_empty()))
}

fn parse_float(value: Option<&str>) -> f64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0.0)
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

/// Combine a date cell with an optional `HH:MM` time cell, falling back to
/// midnight when the time is absent or malformed.
fn parse_datetime(
    date_str: &str,
    time_str: Option<&str>,
) -> Result<NaiveDateTime, chrono::ParseError> {
    if let Some(time) = time_str {
        if let Ok(logged_at) =
            NaiveDateTime::parse_from_str(&format!("{date_str} {time}"), "%Y-%m-%d %H:%M")
        {
            return Ok(logged_at);
        }
    }
    Ok(parse_date(date_str)?.and_time(NaiveTime::MIN))
}

fn rows(csv_text: &str) -> Result<Vec<HashMap<String, String>>, ExportError> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(row_map(&headers, &record?));
    }
    Ok(rows)
}

/// Parse a servings export.
pub(crate) fn parse_servings(csv_text: &str) -> Result<Vec<Serving>, ExportError> {
    rows(csv_text)?
        .into_iter()
        .map(|row| {
            let logged_at = parse_datetime(
                first(&row, DATE_KEYS).unwrap_or_default(),
                first(&row, TIME_KEYS),
            )?;
            Ok(Serving {
                logged_at,
                food_name: first(&row, &["Food Name", "Name"]).unwrap_or_default().into(),
                serving_size: first(&row, &["Amount", "Serving"]).unwrap_or_default().into(),
                calories: parse_float(first(&row, &["Energy (kcal)", "Calories"])),
                protein_g: parse_float(first(&row, &["Protein (g)", "Protein"])),
                carbs_g: parse_float(first(&row, &["Carbs (g)", "Carbohydrates"])),
                fat_g: parse_float(first(&row, &["Fat (g)", "Fat"])),
                fiber_g: parse_float(first(&row, &["Fiber (g)", "Fiber"])),
                sugar_g: parse_float(first(&row, &["Sugars (g)", "Sugar"])),
                sodium_mg: parse_float(first(&row, &["Sodium (mg)", "Sodium"])),
                cholesterol_mg: parse_float(first(&row, &["Cholesterol (mg)"])),
                saturated_fat_g: parse_float(first(&row, &["Saturated (g)"])),
                group: first(&row, &["Food Group", "Group"]).map(str::to_string),
                raw_data: row,
            })
        })
        .collect()
}

/// Parse a biometrics export.
pub(crate) fn parse_biometrics(csv_text: &str) -> Result<Vec<BiometricEntry>, ExportError> {
    rows(csv_text)?
        .into_iter()
        .map(|row| {
            let logged_at = parse_datetime(
                first(&row, DATE_KEYS).unwrap_or_default(),
                first(&row, TIME_KEYS),
            )?;
            Ok(BiometricEntry {
                logged_at,
                metric: first(&row, &["Metric", "Name", "Type"]).unwrap_or_default().into(),
                value: parse_float(first(&row, &["Amount", "Value"])),
                unit: first(&row, &["Unit"]).unwrap_or_default().into(),
                raw_data: row,
            })
        })
        .collect()
}

/// Parse a notes export.
pub(crate) fn parse_notes(csv_text: &str) -> Result<Vec<Note>, ExportError> {
    rows(csv_text)?
        .into_iter()
        .map(|row| {
            let logged_at = parse_datetime(
                first(&row, DATE_KEYS).unwrap_or_default(),
                first(&row, TIME_KEYS),
            )?;
            Ok(Note {
                logged_at,
                content: first(&row, &["Note", "Content", "Text"]).unwrap_or_default().into(),
                raw_data: row,
            })
        })
        .collect()
}

/// Parse a daily-summary export.
pub(crate) fn parse_daily_nutrition(csv_text: &str) -> Result<Vec<DailyNutrition>, ExportError> {
    rows(csv_text)?
        .into_iter()
        .map(|row| {
            let date = parse_date(first(&row, DATE_KEYS).unwrap_or_default())?;
            Ok(DailyNutrition {
                date,
                calories: parse_float(first(&row, &["Energy (kcal)", "Calories"])),
                protein_g: parse_float(first(&row, &["Protein (g)", "Protein"])),
                carbs_g: parse_float(first(&row, &["Carbs (g)", "Carbohydrates"])),
                fat_g: parse_float(first(&row, &["Fat (g)", "Fat"])),
                fiber_g: parse_float(first(&row, &["Fiber (g)", "Fiber"])),
                sugar_g: parse_float(first(&row, &["Sugars (g)", "Sugar"])),
                sodium_mg: parse_float(first(&row, &["Sodium (mg)", "Sodium"])),
                raw_data: row,
            })
        })
        .collect()
}

/// Parse an exercises export.
pub(crate) fn parse_exercises(csv_text: &str) -> Result<Vec<Exercise>, ExportError> {
    rows(csv_text)?
        .into_iter()
        .map(|row| {
            let logged_at = parse_datetime(
                first(&row, DATE_KEYS).unwrap_or_default(),
                first(&row, TIME_KEYS),
            )?;
            Ok(Exercise {
                logged_at,
                name: first(&row, &["Exercise", "Name"]).unwrap_or_default().into(),
                duration_minutes: parse_float(first(&row, &["Minutes", "Duration"])),
                calories_burned: parse_float(first(&row, &["Calories Burned", "Calories"])),
                raw_data: row,
            })
        })
        .collect()
}
