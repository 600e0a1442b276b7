//! Typed views over Cronometer's CSV exports.
//!
//! The exports carry far more columns than these structs name; the complete
//! row is always kept in `raw_data` keyed by the original header.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

/// A single logged food serving.
#[derive(Debug, Clone, PartialEq)]
pub struct Serving {
    /// When the serving was logged (midnight when the export has no time).
    pub logged_at: NaiveDateTime,
    /// Food name as shown in Cronometer.
    pub food_name: String,
    /// Amount, e.g. `1 cup`.
    pub serving_size: String,
    /// Energy in kcal.
    pub calories: f64,
    /// Protein in grams.
    pub protein_g: f64,
    /// Carbohydrates in grams.
    pub carbs_g: f64,
    /// Fat in grams.
    pub fat_g: f64,
    /// Fiber in grams.
    pub fiber_g: f64,
    /// Sugars in grams.
    pub sugar_g: f64,
    /// Sodium in milligrams.
    pub sodium_mg: f64,
    /// Cholesterol in milligrams.
    pub cholesterol_mg: f64,
    /// Saturated fat in grams.
    pub saturated_fat_g: f64,
    /// Food group, when present in the export.
    pub group: Option<String>,
    /// The complete CSV row, keyed by header.
    pub raw_data: HashMap<String, String>,
}

/// A biometric measurement entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BiometricEntry {
    /// When the measurement was logged.
    pub logged_at: NaiveDateTime,
    /// Metric name, e.g. `Weight` or `Blood Pressure`.
    pub metric: String,
    /// Measured value.
    pub value: f64,
    /// Unit of the value.
    pub unit: String,
    /// The complete CSV row, keyed by header.
    pub raw_data: HashMap<String, String>,
}

/// A free-form note entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// When the note was logged.
    pub logged_at: NaiveDateTime,
    /// Note text.
    pub content: String,
    /// The complete CSV row, keyed by header.
    pub raw_data: HashMap<String, String>,
}

/// A per-day nutrition summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyNutrition {
    /// Day the summary covers.
    pub date: NaiveDate,
    /// Energy in kcal.
    pub calories: f64,
    /// Protein in grams.
    pub protein_g: f64,
    /// Carbohydrates in grams.
    pub carbs_g: f64,
    /// Fat in grams.
    pub fat_g: f64,
    /// Fiber in grams.
    pub fiber_g: f64,
    /// Sugars in grams.
    pub sugar_g: f64,
    /// Sodium in milligrams.
    pub sodium_mg: f64,
    /// The complete CSV row, keyed by header.
    pub raw_data: HashMap<String, String>,
}

/// A logged exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    /// When the exercise was logged.
    pub logged_at: NaiveDateTime,
    /// Exercise name.
    pub name: String,
    /// Duration in minutes.
    pub duration_minutes: f64,
    /// Estimated energy burned in kcal.
    pub calories_burned: f64,
    /// The complete CSV row, keyed by header.
    pub raw_data: HashMap<String, String>,
}
