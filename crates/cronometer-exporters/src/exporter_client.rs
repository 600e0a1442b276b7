use chrono::NaiveDate;
use cronometer_core::Client;

use crate::{
    api::{fetch_export, ExportKind},
    error::ExportError,
    models::{BiometricEntry, DailyNutrition, Exercise, Note, Serving},
    parsers,
};

/// Subclient for the CSV export endpoints.
///
/// All ranges are inclusive on both ends. Every call mints a fresh export
/// token, so each method requires a logged-in session.
#[derive(Clone)]
pub struct ExporterClient {
    client: Client,
}

impl ExporterClient {
    /// Constructs a new `ExporterClient` with the given `Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Food servings for the date range, parsed.
    pub async fn servings(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Serving>, ExportError> {
        parsers::parse_servings(&self.servings_raw(start, end).await?)
    }

    /// Raw servings CSV for the date range.
    pub async fn servings_raw(&self, start: NaiveDate, end: NaiveDate) -> Result<String, ExportError> {
        fetch_export(&self.client, ExportKind::Servings, start, end).await
    }

    /// Daily nutrition summaries for the date range, parsed.
    pub async fn daily_nutrition(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyNutrition>, ExportError> {
        parsers::parse_daily_nutrition(&self.daily_nutrition_raw(start, end).await?)
    }

    /// Raw daily-summary CSV for the date range.
    pub async fn daily_nutrition_raw(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<String, ExportError> {
        fetch_export(&self.client, ExportKind::DailySummary, start, end).await
    }

    /// Biometric entries for the date range, parsed.
    pub async fn biometrics(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BiometricEntry>, ExportError> {
        parsers::parse_biometrics(&self.biometrics_raw(start, end).await?)
    }

    /// Raw biometrics CSV for the date range.
    pub async fn biometrics_raw(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<String, ExportError> {
        fetch_export(&self.client, ExportKind::Biometrics, start, end).await
    }

    /// Notes for the date range, parsed.
    pub async fn notes(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Note>, ExportError> {
        parsers::parse_notes(&self.notes_raw(start, end).await?)
    }

    /// Raw notes CSV for the date range.
    pub async fn notes_raw(&self, start: NaiveDate, end: NaiveDate) -> Result<String, ExportError> {
        fetch_export(&self.client, ExportKind::Notes, start, end).await
    }

    /// Exercises for the date range, parsed.
    pub async fn exercises(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Exercise>, ExportError> {
        parsers::parse_exercises(&self.exercises_raw(start, end).await?)
    }

    /// Raw exercises CSV for the date range.
    pub async fn exercises_raw(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<String, ExportError> {
        fetch_export(&self.client, ExportKind::Exercises, start, end).await
    }
}

/// Extension trait for `Client` to provide access to the `ExporterClient`.
pub trait ExporterClientExt {
    /// Creates a new `ExporterClient` instance.
    fn exporters(&self) -> ExporterClient;
}

impl ExporterClientExt for Client {
    fn exporters(&self) -> ExporterClient {
        ExporterClient::new(self.clone())
    }
}
