//! The raw export endpoint: a GET returning CSV, authorized by a short-lived
//! token passed as the `nonce` query parameter.

use chrono::NaiveDate;
use cronometer_core::Client;
use log::debug;

use crate::error::ExportError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Record types the export endpoint can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Individual logged food servings.
    Servings,
    /// Per-day nutrition summaries.
    DailySummary,
    /// Biometric measurements (weight, blood pressure, ...).
    Biometrics,
    /// Free-form notes.
    Notes,
    /// Logged exercises.
    Exercises,
}

impl ExportKind {
    /// Wire name expected by the endpoint's `generate` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Servings => "servings",
            ExportKind::DailySummary => "dailySummary",
            ExportKind::Biometrics => "biometrics",
            ExportKind::Notes => "notes",
            ExportKind::Exercises => "exercises",
        }
    }
}

/// Fetch one export as raw CSV text, minting a fresh token first.
pub(crate) async fn fetch_export(
    client: &Client,
    kind: ExportKind,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<String, ExportError> {
    let token = client.export_token().await?;

    debug!("fetching {} export ({start} to {end})", kind.as_str());
    let start = start.format(DATE_FORMAT).to_string();
    let end = end.format(DATE_FORMAT).to_string();
    let response = client
        .internal
        .http_client()
        .get(client.internal.settings().export_url())
        .query(&[
            ("nonce", token.as_str()),
            ("generate", kind.as_str()),
            ("start", start.as_str()),
            ("end", end.as_str()),
        ])
        // The export endpoint serves browser navigations; without these it
        // has been seen to answer differently.
        .header("sec-fetch-dest", "document")
        .header("sec-fetch-mode", "navigate")
        .header("sec-fetch-site", "same-origin")
        .send()
        .await?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(ExportError::Fetch {
            status,
            body_prefix: body.chars().take(200).collect(),
        });
    }
    Ok(response.text().await?)
}
