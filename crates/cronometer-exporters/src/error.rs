use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the export endpoint and CSV decoding.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export endpoint answered with a non-200 status.
    #[error("export failed with status {status}: {body_prefix}")]
    Fetch {
        /// HTTP status returned by the export endpoint.
        status: StatusCode,
        /// Prefix of the response body, for diagnosis.
        body_prefix: String,
    },

    /// Session or token minting failure from the core client.
    #[error(transparent)]
    Auth(#[from] cronometer_core::AuthError),

    /// Transport-level failure from the underlying HTTP client.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Malformed CSV in an export payload.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Unparseable date in an export row.
    #[error("invalid date in export: {0}")]
    Date(#[from] chrono::ParseError),
}
