use thiserror::Error;

/// Errors raised while assembling the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {key}")]
    Missing { key: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("could not read approved-plaintiffs file '{path}': {message}")]
    PlaintiffFile { path: String, message: String },

    #[error("invalid approved-plaintiffs list: {0}")]
    PlaintiffList(String),
}

/// Errors raised by the spreadsheet-backed sessions API.
///
/// A fetch either succeeds completely or fails with exactly one of these;
/// partial results are never surfaced. Assignment submission deliberately has
/// no error channel at all (see `sheet::SheetApi`).
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("request to the sessions API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("sessions API returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    #[error("sessions API reported failure")]
    Rejected,
}
