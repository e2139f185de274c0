//! Typed failures raised by the report pipeline.
//!
//! Functions across the crate return `anyhow::Result` and attach context as
//! errors travel upward. The variants here mark the failures a caller may want
//! to tell apart, and survive that wrapping: use
//! `error.downcast_ref::<ReportError>()` to inspect them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A required environment variable is absent or empty.
    #[error("Missing required setting: {0}")]
    MissingConfig(&'static str),

    /// A setting is present but cannot be used.
    #[error("Invalid value for {var}: {reason}")]
    InvalidConfig { var: &'static str, reason: String },

    /// Jira answered with a non-success status.
    #[error("Jira API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    /// The search returned no issues for the requested window.
    #[error("No issues found in the requested period")]
    NoIssuesFound,

    /// The explicit period is not a valid `MM/YYYY` string.
    #[error("Invalid period '{0}', expected the MM/YYYY format (e.g. 01/2025)")]
    InvalidPeriod(String),

    #[error("Unsupported format '{0}', use 'html' or 'docx'")]
    UnsupportedFormat(String),

    #[error("No generator registered for format '{0}'")]
    GeneratorUnavailable(String),

    /// The HTML template could not be parsed or rendered.
    #[error("Template error: {0}")]
    Template(String),

    #[error("LibreOffice not found. Install it to export DOCX (e.g. `sudo apt-get install libreoffice-writer`)")]
    ConverterNotFound,

    /// The converter exited with a failure status; holds its stderr.
    #[error("LibreOffice conversion failed: {0}")]
    ConversionFailed(String),

    #[error("LibreOffice conversion timed out after {0} seconds")]
    ConversionTimedOut(u64),
}
