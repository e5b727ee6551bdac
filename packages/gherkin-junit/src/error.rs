//! Error types for the converter.
//!
//! Variants are grouped by how the caller is expected to treat them: input
//! and serialization errors abort a run, configuration errors fall back to
//! defaults, malformed example rows are skipped, and upload errors are
//! reported without invalidating an already written report.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the converter library.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Feature file could not be read.
    #[error("Failed to read feature file {}: {source}", .path.display())]
    FeatureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Feature file could not be parsed.
    #[error("Failed to parse feature: {0}")]
    FeatureParse(#[from] gherkin::ParseError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid TOML or has wrongly typed options.
    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// An examples row does not line up with its header.
    #[error("Malformed examples table: row {row} has {actual} cells, header has {expected}")]
    MalformedTable {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// XML serialization failed.
    #[error("XML serialization failed: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    /// Report file could not be written.
    #[error("Failed to write report {}: {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upload endpoint answered with a non-success status.
    #[error("Upload failed: server returned status {status}")]
    UploadRejected { status: u16, body: String },

    /// Upload was requested but the configuration lacks endpoint details.
    #[error("Upload not configured: {0}")]
    UploadNotConfigured(String),

    /// All retry attempts for a transient failure were used up.
    #[error("Upload failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Job metadata could not be encoded as JSON.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Whether this error belongs to the optional upload step.
    ///
    /// Upload errors never invalidate a report that was already written.
    #[must_use]
    pub fn is_upload_error(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::UploadRejected { .. }
                | Self::UploadNotConfigured(_)
                | Self::RetriesExhausted { .. }
        )
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConverterError>;
