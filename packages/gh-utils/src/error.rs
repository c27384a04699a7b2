//! Error types for the webhook helpers.
//!
//! These errors never escape the public checks. They are folded into the
//! `error` field of the returned report.

use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GhUtilsError {
    /// The process snapshot command could not be started.
    #[error("Failed to run process snapshot: {0}")]
    Snapshot(#[source] std::io::Error),

    /// The process snapshot command exited unsuccessfully.
    #[error("Process snapshot exited with {status}: {output}")]
    SnapshotStatus { status: ExitStatus, output: String },

    /// Snapshot output was not valid UTF-8.
    #[error("Process snapshot output is not UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// The allow-list environment variable is missing or unreadable.
    #[error("Allow-list variable {name} is not set: {source}")]
    MissingAllowList {
        name: &'static str,
        #[source]
        source: std::env::VarError,
    },

    /// Writing a report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for webhook helper operations.
pub type Result<T> = std::result::Result<T, GhUtilsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_allow_list_display() {
        let err = GhUtilsError::MissingAllowList {
            name: "usep_gh__LEGIT_IPS_JSON",
            source: std::env::VarError::NotPresent,
        };
        assert!(err.to_string().contains("usep_gh__LEGIT_IPS_JSON"));
    }
}
