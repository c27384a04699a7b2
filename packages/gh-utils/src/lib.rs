//! USEP GitHub helpers - Checks used by the webhook handler.
//!
//! Both checks return a report instead of an error. A failure while taking
//! the process snapshot or loading the allow-list is described in the
//! report's `error` field.
//!
//! # Example
//!
//! ```
//! use usep_gh_utils::source::{validate_against, SourceStatus};
//!
//! let result = validate_against("9.9.9.9", r#"["1.2.3.4"]"#);
//! assert_eq!(result.status, SourceStatus::Invalid);
//! assert!(result.error.is_empty());
//! ```
//!
//! - [`config`]: Environment variable and marker constants
//! - [`error`]: Error types and Result alias
//! - [`daemon`]: Queue worker liveness check
//! - [`source`]: Request source IP validation
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod daemon;
pub mod error;
pub mod source;

pub use daemon::{check_daemon, check_daemon_with, DaemonReport, DaemonStatus, ProcessLister};
pub use error::{GhUtilsError, Result};
pub use source::{validate_against, validate_request_source, SourceStatus, SourceValidation};
