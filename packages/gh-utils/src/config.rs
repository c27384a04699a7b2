//! Configuration constants for the webhook helpers.

/// Environment variable holding the JSON array of allowed source IPs.
pub const LEGIT_IPS_ENV: &str = "usep_gh__LEGIT_IPS_JSON";

/// Substring of the queue worker's command line, compared in lowercase.
pub const WORKER_MARKER: &str = "rqworker usep";

/// Program used to take the process snapshot.
pub const SNAPSHOT_PROGRAM: &str = "ps";

/// Arguments passed to [`SNAPSHOT_PROGRAM`].
pub const SNAPSHOT_ARGS: &[&str] = &["ax"];
