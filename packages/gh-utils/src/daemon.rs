//! Liveness check for the USEP queue worker.

use std::process::Command;

use serde::Serialize;

use crate::config::{SNAPSHOT_ARGS, SNAPSHOT_PROGRAM, WORKER_MARKER};
use crate::error::{GhUtilsError, Result};

/// Source of a textual process listing.
pub trait ProcessLister {
    fn snapshot(&self) -> Result<String>;
}

/// Lists processes with `ps ax`, with stderr appended to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct PsCommand;

impl ProcessLister for PsCommand {
    fn snapshot(&self) -> Result<String> {
        let output = Command::new(SNAPSHOT_PROGRAM)
            .args(SNAPSHOT_ARGS)
            .output()
            .map_err(GhUtilsError::Snapshot)?;
        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);
        let text = String::from_utf8(combined)?;

        if !output.status.success() {
            return Err(GhUtilsError::SnapshotStatus {
                status: output.status,
                output: text,
            });
        }
        Ok(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DaemonStatus {
    DaemonActive,
    DaemonNotActive,
}

impl DaemonStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DaemonStatus::DaemonActive => "daemon_active",
            DaemonStatus::DaemonNotActive => "daemon_not_active",
        }
    }
}

/// Outcome of a daemon check. `error` is empty unless the snapshot failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaemonReport {
    pub status: DaemonStatus,
    pub error: String,
}

/// Check the running processes for the queue worker.
pub fn check_daemon() -> DaemonReport {
    check_daemon_with(&PsCommand)
}

/// Check a process listing from `lister` for the queue worker.
///
/// Never fails: a snapshot error leaves the status at `daemon_not_active`
/// and is reported in `error`.
pub fn check_daemon_with(lister: &dyn ProcessLister) -> DaemonReport {
    tracing::debug!("Checking for queue worker");
    match lister.snapshot() {
        Ok(listing) => {
            let status = if listing.to_lowercase().contains(WORKER_MARKER) {
                DaemonStatus::DaemonActive
            } else {
                DaemonStatus::DaemonNotActive
            };
            tracing::debug!(status = status.as_str(), "Daemon check complete");
            DaemonReport {
                status,
                error: String::new(),
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Problem taking process snapshot");
            DaemonReport {
                status: DaemonStatus::DaemonNotActive,
                error: e.to_string(),
            }
        }
    }
}
