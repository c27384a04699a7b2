//! Logging collaborator handed to the transcription adder.
//!
//! The process-wide `tracing` subscriber is installed at most once, by the
//! first call to [`Logger::init`]. Every `Logger` carries its own component
//! span; components enter it while they work, so log lines are attributed
//! without any global logger lookup.

use std::sync::OnceLock;

use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Set once the first `Logger::init` has run. Holds whether our subscriber
/// became the global default (false when the host already installed one).
static SUBSCRIBER_INSTALLED: OnceLock<bool> = OnceLock::new();

/// Handle to the logging setup for one component.
#[derive(Debug, Clone)]
pub struct Logger {
    span: Span,
}

impl Logger {
    /// Install the fmt subscriber (first call only) and return a handle.
    ///
    /// `default_filter` applies when `RUST_LOG` is unset or invalid. Logs are
    /// written to stderr.
    pub fn init(component: &str, default_filter: &str) -> Self {
        SUBSCRIBER_INSTALLED.get_or_init(|| {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(default_filter)),
                )
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init()
                .is_ok()
        });
        Self::new(component)
    }

    /// Build a handle without touching the global subscriber.
    pub fn new(component: &str) -> Self {
        Self {
            span: tracing::info_span!("usep", component = %component),
        }
    }

    /// Span to enter while doing work on behalf of this component.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let first = Logger::init("test-first", "warn");
        let second = Logger::init("test-second", "debug");
        assert!(SUBSCRIBER_INSTALLED.get().is_some());

        // Both handles stay usable after repeated init
        first.span().in_scope(|| tracing::debug!("from first"));
        second.span().in_scope(|| tracing::debug!("from second"));
    }

    #[test]
    fn test_new_does_not_require_init() {
        let logger = Logger::new("detached");
        let _guard = logger.span().enter();
        tracing::warn!("logged without a subscriber");
    }
}
