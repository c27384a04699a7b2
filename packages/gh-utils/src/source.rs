//! Validation of webhook request source addresses.

use serde::Serialize;

use crate::config::LEGIT_IPS_ENV;
use crate::error::{GhUtilsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Valid,
    Invalid,
}

/// Outcome of a source check. `error` is empty unless the allow-list could
/// not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceValidation {
    pub status: SourceStatus,
    pub error: String,
}

/// Check `ip` against the allow-list in `usep_gh__LEGIT_IPS_JSON`.
pub fn validate_request_source(ip: &str) -> SourceValidation {
    let allow_list = std::env::var(LEGIT_IPS_ENV).map_err(|source| {
        GhUtilsError::MissingAllowList {
            name: LEGIT_IPS_ENV,
            source,
        }
    });
    match allow_list {
        Ok(json) => validate_against(ip, &json),
        Err(e) => failed(ip, &e),
    }
}

/// Check `ip` against a JSON array of allowed addresses.
///
/// # Examples
/// ```
/// use usep_gh_utils::source::{validate_against, SourceStatus};
///
/// assert_eq!(validate_against("1.2.3.4", r#"["1.2.3.4"]"#).status, SourceStatus::Valid);
/// assert_eq!(validate_against("9.9.9.9", r#"["1.2.3.4"]"#).status, SourceStatus::Invalid);
/// ```
pub fn validate_against(ip: &str, legit_ips_json: &str) -> SourceValidation {
    tracing::debug!(ip, "Validating request source");
    match parse_allow_list(legit_ips_json) {
        Ok(legit_ips) if legit_ips.iter().any(|legit| legit == ip) => SourceValidation {
            status: SourceStatus::Valid,
            error: String::new(),
        },
        Ok(_) => {
            tracing::warn!(ip, "Request from an address outside the allow-list");
            SourceValidation {
                status: SourceStatus::Invalid,
                error: String::new(),
            }
        }
        Err(e) => failed(ip, &e),
    }
}

fn parse_allow_list(json: &str) -> Result<Vec<String>> {
    Ok(serde_json::from_str(json)?)
}

fn failed(ip: &str, error: &GhUtilsError) -> SourceValidation {
    tracing::error!(ip, error = %error, "Problem loading allowed source addresses");
    SourceValidation {
        status: SourceStatus::Invalid,
        error: error.to_string(),
    }
}
