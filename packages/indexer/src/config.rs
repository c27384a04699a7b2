//! Configuration constants and validation functions for the indexer.

use std::path::PathBuf;

use url::Url;

use crate::error::{IndexerError, Result};

/// TEI namespace used by USEP inscription files.
pub const TEI_NAMESPACE: &str = "http://www.tei-c.org/ns/1.0";

/// XSLT namespace expected on stylesheet instructions.
pub const XSLT_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Transform";

/// Value of `div/@type` marking the edition division.
pub const EDITION_DIV_TYPE: &str = "edition";

/// HTTP timeout in seconds for Solr requests.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// User agent sent with Solr requests.
pub const USER_AGENT: &str = concat!("usep-indexer/", env!("CARGO_PKG_VERSION"));

/// Solr update handler path, relative to the core URL.
pub const UPDATE_PATH: &str = "/update";

/// Query string that makes pending updates visible.
pub const SOFT_COMMIT_QUERY: &str = "softCommit=true";

/// Environment variable holding the Solr core URL.
pub const SOLR_URL_ENV: &str = "SOLR_URL";

/// Environment variable holding the transcription stylesheet path.
pub const XSL_PATH_ENV: &str = "TRANSCRIPTION_XSL_PATH";

/// Runtime configuration for the transcription adder.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub solr_url: String,
    pub xsl_path: PathBuf,
}

impl IndexerConfig {
    /// Use the given values and fall back to the environment for the rest.
    pub fn with_overrides(solr_url: Option<String>, xsl_path: Option<PathBuf>) -> Result<Self> {
        let solr_url = match solr_url {
            Some(url) => url,
            None => env_setting(SOLR_URL_ENV)?,
        };
        Ok(Self {
            solr_url,
            xsl_path: xsl_path_setting(xsl_path)?,
        })
    }
}

/// Stylesheet path from an explicit value or `TRANSCRIPTION_XSL_PATH`.
pub fn xsl_path_setting(xsl_path: Option<PathBuf>) -> Result<PathBuf> {
    match xsl_path {
        Some(path) => Ok(path),
        None => env_setting(XSL_PATH_ENV).map(PathBuf::from),
    }
}

fn env_setting(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| IndexerError::Config(format!("{name} not set")))
}

/// Validate a Solr core URL and return it without trailing slashes.
///
/// # Examples
/// ```
/// use usep_indexer::config::validate_solr_url;
///
/// assert_eq!(
///     validate_solr_url("http://localhost:8983/solr/usep/").unwrap(),
///     "http://localhost:8983/solr/usep"
/// );
/// assert!(validate_solr_url("not a url").is_err());
/// ```
pub fn validate_solr_url(solr_url: &str) -> Result<String> {
    let invalid = |reason: &str| IndexerError::InvalidSolrUrl {
        url: solr_url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(solr_url).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if parsed.query().is_some() {
        return Err(invalid("base URL must not carry a query string"));
    }

    Ok(solr_url.trim_end_matches('/').to_string())
}

/// Build the update handler URL for a validated base URL.
pub fn update_url(solr_url: &str) -> String {
    format!("{solr_url}{UPDATE_PATH}")
}

/// Build the soft-commit URL for a validated base URL.
pub fn soft_commit_url(solr_url: &str) -> String {
    format!("{solr_url}{UPDATE_PATH}?{SOFT_COMMIT_QUERY}")
}
