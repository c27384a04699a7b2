//! Error types for the transcription indexer.
//!
//! `IndexerError` covers the four failure families of the pipeline:
//! construction (stylesheet), extraction (source document), transformation
//! (munged text and stylesheet application) and publishing (Solr requests).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the indexer library.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// Stylesheet file could not be read.
    #[error("Failed to read stylesheet {}: {source}", .path.display())]
    StylesheetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stylesheet file is not well-formed XML.
    #[error("Failed to parse stylesheet {}: {source}", .path.display())]
    StylesheetParse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// libxslt rejected the stylesheet or one of its includes.
    #[error("Stylesheet compilation failed: {0}")]
    StylesheetCompile(String),

    /// Source TEI document could not be read.
    #[error("Failed to read source document {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The munged transcription could not be re-parsed as a document.
    #[error("Munged transcription is not well-formed XML: {0}")]
    MungedParse(#[source] roxmltree::Error),

    /// libxslt could not load the source or apply the stylesheet.
    #[error("Transformation failed: {0}")]
    Transform(String),

    /// Solr base URL is unusable.
    #[error("Invalid Solr URL '{url}': {reason}")]
    InvalidSolrUrl { url: String, reason: String },

    /// Line-break pattern failed to compile.
    #[error("Invalid line-break pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client setup or request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A Solr request failed in transit.
    #[error("Solr {operation} request to {url} failed: {source}")]
    SolrRequest {
        operation: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for indexer operations.
pub type Result<T> = std::result::Result<T, IndexerError>;
