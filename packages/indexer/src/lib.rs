//! USEP Indexer - Render inscription transcriptions and index them in Solr.
//!
//! Given an inscription identifier and its TEI/XML file, the indexer pulls
//! the edition text out of the document, removes the whitespace that follows
//! line-break tags, renders the result with a transcription stylesheet and
//! stores the rendered value on the inscription's Solr document.
//!
//! # Example
//!
//! ```
//! use usep_indexer::config;
//!
//! let base = config::validate_solr_url("http://localhost:8983/solr/usep/").unwrap();
//! assert_eq!(config::update_url(&base), "http://localhost:8983/solr/usep/update");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants, environment settings and URL validation
//! - [`error`]: Error types and Result alias
//! - [`logging`]: Logging collaborator and subscriber setup
//! - [`xml`]: XML utilities and TEI edition lookup
//! - [`extract`]: Edition fragment extraction
//! - [`munge`]: Line-break whitespace munging
//! - [`stylesheet`]: XSLT stylesheets compiled with libxslt
//! - [`solr`]: Solr update and commit requests
//! - [`adder`]: The transcription adder pipeline
//! - [`cli`]: Command-line interface

pub mod adder;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod munge;
pub mod solr;
pub mod stylesheet;
pub mod xml;

pub use adder::TranscriptionAdder;
pub use config::IndexerConfig;
pub use error::{IndexerError, Result};
pub use logging::Logger;
pub use stylesheet::Stylesheet;
