//! The transcription adder: extract, munge, transform and publish.

use std::path::Path;

use crate::config::IndexerConfig;
use crate::error::{IndexerError, Result};
use crate::extract::extract_file;
use crate::logging::Logger;
use crate::munge::Munger;
use crate::solr::{SolrClient, UpdateEnvelope};
use crate::stylesheet::Stylesheet;
use crate::xml::parse_document;

/// Indexes the rendered transcription of inscriptions into Solr.
///
/// Built once, then used for any number of calls. The stylesheet is compiled
/// at construction and never reloaded. An adder is not `Sync`; give each
/// worker thread its own.
#[derive(Debug)]
pub struct TranscriptionAdder {
    solr: SolrClient,
    stylesheet: Stylesheet,
    munger: Munger,
    logger: Logger,
}

impl TranscriptionAdder {
    /// Compile the stylesheet at `xsl_path` and prepare the Solr client.
    ///
    /// Fails if the stylesheet cannot be read, parsed or compiled, or if
    /// `solr_url` is not a usable base URL.
    pub fn new(solr_url: &str, xsl_path: &Path, logger: Logger) -> Result<Self> {
        let (solr, stylesheet, munger) = logger.span().in_scope(|| {
            Self::build(solr_url, xsl_path)
                .inspect(|(solr, ..)| {
                    tracing::info!(
                        solr_url = solr.base_url(),
                        stylesheet = %xsl_path.display(),
                        "Transcription adder ready"
                    );
                })
                .inspect_err(|e| {
                    tracing::error!(error = %e, "Failed to construct transcription adder");
                })
        })?;

        Ok(Self {
            solr,
            stylesheet,
            munger,
            logger,
        })
    }

    /// Construct from resolved configuration.
    pub fn from_config(config: &IndexerConfig, logger: Logger) -> Result<Self> {
        Self::new(&config.solr_url, &config.xsl_path, logger)
    }

    fn build(solr_url: &str, xsl_path: &Path) -> Result<(SolrClient, Stylesheet, Munger)> {
        let stylesheet = Stylesheet::from_file(xsl_path)?;
        let solr = SolrClient::new(solr_url)?;
        let munger = Munger::new()?;
        Ok((solr, stylesheet, munger))
    }

    pub fn solr_url(&self) -> &str {
        self.solr.base_url()
    }

    /// Extract the edition blocks of a TEI file and munge them into one string.
    ///
    /// Returns an empty string when the file has no edition blocks.
    pub fn munge_transcription(&self, xml_path: &Path) -> Result<String> {
        self.logged(|| munge_file(&self.munger, xml_path))
    }

    /// Re-parse a munged string and apply the stylesheet to it.
    pub fn transform(&self, munged: &str) -> Result<String> {
        self.logged(|| render(&self.stylesheet, munged))
    }

    /// Munge and transform a TEI file into the value stored in Solr.
    pub fn index_value(&self, xml_path: &Path) -> Result<String> {
        let munged = self.munge_transcription(xml_path)?;
        self.transform(&munged)
    }

    /// Send the transcription for one inscription to Solr and soft-commit.
    pub fn publish(&self, inscription_id: &str, transcription: &str) -> Result<()> {
        self.logged(|| {
            let envelope = UpdateEnvelope::set_transcription(inscription_id, transcription);
            self.solr.post_update(&envelope)?;
            self.solr.soft_commit()?;
            tracing::info!(inscription_id, "Transcription indexed");
            Ok(())
        })
    }

    /// Run the whole pipeline for one inscription.
    pub fn add_transcription(&self, inscription_id: &str, xml_path: &Path) -> Result<()> {
        self.logger.span().in_scope(|| {
            tracing::info!(inscription_id, path = %xml_path.display(), "Adding transcription");
        });

        let transcription = self.index_value(xml_path)?;
        self.publish(inscription_id, &transcription)
    }

    /// Run `op` inside the logger span, logging any error it returns.
    fn logged<T>(&self, op: impl FnOnce() -> Result<T>) -> Result<T> {
        self.logger.span().in_scope(|| {
            op().inspect_err(|e| tracing::error!(error = %e, "Transcription step failed"))
        })
    }
}

/// Extract the edition blocks of a TEI file and munge them with `munger`.
pub fn munge_file(munger: &Munger, xml_path: &Path) -> Result<String> {
    let fragments = extract_file(xml_path)?;
    let munged = munger.munge(&fragments);
    tracing::debug!(
        path = %xml_path.display(),
        blocks = fragments.len(),
        chars = munged.len(),
        "Munged transcription"
    );
    Ok(munged)
}

/// Check that a munged transcription is one well-formed document, then apply
/// `stylesheet` to it.
pub fn render(stylesheet: &Stylesheet, munged: &str) -> Result<String> {
    parse_document(munged).map_err(IndexerError::MungedParse)?;
    stylesheet.transform_str(munged)
}
