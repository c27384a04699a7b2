//! Command-line interface for the transcription indexer.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::adder::{munge_file, render, TranscriptionAdder};
use crate::config::{xsl_path_setting, IndexerConfig};
use crate::error::Result;
use crate::logging::Logger;
use crate::munge::Munger;
use crate::stylesheet::Stylesheet;

/// USEP Indexer - Render inscription transcriptions and index them in Solr.
#[derive(Parser)]
#[command(name = "usep-indexer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render an inscription's transcription and store it in Solr.
    Add {
        /// Inscription identifier (Solr document id)
        inscription_id: String,

        /// Path to the TEI/XML inscription file
        xml_path: PathBuf,

        /// Solr core URL (default: $SOLR_URL)
        #[arg(long)]
        solr_url: Option<String>,

        /// Transcription stylesheet (default: $TRANSCRIPTION_XSL_PATH)
        #[arg(long)]
        xsl: Option<PathBuf>,
    },

    /// Print the munged edition text of an inscription file.
    Munge {
        /// Path to the TEI/XML inscription file
        xml_path: PathBuf,
    },

    /// Print the rendered transcription without publishing it.
    Transform {
        /// Path to the TEI/XML inscription file
        xml_path: PathBuf,

        /// Transcription stylesheet (default: $TRANSCRIPTION_XSL_PATH)
        #[arg(long)]
        xsl: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run(logger: Logger) -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Add {
            inscription_id,
            xml_path,
            solr_url,
            xsl,
        } => {
            let config = IndexerConfig::with_overrides(solr_url, xsl)?;
            add_command(&inscription_id, &xml_path, &config, logger)
        }
        Commands::Munge { xml_path } => munge_command(&xml_path),
        Commands::Transform { xml_path, xsl } => transform_command(&xml_path, xsl),
    }
}

fn add_command(
    inscription_id: &str,
    xml_path: &Path,
    config: &IndexerConfig,
    logger: Logger,
) -> Result<()> {
    println!(
        "{} {} from {}",
        style("Indexing").bold(),
        style(inscription_id).cyan(),
        style(xml_path.display()).green()
    );

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Compiling stylesheet...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let adder = match TranscriptionAdder::from_config(config, logger) {
        Ok(adder) => adder,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Rendering transcription...");
    let transcription = match adder.index_value(xml_path) {
        Ok(value) => value,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Updating Solr...");
    let published = adder.publish(inscription_id, &transcription);
    pb.finish_and_clear();
    published?;

    println!(
        "{} {} ({} chars) at {}",
        style("Indexed").green().bold(),
        inscription_id,
        transcription.len(),
        adder.solr_url()
    );
    Ok(())
}

fn munge_command(xml_path: &Path) -> Result<()> {
    let munged = munge_file(&Munger::new()?, xml_path)?;
    write_stdout(&munged)
}

fn transform_command(xml_path: &Path, xsl: Option<PathBuf>) -> Result<()> {
    let stylesheet = Stylesheet::from_file(&xsl_path_setting(xsl)?)?;
    let munged = munge_file(&Munger::new()?, xml_path)?;
    write_stdout(&render(&stylesheet, &munged)?)
}

fn write_stdout(value: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(value.as_bytes())?;
    if !value.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
