//! CLI entry point for the transcription indexer.

use usep_indexer::{cli, Logger};

fn main() {
    // WARN by default, respecting RUST_LOG
    let logger = Logger::init("indexer", "warn");

    if let Err(e) = cli::run(logger) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
