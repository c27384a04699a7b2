//! Edition text extraction from TEI source files.

use std::fs;
use std::path::Path;

use crate::error::{IndexerError, Result};
use crate::xml::{find_edition_blocks, parse_document, serialize_fragment};

/// Read a source document from disk.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| IndexerError::SourceRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize every edition `ab` block of a TEI document, in document order.
///
/// # Examples
/// ```
/// use usep_indexer::extract::extract_fragments;
///
/// let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><div type="edition"><ab>A</ab></div></TEI>"#;
/// let fragments = extract_fragments(xml).unwrap();
/// assert_eq!(fragments, vec![r#"<ab xmlns="http://www.tei-c.org/ns/1.0">A</ab>"#]);
/// ```
pub fn extract_fragments(xml: &str) -> Result<Vec<String>> {
    let doc = parse_document(xml)?;
    let fragments: Vec<String> = find_edition_blocks(&doc)
        .into_iter()
        .map(serialize_fragment)
        .collect();

    tracing::debug!(blocks = fragments.len(), "Extracted edition blocks");
    Ok(fragments)
}

/// Read a TEI file and serialize its edition blocks.
pub fn extract_file(path: &Path) -> Result<Vec<String>> {
    let xml = read_source(path)?;
    extract_fragments(&xml)
}
