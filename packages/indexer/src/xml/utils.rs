//! XML utility functions for navigating and escaping DOM trees.

use roxmltree::{Document, Node, ParsingOptions};

use crate::config::TEI_NAMESPACE;

/// Parse an XML document, allowing an internal DTD.
///
/// TEI files in the wild often carry a DOCTYPE; roxmltree rejects those
/// unless explicitly allowed.
pub fn parse_document(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    Document::parse_with_options(
        text,
        ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        },
    )
}

/// Get the tag name without namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use usep_indexer::xml::get_tag_name;
///
/// let doc = Document::parse(r#"<tei:ab xmlns:tei="http://www.tei-c.org/ns/1.0"/>"#).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "ab");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with a specific local name, in any namespace.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Check if a node is a TEI element with the given local name.
pub fn is_tei_element(node: Node<'_, '_>, local_name: &str) -> bool {
    has_tag(node, local_name) && node.tag_name().namespace() == Some(TEI_NAMESPACE)
}

/// Escape character data for element content.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
