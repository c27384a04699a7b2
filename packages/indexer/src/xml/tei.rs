//! TEI edition lookup and fragment serialization.

use roxmltree::{Document, Node, NodeType};

use super::utils::{escape_attribute, escape_text, is_tei_element};
use crate::config::EDITION_DIV_TYPE;

/// Select `tei:ab` elements whose parent is `tei:div[@type='edition']`.
///
/// Results are in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use usep_indexer::xml::find_edition_blocks;
///
/// let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><text><body>
///     <div type="translation"><ab>skip</ab></div>
///     <div type="edition"><ab>keep</ab></div>
/// </body></text></TEI>"#;
/// let doc = Document::parse(xml).unwrap();
/// let blocks = find_edition_blocks(&doc);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].text(), Some("keep"));
/// ```
pub fn find_edition_blocks<'a, 'input>(doc: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
    doc.descendants()
        .filter(|n| is_tei_element(*n, "ab"))
        .filter(|n| n.parent_element().is_some_and(is_edition_div))
        .collect()
}

fn is_edition_div(node: Node<'_, '_>) -> bool {
    is_tei_element(node, "div") && node.attribute("type") == Some(EDITION_DIV_TYPE)
}

/// Serialize an element back to markup, followed by its tail text.
///
/// The fragment is written from the parsed tree, so entity references are
/// already expanded and text keeps its line structure for munging. Every
/// namespace in scope is declared on the fragment's start tag, which keeps
/// the fragment parseable on its own.
pub fn serialize_fragment(node: Node<'_, '_>) -> String {
    let mut fragment = String::new();
    write_element(node, None, &mut fragment);
    if let Some(tail) = node.tail() {
        fragment.push_str(&escape_text(tail));
    }
    fragment
}

fn write_node(node: Node<'_, '_>, out: &mut String) {
    match node.node_type() {
        NodeType::Element => write_element(node, node.parent_element(), out),
        NodeType::Text => out.push_str(&escape_text(node.text().unwrap_or_default())),
        NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(node.text().unwrap_or_default());
            out.push_str("-->");
        }
        NodeType::PI => {
            if let Some(pi) = node.pi() {
                out.push_str("<?");
                out.push_str(pi.target);
                if let Some(value) = pi.value {
                    out.push(' ');
                    out.push_str(value);
                }
                out.push_str("?>");
            }
        }
        NodeType::Root => {}
    }
}

/// Write `node`, declaring the namespaces that `scope` does not already have.
fn write_element(node: Node<'_, '_>, scope: Option<Node<'_, '_>>, out: &mut String) {
    let tag = node.tag_name();
    let name = qualified_name(node, tag.namespace(), tag.name());

    out.push('<');
    out.push_str(&name);

    for ns in node.namespaces() {
        if ns.name() == Some("xml") {
            continue;
        }
        let inherited = scope.is_some_and(|parent| {
            parent
                .namespaces()
                .any(|p| p.name() == ns.name() && p.uri() == ns.uri())
        });
        if inherited {
            continue;
        }
        let uri = escape_attribute(ns.uri());
        match ns.name() {
            Some(prefix) => out.push_str(&format!(" xmlns:{prefix}=\"{uri}\"")),
            None => out.push_str(&format!(" xmlns=\"{uri}\"")),
        }
    }

    for attr in node.attributes() {
        let attr_name = qualified_name(node, attr.namespace(), attr.name());
        out.push_str(&format!(" {attr_name}=\"{}\"", escape_attribute(attr.value())));
    }

    if node.has_children() {
        out.push('>');
        for child in node.children() {
            write_node(child, out);
        }
        out.push_str("</");
        out.push_str(&name);
        out.push('>');
    } else {
        out.push_str("/>");
    }
}

fn qualified_name(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TEI_NAMESPACE;
    use pretty_assertions::assert_eq;

    fn first_block(xml: &str) -> String {
        let doc = Document::parse(xml).unwrap();
        let blocks = find_edition_blocks(&doc);
        serialize_fragment(blocks[0])
    }

    #[test]
    fn test_find_edition_blocks_requires_namespace() {
        let xml = r#"<TEI><text><body><div type="edition"><ab>no ns</ab></div></body></text></TEI>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(find_edition_blocks(&doc).is_empty());
    }

    #[test]
    fn test_find_edition_blocks_direct_children_only() {
        let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><div type="edition">
            <ab>one</ab>
            <div type="textpart"><ab>nested</ab></div>
            <ab>two</ab>
        </div></TEI>"#;
        let doc = Document::parse(xml).unwrap();
        let texts: Vec<_> = find_edition_blocks(&doc)
            .iter()
            .map(|n| n.text().unwrap_or_default())
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_serialize_fragment_adds_default_namespace() {
        let fragment = first_block(
            r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><div type="edition"><ab>Hello<lb/>World</ab></div></TEI>"#,
        );
        assert_eq!(
            fragment,
            r#"<ab xmlns="http://www.tei-c.org/ns/1.0">Hello<lb/>World</ab>"#
        );

        let reparsed = Document::parse(&fragment).unwrap();
        assert_eq!(reparsed.root_element().tag_name().namespace(), Some(TEI_NAMESPACE));
    }

    #[test]
    fn test_serialize_fragment_prefixed_namespace() {
        let fragment = first_block(
            r#"<tei:TEI xmlns:tei="http://www.tei-c.org/ns/1.0"><tei:div type="edition"><tei:ab n="1">x</tei:ab></tei:div></tei:TEI>"#,
        );
        assert_eq!(
            fragment,
            r#"<tei:ab xmlns:tei="http://www.tei-c.org/ns/1.0" n="1">x</tei:ab>"#
        );
    }

    #[test]
    fn test_serialize_fragment_keeps_own_declaration() {
        let fragment = first_block(
            r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><div type="edition"><ab xmlns="http://www.tei-c.org/ns/1.0">x</ab></div></TEI>"#,
        );
        assert_eq!(fragment.matches("xmlns=").count(), 1);
        assert!(Document::parse(&fragment).is_ok());
    }

    #[test]
    fn test_serialize_fragment_includes_tail() {
        let fragment = first_block(
            "<TEI xmlns=\"http://www.tei-c.org/ns/1.0\"><div type=\"edition\"><ab>x</ab>\n  </div></TEI>",
        );
        assert!(fragment.ends_with("</ab>\n  "));
    }

    #[test]
    fn test_serialize_fragment_preserves_line_structure() {
        let fragment = first_block(
            "<TEI xmlns=\"http://www.tei-c.org/ns/1.0\"><div type=\"edition\"><ab>\n  line one\n  <lb n=\"2\"/> line two\n</ab></div></TEI>",
        );
        assert_eq!(fragment.lines().count(), 4);
        assert!(fragment.contains("<lb n=\"2\"/> line two"));
    }

    #[test]
    fn test_serialize_fragment_expands_declared_entities() {
        let xml = concat!(
            r#"<!DOCTYPE TEI [<!ENTITY dm "Dis Manibus">]>"#,
            r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><div type="edition">"#,
            r#"<ab>&dm;<gap reason="lost"/> &amp; co</ab></div></TEI>"#
        );
        let doc = crate::xml::parse_document(xml).unwrap();
        let fragment = serialize_fragment(find_edition_blocks(&doc)[0]);
        assert_eq!(
            fragment,
            r#"<ab xmlns="http://www.tei-c.org/ns/1.0">Dis Manibus<gap reason="lost"/> &amp; co</ab>"#
        );
        assert!(Document::parse(&fragment).is_ok());
    }

    #[test]
    fn test_serialize_fragment_nested_declarations() {
        let fragment = first_block(
            r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><div type="edition"><ab xml:lang="la"><!--c--><num xmlns:x="urn:x" x:v="1">I</num></ab></div></TEI>"#,
        );
        assert_eq!(
            fragment,
            r#"<ab xmlns="http://www.tei-c.org/ns/1.0" xml:lang="la"><!--c--><num xmlns:x="urn:x" x:v="1">I</num></ab>"#
        );
    }
}
