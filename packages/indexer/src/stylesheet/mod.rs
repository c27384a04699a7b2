//! Transcription stylesheets, compiled once with libxslt.
//!
//! The stylesheet file is compiled when a [`Stylesheet`] is built and reused
//! for every transform. Results are written according to the method of the
//! stylesheet's `xsl:output` element: `xml`, `html` or `text`.
//!
//! A compiled stylesheet wraps a libxslt handle. It is neither `Send` nor
//! `Sync`; use one instance per worker thread.

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use libxml::parser::Parser;
use libxml::tree::{Document as ResultDocument, SaveOptions};
use roxmltree::Node;

use crate::config::XSLT_NAMESPACE;
use crate::error::{IndexerError, Result};
use crate::xml::parse_document;

/// Serialization method from `xsl:output/@method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OutputMethod {
    #[default]
    Xml,
    Html,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct OutputSettings {
    method: OutputMethod,
    omit_xml_declaration: bool,
}

impl OutputSettings {
    /// Read the last `xsl:output` element of a stylesheet.
    fn from_stylesheet(root: Node<'_, '_>) -> Self {
        let mut settings = Self::default();
        for output in root
            .children()
            .filter(|n| n.is_element() && n.tag_name().namespace() == Some(XSLT_NAMESPACE))
            .filter(|n| n.tag_name().name() == "output")
        {
            match output.attribute("method") {
                Some("html") => settings.method = OutputMethod::Html,
                Some("text") => settings.method = OutputMethod::Text,
                Some("xml") => settings.method = OutputMethod::Xml,
                _ => {}
            }
            if let Some(omit) = output.attribute("omit-xml-declaration") {
                settings.omit_xml_declaration = omit == "yes";
            }
        }
        settings
    }
}

/// A compiled XSLT stylesheet.
pub struct Stylesheet {
    path: PathBuf,
    output: OutputSettings,
    compiled: RefCell<libxslt::stylesheet::Stylesheet>,
}

impl Stylesheet {
    /// Load and compile a stylesheet file.
    ///
    /// Imports and includes are resolved relative to `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| IndexerError::StylesheetRead {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = parse_document(&text).map_err(|source| IndexerError::StylesheetParse {
            path: path.to_path_buf(),
            source,
        })?;
        let output = OutputSettings::from_stylesheet(doc.root_element());

        let path_str = path.to_str().ok_or_else(|| {
            IndexerError::StylesheetCompile(format!(
                "stylesheet path {} is not valid UTF-8",
                path.display()
            ))
        })?;
        let compiled = libxslt::parser::parse_file(path_str).map_err(|e| {
            IndexerError::StylesheetCompile(format!("{}: {e}", path.display()))
        })?;

        tracing::debug!(path = %path.display(), method = ?output.method, "Compiled stylesheet");
        Ok(Self {
            path: path.to_path_buf(),
            output,
            compiled: RefCell::new(compiled),
        })
    }

    /// Parse `xml` and apply the stylesheet to it.
    pub fn transform_str(&self, xml: &str) -> Result<String> {
        let source = Parser::default()
            .parse_string(xml)
            .map_err(|e| IndexerError::Transform(format!("failed to load source: {e:?}")))?;
        let result = self
            .compiled
            .borrow_mut()
            .transform(source, Vec::new())
            .map_err(|e| IndexerError::Transform(e.to_string()))?;
        Ok(self.serialize(&result))
    }

    fn serialize(&self, result: &ResultDocument) -> String {
        match self.output.method {
            OutputMethod::Text => result.as_node().get_content(),
            OutputMethod::Html => result.to_string_with_options(SaveOptions {
                as_html: true,
                no_declaration: true,
                ..SaveOptions::default()
            }),
            OutputMethod::Xml => result.to_string_with_options(SaveOptions {
                no_declaration: self.output.omit_xml_declaration,
                ..SaveOptions::default()
            }),
        }
    }
}

impl fmt::Debug for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stylesheet")
            .field("path", &self.path)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
