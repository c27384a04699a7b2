//! XML utilities for TEI documents.

mod tei;
mod utils;

pub use tei::{find_edition_blocks, serialize_fragment};
pub use utils::{
    escape_attribute, escape_text, get_tag_name, has_tag, is_tei_element, parse_document,
};
