// SPDX-License-Identifier: GPL-3.0-only

//! Format-agnostic parsed representation of wire payloads
//!
//! Both XML and JSON bodies decode into the same [`Node`] tree so the
//! normalizers never care which format an endpoint speaks. XML has two
//! quirks that carry over into the tree:
//!
//! - repeated sibling tags become a [`Node::Sequence`], while a lone child
//!   stays a plain entry (see [`crate::extract::get_list`]);
//! - a leaf element with text and no attributes is stored as a mapping
//!   holding only [`TEXT_KEY`], which [`crate::extract::get`] unwraps.

mod json;
mod xml;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reserved key holding the text of a leaf XML element
pub const TEXT_KEY: &str = "#text";

/// Declared body format of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Xml,
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Xml => f.write_str("XML"),
            Format::Json => f.write_str("JSON"),
        }
    }
}

/// Generic tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(String),
    /// Ordered entries; XML attributes come first, then child elements
    Mapping(Vec<(String, Node)>),
    Sequence(Vec<Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Mapping(Vec::new())
    }
}

impl Node {
    pub fn scalar(value: impl Into<String>) -> Self {
        Node::Scalar(value.into())
    }

    /// Direct child of a mapping
    pub fn entry(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// Mapping entries in order; empty for scalars and sequences
    pub fn entries(&self) -> &[(String, Node)] {
        match self {
            Node::Mapping(entries) => entries,
            _ => &[],
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// The text of a text-only mapping (`{"#text": ...}`)
    pub fn as_text_only(&self) -> Option<&str> {
        match self {
            Node::Mapping(entries) if entries.len() == 1 && entries[0].0 == TEXT_KEY => {
                entries[0].1.as_scalar()
            }
            _ => None,
        }
    }
}

/// Decode a raw body into a [`Node`]
pub fn decode(raw: &str, format: Format) -> Result<Node> {
    let decoded = match format {
        Format::Xml => xml::decode_xml(raw),
        Format::Json => json::decode_json(raw),
    };

    if let Err(err) = &decoded {
        tracing::error!("{err}");
        tracing::debug!("Raw response: {}", crate::error::snippet(raw));
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_lookup_only_on_mappings() {
        let node = Node::Mapping(vec![("fw".to_string(), Node::scalar("2.31.204"))]);
        assert_eq!(node.entry("fw"), Some(&Node::scalar("2.31.204")));
        assert_eq!(node.entry("oled"), None);
        assert_eq!(Node::scalar("x").entry("fw"), None);
        assert!(Node::Sequence(vec![]).entries().is_empty());
    }

    #[test]
    fn text_only_requires_single_text_entry() {
        let text = Node::Mapping(vec![(TEXT_KEY.to_string(), Node::scalar("40"))]);
        assert_eq!(text.as_text_only(), Some("40"));

        let mixed = Node::Mapping(vec![
            (TEXT_KEY.to_string(), Node::scalar("40")),
            ("unit".to_string(), Node::scalar("C")),
        ]);
        assert_eq!(mixed.as_text_only(), None);
    }

    #[test]
    fn decode_dispatches_on_format() {
        let xml = decode("<r><a>1</a></r>", Format::Xml).unwrap();
        let json = decode(r#"{"a": "1"}"#, Format::Json).unwrap();
        assert_eq!(
            xml.entry("a").and_then(Node::as_text_only),
            json.entry("a").and_then(Node::as_scalar)
        );
    }
}
