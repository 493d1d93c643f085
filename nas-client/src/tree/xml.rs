// SPDX-License-Identifier: GPL-3.0-only

//! XML → [`Node`] conversion on top of quick-xml events

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Format, Node, TEXT_KEY};
use crate::error::{NasError, Result};

/// Element being assembled while its children stream in
#[derive(Debug)]
struct Frame {
    tag: String,
    attrs: Vec<(String, Node)>,
    children: Vec<(String, Node)>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>, raw: &str) -> Result<Self> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| NasError::decode(Format::Xml, e, raw))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| NasError::decode(Format::Xml, e, raw))?;
            attrs.push((key, Node::Scalar(value.into_owned())));
        }

        Ok(Self {
            tag,
            attrs,
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// Repeated tags are promoted into a sequence on the second occurrence
    fn push_child(&mut self, tag: String, node: Node) {
        match self.children.iter_mut().find(|(name, _)| *name == tag) {
            Some((_, Node::Sequence(items))) => items.push(node),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, Node::Sequence(Vec::new()));
                *existing = Node::Sequence(vec![first, node]);
            }
            None => self.children.push((tag, node)),
        }
    }

    fn finish(self) -> (String, Node) {
        if self.attrs.is_empty() && self.children.is_empty() {
            let text = self.text.trim();
            let node = if text.is_empty() {
                Node::Scalar(String::new())
            } else {
                Node::Mapping(vec![(TEXT_KEY.to_string(), Node::scalar(text))])
            };
            return (self.tag, node);
        }

        // Attribute and child share one namespace; the child wins.
        let mut entries = self.attrs;
        for (tag, child) in self.children {
            match entries.iter_mut().find(|(name, _)| *name == tag) {
                Some(slot) => slot.1 = child,
                None => entries.push((tag, child)),
            }
        }
        (self.tag, Node::Mapping(entries))
    }
}

fn close(
    stack: &mut Vec<Frame>,
    root: &mut Option<Node>,
    frame: Frame,
    raw: &str,
) -> Result<()> {
    let (tag, node) = frame.finish();
    match stack.last_mut() {
        Some(parent) => parent.push_child(tag, node),
        None if root.is_some() => {
            return Err(NasError::decode(
                Format::Xml,
                format!("second root element <{tag}>"),
                raw,
            ));
        }
        None => *root = Some(node),
    }
    Ok(())
}

/// Decode an XML document; the root tag is dropped and its content returned
pub(super) fn decode_xml(raw: &str) -> Result<Node> {
    let mut reader = Reader::from_str(raw.trim());
    reader.trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| NasError::decode(Format::Xml, e, raw))?;

        match event {
            Event::Start(start) => stack.push(Frame::open(&start, raw)?),
            Event::Empty(start) => {
                let frame = Frame::open(&start, raw)?;
                close(&mut stack, &mut root, frame, raw)?;
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| {
                    NasError::decode(Format::Xml, "closing tag without an open element", raw)
                })?;
                close(&mut stack, &mut root, frame, raw)?;
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let value = text
                        .unescape()
                        .map_err(|e| NasError::decode(Format::Xml, e, raw))?;
                    frame.text.push_str(&value);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(NasError::decode(
            Format::Xml,
            format!("unclosed element <{}>", open.tag),
            raw,
        ));
    }

    root.ok_or_else(|| NasError::decode(Format::Xml, "document has no root element", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Node {
        Node::Mapping(vec![(TEXT_KEY.to_string(), Node::scalar(value))])
    }

    #[test]
    fn leaf_text_is_wrapped_under_text_key() {
        let node = decode_xml("<firmware><fw>2.31.204</fw><oled/></firmware>").unwrap();
        assert_eq!(node.entry("fw"), Some(&text("2.31.204")));
        assert_eq!(node.entry("oled"), Some(&Node::scalar("")));
    }

    #[test]
    fn attributes_merge_with_children() {
        let node = decode_xml(r#"<home><disk id="sda"><name>Disk 1</name></disk></home>"#).unwrap();
        let disk = node.entry("disk").unwrap();
        assert_eq!(disk.entry("id"), Some(&Node::scalar("sda")));
        assert_eq!(disk.entry("name"), Some(&text("Disk 1")));
        assert_eq!(disk.entries()[0].0, "id");
    }

    #[test]
    fn child_wins_over_attribute_of_same_name() {
        let node = decode_xml(r#"<r><vol name="attr"><name>child</name></vol></r>"#).unwrap();
        let vol = node.entry("vol").unwrap();
        assert_eq!(vol.entries().len(), 1);
        assert_eq!(vol.entry("name"), Some(&text("child")));
    }

    #[test]
    fn repeated_siblings_promote_to_sequence() {
        let node = decode_xml(
            "<r><disks><disk><name>sda</name></disk><disk><name>sdb</name></disk><disk><name>sdc</name></disk></disks></r>",
        )
        .unwrap();
        match node.entry("disks").and_then(|d| d.entry("disk")) {
            Some(Node::Sequence(items)) => assert_eq!(items.len(), 3),
            other => panic!("expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn single_child_stays_a_mapping_entry() {
        let node = decode_xml("<r><disks><disk><name>sda</name></disk></disks></r>").unwrap();
        let disk = node.entry("disks").and_then(|d| d.entry("disk")).unwrap();
        assert!(matches!(disk, Node::Mapping(_)));
    }

    #[test]
    fn text_beside_children_is_discarded() {
        let node = decode_xml("<r><smart>noise<result>Pass</result></smart></r>").unwrap();
        let smart = node.entry("smart").unwrap();
        assert_eq!(smart.entries().len(), 1);
        assert_eq!(smart.entry("result"), Some(&text("Pass")));
    }

    #[test]
    fn entities_and_cdata_are_unescaped() {
        let node =
            decode_xml("<r><a>R&amp;D</a><b><![CDATA[<raw>]]></b><c k=\"&lt;x&gt;\"/></r>").unwrap();
        assert_eq!(node.entry("a"), Some(&text("R&D")));
        assert_eq!(node.entry("b"), Some(&text("<raw>")));
        assert_eq!(
            node.entry("c").and_then(|c| c.entry("k")),
            Some(&Node::scalar("<x>"))
        );
    }

    #[test]
    fn declaration_and_surrounding_whitespace_are_tolerated() {
        let node = decode_xml("\n  <?xml version=\"1.0\"?>\n<r>\n  <a>1</a>\n</r>\n").unwrap();
        assert_eq!(node.entry("a"), Some(&text("1")));
    }

    #[test]
    fn malformed_documents_fail_with_decode_error() {
        for raw in ["<r><a></b></r>", "<r><a>1</a>", "not xml at all", ""] {
            match decode_xml(raw) {
                Err(NasError::Decode { format, .. }) => assert_eq!(format, Format::Xml),
                other => panic!("expected decode error for {raw:?}, got {other:?}"),
            }
        }
    }
}
