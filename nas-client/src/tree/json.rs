// SPDX-License-Identifier: GPL-3.0-only

use serde_json::Value;

use super::{Format, Node};
use crate::error::{NasError, Result};

pub(super) fn decode_json(raw: &str) -> Result<Node> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| NasError::decode(Format::Json, e, raw))?;
    Ok(from_value(value))
}

/// `null` object members are treated as absent
fn from_value(value: Value) -> Node {
    match value {
        Value::Null => Node::Scalar(String::new()),
        Value::Bool(flag) => Node::Scalar(flag.to_string()),
        Value::Number(number) => Node::Scalar(number.to_string()),
        Value::String(text) => Node::Scalar(text),
        Value::Array(items) => Node::Sequence(items.into_iter().map(from_value).collect()),
        Value::Object(map) => Node::Mapping(
            map.into_iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key, from_value(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_keep_their_textual_form() {
        let node = decode_json(r#"{"page": "1", "total": 2, "ok": true, "ratio": 0.5}"#).unwrap();
        assert_eq!(node.entry("page"), Some(&Node::scalar("1")));
        assert_eq!(node.entry("total"), Some(&Node::scalar("2")));
        assert_eq!(node.entry("ok"), Some(&Node::scalar("true")));
        assert_eq!(node.entry("ratio"), Some(&Node::scalar("0.5")));
    }

    #[test]
    fn object_order_is_preserved() {
        let node = decode_json(r#"{"sdb": {}, "sda": {}, "sdc": {}}"#).unwrap();
        let keys: Vec<&str> = node.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["sdb", "sda", "sdc"]);
    }

    #[test]
    fn nulls_are_absent_in_objects_and_empty_in_arrays() {
        let node = decode_json(r#"{"a": null, "cell": ["x", null]}"#).unwrap();
        assert_eq!(node.entry("a"), None);
        assert_eq!(
            node.entry("cell"),
            Some(&Node::Sequence(vec![Node::scalar("x"), Node::scalar("")]))
        );
    }

    #[test]
    fn invalid_json_reports_snippet() {
        match decode_json(r#"{"invalid": json}"#) {
            Err(NasError::Decode {
                format, snippet, ..
            }) => {
                assert_eq!(format, Format::Json);
                assert_eq!(snippet, r#"{"invalid": json}"#);
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
