// SPDX-License-Identifier: GPL-3.0-only

//! Defaulted field access over [`Node`] trees
//!
//! Paths are `/`-separated keys (`"config/disks/disk"`). Resolution never
//! descends into a sequence; list semantics are requested explicitly with
//! [`get_list`]. Missing and empty values resolve to the caller's default,
//! only present-but-unparseable values are errors.

use std::str::FromStr;

use crate::error::{NasError, Result};
use crate::tree::{Node, TEXT_KEY};

/// Resolve `path`, unwrapping a text-only mapping into its scalar
pub fn get<'a>(node: &'a Node, path: &str) -> Option<&'a Node> {
    let mut current = node;
    for key in path.split('/').filter(|key| !key.is_empty()) {
        current = current.entry(key)?;
    }

    match current {
        Node::Mapping(entries) if entries.len() == 1 && entries[0].0 == TEXT_KEY => {
            Some(&entries[0].1)
        }
        _ => Some(current),
    }
}

/// Trimmed scalar at `path`; `None` when missing or empty
fn scalar_at<'a>(node: &'a Node, path: &str, expected: &'static str) -> Result<Option<&'a str>> {
    match get(node, path) {
        None => Ok(None),
        Some(Node::Scalar(value)) => {
            let value = value.trim();
            Ok((!value.is_empty()).then_some(value))
        }
        Some(Node::Mapping(entries)) if entries.is_empty() => Ok(None),
        Some(_) => Err(NasError::coercion(
            path,
            expected,
            "found a nested structure instead of a value",
        )),
    }
}

/// String at `path`, or `default` when missing, empty or not a scalar
pub fn get_str(node: &Node, path: &str, default: &str) -> String {
    scalar_at(node, path, "string")
        .ok()
        .flatten()
        .unwrap_or(default)
        .to_string()
}

/// First of several alternate field names that holds a value
pub fn get_str_any(node: &Node, paths: &[&str], default: &str) -> String {
    paths
        .iter()
        .find_map(|path| scalar_at(node, path, "string").ok().flatten())
        .unwrap_or(default)
        .to_string()
}

/// Decimal number at `path`; missing or empty yields `default`
pub fn get_int<T: FromStr>(node: &Node, path: &str, default: T) -> Result<T> {
    match scalar_at(node, path, std::any::type_name::<T>())? {
        None => Ok(default),
        Some(raw) => parse_number(path, raw),
    }
}

/// `"1"`/`"true"` and `"0"`/`"false"`; endpoints disagree on which they send
pub fn get_bool(node: &Node, path: &str, default: bool) -> Result<bool> {
    match scalar_at(node, path, "bool")? {
        None => Ok(default),
        Some(raw) => parse_flag(path, raw),
    }
}

/// Every node at `path`, whether the payload held one or many
pub fn get_list<'a>(node: &'a Node, path: &str) -> Vec<&'a Node> {
    match get(node, path) {
        None => Vec::new(),
        Some(Node::Sequence(items)) => items.iter().collect(),
        Some(Node::Scalar(value)) if value.trim().is_empty() => Vec::new(),
        Some(item) => vec![item],
    }
}

/// Mandatory string; absence is an error
pub fn require_str(node: &Node, path: &str) -> Result<String> {
    scalar_at(node, path, "string")?
        .map(str::to_string)
        .ok_or_else(|| NasError::missing(path, "string"))
}

/// Mandatory decimal number; absence is an error
pub fn require_int<T: FromStr>(node: &Node, path: &str) -> Result<T> {
    let expected = std::any::type_name::<T>();
    let raw = scalar_at(node, path, expected)?.ok_or_else(|| NasError::missing(path, expected))?;
    parse_number(path, raw)
}

pub(crate) fn parse_number<T: FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| {
        NasError::coercion(
            field,
            std::any::type_name::<T>(),
            format!("{raw:?} is not a decimal number"),
        )
    })
}

pub(crate) fn parse_flag(field: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(NasError::coercion(
            field,
            "bool",
            format!("{other:?} is neither 1/0 nor true/false"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Format, decode};

    fn disk_tree() -> Node {
        decode(
            r#"<home>
                <disks>
                    <disk id="sda">
                        <name>Disk 1</name>
                        <size>1000000000000</size>
                        <temp></temp>
                        <healthy>1</healthy>
                        <smart><result>Pass</result></smart>
                    </disk>
                </disks>
            </home>"#,
            Format::Xml,
        )
        .unwrap()
    }

    #[test]
    fn get_unwraps_text_only_mappings() {
        let tree = disk_tree();
        assert_eq!(
            get(&tree, "disks/disk/name"),
            Some(&Node::scalar("Disk 1"))
        );
        assert_eq!(get(&tree, "disks/disk/id"), Some(&Node::scalar("sda")));
        assert!(matches!(get(&tree, "disks/disk/smart"), Some(Node::Mapping(_))));
        assert_eq!(get(&tree, "disks/disk/missing"), None);
    }

    #[test]
    fn get_does_not_descend_through_sequences() {
        let tree = decode(r#"{"rows": [{"id": "1"}, {"id": "2"}]}"#, Format::Json).unwrap();
        assert_eq!(get(&tree, "rows/id"), None);
        assert_eq!(get_list(&tree, "rows").len(), 2);
    }

    #[test]
    fn get_str_defaults_on_missing_and_empty() {
        let tree = disk_tree();
        assert_eq!(get_str(&tree, "disks/disk/name", "Unknown"), "Disk 1");
        assert_eq!(get_str(&tree, "disks/disk/vendor", "Unknown"), "Unknown");
        assert_eq!(get_str(&tree, "disks/disk/temp", "n/a"), "n/a");
        assert_eq!(get_str(&tree, "disks/disk/smart", "none"), "none");
    }

    #[test]
    fn get_str_any_takes_first_present_alias() {
        let tree = decode(r#"{"version": "2.31.204"}"#, Format::Json).unwrap();
        assert_eq!(get_str_any(&tree, &["fw", "version"], ""), "2.31.204");
        assert_eq!(get_str_any(&tree, &["fw", "firmware"], "?"), "?");
    }

    #[test]
    fn get_int_defaults_on_missing_and_empty_but_rejects_garbage() {
        let tree = disk_tree();
        assert_eq!(
            get_int::<u64>(&tree, "disks/disk/size", 0).unwrap(),
            1_000_000_000_000
        );
        assert_eq!(get_int::<i16>(&tree, "disks/disk/temp", 0).unwrap(), 0);
        assert_eq!(get_int::<u32>(&tree, "disks/disk/part_cnt", 7).unwrap(), 7);

        match get_int::<u32>(&tree, "disks/disk/name", 0) {
            Err(NasError::Coercion { field, .. }) => assert_eq!(field, "disks/disk/name"),
            other => panic!("expected coercion error, got {other:?}"),
        }
        assert!(get_int::<u32>(&tree, "disks/disk/smart", 0).is_err());
    }

    #[test]
    fn get_bool_accepts_both_encodings() {
        let tree = decode(
            r#"{"a": "1", "b": "true", "c": "0", "d": "false", "e": "", "f": "yes", "g": "True"}"#,
            Format::Json,
        )
        .unwrap();
        assert!(get_bool(&tree, "a", false).unwrap());
        assert!(get_bool(&tree, "b", false).unwrap());
        assert!(!get_bool(&tree, "c", true).unwrap());
        assert!(!get_bool(&tree, "d", true).unwrap());
        assert!(get_bool(&tree, "e", true).unwrap());
        assert!(!get_bool(&tree, "missing", false).unwrap());
        assert!(get_bool(&tree, "f", false).is_err());
        assert!(get_bool(&tree, "g", false).is_err());
    }

    #[test]
    fn get_list_normalizes_cardinality() {
        let single = disk_tree();
        assert_eq!(get_list(&single, "disks/disk").len(), 1);
        assert!(get_list(&single, "raids/raid").is_empty());

        let many = decode(
            "<r><disks><disk><name>sda</name></disk><disk><name>sdb</name></disk></disks><vols></vols></r>",
            Format::Xml,
        )
        .unwrap();
        let names: Vec<String> = get_list(&many, "disks/disk")
            .into_iter()
            .map(|disk| get_str(disk, "name", ""))
            .collect();
        assert_eq!(names, vec!["sda", "sdb"]);
        assert!(get_list(&many, "vols").is_empty());
    }

    #[test]
    fn require_reports_missing_fields() {
        let tree = disk_tree();
        assert_eq!(require_str(&tree, "disks/disk/id").unwrap(), "sda");
        assert!(matches!(
            require_str(&tree, "disks/disk/sn"),
            Err(NasError::Coercion { .. })
        ));
        assert!(matches!(
            require_int::<u64>(&tree, "disks/disk/temp"),
            Err(NasError::Coercion { .. })
        ));
        assert_eq!(require_int::<u8>(&tree, "disks/disk/healthy").unwrap(), 1);
    }
}
