// SPDX-License-Identifier: GPL-3.0-only

//! SMART summaries and the `"Pass [YYYY/MM/DD HH:MM:SS]"` result string

use chrono::NaiveDateTime;
use nas_types::{SmartAttribute, SmartInfo};

use super::{flexigrid_rows, percent_fraction};
use crate::error::{NasError, Result};
use crate::extract::{self, parse_number};
use crate::tree::Node;

/// Timestamp layout the appliance embeds in SMART result strings
pub const SMART_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Split a result such as `"Pass [2023/05/15 12:30:45]"` into status and date.
///
/// Without a bracket pair, or when the bracket does not hold a valid
/// timestamp, the whole trimmed input is the status and the date is `None`.
pub fn parse_smart_result(raw: &str) -> (String, Option<NaiveDateTime>) {
    let trimmed = raw.trim();

    let Some(open) = trimmed.find('[') else {
        return (trimmed.to_string(), None);
    };
    let Some(len) = trimmed[open + 1..].find(']') else {
        return (trimmed.to_string(), None);
    };

    let inner = trimmed[open + 1..open + 1 + len].trim();
    match NaiveDateTime::parse_from_str(inner, SMART_DATE_FORMAT) {
        Ok(date) => (trimmed[..open].trim().to_string(), Some(date)),
        Err(_) => (trimmed.to_string(), None),
    }
}

/// SMART header carried on a disk identity record
pub(crate) fn smart_header(
    smart: &Node,
    test_path: &str,
    percent_path: Option<&str>,
) -> Result<SmartInfo> {
    let (result, last_test_date) = parse_smart_result(&extract::get_str(smart, "result", "Unknown"));
    let percent = match percent_path {
        Some(path) => percent_fraction(smart, path)?,
        None => 0.0,
    };

    Ok(SmartInfo {
        result,
        test_type: extract::get_str(smart, test_path, "unknown"),
        percent,
        last_test_date,
        attributes: Vec::new(),
    })
}

/// Data from the per-disk SMART endpoint, before it is joined onto a disk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmartSummary {
    /// Self-test progress as a fraction, when the endpoint reports one
    pub percent: Option<f64>,
    pub attributes: Vec<SmartAttribute>,
}

/// Source shapes of `smart.cgi` `cgi_Status_SMART_HD_Info`
#[derive(Debug, Clone, Copy)]
pub enum SmartSummaryPayload<'a> {
    /// Flexigrid rows: `cell = [row, id, name, threshold, value, worst, status]`
    Legacy(&'a Node),
    /// `{"percent": "95", "attributes": [{"id", "name", "value", "worst", "threshold"}]}`
    PerEndpoint(&'a Node),
}

pub fn normalize_smart_summary(payload: SmartSummaryPayload<'_>) -> Result<SmartSummary> {
    match payload {
        SmartSummaryPayload::Legacy(node) => {
            let attributes = flexigrid_rows(node)
                .iter()
                .map(|cells| attribute_from_cells(cells))
                .collect::<Result<Vec<_>>>()?;
            Ok(SmartSummary {
                percent: None,
                attributes,
            })
        }
        SmartSummaryPayload::PerEndpoint(node) => {
            let percent = match extract::get(node, "percent") {
                Some(_) => Some(percent_fraction(node, "percent")?),
                None => None,
            };
            let attributes = extract::get_list(node, "attributes")
                .into_iter()
                .map(attribute_from_node)
                .collect::<Result<Vec<_>>>()?;
            Ok(SmartSummary {
                percent,
                attributes,
            })
        }
    }
}

fn attribute_from_node(node: &Node) -> Result<SmartAttribute> {
    Ok(SmartAttribute {
        id: extract::require_int(node, "id")?,
        name: extract::require_str(node, "name")?,
        value: extract::require_int(node, "value")?,
        worst: extract::require_int(node, "worst")?,
        threshold: extract::require_int(node, "threshold")?,
    })
}

fn cell<'a>(cells: &'a [String], index: usize, field: &str) -> Result<&'a str> {
    cells
        .get(index)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| NasError::missing(&format!("rows/cell[{index}] ({field})"), "string"))
}

fn attribute_from_cells(cells: &[String]) -> Result<SmartAttribute> {
    Ok(SmartAttribute {
        id: parse_number("id", cell(cells, 1, "id")?)?,
        name: cell(cells, 2, "name")?.to_string(),
        threshold: parse_number("threshold", cell(cells, 3, "threshold")?)?,
        value: parse_number("value", cell(cells, 4, "value")?)?,
        worst: parse_number("worst", cell(cells, 5, "worst")?)?,
    })
}
