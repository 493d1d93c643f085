// SPDX-License-Identifier: GPL-3.0-only

//! Domain normalizers: generic trees → `nas_types` entities
//!
//! Firmware generations disagree on where the same logical data lives. Each
//! normalizer takes a payload enum naming which generation produced the
//! tree; the caller picks the variant from configuration, never from the
//! shape of the data, and both variants feed the same entity builder.
//!
//! Representation choices held across every call site:
//! - percentages coming off the wire as 0-100 become fractions in 0.0..=1.0
//!   (`SmartInfo::percent`, `SystemInfo::cpu_usage`);
//! - missing optional numbers are 0, flags are false, strings are empty
//!   (disk vendor/model/name and SMART result fall back to "Unknown").

pub mod disk;
pub mod log;
pub mod raid;
pub mod smart;
pub mod system;
pub mod uptime;
pub mod volume;

pub use disk::{DiskPayload, join_smart_summaries, normalize_disks};
pub use log::normalize_logs;
pub use raid::{normalize_raid, normalize_raids};
pub use smart::{SmartSummary, SmartSummaryPayload, normalize_smart_summary, parse_smart_result};
pub use system::{SystemPayload, normalize_system};
pub use uptime::parse_uptime;
pub use volume::{VolumePayload, normalize_volumes};

use crate::error::{NasError, Result};
use crate::extract::{self, parse_number};
use crate::tree::Node;

/// Whole percent (0-100, optionally suffixed with `%`) → fraction in 0.0..=1.0
pub(crate) fn percent_fraction(node: &Node, path: &str) -> Result<f64> {
    let raw = extract::get_str(node, path, "");
    let raw = raw.trim().trim_end_matches('%').trim_end();
    if raw.is_empty() {
        return Ok(0.0);
    }

    let whole: f64 = parse_number(path, raw)?;
    if !whole.is_finite() {
        return Err(NasError::coercion(path, "percent", format!("`{raw}` is not a finite number")));
    }
    Ok((whole / 100.0).clamp(0.0, 1.0))
}

/// Positional cells of every flexigrid row (`{"rows": [{"cell": [...]}]}`)
pub(crate) fn flexigrid_rows(node: &Node) -> Vec<Vec<String>> {
    extract::get_list(node, "rows")
        .into_iter()
        .map(|row| {
            extract::get_list(row, "cell")
                .into_iter()
                .map(|cell| cell.as_scalar().unwrap_or_default().trim().to_string())
                .collect()
        })
        .collect()
}
