// SPDX-License-Identifier: GPL-3.0-only

use nas_types::LogEntry;

use super::flexigrid_rows;
use crate::tree::Node;

/// Flexigrid log rows, `cell = [level, timestamp, service, message]`.
///
/// Short rows leave the missing columns empty.
pub fn normalize_logs(node: &Node) -> Vec<LogEntry> {
    flexigrid_rows(node)
        .into_iter()
        .map(|cells| {
            let mut cells = cells.into_iter();
            let mut next = || cells.next().unwrap_or_default();
            LogEntry {
                level: next(),
                timestamp: next(),
                service: next(),
                message: next(),
            }
        })
        .collect()
}
