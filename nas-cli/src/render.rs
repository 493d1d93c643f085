// SPDX-License-Identifier: GPL-3.0-only

//! Plain-text views of the entities

use nas_types::{DiskInfo, SmartInfo, StorageUsage, SystemInfo, bytes_to_pretty};

fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn system(system: &SystemInfo) -> String {
    let mut lines = vec![
        format!("{} ({})", system.name, system.model),
        format!("  Serial:      {}", system.serial_number),
        format!("  Firmware:    {}", system.firmware_version),
        format!("  CPU:         {:.0}%", system.cpu_usage * 100.0),
        format!(
            "  Memory:      {} / {} ({:.1}%)",
            bytes_to_pretty(&system.memory_used(), false),
            bytes_to_pretty(&system.memory_total, false),
            system.memory_usage_percent()
        ),
        format!("  Uptime:      {}s", system.uptime_seconds),
        format!("  Temperature: {}°C", system.temperature),
        format!("  Fan:         {} rpm", system.fan_speed),
    ];

    lines.extend(system.raids.iter().map(|raid| {
        format!(
            "  RAID {} {} [{}] {}{}",
            raid.id,
            raid.level,
            raid.member_disks().join(", "),
            raid.state,
            if raid.is_degraded() { " (degraded)" } else { "" }
        )
    }));
    lines.extend(system.volumes.iter().map(|volume| {
        format!(
            "  Volume {} {}: {} used of {}",
            volume.id,
            volume.name,
            bytes_to_pretty(&volume.used_size, false),
            bytes_to_pretty(&volume.size, false)
        )
    }));
    block(lines)
}

pub fn disks(disks: &[DiskInfo]) -> String {
    block(
        disks
            .iter()
            .map(|disk| {
                format!(
                    "{:<6} {:<32} {:>10}  {:>3}°C  SMART {}",
                    disk.id,
                    disk.display_name(),
                    bytes_to_pretty(&disk.size_bytes, false),
                    disk.temperature,
                    disk.smart_status()
                )
            })
            .collect(),
    )
}

pub fn storage(usage: &StorageUsage) -> String {
    format!(
        "Total: {:.2} GB\nUsed:  {:.2} GB ({:.1}%)\nFree:  {:.2} GB\n",
        usage.total_gb, usage.used_gb, usage.usage_percent, usage.free_gb
    )
}

pub fn smart(disk: &str, smart: &SmartInfo) -> String {
    let last_run = smart
        .last_test_date
        .map(|date| format!(" last run {date}"))
        .unwrap_or_default();
    let mut lines = vec![format!(
        "{disk}: {} ({}){last_run}, {:.0}% complete",
        smart.result,
        smart.test_type,
        smart.percent * 100.0
    )];

    lines.extend(smart.attributes.iter().map(|attr| {
        format!(
            "  {:>3} {:<32} {:>3} {:>3} {:>3}{}",
            attr.id,
            attr.name,
            attr.value,
            attr.worst,
            attr.threshold,
            if attr.failing() { "  FAILING" } else { "" }
        )
    }));
    block(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nas_types::SmartAttribute;

    #[test]
    fn storage_summary_lines() {
        let usage = StorageUsage {
            total_gb: 1000.0,
            used_gb: 250.0,
            free_gb: 750.0,
            usage_percent: 25.0,
        };
        assert_eq!(
            storage(&usage),
            "Total: 1000.00 GB\nUsed:  250.00 GB (25.0%)\nFree:  750.00 GB\n"
        );
    }

    #[test]
    fn smart_table_flags_failing_attributes() {
        let info = SmartInfo {
            result: "Pass".to_string(),
            test_type: "short".to_string(),
            percent: 0.9,
            last_test_date: None,
            attributes: vec![SmartAttribute {
                id: 5,
                name: "Reallocated Sectors Count".to_string(),
                value: 9,
                worst: 9,
                threshold: 10,
            }],
        };
        let text = smart("sdb", &info);
        assert!(text.starts_with("sdb: Pass (short), 90% complete\n"));
        assert!(text.contains("FAILING"));
    }

    #[test]
    fn smart_header_mentions_last_run() {
        let info = SmartInfo {
            result: "Pass".to_string(),
            test_type: "long".to_string(),
            percent: 1.0,
            last_test_date: chrono::NaiveDate::from_ymd_opt(2025, 2, 27)
                .and_then(|date| date.and_hms_opt(1, 0, 0)),
            attributes: Vec::new(),
        };
        assert_eq!(
            smart("sda", &info),
            "sda: Pass (long) last run 2025-02-27 01:00:00, 100% complete\n"
        );
    }

    #[test]
    fn empty_disk_list_renders_nothing() {
        assert_eq!(disks(&[]), "");
    }
}
