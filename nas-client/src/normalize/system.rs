// SPDX-License-Identifier: GPL-3.0-only

//! System health from one monolithic document or several per-topic endpoints

use nas_types::SystemInfo;

use super::volume::{VolumePayload, normalize_volumes};
use super::{normalize_logs, normalize_raids, parse_uptime, percent_fraction};
use crate::error::Result;
use crate::extract::{get_int, get_list, get_str, get_str_any};
use crate::tree::Node;

/// Source documents for [`normalize_system`]
#[derive(Debug, Clone, Copy)]
pub enum SystemPayload<'a> {
    /// Monolithic `sysinfo.xml` plus `home_mgr` for fan and volumes
    Legacy {
        sysinfo: &'a Node,
        home: &'a Node,
        logs: &'a Node,
    },
    PerEndpoint {
        /// `status_mgr.cgi cmd=resource`
        status: &'a Node,
        /// `system_mgr.cgi cmd=cgi_get_device_info`
        device: &'a Node,
        /// `system_mgr.cgi cmd=get_firm_v_xml`
        firmware: &'a Node,
        /// `home_mgr.cgi cmd=2`
        home: &'a Node,
        /// `system_mgr.cgi cmd=cgi_log_system`
        logs: &'a Node,
    },
}

pub fn normalize_system(payload: SystemPayload<'_>) -> Result<SystemInfo> {
    match payload {
        SystemPayload::Legacy {
            sysinfo,
            home,
            logs,
        } => {
            let memory_total: u64 = get_int(sysinfo, "memory/total", 0)?;
            let memory_used: u64 = get_int(sysinfo, "memory/used", 0)?;

            Ok(SystemInfo {
                serial_number: get_str_any(sysinfo, &["serial", "serial_number"], ""),
                name: get_str(sysinfo, "name", ""),
                model: get_str(sysinfo, "model", ""),
                firmware_version: get_str_any(sysinfo, &["firmware_version", "fw"], ""),
                fan_speed: get_int(home, "fan", 0)?,
                memory_total,
                memory_free: memory_total.saturating_sub(memory_used),
                cpu_usage: percent_fraction(sysinfo, "cpu_usage")?,
                uptime_seconds: parse_uptime(&get_str(sysinfo, "uptime", "0")),
                temperature: get_int(sysinfo, "temperature", 0)?,
                raids: normalize_raids(get_list(sysinfo, "raids/raid"))?,
                volumes: normalize_volumes(VolumePayload::Legacy { home })?,
                logs: normalize_logs(logs),
                ..SystemInfo::default()
            })
        }
        SystemPayload::PerEndpoint {
            status,
            device,
            firmware,
            home,
            logs,
        } => Ok(SystemInfo {
            serial_number: get_str(device, "serial_number", ""),
            name: get_str(device, "name", ""),
            model: get_str(device, "model", ""),
            workgroup: get_str(device, "workgroup", ""),
            description: get_str(device, "description", ""),
            firmware_version: get_str_any(firmware, &["fw", "version"], ""),
            oled: get_str(firmware, "oled", ""),
            fan_speed: get_int(home, "fan", 0)?,
            lan_r_speed: get_int(status, "lan_r_speed", 0)?,
            lan_t_speed: get_int(status, "lan_t_speed", 0)?,
            lan2_r_speed: get_int(status, "lan2_r_speed", 0)?,
            lan2_t_speed: get_int(status, "lan2_t_speed", 0)?,
            memory_total: get_int(status, "mem_total", 0)?,
            memory_free: get_int(status, "mem_free", 0)?,
            memory_buffers: get_int(status, "buffers", 0)?,
            memory_cached: get_int(status, "cached", 0)?,
            cpu_usage: percent_fraction(status, "cpu")?,
            uptime_seconds: parse_uptime(&get_str(status, "uptime", "0")),
            temperature: get_int(status, "temperature", 0)?,
            raids: normalize_raids(get_list(status, "config/raids/raid"))?,
            volumes: normalize_volumes(VolumePayload::PerEndpoint { status })?,
            logs: normalize_logs(logs),
        }),
    }
}
