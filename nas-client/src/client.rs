// SPDX-License-Identifier: GPL-3.0-only

//! Endpoint catalogue and the authenticated request layer

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use tracing::{debug, error, info};

use crate::config::{ClientConfig, Credentials};
use crate::error::{NasError, Result};
use crate::transport::{RawResponse, Session, Transport};
use crate::tree::{self, Format, Node};

/// Path of the authentication handshake on the HTTPS port
pub const AUTH_PATH: &str = "/nas/v1/auth";

/// One management API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    SystemStatus,
    DeviceInfo,
    SystemLogs,
    FirmwareVersion,
    HomeInfo,
    /// Per-disk SMART summary, keyed by device name (`sda`)
    SmartSummary(String),
    SysInfo,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::SystemStatus => "/cgi-bin/status_mgr.cgi",
            Endpoint::DeviceInfo | Endpoint::SystemLogs | Endpoint::FirmwareVersion => {
                "/cgi-bin/system_mgr.cgi"
            }
            Endpoint::HomeInfo => "/cgi-bin/home_mgr.cgi",
            Endpoint::SmartSummary(_) => "/cgi-bin/smart.cgi",
            Endpoint::SysInfo => "/xml/sysinfo.xml",
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Endpoint::SystemLogs | Endpoint::SmartSummary(_) => Format::Json,
            _ => Format::Xml,
        }
    }

    /// Form fields for CGI endpoints; empty for plain XML documents
    pub fn form(&self) -> Vec<(&'static str, &str)> {
        match self {
            Endpoint::SystemStatus => vec![("cmd", "resource")],
            Endpoint::DeviceInfo => vec![("cmd", "cgi_get_device_info")],
            Endpoint::SystemLogs => vec![
                ("page", "1"),
                ("rp", "10"),
                ("sortname", ""),
                ("sortorder", "asc"),
                ("query", ""),
                ("qtype", ""),
                ("f_field", "false"),
                ("cmd", "cgi_log_system"),
                ("user", ""),
            ],
            Endpoint::FirmwareVersion => vec![("cmd", "get_firm_v_xml")],
            Endpoint::HomeInfo => vec![("cmd", "2")],
            Endpoint::SmartSummary(disk) => {
                vec![("f_field", disk.as_str()), ("cmd", "cgi_Status_SMART_HD_Info")]
            }
            Endpoint::SysInfo => Vec::new(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::SmartSummary(disk) => write!(f, "SmartSummary({disk})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Issues endpoint calls through a [`Transport`] and decodes the bodies
#[derive(Debug)]
pub struct NasClient<T: Transport> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> NasClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Handshake against `https://host:https_port/nas/v1/auth`
    pub fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let url = format!("{}{AUTH_PATH}", self.config.https_base_url());
        let body = json!({
            "username": credentials.username,
            "password": STANDARD.encode(credentials.password.as_bytes()),
        });

        let response = self.transport.post_json(&url, &body)?;
        if response.status != 200 {
            error!("Authentication failed with status code {}", response.status);
            return Err(NasError::Auth(format!(
                "authentication failed: {} {}",
                response.status,
                crate::error::snippet(&response.body)
            )));
        }

        info!("Successfully authenticated with NAS {}", self.config.host);
        Ok(Session::authenticated(response.cookies))
    }

    /// Issue one call and decode its body in the endpoint's declared format
    pub fn fetch(&self, endpoint: &Endpoint, session: &Session) -> Result<Node> {
        let response = self.fetch_raw(endpoint, session)?;
        tree::decode(&response.body, endpoint.format())
    }

    fn fetch_raw(&self, endpoint: &Endpoint, session: &Session) -> Result<RawResponse> {
        if !session.is_authenticated() {
            return Err(NasError::Auth(
                "you must authenticate before making API calls".to_string(),
            ));
        }

        let url = format!("{}{}", self.config.http_base_url(), endpoint.path());
        let response = match endpoint {
            Endpoint::SysInfo => {
                let id = chrono::Utc::now().timestamp().to_string();
                self.transport.get(&url, &[("id", id.as_str())], session)?
            }
            _ => self.transport.post_form(&url, &endpoint.form(), session)?,
        };
        debug!(%endpoint, status = response.status, "NAS request completed");

        match response.status {
            401 => Err(NasError::Auth("authentication expired or invalid".to_string())),
            _ if !response.is_success() => Err(NasError::Transport(format!(
                "HTTP error {} from {}",
                response.status,
                endpoint.path()
            ))),
            _ => Ok(response),
        }
    }
}
