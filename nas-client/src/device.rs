// SPDX-License-Identifier: GPL-3.0-only

//! Device facade: one refresh cycle, typed views over its payloads

use nas_types::{DiskInfo, SmartInfo, StorageUsage, SystemInfo};
use tracing::{debug, info};

use crate::client::{Endpoint, NasClient};
use crate::config::{ApiGeneration, Credentials};
use crate::error::{NasError, Result};
use crate::extract;
use crate::normalize::{
    DiskPayload, SmartSummaryPayload, SystemPayload, VolumePayload, join_smart_summaries,
    normalize_disks, normalize_smart_summary, normalize_system, normalize_volumes,
};
use crate::transport::{Session, Transport};
use crate::tree::Node;

/// Decoded payloads of one refresh, tagged by the generation that produced them
#[derive(Debug, Clone)]
pub enum RawBundle {
    Legacy {
        sysinfo: Node,
        home: Node,
        logs: Node,
        /// SMART summaries keyed by disk, in home-list order
        smart: Vec<(String, Node)>,
    },
    PerEndpoint {
        status: Node,
        device: Node,
        firmware: Node,
        home: Node,
        logs: Node,
        sysinfo: Node,
        smart: Vec<(String, Node)>,
    },
}

/// A NAS appliance as seen through one authenticated session
#[derive(Debug)]
pub struct NasDevice<T: Transport> {
    client: NasClient<T>,
    session: Session,
    generation: ApiGeneration,
    bundle: Option<RawBundle>,
}

impl<T: Transport> NasDevice<T> {
    /// Wrap an existing session; the generation comes from the client config
    pub fn new(client: NasClient<T>, session: Session) -> Self {
        let generation = client.config().generation;
        Self {
            client,
            session,
            generation,
            bundle: None,
        }
    }

    /// Authenticate and wrap the resulting session
    pub fn connect(client: NasClient<T>, credentials: &Credentials) -> Result<Self> {
        let session = client.authenticate(credentials)?;
        Ok(Self::new(client, session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn generation(&self) -> ApiGeneration {
        self.generation
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.is_some()
    }

    /// Replace the session; the old one stays in place if the handshake fails
    pub fn reauthenticate(&mut self, credentials: &Credentials) -> Result<()> {
        self.session = self.client.authenticate(credentials)?;
        Ok(())
    }

    /// Fetch every endpoint of the configured generation.
    ///
    /// Nothing is stored unless every call succeeds.
    pub fn refresh(&mut self) -> Result<()> {
        let bundle = match self.generation {
            ApiGeneration::Legacy => {
                let sysinfo = self.fetch(Endpoint::SysInfo)?;
                let home = self.fetch(Endpoint::HomeInfo)?;
                let logs = self.fetch(Endpoint::SystemLogs)?;
                let smart = self.fetch_smart(&smart_keys(&home))?;
                RawBundle::Legacy {
                    sysinfo,
                    home,
                    logs,
                    smart,
                }
            }
            ApiGeneration::PerEndpoint => {
                let status = self.fetch(Endpoint::SystemStatus)?;
                let device = self.fetch(Endpoint::DeviceInfo)?;
                let firmware = self.fetch(Endpoint::FirmwareVersion)?;
                let home = self.fetch(Endpoint::HomeInfo)?;
                let logs = self.fetch(Endpoint::SystemLogs)?;
                let sysinfo = self.fetch(Endpoint::SysInfo)?;

                let mut keys = smart_keys(&home);
                if keys.is_empty() {
                    keys = extract::get_list(&sysinfo, "config/disks/disk")
                        .into_iter()
                        .map(|disk| extract::get_str(disk, "name", ""))
                        .filter(|name| !name.is_empty())
                        .collect();
                }
                let smart = self.fetch_smart(&keys)?;

                RawBundle::PerEndpoint {
                    status,
                    device,
                    firmware,
                    home,
                    logs,
                    sysinfo,
                    smart,
                }
            }
        };

        info!(generation = ?self.generation, "Refreshed NAS data");
        self.bundle = Some(bundle);
        Ok(())
    }

    fn fetch(&self, endpoint: Endpoint) -> Result<Node> {
        self.client.fetch(&endpoint, &self.session)
    }

    fn fetch_smart(&self, keys: &[String]) -> Result<Vec<(String, Node)>> {
        keys.iter()
            .map(|key| -> Result<(String, Node)> {
                debug!("Fetching SMART summary for {key}");
                Ok((key.clone(), self.fetch(Endpoint::SmartSummary(key.clone()))?))
            })
            .collect()
    }

    fn bundle(&self) -> Result<&RawBundle> {
        self.bundle.as_ref().ok_or_else(NasError::not_loaded)
    }

    pub fn get_system_info(&self) -> Result<SystemInfo> {
        let payload = match self.bundle()? {
            RawBundle::Legacy {
                sysinfo,
                home,
                logs,
                ..
            } => SystemPayload::Legacy {
                sysinfo,
                home,
                logs,
            },
            RawBundle::PerEndpoint {
                status,
                device,
                firmware,
                home,
                logs,
                ..
            } => SystemPayload::PerEndpoint {
                status,
                device,
                firmware,
                home,
                logs,
            },
        };
        normalize_system(payload)
    }

    /// Disk identities joined with their SMART summaries
    pub fn get_disks(&self) -> Result<Vec<DiskInfo>> {
        match self.bundle()? {
            RawBundle::Legacy { home, smart, .. } => {
                let disks = normalize_disks(DiskPayload::Legacy { home })?;
                let summaries = smart
                    .iter()
                    .map(|(key, node)| -> Result<_> {
                        Ok((key.clone(), normalize_smart_summary(SmartSummaryPayload::Legacy(node))?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                join_smart_summaries(disks, summaries)
            }
            RawBundle::PerEndpoint { sysinfo, smart, .. } => {
                let disks = normalize_disks(DiskPayload::PerEndpoint { sysinfo })?;
                let summaries = smart
                    .iter()
                    .map(|(key, node)| -> Result<_> {
                        Ok((
                            key.clone(),
                            normalize_smart_summary(SmartSummaryPayload::PerEndpoint(node))?,
                        ))
                    })
                    .collect::<Result<Vec<_>>>()?;
                join_smart_summaries(disks, summaries)
            }
        }
    }

    /// Capacity totals; reads only the volume list
    pub fn get_storage_usage(&self) -> Result<StorageUsage> {
        let payload = match self.bundle()? {
            RawBundle::Legacy { home, .. } => VolumePayload::Legacy { home },
            RawBundle::PerEndpoint { status, .. } => VolumePayload::PerEndpoint { status },
        };
        let volumes = normalize_volumes(payload)?;
        Ok(StorageUsage::from_volumes(&volumes))
    }

    pub fn get_disk_smart_details(&self, disk_key: &str) -> Result<SmartInfo> {
        let disk = self
            .get_disks()?
            .into_iter()
            .find(|disk| disk.id == disk_key)
            .ok_or_else(|| NasError::NotFound(format!("disk `{disk_key}`")))?;

        disk.smart
            .ok_or_else(|| NasError::NotFound(format!("disk `{disk_key}` reports no SMART data")))
    }
}

/// Disk keys listed by `home_mgr`, used to address the SMART endpoint
fn smart_keys(home: &Node) -> Vec<String> {
    let mut disks = extract::get_list(home, "disks/disk");
    if disks.is_empty() {
        disks = extract::get_list(home, "disk");
    }

    disks
        .into_iter()
        .map(|disk| extract::get_str(disk, "id", ""))
        .filter(|key| !key.is_empty())
        .collect()
}
