// SPDX-License-Identifier: GPL-3.0-only

//! nas-monitor - print NAS health, disks and storage usage

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

use nas_client::{ClientConfig, HttpTransport, NasClient, NasDevice};

mod render;

#[derive(Debug, Parser)]
#[command(name = "nas-monitor")]
#[command(about = "Query a NAS appliance's management API", version)]
struct Cli {
    /// TOML file with host, username and optional password
    #[arg(long, default_value = "nas-monitor.toml")]
    config: PathBuf,
    /// Print pretty JSON instead of text
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Identity, gauges, RAID arrays and volumes
    System,
    /// Physical disks and their SMART status
    Disks,
    /// Capacity summary across volumes
    Storage,
    /// SMART attribute table of one disk
    Smart {
        /// Device key, e.g. sda
        disk: String,
    },
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nas_monitor=info,nas_client=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if config.password.is_none() {
        config.password = std::env::var("NAS_PASSWORD").ok();
    }
    let credentials = config
        .credentials()
        .context("set `password` in the config file or NAS_PASSWORD")?;

    let transport = HttpTransport::new(&config)?;
    let client = NasClient::new(config, transport)?;
    let mut device = NasDevice::connect(client, &credentials)?;
    device.refresh()?;

    match cli.command {
        Command::System => emit(cli.json, &device.get_system_info()?, render::system),
        Command::Disks => emit(cli.json, &device.get_disks()?, |disks| render::disks(disks)),
        Command::Storage => emit(cli.json, &device.get_storage_usage()?, render::storage),
        Command::Smart { disk } => {
            let smart = device.get_disk_smart_details(&disk)?;
            emit(cli.json, &smart, |smart| render::smart(&disk, smart))
        }
    }
}
