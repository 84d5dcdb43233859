//! CLI argument definitions using clap.

use std::net::IpAddr;

use clap::{ArgGroup, Args, Parser, Subcommand};

use castlink_core::config::MAX_TIMEOUT;
use castlink_core::device::{DeviceSelector, DEFAULT_CAST_PORT};

/// castlink - discover cast receivers on the local network and play media on them
#[derive(Parser, Debug)]
#[command(name = "castlink")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// mDNS discovery timeout in seconds
    #[arg(
        long,
        global = true,
        default_value = "3",
        env = "CASTLINK_DNS_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT.as_secs())
    )]
    pub dns_timeout: u64,

    /// Network interface to browse on
    #[arg(long, global = true, env = "CASTLINK_IFACE")]
    pub iface: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cast receivers on the network
    Ls(LsArgs),

    /// Load media on a cast receiver
    Play(PlayArgs),
}

// ==================== Ls ====================

#[derive(Args, Debug, Clone)]
pub struct LsArgs {
    /// Wait for discovery to finish and print the full list at once
    #[arg(short, long)]
    pub wait: bool,
}

// ==================== Play ====================

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("target").args(["device_name", "uuid", "index", "addr"])))]
pub struct PlayArgs {
    /// Media URL (http or https)
    pub media: String,

    /// Receiver friendly name
    #[arg(short = 'n', long)]
    pub device_name: Option<String>,

    /// Receiver unique id
    #[arg(short, long)]
    pub uuid: Option<String>,

    /// Receiver position as printed by `ls` (1-based)
    #[arg(short, long)]
    pub index: Option<usize>,

    /// Receiver address, skips discovery
    #[arg(short, long)]
    pub addr: Option<IpAddr>,

    /// Receiver control port (with --addr)
    #[arg(short, long, default_value_t = DEFAULT_CAST_PORT, requires = "addr")]
    pub port: u16,

    /// Media content type, guessed from the URL when omitted
    #[arg(long)]
    pub content_type: Option<String>,

    /// Return once the media is loaded
    #[arg(short, long)]
    pub detach: bool,
}

impl PlayArgs {
    /// Selector for discovered devices. Not used when `addr` is set.
    pub fn selector(&self) -> DeviceSelector {
        if let Some(name) = &self.device_name {
            DeviceSelector::Name(name.clone())
        } else if let Some(uuid) = &self.uuid {
            DeviceSelector::Uuid(uuid.clone())
        } else if let Some(index) = self.index {
            DeviceSelector::Index(index)
        } else {
            DeviceSelector::First
        }
    }
}
