//! mDNS discovery for cast receivers.
//!
//! Thin wrapper around core's discovery session with CLI-specific options.

use std::time::Duration;

use castlink_core::device::DeviceSelector;
use castlink_core::{DiscoveredDevice, DiscoveryConfig, DiscoverySession};
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;

/// Discovery options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Session duration
    pub duration: Duration,
    /// Interface to browse on
    pub interface: Option<String>,
}

impl DiscoveryOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            duration: Duration::from_secs(cli.dns_timeout),
            interface: cli.iface.clone(),
        }
    }

    pub fn to_config(&self) -> DiscoveryConfig {
        DiscoveryConfig::default()
            .with_timeout(self.duration)
            .with_interface(self.interface.clone())
    }
}

/// Start a discovery session.
pub fn start_session(options: &DiscoveryOptions) -> Result<DiscoverySession, CliError> {
    Ok(DiscoverySession::start(&options.to_config())?)
}

/// Discover devices and return the first one matching `selector`.
///
/// Stops reading the session as soon as a match arrives, so the call returns
/// before the deadline when the receiver answers quickly.
pub async fn find_device(
    options: &DiscoveryOptions,
    selector: &DeviceSelector,
) -> Result<DiscoveredDevice, CliError> {
    let mut session = start_session(options)?;
    let mut position = 0;

    while let Some(device) = session.next_device().await {
        position += 1;
        debug!("Considering {} ({})", device.display_name(), position);
        if selector.matches(position, &device) {
            return Ok(device);
        }
    }

    Err(CliError::NoDeviceFound(selector.describe()))
}
