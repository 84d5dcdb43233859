//! mDNS browsing for cast receivers.
//!
//! The `Browser` trait is the seam between the discovery session and the
//! network. `MdnsBrowser` is the production implementation over `mdns-sd`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use async_trait::async_trait;
use mdns_sd::{IfKind, ScopedIp, ServiceDaemon, ServiceEvent, TxtProperty};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace, warn};

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::types::RawServiceEntry;

/// Source of raw service advertisements.
#[async_trait]
pub trait Browser: Send + 'static {
    /// Browse until `deadline`, publishing each resolved advertisement into
    /// `entries` in the order it was resolved.
    ///
    /// Returning stops the browse. The channel closes once `entries` is dropped.
    async fn browse(
        &mut self,
        deadline: Instant,
        entries: mpsc::Sender<RawServiceEntry>,
    ) -> Result<(), DiscoveryError>;
}

/// Browser backed by an `mdns-sd` daemon owned by a single session.
pub struct MdnsBrowser {
    daemon: ServiceDaemon,
    service_type: String,
}

impl MdnsBrowser {
    /// Create the mDNS client, optionally restricted to one interface.
    pub fn new(config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let daemon =
            ServiceDaemon::new().map_err(|e| DiscoveryError::ResolverInit(e.to_string()))?;

        let browser = Self {
            daemon,
            service_type: config.service_type.clone(),
        };

        if let Some(iface) = &config.interface {
            browser.select_interface(iface)?;
        }

        Ok(browser)
    }

    fn select_interface(&self, iface: &str) -> Result<(), DiscoveryError> {
        self.daemon
            .disable_interface(IfKind::All)
            .and_then(|_| self.daemon.enable_interface(IfKind::Name(iface.to_string())))
            .map_err(|e| {
                DiscoveryError::ResolverInit(format!("unable to select interface {}: {}", iface, e))
            })
    }
}

#[async_trait]
impl Browser for MdnsBrowser {
    async fn browse(
        &mut self,
        deadline: Instant,
        entries: mpsc::Sender<RawServiceEntry>,
    ) -> Result<(), DiscoveryError> {
        let receiver = self
            .daemon
            .browse(&self.service_type)
            .map_err(|e| DiscoveryError::Browse(e.to_string()))?;

        debug!("Browsing for {} services", self.service_type);

        let result = loop {
            let event = tokio::select! {
                _ = sleep_until(deadline) => break Ok(()),
                _ = entries.closed() => {
                    debug!("Entry consumer gone, stopping browse");
                    break Ok(());
                }
                event = receiver.recv_async() => event,
            };

            let info = match event {
                Ok(ServiceEvent::ServiceResolved(info)) => info,
                Ok(other) => {
                    trace!("Ignoring mDNS event: {:?}", other);
                    continue;
                }
                Err(e) => break Err(DiscoveryError::Browse(e.to_string())),
            };

            debug!("Resolved {} at port {}", info.get_fullname(), info.get_port());

            let (addrs_v4, addrs_v6) =
                split_addresses(info.get_addresses().iter().map(ScopedIp::to_ip_addr));

            let entry = RawServiceEntry {
                port: info.get_port(),
                host_name: info.get_hostname().to_string(),
                addrs_v4,
                addrs_v6,
                text: info.get_properties().iter().map(txt_record).collect(),
            };

            tokio::select! {
                _ = sleep_until(deadline) => break Ok(()),
                sent = entries.send(entry) => {
                    if sent.is_err() {
                        // Consumer is gone, nothing left to publish to.
                        break Ok(());
                    }
                }
            }
        };

        if let Err(e) = self.daemon.stop_browse(&self.service_type) {
            trace!("stop_browse failed: {}", e);
        }

        result
    }
}

impl Drop for MdnsBrowser {
    fn drop(&mut self) {
        if let Err(e) = self.daemon.shutdown() {
            warn!("Unable to shut down mDNS daemon: {}", e);
        }
    }
}

/// Partition addresses by family, each sorted so that "first" is stable.
pub fn split_addresses<I>(addrs: I) -> (Vec<Ipv4Addr>, Vec<Ipv6Addr>)
where
    I: IntoIterator<Item = IpAddr>,
{
    let mut v4 = Vec::new();
    let mut v6 = Vec::new();

    for addr in addrs {
        match addr {
            IpAddr::V4(addr) => v4.push(addr),
            IpAddr::V6(addr) => v6.push(addr),
        }
    }

    v4.sort();
    v6.sort();
    (v4, v6)
}

fn txt_record(property: &TxtProperty) -> String {
    format_txt_record(property.key(), property.val())
}

/// Rebuild the wire form of a TXT string.
///
/// A property without a value is a bare key, with no `=`. Values that are not
/// valid UTF-8 are decoded lossily, bad bytes becoming U+FFFD.
pub fn format_txt_record(key: &str, value: Option<&[u8]>) -> String {
    match value {
        Some(value) => format!("{}={}", key, String::from_utf8_lossy(value)),
        None => key.to_string(),
    }
}
