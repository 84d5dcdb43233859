//! Shared types for cast receiver discovery.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// A cast receiver found during one discovery session.
///
/// Built fresh from a single advertisement and never updated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredDevice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_v4: Option<Ipv4Addr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_v6: Option<Ipv6Addr>,
    pub port: u16,
    pub host_name: String,
    /// Descriptor field `id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    /// Descriptor field `fn`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    /// Descriptor field `md`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Every `key=value` pair parsed from the advertisement.
    pub descriptor_fields: HashMap<String, String>,
}

impl DiscoveredDevice {
    /// Address to reach the receiver's control service on.
    ///
    /// Prefers IPv4 and falls back to IPv6.
    pub fn control_addr(&self) -> Option<SocketAddr> {
        self.address_v4
            .map(IpAddr::V4)
            .or(self.address_v6.map(IpAddr::V6))
            .map(|ip| SocketAddr::new(ip, self.port))
    }

    /// Human-readable name, falling back to the host name.
    pub fn display_name(&self) -> &str {
        self.friendly_name.as_deref().unwrap_or(&self.host_name)
    }
}

/// One service advertisement as reported by the mDNS browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawServiceEntry {
    pub port: u16,
    pub host_name: String,
    pub addrs_v4: Vec<Ipv4Addr>,
    pub addrs_v6: Vec<Ipv6Addr>,
    /// Raw TXT strings, conventionally `key=value`.
    pub text: Vec<String>,
}

impl RawServiceEntry {
    /// True for an entry that carries nothing at all.
    pub fn is_placeholder(&self) -> bool {
        self.port == 0
            && self.host_name.is_empty()
            && self.addrs_v4.is_empty()
            && self.addrs_v6.is_empty()
            && self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_addr_prefers_ipv4() {
        let device = DiscoveredDevice {
            address_v4: Some(Ipv4Addr::new(10, 0, 0, 5)),
            address_v6: Some("fe80::1".parse().unwrap()),
            port: 8009,
            ..Default::default()
        };

        assert_eq!(
            device.control_addr(),
            Some("10.0.0.5:8009".parse().unwrap())
        );
    }

    #[test]
    fn test_control_addr_falls_back_to_ipv6() {
        let device = DiscoveredDevice {
            address_v6: Some("fe80::1".parse().unwrap()),
            port: 8009,
            ..Default::default()
        };

        assert_eq!(device.control_addr(), Some("[fe80::1]:8009".parse().unwrap()));
    }

    #[test]
    fn test_control_addr_without_addresses() {
        let device = DiscoveredDevice {
            port: 8009,
            ..Default::default()
        };
        assert_eq!(device.control_addr(), None);
    }

    #[test]
    fn test_display_name_fallback() {
        let mut device = DiscoveredDevice {
            host_name: "abc123.local.".to_string(),
            ..Default::default()
        };
        assert_eq!(device.display_name(), "abc123.local.");

        device.friendly_name = Some("Kitchen".to_string());
        assert_eq!(device.display_name(), "Kitchen");
    }

    #[test]
    fn test_device_serialization() {
        let device = DiscoveredDevice {
            address_v4: Some(Ipv4Addr::new(192, 168, 1, 20)),
            port: 8009,
            host_name: "abc123.local.".to_string(),
            friendly_name: Some("Kitchen".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["addressV4"], "192.168.1.20");
        assert_eq!(json["friendlyName"], "Kitchen");
        assert!(json.get("addressV6").is_none());
        assert!(json.get("uniqueId").is_none());
    }

    #[test]
    fn test_placeholder_entry() {
        assert!(RawServiceEntry::default().is_placeholder());

        let entry = RawServiceEntry {
            text: vec!["id=1".to_string()],
            ..Default::default()
        };
        assert!(!entry.is_placeholder());
    }
}
