//! Translation of raw mDNS advertisements into device records.
//!
//! Standalone functions so the mapping can be tested without a network.

use std::collections::HashMap;

use crate::types::{DiscoveredDevice, RawServiceEntry};

/// Split a TXT record on its first `=`.
///
/// Returns `None` for a record without a separator. Values may contain
/// further `=` characters.
pub fn parse_txt_record(record: &str) -> Option<(&str, &str)> {
    record.split_once('=')
}

/// Parse all TXT records of an advertisement into descriptor fields.
pub fn parse_descriptor_fields<S: AsRef<str>>(records: &[S]) -> HashMap<String, String> {
    let mut fields = HashMap::with_capacity(records.len());
    for record in records {
        if let Some((key, value)) = parse_txt_record(record.as_ref()) {
            fields.insert(key.to_string(), value.to_string());
        }
    }
    fields
}

/// Build a `DiscoveredDevice` from one advertisement.
pub fn translate_entry(entry: &RawServiceEntry) -> DiscoveredDevice {
    let descriptor_fields = parse_descriptor_fields(&entry.text);

    DiscoveredDevice {
        address_v4: entry.addrs_v4.first().copied(),
        address_v6: entry.addrs_v6.first().copied(),
        port: entry.port,
        host_name: entry.host_name.clone(),
        unique_id: descriptor_fields.get("id").cloned(),
        friendly_name: descriptor_fields.get("fn").cloned(),
        model_name: descriptor_fields.get("md").cloned(),
        descriptor_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn entry_with_text(text: &[&str]) -> RawServiceEntry {
        RawServiceEntry {
            port: 8009,
            host_name: "abc123.local.".to_string(),
            text: text.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_field_routing() {
        let entry = entry_with_text(&[
            "id=ABC123",
            "fn=Living Room",
            "md=ChromecastV2",
            "extra=ignored",
        ]);

        let device = translate_entry(&entry);

        assert_eq!(device.unique_id.as_deref(), Some("ABC123"));
        assert_eq!(device.friendly_name.as_deref(), Some("Living Room"));
        assert_eq!(device.model_name.as_deref(), Some("ChromecastV2"));

        let expected: HashMap<String, String> = [
            ("id", "ABC123"),
            ("fn", "Living Room"),
            ("md", "ChromecastV2"),
            ("extra", "ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(device.descriptor_fields, expected);
    }

    #[test]
    fn test_record_without_separator_dropped() {
        let entry = entry_with_text(&["novalue", "fn=Kitchen"]);

        let device = translate_entry(&entry);

        assert_eq!(device.descriptor_fields.len(), 1);
        assert!(!device.descriptor_fields.contains_key("novalue"));
        assert_eq!(device.friendly_name.as_deref(), Some("Kitchen"));
    }

    #[test]
    fn test_value_keeps_extra_separators() {
        assert_eq!(parse_txt_record("rs=a=b=c"), Some(("rs", "a=b=c")));
        assert_eq!(parse_txt_record("empty="), Some(("empty", "")));
        assert_eq!(parse_txt_record("=orphan"), Some(("", "orphan")));
        assert_eq!(parse_txt_record("novalue"), None);

        let device = translate_entry(&entry_with_text(&["fn=a=b"]));
        assert_eq!(device.friendly_name.as_deref(), Some("a=b"));
    }

    #[test]
    fn test_absent_named_fields() {
        let device = translate_entry(&entry_with_text(&["ve=05", "ca=4101"]));

        assert!(device.unique_id.is_none());
        assert!(device.friendly_name.is_none());
        assert!(device.model_name.is_none());
        assert_eq!(device.descriptor_fields.len(), 2);
    }

    #[test]
    fn test_address_selection() {
        let entry = RawServiceEntry {
            addrs_v4: vec![Ipv4Addr::new(10, 0, 0, 5), Ipv4Addr::new(10, 0, 0, 6)],
            ..entry_with_text(&[])
        };

        let device = translate_entry(&entry);

        assert_eq!(device.address_v4, Some(Ipv4Addr::new(10, 0, 0, 5)));
        assert_eq!(device.address_v6, None);
    }

    #[test]
    fn test_ipv6_selected_independently() {
        let entry = RawServiceEntry {
            addrs_v6: vec!["fe80::1".parse().unwrap(), "fe80::2".parse().unwrap()],
            ..entry_with_text(&[])
        };

        let device = translate_entry(&entry);

        assert_eq!(device.address_v4, None);
        assert_eq!(device.address_v6, Some("fe80::1".parse().unwrap()));
    }

    #[test]
    fn test_device_without_addresses_still_built() {
        let device = translate_entry(&entry_with_text(&["id=1"]));

        assert_eq!(device.port, 8009);
        assert_eq!(device.host_name, "abc123.local.");
        assert!(device.control_addr().is_none());
    }

    #[test]
    fn test_translation_is_idempotent() {
        let entry = RawServiceEntry {
            addrs_v4: vec![Ipv4Addr::new(192, 168, 1, 20)],
            ..entry_with_text(&["id=X", "fn=Den", "md=Nest Audio", "bogus"])
        };

        assert_eq!(translate_entry(&entry), translate_entry(&entry));
    }

    #[test]
    fn test_parse_descriptor_fields() {
        let fields = parse_descriptor_fields(&["a=1", "b", "c=3=3"]);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields["a"], "1");
        assert_eq!(fields["c"], "3=3");
    }
}
