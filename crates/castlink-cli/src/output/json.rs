//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::json;

use super::{format_address, OutputFormatter};
use castlink_core::DiscoveredDevice;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[DiscoveredDevice]) -> String {
        let output = json!({
            "devices": devices,
            "count": devices.len()
        });
        Self::to_json(&output)
    }

    fn format_device_line(&self, index: usize, device: &DiscoveredDevice) -> String {
        // One compact document per line so streamed output stays line-delimited.
        json!({
            "index": index,
            "address": format_address(device),
            "device": device
        })
        .to_string()
    }

    fn format_play_result(&self, device: &str, media: &str) -> String {
        Self::to_json(&json!({
            "device": device,
            "media": media,
            "success": true
        }))
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }
}
