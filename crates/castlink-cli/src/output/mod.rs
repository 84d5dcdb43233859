//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use castlink_core::DiscoveredDevice;

/// Message printed when a session ends without any device.
pub const NO_DEVICES_MESSAGE: &str = "no cast devices found on network";

/// Output formatter trait
pub trait OutputFormatter {
    /// Format the full device list of a finished session
    fn format_devices(&self, devices: &[DiscoveredDevice]) -> String;

    /// Format one device as it arrives, `index` being 1-based
    fn format_device_line(&self, index: usize, device: &DiscoveredDevice) -> String;

    /// Format the outcome of a media load
    fn format_play_result(&self, device: &str, media: &str) -> String;

    /// Format a generic message
    fn format_message(&self, message: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}

/// `address:port` of a device, or `-` when it advertised no address.
pub fn format_address(device: &DiscoveredDevice) -> String {
    match device.control_addr() {
        Some(addr) => addr.to_string(),
        None => format!("-:{}", device.port),
    }
}
