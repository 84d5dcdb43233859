//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, ContentArrangement, Table};

use super::{format_address, OutputFormatter, NO_DEVICES_MESSAGE};
use castlink_core::DiscoveredDevice;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[DiscoveredDevice]) -> String {
        if devices.is_empty() {
            return NO_DEVICES_MESSAGE.to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "Model", "Name", "Address", "UUID"]);

        for (i, device) in devices.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(or_empty(&device.model_name)),
                Cell::new(or_empty(&device.friendly_name)),
                Cell::new(format_address(device)),
                Cell::new(or_empty(&device.unique_id)),
            ]);
        }

        format!("{}\n\nFound {} device(s)", table, devices.len())
    }

    fn format_device_line(&self, index: usize, device: &DiscoveredDevice) -> String {
        format!(
            "{}) device={:?} device_name={:?} address=\"{}\" uuid={:?}",
            index,
            or_empty(&device.model_name),
            or_empty(&device.friendly_name),
            format_address(device),
            or_empty(&device.unique_id)
        )
    }

    fn format_play_result(&self, device: &str, media: &str) -> String {
        format!("{} loaded {} on {}", "[OK]".green(), media, device)
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}
