//! Picking one receiver out of a discovery session.

use crate::types::DiscoveredDevice;

/// How a receiver is chosen among discovered devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSelector {
    /// Friendly name, compared case-insensitively
    Name(String),
    /// Descriptor `id`
    Uuid(String),
    /// 1-based position in discovery order, as printed by `ls`
    Index(usize),
    /// First device found
    First,
}

impl DeviceSelector {
    /// Whether `device`, found at 1-based `position`, satisfies the selector.
    pub fn matches(&self, position: usize, device: &DiscoveredDevice) -> bool {
        match self {
            DeviceSelector::Name(name) => device
                .friendly_name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(name)),
            DeviceSelector::Uuid(id) => device.unique_id.as_deref() == Some(id.as_str()),
            DeviceSelector::Index(index) => position == *index,
            DeviceSelector::First => true,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DeviceSelector::Name(name) => format!("name {:?}", name),
            DeviceSelector::Uuid(id) => format!("uuid {:?}", id),
            DeviceSelector::Index(index) => format!("index {}", index),
            DeviceSelector::First => "any device".to_string(),
        }
    }
}
