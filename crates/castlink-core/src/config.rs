//! Discovery configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Service type cast receivers advertise under.
pub const SERVICE_TYPE: &str = "_googlecast._tcp";

/// mDNS browse domain.
pub const SERVICE_DOMAIN: &str = "local";

/// Default time a discovery session stays open.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Longest session a config may ask for.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Default capacity of the raw and output channels of a session.
pub const DEFAULT_BUFFER_CAPACITY: usize = 5;

/// Settings for one discovery session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// How long the session browses before its stream closes
    pub timeout: Duration,
    /// Restrict the browse to this network interface
    pub interface: Option<String>,
    /// Channel capacity between the pipeline stages
    pub buffer_capacity: usize,
    /// Fully qualified service type, e.g. `_googlecast._tcp.local.`
    pub service_type: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interface: None,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            service_type: format!("{}.{}.", SERVICE_TYPE, SERVICE_DOMAIN),
        }
    }
}

impl DiscoveryConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_interface(mut self, interface: Option<String>) -> Self {
        self.interface = interface;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Check the settings before a session is started.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "timeout must be greater than zero".to_string(),
            ));
        }

        if self.timeout > MAX_TIMEOUT {
            return Err(ConfigError::InvalidTimeout(format!(
                "timeout must be at most {}s",
                MAX_TIMEOUT.as_secs()
            )));
        }

        if self.buffer_capacity == 0 {
            return Err(ConfigError::InvalidCapacity(self.buffer_capacity));
        }

        let suffix = format!(".{}.", SERVICE_DOMAIN);
        if !self.service_type.starts_with('_') || !self.service_type.ends_with(&suffix) {
            return Err(ConfigError::InvalidServiceType(self.service_type.clone()));
        }

        if let Some(iface) = &self.interface {
            if iface.trim().is_empty() {
                return Err(ConfigError::InvalidInterface(iface.clone()));
            }
        }

        Ok(())
    }
}
