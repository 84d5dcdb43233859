//! Error types for castlink core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Discovery errors.
///
/// Only `ResolverInit` ever reaches the caller of a discovery session. `Browse`
/// is produced inside the browse task, logged there, and ends the session early.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Unable to create mDNS resolver: {0}")]
    ResolverInit(String),

    #[error("Unable to browse for mDNS entries: {0}")]
    Browse(String),
}

/// Device control errors
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Device {name} has no usable address")]
    NoAddress { name: String },

    #[error("Unable to start cast session on {addr}: {message}")]
    SessionStart { addr: String, message: String },

    #[error("Unable to load media on {addr}: {message}")]
    LoadFailed { addr: String, message: String },

    #[error("Unsupported media reference: {0}")]
    UnsupportedMedia(String),

    #[error("Unsupported load option: {0}")]
    UnsupportedOption(String),

    #[error("Control task failed: {0}")]
    TaskFailed(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid discovery timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid buffer capacity: {0}")]
    InvalidCapacity(usize),

    #[error("Invalid service type: {0}")]
    InvalidServiceType(String),

    #[error("Invalid interface name: {0}")]
    InvalidInterface(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
