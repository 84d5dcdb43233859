//! castlink core: mDNS discovery of cast receivers and a thin media-launch boundary.
//!
//! Shared by the `castlink` CLI. Discovery runs as a deadline-bounded
//! session that streams devices as they are resolved.

pub mod config;
pub mod device;
pub mod discovery;
pub mod error;
pub mod types;

pub use config::DiscoveryConfig;
pub use discovery::DiscoverySession;
pub use error::{CoreError, Result};
pub use types::{DiscoveredDevice, RawServiceEntry};
