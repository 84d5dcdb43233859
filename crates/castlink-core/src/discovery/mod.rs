//! mDNS discovery of cast receivers.
//!
//! Provides entry translation, the browser seam, and the session that wires them together.

pub mod browser;
pub mod session;
pub mod translate;

pub use browser::{Browser, MdnsBrowser};
pub use session::DiscoverySession;
pub use translate::{parse_txt_record, translate_entry};
