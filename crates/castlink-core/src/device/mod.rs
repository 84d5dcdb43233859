//! Device control: the collaborator boundary, its rust_cast backend and receiver selection.

pub mod cast;
pub mod control;
pub mod selector;

pub use cast::{CastController, DEFAULT_CAST_PORT};
pub use control::{play_on_device, play_with, ControlSession, DeviceController, LoadRequest};
pub use selector::DeviceSelector;
