//! Command implementations.

pub mod ls;
pub mod play;

pub use ls::run_ls;
pub use play::run_play;
