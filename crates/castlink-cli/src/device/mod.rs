//! Device discovery and control wrappers.
//!
//! Discovery and control are provided by castlink-core.
//! This module maps CLI flags onto them.

pub mod discovery;
