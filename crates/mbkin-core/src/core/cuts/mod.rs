//! # Cuts Module
//!
//! Two-dimensional polygonal selections used for particle identification, and the file-based
//! registry they are loaded from.
//!
//! - [`region`] - A named polygon with an inside test
//! - [`registry`] - Loading named polygons from TOML files

pub mod region;
pub mod registry;
