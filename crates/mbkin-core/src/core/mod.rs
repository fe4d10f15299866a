//! # Core Module
//!
//! Stateless building blocks for two-body reaction analysis with the CD and Miniball arrays.
//!
//! ## Architecture
//!
//! - **Physical constants** ([`constants`]) - Nucleon and atomic mass units in keV/c²
//! - **Data models** ([`models`]) - Particles, element symbols and detector hit records
//! - **Mass data** ([`masses`]) - Binding-energy lookup keyed by isotope
//! - **File I/O** ([`io`]) - Readers for AME-style and CSV mass tables
//! - **Detector geometry** ([`geometry`]) - CD strip and Miniball segment angle resolution
//! - **Selections** ([`cuts`]) - Polygonal particle-identification cuts
//! - **Array sizing** ([`settings`]) - Detector counts used to size the geometry
//!
//! Every quantity is in keV, keV/c², mm or radians unless a name says otherwise.

pub mod constants;
pub mod cuts;
pub mod geometry;
pub mod io;
pub mod masses;
pub mod models;
pub mod settings;
pub mod utils;
