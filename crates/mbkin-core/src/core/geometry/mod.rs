//! # Geometry Module
//!
//! Maps detector addresses to directions in the laboratory frame.
//!
//! ## Key Components
//!
//! - [`cd`] - Strip layout and placement of the annular charged-particle (CD) detectors
//! - [`miniball`] - Segment-level angle tables of the Miniball gamma-ray clusters
//! - [`resolver`] - Address → vector / angle resolution with target-offset correction
//!
//! The beam travels along +z. The nominal target position is the origin; the actual beam spot
//! may be displaced from it, and every "particle" or gamma-ray angle is measured from the
//! displaced position.

pub mod cd;
pub mod miniball;
pub mod resolver;
