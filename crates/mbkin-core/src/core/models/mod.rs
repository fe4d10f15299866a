//! # Core Models Module
//!
//! Plain data types describing the participants of a reaction and the per-event detector records
//! they are reconstructed from.
//!
//! ## Key Components
//!
//! - [`element`] - Ordered element-symbol table and isotope labels
//! - [`particle`] - Reaction participant with nuclide identity and kinematic state
//! - [`hits`] - Charged-particle and gamma-ray hit records plus their addressing traits
//!
//! ## Usage
//!
//! ```ignore
//! use mbkin::core::models::particle::Particle;
//!
//! let mut alpha = Particle::new(4, 2);
//! alpha.set_binding_energy(7073.9);
//! assert_eq!(alpha.isotope()?, "4He");
//! ```

pub mod element;
pub mod hits;
pub mod particle;
