//! # Engine Module
//!
//! The stateful layer: a configured [`reaction::Reaction`] and the two-body kinematics that
//! act on it.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Parsed reaction description and its validating builder
//! - **Reaction** ([`reaction`]) - Particles, mass lookup, EBIS gating, geometry and cut binding
//! - **Kinematics** ([`kinematics`]) - Lab ↔ CM transforms, missing mass and Doppler correction
//! - **Error Handling** ([`error`]) - Failures while building or transforming a reaction
//!
//! A `Reaction` is used as a per-event scratch calculator through `&mut self`. It is `Clone`
//! and `Send`, so parallel analyses give each worker its own copy.

pub mod config;
pub mod error;
pub mod kinematics;
pub mod reaction;
