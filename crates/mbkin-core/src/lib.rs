//! # mbkin
//!
//! Two-body reaction kinematics and detector geometry for experiments combining the CD
//! charged-particle detector with the Miniball gamma-ray array.
//!
//! ## Architecture
//!
//! The library follows a three-layer layout.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Particle`, hit records), the
//!   binding-energy table and its file readers, detector geometry, polygon cuts and array
//!   settings.
//!
//! - **[`engine`]: The Logic Core.** The configured `Reaction`, which ties four particles to
//!   a mass table and a geometry, and the relativistic lab ↔ CM transforms acting on it.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built on the engine: a reaction
//!   summary, CD strip angle tables and kinematics tables computed in parallel.

pub mod core;
pub mod engine;
pub mod workflows;
