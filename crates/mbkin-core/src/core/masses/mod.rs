//! # Masses Module
//!
//! Binding-energy lookup used to fix the rest mass of every reaction participant.
//!
//! - [`table`] - The isotope → binding energy per nucleon map and field parsing rules

pub mod table;
