//! Readers for nuclear mass evaluations.
//!
//! Two layouts are understood: the fixed-column text format of the Atomic Mass Evaluation
//! ([`ame`]) and a minimal comma-separated table ([`csv_table`]). Both share the
//! [`traits::MassTableFile`] interface and produce a [`crate::core::masses::table::MassTable`].

pub mod ame;
pub mod csv_table;
pub mod traits;
