//! # Workflows Module
//!
//! End-to-end procedures on a configured reaction. These are the entry points used by the
//! command line front-end.
//!
//! - **Summary** ([`summary`]) - Masses, Q-value, CM energy and EBIS normalisation in one record
//! - **Tables** ([`tables`]) - CD ring angles and CM → lab kinematics tables

pub mod summary;
pub mod tables;
