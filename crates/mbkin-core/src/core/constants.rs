//! Physical constants shared by the mass model and the kinematics engine.
//!
//! Every mass and energy in this crate is expressed in keV (masses in keV/c²), lengths in
//! millimetres, angles in radians and times in nanoseconds unless a name says otherwise.

/// Proton rest mass in keV/c².
pub const PROTON_MASS: f64 = 938_272.088_16;

/// Neutron rest mass in keV/c².
pub const NEUTRON_MASS: f64 = 939_565.420_52;

/// Atomic mass unit in keV/c².
pub const ATOMIC_MASS_UNIT: f64 = 931_494.102_42;
