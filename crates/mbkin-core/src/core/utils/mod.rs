//! Small numerical helpers shared by the geometry and kinematics code.

pub mod geometry;
