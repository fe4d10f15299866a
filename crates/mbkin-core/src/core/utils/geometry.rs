use nalgebra::{Rotation3, Unit, Vector3};

/// Rotation by `angle` radians about an arbitrary axis.
pub fn rotation_about_axis(axis: &Vector3<f64>, angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle)
}

/// Rotation by `angle` radians about the beam (z) axis.
pub fn rotation_about_beam(angle: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Polar angle measured from the beam axis, in `[0, π]`. The zero vector has `theta = 0`.
pub fn theta(v: &Vector3<f64>) -> f64 {
    let perp = v.x.hypot(v.y);
    if perp == 0.0 && v.z == 0.0 {
        0.0
    } else {
        perp.atan2(v.z)
    }
}

/// Azimuthal angle in `(-π, π]`. Vectors on the beam axis have `phi = 0`.
pub fn phi(v: &Vector3<f64>) -> f64 {
    if v.x == 0.0 && v.y == 0.0 {
        0.0
    } else {
        v.y.atan2(v.x)
    }
}

/// Builds a vector from its length and spherical angles.
pub fn from_spherical(r: f64, theta: f64, phi: f64) -> Vector3<f64> {
    Vector3::new(
        r * theta.sin() * phi.cos(),
        r * theta.sin() * phi.sin(),
        r * theta.cos(),
    )
}

/// Angle between two directions in radians. Degenerate inputs give `0`.
pub fn opening_angle(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let norms = a.norm() * b.norm();
    if norms == 0.0 {
        return 0.0;
    }
    (a.dot(b) / norms).clamp(-1.0, 1.0).acos()
}
