use crate::core::utils::geometry::rotation_about_beam;
use nalgebra::Vector3;
use std::f64::consts::TAU;

/// Radius of the inner edge of the innermost ring in mm.
pub const CD_INNER_RADIUS: f64 = 9.0;

/// Radial width of one annular (p-side) strip in mm.
pub const CD_RING_PITCH: f64 = 2.0;

/// Placement of one CD detector along the beam axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdPlacement {
    /// Distance from the nominal target position to the detector plane in mm.
    pub distance: f64,
    /// Rotation of the detector about the beam axis in radians.
    pub phi_offset: f64,
}

impl Default for CdPlacement {
    fn default() -> Self {
        Self {
            distance: 32.0,
            phi_offset: 0.0,
        }
    }
}

/// Strip segmentation shared by every CD detector.
///
/// Each detector is split into `sectors` equal azimuthal quadrants. In every quadrant the
/// p side carries `p_strips` rings, numbered from the outside in, and the n side carries
/// `n_strips` radial strips, numbered counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdLayout {
    pub sectors: usize,
    pub p_strips: usize,
    pub n_strips: usize,
}

impl CdLayout {
    /// Radius of the centre of ring `strip_p` in mm, or `None` if the strip does not exist.
    pub fn ring_radius(&self, strip_p: u8) -> Option<f64> {
        let strip_p = strip_p as usize;
        if strip_p >= self.p_strips {
            return None;
        }
        Some(CD_INNER_RADIUS + CD_RING_PITCH * (self.p_strips as f64 - 0.5 - strip_p as f64))
    }

    /// Azimuth of the centre of the given radial strip in the detector frame, in radians.
    pub fn strip_phi(&self, sector: u8, strip_n: u8) -> Option<f64> {
        let (sector, strip_n) = (sector as usize, strip_n as usize);
        if sector >= self.sectors || strip_n >= self.n_strips {
            return None;
        }
        let sector_width = TAU / self.sectors as f64;
        let strip_width = sector_width / self.n_strips as f64;
        Some(sector as f64 * sector_width + (strip_n as f64 + 0.5) * strip_width)
    }

    /// Position of a pixel relative to the CD origin on the beam axis.
    ///
    /// The pixel is placed in the detector plane, rotated by the detector's phi offset and
    /// moved downstream by its distance from the nominal target.
    pub fn pixel_position(
        &self,
        placement: &CdPlacement,
        sector: u8,
        strip_p: u8,
        strip_n: u8,
    ) -> Option<Vector3<f64>> {
        let r = self.ring_radius(strip_p)?;
        let phi = self.strip_phi(sector, strip_n)?;
        let local = Vector3::new(r * phi.cos(), r * phi.sin(), 0.0);
        let rotated = rotation_about_beam(placement.phi_offset) * local;
        Some(rotated + Vector3::new(0.0, 0.0, placement.distance))
    }
}
