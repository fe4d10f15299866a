use super::cd::{CdLayout, CdPlacement};
use super::miniball::SegmentGeometry;
use crate::core::models::hits::{CdAddress, SegmentAddress};
use crate::core::utils::geometry::{phi, theta};
use nalgebra::Vector3;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Which part of an address was outside the configured arrays.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("CD detector {0} is not configured")]
    CdDetector(u8),
    #[error("CD strip (sector {sector}, p {strip_p}, n {strip_n}) is not configured")]
    CdStrip { sector: u8, strip_p: u8, strip_n: u8 },
    #[error("Miniball cluster {0} is not configured")]
    Cluster(u8),
    #[error("Miniball crystal {crystal} / segment {segment} is not configured")]
    Segment { crystal: u8, segment: u8 },
}

/// Converts detector addresses into laboratory directions.
///
/// Two families of accessors are offered. The `try_*` methods return a [`GeometryError`] when
/// an index is not configured. The plain methods keep per-event processing alive instead: they
/// log the miss and return a neutral zero (a zero vector, or a zero angle).
#[derive(Debug, Clone)]
pub struct GeometryResolver {
    target_offset: Vector3<f64>,
    cd_layout: CdLayout,
    cd_placements: Vec<CdPlacement>,
    clusters: Vec<Arc<dyn SegmentGeometry>>,
}

impl GeometryResolver {
    pub fn new(
        target_offset: Vector3<f64>,
        cd_layout: CdLayout,
        cd_placements: Vec<CdPlacement>,
        clusters: Vec<Arc<dyn SegmentGeometry>>,
    ) -> Self {
        Self {
            target_offset,
            cd_layout,
            cd_placements,
            clusters,
        }
    }

    /// Offset of the beam spot from the nominal target position in mm.
    pub fn target_offset(&self) -> Vector3<f64> {
        self.target_offset
    }

    pub fn cd_layout(&self) -> &CdLayout {
        &self.cd_layout
    }

    pub fn number_of_cd_detectors(&self) -> usize {
        self.cd_placements.len()
    }

    pub fn number_of_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Target-to-detector distance in mm, or `None` if the detector is not configured.
    pub fn cd_distance(&self, det: u8) -> Option<f64> {
        self.cd_placements.get(det as usize).map(|p| p.distance)
    }

    /// Detector rotation about the beam axis in radians, or `None` if not configured.
    pub fn cd_phi_offset(&self, det: u8) -> Option<f64> {
        self.cd_placements.get(det as usize).map(|p| p.phi_offset)
    }

    /// Position of a CD pixel relative to the nominal target position.
    pub fn try_cd_vector(
        &self,
        det: u8,
        sector: u8,
        strip_p: u8,
        strip_n: u8,
    ) -> Result<Vector3<f64>, GeometryError> {
        let placement = self
            .cd_placements
            .get(det as usize)
            .ok_or(GeometryError::CdDetector(det))?;
        self.cd_layout
            .pixel_position(placement, sector, strip_p, strip_n)
            .ok_or(GeometryError::CdStrip {
                sector,
                strip_p,
                strip_n,
            })
    }

    /// As [`GeometryResolver::try_cd_vector`], degrading to the zero vector.
    pub fn cd_vector(&self, det: u8, sector: u8, strip_p: u8, strip_n: u8) -> Vector3<f64> {
        self.try_cd_vector(det, sector, strip_p, strip_n)
            .unwrap_or_else(|e| {
                warn!("{}; using a zero-length CD vector.", e);
                Vector3::zeros()
            })
    }

    /// Position of a CD pixel relative to the actual (offset) target position.
    ///
    /// Always equal to the nominal vector minus the target offset.
    pub fn particle_vector(&self, det: u8, sector: u8, strip_p: u8, strip_n: u8) -> Vector3<f64> {
        self.cd_vector(det, sector, strip_p, strip_n) - self.target_offset
    }

    pub fn try_particle_vector(
        &self,
        det: u8,
        sector: u8,
        strip_p: u8,
        strip_n: u8,
    ) -> Result<Vector3<f64>, GeometryError> {
        Ok(self.try_cd_vector(det, sector, strip_p, strip_n)? - self.target_offset)
    }

    pub fn particle_theta(&self, det: u8, sector: u8, strip_p: u8, strip_n: u8) -> f64 {
        theta(&self.particle_vector(det, sector, strip_p, strip_n))
    }

    pub fn particle_phi(&self, det: u8, sector: u8, strip_p: u8, strip_n: u8) -> f64 {
        phi(&self.particle_vector(det, sector, strip_p, strip_n))
    }

    pub fn cd_vector_of(&self, hit: &impl CdAddress) -> Vector3<f64> {
        self.cd_vector(hit.detector(), hit.sector(), hit.strip_p(), hit.strip_n())
    }

    pub fn particle_vector_of(&self, hit: &impl CdAddress) -> Vector3<f64> {
        self.particle_vector(hit.detector(), hit.sector(), hit.strip_p(), hit.strip_n())
    }

    pub fn particle_theta_of(&self, hit: &impl CdAddress) -> f64 {
        self.particle_theta(hit.detector(), hit.sector(), hit.strip_p(), hit.strip_n())
    }

    pub fn particle_phi_of(&self, hit: &impl CdAddress) -> f64 {
        self.particle_phi(hit.detector(), hit.sector(), hit.strip_p(), hit.strip_n())
    }

    /// Number of entries produced by [`GeometryResolver::particle_thetas`].
    pub fn number_of_particle_thetas(&self) -> usize {
        self.cd_layout.p_strips * self.cd_placements.len()
    }

    /// Polar angle in degrees of every (detector, p strip) ring, detector-major.
    ///
    /// Rebuilt from [`GeometryResolver::cd_vector`] on each call. Rings whose detector or strip
    /// index cannot be addressed by a `u8` are reported as zero.
    pub fn particle_thetas(&self) -> Vec<f64> {
        let mut angles = Vec::with_capacity(self.number_of_particle_thetas());
        for det in 0..self.cd_placements.len() {
            for strip in 0..self.cd_layout.p_strips {
                match (u8::try_from(det), u8::try_from(strip)) {
                    (Ok(det), Ok(strip)) => {
                        let v = self.cd_vector(det, 0, strip, 0);
                        angles.push(theta(&v).to_degrees());
                    }
                    _ => {
                        warn!(det, strip, "CD ring is not addressable; using a zero theta.");
                        angles.push(0.0);
                    }
                }
            }
        }
        angles
    }

    fn cluster(&self, clu: u8) -> Result<&dyn SegmentGeometry, GeometryError> {
        self.clusters
            .get(clu as usize)
            .map(|c| c.as_ref())
            .ok_or(GeometryError::Cluster(clu))
    }

    pub fn try_gamma_theta(&self, clu: u8, cry: u8, seg: u8) -> Result<f64, GeometryError> {
        self.cluster(clu)?
            .segment_theta(cry, seg)
            .ok_or(GeometryError::Segment {
                crystal: cry,
                segment: seg,
            })
    }

    pub fn try_gamma_phi(&self, clu: u8, cry: u8, seg: u8) -> Result<f64, GeometryError> {
        self.cluster(clu)?
            .segment_phi(cry, seg)
            .ok_or(GeometryError::Segment {
                crystal: cry,
                segment: seg,
            })
    }

    /// Polar angle of a Miniball segment in radians, zero if the address is not configured.
    pub fn gamma_theta(&self, clu: u8, cry: u8, seg: u8) -> f64 {
        self.try_gamma_theta(clu, cry, seg).unwrap_or_else(|e| {
            warn!("{}; using a zero gamma-ray theta.", e);
            0.0
        })
    }

    /// Azimuth of a Miniball segment in radians, zero if the address is not configured.
    pub fn gamma_phi(&self, clu: u8, cry: u8, seg: u8) -> f64 {
        self.try_gamma_phi(clu, cry, seg).unwrap_or_else(|e| {
            warn!("{}; using a zero gamma-ray phi.", e);
            0.0
        })
    }

    pub fn gamma_theta_of(&self, hit: &impl SegmentAddress) -> f64 {
        self.gamma_theta(hit.cluster(), hit.crystal(), hit.segment())
    }

    pub fn gamma_phi_of(&self, hit: &impl SegmentAddress) -> f64 {
        self.gamma_phi(hit.cluster(), hit.crystal(), hit.segment())
    }
}
