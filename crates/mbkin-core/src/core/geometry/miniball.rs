use crate::core::utils::geometry::{phi, rotation_about_axis, rotation_about_beam, theta};
use nalgebra::Vector3;
use std::f64::consts::TAU;
use tracing::trace;

/// Distance of each crystal axis from the cluster axis in mm.
pub const CRYSTAL_AXIS_OFFSET: f64 = 34.0;

/// Distance of an outer segment's centre from its crystal axis in mm.
pub const SEGMENT_RADIUS: f64 = 17.0;

/// Segment-level angular lookup for one gamma-ray detector cluster.
///
/// Angles are in radians in the laboratory frame, measured from the actual target position.
/// `None` means the crystal or segment is not part of the configured geometry.
pub trait SegmentGeometry: std::fmt::Debug + Send + Sync {
    fn segment_theta(&self, crystal: u8, segment: u8) -> Option<f64>;
    fn segment_phi(&self, crystal: u8, segment: u8) -> Option<f64>;
}

/// Pointing of a Miniball cluster as read from the reaction description.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClusterPlacement {
    /// Polar angle of the cluster axis in radians.
    pub theta: f64,
    /// Azimuth of the cluster axis in radians.
    pub phi: f64,
    /// Rotation of the cluster about its own axis in radians.
    pub alpha: f64,
    /// Distance from the nominal target position to the crystal front faces in mm.
    pub r: f64,
}

/// A triple-cluster (or general n-crystal) Miniball detector with precomputed segment angles.
///
/// Segment 0 is the core of each crystal and sits on the crystal axis; the remaining segments
/// are spread evenly around it. Positions are computed in the cluster frame (cluster axis along
/// +z), rotated onto the cluster pointing direction and finally expressed relative to the
/// shifted target.
#[derive(Debug, Clone, PartialEq)]
pub struct MiniballCluster {
    placement: ClusterPlacement,
    positions: Vec<Vec<Vector3<f64>>>,
    thetas: Vec<Vec<f64>>,
    phis: Vec<Vec<f64>>,
}

impl MiniballCluster {
    pub fn new(
        placement: ClusterPlacement,
        target_offset: Vector3<f64>,
        crystals: usize,
        segments: usize,
    ) -> Self {
        let to_lab = rotation_about_beam(placement.phi)
            * rotation_about_axis(&Vector3::y(), placement.theta);

        let mut positions = Vec::with_capacity(crystals);
        for crystal in 0..crystals {
            let crystal_angle = placement.alpha + crystal as f64 * TAU / crystals as f64;
            let axis = if crystals > 1 {
                Vector3::new(
                    CRYSTAL_AXIS_OFFSET * crystal_angle.cos(),
                    CRYSTAL_AXIS_OFFSET * crystal_angle.sin(),
                    placement.r,
                )
            } else {
                Vector3::new(0.0, 0.0, placement.r)
            };

            let crystal_positions = (0..segments)
                .map(|segment| {
                    let local = if segment == 0 {
                        axis
                    } else {
                        let outer = (segments - 1) as f64;
                        let seg_angle = crystal_angle + (segment as f64 - 0.5) * TAU / outer;
                        axis + Vector3::new(
                            SEGMENT_RADIUS * seg_angle.cos(),
                            SEGMENT_RADIUS * seg_angle.sin(),
                            0.0,
                        )
                    };
                    to_lab * local - target_offset
                })
                .collect::<Vec<_>>();
            positions.push(crystal_positions);
        }

        let thetas: Vec<Vec<f64>> = positions
            .iter()
            .map(|c| c.iter().map(theta).collect())
            .collect();
        let phis: Vec<Vec<f64>> = positions
            .iter()
            .map(|c| c.iter().map(phi).collect())
            .collect();

        trace!(?placement, crystals, segments, "Built Miniball cluster geometry.");
        Self {
            placement,
            positions,
            thetas,
            phis,
        }
    }

    pub fn placement(&self) -> &ClusterPlacement {
        &self.placement
    }

    /// Vector from the target to the centre of the given segment in mm.
    pub fn segment_position(&self, crystal: u8, segment: u8) -> Option<Vector3<f64>> {
        self.positions
            .get(crystal as usize)?
            .get(segment as usize)
            .copied()
    }
}

impl SegmentGeometry for MiniballCluster {
    fn segment_theta(&self, crystal: u8, segment: u8) -> Option<f64> {
        self.thetas
            .get(crystal as usize)?
            .get(segment as usize)
            .copied()
    }

    fn segment_phi(&self, crystal: u8, segment: u8) -> Option<f64> {
        self.phis.get(crystal as usize)?.get(segment as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn cluster(theta: f64, phi: f64, offset: Vector3<f64>) -> MiniballCluster {
        MiniballCluster::new(
            ClusterPlacement {
                theta,
                phi,
                alpha: 0.0,
                r: 110.0,
            },
            offset,
            3,
            7,
        )
    }

    #[test]
    fn cores_surround_the_cluster_axis() {
        let c = cluster(FRAC_PI_2, 0.0, Vector3::zeros());
        let mean = (0..3u8)
            .map(|k| c.segment_position(k, 0).unwrap())
            .sum::<Vector3<f64>>()
            / 3.0;
        assert!((mean - Vector3::new(110.0, 0.0, 0.0)).norm() < 1e-9);
        for k in 0..3u8 {
            let t = c.segment_theta(k, 0).unwrap();
            assert!((t - FRAC_PI_2).abs() < 0.4);
        }
    }

    #[test]
    fn segments_surround_their_core() {
        let c = cluster(PI / 3.0, 1.0, Vector3::zeros());
        for crystal in 0..3u8 {
            let core = c.segment_position(crystal, 0).unwrap();
            let mean = (1..7u8)
                .map(|s| c.segment_position(crystal, s).unwrap())
                .sum::<Vector3<f64>>()
                / 6.0;
            assert!((mean - core).norm() < 1e-9);
            for s in 1..7u8 {
                let d = (c.segment_position(crystal, s).unwrap() - core).norm();
                assert!((d - SEGMENT_RADIUS).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn angle_tables_match_positions() {
        let c = cluster(2.0, -1.2, Vector3::new(1.0, -2.0, 3.0));
        for crystal in 0..3u8 {
            for segment in 0..7u8 {
                let v = c.segment_position(crystal, segment).unwrap();
                assert_eq!(c.segment_theta(crystal, segment), Some(theta(&v)));
                assert_eq!(c.segment_phi(crystal, segment), Some(phi(&v)));
            }
        }
    }

    #[test]
    fn target_offset_shifts_positions() {
        let offset = Vector3::new(0.0, 0.0, 5.0);
        let nominal = cluster(0.8, 0.3, Vector3::zeros());
        let shifted = cluster(0.8, 0.3, offset);
        let a = nominal.segment_position(1, 4).unwrap();
        let b = shifted.segment_position(1, 4).unwrap();
        assert!((a - b - offset).norm() < 1e-12);
    }

    #[test]
    fn out_of_range_indices_are_unconfigured() {
        let c = cluster(1.0, 0.0, Vector3::zeros());
        assert_eq!(c.segment_theta(3, 0), None);
        assert_eq!(c.segment_phi(0, 7), None);
        assert!(c.segment_position(5, 5).is_none());
    }
}
