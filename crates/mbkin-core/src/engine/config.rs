use crate::core::geometry::cd::CdPlacement;
use crate::core::geometry::miniball::ClusterPlacement;
use nalgebra::Vector3;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid {role} nuclide: A = {a}, Z = {z} (need A >= 1 and Z <= A)")]
    InvalidNuclide { role: &'static str, a: u32, z: u32 },
    #[error("Invalid EBIS window: on = {on} ns must be non-negative and shorter than off = {off} ns")]
    InvalidEbisWindow { on: f64, off: f64 },
    #[error("Beam energy must be finite and non-negative, got {0} keV/u")]
    InvalidBeamEnergy(f64),
    #[error("Angular step must lie between 0.001 and 180 degrees, got {0}")]
    InvalidAngleStep(f64),
}

/// Mass and atomic number of one reaction participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nuclide {
    pub a: u32,
    pub z: u32,
}

impl Nuclide {
    pub fn new(a: u32, z: u32) -> Self {
        Self { a, z }
    }

    fn validate(&self, role: &'static str) -> Result<(), ConfigError> {
        if self.a == 0 || self.z > self.a {
            return Err(ConfigError::InvalidNuclide {
                role,
                a: self.a,
                z: self.z,
            });
        }
        Ok(())
    }
}

/// Beam-gate timing in ns, measured from the EBIS trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EbisWindow {
    pub on: f64,
    pub off: f64,
}

/// A polygonal cut stored in `file` under the object name `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutSpec {
    pub file: PathBuf,
    pub name: String,
}

/// Fully parsed description of one reaction and its detector placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionConfig {
    pub beam: Nuclide,
    pub target: Nuclide,
    pub ejectile: Nuclide,
    pub recoil: Nuclide,
    /// Laboratory beam energy in keV per nucleon.
    pub beam_energy: f64,
    pub ebis: EbisWindow,
    /// Beam-spot offset from the nominal target position in mm.
    pub target_offset: Vector3<f64>,
    /// One entry per CD detector, in detector order.
    pub cd_placements: Vec<CdPlacement>,
    /// One entry per Miniball cluster, in cluster order.
    pub cluster_placements: Vec<ClusterPlacement>,
    pub beam_cut: Option<CutSpec>,
    pub target_cut: Option<CutSpec>,
}

impl ReactionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.beam.validate("beam")?;
        self.target.validate("target")?;
        self.ejectile.validate("ejectile")?;
        self.recoil.validate("recoil")?;
        if !self.beam_energy.is_finite() || self.beam_energy < 0.0 {
            return Err(ConfigError::InvalidBeamEnergy(self.beam_energy));
        }
        let EbisWindow { on, off } = self.ebis;
        if !on.is_finite() || !off.is_finite() || on < 0.0 || on >= off {
            return Err(ConfigError::InvalidEbisWindow { on, off });
        }
        Ok(())
    }
}

/// Builder for [`ReactionConfig`].
///
/// Beam, target, beam energy and the EBIS window are required. The ejectile and recoil
/// default to the beam and target (inelastic scattering), the target offset to zero, and the
/// detector lists to empty.
#[derive(Default)]
pub struct ReactionConfigBuilder {
    beam: Option<Nuclide>,
    target: Option<Nuclide>,
    ejectile: Option<Nuclide>,
    recoil: Option<Nuclide>,
    beam_energy: Option<f64>,
    ebis: Option<EbisWindow>,
    target_offset: Option<Vector3<f64>>,
    cd_placements: Vec<CdPlacement>,
    cluster_placements: Vec<ClusterPlacement>,
    beam_cut: Option<CutSpec>,
    target_cut: Option<CutSpec>,
}

impl ReactionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn beam(mut self, a: u32, z: u32) -> Self {
        self.beam = Some(Nuclide::new(a, z));
        self
    }
    pub fn target(mut self, a: u32, z: u32) -> Self {
        self.target = Some(Nuclide::new(a, z));
        self
    }
    pub fn ejectile(mut self, a: u32, z: u32) -> Self {
        self.ejectile = Some(Nuclide::new(a, z));
        self
    }
    pub fn recoil(mut self, a: u32, z: u32) -> Self {
        self.recoil = Some(Nuclide::new(a, z));
        self
    }
    pub fn beam_energy(mut self, kev_per_u: f64) -> Self {
        self.beam_energy = Some(kev_per_u);
        self
    }
    pub fn ebis_window(mut self, on: f64, off: f64) -> Self {
        self.ebis = Some(EbisWindow { on, off });
        self
    }
    pub fn target_offset(mut self, x: f64, y: f64, z: f64) -> Self {
        self.target_offset = Some(Vector3::new(x, y, z));
        self
    }
    pub fn cd_placement(mut self, placement: CdPlacement) -> Self {
        self.cd_placements.push(placement);
        self
    }
    pub fn cd_placements(mut self, placements: Vec<CdPlacement>) -> Self {
        self.cd_placements = placements;
        self
    }
    pub fn cluster_placement(mut self, placement: ClusterPlacement) -> Self {
        self.cluster_placements.push(placement);
        self
    }
    pub fn cluster_placements(mut self, placements: Vec<ClusterPlacement>) -> Self {
        self.cluster_placements = placements;
        self
    }
    pub fn beam_cut(mut self, file: PathBuf, name: impl Into<String>) -> Self {
        self.beam_cut = Some(CutSpec {
            file,
            name: name.into(),
        });
        self
    }
    pub fn target_cut(mut self, file: PathBuf, name: impl Into<String>) -> Self {
        self.target_cut = Some(CutSpec {
            file,
            name: name.into(),
        });
        self
    }

    pub fn build(self) -> Result<ReactionConfig, ConfigError> {
        let beam = self.beam.ok_or(ConfigError::MissingParameter("beam"))?;
        let target = self.target.ok_or(ConfigError::MissingParameter("target"))?;
        let config = ReactionConfig {
            beam,
            target,
            ejectile: self.ejectile.unwrap_or(beam),
            recoil: self.recoil.unwrap_or(target),
            beam_energy: self
                .beam_energy
                .ok_or(ConfigError::MissingParameter("beam_energy"))?,
            ebis: self.ebis.ok_or(ConfigError::MissingParameter("ebis_window"))?,
            target_offset: self.target_offset.unwrap_or_else(Vector3::zeros),
            cd_placements: self.cd_placements,
            cluster_placements: self.cluster_placements,
            beam_cut: self.beam_cut,
            target_cut: self.target_cut,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coulex() -> ReactionConfigBuilder {
        ReactionConfigBuilder::new()
            .beam(185, 80)
            .target(120, 50)
            .beam_energy(4500.0)
            .ebis_window(1.2e6, 2.52e7)
    }

    #[test]
    fn build_defaults_outgoing_channel_to_entrance_channel() {
        let config = coulex().build().unwrap();
        assert_eq!(config.ejectile, config.beam);
        assert_eq!(config.recoil, config.target);
        assert_eq!(config.target_offset, Vector3::zeros());
        assert!(config.cd_placements.is_empty());
        assert!(config.beam_cut.is_none());
    }

    #[test]
    fn build_keeps_explicit_values() {
        let config = coulex()
            .ejectile(184, 80)
            .recoil(121, 50)
            .target_offset(0.5, -0.5, 1.0)
            .cd_placement(CdPlacement {
                distance: 28.0,
                phi_offset: 0.1,
            })
            .beam_cut(PathBuf::from("cuts.toml"), "beam")
            .build()
            .unwrap();
        assert_eq!(config.ejectile, Nuclide::new(184, 80));
        assert_eq!(config.recoil, Nuclide::new(121, 50));
        assert_eq!(config.target_offset, Vector3::new(0.5, -0.5, 1.0));
        assert_eq!(config.cd_placements.len(), 1);
        assert_eq!(config.beam_cut.unwrap().name, "beam");
    }

    #[test]
    fn build_reports_first_missing_parameter() {
        let err = ReactionConfigBuilder::new().build().unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("beam"));

        let err = ReactionConfigBuilder::new()
            .beam(1, 1)
            .target(2, 1)
            .ebis_window(1.0, 2.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("beam_energy"));
    }

    #[test]
    fn build_rejects_impossible_nuclides() {
        let err = coulex().recoil(4, 5).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNuclide { role: "recoil", .. }
        ));
        let err = coulex().beam(0, 0).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNuclide { role: "beam", .. }));
    }

    #[test]
    fn build_rejects_degenerate_ebis_window() {
        let err = coulex().ebis_window(100.0, 100.0).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEbisWindow { .. }));
        let err = coulex().ebis_window(200.0, 100.0).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEbisWindow { .. }));
    }

    #[test]
    fn build_accepts_window_opening_at_trigger() {
        let config = coulex().ebis_window(0.0, 1000.0).build().unwrap();
        assert_eq!(config.ebis, EbisWindow { on: 0.0, off: 1000.0 });
        let err = coulex().ebis_window(-1.0, 1000.0).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEbisWindow { .. }));
    }

    #[test]
    fn build_rejects_negative_beam_energy() {
        let err = coulex().beam_energy(-1.0).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidBeamEnergy(-1.0));
    }
}
