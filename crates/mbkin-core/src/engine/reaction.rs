use super::config::{EbisWindow, Nuclide, ReactionConfig};
use super::error::ReactionError;
use crate::core::cuts::region::CutRegion;
use crate::core::cuts::registry::CutRegistry;
use crate::core::geometry::cd::{CdLayout, CdPlacement};
use crate::core::geometry::miniball::{MiniballCluster, SegmentGeometry};
use crate::core::geometry::resolver::GeometryResolver;
use crate::core::masses::table::MassTable;
use crate::core::models::element::isotope_label;
use crate::core::models::hits::{CdAddress, SegmentAddress};
use crate::core::models::particle::Particle;
use crate::core::settings::Settings;
use nalgebra::Vector3;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Largest ratio of beam kinetic energy to beam mass accepted without a warning by
/// [`Reaction::beta`].
const CLASSICAL_BETA_LIMIT: f64 = 0.02;

/// A beam + target → ejectile + recoil reaction together with the detector geometry it is
/// observed with.
///
/// The four particles are fixed at construction. Their kinematic fields act as a mutable
/// accumulator: the transforms in this module take `&mut self` and overwrite them, so each
/// processing thread must work on its own clone.
#[derive(Debug, Clone)]
pub struct Reaction {
    beam: Particle,
    target: Particle,
    ejectile: Particle,
    recoil: Particle,
    beam_energy: f64,
    ebis: EbisWindow,
    geometry: GeometryResolver,
    beam_cut: Option<CutRegion>,
    target_cut: Option<CutRegion>,
}

fn make_particle(
    role: &'static str,
    nuclide: Nuclide,
    masses: &MassTable,
) -> Result<Particle, ReactionError> {
    let label = isotope_label(nuclide.a, nuclide.z)
        .map_err(|source| ReactionError::Element { role, source })?;
    let mut particle = Particle::new(nuclide.a, nuclide.z);
    match masses.binding_energy(nuclide.a, nuclide.z) {
        Some(be) => {
            debug!(role, isotope = %label, binding_energy = be, "Resolved binding energy.");
            particle.set_binding_energy(be);
        }
        None => warn!(
            "No binding energy for {} ({}) in the mass table; assuming zero.",
            label, role
        ),
    }
    Ok(particle)
}

impl Reaction {
    /// Builds a reaction from a parsed description.
    ///
    /// Binding energies come from `masses`; a missing isotope is not an error and leaves the
    /// particle with zero binding energy. Detector lists are sized from `settings`: missing CD
    /// entries take the default placement, extra entries are dropped. Cut files are opened here,
    /// so an unreadable cut fails construction.
    pub fn new(
        config: &ReactionConfig,
        settings: &impl Settings,
        masses: &MassTable,
    ) -> Result<Self, ReactionError> {
        config.validate()?;

        let beam = make_particle("beam", config.beam, masses)?;
        let target = make_particle("target", config.target, masses)?;
        let ejectile = make_particle("ejectile", config.ejectile, masses)?;
        let recoil = make_particle("recoil", config.recoil, masses)?;

        if beam.a() + target.a() != ejectile.a() + recoil.a()
            || beam.z() + target.z() != ejectile.z() + recoil.z()
        {
            warn!("Nucleon or charge number is not conserved between entrance and exit channels.");
        }

        let cd_layout = CdLayout {
            sectors: settings.number_of_cd_sectors(),
            p_strips: settings.number_of_cd_p_strips(),
            n_strips: settings.number_of_cd_n_strips(),
        };
        let n_cd = settings.number_of_cd_detectors();
        if config.cd_placements.len() != n_cd {
            warn!(
                "{} CD placements given for {} configured detectors; resizing.",
                config.cd_placements.len(),
                n_cd
            );
        }
        let mut cd_placements = config.cd_placements.clone();
        cd_placements.resize(n_cd, CdPlacement::default());

        let n_clusters = settings.number_of_miniball_clusters();
        if config.cluster_placements.len() > n_clusters {
            warn!(
                "{} Miniball clusters given but only {} configured; ignoring the rest.",
                config.cluster_placements.len(),
                n_clusters
            );
        }
        let clusters = config
            .cluster_placements
            .iter()
            .take(n_clusters)
            .map(|placement| {
                Arc::new(MiniballCluster::new(
                    *placement,
                    config.target_offset,
                    settings.number_of_miniball_crystals(),
                    settings.number_of_miniball_segments(),
                )) as Arc<dyn SegmentGeometry>
            })
            .collect();

        let geometry =
            GeometryResolver::new(config.target_offset, cd_layout, cd_placements, clusters);

        let beam_cut = config
            .beam_cut
            .as_ref()
            .map(|spec| CutRegistry::load_region(&spec.file, &spec.name))
            .transpose()?;
        let target_cut = config
            .target_cut
            .as_ref()
            .map(|spec| CutRegistry::load_region(&spec.file, &spec.name))
            .transpose()?;

        let mut reaction = Self {
            beam,
            target,
            ejectile,
            recoil,
            beam_energy: 0.0,
            ebis: config.ebis,
            geometry,
            beam_cut,
            target_cut,
        };
        reaction.set_beam_energy(config.beam_energy);

        info!(
            "Reaction ready: Q = {:.1} keV, E_cm = {:.1} keV, {} CD detector(s), {} Miniball cluster(s).",
            reaction.q_value(),
            reaction.energy_tot_cm() - reaction.beam.mass() - reaction.target.mass(),
            reaction.geometry.number_of_cd_detectors(),
            reaction.geometry.number_of_clusters()
        );
        Ok(reaction)
    }

    pub fn beam(&self) -> &Particle {
        &self.beam
    }
    pub fn beam_mut(&mut self) -> &mut Particle {
        &mut self.beam
    }
    pub fn target(&self) -> &Particle {
        &self.target
    }
    pub fn target_mut(&mut self) -> &mut Particle {
        &mut self.target
    }
    pub fn ejectile(&self) -> &Particle {
        &self.ejectile
    }
    pub fn ejectile_mut(&mut self) -> &mut Particle {
        &mut self.ejectile
    }
    pub fn recoil(&self) -> &Particle {
        &self.recoil
    }
    pub fn recoil_mut(&mut self) -> &mut Particle {
        &mut self.recoil
    }

    /// Laboratory beam energy in keV per nucleon.
    pub fn beam_energy(&self) -> f64 {
        self.beam_energy
    }

    /// Sets the beam energy in keV per nucleon and refreshes the entrance-channel CM energies.
    pub fn set_beam_energy(&mut self, kev_per_u: f64) {
        self.beam_energy = kev_per_u;
        self.beam.set_energy_lab(kev_per_u * self.beam.a() as f64);
        if self.beam.energy_lab() > CLASSICAL_BETA_LIMIT * self.beam.mass() {
            warn!(
                "Beam energy of {} keV/u is outside the range where the classical beta holds.",
                kev_per_u
            );
        }
        self.update_entrance_channel();
    }

    /// `M_beam + M_target − M_ejectile − M_recoil` in keV. Positive means energy is released.
    pub fn q_value(&self) -> f64 {
        self.beam.mass() + self.target.mass() - self.ejectile.mass() - self.recoil.mass()
    }

    pub fn energy_tot_lab(&self) -> f64 {
        self.beam.energy_tot_lab() + self.target.energy_tot_lab()
    }

    /// Invariant mass of the entrance channel for a target at rest.
    pub fn energy_tot_cm(&self) -> f64 {
        let mb = self.beam.mass();
        let mt = self.target.mass();
        (mb.powi(2) + mt.powi(2) + 2.0 * self.beam.energy_tot_lab() * mt).sqrt()
    }

    /// Beam velocity as `sqrt(2·E_lab/M_beam)`.
    ///
    /// This is the classical expression and is only meaningful while the kinetic energy is a
    /// small fraction of the beam mass (a few MeV/u against ~931 MeV/u, i.e. errors below 1%).
    /// Downstream analyses depend on this exact convention; the relativistic velocity of the
    /// CM frame is [`Reaction::boost_beta`].
    pub fn beta(&self) -> f64 {
        (2.0 * self.beam.energy_lab() / self.beam.mass()).sqrt()
    }

    /// `1/sqrt(1 − β²)` with β from [`Reaction::beta`].
    pub fn gamma(&self) -> f64 {
        1.0 / (1.0 - self.beta().powi(2)).sqrt()
    }

    pub fn ebis_on_time(&self) -> f64 {
        self.ebis.on
    }

    pub fn ebis_off_time(&self) -> f64 {
        self.ebis.off
    }

    /// Scale factor for subtracting beam-off events: `on / (off − on)`.
    pub fn ebis_ratio(&self) -> f64 {
        self.ebis.on / (self.ebis.off - self.ebis.on)
    }

    pub fn geometry(&self) -> &GeometryResolver {
        &self.geometry
    }

    pub fn target_offset(&self) -> Vector3<f64> {
        self.geometry.target_offset()
    }

    /// Distance of a CD detector in mm, zero for an unconfigured detector.
    pub fn cd_distance(&self, det: u8) -> f64 {
        self.geometry.cd_distance(det).unwrap_or_else(|| {
            warn!("CD detector {} is not configured; using zero distance.", det);
            0.0
        })
    }

    /// Phi offset of a CD detector in radians, zero for an unconfigured detector.
    pub fn cd_phi_offset(&self, det: u8) -> f64 {
        self.geometry.cd_phi_offset(det).unwrap_or_else(|| {
            warn!("CD detector {} is not configured; using zero phi offset.", det);
            0.0
        })
    }

    pub fn cd_vector(&self, det: u8, sector: u8, strip_p: u8, strip_n: u8) -> Vector3<f64> {
        self.geometry.cd_vector(det, sector, strip_p, strip_n)
    }

    pub fn particle_vector(&self, det: u8, sector: u8, strip_p: u8, strip_n: u8) -> Vector3<f64> {
        self.geometry.particle_vector(det, sector, strip_p, strip_n)
    }

    pub fn particle_theta(&self, hit: &impl CdAddress) -> f64 {
        self.geometry.particle_theta_of(hit)
    }

    pub fn particle_phi(&self, hit: &impl CdAddress) -> f64 {
        self.geometry.particle_phi_of(hit)
    }

    pub fn number_of_particle_thetas(&self) -> usize {
        self.geometry.number_of_particle_thetas()
    }

    pub fn particle_thetas(&self) -> Vec<f64> {
        self.geometry.particle_thetas()
    }

    pub fn gamma_theta(&self, hit: &impl SegmentAddress) -> f64 {
        self.geometry.gamma_theta_of(hit)
    }

    pub fn gamma_phi(&self, hit: &impl SegmentAddress) -> f64 {
        self.geometry.gamma_phi_of(hit)
    }

    pub fn beam_cut(&self) -> Option<&CutRegion> {
        self.beam_cut.as_ref()
    }

    pub fn target_cut(&self) -> Option<&CutRegion> {
        self.target_cut.as_ref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::geometry::miniball::ClusterPlacement;
    use crate::core::models::hits::{GammaRayHit, ParticleHit};
    use crate::core::settings::ArraySettings;
    use crate::engine::config::ReactionConfigBuilder;
    use std::fs;
    use tempfile::tempdir;

    pub(crate) fn masses() -> MassTable {
        let mut table = MassTable::new();
        table.insert(185, 80, 7_863.0).unwrap();
        table.insert(120, 50, 8_504.5).unwrap();
        table.insert(2, 1, 1_112.283).unwrap();
        table.insert(1, 1, 0.0).unwrap();
        table.insert(30, 12, 8_263.9).unwrap();
        table.insert(31, 12, 8_013.1).unwrap();
        table
    }

    pub(crate) fn coulex() -> ReactionConfig {
        ReactionConfigBuilder::new()
            .beam(185, 80)
            .target(120, 50)
            .beam_energy(4500.0)
            .ebis_window(1.2e6, 2.52e7)
            .cd_placement(CdPlacement {
                distance: 32.0,
                phi_offset: 0.0,
            })
            .cluster_placement(ClusterPlacement {
                theta: 1.2,
                phi: 0.4,
                alpha: 0.0,
                r: 110.0,
            })
            .build()
            .unwrap()
    }

    pub(crate) fn transfer() -> ReactionConfig {
        ReactionConfigBuilder::new()
            .beam(30, 12)
            .target(2, 1)
            .ejectile(1, 1)
            .recoil(31, 12)
            .beam_energy(9500.0)
            .ebis_window(100.0, 1100.0)
            .build()
            .unwrap()
    }

    #[test]
    fn construction_resolves_masses_and_beam_energy() {
        let reaction = Reaction::new(&coulex(), &ArraySettings::default(), &masses()).unwrap();
        assert_eq!(reaction.beam().binding_energy(), 7_863.0);
        assert_eq!(reaction.target().binding_energy(), 8_504.5);
        assert_eq!(reaction.beam().energy_lab(), 4500.0 * 185.0);
        assert_eq!(reaction.target().energy_lab(), 0.0);
        assert_eq!(reaction.beam_energy(), 4500.0);
        assert!(reaction.q_value().abs() < 1e-6);
    }

    #[test]
    fn missing_mass_entry_falls_back_to_zero_binding_energy() {
        let config = ReactionConfigBuilder::new()
            .beam(7, 3)
            .target(120, 50)
            .beam_energy(1000.0)
            .ebis_window(1.0, 2.0)
            .build()
            .unwrap();
        let reaction = Reaction::new(&config, &ArraySettings::default(), &masses()).unwrap();
        assert_eq!(reaction.beam().binding_energy(), 0.0);
        assert_eq!(reaction.target().binding_energy(), 8_504.5);
    }

    #[test]
    fn q_value_changes_sign_for_the_inverse_reaction() {
        let forward = transfer();
        let mut inverse = forward.clone();
        inverse.beam = forward.recoil;
        inverse.target = forward.ejectile;
        inverse.ejectile = forward.target;
        inverse.recoil = forward.beam;

        let settings = ArraySettings::default();
        let q_forward = Reaction::new(&forward, &settings, &masses())
            .unwrap()
            .q_value();
        let q_inverse = Reaction::new(&inverse, &settings, &masses())
            .unwrap()
            .q_value();
        assert!(q_forward.abs() > 1.0);
        assert!((q_forward + q_inverse).abs() < 1e-6);
    }

    #[test]
    fn cm_energy_reduces_to_rest_masses_for_a_beam_at_rest() {
        let mut config = coulex();
        config.beam_energy = 0.0;
        let reaction = Reaction::new(&config, &ArraySettings::default(), &masses()).unwrap();
        let rest = reaction.beam().mass() + reaction.target().mass();
        assert!((reaction.energy_tot_cm() - rest).abs() < 1e-6);
        assert_eq!(reaction.energy_tot_lab(), rest);
    }

    #[test]
    fn cm_energy_is_below_lab_energy_for_a_moving_beam() {
        let reaction = Reaction::new(&coulex(), &ArraySettings::default(), &masses()).unwrap();
        let rest = reaction.beam().mass() + reaction.target().mass();
        assert!(reaction.energy_tot_cm() > rest);
        assert!(reaction.energy_tot_cm() < reaction.energy_tot_lab());
    }

    #[test]
    fn ebis_ratio_of_a_100_ns_gate_in_a_1100_ns_cycle() {
        let reaction = Reaction::new(&transfer(), &ArraySettings::default(), &masses()).unwrap();
        assert_eq!(reaction.ebis_on_time(), 100.0);
        assert_eq!(reaction.ebis_off_time(), 1100.0);
        assert!((reaction.ebis_ratio() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn classical_beta_matches_its_formula() {
        let reaction = Reaction::new(&coulex(), &ArraySettings::default(), &masses()).unwrap();
        let beam = reaction.beam();
        let expected = (2.0 * beam.energy_lab() / beam.mass()).sqrt();
        assert_eq!(reaction.beta(), expected);
        assert!((reaction.gamma() - 1.0 / (1.0 - expected * expected).sqrt()).abs() < 1e-15);
        assert!(reaction.beta() > 0.09 && reaction.beta() < 0.1);
    }

    #[test]
    fn ebis_window_opening_at_trigger_gives_zero_ratio() {
        let mut config = transfer();
        config.ebis = EbisWindow {
            on: 0.0,
            off: 1000.0,
        };
        let reaction = Reaction::new(&config, &ArraySettings::default(), &masses()).unwrap();
        assert_eq!(reaction.ebis_ratio(), 0.0);
    }

    #[test]
    fn construction_rejects_an_invalid_ebis_window() {
        let mut config = coulex();
        config.ebis = EbisWindow {
            on: 500.0,
            off: 500.0,
        };
        let result = Reaction::new(&config, &ArraySettings::default(), &masses());
        assert!(matches!(result, Err(ReactionError::Config(_))));
    }

    #[test]
    fn cd_placements_are_sized_from_settings() {
        let settings = ArraySettings {
            cd_detectors: 2,
            ..ArraySettings::default()
        };
        let reaction = Reaction::new(&coulex(), &settings, &masses()).unwrap();
        assert_eq!(reaction.geometry().number_of_cd_detectors(), 2);
        assert_eq!(reaction.cd_distance(1), CdPlacement::default().distance);
        assert_eq!(reaction.number_of_particle_thetas(), 32);
        assert_eq!(reaction.particle_thetas().len(), 32);
    }

    #[test]
    fn unconfigured_detector_reads_as_zero() {
        let reaction = Reaction::new(&coulex(), &ArraySettings::default(), &masses()).unwrap();
        assert_eq!(reaction.cd_distance(1), 0.0);
        assert_eq!(reaction.cd_phi_offset(1), 0.0);
        assert_eq!(reaction.cd_vector(1, 0, 0, 0), Vector3::zeros());
        let hit = GammaRayHit {
            cluster: 3,
            ..GammaRayHit::default()
        };
        assert_eq!(reaction.gamma_theta(&hit), 0.0);
    }

    #[test]
    fn hit_accessors_pass_through_to_geometry() {
        let mut config = coulex();
        config.target_offset = Vector3::new(0.0, 0.0, 1.5);
        let reaction = Reaction::new(&config, &ArraySettings::default(), &masses()).unwrap();
        let hit = ParticleHit {
            sector: 1,
            strip_p: 4,
            strip_n: 7,
            ..ParticleHit::default()
        };
        let diff = reaction.particle_vector(0, 1, 4, 7) - reaction.cd_vector(0, 1, 4, 7);
        assert_eq!(diff, -reaction.target_offset());
        assert_eq!(
            reaction.particle_theta(&hit),
            reaction.geometry().particle_theta(0, 1, 4, 7)
        );
        let gamma = GammaRayHit {
            cluster: 0,
            crystal: 2,
            segment: 5,
            ..GammaRayHit::default()
        };
        assert!(reaction.gamma_theta(&gamma) > 0.0);
        assert_eq!(
            reaction.gamma_phi(&gamma),
            reaction.geometry().gamma_phi(0, 2, 5)
        );
    }

    #[test]
    fn cuts_are_bound_at_construction() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cuts.toml");
        fs::write(
            &path,
            "[beamcut]\nx = [0.0, 1.0, 1.0]\ny = [0.0, 0.0, 1.0]\n",
        )
        .unwrap();

        let mut config = coulex();
        config.beam_cut = Some(crate::engine::config::CutSpec {
            file: path.clone(),
            name: "beamcut".to_string(),
        });
        let reaction = Reaction::new(&config, &ArraySettings::default(), &masses()).unwrap();
        assert_eq!(reaction.beam_cut().unwrap().name(), "beamcut");
        assert!(reaction.target_cut().is_none());

        config.target_cut = Some(crate::engine::config::CutSpec {
            file: path,
            name: "absent".to_string(),
        });
        let result = Reaction::new(&config, &ArraySettings::default(), &masses());
        assert!(matches!(result, Err(ReactionError::Cut { .. })));
    }

    #[test]
    fn unknown_element_fails_construction() {
        let mut config = coulex();
        config.ejectile = Nuclide::new(300, 200);
        let result = Reaction::new(&config, &ArraySettings::default(), &masses());
        assert!(matches!(
            result,
            Err(ReactionError::Element {
                role: "ejectile",
                ..
            })
        ));
    }
}
