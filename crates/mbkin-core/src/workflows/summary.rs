use crate::core::models::particle::Particle;
use crate::engine::error::ReactionError;
use crate::engine::reaction::Reaction;
use serde::Serialize;
use tracing::instrument;

/// Static properties of one reaction participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParticleSummary {
    pub isotope: String,
    pub a: u32,
    pub z: u32,
    /// keV per nucleon.
    pub binding_energy: f64,
    /// keV/c².
    pub mass: f64,
    pub mass_u: f64,
    /// keV.
    pub energy_lab: f64,
}

impl ParticleSummary {
    fn of(role: &'static str, particle: &Particle) -> Result<Self, ReactionError> {
        Ok(Self {
            isotope: particle
                .isotope()
                .map_err(|source| ReactionError::Element { role, source })?,
            a: particle.a(),
            z: particle.z(),
            binding_energy: particle.binding_energy(),
            mass: particle.mass(),
            mass_u: particle.mass_u(),
            energy_lab: particle.energy_lab(),
        })
    }
}

/// Reaction-level quantities of a freshly configured reaction.
///
/// Scalars come first so the record serializes to TOML with the particles as trailing tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReactionSummary {
    /// `beam(target,ejectile)recoil`, the usual notation for inverse kinematics.
    pub reaction: String,
    pub beam_energy_per_u: f64,
    pub q_value: f64,
    pub energy_tot_lab: f64,
    pub energy_tot_cm: f64,
    pub beta: f64,
    pub gamma: f64,
    pub boost_beta: f64,
    pub boost_gamma: f64,
    pub ebis_on: f64,
    pub ebis_off: f64,
    pub ebis_ratio: f64,
    pub cd_detectors: usize,
    pub miniball_clusters: usize,
    pub beam: ParticleSummary,
    pub target: ParticleSummary,
    pub ejectile: ParticleSummary,
    pub recoil: ParticleSummary,
}

#[instrument(skip_all, name = "summary_workflow")]
pub fn summarize(reaction: &Reaction) -> Result<ReactionSummary, ReactionError> {
    let beam = ParticleSummary::of("beam", reaction.beam())?;
    let target = ParticleSummary::of("target", reaction.target())?;
    let ejectile = ParticleSummary::of("ejectile", reaction.ejectile())?;
    let recoil = ParticleSummary::of("recoil", reaction.recoil())?;

    Ok(ReactionSummary {
        reaction: format!(
            "{}({},{}){}",
            beam.isotope, target.isotope, ejectile.isotope, recoil.isotope
        ),
        beam_energy_per_u: reaction.beam_energy(),
        q_value: reaction.q_value(),
        energy_tot_lab: reaction.energy_tot_lab(),
        energy_tot_cm: reaction.energy_tot_cm(),
        beta: reaction.beta(),
        gamma: reaction.gamma(),
        boost_beta: reaction.boost_beta(),
        boost_gamma: reaction.boost_gamma(),
        ebis_on: reaction.ebis_on_time(),
        ebis_off: reaction.ebis_off_time(),
        ebis_ratio: reaction.ebis_ratio(),
        cd_detectors: reaction.geometry().number_of_cd_detectors(),
        miniball_clusters: reaction.geometry().number_of_clusters(),
        beam,
        target,
        ejectile,
        recoil,
    })
}
