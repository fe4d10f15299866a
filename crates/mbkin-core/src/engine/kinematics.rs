//! Relativistic two-body transforms between the laboratory and centre-of-mass frames.
//!
//! The CM frame moves along the beam axis with the exact velocity from
//! [`Reaction::boost_beta`]. Kinetic energies stored on the outgoing particles exclude their
//! excitation energy, so `energy_lab = E_tot − (M + Ex)`.

use super::error::ReactionError;
use super::reaction::Reaction;
use crate::core::models::hits::SegmentAddress;
use crate::core::models::particle::Particle;
use crate::core::utils::geometry::{from_spherical, opening_angle};
use nalgebra::Vector3;
use std::f64::consts::PI;
use tracing::trace;

/// Lab quantities of one particle after boosting out of the CM frame.
struct LabState {
    theta: f64,
    energy_tot: f64,
}

/// Boosts a CM state (`energy_cm`, momentum `p_cm` at `theta_cm`) into the lab frame.
fn boost_to_lab(energy_cm: f64, p_cm: f64, theta_cm: f64, beta: f64, gamma: f64) -> LabState {
    let p_par = gamma * (p_cm * theta_cm.cos() + beta * energy_cm);
    let p_perp = p_cm * theta_cm.sin();
    LabState {
        theta: p_perp.atan2(p_par),
        energy_tot: gamma * (energy_cm + beta * p_cm * theta_cm.cos()),
    }
}

/// `γ(1 − β cos α)` for a particle moving with its current lab kinetic energy.
pub fn doppler_factor(particle: &Particle, alpha: f64) -> f64 {
    particle.gamma() * (1.0 - particle.beta() * alpha.cos())
}

impl Reaction {
    /// Exact velocity of the CM frame, `p_beam / (E_beam + E_target)`.
    pub fn boost_beta(&self) -> f64 {
        self.beam().momentum_lab() / self.energy_tot_lab()
    }

    pub fn boost_gamma(&self) -> f64 {
        1.0 / (1.0 - self.boost_beta().powi(2)).sqrt()
    }

    /// Shares the invariant mass between beam and target and stores their CM total energies.
    pub(crate) fn update_entrance_channel(&mut self) {
        let w = self.energy_tot_cm();
        let mb = self.beam().mass();
        let mt = self.target().mass();
        let eb = (w * w + mb * mb - mt * mt) / (2.0 * w);
        self.beam_mut().set_energy_tot_cm(eb);
        self.target_mut().set_energy_tot_cm(w - eb);
    }

    /// Fills both outgoing particles for an ejectile emitted at `theta_cm` radians in the CM
    /// frame. The recoil goes out at `π − theta_cm`.
    ///
    /// Excitation energies already set on the ejectile and recoil are taken into account.
    ///
    /// # Errors
    ///
    /// Returns [`ReactionError::Forbidden`] if the CM energy cannot produce both particles.
    pub fn set_theta_cm(&mut self, theta_cm: f64) -> Result<(), ReactionError> {
        let w = self.energy_tot_cm();
        let m3 = self.ejectile().mass() + self.ejectile().ex();
        let m4 = self.recoil().mass() + self.recoil().ex();
        if w < m3 + m4 {
            return Err(ReactionError::Forbidden {
                available: w,
                required: m3 + m4,
            });
        }

        let e3 = (w * w + m3 * m3 - m4 * m4) / (2.0 * w);
        let e4 = w - e3;
        let p_cm = (e3 * e3 - m3 * m3).max(0.0).sqrt();
        let (beta, gamma) = (self.boost_beta(), self.boost_gamma());

        let lab3 = boost_to_lab(e3, p_cm, theta_cm, beta, gamma);
        let lab4 = boost_to_lab(e4, p_cm, PI - theta_cm, beta, gamma);
        trace!(theta_cm, theta3 = lab3.theta, theta4 = lab4.theta, "Boosted to lab.");

        let ejectile = self.ejectile_mut();
        ejectile.set_theta_cm(theta_cm);
        ejectile.set_energy_tot_cm(e3);
        ejectile.set_theta_lab(lab3.theta);
        ejectile.set_energy_lab(lab3.energy_tot - m3);

        let recoil = self.recoil_mut();
        recoil.set_theta_cm(PI - theta_cm);
        recoil.set_energy_tot_cm(e4);
        recoil.set_theta_lab(lab4.theta);
        recoil.set_energy_lab(lab4.energy_tot - m4);
        Ok(())
    }

    /// Missing-mass reconstruction from a detected ejectile.
    ///
    /// The ejectile is taken in its ground state. The recoil four-momentum is
    /// `beam + target − ejectile`; its invariant mass above the ground state becomes the
    /// recoil excitation energy, which is also returned. CM angles and energies of both
    /// outgoing particles are filled in.
    pub fn reconstruct_from_ejectile(
        &mut self,
        theta_lab: f64,
        energy_lab: f64,
    ) -> Result<f64, ReactionError> {
        let m3 = self.ejectile().mass();
        let e3 = m3 + energy_lab;
        let p3 = (e3 * e3 - m3 * m3).max(0.0).sqrt();

        let e4 = self.energy_tot_lab() - e3;
        let p4_par = self.beam().momentum_lab() - p3 * theta_lab.cos();
        let p4_perp = p3 * theta_lab.sin();
        let m4_sq = e4 * e4 - p4_par * p4_par - p4_perp * p4_perp;
        if m4_sq.is_nan() || m4_sq <= 0.0 || e4 <= 0.0 {
            return Err(ReactionError::Unphysical {
                theta_lab,
                energy_lab,
            });
        }
        let m4 = m4_sq.sqrt();
        let ex = m4 - self.recoil().mass();

        let (beta, gamma) = (self.boost_beta(), self.boost_gamma());
        let p3_cm_par = gamma * (p3 * theta_lab.cos() - beta * e3);
        let e3_cm = gamma * (e3 - beta * p3 * theta_lab.cos());
        let theta_cm = p4_perp.atan2(p3_cm_par);
        let w = self.energy_tot_cm();

        let ejectile = self.ejectile_mut();
        ejectile.set_ex(0.0);
        ejectile.set_theta_lab(theta_lab);
        ejectile.set_energy_lab(energy_lab);
        ejectile.set_theta_cm(theta_cm);
        ejectile.set_energy_tot_cm(e3_cm);

        let recoil = self.recoil_mut();
        recoil.set_ex(ex);
        recoil.set_theta_lab(p4_perp.atan2(p4_par));
        recoil.set_energy_lab(e4 - m4);
        recoil.set_theta_cm(PI - theta_cm);
        recoil.set_energy_tot_cm(w - e3_cm);
        Ok(ex)
    }

    /// Doppler-corrects a gamma-ray energy emitted by `particle` travelling along
    /// `particle_dir`, detected in the Miniball segment addressed by `gamma_hit`.
    pub fn doppler_correct(
        &self,
        energy: f64,
        particle: &Particle,
        particle_dir: &Vector3<f64>,
        gamma_hit: &impl SegmentAddress,
    ) -> f64 {
        let gamma_dir = from_spherical(1.0, self.gamma_theta(gamma_hit), self.gamma_phi(gamma_hit));
        energy * doppler_factor(particle, opening_angle(&gamma_dir, particle_dir))
    }
}
