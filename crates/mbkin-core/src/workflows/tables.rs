use crate::engine::config::ConfigError;
use crate::engine::error::ReactionError;
use crate::engine::reaction::Reaction;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument};

/// Finest CM step accepted by [`kinematics_table`], in degrees.
pub const MIN_ANGLE_STEP_DEG: f64 = 1.0e-3;

/// Polar angle of one CD ring seen from the nominal target position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StripAngle {
    pub detector: usize,
    pub strip: usize,
    pub theta_deg: f64,
}

/// Ring angles of every configured CD detector, detector-major.
pub fn cd_angle_table(reaction: &Reaction) -> Vec<StripAngle> {
    let p_strips = reaction.geometry().cd_layout().p_strips;
    reaction
        .particle_thetas()
        .into_iter()
        .enumerate()
        .map(|(i, theta_deg)| StripAngle {
            detector: i / p_strips,
            strip: i % p_strips,
            theta_deg,
        })
        .collect()
}

/// Outgoing-particle lab angles (degrees) and kinetic energies (keV) for one CM angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KinematicsRow {
    pub theta_cm_deg: f64,
    pub ejectile_theta_lab_deg: f64,
    pub ejectile_energy_lab: f64,
    pub recoil_theta_lab_deg: f64,
    pub recoil_energy_lab: f64,
}

fn kinematics_row(
    reaction: &mut Reaction,
    theta_cm_deg: f64,
) -> Result<KinematicsRow, ReactionError> {
    reaction.set_theta_cm(theta_cm_deg.to_radians())?;
    Ok(KinematicsRow {
        theta_cm_deg,
        ejectile_theta_lab_deg: reaction.ejectile().theta_lab().to_degrees(),
        ejectile_energy_lab: reaction.ejectile().energy_lab(),
        recoil_theta_lab_deg: reaction.recoil().theta_lab().to_degrees(),
        recoil_energy_lab: reaction.recoil().energy_lab(),
    })
}

/// Tabulates the outgoing channel from 0° to 180° in the CM frame for a recoil excitation
/// energy `ex` (keV).
///
/// `reaction` is left untouched; every worker thread transforms its own clone.
#[instrument(skip(reaction), name = "kinematics_workflow")]
pub fn kinematics_table(
    reaction: &Reaction,
    step_deg: f64,
    ex: f64,
) -> Result<Vec<KinematicsRow>, ReactionError> {
    if !(MIN_ANGLE_STEP_DEG..=180.0).contains(&step_deg) {
        return Err(ConfigError::InvalidAngleStep(step_deg).into());
    }
    let steps = (180.0 / step_deg).floor() as usize;

    let mut prepared = reaction.clone();
    prepared.ejectile_mut().set_ex(0.0);
    prepared.recoil_mut().set_ex(ex);

    #[cfg(not(feature = "parallel"))]
    let rows = {
        let mut scratch = prepared;
        (0..=steps)
            .map(|i| kinematics_row(&mut scratch, i as f64 * step_deg))
            .collect::<Result<Vec<_>, _>>()?
    };

    #[cfg(feature = "parallel")]
    let rows = (0..=steps)
        .into_par_iter()
        .map_init(
            || prepared.clone(),
            |scratch, i| kinematics_row(scratch, i as f64 * step_deg),
        )
        .collect::<Result<Vec<_>, _>>()?;

    info!(rows = rows.len(), "Kinematics table finished.");
    Ok(rows)
}
