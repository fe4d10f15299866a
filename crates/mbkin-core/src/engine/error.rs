use thiserror::Error;

use super::config::ConfigError;
use crate::core::cuts::registry::CutLoadError;
use crate::core::models::element::ElementError;

#[derive(Debug, Error)]
pub enum ReactionError {
    #[error("Invalid reaction configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot label the {role}: {source}")]
    Element {
        role: &'static str,
        #[source]
        source: ElementError,
    },

    #[error("Failed to bind cut: {source}")]
    Cut {
        #[from]
        source: CutLoadError,
    },

    #[error(
        "Reaction is below threshold: {available:.3} keV available in the CM frame, {required:.3} keV required"
    )]
    Forbidden { available: f64, required: f64 },

    #[error("No recoil is consistent with an ejectile at {theta_lab} rad and {energy_lab} keV")]
    Unphysical { theta_lab: f64, energy_lab: f64 },
}
