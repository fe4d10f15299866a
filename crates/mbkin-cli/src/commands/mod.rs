pub mod angles;
pub mod kinematics;
pub mod summary;

use crate::cli::ReactionArgs;
use crate::config::PartialReactionConfig;
use crate::error::Result;
use mbkin::core::masses::table::MassTable;
use mbkin::core::settings::ArraySettings;
use mbkin::engine::reaction::Reaction;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};

/// Loads the reaction description, settings and mass table named by `args` and builds the
/// reaction.
pub fn load_reaction(args: &ReactionArgs) -> Result<Reaction> {
    let partial = match &args.reaction {
        Some(path) => PartialReactionConfig::from_file(path)?,
        None => {
            info!("No reaction file given; using built-in defaults.");
            PartialReactionConfig::default()
        }
    };
    let resolved = partial.merge_with_cli(args)?;

    let settings = match &args.settings {
        Some(path) => ArraySettings::load(path)?,
        None => ArraySettings::default(),
    };

    let masses = match &resolved.mass_table {
        Some(path) => MassTable::load(path)?,
        None => {
            warn!("No mass table given; every binding energy is taken as zero.");
            MassTable::new()
        }
    };

    Ok(Reaction::new(&resolved.reaction, &settings, &masses)?)
}

/// Standard output, or a freshly created file.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            info!("Writing output to {:?}", path);
            Box::new(File::create(path)?)
        }
        None => Box::new(io::stdout().lock()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(dir: &Path) -> ReactionArgs {
        let reaction = dir.join("reaction.toml");
        fs::write(
            &reaction,
            "mass-table = \"masses.csv\"\n[beam]\na = 30\nz = 12\nenergy = 9500.0\n[target]\na = 2\nz = 1\n[ejectile]\na = 1\nz = 1\n[recoil]\na = 31\nz = 12\n",
        )
        .unwrap();
        fs::write(
            dir.join("masses.csv"),
            "a,z,binding_energy\n30,12,8263.9\n2,1,1112.283\n1,1,0\n31,12,8013.1\n",
        )
        .unwrap();
        ReactionArgs {
            reaction: Some(reaction),
            settings: None,
            mass_table: None,
            set_values: Vec::new(),
        }
    }

    #[test]
    fn load_reaction_reads_relative_mass_table() {
        let dir = tempdir().unwrap();
        let reaction = load_reaction(&args(dir.path())).unwrap();
        assert_eq!(reaction.beam().binding_energy(), 8263.9);
        assert_eq!(reaction.recoil().binding_energy(), 8013.1);
        assert_eq!(reaction.beam_energy(), 9500.0);
    }

    #[test]
    fn load_reaction_honours_settings_file() {
        let dir = tempdir().unwrap();
        let settings = dir.path().join("settings.toml");
        fs::write(&settings, "cd-detectors = 2\n").unwrap();
        let mut args = args(dir.path());
        args.settings = Some(settings);
        let reaction = load_reaction(&args).unwrap();
        assert_eq!(reaction.geometry().number_of_cd_detectors(), 2);
    }

    #[test]
    fn missing_mass_table_fails_at_startup() {
        let dir = tempdir().unwrap();
        let mut args = args(dir.path());
        args.mass_table = Some(dir.path().join("absent.mas20"));
        assert!(load_reaction(&args).is_err());
    }
}
