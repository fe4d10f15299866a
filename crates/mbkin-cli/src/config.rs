use crate::cli::ReactionArgs;
use crate::error::{CliError, Result};
use mbkin::core::geometry::cd::CdPlacement;
use mbkin::core::geometry::miniball::ClusterPlacement;
use mbkin::engine::config as core_config;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Values used for anything the reaction file leaves out: Coulomb excitation of ¹⁸⁵Hg on
/// ¹²⁰Sn at 4.5 MeV/u.
pub struct ReactionDefaults {
    pub beam: (u32, u32),
    pub target: (u32, u32),
    pub beam_energy: f64,
    pub ebis_on: f64,
    pub ebis_off: f64,
    pub cd_distance: f64,
}

impl Default for ReactionDefaults {
    fn default() -> Self {
        Self {
            beam: (185, 80),
            target: (120, 50),
            beam_energy: 4500.0,
            ebis_on: 1.2e6,
            ebis_off: 2.52e7,
            cd_distance: 32.0,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialNuclide {
    a: Option<u32>,
    z: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialBeam {
    a: Option<u32>,
    z: Option<u32>,
    /// keV per nucleon.
    energy: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialEbis {
    on: Option<f64>,
    off: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialOffset {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct FileCdPlacement {
    distance: Option<f64>,
    /// Degrees.
    #[serde(rename = "phi-offset")]
    phi_offset: Option<f64>,
}

/// Angles in degrees, `r` in mm.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct FileClusterPlacement {
    theta: f64,
    phi: f64,
    #[serde(default)]
    alpha: f64,
    r: f64,
}

impl From<FileClusterPlacement> for ClusterPlacement {
    fn from(p: FileClusterPlacement) -> Self {
        Self {
            theta: p.theta.to_radians(),
            phi: p.phi.to_radians(),
            alpha: p.alpha.to_radians(),
            r: p.r,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct FileCut {
    file: PathBuf,
    name: String,
}

/// A reaction description as written in TOML; every value is optional.
///
/// ```toml
/// mass-table = "mass_1.mas20"
///
/// [beam]
/// a = 30
/// z = 12
/// energy = 9500.0
///
/// [target]
/// a = 2
/// z = 1
///
/// [[cd]]
/// distance = 28.0
/// phi-offset = 0.0
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialReactionConfig {
    beam: Option<PartialBeam>,
    target: Option<PartialNuclide>,
    ejectile: Option<PartialNuclide>,
    recoil: Option<PartialNuclide>,
    ebis: Option<PartialEbis>,
    #[serde(rename = "target-offset")]
    target_offset: Option<PartialOffset>,
    #[serde(default)]
    cd: Vec<FileCdPlacement>,
    #[serde(default)]
    miniball: Vec<FileClusterPlacement>,
    #[serde(rename = "beam-cut")]
    beam_cut: Option<FileCut>,
    #[serde(rename = "target-cut")]
    target_cut: Option<FileCut>,
    #[serde(rename = "mass-table")]
    mass_table: Option<PathBuf>,
    /// Directory relative paths in the file are resolved against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
    /// `-S mass-table=...`, used as given.
    #[serde(skip)]
    mass_table_override: Option<PathBuf>,
}

/// A complete reaction configuration plus the mass table it should be evaluated with.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub reaction: core_config::ReactionConfig,
    pub mass_table: Option<PathBuf>,
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: '{}'", key, value))
    })
}

impl PartialReactionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading reaction description from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    fn resolve_path(&self, path: PathBuf) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }

    pub fn merge_with_cli(mut self, args: &ReactionArgs) -> Result<ResolvedConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = ReactionDefaults::default();

        let beam = self.beam.take().unwrap_or_default();
        let beam_a = beam.a.unwrap_or(defaults.beam.0);
        let beam_z = beam.z.unwrap_or(defaults.beam.1);
        let target = self.target.take().unwrap_or_default();
        let target_a = target.a.unwrap_or(defaults.target.0);
        let target_z = target.z.unwrap_or(defaults.target.1);
        let ejectile = self.ejectile.take().unwrap_or_default();
        let recoil = self.recoil.take().unwrap_or_default();
        let ebis = self.ebis.take().unwrap_or_default();
        let offset = self.target_offset.take().unwrap_or_default();

        let cd_placements = std::mem::take(&mut self.cd)
            .into_iter()
            .map(|p| CdPlacement {
                distance: p.distance.unwrap_or(defaults.cd_distance),
                phi_offset: p.phi_offset.unwrap_or(0.0).to_radians(),
            })
            .collect();
        let cluster_placements = std::mem::take(&mut self.miniball)
            .into_iter()
            .map(Into::into)
            .collect();

        let mut builder = core_config::ReactionConfigBuilder::new()
            .beam(beam_a, beam_z)
            .target(target_a, target_z)
            .ejectile(
                ejectile.a.unwrap_or(beam_a),
                ejectile.z.unwrap_or(beam_z),
            )
            .recoil(
                recoil.a.unwrap_or(target_a),
                recoil.z.unwrap_or(target_z),
            )
            .beam_energy(beam.energy.unwrap_or(defaults.beam_energy))
            .ebis_window(
                ebis.on.unwrap_or(defaults.ebis_on),
                ebis.off.unwrap_or(defaults.ebis_off),
            )
            .target_offset(
                offset.x.unwrap_or(0.0),
                offset.y.unwrap_or(0.0),
                offset.z.unwrap_or(0.0),
            )
            .cd_placements(cd_placements)
            .cluster_placements(cluster_placements);

        if let Some(cut) = self.beam_cut.take() {
            builder = builder.beam_cut(self.resolve_path(cut.file), cut.name);
        }
        if let Some(cut) = self.target_cut.take() {
            builder = builder.target_cut(self.resolve_path(cut.file), cut.name);
        }

        let mass_table = match (&args.mass_table, self.mass_table_override.take()) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(path)) => Some(path),
            (None, None) => self.mass_table.take().map(|p| self.resolve_path(p)),
        };

        let reaction = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(ResolvedConfig {
            reaction,
            mass_table,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "beam.a" => {
                    self.beam.get_or_insert_with(Default::default).a =
                        Some(parse_value(key, value_str)?)
                }
                "beam.z" => {
                    self.beam.get_or_insert_with(Default::default).z =
                        Some(parse_value(key, value_str)?)
                }
                "beam.energy" => {
                    self.beam.get_or_insert_with(Default::default).energy =
                        Some(parse_value(key, value_str)?)
                }
                "target.a" | "target.z" | "ejectile.a" | "ejectile.z" | "recoil.a" | "recoil.z" => {
                    let (role, field) = key.split_at(key.len() - 2);
                    let nuclide = match role {
                        "target" => &mut self.target,
                        "ejectile" => &mut self.ejectile,
                        _ => &mut self.recoil,
                    }
                    .get_or_insert_with(Default::default);
                    let value = Some(parse_value(key, value_str)?);
                    if field == ".a" {
                        nuclide.a = value;
                    } else {
                        nuclide.z = value;
                    }
                }
                "ebis.on" => {
                    self.ebis.get_or_insert_with(Default::default).on =
                        Some(parse_value(key, value_str)?)
                }
                "ebis.off" => {
                    self.ebis.get_or_insert_with(Default::default).off =
                        Some(parse_value(key, value_str)?)
                }
                "target-offset.x" => {
                    self.target_offset.get_or_insert_with(Default::default).x =
                        Some(parse_value(key, value_str)?)
                }
                "target-offset.y" => {
                    self.target_offset.get_or_insert_with(Default::default).y =
                        Some(parse_value(key, value_str)?)
                }
                "target-offset.z" => {
                    self.target_offset.get_or_insert_with(Default::default).z =
                        Some(parse_value(key, value_str)?)
                }
                "mass-table" => self.mass_table_override = Some(PathBuf::from(value_str)),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(set_values: &[&str]) -> ReactionArgs {
        ReactionArgs {
            reaction: None,
            settings: None,
            mass_table: None,
            set_values: set_values.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_description_uses_coulex_defaults() {
        let resolved = PartialReactionConfig::default()
            .merge_with_cli(&args(&[]))
            .unwrap();
        let config = resolved.reaction;
        assert_eq!(config.beam, core_config::Nuclide::new(185, 80));
        assert_eq!(config.target, core_config::Nuclide::new(120, 50));
        assert_eq!(config.ejectile, config.beam);
        assert_eq!(config.recoil, config.target);
        assert_eq!(config.beam_energy, 4500.0);
        assert_eq!(config.ebis.on, 1.2e6);
        assert_eq!(config.ebis.off, 2.52e7);
        assert!(resolved.mass_table.is_none());
    }

    #[test]
    fn file_values_are_converted_and_paths_resolved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reaction.toml");
        fs::write(
            &path,
            r#"
            mass-table = "masses.csv"

            [beam]
            a = 30
            z = 12
            energy = 9500.0

            [target]
            a = 2
            z = 1

            [ejectile]
            a = 1
            z = 1

            [recoil]
            a = 31
            z = 12

            [ebis]
            on = 100.0
            off = 1100.0

            [target-offset]
            z = 1.5

            [[cd]]
            distance = 28.0
            phi-offset = 90.0

            [[cd]]

            [[miniball]]
            theta = 90.0
            phi = 45.0
            r = 110.0

            [beam-cut]
            file = "cuts.toml"
            name = "mg30"
            "#,
        )
        .unwrap();

        let resolved = PartialReactionConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args(&[]))
            .unwrap();
        let config = resolved.reaction;
        assert_eq!(config.recoil, core_config::Nuclide::new(31, 12));
        assert_eq!(config.target_offset.z, 1.5);
        assert_eq!(config.cd_placements.len(), 2);
        assert!((config.cd_placements[0].phi_offset - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert_eq!(config.cd_placements[1].distance, 32.0);
        assert!((config.cluster_placements[0].phi - std::f64::consts::FRAC_PI_4).abs() < 1e-15);
        assert_eq!(config.cluster_placements[0].alpha, 0.0);
        assert_eq!(config.beam_cut.unwrap().file, dir.path().join("cuts.toml"));
        assert_eq!(resolved.mass_table, Some(dir.path().join("masses.csv")));
    }

    #[test]
    fn set_values_override_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reaction.toml");
        fs::write(&path, "[beam]\nenergy = 3000.0\n").unwrap();

        let resolved = PartialReactionConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args(&[
                "beam.energy=5500",
                "recoil.a=121",
                "ebis.on=100",
                "ebis.off=1100",
                "target-offset.x=-0.5",
            ]))
            .unwrap();
        let config = resolved.reaction;
        assert_eq!(config.beam_energy, 5500.0);
        assert_eq!(config.recoil, core_config::Nuclide::new(121, 50));
        assert_eq!(config.ebis.on, 100.0);
        assert_eq!(config.target_offset.x, -0.5);
    }

    #[test]
    fn cli_mass_table_wins_over_the_file() {
        let mut cli_args = args(&[]);
        cli_args.mass_table = Some(PathBuf::from("/data/mass.mas20"));
        let config = PartialReactionConfig {
            mass_table: Some(PathBuf::from("other.csv")),
            ..PartialReactionConfig::default()
        };
        let resolved = config.merge_with_cli(&cli_args).unwrap();
        assert_eq!(resolved.mass_table, Some(PathBuf::from("/data/mass.mas20")));
    }

    #[test]
    fn set_mass_table_is_not_joined_to_the_reaction_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reaction.toml");
        fs::write(&path, "mass-table = \"masses.csv\"\n").unwrap();

        let resolved = PartialReactionConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args(&["mass-table=tables/mass.mas20"]))
            .unwrap();
        assert_eq!(resolved.mass_table, Some(PathBuf::from("tables/mass.mas20")));
    }

    #[test]
    fn invalid_set_values_are_rejected() {
        let config = PartialReactionConfig::default();
        assert!(matches!(
            config.merge_with_cli(&args(&["beam.energy"])),
            Err(CliError::Config(_))
        ));
        let config = PartialReactionConfig::default();
        assert!(matches!(
            config.merge_with_cli(&args(&["beam.a=heavy"])),
            Err(CliError::Config(_))
        ));
        let config = PartialReactionConfig::default();
        assert!(matches!(
            config.merge_with_cli(&args(&["beam.charge=3"])),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn degenerate_ebis_window_is_a_configuration_error() {
        let config = PartialReactionConfig::default();
        let result = config.merge_with_cli(&args(&["ebis.on=100", "ebis.off=100"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_keys_in_the_file_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reaction.toml");
        fs::write(&path, "[beam]\nmass = 30\n").unwrap();
        assert!(matches!(
            PartialReactionConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }
}
