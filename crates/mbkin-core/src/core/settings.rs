use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Read-only description of how the detector arrays are sized.
///
/// Reaction construction uses it to size the per-detector geometry lists, and the geometry
/// resolver uses it to decide which indices are configured.
pub trait Settings {
    fn number_of_cd_detectors(&self) -> usize;
    fn number_of_cd_sectors(&self) -> usize;
    fn number_of_cd_p_strips(&self) -> usize;
    fn number_of_cd_n_strips(&self) -> usize;
    fn number_of_miniball_clusters(&self) -> usize;
    fn number_of_miniball_crystals(&self) -> usize;
    fn number_of_miniball_segments(&self) -> usize;
}

/// Array sizing loaded from a TOML file; every key is optional.
///
/// ```toml
/// cd-detectors = 1
/// cd-sectors = 4
/// cd-p-strips = 16
/// cd-n-strips = 12
/// miniball-clusters = 8
/// miniball-crystals = 3
/// miniball-segments = 7
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ArraySettings {
    pub cd_detectors: usize,
    pub cd_sectors: usize,
    pub cd_p_strips: usize,
    pub cd_n_strips: usize,
    pub miniball_clusters: usize,
    pub miniball_crystals: usize,
    pub miniball_segments: usize,
}

impl Default for ArraySettings {
    fn default() -> Self {
        Self {
            cd_detectors: 1,
            cd_sectors: 4,
            cd_p_strips: 16,
            cd_n_strips: 12,
            miniball_clusters: 8,
            miniball_crystals: 3,
            miniball_segments: 7,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("'{key}' = {value} in '{path}' exceeds the {max} addressable channels")]
    TooManyChannels {
        path: String,
        key: &'static str,
        value: usize,
        max: usize,
    },
}

/// Detector, strip and segment indices travel as `u8`.
pub const MAX_CHANNELS: usize = u8::MAX as usize + 1;

impl ArraySettings {
    pub fn load(path: &Path) -> Result<Self, SettingsLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let settings: Self = toml::from_str(&content).map_err(|e| SettingsLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        if let Some((key, value)) = settings.oversized_count() {
            return Err(SettingsLoadError::TooManyChannels {
                path: path.to_string_lossy().to_string(),
                key,
                value,
                max: MAX_CHANNELS,
            });
        }
        Ok(settings)
    }

    fn oversized_count(&self) -> Option<(&'static str, usize)> {
        [
            ("cd-detectors", self.cd_detectors),
            ("cd-sectors", self.cd_sectors),
            ("cd-p-strips", self.cd_p_strips),
            ("cd-n-strips", self.cd_n_strips),
            ("miniball-clusters", self.miniball_clusters),
            ("miniball-crystals", self.miniball_crystals),
            ("miniball-segments", self.miniball_segments),
        ]
        .into_iter()
        .find(|&(_, value)| value > MAX_CHANNELS)
    }
}

impl Settings for ArraySettings {
    fn number_of_cd_detectors(&self) -> usize {
        self.cd_detectors
    }
    fn number_of_cd_sectors(&self) -> usize {
        self.cd_sectors
    }
    fn number_of_cd_p_strips(&self) -> usize {
        self.cd_p_strips
    }
    fn number_of_cd_n_strips(&self) -> usize {
        self.cd_n_strips
    }
    fn number_of_miniball_clusters(&self) -> usize {
        self.miniball_clusters
    }
    fn number_of_miniball_crystals(&self) -> usize {
        self.miniball_crystals
    }
    fn number_of_miniball_segments(&self) -> usize {
        self.miniball_segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_file_gives_defaults() {
        let settings: ArraySettings = toml::from_str("").unwrap();
        assert_eq!(settings, ArraySettings::default());
        assert_eq!(settings.number_of_cd_p_strips(), 16);
        assert_eq!(settings.number_of_miniball_segments(), 7);
    }

    #[test]
    fn load_overrides_selected_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "cd-detectors = 2\nminiball-clusters = 6\n").unwrap();

        let settings = ArraySettings::load(&path).unwrap();
        assert_eq!(settings.number_of_cd_detectors(), 2);
        assert_eq!(settings.number_of_miniball_clusters(), 6);
        assert_eq!(settings.number_of_cd_sectors(), 4);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ArraySettings::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(SettingsLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "cd-detector = 2\n").unwrap();
        let result = ArraySettings::load(&path);
        assert!(matches!(result, Err(SettingsLoadError::Toml { .. })));
    }

    #[test]
    fn load_rejects_counts_beyond_u8_addressing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "cd-detectors = 256\n").unwrap();
        assert_eq!(ArraySettings::load(&path).unwrap().cd_detectors, 256);

        fs::write(&path, "cd-p-strips = 300\n").unwrap();
        let result = ArraySettings::load(&path);
        assert!(matches!(
            result,
            Err(SettingsLoadError::TooManyChannels {
                key: "cd-p-strips",
                value: 300,
                ..
            })
        ));
    }
}
