use super::region::CutRegion;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct PolygonRecord {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// All cut regions stored in one file, keyed by object name.
///
/// ```toml
/// [CUTG]
/// x = [100.0, 900.0, 900.0, 100.0]
/// y = [10.0, 10.0, 80.0, 80.0]
/// ```
#[derive(Debug, Clone, Default)]
pub struct CutRegistry {
    registry: HashMap<String, CutRegion>,
}

#[derive(Debug, Error)]
pub enum CutLoadError {
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
    #[error("Cut '{name}' in '{path}' is not a valid polygon: {reason}")]
    InvalidPolygon {
        path: String,
        name: String,
        reason: String,
    },
    #[error("Cut '{name}' was not found in '{path}'")]
    NotFound { path: String, name: String },
}

impl CutRegistry {
    pub fn load(path: &Path) -> Result<Self, CutLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| CutLoadError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        let records: HashMap<String, PolygonRecord> =
            toml::from_str(&content).map_err(|e| CutLoadError::Toml {
                path: path_str.clone(),
                source: e,
            })?;

        let mut registry = HashMap::with_capacity(records.len());
        for (name, record) in records {
            if record.x.len() != record.y.len() {
                return Err(CutLoadError::InvalidPolygon {
                    path: path_str,
                    name,
                    reason: format!(
                        "{} x values but {} y values",
                        record.x.len(),
                        record.y.len()
                    ),
                });
            }
            if record.x.len() < 3 {
                return Err(CutLoadError::InvalidPolygon {
                    path: path_str,
                    name,
                    reason: "fewer than 3 vertices".to_string(),
                });
            }
            let vertices = record.x.into_iter().zip(record.y).collect();
            registry.insert(name.clone(), CutRegion::new(name, vertices));
        }
        Ok(Self { registry })
    }

    pub fn get(&self, name: &str) -> Option<&CutRegion> {
        self.registry.get(name)
    }

    /// Loads `path` and takes the region called `name` out of it.
    pub fn load_region(path: &Path, name: &str) -> Result<CutRegion, CutLoadError> {
        let mut registry = Self::load(path)?;
        registry
            .registry
            .remove(name)
            .ok_or_else(|| CutLoadError::NotFound {
                path: path.to_string_lossy().to_string(),
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
