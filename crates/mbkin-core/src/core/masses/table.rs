use crate::core::io::ame::{AmeError, AmeFile};
use crate::core::io::csv_table::{CsvMassError, CsvMassFile};
use crate::core::io::traits::MassTableFile;
use crate::core::models::element::{ElementError, isotope_label};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Binding energies per nucleon keyed by isotope label (`"120Sn"`), in keV.
///
/// The stored value is the additive correction of the mass model
/// `M = N·m_n + Z·m_p − A·B/A`. The table is filled once and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassTable {
    binding_energies: HashMap<String, f64>,
}

#[derive(Debug, Error)]
pub enum MassTableError {
    #[error("AME mass table error for '{path}': {source}")]
    Ame { path: String, source: AmeError },
    #[error("CSV mass table error for '{path}': {source}")]
    Csv { path: String, source: CsvMassError },
}

impl MassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a mass table, choosing the reader from the file extension: `.csv` files are read
    /// with [`CsvMassFile`], everything else is treated as a fixed-column AME evaluation.
    pub fn load(path: &Path) -> Result<Self, MassTableError> {
        let path_str = path.to_string_lossy().to_string();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let table = if is_csv {
            CsvMassFile::read_from_path(path).map_err(|e| MassTableError::Csv {
                path: path_str.clone(),
                source: e,
            })?
        } else {
            AmeFile::read_from_path(path).map_err(|e| MassTableError::Ame {
                path: path_str.clone(),
                source: e,
            })?
        };

        info!(
            entries = table.len(),
            "Loaded mass table from '{}'.", path_str
        );
        Ok(table)
    }

    /// Stores a binding energy per nucleon for `(a, z)`, replacing any previous entry.
    pub fn insert(&mut self, a: u32, z: u32, binding_energy: f64) -> Result<(), ElementError> {
        self.binding_energies
            .insert(isotope_label(a, z)?, binding_energy);
        Ok(())
    }

    /// Parses a raw table field with [`parse_binding_energy`] and stores it.
    ///
    /// Returns `Ok(false)` when the field holds no usable number; nothing is stored in that case.
    pub fn insert_raw(&mut self, a: u32, z: u32, raw: &str) -> Result<bool, ElementError> {
        match parse_binding_energy(raw) {
            Some(value) => {
                self.insert(a, z, value)?;
                Ok(true)
            }
            None => {
                debug!(a, z, raw, "Skipping mass table entry without a numeric value.");
                Ok(false)
            }
        }
    }

    /// Binding energy per nucleon in keV, or `None` when the isotope is not tabulated.
    pub fn binding_energy(&self, a: u32, z: u32) -> Option<f64> {
        let key = isotope_label(a, z).ok()?;
        self.binding_energies.get(&key).copied()
    }

    /// Lookup by isotope label, e.g. `"208Pb"`.
    pub fn get(&self, isotope: &str) -> Option<f64> {
        self.binding_energies.get(isotope).copied()
    }

    pub fn len(&self) -> usize {
        self.binding_energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binding_energies.is_empty()
    }
}

/// Converts a mass-evaluation field to a number.
///
/// A `#` standing in for the decimal point marks an estimated value and is read as the decimal
/// point (or dropped when the field already has one). Every other character that is not a digit,
/// a sign or a decimal point is stripped before conversion. Fields that are left empty or still
/// fail to parse (e.g. `*` for non-calculable entries) yield `None`.
pub fn parse_binding_energy(raw: &str) -> Option<f64> {
    let has_point = raw.contains('.');
    let cleaned: String = raw
        .chars()
        .filter_map(|c| match c {
            '#' if has_point => None,
            '#' => Some('.'),
            '0'..='9' | '+' | '-' | '.' => Some(c),
            _ => None,
        })
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
