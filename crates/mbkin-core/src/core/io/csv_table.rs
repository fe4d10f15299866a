use crate::core::io::traits::MassTableFile;
use crate::core::masses::table::MassTable;
use crate::core::models::element::ElementError;
use serde::Deserialize;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct MassRecord {
    a: u32,
    z: u32,
    binding_energy: String,
}

#[derive(Debug, Error)]
pub enum CsvMassError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid nuclide in record {record}: {source}")]
    Element {
        record: usize,
        #[source]
        source: ElementError,
    },
}

/// Comma-separated mass table with the header `a,z,binding_energy` (keV per nucleon).
///
/// The numeric field follows the same marker-stripping rules as the AME reader.
pub struct CsvMassFile;

impl MassTableFile for CsvMassFile {
    type Error = CsvMassError;

    fn read_from(reader: &mut impl BufRead) -> Result<MassTable, Self::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut table = MassTable::new();
        for (index, result) in csv_reader.deserialize::<MassRecord>().enumerate() {
            let record = result?;
            table
                .insert_raw(record.a, record.z, &record.binding_energy)
                .map_err(|e| CsvMassError::Element {
                    record: index + 1,
                    source: e,
                })?;
        }
        debug!(entries = table.len(), "Finished reading CSV mass table.");
        Ok(table)
    }
}
