use crate::core::io::traits::MassTableFile;
use crate::core::masses::table::MassTable;
use crate::core::models::element::ElementError;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace};

const Z_COLUMNS: (usize, usize) = (9, 14);
const A_COLUMNS: (usize, usize) = (14, 19);
const BINDING_ENERGY_COLUMNS: (usize, usize) = (54, 67);

#[derive(Debug, Error)]
pub enum AmeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid nuclide on line {line}: {source}")]
    Element {
        line: usize,
        #[source]
        source: ElementError,
    },
    #[error("No nuclide rows were found")]
    Empty,
}

fn slice_and_trim(line: &str, (start, end): (usize, usize)) -> &str {
    line.get(start..end)
        .or_else(|| line.get(start..))
        .unwrap_or("")
        .trim()
}

/// Fixed-column reader for the Atomic Mass Evaluation `mass.mas` tables.
///
/// Only rows whose Z and A columns hold integers are treated as nuclides; the page headers and
/// the explanatory preamble fail that test and are skipped.
pub struct AmeFile;

impl MassTableFile for AmeFile {
    type Error = AmeError;

    fn read_from(reader: &mut impl BufRead) -> Result<MassTable, Self::Error> {
        let mut table = MassTable::new();
        let mut skipped = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let z_str = slice_and_trim(&line, Z_COLUMNS);
            let a_str = slice_and_trim(&line, A_COLUMNS);
            let (Ok(z), Ok(a)) = (z_str.parse::<u32>(), a_str.parse::<u32>()) else {
                trace!(line = line_num, "Skipping non-nuclide line.");
                continue;
            };

            let be_str = slice_and_trim(&line, BINDING_ENERGY_COLUMNS);
            let stored = table
                .insert_raw(a, z, be_str)
                .map_err(|e| AmeError::Element {
                    line: line_num,
                    source: e,
                })?;
            if !stored {
                skipped += 1;
            }
        }

        if table.is_empty() {
            return Err(AmeError::Empty);
        }
        debug!(
            entries = table.len(),
            skipped, "Finished reading AME mass table."
        );
        Ok(table)
    }
}
