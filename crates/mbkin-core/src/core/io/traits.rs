use crate::core::masses::table::MassTable;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading nuclear mass evaluations into a [`MassTable`].
///
/// Implementors handle the format-specific row layout; the shared path-based entry point
/// opens and buffers the file.
pub trait MassTableFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a mass table from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails or a row is structurally malformed. Rows whose
    /// binding-energy field carries no number are skipped rather than reported.
    fn read_from(reader: &mut impl BufRead) -> Result<MassTable, Self::Error>;

    /// Reads a mass table from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<MassTable, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
