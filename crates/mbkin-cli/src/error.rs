use mbkin::core::masses::table::MassTableError;
use mbkin::core::settings::SettingsLoadError;
use mbkin::engine::error::ReactionError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Reaction(#[from] ReactionError),

    #[error(transparent)]
    MassTable(#[from] MassTableError),

    #[error(transparent)]
    Settings(#[from] SettingsLoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
