use super::{load_reaction, open_output};
use crate::cli::SummaryArgs;
use crate::error::{CliError, Result};
use mbkin::workflows::summary::summarize;
use std::io::Write;
use tracing::info;

pub fn run(args: SummaryArgs) -> Result<()> {
    let reaction = load_reaction(&args.reaction)?;
    let summary = summarize(&reaction)?;
    info!("Summarised reaction {}", summary.reaction);

    let text = toml::to_string_pretty(&summary).map_err(|e| CliError::Other(e.into()))?;
    let mut out = open_output(args.output.as_deref())?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
