use super::{load_reaction, open_output};
use crate::cli::AnglesArgs;
use crate::error::Result;
use mbkin::workflows::tables::cd_angle_table;
use tracing::info;

pub fn run(args: AnglesArgs) -> Result<()> {
    let reaction = load_reaction(&args.reaction)?;
    let table = cd_angle_table(&reaction);
    info!("Computed {} CD ring angles.", table.len());

    let mut writer = csv::Writer::from_writer(open_output(args.output.as_deref())?);
    for row in &table {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
