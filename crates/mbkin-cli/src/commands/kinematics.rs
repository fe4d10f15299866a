use super::{load_reaction, open_output};
use crate::cli::KinematicsArgs;
use crate::error::Result;
use mbkin::workflows::tables::kinematics_table;
use tracing::info;

pub fn run(args: KinematicsArgs) -> Result<()> {
    let reaction = load_reaction(&args.reaction)?;
    info!(
        "Tabulating kinematics every {} degrees with Ex = {} keV.",
        args.step, args.ex
    );
    let rows = kinematics_table(&reaction, args.step, args.ex)?;

    let mut writer = csv::Writer::from_writer(open_output(args.output.as_deref())?);
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReactionArgs;
    use tempfile::tempdir;

    #[test]
    fn run_writes_one_row_per_step() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("table.csv");
        run(KinematicsArgs {
            reaction: ReactionArgs {
                reaction: None,
                settings: None,
                mass_table: None,
                set_values: Vec::new(),
            },
            step: 45.0,
            ex: 0.0,
            output: Some(output.clone()),
        })
        .unwrap();

        let content = std::fs::read_to_string(output).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("theta_cm_deg,ejectile_theta_lab_deg,ejectile_energy_lab,recoil_theta_lab_deg,recoil_energy_lab")
        );
        assert_eq!(lines.count(), 5);
    }
}
