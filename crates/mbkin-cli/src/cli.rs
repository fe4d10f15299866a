use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Miniball Analysis Contributors",
    version,
    about = "mbkin - Two-body reaction kinematics and detector angles for CD + Miniball experiments.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print masses, Q-value, CM energy and EBIS normalisation of a reaction.
    Summary(SummaryArgs),
    /// Tabulate the polar angle of every CD ring.
    Angles(AnglesArgs),
    /// Tabulate ejectile and recoil lab angles and energies against the CM angle.
    Kinematics(KinematicsArgs),
}

/// Inputs shared by every subcommand that builds a reaction.
#[derive(Args, Debug, Clone)]
pub struct ReactionArgs {
    /// Reaction description in TOML format. Built-in defaults are used when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub reaction: Option<PathBuf>,

    /// Array settings in TOML format (detector, strip and segment counts).
    #[arg(short, long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Mass table (AME format, or CSV with a `.csv` extension). Overrides `mass-table`.
    #[arg(short, long = "mass-table", value_name = "PATH")]
    pub mass_table: Option<PathBuf>,

    /// Set a reaction value, overriding the reaction file.
    /// Can be used multiple times. Example: -S beam.energy=5500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub reaction: ReactionArgs,

    /// Write the summary as TOML to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `angles` subcommand.
#[derive(Args, Debug)]
pub struct AnglesArgs {
    #[command(flatten)]
    pub reaction: ReactionArgs,

    /// Write the CSV table to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `kinematics` subcommand.
#[derive(Args, Debug)]
pub struct KinematicsArgs {
    #[command(flatten)]
    pub reaction: ReactionArgs,

    /// CM angle step in degrees.
    #[arg(long, default_value_t = 1.0, value_name = "DEG")]
    pub step: f64,

    /// Recoil excitation energy in keV.
    #[arg(long, default_value_t = 0.0, value_name = "KEV")]
    pub ex: f64,

    /// Write the CSV table to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
