use crate::commands::{run_check, run_merge, CheckArgs, MergeArgs};
use clap::{Parser, Subcommand};
use patient_merge::config::AppConfig;
use patient_merge::error::AppError;
use patient_merge::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "patient-merge",
    about = "Merge neuro visit details into an appointment export by fuzzy name and date matching",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match both exports and write the merged CSV
    Merge(MergeArgs),
    /// Validate both exports without writing anything
    Check(CheckArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Merge(args) => run_merge(args, &config),
        Command::Check(args) => run_check(args, &config),
    }
}
