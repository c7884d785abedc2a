mod cli;
mod commands;

use patient_merge::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
