use clap::Args;
use patient_merge::config::AppConfig;
use patient_merge::error::AppError;
use patient_merge::linkage::{Dataset, MergeJob, MergeSummary};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct InputArgs {
    /// Appointment export; its rows define the merged output
    #[arg(long)]
    pub(crate) primary: PathBuf,
    /// Neuro visit export contributing extra columns
    #[arg(long)]
    pub(crate) secondary: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct MergeArgs {
    #[command(flatten)]
    pub(crate) inputs: InputArgs,
    /// Destination CSV (defaults to MERGE_OUTPUT or merged.csv)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Print the merge summary as JSON instead of the status text
    #[arg(long)]
    pub(crate) summary: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) inputs: InputArgs,
}

fn job_for(inputs: InputArgs, output: PathBuf, config: &AppConfig) -> MergeJob {
    MergeJob::new(inputs.primary, inputs.secondary, output)
        .with_date_columns(config.merge.date_columns.clone())
}

pub(crate) fn run_merge(args: MergeArgs, config: &AppConfig) -> Result<(), AppError> {
    let MergeArgs {
        inputs,
        output,
        summary: as_json,
    } = args;

    let output = output.unwrap_or_else(|| config.merge.output_path.clone());
    let job = job_for(inputs, output, config);
    info!(?config.environment, "starting merge");

    let summary = job.run()?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        render_merge(&job, &summary);
    }

    Ok(())
}

pub(crate) fn run_check(args: CheckArgs, config: &AppConfig) -> Result<(), AppError> {
    let job = job_for(args.inputs, config.merge.output_path.clone(), config);
    let (primary, secondary) = job.load()?;

    println!("Both exports have the required columns");
    render_dataset("Primary", &job.primary, &primary);
    render_dataset("Secondary", &job.secondary, &secondary);

    Ok(())
}

fn render_merge(job: &MergeJob, summary: &MergeSummary) {
    println!("Merged file saved as '{}'", job.output.display());
    println!(
        "- {} appointment rows, {} matched, {} without a match",
        summary.primary_rows, summary.matched_rows, summary.unmatched_rows
    );
    if summary.name_only_rows > 0 {
        println!(
            "- {} rows had no usable date and were matched on exact names",
            summary.name_only_rows
        );
    }
    if summary.extra_columns.is_empty() {
        println!("- Added columns: none");
    } else {
        println!("- Added columns: {}", summary.extra_columns.join(", "));
    }
}

fn render_dataset(label: &str, path: &std::path::Path, dataset: &Dataset) {
    println!("\n{label}: {}", path.display());
    println!("- rows: {}", dataset.len());
    println!("- unrecognized dates: {}", dataset.unparsed_dates());
    if dataset.extra_columns().is_empty() {
        println!("- other columns: none");
    } else {
        println!("- other columns: {}", dataset.extra_columns().join(", "));
    }
}
