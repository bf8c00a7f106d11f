use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use gold_diff_rs::image_pipeline::{CompareConfig, GoldComparePipeline, Verdict};
use gold_diff_rs::logger;

use tracing::{error, info};

/// Compare a rendered raster against its gold image and write a diff raster.
///
/// Exits with 0 when the images are considered equivalent and 1 when they differ
/// or either input could not be compared.
#[derive(Parser, Debug)]
#[command(name = "gold_diff", version)]
struct Args {
    /// Rendered image to check
    candidate: PathBuf,

    /// Gold reference image
    reference: PathBuf,

    /// Where to write the diff visualization
    diff: PathBuf,

    /// Largest per-channel difference (out of 255) a pixel may have and still pass
    #[arg(short, long, default_value_t = 1.0)]
    threshold: f64,

    /// Percentage of pixels allowed to exceed the threshold
    #[arg(short, long, default_value_t = 3.0)]
    allowed_percentage: f64,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> anyhow::Result<Verdict> {
    let config = CompareConfig::builder()
        .diff_threshold(args.threshold)
        .allowed_percentage(args.allowed_percentage)
        .build();
    let pipeline = GoldComparePipeline::new(config);

    let result = pipeline
        .compare_files(&args.candidate, &args.reference, &args.diff)
        .with_context(|| format!("Comparing {}", args.candidate.display()))?;

    if !result.is_equivalent() {
        info!("Rendered file: {}", args.candidate.display());
        info!("    Gold file: {}", args.reference.display());
        info!("    Diff file: {}", args.diff.display());
    }

    Ok(result.verdict)
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.verbose {
        logger::init_with_default("debug");
    } else {
        logger::init();
    }

    match run(&args) {
        Ok(Verdict::Equivalent) => ExitCode::SUCCESS,
        Ok(Verdict::Different) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
