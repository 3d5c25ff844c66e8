use anyhow::{Context, Result};
use clap::Parser;
use housing_ols::config::RunConfig;
use housing_ols::pipeline::run_pipeline;
use housing_ols::runner::ExecutionMode;
use housing_ols::types::Feature;
use std::path::PathBuf;
use std::process::ExitCode;

/// Fit Crim and Rooms against the median home value, many times over.
#[derive(Debug, Parser)]
#[command(name = "housing-ols", version, about)]
struct Cli {
    /// JSON run configuration. Flags given on the command line override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path of the housing CSV file.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Number of repetitions.
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Print every iteration's fitted equations.
    #[arg(short, long)]
    verbose: bool,

    /// Legacy form of `--verbose`: enabled when the value is "verbose".
    #[arg(long, value_name = "MODE")]
    verbose_mode: Option<String>,

    /// Spread repetitions over all cores.
    #[arg(long)]
    parallel: bool,

    #[arg(long, value_enum)]
    predictor_a: Option<Feature>,

    #[arg(long, value_enum)]
    predictor_b: Option<Feature>,

    #[arg(long, value_enum)]
    response: Option<Feature>,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(data) = self.data {
            config.data_path = data;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        let legacy_verbose = self
            .verbose_mode
            .as_deref()
            .is_some_and(|mode| mode.eq_ignore_ascii_case("verbose"));
        if self.verbose || legacy_verbose {
            config.verbose = true;
        }
        if self.parallel {
            config.mode = ExecutionMode::Parallel;
        }
        if let Some(feature) = self.predictor_a {
            config.predictor_a = feature;
        }
        if let Some(feature) = self.predictor_b {
            config.predictor_b = feature;
        }
        if let Some(feature) = self.response {
            config.response = feature;
        }
        Ok(config)
    }
}

fn run() -> Result<()> {
    let config = Cli::parse().into_config()?;
    let report = run_pipeline(&config, std::io::stdout().lock())?;
    log::info!(
        "Processed {} rows x {} iterations in {:?}",
        report.rows,
        report.consumed,
        report.run.elapsed
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
