//! End-to-end pipeline: load, run, consume.

use crate::config::RunConfig;
use crate::consumer::ResultConsumer;
use crate::dataset::load_columns;
use crate::error::Result;
use crate::runner::{IterationRunner, RunSummary};
use std::io::Write;

/// Outcome of a full pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineReport {
    /// Number of rows in the loaded dataset.
    pub rows: usize,
    /// Number of results the consumer drained.
    pub consumed: usize,
    pub run: RunSummary,
}

/// Load the configured dataset, run all repetitions and render them to
/// `writer`.
///
/// Load failures are returned before any regression work starts.
pub fn run_pipeline<W: Write>(config: &RunConfig, writer: W) -> Result<PipelineReport> {
    config.validate()?;
    log::info!("{}", config.summary());

    let columns = load_columns(
        &config.data_path,
        config.predictor_a,
        config.predictor_b,
        config.response,
    )?;

    let runner = IterationRunner::new(config.mode);
    let (channel, run) = runner.run_to_channel(config.iterations, &columns)?;

    let mut consumer = ResultConsumer::new(writer, config.verbose, config.response.name());
    let consumed = consumer.consume(&channel)?;

    Ok(PipelineReport {
        rows: columns.len(),
        consumed,
        run,
    })
}
