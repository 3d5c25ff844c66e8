//! Repeated regression runs over a fixed set of columns.
//!
//! Each repetition fits both predictors against the response and pushes one
//! [`IterationResult`] onto a [`ResultChannel`]. The data is never perturbed
//! between repetitions; the repetitions exist to exercise the pipeline.

use crate::channel::ResultChannel;
use crate::dataset::Columns;
use crate::error::Result;
use crate::regression::fit;
use crate::types::IterationResult;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How repetitions are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One repetition after another, pushed in index order.
    #[default]
    Sequential,
    /// Repetitions spread over the rayon thread pool. Delivery order is not
    /// index order.
    Parallel,
}

/// Timing information for a completed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub iterations: usize,
    pub mode: ExecutionMode,
    pub elapsed: Duration,
}

/// Fit both predictors against the response for a single repetition.
pub fn perform_iteration(iteration: usize, columns: &Columns) -> IterationResult {
    let response = columns.response();
    IterationResult {
        iteration,
        predictor_a: fit(
            columns.predictor_a_feature().name(),
            &columns.predictor_a(),
            &response,
        ),
        predictor_b: fit(
            columns.predictor_b_feature().name(),
            &columns.predictor_b(),
            &response,
        ),
    }
}

/// Orchestrates `n` repetitions and seals the sink afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct IterationRunner {
    mode: ExecutionMode,
}

impl IterationRunner {
    pub fn new(mode: ExecutionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Run repetitions `1..=n`, pushing each result onto `sink`, then seal it.
    ///
    /// The sink is sealed even if a push fails.
    pub fn run(
        &self,
        n: usize,
        columns: &Columns,
        sink: &ResultChannel<IterationResult>,
    ) -> Result<RunSummary> {
        log::info!(
            "Starting {} iterations ({:?}) over {} rows",
            n,
            self.mode,
            columns.len()
        );
        let start = Instant::now();

        let outcome = match self.mode {
            ExecutionMode::Sequential => {
                (1..=n).try_for_each(|i| sink.push(perform_iteration(i, columns)))
            }
            ExecutionMode::Parallel => (1..=n)
                .into_par_iter()
                .try_for_each(|i| sink.push(perform_iteration(i, columns))),
        };
        sink.seal();
        outcome?;

        let elapsed = start.elapsed();
        log::info!("Completed {} iterations in {:?}", n, elapsed);
        Ok(RunSummary {
            iterations: n,
            mode: self.mode,
            elapsed,
        })
    }

    /// Create a channel with room for every result, run into it and return it
    /// sealed.
    pub fn run_to_channel(
        &self,
        n: usize,
        columns: &Columns,
    ) -> Result<(ResultChannel<IterationResult>, RunSummary)> {
        let channel = ResultChannel::with_capacity(n);
        let summary = self.run(n, columns, &channel)?;
        Ok((channel, summary))
    }
}
