//! # housing-ols
//!
//! Repeated univariate ordinary least squares over the Boston housing dataset.
//!
//! The crate loads a fixed-schema CSV file into an immutable dataset, projects
//! two predictor columns and the response column, and fits each predictor
//! against the response `n` times. Every repetition's result travels through a
//! bounded, sealable channel to a consumer that optionally renders it.
//!
//! ## Pipeline
//!
//! - [`dataset`] - CSV parsing into records and aligned columns
//! - [`regression`] - OLS intercept, slope and R²
//! - [`runner`] - sequential or rayon-parallel repetitions
//! - [`channel`] - the sealable result queue
//! - [`consumer`] - draining and console rendering
//!
//! ## Example
//!
//! ```
//! use housing_ols::prelude::*;
//! use ndarray::array;
//!
//! let columns = Columns::new(
//!     (Feature::Crim, array![0.3, 0.1, 0.2]),
//!     (Feature::Rooms, array![5.0, 6.0, 7.0]),
//!     (Feature::Mv, array![15.0, 20.0, 25.0]),
//! )?;
//!
//! let (channel, _) = IterationRunner::new(ExecutionMode::Sequential).run_to_channel(3, &columns)?;
//! let mut consumer = ResultConsumer::new(Vec::new(), true, Feature::Mv.name());
//! assert_eq!(consumer.consume(&channel)?, 3);
//! # Ok::<(), OlsError>(())
//! ```

pub mod channel;
pub mod config;
pub mod consumer;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod regression;
pub mod runner;
pub mod types;

pub mod prelude {
    //! Convenient re-exports of commonly used types.
    pub use crate::channel::ResultChannel;
    pub use crate::config::RunConfig;
    pub use crate::consumer::{COMPLETION_MARKER, ResultConsumer};
    pub use crate::dataset::{Columns, Dataset, load_columns};
    pub use crate::error::{OlsError, Result};
    pub use crate::pipeline::{PipelineReport, run_pipeline};
    pub use crate::regression::{fit, linear_regression, r_squared};
    pub use crate::runner::{ExecutionMode, IterationRunner, RunSummary, perform_iteration};
    pub use crate::types::{Feature, IterationResult, Record, RegressionResult};
}
