//! Run configuration.

use crate::error::{OlsError, Result};
use crate::runner::ExecutionMode;
use crate::types::Feature;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the housing dataset.
pub const DEFAULT_DATA_PATH: &str = "data/boston.csv";

/// Default number of repetitions.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Everything needed to run the pipeline once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Path of the CSV file to load.
    pub data_path: PathBuf,
    /// Number of repetitions.
    pub iterations: usize,
    /// Render every iteration result.
    pub verbose: bool,
    /// Scheduling of the repetitions.
    pub mode: ExecutionMode,
    pub predictor_a: Feature,
    pub predictor_b: Feature,
    pub response: Feature,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            iterations: DEFAULT_ITERATIONS,
            verbose: false,
            mode: ExecutionMode::Sequential,
            predictor_a: Feature::Crim,
            predictor_b: Feature::Rooms,
            response: Feature::Mv,
        }
    }
}

impl RunConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| OlsError::IoError(format!("{}: {}", path.display(), e)))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Reject predictor selections that regress a feature on itself.
    pub fn validate(&self) -> Result<()> {
        for predictor in [self.predictor_a, self.predictor_b] {
            if predictor == self.response {
                return Err(OlsError::InvalidParameter(format!(
                    "predictor '{}' is also the response",
                    predictor.name()
                )));
            }
        }
        Ok(())
    }

    /// Short human-readable description of the run.
    pub fn summary(&self) -> String {
        format!(
            "data: {}, iterations: {}, mode: {:?}, model: {} ~ {} | {}, verbose: {}",
            self.data_path.display(),
            self.iterations,
            self.mode,
            self.response.name(),
            self.predictor_a.name(),
            self.predictor_b.name(),
            self.verbose
        )
    }
}
