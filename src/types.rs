//! Core data types shared by the loader, the regression engine and the runner.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of numeric features in each record.
pub const N_FEATURES: usize = 13;

/// The numeric features of a housing record, in file column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    /// Per capita crime rate by town.
    Crim,
    /// Proportion of residential land zoned for large lots.
    Zn,
    /// Proportion of non-retail business acres.
    Indus,
    /// Charles River dummy variable.
    Chas,
    /// Nitric oxides concentration.
    Nox,
    /// Average number of rooms per dwelling.
    Rooms,
    /// Proportion of owner-occupied units built before 1940.
    Age,
    /// Weighted distance to employment centres.
    Dis,
    /// Index of accessibility to radial highways.
    Rad,
    /// Property tax rate.
    Tax,
    /// Pupil-teacher ratio.
    Ptratio,
    /// Percentage of lower status population.
    Lstat,
    /// Median value of owner-occupied homes. The response of the dataset.
    Mv,
}

impl Feature {
    /// All features in file column order.
    pub const ALL: [Feature; N_FEATURES] = [
        Feature::Crim,
        Feature::Zn,
        Feature::Indus,
        Feature::Chas,
        Feature::Nox,
        Feature::Rooms,
        Feature::Age,
        Feature::Dis,
        Feature::Rad,
        Feature::Tax,
        Feature::Ptratio,
        Feature::Lstat,
        Feature::Mv,
    ];

    /// Position of the feature within a record's numeric fields.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name used when rendering fitted equations.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Crim => "Crim",
            Feature::Zn => "Zn",
            Feature::Indus => "Indus",
            Feature::Chas => "Chas",
            Feature::Nox => "Nox",
            Feature::Rooms => "Rooms",
            Feature::Age => "Age",
            Feature::Dis => "Dis",
            Feature::Rad => "Rad",
            Feature::Tax => "Tax",
            Feature::Ptratio => "Ptratio",
            Feature::Lstat => "Lstat",
            Feature::Mv => "Median Value",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One observation: a neighborhood identifier and its numeric features.
///
/// Fields are private so a record cannot change after it has been parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    neighborhood: String,
    values: [f64; N_FEATURES],
}

impl Record {
    pub fn new(neighborhood: impl Into<String>, values: [f64; N_FEATURES]) -> Self {
        Self {
            neighborhood: neighborhood.into(),
            values,
        }
    }

    pub fn neighborhood(&self) -> &str {
        &self.neighborhood
    }

    /// Value of a single feature.
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    /// All numeric values in file column order.
    pub fn values(&self) -> &[f64; N_FEATURES] {
        &self.values
    }
}

/// A fitted line `response ≈ intercept + slope * predictor` and its R².
///
/// Undefined quantities (constant predictor, constant response, empty input)
/// are reported as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Name of the predictor the response was regressed on.
    pub x_name: String,
    pub intercept: f64,
    pub slope: f64,
    pub r_squared: f64,
}

impl RegressionResult {
    /// Whether any of the fitted quantities is the NaN sentinel.
    pub fn is_degenerate(&self) -> bool {
        self.intercept.is_nan() || self.slope.is_nan() || self.r_squared.is_nan()
    }

    /// Fitted equation, e.g. `34.55 + -0.95 * Lstat`.
    pub fn equation(&self) -> String {
        format!("{:.2} + {:.2} * {}", self.intercept, self.slope, self.x_name)
    }

    /// Evaluate the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Output of one repetition: both predictors fitted against the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationResult {
    /// 1-based repetition index.
    pub iteration: usize,
    pub predictor_a: RegressionResult,
    pub predictor_b: RegressionResult,
}
