use crate::core::Frequency;
use crate::error::{Result, SalesError};
use crate::seasonality::DecompositionModel;
use serde::{Deserialize, Serialize};

/// What to do when a single group cannot be decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupFailurePolicy {
    /// Abort the whole batch with the group's error.
    #[default]
    Abort,
    /// Leave the group out of the results and report it to the observer.
    Skip,
}

/// Configuration for [`Decomposer`](super::Decomposer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    /// History floor, in grid points after gap filling.
    pub minimum_data_points: usize,
    /// Cycle length of the seasonal component.
    pub seasonal_period: usize,
    pub model_type: DecompositionModel,
    /// Calendar grid used for gap filling.
    pub frequency: Frequency,
    /// `k` in `low_threshold = mean - k * std`.
    pub low_sales_std_multiplier: f64,
    pub failure_policy: GroupFailurePolicy,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            minimum_data_points: 14,
            seasonal_period: 7,
            model_type: DecompositionModel::Additive,
            frequency: Frequency::Daily,
            low_sales_std_multiplier: 2.0,
            failure_policy: GroupFailurePolicy::Abort,
        }
    }
}

impl DecompositionConfig {
    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = period;
        self
    }

    pub fn with_minimum_data_points(mut self, points: usize) -> Self {
        self.minimum_data_points = points;
        self
    }

    pub fn with_model(mut self, model: DecompositionModel) -> Self {
        self.model_type = model;
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_low_sales_std_multiplier(mut self, k: f64) -> Self {
        self.low_sales_std_multiplier = k;
        self
    }

    pub fn with_failure_policy(mut self, policy: GroupFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Smallest gap-filled series length a group must have: the configured
    /// floor, and never less than two full cycles.
    pub fn required_points(&self) -> usize {
        self.minimum_data_points.max(2 * self.seasonal_period)
    }

    /// Reject values no decomposition could run with.
    pub fn validate(&self) -> Result<()> {
        if self.seasonal_period < 2 {
            return Err(SalesError::Configuration(format!(
                "seasonal_period must be at least 2, got {}",
                self.seasonal_period
            )));
        }
        if !self.low_sales_std_multiplier.is_finite() || self.low_sales_std_multiplier < 0.0 {
            return Err(SalesError::Configuration(format!(
                "low_sales_std_multiplier must be a non-negative number, got {}",
                self.low_sales_std_multiplier
            )));
        }
        Ok(())
    }
}
