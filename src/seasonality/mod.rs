//! Seasonal decomposition.
//!
//! This module provides classical (moving-average) decomposition of a
//! regularly spaced series into trend, seasonal and residual components.

mod classical;

pub use classical::{ClassicalDecomposition, DecompositionModel, SeasonalComponents};
