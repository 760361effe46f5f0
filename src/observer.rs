//! Progress reporting for the batch stages.
//!
//! Stages never print. They report milestones to a [`PipelineObserver`]
//! supplied by the caller; [`TracingObserver`] is the default and forwards
//! everything to `tracing`.

use crate::strategy::GroupIdentifier;
use tracing::{debug, info, warn};

/// A milestone reached by one of the stages.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// Raw rows were cleaned and aggregated.
    Preprocessed {
        input_rows: usize,
        output_rows: usize,
        groups: usize,
    },
    /// One group was decomposed.
    GroupDecomposed {
        identifier: GroupIdentifier,
        points: usize,
        flagged: usize,
    },
    /// One group was left out under the skip failure policy.
    GroupSkipped {
        identifier: GroupIdentifier,
        reason: String,
    },
    /// All groups of a `decompose` call were processed.
    DecompositionFinished { groups: usize, skipped: usize },
    /// The series was split into train and validation windows.
    SplitComputed { train_size: usize, val_size: usize },
    /// A model is about to be fitted.
    TrainingStarted { model: String },
    /// A model finished fitting.
    TrainingFinished { model: String },
}

/// Receives [`PipelineEvent`]s from the stages.
pub trait PipelineObserver {
    fn on_event(&self, event: &PipelineEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

/// Shared default observer instance.
pub static TRACING_OBSERVER: TracingObserver = TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Preprocessed {
                input_rows,
                output_rows,
                groups,
            } => info!(input_rows, output_rows, groups, "preprocessed sales rows"),
            PipelineEvent::GroupDecomposed {
                identifier,
                points,
                flagged,
            } => debug!(group = %identifier, points, flagged, "decomposed group"),
            PipelineEvent::GroupSkipped { identifier, reason } => {
                warn!(group = %identifier, %reason, "skipped group")
            }
            PipelineEvent::DecompositionFinished { groups, skipped } => {
                info!(groups, skipped, "decomposition finished")
            }
            PipelineEvent::SplitComputed {
                train_size,
                val_size,
            } => info!(train_size, val_size, "split series into train and validation"),
            PipelineEvent::TrainingStarted { model } => info!(%model, "training started"),
            PipelineEvent::TrainingFinished { model } => info!(%model, "training finished"),
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_event(&self, _event: &PipelineEvent) {}
}
