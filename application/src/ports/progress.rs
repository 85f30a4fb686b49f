//! Progress notification port
//!
//! Defines the interface for reporting while an inference call is outstanding.

use buddy_domain::{Model, TaskKind};

/// Callback for progress updates during a session submission
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, status bar, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the inference request is sent
    fn on_inference_start(&self, task: TaskKind, model: &Model);

    /// Called when the inference request finished, successfully or not
    fn on_inference_complete(&self, task: TaskKind, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_inference_start(&self, _task: TaskKind, _model: &Model) {}
    fn on_inference_complete(&self, _task: TaskKind, _success: bool) {}
}
