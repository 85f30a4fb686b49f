//! Progress reporting for inference calls

use buddy_application::ports::progress::ProgressNotifier;
use buddy_domain::{Model, TaskKind};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while an inference call is outstanding
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub(crate) fn task_label(task: TaskKind) -> &'static str {
        match task {
            TaskKind::Complete => "Thinking",
            TaskKind::Explain => "Explaining",
            TaskKind::Debug => "Debugging",
            TaskKind::GenerateTests => "Writing tests",
            TaskKind::QueryDocument => "Reading document",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_inference_start(&self, task: TaskKind, model: &Model) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::task_label(task));
        pb.set_message(format!("({})", model));
        pb.enable_steady_tick(Duration::from_millis(100));

        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(previous) = slot.replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn on_inference_complete(&self, _task: TaskKind, _success: bool) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_inference_start(&self, task: TaskKind, model: &Model) {
        eprintln!(
            "{} {} with {}...",
            "->".cyan(),
            ProgressReporter::task_label(task).bold(),
            model
        );
    }

    fn on_inference_complete(&self, _task: TaskKind, success: bool) {
        if !success {
            eprintln!("  {} request failed", "x".red());
        }
    }
}
