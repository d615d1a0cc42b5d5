pub mod config;
pub mod error;
mod merger;
mod preflight;
pub mod progress;
mod scanner;

pub use config::{Config, DEFAULT_OUTPUT_NAME};
pub use error::MergeError;
pub use merger::MergeSummary;
pub use progress::{ProgressReporter, ProgressSink};

use anyhow::Result;
use std::sync::atomic::AtomicBool;

pub fn run(config: Config) -> Result<MergeSummary> {
    let mut progress = ProgressReporter::new(!config.quiet);
    run_with_progress(&config, &mut progress, &AtomicBool::new(false))
}

/// Runs a merge, checking `cancel` before each file is appended.
pub fn run_with_progress(
    config: &Config,
    progress: &mut dyn ProgressSink,
    cancel: &AtomicBool,
) -> Result<MergeSummary> {
    tracing::debug!(?config, "starting merge");
    let plan = preflight::prepare(config)?;
    merger::merge_files(&plan, progress, cancel)
}
