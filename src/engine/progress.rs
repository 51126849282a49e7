//! Progress bar utilities for displaying thumbnail generation status

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

pub type ProgressBar = Arc<Mutex<Bar>>;

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " images"
    )))
}

/// Bar for the producer stage, only when it cannot collide with operator prompts.
pub fn thumbnail_bar(total: usize, verbose: bool, interactive: bool) -> Option<ProgressBar> {
    (verbose && !interactive).then(|| {
        create_progress_bar(ProgressBarConfig::new(
            total,
            "Thumbnails",
            Animation::Classic,
        ))
    })
}

/// Advance the bar by `n`. Uses try_lock so a contended bar never stalls the caller.
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Print a trailing newline so later log lines don't land on the bar.
pub fn finish_progress_bar(pb: &ProgressBar) {
    if let Ok(mut pb) = pb.lock() {
        let _ = pb.refresh();
        eprintln!();
    }
}
