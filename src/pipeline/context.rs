//! Shared state handed to both stages: tools, tuning, and the first-error / skipped-image slots.

use std::sync::{Arc, Mutex};

use super::error::PipelineError;
use crate::engine::invoker::ImageTools;
use crate::engine::progress::ProgressBar;
use crate::{Opts, SkipStage, SkippedImage};

/// Per-run settings the stages need from [`Opts`].
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub thumbnail_percent: u32,
    pub final_percent: u32,
    pub caption_max_len: usize,
    pub channel_capacity: usize,
}

impl From<&Opts> for PipelineTuning {
    fn from(o: &Opts) -> Self {
        Self {
            thumbnail_percent: o.thumbnail_percent,
            final_percent: o.final_percent,
            caption_max_len: o.caption_max_len,
            channel_capacity: o.channel_capacity,
        }
    }
}

/// Context cloned into each stage. The first fatal error wins; later ones are only logged.
#[derive(Clone)]
pub struct PipelineContext {
    pub tools: ImageTools,
    pub tuning: PipelineTuning,
    pub first_error: Arc<Mutex<Option<PipelineError>>>,
    pub skipped: Arc<Mutex<Vec<SkippedImage>>>,
    pub progress: Option<ProgressBar>,
}

impl PipelineContext {
    pub fn new(tools: ImageTools, tuning: PipelineTuning) -> Self {
        Self {
            tools,
            tuning,
            first_error: Arc::new(Mutex::new(None)),
            skipped: Arc::new(Mutex::new(Vec::new())),
            progress: None,
        }
    }

    /// Record a fatal error unless one is already there.
    pub fn record_fatal(&self, stage: &str, err: PipelineError) {
        log::debug!("{stage} stage: fatal: {err}");
        let mut slot = self.first_error.lock().unwrap_or_else(|p| p.into_inner());
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    /// Note an image that will not appear in the gallery.
    pub fn record_skip(&self, path: &str, stage: SkipStage, reason: String) {
        log::warn!("skipping {path} ({stage}): {reason}");
        self.skipped
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(SkippedImage {
                path: path.to_string(),
                stage,
                reason,
            });
    }

    pub fn take_first_error(&self) -> Option<PipelineError> {
        self.first_error
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take()
    }

    pub fn take_skipped(&self) -> Vec<SkippedImage> {
        std::mem::take(&mut *self.skipped.lock().unwrap_or_else(|p| p.into_inner()))
    }
}
