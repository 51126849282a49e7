//! Public and internal types for the album API and pipeline.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::utils::config::{ChannelConsts, PackagePaths, PromptConsts, ToolDefaults};

/// One fully processed image: where it came from, its thumbnail, its final scaled copy and caption.
///
/// Built once by the consumer stage and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GalleryEntry {
    pub original: String,
    pub thumbnail: String,
    /// Derived from the rotated copy when the operator rotated the image, otherwise from the original.
    #[serde(rename = "final")]
    pub final_path: String,
    pub caption: String,
}

/// Which step failed for an image that did not make it into the gallery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipStage {
    Thumbnail,
    Rotate,
    Final,
}

impl fmt::Display for SkipStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipStage::Thumbnail => "thumbnail",
            SkipStage::Rotate => "rotate",
            SkipStage::Final => "final",
        };
        f.write_str(s)
    }
}

/// An image left out of the gallery, with the stage and reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedImage {
    pub path: String,
    pub stage: SkipStage,
    pub reason: String,
}

/// Outcome of a whole batch: ordered gallery entries plus everything that was skipped.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    pub input_count: usize,
    pub entries: Vec<GalleryEntry>,
    pub skipped: Vec<SkippedImage>,
}

impl RunReport {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Direction the operator asked for. Each maps to a fixed signed quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    pub const MAGNITUDE_DEGREES: i32 = 90;

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Clockwise => Self::MAGNITUDE_DEGREES,
            Rotation::CounterClockwise => -Self::MAGNITUDE_DEGREES,
        }
    }

    /// `r` is clockwise, `l` is counter-clockwise. Case-insensitive, surrounding whitespace ignored.
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "r" | "right" | "cw" => Some(Rotation::Clockwise),
            "l" | "left" | "ccw" => Some(Rotation::CounterClockwise),
            _ => None,
        }
    }
}

/// Full options for a run (CLI, `.album.toml` and library callers).
#[derive(Clone, Debug)]
pub struct Opts {
    /// Scale for thumbnails, in percent of the source.
    pub thumbnail_percent: u32,
    /// Scale for the final gallery image, in percent of the source (or rotated copy).
    pub final_percent: u32,
    /// Executable used for resizing.
    pub resize_program: String,
    /// Executable used for rotating.
    pub rotate_program: String,
    /// Longest caption accepted; longer input is truncated with a warning.
    pub caption_max_len: usize,
    /// Capacity of the byte pipe between the stages, in chunks.
    pub channel_capacity: usize,
    /// HTML manifest path. Overwritten each run.
    pub output: PathBuf,
    /// JSON run summary path. `None` disables it.
    pub summary: Option<PathBuf>,
    /// Never prompt: no rotation, caption is the file stem.
    pub no_prompt: bool,
    /// Debug logging and progress bar.
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        let paths = PackagePaths::get();
        Self {
            thumbnail_percent: ToolDefaults::THUMBNAIL_PERCENT,
            final_percent: ToolDefaults::FINAL_PERCENT,
            resize_program: ToolDefaults::RESIZE_PROGRAM.to_string(),
            rotate_program: ToolDefaults::ROTATE_PROGRAM.to_string(),
            caption_max_len: PromptConsts::CAPTION_MAX_LEN,
            channel_capacity: ChannelConsts::DEFAULT_CAPACITY,
            output: PathBuf::from(paths.manifest_filename()),
            summary: Some(PathBuf::from(paths.summary_filename())),
            no_prompt: false,
            verbose: false,
        }
    }
}
