//! Album: turn a batch of images into a browsable gallery.
//!
//! Two stages run concurrently over one record channel: the producer builds thumbnails and
//! announces each finished image; the consumer takes them in arrival order, lets the operator
//! rotate and caption each one, and builds the final scaled copy.

pub mod build;
pub mod engine;
pub mod enumerate;
pub mod manifest;
pub mod operator;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use build::build_album;
pub use engine::tools::derive_sibling_path;
pub use pipeline::{PipelineError, record_channel};

/// Result alias used by public album API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
