//! Thumbnail stage: build each thumbnail in input order and announce the original path downstream.

use log::debug;
use std::io::Write;

use super::channel::RecordSender;
use super::context::PipelineContext;
use crate::SkipStage;
use crate::engine::progress::update_progress_bar;
use crate::engine::tools::derive_sibling_path;
use crate::utils::config::DerivedTags;

/// Run the producer to completion. Returns the number of records pushed.
///
/// An empty path or a failed thumbnail is recorded as skipped and never reaches the consumer.
/// A push failure (consumer gone) is fatal: it is recorded in `ctx` and the loop stops. The
/// channel is closed on every exit path, including unwinding, since `tx` is owned here.
pub fn run_producer<W: Write>(
    inputs: &[String],
    mut tx: RecordSender<W>,
    ctx: &PipelineContext,
) -> usize {
    debug!("producer: running over {} images", inputs.len());
    for path in inputs {
        let built = if path.is_empty() {
            Err("empty path".to_string())
        } else {
            let thumbnail = derive_sibling_path(path, DerivedTags::THUMBNAIL);
            debug!("producer: invoking resizer for {path} -> {thumbnail}");
            ctx.tools
                .resize(ctx.tuning.thumbnail_percent, path, &thumbnail)
                .map_err(|failure| failure.reason())
        };
        if let Some(pb) = &ctx.progress {
            update_progress_bar(pb, 1);
        }
        match built {
            Ok(()) => {
                if let Err(e) = tx.push(path) {
                    ctx.record_fatal("producer", e);
                    break;
                }
                debug!("producer: pushed {path}");
            }
            Err(reason) => ctx.record_skip(path, SkipStage::Thumbnail, reason),
        }
    }
    debug!("producer: draining");
    tx.close();
    tx.pushed()
}
