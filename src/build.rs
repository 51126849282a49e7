//! Album build: run the pipeline over a list of images, then write the manifest and summary.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::sync::Arc;

use crate::engine::invoker::{ImageTools, ToolInvoker};
use crate::engine::progress::{finish_progress_bar, thumbnail_bar};
use crate::manifest::{write_html, write_summary};
use crate::operator::Operator;
use crate::pipeline::{PipelineContext, PipelineTuning, run_pipeline};
use crate::{Opts, RunReport};

/// Build the album for `inputs` (already enumerated, in gallery order).
///
/// The manifest is written only for a run that finished without a fatal error. The summary is
/// written either way so failed runs still leave a record of what happened. A manifest write
/// failure is returned but leaves the generated images in place.
pub fn build_album(
    inputs: &[String],
    opts: &Opts,
    operator: &mut dyn Operator,
    invoker: Arc<dyn ToolInvoker>,
) -> Result<RunReport> {
    let tools = ImageTools::new(&opts.resize_program, &opts.rotate_program, invoker);
    let mut ctx = PipelineContext::new(tools, PipelineTuning::from(opts));
    ctx.progress = thumbnail_bar(inputs.len(), opts.verbose, !opts.no_prompt);

    debug!("building album from {} images", inputs.len());
    let outcome = run_pipeline(inputs, &ctx, operator);
    if let Some(pb) = &ctx.progress {
        finish_progress_bar(pb);
    }

    if let Some(summary) = &opts.summary
        && let Err(e) = write_summary(summary, &outcome.report)
    {
        warn!("{e:#}");
    }

    let report = outcome.into_result().context("album pipeline failed")?;
    write_html(&opts.output, &report.entries)?;
    debug!("manifest written to {}", opts.output.display());
    Ok(report)
}
