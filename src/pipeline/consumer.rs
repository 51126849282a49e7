//! Interactive stage: take originals in arrival order, let the operator rotate and caption
//! each one, build the final image, and collect gallery entries.

use log::{debug, info};
use std::io::Read;

use super::channel::RecordReceiver;
use super::context::PipelineContext;
use super::error::PipelineError;
use crate::engine::tools::{derive_sibling_path, truncate_chars};
use crate::operator::Operator;
use crate::utils::config::{DerivedTags, PromptConsts};
use crate::{GalleryEntry, Rotation, SkipStage};

/// Run the consumer until end of stream or a fatal error. Returns the entries built so far,
/// in the order their records arrived. A fatal error is recorded in `ctx`.
pub fn run_consumer<R: Read>(
    mut rx: RecordReceiver<R>,
    operator: &mut dyn Operator,
    ctx: &PipelineContext,
) -> Vec<GalleryEntry> {
    let mut entries = Vec::new();
    loop {
        debug!("consumer: waiting");
        let path = match rx.pop() {
            Ok(Some(p)) => p,
            Ok(None) => break,
            Err(e) => {
                ctx.record_fatal("consumer", e);
                return entries;
            }
        };
        debug!("consumer: editing {path}");
        match edit_image(&path, operator, ctx) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(e) => {
                ctx.record_fatal("consumer", e);
                return entries;
            }
        }
    }
    debug!(
        "consumer: done, {} entries from {} records",
        entries.len(),
        rx.received()
    );
    entries
}

/// Walk one image through rotate / caption / final. `Ok(None)` when a tool failed and the
/// image was skipped.
pub fn edit_image(
    original: &str,
    operator: &mut dyn Operator,
    ctx: &PipelineContext,
) -> Result<Option<GalleryEntry>, PipelineError> {
    let thumbnail = derive_sibling_path(original, DerivedTags::THUMBNAIL);

    let mut source = original.to_string();
    if let Some(rotation) = ask_rotation(original, operator)? {
        let rotated = derive_sibling_path(original, DerivedTags::ROTATED);
        let degrees = rotation.degrees();
        let result = ctx
            .tools
            .rotate(degrees, original, &rotated)
            .and_then(|()| ctx.tools.rotate(degrees, &thumbnail, &thumbnail));
        if let Err(failure) = result {
            ctx.record_skip(original, SkipStage::Rotate, failure.reason());
            return Ok(None);
        }
        info!("rotated {original} by {degrees} degrees");
        source = rotated;
    }

    let caption = ask_caption(original, operator, ctx.tuning.caption_max_len)?;

    let final_path = derive_sibling_path(&source, DerivedTags::FINAL);
    if let Err(failure) = ctx
        .tools
        .resize(ctx.tuning.final_percent, &source, &final_path)
    {
        ctx.record_skip(original, SkipStage::Final, failure.reason());
        return Ok(None);
    }

    Ok(Some(GalleryEntry {
        original: original.to_string(),
        thumbnail,
        final_path,
        caption,
    }))
}

fn prompt(
    operator: &mut dyn Operator,
    message: &str,
    max_len: usize,
) -> Result<String, PipelineError> {
    operator
        .prompt(message, max_len)
        .map_err(|e| PipelineError::Operator(format!("{e:#}")))
}

/// `y`/`yes` asks for a direction; anything else means no rotation. An unrecognised direction
/// is asked again a few times, then the image is left as is.
fn ask_rotation(
    path: &str,
    operator: &mut dyn Operator,
) -> Result<Option<Rotation>, PipelineError> {
    let answer = prompt(
        operator,
        &format!("Rotate {path}? (y/n)"),
        PromptConsts::ANSWER_MAX_LEN,
    )?;
    if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        return Ok(None);
    }
    for _ in 0..PromptConsts::DIRECTION_ATTEMPTS {
        let answer = prompt(
            operator,
            "Direction (r = clockwise, l = counter-clockwise)",
            PromptConsts::ANSWER_MAX_LEN,
        )?;
        if let Some(rotation) = Rotation::from_answer(&answer) {
            return Ok(Some(rotation));
        }
        log::warn!("unrecognised direction {answer:?}");
    }
    log::warn!("no valid direction given, leaving {path} unrotated");
    Ok(None)
}

fn ask_caption(
    path: &str,
    operator: &mut dyn Operator,
    max_len: usize,
) -> Result<String, PipelineError> {
    let mut caption = prompt(operator, &format!("Caption for {path}"), max_len)?;
    if caption.is_empty()
        && let Some(mut default) = operator.default_caption(path)
    {
        truncate_chars(&mut default, max_len);
        caption = default;
    }
    Ok(caption)
}
