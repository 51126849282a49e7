use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::thread;

use super::channel::record_channel;
use super::consumer::run_consumer;
use super::context::PipelineContext;
use super::error::PipelineError;
use super::producer::run_producer;
use crate::operator::Operator;
use crate::{RunReport, SkipStage, SkippedImage};

/// Result of [`run_pipeline`]: everything produced, plus the first fatal error if any.
/// Entries are returned even when the run failed, so the caller can decide what to keep.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub report: RunReport,
    pub error: Option<PipelineError>,
}

impl PipelineOutcome {
    pub fn into_result(self) -> Result<RunReport, PipelineError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.report),
        }
    }
}

/// Main orchestrator: run producer and consumer concurrently over one record channel.
///
/// inputs → producer (thumbnails) → record channel → consumer (operator edits) → entries.
///
/// Both stages start together, so the consumer drains while the producer pushes and the
/// channel bound never deadlocks the run. Each stage owns its half of the channel: when a
/// stage returns or panics its half is dropped, which closes the stream for the producer's
/// peer (end of stream) or fails the consumer's peer's next push. Neither side can block forever.
pub fn run_pipeline(
    inputs: &[String],
    ctx: &PipelineContext,
    operator: &mut dyn Operator,
) -> PipelineOutcome {
    let (tx, rx) = record_channel(ctx.tuning.channel_capacity);
    let rx = rx.with_limit(inputs.len());

    let (pushed, entries) = thread::scope(|s| {
        let producer = s.spawn(move || run_producer(inputs, tx, ctx));
        let consumer = s.spawn(move || run_consumer(rx, operator, ctx));

        let entries = consumer.join().unwrap_or_else(|_| {
            ctx.record_fatal("consumer", PipelineError::StagePanicked("consumer"));
            Vec::new()
        });
        let pushed = producer.join().unwrap_or_else(|_| {
            ctx.record_fatal("producer", PipelineError::StagePanicked("producer"));
            0
        });
        (pushed, entries)
    });
    debug!(
        "main: both stages joined, {} pushed, {} entries",
        pushed,
        entries.len()
    );

    let mut skipped = ctx.take_skipped();
    sort_by_input_order(&mut skipped, inputs);
    let error = ctx.take_first_error();

    match &error {
        None => check_consumer_accounting(pushed, entries.len(), &skipped),
        Some(e) if e.is_protocol_violation() => {
            error!("record stream corrupted, run aborted: {e}")
        }
        Some(e) => warn!("run aborted: {e}"),
    }

    let report = RunReport {
        input_count: inputs.len(),
        entries,
        skipped,
    };
    if error.is_none() {
        info!(
            "{} of {} images processed, {} skipped",
            report.entry_count(),
            report.input_count,
            report.skipped_count()
        );
    }
    PipelineOutcome { report, error }
}

/// On a clean run every pushed record ends as an entry or a rotate/final skip.
fn check_consumer_accounting(pushed: usize, entries: usize, skipped: &[SkippedImage]) {
    let consumer_skips = skipped
        .iter()
        .filter(|s| s.stage != SkipStage::Thumbnail)
        .count();
    if entries + consumer_skips != pushed {
        warn!(
            "{pushed} records pushed but {entries} entries and {consumer_skips} edit skips accounted for"
        );
    }
    debug_assert_eq!(entries + consumer_skips, pushed, "consumer lost records");
}

/// Both stages append skips as they happen; put them back in input order for reporting.
fn sort_by_input_order(skipped: &mut [SkippedImage], inputs: &[String]) {
    let mut position: HashMap<&str, usize> = HashMap::new();
    for (i, p) in inputs.iter().enumerate() {
        position.entry(p.as_str()).or_insert(i);
    }
    skipped.sort_by_key(|s| position.get(s.path.as_str()).copied().unwrap_or(usize::MAX));
}
