//! Pipeline components: record channel, producer and consumer stages, orchestration.

pub mod channel;
pub mod consumer;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod producer;

pub use channel::{
    PipeReader, PipeWriter, RecordReceiver, RecordSender, byte_pipe, encode_record,
    record_channel,
};
pub use consumer::{edit_image, run_consumer};
pub use context::{PipelineContext, PipelineTuning};
pub use error::PipelineError;
pub use orchestrator::{PipelineOutcome, run_pipeline};
pub use producer::run_producer;
