//! Fatal pipeline errors. Per-image tool failures are not errors; see [`crate::SkippedImage`].

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The other end of the record channel went away while this stage still needed it.
    #[error("record channel closed by peer")]
    ChannelClosed,

    /// End of stream arrived in the middle of a record.
    #[error("truncated record: expected {expected} bytes, got {got}")]
    TruncatedRecord { expected: usize, got: usize },

    #[error("record length {len} exceeds maximum of {max} bytes")]
    RecordTooLong { len: usize, max: usize },

    /// More records arrived than there were input images.
    #[error("received more than {limit} records")]
    TooManyRecords { limit: usize },

    /// Zero-length records are heartbeats; a path must not be empty.
    #[error("cannot send an empty path")]
    EmptyRecord,

    #[error("record payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("{0} stage panicked")]
    StagePanicked(&'static str),

    #[error("operator input failed: {0}")]
    Operator(String),
}

impl PipelineError {
    /// Wire-level violations: the stream cannot be trusted after one of these.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            PipelineError::TruncatedRecord { .. }
                | PipelineError::RecordTooLong { .. }
                | PipelineError::TooManyRecords { .. }
                | PipelineError::InvalidUtf8
        )
    }
}
