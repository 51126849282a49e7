//! Record channel: length-prefixed path records over a bounded in-process byte pipe.
//!
//! Wire format per record: `u32` little-endian payload length, then that many UTF-8 bytes.
//! A zero-length record is a heartbeat and is skipped by [`RecordReceiver::pop`]. Only closing
//! the writer ends the stream.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use std::io::{self, Read, Write};

use super::error::PipelineError;
use crate::utils::config::ChannelConsts;

/// Writing half of the byte pipe. Each `write` call is one chunk; `write` blocks while the pipe is full.
pub struct PipeWriter {
    tx: Sender<Vec<u8>>,
}

/// Reading half of the byte pipe. Returns `Ok(0)` once the writer is gone and all chunks are read.
pub struct PipeReader {
    rx: Receiver<Vec<u8>>,
    chunk: Vec<u8>,
    pos: usize,
}

/// Bounded byte pipe holding at most `capacity` unread chunks.
pub fn byte_pipe(capacity: usize) -> (PipeWriter, PipeReader) {
    let (tx, rx) = bounded::<Vec<u8>>(capacity.max(1));
    (
        PipeWriter { tx },
        PipeReader {
            rx,
            chunk: Vec::new(),
            pos: 0,
        },
    )
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.tx
            .send(buf.to_vec())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "pipe reader gone"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for PipeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pos == self.chunk.len() {
            match self.rx.recv() {
                Ok(chunk) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                Err(_) => return Ok(0),
            }
        }
        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Frame `payload` as one record (length prefix + bytes).
pub fn encode_record(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(ChannelConsts::LEN_PREFIX_BYTES + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Producer side. `close` is idempotent and also runs on drop, so a stage that dies
/// (error or panic) still ends the stream for the consumer.
pub struct RecordSender<W: Write = PipeWriter> {
    writer: Option<W>,
    pushed: usize,
}

impl<W: Write> RecordSender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            pushed: 0,
        }
    }

    /// Send one path. Blocks while the pipe is full. An empty path would read as a heartbeat,
    /// so it is refused with [`PipelineError::EmptyRecord`].
    pub fn push(&mut self, path: &str) -> Result<(), PipelineError> {
        let len = path.len();
        if len == 0 {
            return Err(PipelineError::EmptyRecord);
        }
        if len > ChannelConsts::MAX_RECORD_LEN {
            return Err(PipelineError::RecordTooLong {
                len,
                max: ChannelConsts::MAX_RECORD_LEN,
            });
        }
        self.write_frame(&encode_record(path.as_bytes()))?;
        self.pushed += 1;
        Ok(())
    }

    /// Send a zero-length record. The receiver skips it.
    pub fn heartbeat(&mut self) -> Result<(), PipelineError> {
        self.write_frame(&encode_record(&[]))
    }

    /// End the stream. Never blocks; further pushes fail with [`PipelineError::ChannelClosed`].
    pub fn close(&mut self) {
        if let Some(mut w) = self.writer.take() {
            let _ = w.flush();
            debug!("record channel closed after {} records", self.pushed);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Records pushed so far (heartbeats excluded).
    pub fn pushed(&self) -> usize {
        self.pushed
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), PipelineError> {
        let w = self.writer.as_mut().ok_or(PipelineError::ChannelClosed)?;
        w.write_all(frame).map_err(|_| PipelineError::ChannelClosed)
    }
}

impl<W: Write> Drop for RecordSender<W> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Consumer side. End of stream is sticky: once `pop` returns `Ok(None)` it keeps doing so.
pub struct RecordReceiver<R: Read = PipeReader> {
    reader: R,
    ended: bool,
    limit: Option<usize>,
    received: usize,
}

impl<R: Read> RecordReceiver<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            ended: false,
            limit: None,
            received: 0,
        }
    }

    /// Refuse more than `limit` records ([`PipelineError::TooManyRecords`]).
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn received(&self) -> usize {
        self.received
    }

    /// Next path in push order, `Ok(None)` at end of stream. Blocks until one of those is available.
    pub fn pop(&mut self) -> Result<Option<String>, PipelineError> {
        loop {
            if self.ended {
                return Ok(None);
            }
            let mut header = [0u8; ChannelConsts::LEN_PREFIX_BYTES];
            let got = self.fill(&mut header)?;
            if got == 0 {
                self.ended = true;
                return Ok(None);
            }
            if got < header.len() {
                return Err(PipelineError::TruncatedRecord {
                    expected: header.len(),
                    got,
                });
            }
            let len = u32::from_le_bytes(header) as usize;
            if len == 0 {
                continue;
            }
            if len > ChannelConsts::MAX_RECORD_LEN {
                return Err(PipelineError::RecordTooLong {
                    len,
                    max: ChannelConsts::MAX_RECORD_LEN,
                });
            }
            if let Some(limit) = self.limit
                && self.received >= limit
            {
                return Err(PipelineError::TooManyRecords { limit });
            }
            let mut payload = vec![0u8; len];
            let got = self.fill(&mut payload)?;
            if got < len {
                return Err(PipelineError::TruncatedRecord { expected: len, got });
            }
            self.received += 1;
            return String::from_utf8(payload)
                .map(Some)
                .map_err(|_| PipelineError::InvalidUtf8);
        }
    }

    /// Read until `buf` is full or EOF. Returns bytes read.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, PipelineError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => return Err(PipelineError::ChannelClosed),
            }
        }
        Ok(filled)
    }
}

/// One channel instance: sender for the producer, receiver for the consumer.
pub fn record_channel(capacity: usize) -> (RecordSender, RecordReceiver) {
    let (w, r) = byte_pipe(capacity);
    (RecordSender::new(w), RecordReceiver::new(r))
}
