//! Record channel tests: framing, end of stream, protocol violations, and stage overlap.

use album::pipeline::{PipelineError, RecordReceiver, RecordSender, encode_record, record_channel};
use std::io::Cursor;
use std::thread;
use std::time::Duration;

#[test]
fn test_push_then_pop_round_trips_exact_bytes() {
    let (mut tx, mut rx) = record_channel(4);
    let path = "albums/été 2024/IMG 0001.jpg";
    tx.push(path).unwrap();
    assert_eq!(rx.pop().unwrap().as_deref(), Some(path));
}

#[test]
fn test_fifo_order() {
    let (mut tx, mut rx) = record_channel(16);
    for p in ["c.jpg", "a.jpg", "b.jpg"] {
        tx.push(p).unwrap();
    }
    tx.close();
    let mut got = Vec::new();
    while let Some(p) = rx.pop().unwrap() {
        got.push(p);
    }
    assert_eq!(got, ["c.jpg", "a.jpg", "b.jpg"]);
}

#[test]
fn test_end_of_stream_is_sticky() {
    let (mut tx, mut rx) = record_channel(4);
    tx.close();
    assert_eq!(rx.pop().unwrap(), None);
    assert_eq!(rx.pop().unwrap(), None);
    assert_eq!(rx.pop().unwrap(), None);
}

#[test]
fn test_buffered_records_survive_close() {
    let (mut tx, mut rx) = record_channel(4);
    tx.push("a.jpg").unwrap();
    tx.close();
    assert_eq!(rx.pop().unwrap().as_deref(), Some("a.jpg"));
    assert_eq!(rx.pop().unwrap(), None);
}

#[test]
fn test_close_is_idempotent_and_push_after_close_fails() {
    let (mut tx, mut rx) = record_channel(4);
    tx.close();
    tx.close();
    assert!(tx.is_closed());
    assert_eq!(tx.push("a.jpg"), Err(PipelineError::ChannelClosed));
    assert_eq!(rx.pop().unwrap(), None);
}

#[test]
fn test_drop_closes_stream() {
    let (tx, mut rx) = record_channel(4);
    drop(tx);
    assert_eq!(rx.pop().unwrap(), None);
}

#[test]
fn test_heartbeat_is_skipped_not_end_of_stream() {
    let (mut tx, mut rx) = record_channel(8);
    tx.heartbeat().unwrap();
    tx.push("a.jpg").unwrap();
    tx.heartbeat().unwrap();
    tx.heartbeat().unwrap();
    tx.push("b.jpg").unwrap();
    tx.close();
    assert_eq!(tx.pushed(), 2);
    assert_eq!(rx.pop().unwrap().as_deref(), Some("a.jpg"));
    assert_eq!(rx.pop().unwrap().as_deref(), Some("b.jpg"));
    assert_eq!(rx.pop().unwrap(), None);
}

#[test]
fn test_push_fails_when_receiver_gone() {
    let (mut tx, rx) = record_channel(4);
    drop(rx);
    assert_eq!(tx.push("a.jpg"), Err(PipelineError::ChannelClosed));
}

#[test]
fn test_oversized_push_rejected() {
    let (mut tx, _rx) = record_channel(4);
    let huge = "x".repeat(64 * 1024 + 1);
    assert!(matches!(
        tx.push(&huge),
        Err(PipelineError::RecordTooLong { .. })
    ));
}

#[test]
fn test_empty_path_rejected_not_sent_as_heartbeat() {
    let (mut tx, mut rx) = record_channel(4);
    assert_eq!(tx.push(""), Err(PipelineError::EmptyRecord));
    assert!(!PipelineError::EmptyRecord.is_protocol_violation());
    assert_eq!(tx.pushed(), 0);
    tx.push("b.jpg").unwrap();
    tx.close();
    assert_eq!(rx.pop().unwrap().as_deref(), Some("b.jpg"));
    assert_eq!(rx.pop().unwrap(), None);
}

// --- protocol violations from raw bytes ---

#[test]
fn test_truncated_header() {
    let bytes = vec![3u8, 0];
    let mut rx = RecordReceiver::new(Cursor::new(bytes));
    assert_eq!(
        rx.pop(),
        Err(PipelineError::TruncatedRecord {
            expected: 4,
            got: 2
        })
    );
}

#[test]
fn test_truncated_payload() {
    let mut bytes = encode_record(b"abcdef");
    bytes.truncate(4 + 3);
    let mut rx = RecordReceiver::new(Cursor::new(bytes));
    let err = rx.pop().unwrap_err();
    assert_eq!(
        err,
        PipelineError::TruncatedRecord {
            expected: 6,
            got: 3
        }
    );
    assert!(err.is_protocol_violation());
}

#[test]
fn test_length_over_maximum() {
    let bytes = u32::MAX.to_le_bytes().to_vec();
    let mut rx = RecordReceiver::new(Cursor::new(bytes));
    assert!(matches!(
        rx.pop(),
        Err(PipelineError::RecordTooLong { .. })
    ));
}

#[test]
fn test_invalid_utf8_payload() {
    let bytes = encode_record(&[0xff, 0xfe]);
    let mut rx = RecordReceiver::new(Cursor::new(bytes));
    assert_eq!(rx.pop(), Err(PipelineError::InvalidUtf8));
}

#[test]
fn test_limit_rejects_extra_records() {
    let mut bytes = encode_record(b"a.jpg");
    bytes.extend(encode_record(&[]));
    bytes.extend(encode_record(b"a.jpg"));
    let mut rx = RecordReceiver::new(Cursor::new(bytes)).with_limit(1);
    assert_eq!(rx.pop().unwrap().as_deref(), Some("a.jpg"));
    assert_eq!(rx.pop(), Err(PipelineError::TooManyRecords { limit: 1 }));
}

#[test]
fn test_sender_over_vec_writer_matches_encoding() {
    let mut buf = Vec::new();
    {
        let mut tx = RecordSender::new(&mut buf);
        tx.push("ab").unwrap();
        tx.heartbeat().unwrap();
    }
    assert_eq!(buf, [2, 0, 0, 0, b'a', b'b', 0, 0, 0, 0]);
}

// --- concurrency ---

#[test]
fn test_pop_does_not_wait_for_producer_to_finish() {
    let (mut tx, mut rx) = record_channel(4);
    let (ack_tx, ack_rx) = crossbeam_channel::bounded::<()>(1);
    let producer = thread::spawn(move || {
        tx.push("a.jpg").unwrap();
        // Still open: the consumer must see the record before we close.
        ack_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("consumer did not receive record while producer was running");
        tx.close();
    });
    assert_eq!(rx.pop().unwrap().as_deref(), Some("a.jpg"));
    ack_tx.send(()).unwrap();
    assert_eq!(rx.pop().unwrap(), None);
    producer.join().unwrap();
}

#[test]
fn test_small_buffer_many_records_no_deadlock() {
    let (mut tx, mut rx) = record_channel(1);
    let total = 5_000;
    let producer = thread::spawn(move || {
        for i in 0..total {
            tx.push(&format!("img_{i:05}.jpg")).unwrap();
        }
    });
    let mut count = 0;
    while let Some(p) = rx.pop().unwrap() {
        assert_eq!(p, format!("img_{count:05}.jpg"));
        count += 1;
    }
    producer.join().unwrap();
    assert_eq!(count, total);
}
