//! Integration tests for the crack-core protocol codec.
//!
//! These tests drive complete sessions' worth of records through the public
//! API: byte-level encoding, line decoding, and the async read/write helpers
//! over an in-memory duplex stream.

use crack_core::protocol::messages::{
    AckMessage, AckStatus, JobMessage, MessageType, RegisterMessage, ResultMessage, ResultStatus,
};
use crack_core::{
    decode_message, encode_message, read_message, write_message, Algorithm, Charset, CodecError,
    HashTarget, JobSpec, Message,
};
use tokio::io::{AsyncWriteExt, BufReader};

fn roundtrip(msg: Message) -> Message {
    let bytes = encode_message(&msg).expect("encode must succeed");
    assert_eq!(bytes.last(), Some(&b'\n'), "records end with a newline");
    assert_eq!(
        bytes.iter().filter(|&&b| b == b'\n').count(),
        1,
        "records contain exactly one newline"
    );
    let line = std::str::from_utf8(&bytes).expect("records are UTF-8");
    decode_message(line).expect("decode must succeed")
}

#[test]
fn test_roundtrip_register_message() {
    let original = Message::Register(RegisterMessage {
        worker: "node-7".to_string(),
    });

    assert_eq!(original, roundtrip(original.clone()));
}

#[test]
fn test_roundtrip_ack_error_message() {
    let original = Message::Ack(AckMessage::error("expected REGISTER"));

    assert_eq!(original, roundtrip(original.clone()));
}

#[test]
fn test_roundtrip_job_built_from_job_spec() {
    // Arrange: a job over the full reference charset, which contains both
    // JSON-significant characters (`"` and `\`).
    let spec = JobSpec::new(
        "alice",
        HashTarget::new("$6$saltsalt$digest", Algorithm::Sha512),
        Charset::reference(),
        3,
    )
    .unwrap();
    let original = Message::Job(spec.to_message());

    // Act
    let decoded = roundtrip(original.clone());

    // Assert
    assert_eq!(original, decoded);
    match decoded {
        Message::Job(job) => {
            assert_eq!(job.charset, crack_core::REFERENCE_CHARSET);
            assert_eq!(job.alg, "sha512");
        }
        other => panic!("expected JOB, got {other:?}"),
    }
}

#[test]
fn test_roundtrip_result_with_non_ascii_password() {
    let original = Message::Result(ResultMessage {
        status: ResultStatus::Found,
        password: Some("pä\"ß".to_string()),
        error: None,
        worker_compute_ns: 987_654_321,
    });

    assert_eq!(original, roundtrip(original.clone()));
}

#[test]
fn test_decode_accepts_fields_in_any_order_and_extra_fields() {
    let line = r#"{"password_len":2,"charset":"ab","alg":"md5","full_hash":"$1$s$h","username":"u","type":"JOB","priority":9}"#;

    let decoded = decode_message(line).unwrap();

    assert_eq!(
        decoded,
        Message::Job(JobMessage {
            username: "u".to_string(),
            full_hash: "$1$s$h".to_string(),
            alg: "md5".to_string(),
            charset: "ab".to_string(),
            password_len: 2,
        })
    );
}

#[test]
fn test_decode_distinguishes_unknown_type_from_garbage() {
    assert!(matches!(
        decode_message(r#"{"type":"HELLO"}"#),
        Err(CodecError::UnexpectedType(_))
    ));
    assert!(matches!(
        decode_message("this is not json"),
        Err(CodecError::MalformedRecord(_))
    ));
    assert!(matches!(
        decode_message(r#"{"status":"OK"}"#),
        Err(CodecError::MalformedRecord(_))
    ));
}

#[tokio::test]
async fn test_full_exchange_over_duplex_stream() {
    // Arrange: the worker end writes REGISTER then RESULT, the controller end
    // writes ACK then JOB.
    let (worker_end, controller_end) = tokio::io::duplex(4096);
    let (w_read, mut w_write) = tokio::io::split(worker_end);
    let (c_read, mut c_write) = tokio::io::split(controller_end);
    let mut w_read = BufReader::new(w_read);
    let mut c_read = BufReader::new(c_read);

    let job = JobMessage {
        username: "alice".to_string(),
        full_hash: "$1$salt$x".to_string(),
        alg: "md5".to_string(),
        charset: "ab".to_string(),
        password_len: 2,
    };

    // Act
    write_message(
        &mut w_write,
        &Message::Register(RegisterMessage {
            worker: "w1".to_string(),
        }),
    )
    .await
    .unwrap();
    let register = read_message(&mut c_read).await.unwrap();

    write_message(&mut c_write, &Message::Ack(AckMessage::ok())).await.unwrap();
    let ack = read_message(&mut w_read).await.unwrap();

    write_message(&mut c_write, &Message::Job(job.clone())).await.unwrap();
    let received_job = read_message(&mut w_read).await.unwrap();

    write_message(
        &mut w_write,
        &Message::Result(ResultMessage {
            status: ResultStatus::NotFound,
            password: None,
            error: None,
            worker_compute_ns: 42,
        }),
    )
    .await
    .unwrap();
    let result = read_message(&mut c_read).await.unwrap();

    // Assert
    assert_eq!(register.message_type(), MessageType::Register);
    assert!(matches!(ack, Message::Ack(AckMessage { status: AckStatus::Ok, .. })));
    assert_eq!(received_job, Message::Job(job));
    match result {
        Message::Result(r) => {
            assert_eq!(r.status, ResultStatus::NotFound);
            assert_eq!(r.worker_compute_ns, 42);
        }
        other => panic!("expected RESULT, got {other:?}"),
    }
}

#[tokio::test]
async fn test_peer_closing_mid_record_is_stream_closed() {
    // Arrange: half a record, then EOF.
    let (mut writer, reader) = tokio::io::duplex(256);
    writer.write_all(br#"{"type":"ACK","sta"#).await.unwrap();
    drop(writer);
    let mut reader = BufReader::new(reader);

    // Act
    let result = read_message(&mut reader).await;

    // Assert
    assert!(matches!(result, Err(CodecError::StreamClosed)));
}
