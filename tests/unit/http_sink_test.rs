//! Tests for the HTTP sink against real sockets

use std::net::TcpListener;
use std::time::{Duration, Instant};

use zk_poe::adapters::HttpSink;
use zk_poe::core::ports::{AttestationSink, DeliveryError};

use crate::common::{canned_server, full_record, unreachable_url};

#[test]
fn test_2xx_is_delivered() {
    let url = canned_server(200, r#"{"status":"ok"}"#);
    let sink = HttpSink::new(url, Duration::from_secs(2)).unwrap();
    assert!(sink.deliver(&full_record("r1")).is_ok());
}

#[test]
fn test_malformed_2xx_body_still_delivered() {
    let url = canned_server(202, "definitely not a receipt");
    let sink = HttpSink::new(url, Duration::from_secs(2)).unwrap();
    assert!(sink.deliver(&full_record("r1")).is_ok());
}

#[test]
fn test_non_2xx_is_failure_with_excerpt() {
    let url = canned_server(503, "sidecar overloaded");
    let sink = HttpSink::new(url, Duration::from_secs(2)).unwrap();
    match sink.deliver(&full_record("r1")) {
        Err(DeliveryError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "sidecar overloaded");
        },
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn test_connection_refused_is_transport_failure() {
    let sink = HttpSink::new(unreachable_url(), Duration::from_secs(2)).unwrap();
    assert!(matches!(
        sink.deliver(&full_record("r1")),
        Err(DeliveryError::Transport(_) | DeliveryError::Timeout(_))
    ));
}

#[test]
fn test_silent_peer_times_out() {
    // Accepts connections (via the backlog) but never answers
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/prove", listener.local_addr().unwrap());
    let sink = HttpSink::new(url, Duration::from_millis(300)).unwrap();

    let started = Instant::now();
    let result = sink.deliver(&full_record("r1"));
    assert!(matches!(result, Err(DeliveryError::Timeout(300))));
    assert!(started.elapsed() < Duration::from_secs(5));
    drop(listener);
}
