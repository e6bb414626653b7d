//! End-to-end tests for the commitment service over HTTP

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;
use zk_poe::adapters::HttpSink;
use zk_poe::api::MetricsData;
use zk_poe::config::ServiceConfig;
use zk_poe::core::ports::AttestationSink;
use zk_poe::core::services::sha256_hex;
use zk_poe::server::{CommitmentServer, RunningServer};
use zk_poe::{AttestationRecord, CommitmentReceipt};

fn start(config: ServiceConfig) -> RunningServer {
    CommitmentServer::bind(&ServiceConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        ..config
    })
    .unwrap()
    .start()
    .unwrap()
}

fn client() -> Client {
    Client::builder().timeout(Duration::from_secs(5)).build().unwrap()
}

#[test]
fn test_minimal_prove_without_secret() {
    let server = start(ServiceConfig::default());
    let response = client()
        .post(format!("{}/prove", server.url()))
        .header("content-type", "application/json")
        .body(r#"{"req_id":"r1","input":"{}","output":"{}"}"#)
        .send()
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let receipt: CommitmentReceipt = response.json().unwrap();
    assert_eq!(receipt.status, "ok");
    assert_eq!(receipt.commitment, sha256_hex("|||||||r1|{}|{}|"));
    assert_eq!(receipt.proof_id.len(), 64);
    server.shutdown();
}

#[test]
fn test_invalid_json_is_400() {
    let server = start(ServiceConfig::default());
    let response = client()
        .post(format!("{}/prove", server.url()))
        .body("not-json")
        .send()
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().unwrap(), r#"{"error":"invalid json"}"#);
    server.shutdown();
}

#[test]
fn test_wrong_method_is_405_with_empty_body() {
    let server = start(ServiceConfig::default());
    for request in [
        client().get(format!("{}/prove", server.url())),
        client().put(format!("{}/prove", server.url())),
    ] {
        let response = request.send().unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.text().unwrap().is_empty());
    }
    server.shutdown();
}

#[test]
fn test_health_always_ok() {
    let server = start(ServiceConfig {
        secret: "whatever".into(),
        ..ServiceConfig::default()
    });
    for path in ["/health", "/healthz", "/health?probe=liveness"] {
        let response = client().get(format!("{}{path}", server.url())).send().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().unwrap();
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }
    server.shutdown();
}

#[test]
fn test_unknown_path_is_404() {
    let server = start(ServiceConfig::default());
    let response = client().get(format!("{}/receipts", server.url())).send().unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    server.shutdown();
}

#[test]
fn test_oversized_body_is_413() {
    let server = start(ServiceConfig {
        max_body_bytes: 64,
        ..ServiceConfig::default()
    });
    let record = AttestationRecord::bare("r1", "x".repeat(200), "{}");
    let response = client()
        .post(format!("{}/prove", server.url()))
        .json(&record)
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    server.shutdown();
}

#[test]
fn test_same_body_twice_same_commitment() {
    let server = start(ServiceConfig {
        secret: "s".into(),
        ..ServiceConfig::default()
    });
    let url = format!("{}/prove", server.url());
    let body = r#"{"service_name":"payment","req_id":"r1","input":"1","output":"2"}"#;

    let a: CommitmentReceipt = client().post(&url).body(body).send().unwrap().json().unwrap();
    let b: CommitmentReceipt = client().post(&url).body(body).send().unwrap().json().unwrap();
    assert_eq!(a.commitment, b.commitment);
    assert_ne!(a.proof_id, b.proof_id);
    assert_ne!(a.generated_at, b.generated_at);
    server.shutdown();
}

#[test]
fn test_identity_falls_back_to_service_config() {
    let server = start(ServiceConfig {
        service_name: Some("payment-sidecar".into()),
        pod_name: Some("payment-0".into()),
        ..ServiceConfig::default()
    });
    let receipt: CommitmentReceipt = client()
        .post(format!("{}/prove", server.url()))
        .body(r#"{"req_id":"r1","input":"","output":""}"#)
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(receipt.service_name, "payment-sidecar");
    assert_eq!(receipt.pod_name, "payment-0");
    server.shutdown();
}

#[test]
fn test_http_sink_delivers_to_real_service() {
    let server = start(ServiceConfig::default());
    let sink = HttpSink::new(format!("{}/prove", server.url()), Duration::from_secs(2)).unwrap();
    assert!(sink.deliver(&AttestationRecord::bare("r1", "{}", "{}")).is_ok());
    server.shutdown();
}

#[test]
fn test_metrics_count_prove_results() {
    let server = start(ServiceConfig {
        max_body_bytes: 64,
        ..ServiceConfig::default()
    });
    let http = client();
    let prove = format!("{}/prove", server.url());

    http.post(&prove).body(r#"{"req_id":"r1","input":"{}","output":"{}"}"#).send().unwrap();
    http.post(&prove).body("not-json").send().unwrap();
    http.get(&prove).send().unwrap();
    http.post(&prove).body("x".repeat(200)).send().unwrap();
    http.get(format!("{}/health", server.url())).send().unwrap();

    let response = http.get(format!("{}/metrics", server.url())).send().unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let metrics: MetricsData = response.json().unwrap();
    assert_eq!(
        metrics,
        MetricsData {
            total: 4,
            proved: 1,
            bad_request: 1,
            method_not_allowed: 1,
            too_large: 1,
        }
    );

    let response = http.post(format!("{}/metrics", server.url())).send().unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    server.shutdown();
}
