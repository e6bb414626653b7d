//! Tests for commitment derivation and receipts

use chrono::{Duration, TimeZone, Utc};
use zk_poe::AttestationRecord;
use zk_poe::core::services::{
    CommitmentScheme, CommitmentService, Sha256Commitment, derive_proof_id, sha256_hex,
};

use crate::common::full_record;

#[test]
fn test_sha256_hex_known_vector() {
    assert_eq!(
        sha256_hex("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_commitment_with_secret_matches_manual_join() {
    let record = full_record("r7");
    let expected = sha256_hex(
        "payment|sock-shop|payment-6f7c9|0b3c1d2e|sha256:1111|1.2.3|abcdef|r7|\
         {\"amount\":42}|{\"authorised\":true}|s3cret",
    );
    assert_eq!(Sha256Commitment::new("s3cret").commit(&record), expected);
}

#[test]
fn test_absent_and_empty_fields_commit_alike() {
    let absent = AttestationRecord::bare("r1", "in", "out");
    let mut empty = absent.clone();
    empty.pod_name = Some(String::new());
    let scheme = Sha256Commitment::new("k");
    assert_eq!(scheme.commit(&absent), scheme.commit(&empty));
}

#[test]
fn test_proof_id_is_deterministic_for_fixed_time() {
    let a = derive_proof_id("payment", "r1", "c0ffee", 1_700_000_000_000_000_000);
    let b = derive_proof_id("payment", "r1", "c0ffee", 1_700_000_000_000_000_000);
    let c = derive_proof_id("payment", "r1", "c0ffee", 1_700_000_000_000_000_001);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a, sha256_hex("payment|r1|c0ffee|1700000000000000000"));
}

#[test]
fn test_repeated_prove_same_commitment_new_proof_id() {
    let service = CommitmentService::new(Sha256Commitment::new("k"), None, None);
    let record = full_record("r1");
    let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

    let first = service.prove(&record, t0);
    let second = service.prove(&record, t0 + Duration::microseconds(3));
    assert_eq!(first.commitment, second.commitment);
    assert_ne!(first.proof_id, second.proof_id);
    assert_ne!(first.generated_at, second.generated_at);
}

#[test]
fn test_bare_record_gets_valid_receipt() {
    let service = CommitmentService::new(Sha256Commitment::default(), None, None);
    let receipt = service.prove(&AttestationRecord::bare("", "", ""), Utc::now());
    assert_eq!(receipt.status, "ok");
    assert_eq!(receipt.commitment.len(), 64);
    assert_eq!(receipt.proof_id.len(), 64);
    assert!(receipt.generated_at.ends_with('Z'));
}

#[test]
fn test_receipt_json_field_names() {
    let service = CommitmentService::new(Sha256Commitment::default(), None, None);
    let json = serde_json::to_value(service.prove(&full_record("r1"), Utc::now())).unwrap();
    let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        ["commitment", "generated_at", "pod_name", "proof_id", "service_name", "status"]
    );
}
