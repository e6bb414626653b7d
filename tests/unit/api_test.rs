//! Tests for the API module
//!
//! Tests error types and the pure handlers without an HTTP server.

use chrono::{TimeZone, Utc};
use zk_poe::api::{self, ApiError, ErrorBody, ErrorCode, INVALID_JSON};
use zk_poe::core::services::{CommitmentService, Sha256Commitment};

fn service() -> CommitmentService {
    CommitmentService::new(Sha256Commitment::new(""), None, None)
}

// =============================================================================
// ERROR TYPES
// =============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::bad_request("x").status_code(), 400);
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::method_not_allowed().status_code(), 405);
        assert_eq!(ApiError::payload_too_large().status_code(), 413);
        assert_eq!(ApiError::internal("x").status_code(), 500);
    }

    #[test]
    fn test_only_405_has_no_body() {
        assert!(!ErrorCode::MethodNotAllowed.has_body());
        assert!(ErrorCode::BadRequest.has_body());
        assert!(ErrorCode::NotFound.has_body());
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_string(&ErrorBody::from(&ApiError::bad_request(INVALID_JSON)))
            .unwrap();
        assert_eq!(body, r#"{"error":"invalid json"}"#);
    }

    #[test]
    fn test_api_error_display() {
        let display = format!("{}", ApiError::not_found("nothing here"));
        assert!(display.contains("NOT_FOUND"));
        assert!(display.contains("nothing here"));
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

mod handler_tests {
    use super::*;

    #[test]
    fn test_health() {
        assert_eq!(
            serde_json::to_string(&api::health()).unwrap(),
            r#"{"status":"ok"}"#
        );
    }

    #[test]
    fn test_prove_minimal_body() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let receipt = api::prove(
            &service(),
            br#"{"req_id":"r1","input":"{}","output":"{}"}"#,
            now,
        )
        .unwrap();
        assert_eq!(receipt.status, "ok");
        assert_eq!(
            receipt.commitment,
            "2c745300430ed8771be5fa72eb0cb2e871c8022b25590181067c4321a5be7dd4"
        );
        assert_eq!(receipt.generated_at, "2025-01-02T03:04:05.000000000Z");
    }

    #[test]
    fn test_prove_rejects_non_json() {
        let err = api::prove(&service(), b"not-json", Utc::now()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message, "invalid json");
    }

    #[test]
    fn test_prove_rejects_missing_required_field() {
        let err = api::prove(&service(), br#"{"req_id":"r1","input":"{}"}"#, Utc::now()).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_prove_accepts_null_optionals_and_jar_digest() {
        let body = br#"{"service_name":null,"jar_sha256":"abc","req_id":"r1","input":"{}","output":"{}"}"#;
        let receipt = api::prove(&service(), body, Utc::now()).unwrap();
        assert_eq!(
            receipt.commitment,
            "2c745300430ed8771be5fa72eb0cb2e871c8022b25590181067c4321a5be7dd4"
        );
    }
}
