//! Property-based tests for the commitment scheme
//!
//! Uses proptest to verify determinism and single-field sensitivity.

use proptest::prelude::*;
use zk_poe::AttestationRecord;
use zk_poe::core::services::{CommitmentScheme, Sha256Commitment};

fn record_strategy() -> impl Strategy<Value = AttestationRecord> {
    (
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of("[a-z0-9-]{1,12}"),
        "[a-zA-Z0-9]{1,16}",
        ".{0,32}",
        ".{0,32}",
    )
        .prop_map(|(service_name, pod_name, req_id, input, output)| {
            let mut record = AttestationRecord::bare(req_id, input, output);
            record.service_name = service_name;
            record.pod_name = pod_name;
            record
        })
}

proptest! {
    /// Identical records and secrets always give identical commitments
    #[test]
    fn commitment_is_deterministic(record in record_strategy(), secret in "[a-z]{0,8}") {
        let scheme = Sha256Commitment::new(secret);
        prop_assert_eq!(scheme.commit(&record), scheme.commit(&record.clone()));
    }

    /// Changing the output changes the commitment
    #[test]
    fn commitment_depends_on_output(record in record_strategy(), extra in "[a-z]{1,4}") {
        let scheme = Sha256Commitment::new("k");
        let mut changed = record.clone();
        changed.output.push_str(&extra);
        prop_assert_ne!(scheme.commit(&record), scheme.commit(&changed));
    }

    /// Changing the request id changes the commitment
    #[test]
    fn commitment_depends_on_req_id(record in record_strategy(), extra in "[A-Z]{1,4}") {
        let scheme = Sha256Commitment::new("k");
        let mut changed = record.clone();
        changed.req_id.push_str(&extra);
        prop_assert_ne!(scheme.commit(&record), scheme.commit(&changed));
    }

    /// Changing the secret changes the commitment
    #[test]
    fn commitment_depends_on_secret(record in record_strategy(), a in "[a-z]{1,8}", b in "[0-9]{1,8}") {
        prop_assert_ne!(
            Sha256Commitment::new(a).commit(&record),
            Sha256Commitment::new(b).commit(&record)
        );
    }
}
