// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![cfg(feature = "ring-backend")]

mod common;

use common::*;
use dsig_x509::store::{CertKind, Verification};
use dsig_x509::{ErrorKind, ValidationErrorCode};

fn trusted_subject(outcome: &Verification<'_>) -> String {
    match outcome {
        Verification::Trusted(cert) => cert.subject().to_string(),
        Verification::Untrusted(failure) => panic!("expected a trusted leaf, got {}", failure),
    }
}

fn failure_of(outcome: Verification<'_>) -> dsig_x509::VerifyFailure {
    match outcome {
        Verification::Trusted(cert) => panic!("unexpectedly trusted: {}", cert.subject()),
        Verification::Untrusted(failure) => failure,
    }
}

#[test]
fn test_leaf_issued_by_trusted_root() {
    setup_logging();
    let store = store_with_anchors(&["root"]);
    let candidates = [cert("leaf1")];

    let outcome = store.verify(&candidates, &[], &options()).unwrap();
    assert!(std::ptr::eq(outcome.certificate().unwrap(), &candidates[0]));
}

#[test]
fn test_intermediate_from_candidates_or_pool() {
    setup_logging();
    let store = store_with_anchors(&["root"]);
    let candidates = [cert("intermediate"), cert("leaf2")];
    let outcome = store.verify(&candidates, &[], &options()).unwrap();
    assert!(trusted_subject(&outcome).contains("Smith, John"));

    let mut store = store_with_anchors(&["root"]);
    store
        .adopt_certificate(cert("intermediate"), CertKind::Untrusted)
        .unwrap();
    let candidates = [cert("leaf2")];
    let outcome = store.verify(&candidates, &[], &options()).unwrap();
    assert!(std::ptr::eq(outcome.certificate().unwrap(), &candidates[0]));
}

#[test]
fn test_missing_intermediate() {
    setup_logging();
    let store = store_with_anchors(&["root"]);
    let candidates = [cert("leaf2")];
    let failure = failure_of(store.verify(&candidates, &[], &options()).unwrap());
    assert_eq!(failure.kind, ErrorKind::CertIssuerNotFound);
    assert_eq!(
        failure.code,
        Some(ValidationErrorCode::UnableToGetIssuerCertLocally)
    );
    assert!(failure.subject.contains("Smith, John"));
    assert!(failure.issuer.contains("Test Intermediate CA"));
}

#[test]
fn test_validity_window() {
    setup_logging();
    let store = store_with_anchors(&["root"]);

    let candidates = [cert("expired")];
    let failure = failure_of(store.verify(&candidates, &[], &options()).unwrap());
    assert_eq!(failure.kind, ErrorKind::CertExpired);

    let candidates = [cert("future")];
    let failure = failure_of(store.verify(&candidates, &[], &options()).unwrap());
    assert_eq!(failure.kind, ErrorKind::CertNotYetValid);
}

#[test]
fn test_chain_depth_limit() {
    setup_logging();
    let store = store_with_anchors(&["root"]);
    let candidates = [cert("leaf2"), cert("intermediate")];

    let failure = failure_of(
        store
            .verify(&candidates, &[], &options().with_max_depth(0))
            .unwrap(),
    );
    assert_eq!(failure.code, Some(ValidationErrorCode::CertChainTooLong));
    assert_eq!(failure.kind, ErrorKind::CertVerifyFailed);

    let outcome = store
        .verify(&candidates, &[], &options().with_max_depth(1))
        .unwrap();
    assert!(outcome.is_trusted());

    // Neither the leaf nor the anchor counts towards the depth.
    let candidates = [cert("leaf1")];
    let outcome = store
        .verify(&candidates, &[], &options().with_max_depth(0))
        .unwrap();
    assert!(outcome.is_trusted());
}

#[test]
fn test_store_crl_revokes_leaf() {
    setup_logging();
    let mut store = store_with_anchors(&["root"]);
    store.adopt_crl(crl("root_crl")).unwrap();

    let candidates = [cert("leaf1")];
    let failure = failure_of(store.verify(&candidates, &[], &options()).unwrap());
    assert_eq!(failure.kind, ErrorKind::CertRevoked);
}

#[test]
fn test_request_crl_must_be_authenticated() {
    setup_logging();
    let store = store_with_anchors(&["root"]);
    let candidates = [cert("leaf1")];

    let failure = failure_of(
        store
            .verify(&candidates, &[crl("root_crl")], &options())
            .unwrap(),
    );
    assert_eq!(failure.kind, ErrorKind::CertRevoked);

    // Same revocation entry, broken signature: the CRL is ignored.
    let outcome = store
        .verify(&candidates, &[crl("forged_crl")], &options())
        .unwrap();
    assert!(outcome.is_trusted());

    // No trusted certificate names the CRL issuer.
    let store = store_with_anchors(&["other_root"]);
    let failure = failure_of(
        store
            .verify(&candidates, &[crl("root_crl")], &options())
            .unwrap(),
    );
    assert_eq!(failure.kind, ErrorKind::CertIssuerNotFound);
}

#[test]
fn test_expired_crl_fails_open() {
    setup_logging();
    let mut store = store_with_anchors(&["root"]);
    store.adopt_crl(crl("root_crl_expired")).unwrap();
    let candidates = [cert("leaf1")];

    let outcome = store.verify(&candidates, &[], &options()).unwrap();
    assert!(outcome.is_trusted());

    // Before its nextUpdate the same CRL is authoritative.
    let failure = failure_of(
        store
            .verify(
                &candidates,
                &[],
                &options().with_verification_time(1_746_057_600), // 2025-05-01
            )
            .unwrap(),
    );
    assert_eq!(failure.kind, ErrorKind::CertRevoked);
}

#[test]
fn test_revoked_candidate_removed_others_remain() {
    setup_logging();
    let mut store = store_with_anchors(&["root"]);
    store.adopt_crl(crl("root_crl")).unwrap();
    store
        .adopt_certificate(cert("intermediate"), CertKind::Untrusted)
        .unwrap();

    let candidates = [cert("leaf1"), cert("leaf2")];
    let outcome = store.verify(&candidates, &[], &options()).unwrap();
    assert!(std::ptr::eq(outcome.certificate().unwrap(), &candidates[1]));
}

#[test]
fn test_first_success_wins() {
    setup_logging();
    let store = store_with_anchors(&["root", "other_root"]);
    let candidates = [cert("other_leaf"), cert("leaf1")];

    let outcome = store.verify(&candidates, &[], &options()).unwrap();
    assert!(std::ptr::eq(outcome.certificate().unwrap(), &candidates[0]));
}

#[test]
fn test_last_failure_is_reported() {
    setup_logging();
    let store = store_with_anchors(&["root"]);

    let candidates = [cert("expired"), cert("other_leaf")];
    let failure = failure_of(store.verify(&candidates, &[], &options()).unwrap());
    assert_eq!(failure.kind, ErrorKind::CertIssuerNotFound);

    let candidates = [cert("other_leaf"), cert("expired")];
    let failure = failure_of(store.verify(&candidates, &[], &options()).unwrap());
    assert_eq!(failure.kind, ErrorKind::CertExpired);
}

#[test]
fn test_only_chain_leaves_are_tried() {
    setup_logging();
    let store = store_with_anchors(&["root"]);
    // Leaf One issued Sub Leaf, so only Sub Leaf is a leaf, and Leaf One
    // is not a CA.
    let candidates = [cert("leaf1"), cert("sub_leaf")];

    let failure = failure_of(store.verify(&candidates, &[], &options()).unwrap());
    assert_eq!(failure.code, Some(ValidationErrorCode::InvalidCa));
    assert_eq!(failure.kind, ErrorKind::CertVerifyFailed);
    assert!(failure.subject.contains("Leaf One"));
}

#[test]
fn test_untrusted_pool_alone() {
    setup_logging();
    let mut store = store_with_anchors(&["root"]);
    let failure = failure_of(store.verify(&[], &[], &options()).unwrap());
    assert_eq!(failure.kind, ErrorKind::CertNotFound);

    store
        .adopt_certificate(cert("leaf1"), CertKind::Untrusted)
        .unwrap();
    let outcome = store.verify(&[], &[], &options()).unwrap();
    assert!(std::ptr::eq(
        outcome.certificate().unwrap(),
        &store.untrusted_certificates()[0]
    ));
}

#[test]
fn test_skip_verification() {
    setup_logging();
    let store = store_with_anchors(&[]);
    let candidates = [cert("other_leaf"), cert("leaf1")];

    let outcome = store
        .verify(&candidates, &[], &options().skip_verification())
        .unwrap();
    assert!(std::ptr::eq(outcome.certificate().unwrap(), &candidates[0]));
}

#[test]
fn test_rsa_chain() {
    setup_logging();
    let store = store_with_anchors(&["rsa_root"]);
    let candidates = [cert("rsa_leaf")];
    let outcome = store.verify(&candidates, &[], &options()).unwrap();
    assert!(trusted_subject(&outcome).contains("RSA Leaf"));
}

#[test]
fn test_unhandled_critical_extension() {
    setup_logging();
    let store = store_with_anchors(&["root"]);
    let candidates = [cert("critical_ext")];
    let failure = failure_of(store.verify(&candidates, &[], &options()).unwrap());
    assert_eq!(
        failure.code,
        Some(ValidationErrorCode::UnhandledCriticalExtension)
    );
}
