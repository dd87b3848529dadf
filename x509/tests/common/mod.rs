// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![allow(dead_code)]

use std::path::PathBuf;

use dsig_x509::crypto_backend::RingBackend;
use dsig_x509::store::{CertKind, TrustStore, VerifyOptions};
use dsig_x509::{Certificate, CertificateRevocationList, Validator};

/// 2030-01-01T00:00:00Z, inside the validity window of the fixture PKI
pub const JAN_2030: u64 = 1_893_456_000;

pub type RingStore = TrustStore<Validator<RingBackend>>;

pub fn setup_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(name)
}

pub fn read(name: &str) -> Vec<u8> {
    std::fs::read(test_data(name)).unwrap()
}

pub fn cert(name: &str) -> Certificate {
    Certificate::from_der(&read(&format!("{}.der", name))).unwrap()
}

pub fn crl(name: &str) -> CertificateRevocationList {
    CertificateRevocationList::from_der(&read(&format!("{}.der", name))).unwrap()
}

/// Active store with the given trust anchors.
pub fn store_with_anchors(anchors: &[&str]) -> RingStore {
    let mut store = TrustStore::new();
    store.initialize().unwrap();
    for name in anchors {
        store.adopt_certificate(cert(name), CertKind::Trusted).unwrap();
    }
    store
}

pub fn options() -> VerifyOptions {
    VerifyOptions::new().with_verification_time(JAN_2030)
}
