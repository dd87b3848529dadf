// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! ECDSA signature transforms over ring with real keys and signatures.

#![cfg(feature = "ring-backend")]

use dsig_transforms::signature::{ECDSA_SHA256, ECDSA_SHA384};
use dsig_transforms::{RingSignatureProvider, SignatureTransform, Transform, TransformStatus};
use std::path::PathBuf;

fn setup_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn read(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

fn run(uri: &str, public_key: &[u8], data: &[u8], signature: &[u8]) -> (bool, TransformStatus) {
    let mut transform =
        SignatureTransform::from_uri(uri, RingSignatureProvider, public_key).unwrap();
    let mut out = Vec::new();
    for chunk in data.chunks(7) {
        transform.execute(chunk, false, &mut out).unwrap();
    }
    transform.execute(&[], true, &mut out).unwrap();
    assert!(out.is_empty());

    let ok = transform.verify(signature).unwrap();
    (ok, transform.status())
}

#[test]
fn test_ecdsa_sha256_p256() {
    setup_logging();
    let data = read("ecdsa_data.xml");
    let key = read("ecdsa_p256_public.bin");
    let sig = read("ecdsa_p256_sig.bin");

    assert_eq!(run(ECDSA_SHA256, &key, &data, &sig), (true, TransformStatus::Finished));

    let mut tampered = data.clone();
    tampered[0] ^= 0x01;
    assert_eq!(run(ECDSA_SHA256, &key, &tampered, &sig), (false, TransformStatus::Failed));

    let mut bad_sig = sig.clone();
    bad_sig[10] ^= 0x80;
    assert_eq!(run(ECDSA_SHA256, &key, &data, &bad_sig), (false, TransformStatus::Failed));
}

#[test]
fn test_ecdsa_sha384_p384() {
    setup_logging();
    let data = read("ecdsa_data.xml");
    let key = read("ecdsa_p384_public.bin");
    let sig = read("ecdsa_p384_sig.bin");

    assert_eq!(run(ECDSA_SHA384, &key, &data, &sig), (true, TransformStatus::Finished));

    let mut tampered = data.clone();
    tampered[0] ^= 0x01;
    assert_eq!(run(ECDSA_SHA384, &key, &tampered, &sig), (false, TransformStatus::Failed));

    // A P-256 signature under the P-384 key.
    let other = read("ecdsa_p256_sig.bin");
    assert_eq!(run(ECDSA_SHA384, &key, &data, &other), (false, TransformStatus::Failed));
}

#[test]
fn test_ecdsa_mixed_curve_is_unsupported() {
    setup_logging();
    let data = read("ecdsa_data.xml");
    let key = read("ecdsa_p384_public.bin");
    let sig = read("ecdsa_p384_sig.bin");

    let mut transform =
        SignatureTransform::from_uri(ECDSA_SHA256, RingSignatureProvider, &key).unwrap();
    let mut out = Vec::new();
    transform.execute(&data, true, &mut out).unwrap();
    assert!(transform.verify(&sig).is_err());
    assert_eq!(transform.status(), TransformStatus::Failed);
}
