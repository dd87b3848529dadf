// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Default [`ChainValidator`]: path building and RFC 5280 path checks.
//!
//! A path is built upward from the leaf, preferring trust anchors over pool
//! certificates at every step, until a certificate that is itself an anchor
//! is reached. The path is then checked the way OpenSSL does it: extension
//! and CA constraints bottom-up, then signatures and validity top-down.

extern crate alloc;

use alloc::vec::Vec;

use crate::certificate::dn::names_equal;
use crate::certificate::{Certificate, Version};
use crate::chain::{
    CertificateChain, ChainValidator, PathFailure, PathOutcome, ValidationErrorCode,
    ValidationParams,
};
use crate::crl::CertificateRevocationList;
#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;
use crate::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use crate::error::{Error, Result, TimeError};
use crate::x509::extensions::{
    BasicConstraints, KeyUsage, BASIC_CONSTRAINTS, KEY_USAGE, KNOWN_EXTENSIONS,
};

/// Certificate path validator.
#[derive(Debug, Clone, Default)]
pub struct Validator<B: CryptoBackend> {
    backend: B,
}

#[cfg(feature = "ring-backend")]
impl Validator<RingBackend> {
    /// Create a new Validator with the Ring backend
    pub fn new() -> Self {
        Self::with_backend(RingBackend)
    }
}

impl<B: CryptoBackend> Validator<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Verify certificate signature against issuer's public key.
    pub fn verify_signature(&self, cert: &Certificate, issuer: &Certificate) -> Result<()> {
        let sig_algo = SignatureAlgorithm::for_signer(
            cert.signature_algorithm(),
            issuer.subject_public_key_info(),
        )?;
        log::trace!(
            "verify_signature: {:?}, tbs {} bytes, signature {} bytes",
            sig_algo,
            cert.tbs_der().len(),
            cert.signature_bytes().len()
        );

        self.backend.verify_signature(
            sig_algo,
            cert.tbs_der(),
            cert.signature_bytes(),
            issuer.public_key_bytes(),
        )
    }

    /// Walk from `leaf` to an anchor. Returned path is leaf first.
    fn build_path<'a>(
        &self,
        leaf: &'a Certificate,
        pool: &[&'a Certificate],
        anchors: &'a [Certificate],
        max_depth: usize,
    ) -> core::result::Result<Vec<&'a Certificate>, PathFailure> {
        let mut path: Vec<&'a Certificate> = alloc::vec![leaf];

        loop {
            let current = path[path.len() - 1];
            if anchors.iter().any(|anchor| anchor == current) {
                log::trace!("build_path: reached anchor {}", current.subject());
                return Ok(path);
            }

            if current.is_self_issued() {
                let code = if path.len() == 1 {
                    ValidationErrorCode::DepthZeroSelfSignedCert
                } else {
                    ValidationErrorCode::SelfSignedCertInChain
                };
                return Err(PathFailure::new(code, current));
            }

            // `current` is an intermediate here; the leaf and anchor are not counted.
            if path.len() - 1 > max_depth {
                return Err(PathFailure::new(
                    ValidationErrorCode::CertChainTooLong,
                    current,
                ));
            }

            let issuer = self
                .find_issuer(current, anchors.iter(), &path)
                .or_else(|| self.find_issuer(current, pool.iter().copied(), &path));

            match issuer {
                Some(issuer) => {
                    log::trace!(
                        "build_path: {} issued by {}",
                        current.subject(),
                        issuer.subject()
                    );
                    path.push(issuer);
                }
                None => {
                    let code = if path.len() == 1 {
                        ValidationErrorCode::UnableToGetIssuerCertLocally
                    } else {
                        ValidationErrorCode::UnableToGetIssuerCert
                    };
                    return Err(PathFailure::new(code, current));
                }
            }
        }
    }

    /// First candidate whose subject names `cert`'s issuer and whose key
    /// verifies `cert`; failing that, the first name match.
    fn find_issuer<'a, I>(
        &self,
        cert: &Certificate,
        candidates: I,
        path: &[&Certificate],
    ) -> Option<&'a Certificate>
    where
        I: Iterator<Item = &'a Certificate>,
    {
        let mut fallback = None;
        for candidate in candidates {
            if path.iter().any(|p| *p == candidate)
                || !names_equal(candidate.subject(), cert.issuer())
            {
                continue;
            }
            if self.verify_signature(cert, candidate).is_ok() {
                return Some(candidate);
            }
            if fallback.is_none() {
                fallback = Some(candidate);
            }
        }
        fallback
    }

    /// Extension and CA checks, leaf upward.
    fn check_constraints(&self, path: &[&Certificate]) -> core::result::Result<(), PathFailure> {
        for (idx, cert) in path.iter().enumerate() {
            if let Some(exts) = cert.extensions() {
                if let Some(ext) = exts
                    .iter()
                    .find(|e| e.critical && !KNOWN_EXTENSIONS.contains(&e.extn_id))
                {
                    log::debug!(
                        "unhandled critical extension {} in {}",
                        ext.extn_id,
                        cert.subject()
                    );
                    return Err(PathFailure::new(
                        ValidationErrorCode::UnhandledCriticalExtension,
                        cert,
                    ));
                }
            }

            if idx == 0 {
                continue;
            }

            // Every certificate above the leaf acts as a CA.
            let bc = match cert.find_extension(&BASIC_CONSTRAINTS) {
                Some(ext) => BasicConstraints::from_extension(ext)
                    .map_err(|_| PathFailure::new(ValidationErrorCode::InvalidCa, cert))?,
                // v1 roots predate extensions and are accepted as CAs
                None if cert.version() == Version::V1 => BasicConstraints {
                    ca: true,
                    path_len_constraint: None,
                },
                None => return Err(PathFailure::new(ValidationErrorCode::InvalidCa, cert)),
            };
            if !bc.ca {
                return Err(PathFailure::new(ValidationErrorCode::InvalidCa, cert));
            }

            // Intermediates strictly between this CA and the leaf.
            let below = idx - 1;
            if let Some(path_len) = bc.path_len_constraint {
                if below > path_len as usize {
                    return Err(PathFailure::new(
                        ValidationErrorCode::PathLengthExceeded,
                        cert,
                    ));
                }
            }

            if let Some(ext) = cert.find_extension(&KEY_USAGE) {
                let ku = KeyUsage::from_extension(ext)
                    .map_err(|_| PathFailure::new(ValidationErrorCode::InvalidCa, cert))?;
                if !ku.has(KeyUsage::KEY_CERT_SIGN) {
                    return Err(PathFailure::new(
                        ValidationErrorCode::KeyUsageNoCertSign,
                        cert,
                    ));
                }
            }
        }
        Ok(())
    }

    /// Signatures and validity, anchor downward.
    fn check_signatures_and_time(
        &self,
        path: &[&Certificate],
        params: &ValidationParams,
    ) -> core::result::Result<(), PathFailure> {
        for idx in (0..path.len()).rev() {
            let cert = path[idx];

            // The anchor's own signature is not checked; it is trusted as-is.
            if let Some(issuer) = path.get(idx + 1) {
                if let Err(e) = self.verify_signature(cert, issuer) {
                    let code = match e {
                        Error::AlgorithmError(_) => {
                            ValidationErrorCode::UnableToDecodeIssuerPublicKey
                        }
                        _ => ValidationErrorCode::CertSignatureFailure,
                    };
                    return Err(PathFailure::new(code, cert));
                }
            }

            if let Err(e) = cert.validity().check_at(&params.time) {
                let code = match e {
                    Error::TimeError(TimeError::NotYetValid) => {
                        ValidationErrorCode::CertNotYetValid
                    }
                    _ => ValidationErrorCode::CertHasExpired,
                };
                return Err(PathFailure::new(code, cert));
            }
        }
        Ok(())
    }
}

impl<B: CryptoBackend> ChainValidator for Validator<B> {
    fn validate_path(
        &self,
        leaf: &Certificate,
        pool: &[&Certificate],
        anchors: &[Certificate],
        params: &ValidationParams,
    ) -> Result<PathOutcome> {
        log::trace!(
            "validate_path: leaf={}, pool={}, anchors={}",
            leaf.subject(),
            pool.len(),
            anchors.len()
        );

        let checked = self
            .build_path(leaf, pool, anchors, params.max_depth)
            .and_then(|path| {
                self.check_constraints(&path)?;
                self.check_signatures_and_time(&path, params)?;
                Ok(path)
            });

        match checked {
            Ok(path) => {
                let chain = CertificateChain::new(path.into_iter().cloned().collect());
                Ok(PathOutcome::Valid(chain))
            }
            Err(failure) => {
                log::debug!("validate_path: {}", failure);
                Ok(PathOutcome::Invalid(failure))
            }
        }
    }

    fn verify_crl(&self, crl: &CertificateRevocationList, issuer: &Certificate) -> Result<()> {
        let sig_algo = SignatureAlgorithm::for_signer(
            crl.signature_algorithm(),
            issuer.subject_public_key_info(),
        )?;
        self.backend.verify_signature(
            sig_algo,
            crl.tbs_der(),
            crl.signature_bytes(),
            issuer.public_key_bytes(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(all(test, feature = "ring-backend"))]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::time::Time;
    use alloc::vec;

    // 2030-01-01T00:00:00Z
    const JAN_2030: u64 = 1_893_456_000;

    fn load(der: &[u8]) -> Certificate {
        Certificate::from_der(der).unwrap()
    }

    fn root() -> Certificate {
        load(include_bytes!("../../test_data/root.der"))
    }

    fn intermediate() -> Certificate {
        load(include_bytes!("../../test_data/intermediate.der"))
    }

    fn params() -> ValidationParams {
        ValidationParams {
            time: Time::from_unix_secs(JAN_2030).unwrap(),
            max_depth: 9,
        }
    }

    fn failure_code(outcome: PathOutcome) -> ValidationErrorCode {
        match outcome {
            PathOutcome::Invalid(failure) => failure.code,
            PathOutcome::Valid(chain) => panic!("unexpected valid chain of {}", chain.len()),
        }
    }

    #[test]
    fn test_leaf_under_root() {
        let leaf = load(include_bytes!("../../test_data/leaf1.der"));
        let anchors = vec![root()];
        let outcome = Validator::new()
            .validate_path(&leaf, &[], &anchors, &params())
            .unwrap();
        match outcome {
            PathOutcome::Valid(chain) => {
                assert_eq!(chain.len(), 2);
                assert_eq!(chain.leaf(), Some(&leaf));
                assert_eq!(chain.root(), Some(&anchors[0]));
            }
            PathOutcome::Invalid(f) => panic!("{}", f),
        }
    }

    #[test]
    fn test_intermediate_from_pool() {
        let leaf = load(include_bytes!("../../test_data/leaf2.der"));
        let inter = intermediate();
        let anchors = vec![root()];
        let validator = Validator::new();

        let outcome = validator
            .validate_path(&leaf, &[&inter], &anchors, &params())
            .unwrap();
        assert!(outcome.is_valid());

        let outcome = validator.validate_path(&leaf, &[], &anchors, &params()).unwrap();
        assert_eq!(
            failure_code(outcome),
            ValidationErrorCode::UnableToGetIssuerCertLocally
        );
    }

    #[test]
    fn test_depth_limit() {
        let leaf = load(include_bytes!("../../test_data/leaf2.der"));
        let inter = intermediate();
        let anchors = vec![root()];
        let validator = Validator::new();
        let depth = |max_depth| ValidationParams {
            max_depth,
            ..params()
        };

        let outcome = validator
            .validate_path(&leaf, &[&inter], &anchors, &depth(0))
            .unwrap();
        match outcome {
            PathOutcome::Invalid(failure) => {
                assert_eq!(failure.code, ValidationErrorCode::CertChainTooLong);
                assert!(failure.subject.contains("Test Intermediate CA"));
            }
            PathOutcome::Valid(_) => panic!("one intermediate exceeds depth 0"),
        }

        let outcome = validator
            .validate_path(&leaf, &[&inter], &anchors, &depth(1))
            .unwrap();
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_depth_zero_direct_issuance() {
        let leaf = load(include_bytes!("../../test_data/leaf1.der"));
        let anchors = vec![root()];
        let shallow = ValidationParams {
            max_depth: 0,
            ..params()
        };
        let outcome = Validator::new()
            .validate_path(&leaf, &[], &anchors, &shallow)
            .unwrap();
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_untrusted_self_signed() {
        let other_root = load(include_bytes!("../../test_data/other_root.der"));
        let anchors = vec![root()];
        let outcome = Validator::new()
            .validate_path(&other_root, &[], &anchors, &params())
            .unwrap();
        assert_eq!(
            failure_code(outcome),
            ValidationErrorCode::DepthZeroSelfSignedCert
        );

        let other_leaf = load(include_bytes!("../../test_data/other_leaf.der"));
        let outcome = Validator::new()
            .validate_path(&other_leaf, &[&other_root], &anchors, &params())
            .unwrap();
        assert_eq!(
            failure_code(outcome),
            ValidationErrorCode::SelfSignedCertInChain
        );
    }

    #[test]
    fn test_validity_window() {
        let anchors = vec![root()];
        let validator = Validator::new();

        let expired = load(include_bytes!("../../test_data/expired.der"));
        let outcome = validator.validate_path(&expired, &[], &anchors, &params()).unwrap();
        assert_eq!(failure_code(outcome), ValidationErrorCode::CertHasExpired);

        let future = load(include_bytes!("../../test_data/future.der"));
        let outcome = validator.validate_path(&future, &[], &anchors, &params()).unwrap();
        let code = failure_code(outcome);
        assert_eq!(code, ValidationErrorCode::CertNotYetValid);
        assert_eq!(code.kind(), ErrorKind::CertNotYetValid);
    }

    #[test]
    fn test_critical_extension_rejected() {
        let cert = load(include_bytes!("../../test_data/critical_ext.der"));
        let anchors = vec![root()];
        let outcome = Validator::new()
            .validate_path(&cert, &[], &anchors, &params())
            .unwrap();
        assert_eq!(
            failure_code(outcome),
            ValidationErrorCode::UnhandledCriticalExtension
        );
    }

    #[test]
    fn test_end_entity_cannot_issue() {
        // Sub Leaf is signed by Leaf One, which is CA:FALSE.
        let sub_leaf = load(include_bytes!("../../test_data/sub_leaf.der"));
        let leaf1 = load(include_bytes!("../../test_data/leaf1.der"));
        let anchors = vec![root()];
        let outcome = Validator::new()
            .validate_path(&sub_leaf, &[&leaf1], &anchors, &params())
            .unwrap();
        assert_eq!(failure_code(outcome), ValidationErrorCode::InvalidCa);
    }

    #[test]
    fn test_verify_crl() {
        let crl = CertificateRevocationList::from_der(include_bytes!(
            "../../test_data/root_crl.der"
        ))
        .unwrap();
        let forged = CertificateRevocationList::from_der(include_bytes!(
            "../../test_data/forged_crl.der"
        ))
        .unwrap();
        let validator = Validator::new();
        assert!(validator.verify_crl(&crl, &root()).is_ok());
        assert!(validator.verify_crl(&forged, &root()).is_err());
        assert!(validator.verify_crl(&crl, &intermediate()).is_err());
    }

    #[test]
    fn test_rsa_chain() {
        let rsa_root = load(include_bytes!("../../test_data/rsa_root.der"));
        let rsa_leaf = load(include_bytes!("../../test_data/rsa_leaf.der"));
        let anchors = vec![rsa_root];
        let outcome = Validator::new()
            .validate_path(&rsa_leaf, &[], &anchors, &params())
            .unwrap();
        assert!(outcome.is_valid());
    }
}
