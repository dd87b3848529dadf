// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate chains and the path-validation capability.
//!
//! The trust store does not build or check paths itself. It hands a leaf,
//! the pool of candidate intermediates and the trust anchors to a
//! [`ChainValidator`] and classifies the structured failure it gets back.
//! [`crate::x509::Validator`] is the default implementation.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::certificate::Certificate;
use crate::crl::CertificateRevocationList;
use crate::error::{ErrorKind, Result};
use crate::time::Time;

// ============================================================================
// Certificate Chain
// ============================================================================

/// A certificate chain, ordered from leaf (end-entity) to root (trust anchor).
#[derive(Debug, Clone)]
pub struct CertificateChain {
    pub certificates: Vec<Certificate>,
}

impl CertificateChain {
    pub fn new(certificates: Vec<Certificate>) -> Self {
        Self { certificates }
    }

    pub fn leaf(&self) -> Option<&Certificate> {
        self.certificates.first()
    }

    /// The trust anchor the path ends in
    pub fn root(&self) -> Option<&Certificate> {
        self.certificates.last()
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Certificate> {
        self.certificates.iter()
    }
}

// ============================================================================
// Validation error codes
// ============================================================================

/// Path-validation failure codes.
///
/// The numeric values are the ones OpenSSL's `X509_V_ERR_*` constants use,
/// so diagnostics read the same as `openssl verify` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ValidationErrorCode {
    Unspecified = 1,
    UnableToGetIssuerCert = 2,
    UnableToDecodeIssuerPublicKey = 6,
    CertSignatureFailure = 7,
    CertNotYetValid = 9,
    CertHasExpired = 10,
    ErrorInCertNotBeforeField = 13,
    ErrorInCertNotAfterField = 14,
    DepthZeroSelfSignedCert = 18,
    SelfSignedCertInChain = 19,
    UnableToGetIssuerCertLocally = 20,
    CertChainTooLong = 22,
    CertRevoked = 23,
    InvalidCa = 24,
    PathLengthExceeded = 25,
    KeyUsageNoCertSign = 32,
    UnhandledCriticalExtension = 34,
}

impl ValidationErrorCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        use ValidationErrorCode::*;

        let all = [
            Unspecified,
            UnableToGetIssuerCert,
            UnableToDecodeIssuerPublicKey,
            CertSignatureFailure,
            CertNotYetValid,
            CertHasExpired,
            ErrorInCertNotBeforeField,
            ErrorInCertNotAfterField,
            DepthZeroSelfSignedCert,
            SelfSignedCertInChain,
            UnableToGetIssuerCertLocally,
            CertChainTooLong,
            CertRevoked,
            InvalidCa,
            PathLengthExceeded,
            KeyUsageNoCertSign,
            UnhandledCriticalExtension,
        ];
        all.into_iter().find(|c| c.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified certificate verification error",
            Self::UnableToGetIssuerCert => "unable to get issuer certificate",
            Self::UnableToDecodeIssuerPublicKey => "unable to decode issuer public key",
            Self::CertSignatureFailure => "certificate signature failure",
            Self::CertNotYetValid => "certificate is not yet valid",
            Self::CertHasExpired => "certificate has expired",
            Self::ErrorInCertNotBeforeField => "format error in certificate's notBefore field",
            Self::ErrorInCertNotAfterField => "format error in certificate's notAfter field",
            Self::DepthZeroSelfSignedCert => "self-signed certificate",
            Self::SelfSignedCertInChain => "self-signed certificate in certificate chain",
            Self::UnableToGetIssuerCertLocally => "unable to get local issuer certificate",
            Self::CertChainTooLong => "certificate chain too long",
            Self::CertRevoked => "certificate revoked",
            Self::InvalidCa => "invalid CA certificate",
            Self::PathLengthExceeded => "path length constraint exceeded",
            Self::KeyUsageNoCertSign => "key usage does not include certificate signing",
            Self::UnhandledCriticalExtension => "unhandled critical extension",
        }
    }

    /// Map a validator code onto the caller-facing error kind.
    pub fn classify(code: i32) -> ErrorKind {
        match Self::from_code(code) {
            Some(Self::UnableToGetIssuerCert) | Some(Self::UnableToGetIssuerCertLocally) => {
                ErrorKind::CertIssuerNotFound
            }
            Some(Self::CertNotYetValid) | Some(Self::ErrorInCertNotBeforeField) => {
                ErrorKind::CertNotYetValid
            }
            Some(Self::CertHasExpired) | Some(Self::ErrorInCertNotAfterField) => {
                ErrorKind::CertExpired
            }
            Some(Self::CertRevoked) => ErrorKind::CertRevoked,
            _ => ErrorKind::CertVerifyFailed,
        }
    }

    pub fn kind(self) -> ErrorKind {
        Self::classify(self.code())
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

// ============================================================================
// Path validation outcome
// ============================================================================

/// Why a leaf did not validate, and at which certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFailure {
    pub code: ValidationErrorCode,
    /// Subject of the certificate the failure was detected on
    pub subject: String,
    /// Issuer of that certificate
    pub issuer: String,
}

impl PathFailure {
    pub fn new(code: ValidationErrorCode, cert: &Certificate) -> Self {
        Self {
            code,
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

impl fmt::Display for PathFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; subject={}; issuer={}",
            self.code, self.subject, self.issuer
        )
    }
}

/// Result of one path-validation attempt
#[derive(Debug, Clone)]
pub enum PathOutcome {
    /// A trusted path, leaf first
    Valid(CertificateChain),
    Invalid(PathFailure),
}

impl PathOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, PathOutcome::Valid(_))
    }
}

/// Parameters for one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationParams {
    /// Instant at which validity periods are checked
    pub time: Time,
    /// Maximum number of intermediate CAs between the leaf and the anchor
    pub max_depth: usize,
}

/// Path-validation capability used by the trust store.
///
/// `Err` is reserved for malfunction; a leaf that simply does not chain to
/// an anchor is `Ok(PathOutcome::Invalid(..))`.
pub trait ChainValidator {
    /// Build and check a path from `leaf` through `pool` to one of `anchors`.
    fn validate_path(
        &self,
        leaf: &Certificate,
        pool: &[&Certificate],
        anchors: &[Certificate],
        params: &ValidationParams,
    ) -> Result<PathOutcome>;

    /// Check the CRL signature with `issuer`'s public key.
    fn verify_crl(&self, crl: &CertificateRevocationList, issuer: &Certificate) -> Result<()>;
}
