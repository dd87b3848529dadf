// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 Trust Store for XML Digital Signatures
//!
//! A no_std-compatible certificate store that finds and verifies signer
//! certificates named by signed-document key information.
//! Uses `der` for ASN.1 parsing and optional crypto backends for signature checks.
//!
//! # Features
//! - Parse X.509 certificates and CRLs from DER/PEM
//! - Parse and compare RFC 4514-style distinguished names, order-independent
//! - Find certificates by subject, issuer and serial, or subject key identifier
//! - CRL revocation checks and certificate path validation
//! - Trust anchors loaded from PEM bundles, files or directories (`std`)
//!
//! # Example
//! ```no_run
//! use dsig_x509::matcher::{find_certificate, CertQuery};
//! use dsig_x509::Certificate;
//!
//! # fn example(cert_der: &[u8]) -> dsig_x509::Result<()> {
//! let pool = [Certificate::from_der(cert_der)?];
//! let query = CertQuery::new().issuer_serial("CN=Test Root CA,O=Dsig Test,C=US", "4097")?;
//! let _ = find_certificate(&pool, &query);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod certificate;
pub mod chain;
pub mod crl;
pub mod crypto_backend;
pub mod error;
pub mod matcher;
pub mod revocation;
pub mod store;
pub mod time;
pub mod x509;

pub use certificate::dn::{compare as compare_names, DistinguishedName};
pub use certificate::Certificate;
pub use chain::{
    CertificateChain, ChainValidator, PathFailure, PathOutcome, ValidationErrorCode,
    ValidationParams,
};
pub use crl::CertificateRevocationList;
pub use error::{Error, ErrorKind, Result};
pub use matcher::{find_certificate, CertQuery};
pub use revocation::{check_certificate, RevocationStatus};
pub use store::{CertKind, StoreState, TrustStore, Verification, VerifyFailure, VerifyOptions};
pub use time::Time;
pub use x509::extensions::{BasicConstraints, Extension, Extensions, KeyUsage};
pub use x509::Validator;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::store::{CertKind, TrustStore, Verification, VerifyOptions};
    pub use crate::{CertQuery, Certificate, CertificateRevocationList, Error, ErrorKind, Result};
}
