// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Trust store: trusted anchors, an untrusted certificate pool and a CRL
//! pool, with lookup and chain verification on top.
//!
//! # Example
//! ```no_run
//! use dsig_x509::store::{TrustStore, Verification, VerifyOptions};
//! use dsig_x509::Certificate;
//!
//! # fn example(root_pem: &str, leaf_der: &[u8]) -> dsig_x509::Result<()> {
//! let mut store = TrustStore::new();
//! store.initialize()?;
//! store.add_trusted_pem(root_pem)?;
//!
//! let leaf = Certificate::from_der(leaf_der)?;
//! let candidates = [leaf];
//! match store.verify(&candidates, &[], &VerifyOptions::default())? {
//!     Verification::Trusted(cert) => println!("trusted: {}", cert.subject()),
//!     Verification::Untrusted(failure) => println!("rejected: {}", failure),
//! }
//! # Ok(())
//! # }
//! ```

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::certificate::dn::names_equal;
use crate::certificate::{self, Certificate};
use crate::chain::{ChainValidator, PathFailure, PathOutcome, ValidationErrorCode, ValidationParams};
use crate::crl::{self, CertificateRevocationList};
use crate::error::{Error, ErrorKind, Result, StoreError};
use crate::matcher::{self, CertQuery};
use crate::revocation::{check_certificate, RevocationStatus};
use crate::time::verification_time;

#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;
#[cfg(feature = "ring-backend")]
use crate::x509::Validator;

/// Default maximum number of issuers above a leaf
pub const DEFAULT_MAX_DEPTH: usize = 9;

/// How an adopted certificate is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertKind {
    /// Trust anchor
    Trusted,
    /// Chain-building material only
    Untrusted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreState {
    #[default]
    Uninitialized,
    Active,
    Closed,
}

/// Options for [`TrustStore::verify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Fixed verification time in seconds since the epoch; `None` uses the
    /// current time
    pub verification_time: Option<u64>,

    /// Maximum number of intermediate CAs between the leaf and the anchor
    pub max_depth: usize,

    /// Accept the first chain leaf without path validation
    pub skip_verification: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            verification_time: None,
            max_depth: DEFAULT_MAX_DEPTH,
            skip_verification: false,
        }
    }
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verification_time(mut self, secs: u64) -> Self {
        self.verification_time = Some(secs);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Trust is asserted out-of-band; skip path validation
    pub fn skip_verification(mut self) -> Self {
        self.skip_verification = true;
        self
    }
}

/// Why verification found no trusted certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyFailure {
    pub kind: ErrorKind,
    /// Subject of the certificate the failure refers to, empty if none
    pub subject: String,
    pub issuer: String,
    /// Path-validation code, when the failure came from the validator
    pub code: Option<ValidationErrorCode>,
    pub message: String,
}

impl VerifyFailure {
    fn not_found() -> Self {
        Self {
            kind: ErrorKind::CertNotFound,
            subject: String::new(),
            issuer: String::new(),
            code: None,
            message: "no candidate certificates".to_string(),
        }
    }

    fn revoked(cert: &Certificate) -> Self {
        Self {
            kind: ErrorKind::CertRevoked,
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            code: Some(ValidationErrorCode::CertRevoked),
            message: ValidationErrorCode::CertRevoked.message().to_string(),
        }
    }

    fn no_leaf() -> Self {
        Self {
            kind: ErrorKind::CertVerifyFailed,
            subject: String::new(),
            issuer: String::new(),
            code: None,
            message: "no chain leaf among the candidates".to_string(),
        }
    }
}

impl From<PathFailure> for VerifyFailure {
    fn from(failure: PathFailure) -> Self {
        Self {
            kind: failure.kind(),
            message: failure.code.message().to_string(),
            code: Some(failure.code),
            subject: failure.subject,
            issuer: failure.issuer,
        }
    }
}

impl fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)?;
        if let Some(code) = self.code {
            write!(f, " (err={})", code.code())?;
        }
        if !self.subject.is_empty() {
            write!(f, "; subject={}; issuer={}", self.subject, self.issuer)?;
        }
        Ok(())
    }
}

/// Outcome of [`TrustStore::verify`].
#[derive(Debug, Clone)]
pub enum Verification<'a> {
    /// Leaf certificate of the first trusted path
    Trusted(&'a Certificate),
    Untrusted(VerifyFailure),
}

impl<'a> Verification<'a> {
    pub fn is_trusted(&self) -> bool {
        matches!(self, Verification::Trusted(_))
    }

    pub fn certificate(&self) -> Option<&'a Certificate> {
        match self {
            Verification::Trusted(cert) => Some(cert),
            Verification::Untrusted(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&VerifyFailure> {
        match self {
            Verification::Trusted(_) => None,
            Verification::Untrusted(failure) => Some(failure),
        }
    }
}

/// Certificate and CRL store used to verify signer certificates.
#[derive(Debug, Clone)]
pub struct TrustStore<V: ChainValidator> {
    state: StoreState,
    validator: V,
    trusted: Vec<Certificate>,
    untrusted: Vec<Certificate>,
    crls: Vec<CertificateRevocationList>,
}

#[cfg(feature = "ring-backend")]
impl TrustStore<Validator<RingBackend>> {
    /// Create a store using the default path validator
    pub fn new() -> Self {
        Self::with_validator(Validator::new())
    }
}

#[cfg(feature = "ring-backend")]
impl Default for TrustStore<Validator<RingBackend>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ChainValidator> TrustStore<V> {
    pub fn with_validator(validator: V) -> Self {
        Self {
            state: StoreState::Uninitialized,
            validator,
            trusted: Vec::new(),
            untrusted: Vec::new(),
            crls: Vec::new(),
        }
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn initialize(&mut self) -> Result<()> {
        if self.state != StoreState::Uninitialized {
            log::error!("initialize: store is {:?}", self.state);
            return Err(Error::StoreError(StoreError::InvalidState(
                "store already initialized",
            )));
        }
        self.state = StoreState::Active;
        Ok(())
    }

    /// Release every certificate and CRL held by the store.
    pub fn close(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.trusted.clear();
        self.untrusted.clear();
        self.crls.clear();
        self.state = StoreState::Closed;
        Ok(())
    }

    fn ensure_active(&self) -> Result<()> {
        match self.state {
            StoreState::Active => Ok(()),
            StoreState::Uninitialized => Err(Error::StoreError(StoreError::InvalidState(
                "store not initialized",
            ))),
            StoreState::Closed => Err(Error::StoreError(StoreError::InvalidState(
                "store closed",
            ))),
        }
    }

    pub fn adopt_certificate(&mut self, cert: Certificate, kind: CertKind) -> Result<()> {
        self.ensure_active()?;
        log::trace!("adopt_certificate: {:?} '{}'", kind, cert.subject());
        match kind {
            CertKind::Trusted => self.trusted.push(cert),
            CertKind::Untrusted => self.untrusted.push(cert),
        }
        Ok(())
    }

    pub fn adopt_crl(&mut self, crl: CertificateRevocationList) -> Result<()> {
        self.ensure_active()?;
        log::trace!("adopt_crl: issuer '{}'", crl.issuer());
        self.crls.push(crl);
        Ok(())
    }

    pub fn trusted_certificates(&self) -> &[Certificate] {
        &self.trusted
    }

    pub fn untrusted_certificates(&self) -> &[Certificate] {
        &self.untrusted
    }

    pub fn crls(&self) -> &[CertificateRevocationList] {
        &self.crls
    }

    /// Add every certificate in a PEM bundle as a trust anchor and every
    /// CRL to the CRL pool. Blocks with other labels are ignored.
    ///
    /// Returns the number of certificates and CRLs added.
    pub fn add_trusted_pem(&mut self, pem: &str) -> Result<usize> {
        self.ensure_active()?;
        let (certs, crls) = parse_pem_bundle(pem)?;
        let added = certs.len() + crls.len();
        self.trusted.extend(certs);
        self.crls.extend(crls);
        Ok(added)
    }

    /// Look up a certificate in the untrusted pool.
    ///
    /// Trust anchors are only consulted by [`TrustStore::verify`].
    pub fn find_certificate(&self, query: &CertQuery) -> Result<Option<&Certificate>> {
        self.ensure_active()?;
        Ok(matcher::find_certificate(&self.untrusted, query))
    }

    /// Find a trusted certificate among `candidates` and the untrusted pool.
    ///
    /// `crls` are only used once authenticated by a trust anchor. Chain
    /// leaves are tried in the order `candidates` then the untrusted pool;
    /// the first that validates is returned. When none validates, the
    /// failure of the last leaf tried is reported.
    pub fn verify<'a>(
        &'a self,
        candidates: &'a [Certificate],
        crls: &[CertificateRevocationList],
        options: &VerifyOptions,
    ) -> Result<Verification<'a>> {
        self.ensure_active()?;
        let time = verification_time(options.verification_time)?;

        let working: Vec<&'a Certificate> =
            candidates.iter().chain(self.untrusted.iter()).collect();
        if working.is_empty() {
            log::debug!("verify: no candidate certificates");
            return Ok(Verification::Untrusted(VerifyFailure::not_found()));
        }

        let authenticated: Vec<&CertificateRevocationList> = crls
            .iter()
            .filter(|crl| self.authenticate_crl(crl))
            .collect();

        let mut last_revoked = None;
        let remaining: Vec<&'a Certificate> = working
            .into_iter()
            .filter(|cert| {
                let revoked = check_certificate(cert, authenticated.iter().copied(), &time)
                    .is_revoked()
                    || check_certificate(cert, &self.crls, &time) == RevocationStatus::Revoked;
                if revoked {
                    log::debug!("verify: dropping revoked certificate '{}'", cert.subject());
                    last_revoked = Some(*cert);
                }
                !revoked
            })
            .collect();

        if remaining.is_empty() {
            return Ok(Verification::Untrusted(match last_revoked {
                Some(cert) => VerifyFailure::revoked(cert),
                None => VerifyFailure::not_found(),
            }));
        }

        let leaves: Vec<&'a Certificate> = remaining
            .iter()
            .copied()
            .filter(|cert| is_chain_leaf(cert, &remaining))
            .collect();
        log::trace!(
            "verify: {} certificates, {} leaves",
            remaining.len(),
            leaves.len()
        );

        if options.skip_verification {
            return Ok(match leaves.first().copied() {
                Some(leaf) => {
                    log::debug!("verify: skipping validation of '{}'", leaf.subject());
                    Verification::Trusted(leaf)
                }
                None => Verification::Untrusted(VerifyFailure::no_leaf()),
            });
        }

        let params = ValidationParams {
            time,
            max_depth: options.max_depth,
        };

        let mut last_failure = None;
        for leaf in leaves {
            match self
                .validator
                .validate_path(leaf, &remaining, &self.trusted, &params)?
            {
                PathOutcome::Valid(chain) => {
                    log::debug!(
                        "verify: '{}' trusted via a chain of {}",
                        leaf.subject(),
                        chain.len()
                    );
                    return Ok(Verification::Trusted(leaf));
                }
                PathOutcome::Invalid(failure) => {
                    log::debug!("verify: leaf '{}' rejected: {}", leaf.subject(), failure);
                    last_failure = Some(failure);
                }
            }
        }

        let failure = match last_failure {
            Some(failure) => VerifyFailure::from(failure),
            None => VerifyFailure::no_leaf(),
        };
        log::error!("verify: {}", failure);
        Ok(Verification::Untrusted(failure))
    }

    /// A request CRL counts only when the first anchor named as its issuer
    /// verifies its signature.
    fn authenticate_crl(&self, crl: &CertificateRevocationList) -> bool {
        let anchor = match self
            .trusted
            .iter()
            .find(|anchor| names_equal(anchor.subject(), crl.issuer()))
        {
            Some(anchor) => anchor,
            None => {
                log::debug!("verify: no trusted issuer for CRL from '{}'", crl.issuer());
                return false;
            }
        };

        match self.validator.verify_crl(crl, anchor) {
            Ok(()) => true,
            Err(e) => {
                log::debug!(
                    "verify: dropping CRL from '{}': {}",
                    crl.issuer(),
                    e
                );
                false
            }
        }
    }
}

#[cfg(feature = "std")]
impl<V: ChainValidator> TrustStore<V> {
    /// Add every PEM certificate found in the regular files of `dir` as a
    /// trust anchor. Files that do not parse are skipped.
    pub fn add_trusted_directory<P: AsRef<std::path::Path>>(&mut self, dir: P) -> Result<usize> {
        self.ensure_active()?;
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            log::error!("add_trusted_directory: {}: {}", dir.display(), e);
            Error::config(format!("cannot read directory {}: {}", dir.display(), e))
        })?;

        let mut paths: Vec<std::path::PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let mut added = 0;
        for path in paths {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| Error::config(e.to_string()))
                .and_then(|text| parse_pem_bundle(&text));
            match loaded {
                Ok((certs, _)) if !certs.is_empty() => {
                    log::trace!("{}: {} certificates", path.display(), certs.len());
                    added += certs.len();
                    self.trusted.extend(certs);
                }
                Ok(_) => log::debug!("{}: no certificates, skipped", path.display()),
                Err(e) => log::warn!("{}: skipped: {}", path.display(), e),
            }
        }
        Ok(added)
    }

    /// Add the PEM certificates and CRLs in `file`. The file must contain
    /// at least one of them.
    pub fn add_trusted_file<P: AsRef<std::path::Path>>(&mut self, file: P) -> Result<usize> {
        self.ensure_active()?;
        let file = file.as_ref();
        let text = std::fs::read_to_string(file).map_err(|e| {
            log::error!("add_trusted_file: {}: {}", file.display(), e);
            Error::config(format!("cannot read {}: {}", file.display(), e))
        })?;

        let added = self.add_trusted_pem(&text).map_err(|e| {
            log::error!("add_trusted_file: {}: {}", file.display(), e);
            Error::config(format!("{}: {}", file.display(), e))
        })?;
        if added == 0 {
            log::error!("add_trusted_file: {}: nothing to load", file.display());
            return Err(Error::config(format!(
                "{}: no certificates or CRLs",
                file.display()
            )));
        }
        Ok(added)
    }
}

/// A certificate is a chain leaf when no other certificate in `set` was
/// issued by it.
fn is_chain_leaf(cert: &Certificate, set: &[&Certificate]) -> bool {
    !set.iter().any(|other| {
        !names_equal(other.subject(), cert.subject())
            && names_equal(other.issuer(), cert.subject())
    })
}

/// Split PEM text into its encapsulated blocks, yielding `(label, block)`.
///
/// A block whose END line is missing before the next BEGIN line is skipped.
fn pem_blocks(text: &str) -> impl Iterator<Item = (&str, &str)> {
    const BEGIN: &str = "-----BEGIN ";
    const DASHES: &str = "-----";

    let mut rest = text;
    core::iter::from_fn(move || loop {
        let start = rest.find(BEGIN)?;
        let block = &rest[start..];
        let Some(label_len) = block[BEGIN.len()..].find(DASHES) else {
            log::warn!("pem_blocks: unterminated BEGIN line");
            return None;
        };
        let label = &block[BEGIN.len()..BEGIN.len() + label_len];
        let body = BEGIN.len() + label_len;
        let next_begin = block[body..].find(BEGIN).map(|pos| pos + body);

        let end_marker = format!("-----END {}-----", label);
        match block.find(&end_marker) {
            Some(pos) if next_begin.map_or(true, |next| pos < next) => {
                let end = pos + end_marker.len();
                rest = &block[end..];
                return Some((label, &block[..end]));
            }
            _ => {
                log::warn!("pem_blocks: no END line for '{}' block, skipping it", label);
                rest = &block[body..];
            }
        }
    })
}

/// Parse every certificate and CRL block in a PEM bundle.
pub fn parse_pem_bundle(
    text: &str,
) -> Result<(Vec<Certificate>, Vec<CertificateRevocationList>)> {
    let mut certs = Vec::new();
    let mut crls = Vec::new();

    for (label, block) in pem_blocks(text) {
        match label {
            certificate::PEM_LABEL => certs.push(Certificate::from_pem(block)?),
            crl::PEM_LABEL => crls.push(CertificateRevocationList::from_pem(block)?),
            other => log::debug!("parse_pem_bundle: ignoring '{}' block", other),
        }
    }
    Ok((certs, crls))
}
