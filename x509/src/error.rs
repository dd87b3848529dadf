// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for certificate matching, revocation and trust verification
//!
//! This module defines the error types for parsing, name handling, path
//! validation and trust-store operations, compatible with both `std` and
//! `no_std` environments. [`Error::kind`] maps every error onto the flat
//! [`ErrorKind`] classification reported to callers.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

/// Result type alias for X.509 operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for X.509 parsing, matching and verification
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Errors during DER/ASN.1 parsing
    ParseError(ParseError),

    /// Errors from the base64 codec or signature transforms
    Transform(dsig_transforms::Error),

    /// Errors related to cryptographic signature verification
    SignatureError(SignatureError),

    /// Errors related to time validation
    TimeError(TimeError),

    /// Unsupported or invalid cryptographic algorithms
    AlgorithmError(AlgorithmError),

    /// Certificate encoding errors (PEM/DER conversion)
    EncodingError(EncodingError),

    /// Distinguished name errors
    NameError(NameError),

    /// Trust store lifecycle and configuration errors
    StoreError(StoreError),

    /// Invalid certificate or CRL version
    InvalidVersion(u8),
}

/// Flat classification of errors and verification outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidBase64Character,
    TooManyPaddingChars,
    InvalidCharacterAfterPadding,
    BufferTooSmall,
    MalformedDistinguishedName,
    NotImplemented,
    CertNotFound,
    CertRevoked,
    CertExpired,
    CertNotYetValid,
    CertIssuerNotFound,
    CertVerifyFailed,
    InvalidData,
    InternalError,
}

/// Errors that occur during DER/ASN.1 parsing
#[derive(Debug, Clone)]
pub enum ParseError {
    /// Invalid integer encoding
    InvalidInteger(String),

    /// Error from der crate
    DerError(String),
}

/// Errors related to cryptographic signature verification
#[derive(Debug, Clone)]
pub enum SignatureError {
    /// Signature verification failed
    VerificationFailed,

    /// Error from ring cryptographic library
    RingError(String),
}

/// Errors related to time validation
#[derive(Debug, Clone)]
pub enum TimeError {
    /// Certificate not yet valid
    NotYetValid,

    /// Certificate has expired
    Expired,

    /// Invalid time value
    InvalidTime,
}

/// Errors related to cryptographic algorithms
#[derive(Debug, Clone)]
pub enum AlgorithmError {
    /// Algorithm not supported
    Unsupported(String),
}

/// Errors related to certificate encoding
#[derive(Debug, Clone)]
pub enum EncodingError {
    /// Invalid PEM format
    InvalidPem(String),

    /// PEM label mismatch
    InvalidPemLabel { expected: String, found: String },
}

/// Errors related to distinguished names
#[derive(Debug, Clone)]
pub enum NameError {
    /// Unparseable distinguished name string
    Malformed(String),

    /// Syntax that is recognised but not supported (e.g. `#` hex values)
    NotImplemented(String),
}

/// Errors related to the trust store
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Operation not valid in the store's current state
    InvalidState(&'static str),

    /// A trusted source could not be registered
    Config(String),
}

// ============================================================================
// Error Display Implementation (works in both std and no_std)
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseError(e) => write!(f, "Parse error: {}", e),
            Error::Transform(e) => write!(f, "Transform error: {}", e),
            Error::SignatureError(e) => write!(f, "Signature error: {}", e),
            Error::TimeError(e) => write!(f, "Time validation error: {}", e),
            Error::AlgorithmError(e) => write!(f, "Algorithm error: {}", e),
            Error::EncodingError(e) => write!(f, "Encoding error: {}", e),
            Error::NameError(e) => write!(f, "Name error: {}", e),
            Error::StoreError(e) => write!(f, "Trust store error: {}", e),
            Error::InvalidVersion(v) => write!(f, "Invalid version: {}", v),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidInteger(msg) => write!(f, "Invalid integer: {}", msg),
            ParseError::DerError(msg) => write!(f, "DER error: {}", msg),
        }
    }
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::VerificationFailed => write!(f, "Signature verification failed"),
            SignatureError::RingError(msg) => write!(f, "Cryptographic error: {}", msg),
        }
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeError::NotYetValid => write!(f, "Certificate not yet valid"),
            TimeError::Expired => write!(f, "Certificate has expired"),
            TimeError::InvalidTime => write!(f, "Invalid time"),
        }
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmError::Unsupported(algo) => write!(f, "Unsupported algorithm: {}", algo),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidPem(msg) => write!(f, "Invalid PEM: {}", msg),
            EncodingError::InvalidPemLabel { expected, found } => {
                write!(
                    f,
                    "Invalid PEM label: expected '{}', found '{}'",
                    expected, found
                )
            }
        }
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::Malformed(msg) => write!(f, "Malformed distinguished name: {}", msg),
            NameError::NotImplemented(msg) => write!(f, "Not implemented: {}", msg),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidState(state) => write!(f, "Store is {}", state),
            StoreError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidBase64Character => "invalid base64 character",
            ErrorKind::TooManyPaddingChars => "too many padding characters",
            ErrorKind::InvalidCharacterAfterPadding => "invalid character after padding",
            ErrorKind::BufferTooSmall => "buffer too small",
            ErrorKind::MalformedDistinguishedName => "malformed distinguished name",
            ErrorKind::NotImplemented => "not implemented",
            ErrorKind::CertNotFound => "certificate not found",
            ErrorKind::CertRevoked => "certificate revoked",
            ErrorKind::CertExpired => "certificate expired",
            ErrorKind::CertNotYetValid => "certificate not yet valid",
            ErrorKind::CertIssuerNotFound => "certificate issuer not found",
            ErrorKind::CertVerifyFailed => "certificate verification failed",
            ErrorKind::InvalidData => "invalid data",
            ErrorKind::InternalError => "internal error",
        };
        f.write_str(s)
    }
}

// ============================================================================
// std::error::Error implementation (when std feature is enabled)
// ============================================================================

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// ============================================================================
// Conversions from external crate errors
// ============================================================================

/// Convert from der crate errors
impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::ParseError(ParseError::DerError(err.to_string()))
    }
}

/// Convert from PEM decoding errors
impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Error::EncodingError(EncodingError::InvalidPem(err.to_string()))
    }
}

/// Convert from codec and transform errors
impl From<dsig_transforms::Error> for Error {
    fn from(err: dsig_transforms::Error) -> Self {
        Error::Transform(err)
    }
}

impl From<NameError> for Error {
    fn from(err: NameError) -> Self {
        Error::NameError(err)
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::StoreError(err)
    }
}

/// Convert from ring's Unspecified error
#[cfg(feature = "ring-backend")]
impl From<ring::error::Unspecified> for Error {
    fn from(_: ring::error::Unspecified) -> Self {
        Error::SignatureError(SignatureError::RingError(
            "Cryptographic operation failed".to_string(),
        ))
    }
}

// ============================================================================
// Classification
// ============================================================================

impl Error {
    /// Classify this error for callers that only need the outcome category.
    pub fn kind(&self) -> ErrorKind {
        use dsig_transforms::CodecError;

        match self {
            Error::Transform(e) => match e.codec_error() {
                Some(CodecError::InvalidBase64Character(_)) => ErrorKind::InvalidBase64Character,
                Some(CodecError::TooManyPaddingChars) => ErrorKind::TooManyPaddingChars,
                Some(CodecError::InvalidCharacterAfterPadding(_)) => {
                    ErrorKind::InvalidCharacterAfterPadding
                }
                Some(CodecError::BufferTooSmall { .. }) => ErrorKind::BufferTooSmall,
                Some(_) => ErrorKind::InvalidData,
                None => ErrorKind::CertVerifyFailed,
            },
            Error::NameError(NameError::NotImplemented(_)) => ErrorKind::NotImplemented,
            Error::NameError(NameError::Malformed(_)) => ErrorKind::MalformedDistinguishedName,
            Error::ParseError(_) | Error::EncodingError(_) | Error::InvalidVersion(_) => {
                ErrorKind::InvalidData
            }
            Error::TimeError(TimeError::NotYetValid) => ErrorKind::CertNotYetValid,
            Error::TimeError(TimeError::Expired) => ErrorKind::CertExpired,
            Error::TimeError(_) => ErrorKind::InvalidData,
            Error::SignatureError(_) | Error::AlgorithmError(_) => ErrorKind::CertVerifyFailed,
            Error::StoreError(_) => ErrorKind::InternalError,
        }
    }
}

// ============================================================================
// Helper constructors for common error cases
// ============================================================================

impl Error {
    /// Create a signature verification failure
    pub fn signature_failed() -> Self {
        Error::SignatureError(SignatureError::VerificationFailed)
    }

    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm<S: Into<String>>(algo: S) -> Self {
        Error::AlgorithmError(AlgorithmError::Unsupported(algo.into()))
    }

    /// Create a certificate expired error
    pub fn expired() -> Self {
        Error::TimeError(TimeError::Expired)
    }

    /// Create a certificate not yet valid error
    pub fn not_yet_valid() -> Self {
        Error::TimeError(TimeError::NotYetValid)
    }

    /// Create a malformed distinguished name error
    pub fn malformed_name<S: Into<String>>(msg: S) -> Self {
        Error::NameError(NameError::Malformed(msg.into()))
    }

    /// Create a not-implemented error
    pub fn not_implemented<S: Into<String>>(what: S) -> Self {
        Error::NameError(NameError::NotImplemented(what.into()))
    }

    /// Create a trust store configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::StoreError(StoreError::Config(msg.into()))
    }
}

// ============================================================================
// Tests
// ============================================================================
