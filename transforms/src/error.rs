// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for the transform stages.
//!
//! Codec errors are terminal for the stream that raised them: once a
//! [`CodecError`] has been returned the codec refuses further work with
//! [`CodecError::StreamFailed`].

extern crate alloc;

use alloc::string::String;
use core::fmt;

use crate::transform::TransformStatus;

/// Result type alias for transform operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for the transform stages
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Base64 stream codec errors
    Codec(CodecError),

    /// Transform used in the wrong lifecycle state
    Transform(TransformError),

    /// Signature transform errors
    Signature(SignatureError),
}

/// Errors raised by the base64 stream codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A byte outside the base64 alphabet, `=` and whitespace
    InvalidBase64Character(u8),

    /// More than two `=` padding characters
    TooManyPaddingChars,

    /// A non-whitespace character after the padding started
    InvalidCharacterAfterPadding(u8),

    /// Staged data cannot form a complete value
    InvalidData(String),

    /// Output buffer cannot hold the pending data
    BufferTooSmall { available: usize },

    /// The codec already failed and must be discarded
    StreamFailed,
}

/// Errors related to the transform lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Operation not valid in the current status
    InvalidStatus(TransformStatus),
}

/// Errors raised by signature transforms and providers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// No descriptor or provider support for the algorithm
    UnsupportedAlgorithm(String),
}

// ============================================================================
// Error Display Implementation (works in both std and no_std)
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Codec(e) => write!(f, "Base64 codec error: {}", e),
            Error::Transform(e) => write!(f, "Transform error: {}", e),
            Error::Signature(e) => write!(f, "Signature error: {}", e),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidBase64Character(ch) => {
                write!(f, "Invalid base64 character 0x{:02x}", ch)
            }
            CodecError::TooManyPaddingChars => write!(f, "Too many padding '=' characters"),
            CodecError::InvalidCharacterAfterPadding(ch) => {
                write!(f, "Invalid character 0x{:02x} after padding", ch)
            }
            CodecError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            CodecError::BufferTooSmall { available } => {
                write!(f, "Output buffer too small: {} bytes available", available)
            }
            CodecError::StreamFailed => write!(f, "Codec already failed"),
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::InvalidStatus(status) => {
                write!(f, "Invalid transform status: {:?}", status)
            }
        }
    }
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::UnsupportedAlgorithm(algo) => {
                write!(f, "Unsupported signature algorithm: {}", algo)
            }
        }
    }
}

// ============================================================================
// std::error::Error implementation (when std feature is enabled)
// ============================================================================

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// ============================================================================
// Conversions
// ============================================================================

impl From<CodecError> for Error {
    fn from(err: CodecError) -> Self {
        Error::Codec(err)
    }
}

impl From<TransformError> for Error {
    fn from(err: TransformError) -> Self {
        Error::Transform(err)
    }
}

impl From<SignatureError> for Error {
    fn from(err: SignatureError) -> Self {
        Error::Signature(err)
    }
}

// ============================================================================
// Helper constructors for common error cases
// ============================================================================

impl Error {
    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(msg: S) -> Self {
        Error::Codec(CodecError::InvalidData(msg.into()))
    }

    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm<S: Into<String>>(algo: S) -> Self {
        Error::Signature(SignatureError::UnsupportedAlgorithm(algo.into()))
    }

    /// Create an invalid status error
    pub fn invalid_status(status: TransformStatus) -> Self {
        Error::Transform(TransformError::InvalidStatus(status))
    }

    /// The codec error carried by this error, if any
    pub fn codec_error(&self) -> Option<&CodecError> {
        match self {
            Error::Codec(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
