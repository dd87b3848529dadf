// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! XML-DSig Transform Stages
//!
//! A no_std-compatible set of transform stages for a document-signature
//! pipeline: a resumable base64 codec and a descriptor-driven signature
//! verifier with pluggable providers.
//!
//! # Features
//! - Base64 encoding/decoding over arbitrarily chunked buffers
//! - Transform lifecycle tracking (`Unstarted`, `Working`, `Finished`, `Failed`)
//! - Signature methods selected by XML-DSig algorithm URI
//! - `ring` signature provider behind the `ring-backend` feature
//!
//! # Example
//! ```
//! use dsig_transforms::{Base64Transform, Transform};
//!
//! # fn example() -> dsig_transforms::Result<()> {
//! let mut stage = Base64Transform::decoder();
//! let mut out = Vec::new();
//! stage.execute(b"SGVsbG8s", false, &mut out)?;
//! stage.execute(b"IFdvcmxkIQ==", true, &mut out)?;
//! assert_eq!(out, b"Hello, World!");
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod base64;
pub mod error;
pub mod signature;
pub mod transform;

pub use base64::{Base64StreamCodec, Mode, LINE_SIZE};
pub use error::{CodecError, Error, Result, SignatureError, TransformError};
pub use signature::{
    descriptor_for_uri, HashAlgorithm, KeyAlgorithm, Padding, SignatureDescriptor,
    SignatureProvider, SignatureTransform,
};
pub use transform::{Base64Transform, Transform, TransformStatus};

#[cfg(feature = "ring-backend")]
pub use signature::RingSignatureProvider;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{Base64StreamCodec, Base64Transform, Error, Result, Transform, TransformStatus};
    pub use crate::{SignatureProvider, SignatureTransform};
}
