// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Descriptor-driven signature verification transform.
//!
//! Every XML-DSig signature method maps to a static [`SignatureDescriptor`]
//! naming its hash, key type, padding and salt size. The transform itself is
//! one type, [`SignatureTransform`], parameterized by the descriptor and a
//! [`SignatureProvider`] that performs the actual verification.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::transform::{begin_execute, Transform, TransformStatus};

#[cfg(feature = "ring-backend")]
mod ring;
#[cfg(feature = "ring-backend")]
pub use self::ring::*;

/// Digest algorithm applied to the signed data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes
    pub const fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 => 28,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Dsa,
    Ecdsa,
    Rsa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// No padding (DSA, ECDSA)
    None,
    Pkcs1,
    Pss,
}

/// Static description of one signature method
#[derive(Debug, PartialEq, Eq)]
pub struct SignatureDescriptor {
    pub uri: &'static str,
    pub hash: HashAlgorithm,
    pub key: KeyAlgorithm,
    pub padding: Padding,
    /// PSS salt length in bytes, 0 for other paddings
    pub salt_size: usize,
}

// ============================================================================
// Algorithm URIs
// ============================================================================

pub const DSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#dsa-sha1";
pub const DSA_SHA256: &str = "http://www.w3.org/2009/xmldsig11#dsa-sha256";

pub const ECDSA_SHA1: &str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha1";
pub const ECDSA_SHA224: &str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha224";
pub const ECDSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha256";
pub const ECDSA_SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha384";
pub const ECDSA_SHA512: &str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha512";

pub const RSA_MD5: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-md5";
pub const RSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";
pub const RSA_SHA224: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha224";
pub const RSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256";
pub const RSA_SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha384";
pub const RSA_SHA512: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha512";

pub const RSA_PSS_SHA1: &str = "http://www.w3.org/2007/05/xmldsig-more#sha1-rsa-MGF1";
pub const RSA_PSS_SHA224: &str = "http://www.w3.org/2007/05/xmldsig-more#sha224-rsa-MGF1";
pub const RSA_PSS_SHA256: &str = "http://www.w3.org/2007/05/xmldsig-more#sha256-rsa-MGF1";
pub const RSA_PSS_SHA384: &str = "http://www.w3.org/2007/05/xmldsig-more#sha384-rsa-MGF1";
pub const RSA_PSS_SHA512: &str = "http://www.w3.org/2007/05/xmldsig-more#sha512-rsa-MGF1";

const fn plain(
    uri: &'static str,
    key: KeyAlgorithm,
    padding: Padding,
    hash: HashAlgorithm,
) -> SignatureDescriptor {
    SignatureDescriptor {
        uri,
        hash,
        key,
        padding,
        salt_size: 0,
    }
}

const fn pss(uri: &'static str, hash: HashAlgorithm) -> SignatureDescriptor {
    SignatureDescriptor {
        uri,
        hash,
        key: KeyAlgorithm::Rsa,
        padding: Padding::Pss,
        salt_size: hash.output_len(),
    }
}

use HashAlgorithm::*;
use KeyAlgorithm::{Dsa, Ecdsa, Rsa};

/// All known signature methods
pub static SIGNATURE_DESCRIPTORS: [SignatureDescriptor; 18] = [
    plain(DSA_SHA1, Dsa, Padding::None, Sha1),
    plain(DSA_SHA256, Dsa, Padding::None, Sha256),
    plain(ECDSA_SHA1, Ecdsa, Padding::None, Sha1),
    plain(ECDSA_SHA224, Ecdsa, Padding::None, Sha224),
    plain(ECDSA_SHA256, Ecdsa, Padding::None, Sha256),
    plain(ECDSA_SHA384, Ecdsa, Padding::None, Sha384),
    plain(ECDSA_SHA512, Ecdsa, Padding::None, Sha512),
    plain(RSA_MD5, Rsa, Padding::Pkcs1, Md5),
    plain(RSA_SHA1, Rsa, Padding::Pkcs1, Sha1),
    plain(RSA_SHA224, Rsa, Padding::Pkcs1, Sha224),
    plain(RSA_SHA256, Rsa, Padding::Pkcs1, Sha256),
    plain(RSA_SHA384, Rsa, Padding::Pkcs1, Sha384),
    plain(RSA_SHA512, Rsa, Padding::Pkcs1, Sha512),
    pss(RSA_PSS_SHA1, Sha1),
    pss(RSA_PSS_SHA224, Sha224),
    pss(RSA_PSS_SHA256, Sha256),
    pss(RSA_PSS_SHA384, Sha384),
    pss(RSA_PSS_SHA512, Sha512),
];

/// Look up the descriptor for a signature method URI.
pub fn descriptor_for_uri(uri: &str) -> Option<&'static SignatureDescriptor> {
    SIGNATURE_DESCRIPTORS.iter().find(|d| d.uri == uri)
}

/// Capability that checks a signature for a given descriptor.
///
/// `public_key` is the key as carried in a certificate's
/// subjectPublicKeyInfo bit string: a PKCS#1 `RSAPublicKey` for RSA, an
/// uncompressed point for ECDSA. DSA and ECDSA signatures use the raw
/// `r || s` encoding.
pub trait SignatureProvider {
    /// Returns `Ok(false)` when the signature does not match.
    fn verify(
        &self,
        descriptor: &SignatureDescriptor,
        public_key: &[u8],
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool>;
}

/// Verifying signature transform.
///
/// Input is buffered until the last chunk arrives; [`SignatureTransform::verify`]
/// then checks the signature over everything seen.
pub struct SignatureTransform<P: SignatureProvider> {
    descriptor: &'static SignatureDescriptor,
    provider: P,
    public_key: Vec<u8>,
    data: Vec<u8>,
    status: TransformStatus,
}

impl<P: SignatureProvider> SignatureTransform<P> {
    pub fn new(descriptor: &'static SignatureDescriptor, provider: P, public_key: &[u8]) -> Self {
        Self {
            descriptor,
            provider,
            public_key: public_key.to_vec(),
            data: Vec::new(),
            status: TransformStatus::Unstarted,
        }
    }

    /// Create a transform for the signature method named by `uri`.
    pub fn from_uri(uri: &str, provider: P, public_key: &[u8]) -> Result<Self> {
        let descriptor = descriptor_for_uri(uri).ok_or_else(|| {
            log::error!("no signature descriptor for {}", uri);
            Error::unsupported_algorithm(uri)
        })?;
        Ok(Self::new(descriptor, provider, public_key))
    }

    pub fn descriptor(&self) -> &'static SignatureDescriptor {
        self.descriptor
    }

    /// Check `signature` over the buffered input.
    ///
    /// Only valid once the transform finished. A mismatch moves the
    /// transform to [`TransformStatus::Failed`].
    pub fn verify(&mut self, signature: &[u8]) -> Result<bool> {
        if self.status != TransformStatus::Finished {
            return Err(Error::invalid_status(self.status));
        }

        let res = self
            .provider
            .verify(self.descriptor, &self.public_key, &self.data, signature);
        match res {
            Ok(true) => {
                log::trace!("signature verified for {}", self.descriptor.uri);
                Ok(true)
            }
            Ok(false) => {
                log::error!("signature mismatch for {}", self.descriptor.uri);
                self.status = TransformStatus::Failed;
                Ok(false)
            }
            Err(e) => {
                self.status = TransformStatus::Failed;
                Err(e)
            }
        }
    }
}

impl<P: SignatureProvider> Transform for SignatureTransform<P> {
    fn name(&self) -> &'static str {
        "signature"
    }

    fn uri(&self) -> &'static str {
        self.descriptor.uri
    }

    fn status(&self) -> TransformStatus {
        self.status
    }

    fn execute(&mut self, input: &[u8], last: bool, _output: &mut Vec<u8>) -> Result<()> {
        begin_execute(&mut self.status, input)?;
        self.data.extend_from_slice(input);
        if last {
            self.status = TransformStatus::Finished;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignatureError;

    /// Accepts a signature equal to the data reversed.
    struct ReverseProvider;

    impl SignatureProvider for ReverseProvider {
        fn verify(
            &self,
            descriptor: &SignatureDescriptor,
            _public_key: &[u8],
            data: &[u8],
            signature: &[u8],
        ) -> Result<bool> {
            if descriptor.key == KeyAlgorithm::Dsa {
                return Err(Error::unsupported_algorithm(descriptor.uri));
            }
            Ok(data.iter().rev().eq(signature.iter()))
        }
    }

    #[test]
    fn test_descriptor_lookup() {
        let d = descriptor_for_uri(RSA_SHA256).unwrap();
        assert_eq!(d.key, KeyAlgorithm::Rsa);
        assert_eq!(d.hash, HashAlgorithm::Sha256);
        assert_eq!(d.padding, Padding::Pkcs1);
        assert_eq!(d.salt_size, 0);

        let d = descriptor_for_uri(ECDSA_SHA384).unwrap();
        assert_eq!(d.key, KeyAlgorithm::Ecdsa);
        assert_eq!(d.padding, Padding::None);

        assert!(descriptor_for_uri("http://example.com/unknown").is_none());
    }

    #[test]
    fn test_pss_salt_matches_hash() {
        for d in SIGNATURE_DESCRIPTORS.iter().filter(|d| d.padding == Padding::Pss) {
            assert_eq!(d.salt_size, d.hash.output_len());
        }
        assert_eq!(descriptor_for_uri(RSA_PSS_SHA512).unwrap().salt_size, 64);
    }

    #[test]
    fn test_uris_are_unique() {
        for (i, a) in SIGNATURE_DESCRIPTORS.iter().enumerate() {
            for b in SIGNATURE_DESCRIPTORS.iter().skip(i + 1) {
                assert_ne!(a.uri, b.uri);
            }
        }
    }

    #[test]
    fn test_unknown_uri() {
        let res = SignatureTransform::from_uri("urn:none", ReverseProvider, &[]);
        assert!(matches!(
            res,
            Err(Error::Signature(SignatureError::UnsupportedAlgorithm(_)))
        ));
    }

    #[test]
    fn test_verify_buffers_all_input() {
        let mut t = SignatureTransform::from_uri(ECDSA_SHA256, ReverseProvider, &[]).unwrap();
        let mut out = Vec::new();
        t.execute(b"abc", false, &mut out).unwrap();
        t.execute(b"def", true, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(t.status(), TransformStatus::Finished);

        assert!(t.verify(b"fedcba").unwrap());
        assert_eq!(t.status(), TransformStatus::Finished);
    }

    #[test]
    fn test_mismatch_fails_transform() {
        let mut t = SignatureTransform::from_uri(RSA_SHA1, ReverseProvider, &[]).unwrap();
        let mut out = Vec::new();
        t.execute(b"abc", true, &mut out).unwrap();
        assert!(!t.verify(b"abc").unwrap());
        assert_eq!(t.status(), TransformStatus::Failed);
        assert!(t.verify(b"cba").is_err());
    }

    #[test]
    fn test_verify_before_finish() {
        let mut t = SignatureTransform::from_uri(RSA_SHA1, ReverseProvider, &[]).unwrap();
        assert_eq!(
            t.verify(b"").unwrap_err(),
            Error::invalid_status(TransformStatus::Unstarted)
        );
        let mut out = Vec::new();
        t.execute(b"abc", false, &mut out).unwrap();
        assert!(t.verify(b"cba").is_err());
    }

    #[test]
    fn test_provider_error_fails_transform() {
        let mut t = SignatureTransform::from_uri(DSA_SHA1, ReverseProvider, &[]).unwrap();
        let mut out = Vec::new();
        t.execute(b"abc", true, &mut out).unwrap();
        assert!(t.verify(b"cba").is_err());
        assert_eq!(t.status(), TransformStatus::Failed);
    }
}
