// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Ring signature provider.

use super::{HashAlgorithm, KeyAlgorithm, Padding, SignatureDescriptor, SignatureProvider};
use crate::error::{Error, Result};
use ring::signature::{self, UnparsedPublicKey};

/// Uncompressed P-256 point length
const P256_POINT_LEN: usize = 65;
/// Uncompressed P-384 point length
const P384_POINT_LEN: usize = 97;

/// Ring-based signature provider.
///
/// Covers ECDSA with SHA-256 on P-256 and SHA-384 on P-384, RSA PKCS#1 v1.5 with SHA-1/256/384/512 and
/// RSA-PSS with SHA-256/384/512. DSA, MD5 and SHA-224 are not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingSignatureProvider;

impl RingSignatureProvider {
    fn algorithm(
        descriptor: &SignatureDescriptor,
        public_key: &[u8],
    ) -> Result<&'static dyn signature::VerificationAlgorithm> {
        use HashAlgorithm::*;

        let algo: &'static dyn signature::VerificationAlgorithm =
            match (descriptor.key, descriptor.padding, descriptor.hash) {
                (KeyAlgorithm::Ecdsa, _, hash) => match (public_key.len(), hash) {
                    (P256_POINT_LEN, Sha256) => &signature::ECDSA_P256_SHA256_FIXED,
                    (P384_POINT_LEN, Sha384) => &signature::ECDSA_P384_SHA384_FIXED,
                    _ => return Err(Error::unsupported_algorithm(descriptor.uri)),
                },
                (KeyAlgorithm::Rsa, Padding::Pkcs1, Sha1) => {
                    &signature::RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY
                }
                (KeyAlgorithm::Rsa, Padding::Pkcs1, Sha256) => &signature::RSA_PKCS1_2048_8192_SHA256,
                (KeyAlgorithm::Rsa, Padding::Pkcs1, Sha384) => &signature::RSA_PKCS1_2048_8192_SHA384,
                (KeyAlgorithm::Rsa, Padding::Pkcs1, Sha512) => &signature::RSA_PKCS1_2048_8192_SHA512,
                (KeyAlgorithm::Rsa, Padding::Pss, Sha256) => &signature::RSA_PSS_2048_8192_SHA256,
                (KeyAlgorithm::Rsa, Padding::Pss, Sha384) => &signature::RSA_PSS_2048_8192_SHA384,
                (KeyAlgorithm::Rsa, Padding::Pss, Sha512) => &signature::RSA_PSS_2048_8192_SHA512,
                _ => return Err(Error::unsupported_algorithm(descriptor.uri)),
            };
        Ok(algo)
    }
}

impl SignatureProvider for RingSignatureProvider {
    fn verify(
        &self,
        descriptor: &SignatureDescriptor,
        public_key: &[u8],
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        log::trace!("Verifying signature with {}", descriptor.uri);

        let algo = Self::algorithm(descriptor, public_key).map_err(|e| {
            log::error!("ring cannot verify {}", descriptor.uri);
            e
        })?;

        let pk = UnparsedPublicKey::new(algo, public_key);
        match pk.verify(data, signature) {
            Ok(()) => Ok(true),
            Err(_) => {
                log::trace!("Signature verification failed");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::descriptor_for_uri;
    use crate::signature::{
        DSA_SHA1, ECDSA_SHA256, ECDSA_SHA384, ECDSA_SHA512, RSA_MD5, RSA_PSS_SHA1,
    };

    #[test]
    fn test_unsupported_descriptors() {
        let provider = RingSignatureProvider;
        for uri in [DSA_SHA1, RSA_MD5, RSA_PSS_SHA1, ECDSA_SHA512] {
            let d = descriptor_for_uri(uri).unwrap();
            let res = provider.verify(d, &[0x04; 65], b"data", &[0u8; 64]);
            assert!(res.is_err(), "{} should be unsupported", uri);
        }
    }

    #[test]
    fn test_ecdsa_curve_from_key_length() {
        let sha256 = descriptor_for_uri(ECDSA_SHA256).unwrap();
        let sha384 = descriptor_for_uri(ECDSA_SHA384).unwrap();
        assert!(RingSignatureProvider::algorithm(sha256, &[0x04; 65]).is_ok());
        assert!(RingSignatureProvider::algorithm(sha384, &[0x04; 97]).is_ok());
        assert!(RingSignatureProvider::algorithm(sha256, &[0x04; 33]).is_err());
    }

    #[test]
    fn test_ecdsa_mixed_curve_and_hash_rejected() {
        let sha256 = descriptor_for_uri(ECDSA_SHA256).unwrap();
        let sha384 = descriptor_for_uri(ECDSA_SHA384).unwrap();
        assert_eq!(
            RingSignatureProvider::algorithm(sha256, &[0x04; 97]).err(),
            Some(Error::unsupported_algorithm(ECDSA_SHA256))
        );
        assert_eq!(
            RingSignatureProvider::algorithm(sha384, &[0x04; 65]).err(),
            Some(Error::unsupported_algorithm(ECDSA_SHA384))
        );
    }

    #[test]
    fn test_bad_signature_is_mismatch() {
        let d = descriptor_for_uri(ECDSA_SHA256).unwrap();
        let res = RingSignatureProvider.verify(d, &[0x04; 65], b"data", &[0u8; 64]);
        assert_eq!(res, Ok(false));
    }
}
