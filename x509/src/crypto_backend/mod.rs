// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Cryptographic backend abstraction for certificate and CRL signatures.
//!
//! The chain validator and CRL authentication only need "does this key sign
//! these bytes"; the [`CryptoBackend`] trait keeps the library choice behind
//! one seam.

extern crate alloc;

use crate::certificate::SubjectPublicKeyInfo;
use crate::error::{Error, Result};
use const_oid::ObjectIdentifier;
use spki::AlgorithmIdentifier;

#[cfg(feature = "ring-backend")]
mod ring;
#[cfg(feature = "ring-backend")]
pub use self::ring::*;

/// id-ecPublicKey
pub const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// Signature algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    EcdsaP256Sha256,
    EcdsaP256Sha384,
    EcdsaP384Sha256,
    EcdsaP384Sha384,
    /// RSA PKCS#1 v1.5 with SHA-1, still found on older roots
    RsaPkcs1Sha1,
    RsaPkcs1Sha256,
    RsaPkcs1Sha384,
    RsaPkcs1Sha512,
    RsaPssSha256,
    RsaPssSha384,
    RsaPssSha512,
    /// EdDSA Ed25519 (hash is built-in to the algorithm)
    Ed25519,
}

impl SignatureAlgorithm {
    /// Convert a signature OID, optional curve OID, and optional algorithm
    /// parameters to a SignatureAlgorithm.
    ///
    /// For ECDSA, the curve must be provided from the public key algorithm
    /// parameters.  For RSA-PSS, the hash algorithm is extracted from the
    /// RSASSA-PSS-params in the signature AlgorithmIdentifier parameters.
    pub fn from_oid_with_params(
        sig_oid: &ObjectIdentifier,
        curve_oid: Option<&ObjectIdentifier>,
        params: Option<&der::Any>,
    ) -> Result<Self> {
        const ECDSA_WITH_SHA256: ObjectIdentifier =
            ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
        const ECDSA_WITH_SHA384: ObjectIdentifier =
            ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");
        const RSA_WITH_SHA1: ObjectIdentifier =
            ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");
        const RSA_WITH_SHA256: ObjectIdentifier =
            ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
        const RSA_WITH_SHA384: ObjectIdentifier =
            ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");
        const RSA_WITH_SHA512: ObjectIdentifier =
            ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");
        const RSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");
        const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

        const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
        const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

        match *sig_oid {
            ECDSA_WITH_SHA256 => match curve_oid {
                Some(&SECP256R1) => Ok(SignatureAlgorithm::EcdsaP256Sha256),
                Some(&SECP384R1) => Ok(SignatureAlgorithm::EcdsaP384Sha256),
                Some(oid) => Err(Error::unsupported_algorithm(alloc::format!(
                    "ECDSA-SHA256 with unsupported curve OID: {}",
                    oid
                ))),
                None => Err(Error::unsupported_algorithm(
                    "ECDSA-SHA256 requires a curve OID in the public key parameters",
                )),
            },
            ECDSA_WITH_SHA384 => match curve_oid {
                Some(&SECP256R1) => Ok(SignatureAlgorithm::EcdsaP256Sha384),
                Some(&SECP384R1) => Ok(SignatureAlgorithm::EcdsaP384Sha384),
                Some(oid) => Err(Error::unsupported_algorithm(alloc::format!(
                    "ECDSA-SHA384 with unsupported curve OID: {}",
                    oid
                ))),
                None => Err(Error::unsupported_algorithm(
                    "ECDSA-SHA384 requires a curve OID in the public key parameters",
                )),
            },
            RSA_WITH_SHA1 => Ok(SignatureAlgorithm::RsaPkcs1Sha1),
            RSA_WITH_SHA256 => Ok(SignatureAlgorithm::RsaPkcs1Sha256),
            RSA_WITH_SHA384 => Ok(SignatureAlgorithm::RsaPkcs1Sha384),
            RSA_WITH_SHA512 => Ok(SignatureAlgorithm::RsaPkcs1Sha512),
            RSA_PSS => Self::parse_rsa_pss_params(params),
            ED25519_OID => Ok(SignatureAlgorithm::Ed25519),
            _ => Err(Error::unsupported_algorithm(alloc::format!(
                "OID: {}", sig_oid
            ))),
        }
    }

    /// Convert an OID to a SignatureAlgorithm (without curve information).
    pub fn from_oid(oid: &ObjectIdentifier) -> Result<Self> {
        Self::from_oid_with_params(oid, None, None)
    }

    /// Resolve the algorithm for a signature made with `signer`'s key.
    ///
    /// The curve is only read for EC keys; RSA parameters are NULL.
    pub fn for_signer(
        signature_algorithm: &AlgorithmIdentifier<der::Any>,
        signer: &SubjectPublicKeyInfo,
    ) -> Result<Self> {
        let curve_oid = if signer.algorithm.oid == EC_PUBLIC_KEY {
            signer
                .algorithm
                .parameters
                .as_ref()
                .and_then(|p| p.decode_as::<ObjectIdentifier>().ok())
        } else {
            None
        };

        Self::from_oid_with_params(
            &signature_algorithm.oid,
            curve_oid.as_ref(),
            signature_algorithm.parameters.as_ref(),
        )
    }

    /// Parse RSASSA-PSS-params to determine the hash algorithm.
    ///
    /// ```asn1
    /// RSASSA-PSS-params ::= SEQUENCE {
    ///     hashAlgorithm     [0] HashAlgorithm DEFAULT sha1,
    ///     maskGenAlgorithm  [1] MaskGenAlgorithm DEFAULT mgf1SHA1,
    ///     saltLength        [2] INTEGER DEFAULT 20,
    ///     trailerField      [3] TrailerField DEFAULT trailerFieldBC
    /// }
    /// ```
    fn parse_rsa_pss_params(params: Option<&der::Any>) -> Result<Self> {
        use der::{Reader, SliceReader, TagMode, TagNumber};

        const SHA256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
        const SHA384_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");
        const SHA512_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");

        // ring has no RSA-PSS/SHA-1 verifier, so the SHA-1 defaults are refused.
        let params = match params {
            Some(p) => p,
            None => {
                return Err(Error::unsupported_algorithm(
                    "RSA-PSS without parameters defaults to SHA-1",
                ))
            }
        };

        let mut reader = SliceReader::new(params.value())
            .map_err(|_| Error::unsupported_algorithm("Invalid RSA-PSS parameters encoding"))?;

        let hash_oid: Option<ObjectIdentifier> = reader
            .context_specific::<AlgorithmIdentifier<der::Any>>(TagNumber::N0, TagMode::Explicit)
            .ok()
            .flatten()
            .map(|ai| ai.oid);

        match hash_oid {
            Some(oid) if oid == SHA256_OID => Ok(SignatureAlgorithm::RsaPssSha256),
            Some(oid) if oid == SHA384_OID => Ok(SignatureAlgorithm::RsaPssSha384),
            Some(oid) if oid == SHA512_OID => Ok(SignatureAlgorithm::RsaPssSha512),
            Some(oid) => Err(Error::unsupported_algorithm(alloc::format!(
                "RSA-PSS with unsupported hash OID: {}",
                oid
            ))),
            None => Err(Error::unsupported_algorithm(
                "RSA-PSS with no hashAlgorithm parameter defaults to SHA-1",
            )),
        }
    }
}

/// Crypto backend trait for signature verification.
///
/// Implementations provide the cryptographic operations needed for path
/// validation and CRL authentication.
pub trait CryptoBackend {
    /// Verify `signature` over `tbs_data` with the raw subjectPublicKey bits.
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_DER: &[u8] = include_bytes!("../../test_data/root.der");
    const RSA_ROOT_DER: &[u8] = include_bytes!("../../test_data/rsa_root.der");

    #[test]
    fn test_ecdsa_needs_curve() {
        let sig = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
        let p256 = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
        let p384 = ObjectIdentifier::new_unwrap("1.3.132.0.34");
        let unknown = ObjectIdentifier::new_unwrap("1.2.3.4.5");

        assert_eq!(
            SignatureAlgorithm::from_oid_with_params(&sig, Some(&p256), None).unwrap(),
            SignatureAlgorithm::EcdsaP256Sha256
        );
        assert_eq!(
            SignatureAlgorithm::from_oid_with_params(&sig, Some(&p384), None).unwrap(),
            SignatureAlgorithm::EcdsaP384Sha256
        );
        assert!(SignatureAlgorithm::from_oid_with_params(&sig, Some(&unknown), None).is_err());
        assert!(SignatureAlgorithm::from_oid(&sig).is_err());
    }

    #[test]
    fn test_rsa_pkcs1() {
        let sha1 = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");
        let sha512 = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");
        assert_eq!(
            SignatureAlgorithm::from_oid(&sha1).unwrap(),
            SignatureAlgorithm::RsaPkcs1Sha1
        );
        assert_eq!(
            SignatureAlgorithm::from_oid(&sha512).unwrap(),
            SignatureAlgorithm::RsaPkcs1Sha512
        );
    }

    #[test]
    fn test_unknown_sig_oid_rejected() {
        let oid = ObjectIdentifier::new_unwrap("1.2.3.4.5.6.7");
        assert!(SignatureAlgorithm::from_oid(&oid).is_err());
    }

    #[test]
    fn test_rsa_pss_params() {
        let oid = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");
        assert!(SignatureAlgorithm::from_oid(&oid).is_err());

        // [0] EXPLICIT SEQUENCE { OID 2.16.840.1.101.3.4.2.2 }
        let params_der: &[u8] = &[
            0xa0, 0x0d, 0x30, 0x0b, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x02,
        ];
        let any = der::Any::new(der::Tag::Sequence, params_der).unwrap();
        assert_eq!(
            SignatureAlgorithm::from_oid_with_params(&oid, None, Some(&any)).unwrap(),
            SignatureAlgorithm::RsaPssSha384
        );

        let empty = der::Any::new(der::Tag::Sequence, &[][..]).unwrap();
        assert!(SignatureAlgorithm::from_oid_with_params(&oid, None, Some(&empty)).is_err());
    }

    #[test]
    fn test_for_signer_reads_certificate_keys() {
        let root = crate::Certificate::from_der(ROOT_DER).unwrap();
        assert_eq!(
            SignatureAlgorithm::for_signer(root.signature_algorithm(), root.subject_public_key_info())
                .unwrap(),
            SignatureAlgorithm::EcdsaP256Sha256
        );

        let rsa_root = crate::Certificate::from_der(RSA_ROOT_DER).unwrap();
        assert_eq!(
            SignatureAlgorithm::for_signer(
                rsa_root.signature_algorithm(),
                rsa_root.subject_public_key_info()
            )
            .unwrap(),
            SignatureAlgorithm::RsaPkcs1Sha256
        );
    }
}
