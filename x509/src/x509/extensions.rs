// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 extensions consulted during path validation.
//!
//! Only the extensions that influence trust decisions are decoded here:
//! Basic Constraints and Key Usage. Everything else the validator knows by
//! OID so that a critical instance of it is not treated as unhandled.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{Decode, Sequence};

pub use crate::certificate::{Extension, Extensions, SUBJECT_KEY_IDENTIFIER};

// ============================================================================
// Extension OIDs - RFC 5280 Section 4.2
// ============================================================================

/// Basic Constraints - 2.5.29.19
pub const BASIC_CONSTRAINTS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.19");

/// Key Usage - 2.5.29.15
pub const KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.15");

/// Extended Key Usage - 2.5.29.37
pub const EXTENDED_KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.37");

/// Subject Alternative Name - 2.5.29.17
pub const SUBJECT_ALT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.17");

/// Authority Key Identifier - 2.5.29.35
pub const AUTHORITY_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.35");

/// CRL Number - 2.5.29.20
pub const CRL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.20");

/// Extensions the validator understands when they are marked critical.
pub const KNOWN_EXTENSIONS: &[ObjectIdentifier] = &[
    BASIC_CONSTRAINTS,
    KEY_USAGE,
    EXTENDED_KEY_USAGE,
    SUBJECT_ALT_NAME,
    AUTHORITY_KEY_IDENTIFIER,
    SUBJECT_KEY_IDENTIFIER,
];

// ============================================================================
// Basic Constraints - RFC 5280 Section 4.2.1.9
// ============================================================================

/// Basic Constraints extension.
///
/// ```asn1
/// BasicConstraints ::= SEQUENCE {
///     cA                      BOOLEAN DEFAULT FALSE,
///     pathLenConstraint       INTEGER (0..MAX) OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct BasicConstraints {
    #[asn1(default = "default_false")]
    pub ca: bool,

    /// Maximum number of intermediate CAs that may follow
    #[asn1(optional = "true")]
    pub path_len_constraint: Option<u32>,
}

fn default_false() -> bool {
    false
}

impl BasicConstraints {
    pub fn from_extension(ext: &Extension) -> Result<Self, der::Error> {
        Self::from_der(ext.value())
    }
}

// ============================================================================
// Key Usage - RFC 5280 Section 4.2.1.3
// ============================================================================

/// Key Usage bit flags.
///
/// ```asn1
/// KeyUsage ::= BIT STRING {
///     digitalSignature        (0),
///     nonRepudiation          (1),
///     keyEncipherment         (2),
///     dataEncipherment        (3),
///     keyAgreement            (4),
///     keyCertSign             (5),
///     cRLSign                 (6),
///     encipherOnly            (7),
///     decipherOnly            (8)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage {
    bits: u16,
}

impl KeyUsage {
    // Bit 0 of the BIT STRING is the MSB of the first byte; the two raw
    // bytes are kept as a big-endian u16.

    pub const DIGITAL_SIGNATURE: u16 = 1 << 15;
    pub const NON_REPUDIATION: u16 = 1 << 14;
    pub const KEY_ENCIPHERMENT: u16 = 1 << 13;
    pub const DATA_ENCIPHERMENT: u16 = 1 << 12;
    pub const KEY_AGREEMENT: u16 = 1 << 11;
    pub const KEY_CERT_SIGN: u16 = 1 << 10;
    pub const CRL_SIGN: u16 = 1 << 9;
    pub const ENCIPHER_ONLY: u16 = 1 << 8;
    pub const DECIPHER_ONLY: u16 = 1 << 7;

    pub fn new(bits: u16) -> Self {
        Self { bits }
    }

    pub fn has(&self, usage: u16) -> bool {
        (self.bits & usage) != 0
    }

    /// Parse from a DER-encoded BIT STRING
    pub fn from_der(bytes: &[u8]) -> Result<Self, der::Error> {
        let bit_string = der::asn1::BitString::from_der(bytes)?;
        let raw_bytes = bit_string.raw_bytes();

        let bits = match raw_bytes {
            [first] => u16::from_be_bytes([*first, 0]),
            [first, second, ..] => u16::from_be_bytes([*first, *second]),
            [] => 0,
        };

        Ok(Self { bits })
    }

    pub fn from_extension(ext: &Extension) -> Result<Self, der::Error> {
        Self::from_der(ext.value())
    }
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(u16, &str); 9] = [
            (KeyUsage::DIGITAL_SIGNATURE, "digitalSignature"),
            (KeyUsage::NON_REPUDIATION, "nonRepudiation"),
            (KeyUsage::KEY_ENCIPHERMENT, "keyEncipherment"),
            (KeyUsage::DATA_ENCIPHERMENT, "dataEncipherment"),
            (KeyUsage::KEY_AGREEMENT, "keyAgreement"),
            (KeyUsage::KEY_CERT_SIGN, "keyCertSign"),
            (KeyUsage::CRL_SIGN, "cRLSign"),
            (KeyUsage::ENCIPHER_ONLY, "encipherOnly"),
            (KeyUsage::DECIPHER_ONLY, "decipherOnly"),
        ];

        let usages: Vec<&str> = NAMES
            .iter()
            .filter(|(bit, _)| self.has(*bit))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", usages.join(", "))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Certificate;
    use alloc::string::ToString;

    #[test]
    fn test_key_usage_bits() {
        let ku = KeyUsage::new(KeyUsage::DIGITAL_SIGNATURE | KeyUsage::KEY_CERT_SIGN);
        assert!(ku.has(KeyUsage::DIGITAL_SIGNATURE));
        assert!(ku.has(KeyUsage::KEY_CERT_SIGN));
        assert!(!ku.has(KeyUsage::CRL_SIGN));
        assert_eq!(ku.to_string(), "digitalSignature, keyCertSign");
    }

    #[test]
    fn test_key_usage_der() {
        // BIT STRING, 1 unused bit, keyCertSign | cRLSign
        let ku = KeyUsage::from_der(&[0x03, 0x02, 0x01, 0x06]).unwrap();
        assert!(ku.has(KeyUsage::KEY_CERT_SIGN));
        assert!(ku.has(KeyUsage::CRL_SIGN));
        assert!(!ku.has(KeyUsage::DIGITAL_SIGNATURE));
    }

    #[test]
    fn test_extensions_from_fixtures() {
        let root = Certificate::from_der(include_bytes!("../../test_data/root.der")).unwrap();
        let bc =
            BasicConstraints::from_extension(root.find_extension(&BASIC_CONSTRAINTS).unwrap())
                .unwrap();
        assert!(bc.ca);
        assert_eq!(bc.path_len_constraint, None);
        let ku = KeyUsage::from_extension(root.find_extension(&KEY_USAGE).unwrap()).unwrap();
        assert!(ku.has(KeyUsage::KEY_CERT_SIGN));

        let inter =
            Certificate::from_der(include_bytes!("../../test_data/intermediate.der")).unwrap();
        let bc =
            BasicConstraints::from_extension(inter.find_extension(&BASIC_CONSTRAINTS).unwrap())
                .unwrap();
        assert_eq!(bc.path_len_constraint, Some(0));
    }
}
