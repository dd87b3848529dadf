// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 Certificate structure and parsing.
//!
//! Certificates are read-only inputs: the store and matcher only look at
//! identity fields (subject, issuer, serial, subject key identifier) and the
//! validator re-checks signatures over the exact `tbsCertificate` bytes kept
//! from decoding.
//!
//! # Examples
//!
//! ```no_run
//! use dsig_x509::Certificate;
//!
//! # fn example(der_bytes: &[u8], pem_string: &str) -> dsig_x509::Result<()> {
//! // Parse from DER
//! let cert = Certificate::from_der(der_bytes)?;
//! println!("Subject: {}", cert.subject());
//!
//! // Parse from PEM
//! let cert = Certificate::from_pem(pem_string)?;
//!
//! // Convert back to DER
//! let der_bytes = cert.to_der()?;
//! # let _ = der_bytes;
//! # Ok(())
//! # }
//! ```

pub mod dn;
pub mod name;

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{
    asn1::{BitString, OctetString, UintRef},
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Tag, TagMode,
    TagNumber, Writer,
};

use crate::certificate::name::Name;
use crate::error::{EncodingError, Error, Result};
use crate::time::Validity;
use spki::AlgorithmIdentifier;

// Re-export spki types
pub use spki::SubjectPublicKeyInfo as SpkiInfo;

/// Type alias for SubjectPublicKeyInfo with flexible parameters
pub type SubjectPublicKeyInfo = SpkiInfo<der::Any, BitString>;

/// PEM label of a certificate block
pub const PEM_LABEL: &str = "CERTIFICATE";

/// id-ce-subjectKeyIdentifier
pub const SUBJECT_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.14");

// ============================================================================
// Version - RFC 5280 Section 4.1.2.1
// ============================================================================

/// X.509 certificate version.
///
/// ```asn1
/// Version  ::=  INTEGER  {  v1(0), v2(1), v3(2)  }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Version {
    V1 = 0,
    V2 = 1,
    #[default]
    V3 = 2,
}

impl Version {
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Version::V1),
            1 => Ok(Version::V2),
            2 => Ok(Version::V3),
            v => Err(Error::InvalidVersion(v)),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.value() + 1)
    }
}

// ============================================================================
// Extensions - RFC 5280 Section 4.1.2.9
// ============================================================================

/// A single X.509 v3 extension.
///
/// ```asn1
/// Extension  ::=  SEQUENCE  {
///     extnID      OBJECT IDENTIFIER,
///     critical    BOOLEAN DEFAULT FALSE,
///     extnValue   OCTET STRING
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct Extension {
    pub extn_id: ObjectIdentifier,

    #[asn1(default = "default_false")]
    pub critical: bool,

    /// DER encoding of the extension-specific value
    pub extn_value: OctetString,
}

fn default_false() -> bool {
    false
}

impl Extension {
    pub fn new(extn_id: ObjectIdentifier, critical: bool, extn_value: Vec<u8>) -> Result<Self> {
        Ok(Self {
            extn_id,
            critical,
            extn_value: OctetString::new(extn_value)?,
        })
    }

    pub fn value(&self) -> &[u8] {
        self.extn_value.as_bytes()
    }
}

/// SEQUENCE OF Extension, shared by certificates and CRLs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extensions {
    pub extensions: Vec<Extension>,
}

impl Extensions {
    pub fn iter(&self) -> core::slice::Iter<'_, Extension> {
        self.extensions.iter()
    }

    /// Find an extension by OID
    pub fn find(&self, oid: &ObjectIdentifier) -> Option<&Extension> {
        self.extensions.iter().find(|e| &e.extn_id == oid)
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }
}

impl<'a> DecodeValue<'a> for Extensions {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let mut extensions = Vec::new();
        reader.read_nested(header.length, |seq_reader| {
            while !seq_reader.is_finished() {
                extensions.push(Extension::decode(seq_reader)?);
            }
            Ok(())
        })?;

        Ok(Self { extensions })
    }
}

impl EncodeValue for Extensions {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = Length::ZERO;
        for ext in &self.extensions {
            len = (len + ext.encoded_len()?)?;
        }
        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for ext in &self.extensions {
            ext.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for Extensions {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// TBSCertificate - RFC 5280 Section 4.1
// ============================================================================

/// The signed portion of a certificate.
///
/// ```asn1
/// TBSCertificate  ::=  SEQUENCE  {
///     version         [0]  EXPLICIT Version DEFAULT v1,
///     serialNumber         CertificateSerialNumber,
///     signature            AlgorithmIdentifier,
///     issuer               Name,
///     validity             Validity,
///     subject              Name,
///     subjectPublicKeyInfo SubjectPublicKeyInfo,
///     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///     extensions      [3]  EXPLICIT Extensions OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TBSCertificate {
    pub version: Version,

    /// Serial number magnitude, big-endian without leading zeros
    serial_number_bytes: Vec<u8>,

    pub signature: AlgorithmIdentifier<der::Any>,
    pub issuer: Name,
    pub validity: Validity,
    pub subject: Name,
    pub subject_public_key_info: SubjectPublicKeyInfo,
    pub issuer_unique_id: Option<BitString>,
    pub subject_unique_id: Option<BitString>,
    pub extensions: Option<Extensions>,
}

impl TBSCertificate {
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number_bytes
    }
}

impl<'a> DecodeValue<'a> for TBSCertificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let version = match reader
                .context_specific::<u8>(TagNumber::N0, TagMode::Explicit)?
            {
                Some(v) => Version::from_value(v)
                    .map_err(|_| der::Error::from(der::ErrorKind::Value { tag: Tag::Integer }))?,
                None => Version::V1,
            };

            let serial_number = UintRef::decode(reader)?;
            let serial_number_bytes = serial_number.as_bytes().to_vec();
            let signature = AlgorithmIdentifier::decode(reader)?;
            let issuer = Name::decode(reader)?;
            let validity = Validity::decode(reader)?;
            let subject = Name::decode(reader)?;
            let subject_public_key_info = SubjectPublicKeyInfo::decode(reader)?;

            let issuer_unique_id =
                reader.context_specific::<BitString>(TagNumber::N1, TagMode::Implicit)?;
            let subject_unique_id =
                reader.context_specific::<BitString>(TagNumber::N2, TagMode::Implicit)?;
            let extensions =
                reader.context_specific::<Extensions>(TagNumber::N3, TagMode::Explicit)?;

            Ok(Self {
                version,
                serial_number_bytes,
                signature,
                issuer,
                validity,
                subject,
                subject_public_key_info,
                issuer_unique_id,
                subject_unique_id,
                extensions,
            })
        })
    }
}

impl der::FixedTag for TBSCertificate {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// Certificate - RFC 5280 Section 4.1
// ============================================================================

/// X.509 Certificate structure.
///
/// ```asn1
/// Certificate  ::=  SEQUENCE  {
///     tbsCertificate       TBSCertificate,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signatureValue       BIT STRING
/// }
/// ```
///
/// The encoded `tbsCertificate` is kept verbatim so signatures are checked
/// over the bytes the issuer signed, not over a re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub tbs_certificate: TBSCertificate,
    pub signature_algorithm: AlgorithmIdentifier<der::Any>,
    pub signature_value: BitString,
    tbs_der: Vec<u8>,
}

impl Certificate {
    /// Parse a Certificate from DER-encoded bytes.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        Ok(Self::decode(&mut der::SliceReader::new(bytes)?)?)
    }

    /// Parse the first `CERTIFICATE` block of a PEM document.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let der_bytes = decode_pem(pem, PEM_LABEL)?;
        Self::from_der(&der_bytes)
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(Encode::to_der(self)?)
    }

    pub fn to_pem(&self) -> Result<String> {
        use pem_rfc7468::LineEnding;

        let der = self.to_der()?;
        Ok(pem_rfc7468::encode_string(PEM_LABEL, LineEnding::LF, &der)?)
    }

    /// The exact DER bytes of `tbsCertificate`, as signed by the issuer.
    pub fn tbs_der(&self) -> &[u8] {
        &self.tbs_der
    }

    pub fn signature_bytes(&self) -> &[u8] {
        self.signature_value.raw_bytes()
    }

    pub fn subject(&self) -> &Name {
        &self.tbs_certificate.subject
    }

    pub fn issuer(&self) -> &Name {
        &self.tbs_certificate.issuer
    }

    /// Serial number as an unsigned big-endian magnitude.
    pub fn serial_number(&self) -> &[u8] {
        self.tbs_certificate.serial_number()
    }

    pub fn validity(&self) -> &Validity {
        &self.tbs_certificate.validity
    }

    pub fn version(&self) -> Version {
        self.tbs_certificate.version
    }

    pub fn extensions(&self) -> Option<&Extensions> {
        self.tbs_certificate.extensions.as_ref()
    }

    pub fn find_extension(&self, oid: &ObjectIdentifier) -> Option<&Extension> {
        self.extensions().and_then(|exts| exts.find(oid))
    }

    /// Check if this is a CA certificate.
    /// Based on RFC 5280 Basic Constraints extension (2.5.29.19).
    pub fn is_ca(&self) -> bool {
        match self.find_extension(&crate::x509::extensions::BASIC_CONSTRAINTS) {
            Some(ext) => crate::x509::extensions::BasicConstraints::from_der(ext.value())
                .map(|bc| bc.ca)
                .unwrap_or(false),
            None => false,
        }
    }

    /// Issuer and subject name are equal under the DN comparator.
    pub fn is_self_issued(&self) -> bool {
        dn::names_equal(self.issuer(), self.subject())
    }

    /// Contents of the subjectKeyIdentifier extension, if present and
    /// well-formed.
    pub fn subject_key_identifier(&self) -> Option<Vec<u8>> {
        let ext = self.find_extension(&SUBJECT_KEY_IDENTIFIER)?;
        match OctetString::from_der(ext.value()) {
            Ok(ski) => Some(ski.as_bytes().to_vec()),
            Err(e) => {
                log::debug!("malformed subjectKeyIdentifier: {}", e);
                None
            }
        }
    }

    pub fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo {
        &self.tbs_certificate.subject_public_key_info
    }

    /// Raw subjectPublicKey bits (an uncompressed EC point or an
    /// `RSAPublicKey` structure).
    pub fn public_key_bytes(&self) -> &[u8] {
        self.subject_public_key_info().subject_public_key.raw_bytes()
    }

    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier<der::Any> {
        &self.signature_algorithm
    }
}

impl<'a> DecodeValue<'a> for Certificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let tbs_der = der::Any::decode(reader)?.to_der()?;
            let tbs_certificate = TBSCertificate::from_der(&tbs_der)?;
            let signature_algorithm = AlgorithmIdentifier::decode(reader)?;
            let signature_value = BitString::decode(reader)?;

            Ok(Self {
                tbs_certificate,
                signature_algorithm,
                signature_value,
                tbs_der,
            })
        })
    }
}

impl EncodeValue for Certificate {
    fn value_len(&self) -> der::Result<Length> {
        Length::try_from(self.tbs_der.len())?
            + self.signature_algorithm.encoded_len()?
            + self.signature_value.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        writer.write(&self.tbs_der)?;
        self.signature_algorithm.encode(writer)?;
        self.signature_value.encode(writer)?;
        Ok(())
    }
}

impl der::FixedTag for Certificate {
    const TAG: Tag = Tag::Sequence;
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Certificate:")?;
        writeln!(f, "  Version: {}", self.version())?;
        writeln!(f, "  Serial Number: {:02x?}", self.serial_number())?;
        writeln!(f, "  Signature Algorithm: {}", self.signature_algorithm.oid)?;
        writeln!(f, "  Issuer: {}", self.issuer())?;
        writeln!(f, "  Validity:")?;
        writeln!(f, "    Not Before: {}", self.validity().not_before)?;
        writeln!(f, "    Not After: {}", self.validity().not_after)?;
        writeln!(f, "  Subject: {}", self.subject())?;

        if let Some(extensions) = self.extensions() {
            writeln!(f, "  Extensions: {} extension(s)", extensions.len())?;
        }

        Ok(())
    }
}

/// Decode the first PEM block, requiring `label`.
pub(crate) fn decode_pem(pem: &str, label: &str) -> Result<Vec<u8>> {
    use pem_rfc7468::Decoder;

    let mut decoder = Decoder::new(pem.as_bytes())?;

    let found = decoder.type_label();
    if found != label {
        return Err(Error::EncodingError(EncodingError::InvalidPemLabel {
            expected: label.to_string(),
            found: found.to_string(),
        }));
    }

    let der_len = decoder.remaining_len();
    let mut der_bytes = alloc::vec![0u8; der_len];
    let decoded = decoder.decode(&mut der_bytes)?.len();
    der_bytes.truncate(decoded);
    Ok(der_bytes)
}

// ============================================================================
// Tests
// ============================================================================
