// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Distinguished Name (DN) support for X.509 certificates and CRLs.
//!
//! This module provides the ASN.1 representation of names:
//! - RDNSequence (Distinguished Names)
//! - RelativeDistinguishedName (RDN)
//! - AttributeTypeAndValue, keeping the raw value encoding
//! - The attribute-name table shared with the string form in [`super::dn`]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{
    asn1::SetOfVec, Decode, DecodeValue, Encode, EncodeValue, Error, ErrorKind, Header, Length,
    Reader, Sequence, Tag, ValueOrd, Writer,
};

// ============================================================================
// Common Attribute Type OIDs (RFC 5280, Appendix A.1)
// ============================================================================

/// Common Name (CN) - 2.5.4.3
pub const CN: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// Surname (SN) - 2.5.4.4
pub const SURNAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.4");

/// Serial Number - 2.5.4.5
pub const SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");

/// Country (C) - 2.5.4.6
pub const COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");

/// Locality (L) - 2.5.4.7
pub const LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");

/// State or Province (ST) - 2.5.4.8
pub const STATE_OR_PROVINCE_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");

/// Street Address - 2.5.4.9
pub const STREET_ADDRESS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.9");

/// Organization (O) - 2.5.4.10
pub const ORGANIZATION_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");

/// Organizational Unit (OU) - 2.5.4.11
pub const ORGANIZATIONAL_UNIT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");

/// Title - 2.5.4.12
pub const TITLE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.12");

/// Given Name - 2.5.4.42
pub const GIVEN_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.42");

/// Domain Component (DC) - 0.9.2342.19200300.100.1.25
pub const DOMAIN_COMPONENT: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.25");

/// User ID (UID) - 0.9.2342.19200300.100.1.1
pub const USER_ID: ObjectIdentifier = ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.1");

/// Email Address - 1.2.840.113549.1.9.1
pub const EMAIL_ADDRESS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");

/// Attribute short name, long name and OID.
///
/// The first entry for an OID provides the name used for display.
const ATTRIBUTE_NAMES: &[(&str, &str, ObjectIdentifier)] = &[
    ("CN", "commonName", CN),
    ("SN", "surname", SURNAME),
    ("SERIALNUMBER", "serialNumber", SERIAL_NUMBER),
    ("C", "countryName", COUNTRY_NAME),
    ("L", "localityName", LOCALITY_NAME),
    ("ST", "stateOrProvinceName", STATE_OR_PROVINCE_NAME),
    ("STREET", "streetAddress", STREET_ADDRESS),
    ("O", "organizationName", ORGANIZATION_NAME),
    ("OU", "organizationalUnitName", ORGANIZATIONAL_UNIT_NAME),
    ("TITLE", "title", TITLE),
    ("GIVENNAME", "givenName", GIVEN_NAME),
    ("DC", "domainComponent", DOMAIN_COMPONENT),
    ("UID", "userId", USER_ID),
    ("emailAddress", "emailAddress", EMAIL_ADDRESS),
];

/// Resolve an attribute name (short, long or dotted OID) to its OID.
pub fn attribute_oid(name: &str) -> Option<ObjectIdentifier> {
    ATTRIBUTE_NAMES
        .iter()
        .find(|(short, long, _)| *short == name || *long == name)
        .map(|(_, _, oid)| *oid)
        .or_else(|| {
            if name.starts_with(|c: char| c.is_ascii_digit()) {
                ObjectIdentifier::new(name).ok()
            } else {
                None
            }
        })
}

/// Short display name for a known attribute OID.
pub fn attribute_name(oid: &ObjectIdentifier) -> Option<&'static str> {
    ATTRIBUTE_NAMES
        .iter()
        .find(|(_, _, o)| o == oid)
        .map(|(short, _, _)| *short)
}

// ============================================================================
// AttributeTypeAndValue - RFC 5280 Section 4.1.2.4
// ============================================================================

/// AttributeTypeAndValue represents a single attribute in an RDN.
///
/// The value is kept as its raw DER TLV so string types the `der` crate
/// cannot name (e.g. UniversalString, tag 0x1C) still decode and re-encode
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    /// Attribute type (OID)
    pub oid: ObjectIdentifier,
    /// Raw DER-encoded value (tag + length + content).
    raw_value: Vec<u8>,
}

impl<'a> DecodeValue<'a> for AttributeTypeAndValue {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |nested| {
            let oid = ObjectIdentifier::decode(nested)?;

            let remaining = nested.remaining_len();
            let raw_value = nested.read_vec(remaining)?;
            if raw_value.len() < 2 || value_content_range(&raw_value).is_none() {
                return Err(ErrorKind::Length { tag: Tag::Sequence }.into());
            }

            Ok(Self { oid, raw_value })
        })
    }
}

impl EncodeValue for AttributeTypeAndValue {
    fn value_len(&self) -> der::Result<Length> {
        let oid_len = self.oid.encoded_len()?;
        let raw_len = Length::try_from(self.raw_value.len())?;
        oid_len + raw_len
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.oid.encode(writer)?;
        writer.write(&self.raw_value)
    }
}

impl Sequence<'_> for AttributeTypeAndValue {}

/// Byte range of the content inside a short- or long-form TLV.
fn value_content_range(raw: &[u8]) -> Option<core::ops::Range<usize>> {
    let len_byte = *raw.get(1)?;
    let (start, len) = if len_byte & 0x80 == 0 {
        (2, len_byte as usize)
    } else {
        let n = (len_byte & 0x7f) as usize;
        if n == 0 || n > 4 {
            return None;
        }
        let len_bytes = raw.get(2..2 + n)?;
        let len = len_bytes
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | *b as usize);
        (2 + n, len)
    };
    if start + len != raw.len() {
        return None;
    }
    Some(start..raw.len())
}

impl AttributeTypeAndValue {
    /// Create an attribute with a UTF8String value.
    pub fn new_utf8(oid: ObjectIdentifier, value: &str) -> Result<Self, Error> {
        let raw_value = der::asn1::Utf8StringRef::new(value)?.to_der()?;
        Ok(Self { oid, raw_value })
    }

    /// Create an attribute with a PrintableString value.
    pub fn new_printable(oid: ObjectIdentifier, value: &str) -> Result<Self, Error> {
        let raw_value = der::asn1::PrintableStringRef::new(value)?.to_der()?;
        Ok(Self { oid, raw_value })
    }

    /// The raw tag byte of the attribute value.
    pub fn value_tag_byte(&self) -> u8 {
        self.raw_value.first().copied().unwrap_or(0)
    }

    /// The content bytes of the attribute value (after tag + length).
    pub fn value_content(&self) -> &[u8] {
        value_content_range(&self.raw_value)
            .and_then(|r| self.raw_value.get(r))
            .unwrap_or(&[])
    }

    /// Get the attribute value as a UTF-8 string.
    ///
    /// BMPString and UniversalString are converted from UCS-2/UCS-4; the
    /// 8-bit string types must hold valid UTF-8.
    pub fn value_as_str(&self) -> Result<String, Error> {
        let content = self.value_content();
        let bad_value = || -> Error {
            ErrorKind::Value {
                tag: Tag::Utf8String,
            }
            .into()
        };

        match self.value_tag_byte() {
            // UTF8String, PrintableString, TeletexString, IA5String
            0x0C | 0x13 | 0x14 | 0x16 => core::str::from_utf8(content)
                .map(|s| s.to_string())
                .map_err(|_| bad_value()),
            // BMPString
            0x1E => {
                if content.len() % 2 != 0 {
                    return Err(bad_value());
                }
                let units: Vec<u16> = content
                    .chunks(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|_| bad_value())
            }
            // UniversalString
            0x1C => {
                if content.len() % 4 != 0 {
                    return Err(bad_value());
                }
                content
                    .chunks(4)
                    .map(|c| char::from_u32(u32::from_be_bytes([c[0], c[1], c[2], c[3]])))
                    .collect::<Option<String>>()
                    .ok_or_else(bad_value)
            }
            _ => Err(bad_value()),
        }
    }

    /// Get a short name for the attribute type if known.
    pub fn attr_name(&self) -> Option<&'static str> {
        attribute_name(&self.oid)
    }
}

impl fmt::Display for AttributeTypeAndValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attr_name() {
            Some(name) => write!(f, "{}=", name)?,
            None => write!(f, "{}=", self.oid)?,
        }
        match self.value_as_str() {
            Ok(value) => write!(f, "{}", value),
            Err(_) => write!(f, "<error>"),
        }
    }
}

impl ValueOrd for AttributeTypeAndValue {
    fn value_cmp(&self, other: &Self) -> der::Result<core::cmp::Ordering> {
        match self.oid.cmp(&other.oid) {
            core::cmp::Ordering::Equal => Ok(self.raw_value.cmp(&other.raw_value)),
            other_order => Ok(other_order),
        }
    }
}

// ============================================================================
// RelativeDistinguishedName - RFC 5280 Section 4.1.2.4
// ============================================================================

/// RelativeDistinguishedName (RDN) is a SET OF AttributeTypeAndValue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDistinguishedName {
    /// Set of attributes
    pub attributes: SetOfVec<AttributeTypeAndValue>,
}

impl RelativeDistinguishedName {
    /// Create a new RDN with a single attribute.
    pub fn new(attr: AttributeTypeAndValue) -> Result<Self, Error> {
        let mut attributes = SetOfVec::new();
        attributes
            .insert(attr)
            .map_err(|_| ErrorKind::Value { tag: Tag::Set })?;
        Ok(Self { attributes })
    }
}

impl<'a> DecodeValue<'a> for RelativeDistinguishedName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let attributes = SetOfVec::decode_value(reader, header)?;
        Ok(Self { attributes })
    }
}

impl EncodeValue for RelativeDistinguishedName {
    fn value_len(&self) -> der::Result<Length> {
        self.attributes.value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.attributes.encode_value(writer)
    }
}

impl der::FixedTag for RelativeDistinguishedName {
    const TAG: Tag = Tag::Set;
}

impl fmt::Display for RelativeDistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", attr)?;
        }
        Ok(())
    }
}

// ============================================================================
// RDNSequence (Name) - RFC 5280 Section 4.1.2.4
// ============================================================================

/// RDNSequence represents a Distinguished Name (DN).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RDNSequence {
    /// Sequence of RDNs, ordered from root to leaf
    pub rdns: Vec<RelativeDistinguishedName>,
}

impl<'a> DecodeValue<'a> for RDNSequence {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut rdns = Vec::new();
            while !reader.is_finished() {
                rdns.push(RelativeDistinguishedName::decode(reader)?);
            }
            Ok(Self { rdns })
        })
    }
}

impl EncodeValue for RDNSequence {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = Length::ZERO;
        for rdn in &self.rdns {
            len = (len + rdn.encoded_len()?)?;
        }
        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for rdn in &self.rdns {
            rdn.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for RDNSequence {
    const TAG: Tag = Tag::Sequence;
}

impl RDNSequence {
    pub fn new() -> Self {
        Self { rdns: Vec::new() }
    }

    /// Add an RDN to the sequence.
    pub fn push(&mut self, rdn: RelativeDistinguishedName) {
        self.rdns.push(rdn);
    }

    /// Iterate every attribute of every RDN in encoding order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeTypeAndValue> {
        self.rdns.iter().flat_map(|rdn| rdn.attributes.iter())
    }

    /// Find the first attribute with the given OID.
    pub fn find_attr(&self, oid: ObjectIdentifier) -> Option<&AttributeTypeAndValue> {
        self.attributes().find(|attr| attr.oid == oid)
    }

    /// Get the Common Name (CN) if present.
    pub fn common_name(&self) -> Option<String> {
        self.find_attr(CN).and_then(|a| a.value_as_str().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }
}

impl fmt::Display for RDNSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rdn) in self.rdns.iter().rev().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", rdn)?;
        }
        Ok(())
    }
}

/// Type alias for Name (which is just RDNSequence in practice).
pub type Name = RDNSequence;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_attribute_type_and_value() {
        let attr = AttributeTypeAndValue::new_utf8(CN, "Example Corp").unwrap();
        assert_eq!(attr.oid, CN);
        assert_eq!(attr.value_tag_byte(), 0x0C);
        assert_eq!(attr.value_content(), b"Example Corp");
        assert_eq!(attr.value_as_str().unwrap(), "Example Corp");
        assert_eq!(attr.attr_name(), Some("CN"));
        assert_eq!(attr.to_string(), "CN=Example Corp");
    }

    #[test]
    fn test_long_form_value_content() {
        let long = "x".repeat(200);
        let attr = AttributeTypeAndValue::new_utf8(ORGANIZATION_NAME, &long).unwrap();
        assert_eq!(attr.value_content().len(), 200);
        assert_eq!(attr.value_as_str().unwrap(), long);
    }

    #[test]
    fn test_bmp_string_value() {
        // SEQUENCE { OID 2.5.4.3, BMPString "Hi" }
        let der = [
            0x30, 0x0b, 0x06, 0x03, 0x55, 0x04, 0x03, 0x1e, 0x04, 0x00, 0x48, 0x00, 0x69,
        ];
        let attr = AttributeTypeAndValue::from_der(&der).unwrap();
        assert_eq!(attr.value_tag_byte(), 0x1e);
        assert_eq!(attr.value_as_str().unwrap(), "Hi");
        assert_eq!(attr.to_der().unwrap(), der.to_vec());
    }

    #[test]
    fn test_attribute_name_table() {
        assert_eq!(attribute_oid("CN"), Some(CN));
        assert_eq!(attribute_oid("commonName"), Some(CN));
        assert_eq!(attribute_oid("emailAddress"), Some(EMAIL_ADDRESS));
        assert_eq!(attribute_oid("2.5.4.10"), Some(ORGANIZATION_NAME));
        assert_eq!(attribute_oid("XYZ"), None);
        assert_eq!(attribute_name(&COUNTRY_NAME), Some("C"));
    }

    #[test]
    fn test_rdn_sequence() {
        let mut name = RDNSequence::new();
        name.push(RelativeDistinguishedName::new(
            AttributeTypeAndValue::new_printable(COUNTRY_NAME, "US").unwrap(),
        )
        .unwrap());
        name.push(RelativeDistinguishedName::new(
            AttributeTypeAndValue::new_utf8(ORGANIZATION_NAME, "Example Inc").unwrap(),
        )
        .unwrap());
        name.push(RelativeDistinguishedName::new(
            AttributeTypeAndValue::new_utf8(CN, "John Doe").unwrap(),
        )
        .unwrap());

        assert_eq!(name.common_name().unwrap(), "John Doe");
        assert_eq!(name.attributes().count(), 3);
        assert_eq!(name.to_string(), "CN=John Doe, O=Example Inc, C=US");

        let der = name.to_der().unwrap();
        let decoded = RDNSequence::from_der(&der).unwrap();
        assert_eq!(name, decoded);
    }

    #[test]
    fn test_truncated_value_rejected() {
        // Value claims 5 content bytes but carries 2.
        let der = vec![0x30, 0x09, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0c, 0x05, 0x41, 0x42];
        assert!(AttributeTypeAndValue::from_der(&der).is_err());
    }
}
