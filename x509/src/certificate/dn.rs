// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! String form of distinguished names and order-independent comparison.
//!
//! Names arrive from signed-document metadata as strings such as
//! `CN=Smith\, John,O=Example,C=US`. [`DistinguishedName::parse`] turns such a
//! string into `(attribute OID, value bytes)` entries;
//! [`DistinguishedName::from_name`] does the same for a decoded certificate
//! name. Two names are equal when their entry multisets are equal, regardless
//! of order or ASN.1 string type.

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use const_oid::ObjectIdentifier;

use super::name::{attribute_name, attribute_oid, Name, EMAIL_ADDRESS};
use crate::error::{Error, Result};

/// Longest attribute name or value accepted by the parser, in bytes
pub const MAX_COMPONENT_LEN: usize = 256;

/// One `type=value` pair of a distinguished name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnEntry {
    pub oid: ObjectIdentifier,
    pub value: Vec<u8>,
}

impl DnEntry {
    /// Canonical ordering: value bytes first, then attribute type.
    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.oid.as_bytes().cmp(other.oid.as_bytes()))
    }
}

/// Distinguished name as an ordered list of entries.
#[derive(Debug, Clone, Default)]
pub struct DistinguishedName {
    entries: Vec<DnEntry>,
}

impl DistinguishedName {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[DnEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, oid: ObjectIdentifier, value: &[u8]) {
        self.entries.push(DnEntry {
            oid,
            value: value.to_vec(),
        });
    }

    /// Flatten a certificate name, keeping the content bytes of each value.
    pub fn from_name(name: &Name) -> Self {
        let entries = name
            .attributes()
            .map(|attr| DnEntry {
                oid: attr.oid,
                value: attr.value_content().to_vec(),
            })
            .collect();
        Self { entries }
    }

    /// Parse a string distinguished name.
    ///
    /// Components are separated by `,` or `;`. Values may be quoted and may
    /// use `\c` and `\XX` escapes. `E` is accepted for `emailAddress`.
    /// Values starting with `#` (hex-encoded BER) are not supported.
    pub fn parse(input: &str) -> Result<Self> {
        log::trace!("parsing distinguished name '{}'", input);
        let mut parser = DnParser {
            input: input.as_bytes(),
            pos: 0,
        };
        let mut dn = DistinguishedName::new();

        while !parser.at_end() {
            parser.skip_spaces();
            if parser.at_end() {
                break;
            }

            let raw_name = parser.read_component(|ch| ch == b'=', false)?;
            let oid = resolve_attribute(&raw_name)?;

            let value = if parser.eat(b'=') {
                match parser.peek() {
                    Some(b'"') => {
                        parser.pos += 1;
                        let value = parser.read_component(|ch| ch == b'"', true)?;
                        if !parser.eat(b'"') {
                            return Err(Error::malformed_name("missing closing quote"));
                        }
                        parser.skip_spaces();
                        match parser.peek() {
                            None => {}
                            Some(ch) if is_separator(ch) => {}
                            Some(ch) => {
                                return Err(Error::malformed_name(alloc::format!(
                                    "unexpected character '{}' after quoted value",
                                    ch as char
                                )))
                            }
                        }
                        value
                    }
                    Some(b'#') => {
                        log::error!("hex-encoded DN values are not supported");
                        return Err(Error::not_implemented(
                            "reading octet string values is not implemented",
                        ));
                    }
                    _ => parser.read_component(is_separator, true)?,
                }
            } else {
                Vec::new()
            };

            // Separator
            parser.pos += 1;
            dn.entries.push(DnEntry { oid, value });
        }

        Ok(dn)
    }

    /// Order-independent equality of two names.
    pub fn matches(&self, other: &DistinguishedName) -> bool {
        compare(self, other)
    }
}

/// Compare two names as multisets of `(type, value)` entries.
pub fn compare(a: &DistinguishedName, b: &DistinguishedName) -> bool {
    if a.entries.len() != b.entries.len() {
        return false;
    }

    let mut a_sorted: Vec<&DnEntry> = a.entries.iter().collect();
    let mut b_sorted: Vec<&DnEntry> = b.entries.iter().collect();
    a_sorted.sort_by(|x, y| x.canonical_cmp(y));
    b_sorted.sort_by(|x, y| x.canonical_cmp(y));

    a_sorted
        .iter()
        .zip(b_sorted.iter())
        .all(|(x, y)| x.canonical_cmp(y) == Ordering::Equal)
}

/// Compare two certificate names with [`compare`].
pub fn names_equal(a: &Name, b: &Name) -> bool {
    compare(&DistinguishedName::from_name(a), &DistinguishedName::from_name(b))
}

impl PartialEq for DistinguishedName {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other)
    }
}

impl Eq for DistinguishedName {}

impl From<&Name> for DistinguishedName {
    fn from(name: &Name) -> Self {
        Self::from_name(name)
    }
}

impl core::str::FromStr for DistinguishedName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn is_separator(ch: u8) -> bool {
    ch == b',' || ch == b';'
}

fn resolve_attribute(raw_name: &[u8]) -> Result<ObjectIdentifier> {
    let name = core::str::from_utf8(raw_name)
        .map_err(|_| Error::malformed_name("attribute name is not valid UTF-8"))?;
    if name == "E" {
        return Ok(EMAIL_ADDRESS);
    }
    attribute_oid(name).ok_or_else(|| {
        log::error!("unknown DN attribute '{}'", name);
        Error::malformed_name(alloc::format!("unknown attribute '{}'", name))
    })
}

struct DnParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl DnParser<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn eat(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Read up to (not including) the first unescaped delimiter.
    fn read_component(&mut self, is_delim: fn(u8) -> bool, trim_trailing: bool) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        // Length of `out` up to the last non-space byte
        let mut significant = 0;

        while let Some(ch) = self.peek() {
            if is_delim(ch) {
                break;
            }
            if out.len() >= MAX_COMPONENT_LEN {
                return Err(Error::malformed_name("component too long"));
            }

            let escaped = ch == b'\\';
            let byte = if escaped {
                self.pos += 1;
                let Some(next) = self.peek() else {
                    break;
                };
                match hex_value(next) {
                    Some(hi) => {
                        self.pos += 1;
                        let lo = self
                            .peek()
                            .and_then(hex_value)
                            .ok_or_else(|| Error::malformed_name("two hex digits expected"))?;
                        (hi << 4) | lo
                    }
                    None => next,
                }
            } else {
                ch
            };

            out.push(byte);
            self.pos += 1;
            if !trim_trailing || escaped || !byte.is_ascii_whitespace() {
                significant = out.len();
            }
        }

        if trim_trailing {
            out.truncate(significant);
        }
        Ok(out)
    }
}

fn hex_value(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for DistinguishedName {
    /// RFC 4514-style rendering in entry order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match attribute_name(&entry.oid) {
                Some(name) => write!(f, "{}=", name)?,
                None => write!(f, "{}=", entry.oid)?,
            }

            let last = entry.value.len().saturating_sub(1);
            for (j, &byte) in entry.value.iter().enumerate() {
                let needs_escape = matches!(byte, b',' | b'+' | b'"' | b'\\' | b'<' | b'>' | b';')
                    || (j == 0 && (byte == b'#' || byte == b' '))
                    || (j == last && byte == b' ');
                if needs_escape {
                    write!(f, "\\{}", byte as char)?;
                } else if byte < 0x20 || byte >= 0x7f {
                    write!(f, "\\{:02X}", byte)?;
                } else {
                    write!(f, "{}", byte as char)?;
                }
            }
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
    use crate::certificate::name::{COUNTRY_NAME, CN, ORGANIZATIONAL_UNIT_NAME, ORGANIZATION_NAME};
    use crate::error::ErrorKind;
    use alloc::string::ToString;

    fn dn(s: &str) -> DistinguishedName {
        DistinguishedName::parse(s).unwrap()
    }

    #[test]
    fn test_parse_simple() {
        let name = dn("CN=Test Root CA, O=Dsig Test,C=US");
        assert_eq!(name.len(), 3);
        assert_eq!(name.entries()[0].oid, CN);
        assert_eq!(name.entries()[0].value, b"Test Root CA");
        assert_eq!(name.entries()[1].oid, ORGANIZATION_NAME);
        assert_eq!(name.entries()[2].oid, COUNTRY_NAME);
        assert_eq!(name.entries()[2].value, b"US");
    }

    #[test]
    fn test_parse_escapes() {
        let name = dn(r"CN=Smith\, John,OU=R\26D");
        assert_eq!(name.entries()[0].value, b"Smith, John");
        assert_eq!(name.entries()[1].oid, ORGANIZATIONAL_UNIT_NAME);
        assert_eq!(name.entries()[1].value, b"R&D");
    }

    #[test]
    fn test_parse_quoted() {
        let name = dn(r#"CN="Smith, John"  ,O=Example"#);
        assert_eq!(name.entries()[0].value, b"Smith, John");
        assert_eq!(name.entries()[1].value, b"Example");
    }

    #[test]
    fn test_parse_semicolon_and_trailing_spaces() {
        let name = dn("CN=A   ;O=B ");
        assert_eq!(name.entries()[0].value, b"A");
        assert_eq!(name.entries()[1].value, b"B");
    }

    #[test]
    fn test_email_synonym() {
        let name = dn("E=user@example.com");
        assert_eq!(name.entries()[0].oid, EMAIL_ADDRESS);
        assert!(compare(&name, &dn("emailAddress=user@example.com")));
    }

    #[test]
    fn test_parse_errors() {
        let err = DistinguishedName::parse("CN=#0403414243").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);

        let err = DistinguishedName::parse(r"CN=bad\4").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDistinguishedName);

        let err = DistinguishedName::parse(r"CN=bad\4x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDistinguishedName);

        let err = DistinguishedName::parse(r#"CN="unterminated"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDistinguishedName);

        let err = DistinguishedName::parse(r#"CN="quoted" junk,O=x"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDistinguishedName);

        let err = DistinguishedName::parse("FOO=bar").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDistinguishedName);
    }

    #[test]
    fn test_component_length_limit() {
        let ok = alloc::format!("CN={}", "a".repeat(MAX_COMPONENT_LEN));
        assert!(DistinguishedName::parse(&ok).is_ok());

        let too_long = alloc::format!("CN={}", "a".repeat(MAX_COMPONENT_LEN + 1));
        let err = DistinguishedName::parse(&too_long).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDistinguishedName);
    }

    #[test]
    fn test_compare_is_order_independent() {
        assert!(compare(&dn("CN=A,O=B"), &dn("O=B,CN=A")));
        assert!(!compare(&dn("CN=A"), &dn("CN=B")));
        assert!(!compare(&dn("CN=A,O=B"), &dn("CN=A")));
        // Same value under a different type
        assert!(!compare(&dn("CN=A"), &dn("O=A")));
        assert_eq!(dn("CN=A, CN=A,O=B"), dn("O=B,CN=A,CN=A"));
        assert_ne!(dn("CN=A,CN=A,O=B"), dn("O=B,O=B,CN=A"));
    }

    #[test]
    fn test_long_names_and_oids() {
        assert!(compare(
            &dn("commonName=A,2.5.4.10=B"),
            &dn("O=B,CN=A")
        ));
    }

    #[test]
    fn test_display_escapes() {
        let name = dn(r"CN=Smith\, John,O=\ lead");
        assert_eq!(name.to_string(), r"CN=Smith\, John,O=\ lead");
        let reparsed = dn(&name.to_string());
        assert_eq!(reparsed, name);
    }

    #[test]
    fn test_escaped_trailing_space_kept() {
        let name = dn(r"CN=tail\ ,O=hex  ,OU=plain  ");
        assert_eq!(name.entries()[0].value, b"tail ");
        assert_eq!(name.entries()[1].value, b"hex ");
        assert_eq!(name.entries()[2].value, b"plain");

        assert_eq!(name.to_string(), r"CN=tail\ ,O=hex\ ,OU=plain");
        assert_eq!(dn(&name.to_string()), name);
    }
}
