// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate lookup by the identity criteria carried in signed-document
//! key information.
//!
//! A [`CertQuery`] holds up to three independent criteria. They are tried in
//! priority order (subject name, then issuer name plus serial number, then
//! subject key identifier) and the first criterion that finds a certificate
//! wins. Criteria are alternatives, not a conjunction.

extern crate alloc;

use alloc::vec::Vec;

use crate::certificate::dn::{compare, DistinguishedName};
use crate::certificate::Certificate;
use crate::error::{Error, ParseError, Result};

/// Identity criteria for [`find_certificate`].
#[derive(Debug, Clone, Default)]
pub struct CertQuery {
    subject: Option<DistinguishedName>,
    issuer_serial: Option<(DistinguishedName, Vec<u8>)>,
    ski: Option<Vec<u8>>,
}

impl CertQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match on the subject name, given in string form.
    pub fn subject(mut self, name: &str) -> Result<Self> {
        self.subject = Some(DistinguishedName::parse(name)?);
        Ok(self)
    }

    /// Match on issuer name and serial number. The serial is a decimal
    /// string as carried by `X509IssuerSerial`.
    pub fn issuer_serial(mut self, issuer: &str, serial: &str) -> Result<Self> {
        let issuer = DistinguishedName::parse(issuer)?;
        let serial = parse_decimal_serial(serial)?;
        self.issuer_serial = Some((issuer, serial));
        Ok(self)
    }

    /// Match on raw subject key identifier bytes.
    pub fn ski(mut self, ski: &[u8]) -> Self {
        self.ski = Some(ski.to_vec());
        self
    }

    /// Match on a base64-encoded subject key identifier.
    pub fn ski_base64(mut self, ski: &str) -> Result<Self> {
        self.ski = Some(dsig_transforms::base64::decode(ski)?);
        Ok(self)
    }

    /// No criteria supplied.
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.issuer_serial.is_none() && self.ski.is_none()
    }
}

/// Find the first certificate in `pool` matching `query`.
pub fn find_certificate<'a, I>(pool: I, query: &CertQuery) -> Option<&'a Certificate>
where
    I: IntoIterator<Item = &'a Certificate>,
    I::IntoIter: Clone,
{
    let pool = pool.into_iter();

    if let Some(subject) = &query.subject {
        log::trace!("find_certificate: by subject '{}'", subject);
        if let Some(cert) = pool
            .clone()
            .find(|cert| compare(subject, &DistinguishedName::from_name(cert.subject())))
        {
            return Some(cert);
        }
    }

    if let Some((issuer, serial)) = &query.issuer_serial {
        log::trace!("find_certificate: by issuer '{}' and serial", issuer);
        if let Some(cert) = pool.clone().find(|cert| {
            cert.serial_number() == serial.as_slice()
                && compare(issuer, &DistinguishedName::from_name(cert.issuer()))
        }) {
            return Some(cert);
        }
    }

    if let Some(ski) = &query.ski {
        log::trace!("find_certificate: by subject key identifier");
        if let Some(cert) = pool
            .clone()
            .find(|cert| cert.subject_key_identifier().as_deref() == Some(ski.as_slice()))
        {
            return Some(cert);
        }
    }

    log::trace!("find_certificate: no match");
    None
}

/// Convert a decimal serial number to its big-endian magnitude, the form
/// [`Certificate::serial_number`] returns.
pub fn parse_decimal_serial(serial: &str) -> Result<Vec<u8>> {
    let digits = serial.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::ParseError(ParseError::InvalidInteger(
            alloc::format!("'{}' is not a decimal serial number", serial),
        )));
    }

    // Little-endian accumulator, reversed at the end.
    let mut magnitude: Vec<u8> = Vec::new();
    for digit in digits.bytes().map(|b| b - b'0') {
        let mut carry = digit as u16;
        for byte in magnitude.iter_mut() {
            let v = (*byte as u16) * 10 + carry;
            *byte = (v & 0xff) as u8;
            carry = v >> 8;
        }
        if carry > 0 {
            magnitude.push(carry as u8);
        }
    }

    if magnitude.is_empty() {
        magnitude.push(0);
    }
    magnitude.reverse();
    Ok(magnitude)
}
