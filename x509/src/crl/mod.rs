// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v2 Certificate Revocation Lists (RFC 5280 Section 5).
//!
//! Only what revocation checking needs is interpreted: the issuer, the
//! update times and the revoked serial numbers. The encoded `tbsCertList`
//! is kept so the list can be authenticated against a trust anchor.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use der::{
    asn1::{BitString, UintRef},
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Tag, TagMode, TagNumber,
    Writer,
};
use spki::AlgorithmIdentifier;

use crate::certificate::name::Name;
use crate::certificate::{decode_pem, Extensions};
use crate::error::{Error, Result};
use crate::time::Time;

/// PEM label of a CRL block
pub const PEM_LABEL: &str = "X509 CRL";

/// One entry of `revokedCertificates`.
///
/// ```asn1
/// SEQUENCE {
///     userCertificate         CertificateSerialNumber,
///     revocationDate          Time,
///     crlEntryExtensions      Extensions OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokedCertificate {
    serial_number: Vec<u8>,
    pub revocation_date: Time,
    pub extensions: Option<Extensions>,
}

impl RevokedCertificate {
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number
    }
}

impl<'a> DecodeValue<'a> for RevokedCertificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let serial_number = UintRef::decode(reader)?.as_bytes().to_vec();
            let revocation_date = Time::decode(reader)?;
            let extensions = Option::<Extensions>::decode(reader)?;
            Ok(Self {
                serial_number,
                revocation_date,
                extensions,
            })
        })
    }
}

impl der::FixedTag for RevokedCertificate {
    const TAG: Tag = Tag::Sequence;
}

/// The signed portion of a CRL.
///
/// ```asn1
/// TBSCertList  ::=  SEQUENCE  {
///     version                 Version OPTIONAL,
///     signature               AlgorithmIdentifier,
///     issuer                  Name,
///     thisUpdate              Time,
///     nextUpdate              Time OPTIONAL,
///     revokedCertificates     SEQUENCE OF SEQUENCE { ... } OPTIONAL,
///     crlExtensions       [0] EXPLICIT Extensions OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TbsCertList {
    /// `None` for v1 lists, `Some(1)` for v2
    pub version: Option<u8>,
    pub signature: AlgorithmIdentifier<der::Any>,
    pub issuer: Name,
    pub this_update: Time,
    pub next_update: Option<Time>,
    pub revoked_certificates: Vec<RevokedCertificate>,
    pub crl_extensions: Option<Extensions>,
}

fn next_is_time<'a, R: Reader<'a>>(reader: &R) -> bool {
    !reader.is_finished()
        && matches!(
            reader.peek_tag(),
            Ok(Tag::UtcTime) | Ok(Tag::GeneralizedTime)
        )
}

impl<'a> DecodeValue<'a> for TbsCertList {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let version = Option::<u8>::decode(reader)?;
            let signature = AlgorithmIdentifier::decode(reader)?;
            let issuer = Name::decode(reader)?;
            let this_update = Time::decode(reader)?;
            let next_update = if next_is_time(reader) {
                Some(Time::decode(reader)?)
            } else {
                None
            };

            let mut revoked_certificates = Vec::new();
            if !reader.is_finished() && reader.peek_tag()? == Tag::Sequence {
                let list_header = Header::decode(reader)?;
                reader.read_nested(list_header.length, |list| {
                    while !list.is_finished() {
                        revoked_certificates.push(RevokedCertificate::decode(list)?);
                    }
                    Ok(())
                })?;
            }

            let crl_extensions =
                reader.context_specific::<Extensions>(TagNumber::N0, TagMode::Explicit)?;

            Ok(Self {
                version,
                signature,
                issuer,
                this_update,
                next_update,
                revoked_certificates,
                crl_extensions,
            })
        })
    }
}

impl der::FixedTag for TbsCertList {
    const TAG: Tag = Tag::Sequence;
}

/// A parsed CRL.
///
/// ```asn1
/// CertificateList  ::=  SEQUENCE  {
///     tbsCertList          TBSCertList,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signatureValue       BIT STRING
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRevocationList {
    pub tbs_cert_list: TbsCertList,
    pub signature_algorithm: AlgorithmIdentifier<der::Any>,
    pub signature_value: BitString,
    tbs_der: Vec<u8>,
}

impl CertificateRevocationList {
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        Ok(Self::decode(&mut der::SliceReader::new(bytes)?)?)
    }

    /// Parse the first `X509 CRL` block of a PEM document.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let der_bytes = decode_pem(pem, PEM_LABEL)?;
        Self::from_der(&der_bytes)
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(Encode::to_der(self)?)
    }

    pub fn to_pem(&self) -> Result<String> {
        let der = self.to_der()?;
        Ok(pem_rfc7468::encode_string(
            PEM_LABEL,
            pem_rfc7468::LineEnding::LF,
            &der,
        )?)
    }

    pub fn issuer(&self) -> &Name {
        &self.tbs_cert_list.issuer
    }

    pub fn this_update(&self) -> &Time {
        &self.tbs_cert_list.this_update
    }

    pub fn next_update(&self) -> Option<&Time> {
        self.tbs_cert_list.next_update.as_ref()
    }

    /// A list past its nextUpdate carries no usable revocation information.
    /// Lists without nextUpdate never expire.
    pub fn is_expired_at(&self, at: &Time) -> bool {
        match self.next_update() {
            Some(next_update) => next_update < at,
            None => false,
        }
    }

    pub fn revoked_certificates(&self) -> &[RevokedCertificate] {
        &self.tbs_cert_list.revoked_certificates
    }

    /// Entry for `serial` (big-endian magnitude), if listed.
    pub fn find_serial(&self, serial: &[u8]) -> Option<&RevokedCertificate> {
        self.revoked_certificates()
            .iter()
            .find(|entry| entry.serial_number() == serial)
    }

    pub fn extensions(&self) -> Option<&Extensions> {
        self.tbs_cert_list.crl_extensions.as_ref()
    }

    /// The exact DER bytes of `tbsCertList`, as signed by the issuer.
    pub fn tbs_der(&self) -> &[u8] {
        &self.tbs_der
    }

    pub fn signature_bytes(&self) -> &[u8] {
        self.signature_value.raw_bytes()
    }

    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier<der::Any> {
        &self.signature_algorithm
    }
}

impl<'a> DecodeValue<'a> for CertificateRevocationList {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let tbs_der = der::Any::decode(reader)?.to_der()?;
            let tbs_cert_list = TbsCertList::from_der(&tbs_der)?;
            let signature_algorithm = AlgorithmIdentifier::decode(reader)?;
            let signature_value = BitString::decode(reader)?;

            Ok(Self {
                tbs_cert_list,
                signature_algorithm,
                signature_value,
                tbs_der,
            })
        })
    }
}

impl EncodeValue for CertificateRevocationList {
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

impl der::FixedTag for CertificateRevocationList {
    const TAG: Tag = Tag::Sequence;
}

impl fmt::Display for CertificateRevocationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Certificate Revocation List:")?;
        writeln!(f, "  Issuer: {}", self.issuer())?;
        writeln!(f, "  This Update: {}", self.this_update())?;
        match self.next_update() {
            Some(t) => writeln!(f, "  Next Update: {}", t)?,
            None => writeln!(f, "  Next Update: none")?,
        }
        writeln!(
            f,
            "  Revoked Certificates: {}",
            self.revoked_certificates().len()
        )
    }
}

impl core::str::FromStr for CertificateRevocationList {
    type Err = Error;

    fn from_str(pem: &str) -> Result<Self> {
        Self::from_pem(pem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::dn::names_equal;
    use crate::Certificate;
    use alloc::string::ToString;

    const ROOT_CRL_DER: &[u8] = include_bytes!("../../test_data/root_crl.der");
    const ROOT_CRL_PEM: &str = include_str!("../../test_data/root_crl.pem");
    const EXPIRED_CRL_DER: &[u8] = include_bytes!("../../test_data/root_crl_expired.der");

    // 2030-01-01T00:00:00Z
    const JAN_2030: u64 = 1_893_456_000;

    #[test]
    fn test_parse_root_crl() {
        let crl = CertificateRevocationList::from_der(ROOT_CRL_DER).unwrap();
        assert_eq!(crl.tbs_cert_list.version, Some(1));
        assert_eq!(crl.revoked_certificates().len(), 1);
        assert_eq!(crl.revoked_certificates()[0].serial_number(), &[0x10, 0x01]);
        assert!(crl.find_serial(&[0x10, 0x01]).is_some());
        assert!(crl.find_serial(&[0x10, 0x02]).is_none());
        assert_eq!(crl.extensions().map(|e| e.len()), Some(1));

        let root = Certificate::from_der(include_bytes!("../../test_data/root.der")).unwrap();
        assert!(names_equal(crl.issuer(), root.subject()));
    }

    #[test]
    fn test_pem_and_der_agree() {
        let from_pem: CertificateRevocationList = ROOT_CRL_PEM.parse().unwrap();
        let from_der = CertificateRevocationList::from_der(ROOT_CRL_DER).unwrap();
        assert_eq!(from_pem, from_der);
        assert_eq!(from_der.to_der().unwrap(), ROOT_CRL_DER);
        assert!(from_der.to_pem().unwrap().starts_with("-----BEGIN X509 CRL-----"));
    }

    #[test]
    fn test_expiry() {
        let at = Time::from_unix_secs(JAN_2030).unwrap();
        let fresh = CertificateRevocationList::from_der(ROOT_CRL_DER).unwrap();
        assert!(!fresh.is_expired_at(&at));

        let expired = CertificateRevocationList::from_der(EXPIRED_CRL_DER).unwrap();
        assert!(expired.is_expired_at(&at));
        // 2025-03-01, before its nextUpdate
        assert!(!expired.is_expired_at(&Time::from_unix_secs(1_740_787_200).unwrap()));
    }

    #[test]
    fn test_certificate_is_not_a_crl() {
        let cert_pem = include_str!("../../test_data/root.pem");
        assert!(CertificateRevocationList::from_pem(cert_pem).is_err());
        let cert_der = include_bytes!("../../test_data/root.der");
        assert!(CertificateRevocationList::from_der(cert_der).is_err());
    }

    #[test]
    fn test_display() {
        let crl = CertificateRevocationList::from_der(ROOT_CRL_DER).unwrap();
        let text = crl.to_string();
        assert!(text.contains("Test Root CA"));
        assert!(text.contains("Revoked Certificates: 1"));
    }
}
