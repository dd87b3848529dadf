// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! CRL-based revocation status.
//!
//! Only the first CRL whose issuer equals the certificate's issuer is
//! consulted. An expired CRL is treated as carrying no information.

use crate::certificate::dn::names_equal;
use crate::certificate::Certificate;
use crate::crl::CertificateRevocationList;
use crate::time::Time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationStatus {
    Revoked,
    NotRevoked,
}

impl RevocationStatus {
    pub fn is_revoked(self) -> bool {
        self == RevocationStatus::Revoked
    }
}

/// Check `cert` against `crls` at time `at`.
pub fn check_certificate<'a, I>(cert: &Certificate, crls: I, at: &Time) -> RevocationStatus
where
    I: IntoIterator<Item = &'a CertificateRevocationList>,
{
    let crl = match crls
        .into_iter()
        .find(|crl| names_equal(crl.issuer(), cert.issuer()))
    {
        Some(crl) => crl,
        None => return RevocationStatus::NotRevoked,
    };

    if crl.is_expired_at(at) {
        log::warn!(
            "CRL from '{}' expired at {:?}, ignoring it",
            crl.issuer(),
            crl.next_update()
        );
        return RevocationStatus::NotRevoked;
    }

    match crl.find_serial(cert.serial_number()) {
        Some(entry) => {
            log::debug!(
                "certificate '{}' revoked on {}",
                cert.subject(),
                entry.revocation_date
            );
            RevocationStatus::Revoked
        }
        None => RevocationStatus::NotRevoked,
    }
}
