// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

use dsig_x509::time::Time;
use dsig_x509::{check_certificate, Certificate, CertificateRevocationList};

fuzz_target!(|data: &[u8]| {
    let cert = Certificate::from_der(data).ok();
    let crl = CertificateRevocationList::from_der(data).ok();

    if let Some(cert) = &cert {
        let _ = cert.subject_key_identifier();
        let _ = cert.is_ca();
        let _ = cert.to_string();
        let _ = cert.to_der();
    }

    if let Some(crl) = &crl {
        let _ = crl.to_string();
        if let (Some(cert), Ok(at)) = (&cert, Time::from_unix_secs(1_893_456_000)) {
            let _ = check_certificate(cert, [crl], &at);
        }
    }
});
