// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

use dsig_x509::certificate::dn::{compare, DistinguishedName};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(name) = DistinguishedName::parse(text) {
        assert!(compare(&name, &name));
        if let Ok(again) = DistinguishedName::parse(&name.to_string()) {
            let _ = compare(&name, &again);
        }
    }
});
