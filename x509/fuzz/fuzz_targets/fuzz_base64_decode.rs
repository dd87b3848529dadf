// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

#![no_main]

use libfuzzer_sys::fuzz_target;

use dsig_transforms::base64::{decode, Base64StreamCodec};

fuzz_target!(|data: &[u8]| {
    let one_shot = core::str::from_utf8(data).ok().map(decode);

    // Same input fed in small uneven chunks through the streaming codec.
    let mut codec = Base64StreamCodec::decoder();
    let mut out = Vec::new();
    let mut buf = [0u8; 5];
    let mut failed = false;
    for chunk in data.chunks(3) {
        match codec.update(chunk, &mut buf) {
            Ok(n) => out.extend_from_slice(&buf[..n]),
            Err(_) => {
                failed = true;
                break;
            }
        }
    }
    if !failed {
        let mut tail = [0u8; 8];
        match codec.finalize(&mut tail) {
            Ok(n) => out.extend_from_slice(&tail[..n]),
            Err(_) => failed = true,
        }
    }

    if let Some(Ok(expected)) = one_shot {
        if !failed {
            assert_eq!(out, expected);
        }
    }
});
