// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 extensions and the default certificate path validator.
//!
//! Path building and checking follow RFC 5280 closely enough for signer
//! certificates: basic constraints, key usage, signatures, validity
//! periods and critical extensions.

pub mod extensions;
pub mod validator;

pub use extensions::{BasicConstraints, KeyUsage};
pub use validator::Validator;
