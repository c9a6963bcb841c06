// WVM - wvm-format
// Module: Text Validation Policies
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Text (name) validation.
//!
//! A pure function over a byte range and a policy: success, or an error code
//! with the offset of the first offending byte. The decoder delegates every
//! name it reads (imports, exports, custom-section names) here.

use crate::prelude::*;

/// Policy applied to name bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPolicy {
    /// Strict UTF-8
    #[default]
    Strict,
    /// Strict UTF-8, additionally rejecting NUL bytes
    RejectNul,
    /// No validation; invalid sequences are replaced when materialized
    Unchecked,
}

/// Validate `bytes` under `policy`.
///
/// `offset` is the absolute position of `bytes[0]`; reported error offsets
/// point at the first offending byte.
pub fn validate_name(bytes: &[u8], policy: TextPolicy, offset: usize) -> Result<()> {
    match policy {
        TextPolicy::Unchecked => Ok(()),
        TextPolicy::Strict => check_utf8(bytes, offset),
        TextPolicy::RejectNul => {
            check_utf8(bytes, offset)?;
            if let Some(pos) = bytes.iter().position(|&b| b == 0) {
                return Err(Error::new(
                    ErrorCategory::Text,
                    codes::NAME_CONTAINS_NUL,
                    offset + pos,
                    "name contains a NUL byte",
                ));
            }
            Ok(())
        }
    }
}

fn check_utf8(bytes: &[u8], offset: usize) -> Result<()> {
    match str::from_utf8(bytes) {
        Ok(_) => Ok(()),
        Err(e) => Err(Error::new(
            ErrorCategory::Text,
            codes::INVALID_UTF8_NAME,
            offset + e.valid_up_to(),
            "name is not valid UTF-8",
        )),
    }
}

/// Materialize validated name bytes as an owned string.
///
/// Under [`TextPolicy::Unchecked`] invalid sequences are replaced with the
/// replacement character; under the validating policies the bytes are known
/// to be valid UTF-8 by the time this is called.
#[must_use]
pub fn materialize_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
