// WVM - wvm-error
// Module: WVM Error Types
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Unified error type for the WVM decoder stack.
//!
//! Every decoding failure is reported through [`Error`]: a `Copy` value with
//! a category, a `u16` code from [`crate::codes`], the byte offset at which
//! the violation was detected (relative to the start of the module), and a
//! static message. There is no recovery path anywhere in the decoder; a
//! module either fully validates or the first error propagates unchanged to
//! the caller.

use core::fmt;

/// Error categories for WVM operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Byte-level framing and encoding errors
    Parse = 1,
    /// Structural validation errors inside a section payload
    Validation = 2,
    /// Type-level errors (value types, function types, const-expr types)
    Type = 3,
    /// Entity index bounds errors
    Bounds = 4,
    /// Configured parser limit violations
    Limit = 5,
    /// Name (text) validation errors
    Text = 6,
    /// Feature composition errors raised before any input byte is read
    Composition = 7,
}

/// WVM `Error` type
///
/// The main error type for the WVM decoder. Errors are categorized, carry a
/// numeric code, and always record the byte offset of the violation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error {
    /// Error category
    pub category: ErrorCategory,
    /// Error code (see [`crate::codes`])
    pub code: u16,
    /// Byte offset, relative to module start, where the violation was found
    pub offset: usize,
    /// Static error message
    pub message: &'static str,
}

impl Error {
    /// Create a new error.
    #[must_use]
    pub const fn new(
        category: ErrorCategory,
        code: u16,
        offset: usize,
        message: &'static str,
    ) -> Self {
        Self {
            category,
            code,
            offset,
            message,
        }
    }

    /// Return the same error with its offset shifted by `delta`.
    ///
    /// Used when an error produced against a sub-slice must be reported
    /// relative to the start of the whole module.
    #[must_use]
    pub const fn offset_by(self, delta: usize) -> Self {
        Self {
            offset: self.offset + delta,
            ..self
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (error {} at byte offset {:#x})",
            self.message, self.code, self.offset
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;

    #[test]
    fn error_preserves_fields() {
        let err = Error::new(
            ErrorCategory::Parse,
            codes::INVALID_MAGIC,
            0,
            "input does not begin with the WebAssembly magic bytes",
        );
        assert_eq!(err.category, ErrorCategory::Parse);
        assert_eq!(err.code, codes::INVALID_MAGIC);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn offset_by_shifts_only_the_offset() {
        let err = Error::new(ErrorCategory::Parse, codes::MALFORMED_VARINT, 3, "truncated varint");
        let shifted = err.offset_by(40);
        assert_eq!(shifted.offset, 43);
        assert_eq!(shifted.code, err.code);
        assert_eq!(shifted.category, err.category);
    }

    #[test]
    fn display_mentions_code_and_offset() {
        let err = Error::new(ErrorCategory::Bounds, codes::FUNC_INDEX_OUT_OF_BOUNDS, 0x10, "bad index");
        let text = std::format!("{err}");
        assert!(text.contains("4001"));
        assert!(text.contains("0x10"));
    }
}
