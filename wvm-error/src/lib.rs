// WVM - wvm-error
// Module: WVM Error Handling
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WVM error handling library
//!
//! This library provides the error handling system shared by every crate in
//! the WVM decoder stack. Errors are small `Copy` values carrying a category,
//! a numeric code, the byte offset (relative to the start of the module being
//! decoded) at which the violation was detected, and a static message.
//!
//! # Error code ranges
//!
//! Error codes are organized into numeric ranges, one per concern:
//!
//! - 1000-1999: module framing (magic, version, section headers)
//! - 2000-2999: variable-length integer decoding
//! - 3000-3999: section payload validation
//! - 4000-4999: entity index bounds
//! - 5000-5999: constant expressions
//! - 6000-6999: text (name) validation
//! - 7000-7999: feature composition
//! - 8000-8999: configured parser limits
//!
//! # Usage
//!
//! ```
//! use wvm_error::{codes, Error, ErrorCategory};
//!
//! let err = Error::new(
//!     ErrorCategory::Bounds,
//!     codes::TYPE_INDEX_OUT_OF_BOUNDS,
//!     0x2A,
//!     "type index exceeds type section entry count",
//! );
//! assert_eq!(err.offset, 0x2A);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

/// Error codes for the WVM decoder stack
pub mod codes;
/// Error and error handling types
pub mod errors;
/// Common imports for downstream crates
pub mod prelude;

pub use errors::{Error, ErrorCategory};

/// A specialized `Result` type for WVM operations.
///
/// Uses `wvm_error::Error` as the error type; suitable for `no_std`
/// environments since `Error` is `Copy` and allocation-free.
pub type Result<T> = core::result::Result<T, Error>;
