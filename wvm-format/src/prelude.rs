// WVM - wvm-format
// Module: WVM Format Prelude
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for wvm-format
//!
//! Provides a unified set of imports for both std and `no_std`
//! environments, re-exporting the collection types and the error vocabulary
//! used throughout the decoder stack.

pub use core::{
    cmp::{Eq, Ord, PartialEq, PartialOrd},
    fmt,
    fmt::{Debug, Display},
    str,
};

#[cfg(feature = "std")]
pub use std::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

#[cfg(not(feature = "std"))]
pub use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

pub use wvm_error::{codes, Error, ErrorCategory, Result};
