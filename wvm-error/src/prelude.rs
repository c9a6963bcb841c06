// WVM - wvm-error
// Module: WVM Error Prelude
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for wvm-error
//!
//! Re-exports the commonly used error types so downstream crates can pull a
//! consistent set of names with one import, in both std and `no_std`
//! configurations.

pub use core::{
    fmt,
    fmt::{Debug, Display},
    result::Result as CoreResult,
};

pub use crate::{codes, Error, ErrorCategory, Result};
