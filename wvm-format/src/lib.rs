// WVM - wvm-format
// Module: WebAssembly Binary Format Definitions
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly binary format handling for WVM
//!
//! This crate defines the byte-level vocabulary of the WebAssembly binary
//! format (magic bytes, section ids, type encodings, opcode constants), the
//! LEB128 variable-length integer primitives, the typed data model produced
//! by decoding, and the text (UTF-8) validation collaborator.
//!
//! It works in both std and `no_std` environments when configured with the
//! appropriate feature flags.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Binary format constants and LEB128 primitives
pub mod binary;
/// Module storage aggregate filled by the decoder
pub mod module;
/// Common imports for both std and `no_std` environments
pub mod prelude;
/// Text (name) validation policies
pub mod text;
/// Typed data model: value types, limits, descriptors
pub mod types;

pub use module::Module;
pub use text::TextPolicy;
pub use types::{FuncType, ValueType};
