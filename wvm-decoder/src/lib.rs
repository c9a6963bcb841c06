// WVM - wvm-decoder
// Module: WebAssembly Module Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly binary module decoding and validation for WVM
//!
//! Turns an untrusted byte buffer into a structurally and semantically
//! valid [`Module`], or a precise rejection carrying an error code and the
//! byte offset of the violation. What "valid" means is parameterized by a
//! composed feature set: features register section handlers and value-type
//! encodings and contribute capability flags, all resolved once by
//! [`Registry::compose`] before any module byte is read.
//!
//! ```
//! use wvm_decoder::{decode_module, DecodeParams, Registry};
//!
//! let wasm = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
//!
//! // One-off parse with the baseline feature set.
//! let module = decode_module(&wasm).unwrap();
//! assert!(module.types.is_empty());
//!
//! // Or compose once and reuse across parses.
//! let registry = Registry::mvp().unwrap();
//! let module = registry.decode(&wasm, &DecodeParams::default()).unwrap();
//! assert_eq!(module.version, 1);
//! ```
//!
//! Works in both std and `no_std` environments when configured with the
//! appropriate feature flags.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Constant-expression validation
pub mod const_expr;
/// Feature descriptors and the composition registry
pub mod features;
/// Section framer and module header handling
pub mod framer;
/// Best-effort parser for the `"name"` custom section
pub mod name_section;
/// Per-parse tunables
pub mod params;
/// Common imports for both std and `no_std` environments
pub mod prelude;
/// Byte cursor over section payloads
pub mod reader;
/// Per-section decoders
pub mod sections;

pub use features::standard::{
    BulkMemoryFeature, Memory64Feature, MultiMemoryFeature, MultiTableFeature, MultiValueFeature,
    MvpFeature, StrictTypesFeature,
};
pub use features::{
    Capabilities, DecodeContext, EntryPointFn, Feature, Registry, SectionHandlerFn, SectionPayload,
    SectionTable, ValueTypeRegistry, VersionHandlers,
};
pub use framer::read_header;
pub use params::{DecodeParams, MvpLimits};
pub use reader::SectionReader;

pub use wvm_error::{Error, ErrorCategory, Result};
pub use wvm_format::{Module, TextPolicy};

/// Decode one module with the baseline feature set and default parameters.
///
/// Composes [`MvpFeature`] alone; callers with their own feature mix or
/// tunables should build a [`Registry`] and keep it across parses.
pub fn decode_module(bytes: &[u8]) -> Result<Module<'_>> {
    Registry::mvp()?.decode(bytes, &DecodeParams::default())
}
