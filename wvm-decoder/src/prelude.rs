// WVM - wvm-decoder
// Module: WVM Decoder Prelude
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for wvm-decoder
//!
//! Provides a unified set of imports for both std and `no_std`
//! environments, re-exporting the format-layer vocabulary the section
//! decoders are written against.

pub use core::{
    cmp::{Eq, Ord, PartialEq, PartialOrd},
    fmt,
    fmt::{Debug, Display},
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
pub use wvm_format::{
    binary,
    module::{
        CodeEntry, ConstExpr, CustomSection, DataMode, DataSegment, ElementSegment, Global,
        LocalGroup, Module, SectionSpan,
    },
    text,
    text::TextPolicy,
    types::{
        Export, ExternKind, FuncType, GlobalType, Import, ImportDesc, IndexType, Limits,
        MemoryType, TableType, ValueType,
    },
};
