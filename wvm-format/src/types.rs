// WVM - wvm-format
// Module: WebAssembly Type Definitions
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly type definitions.
//!
//! The typed data model the decoder produces: value types, function types,
//! limits, and the import/export descriptor sum types. Which bytes map to
//! which [`ValueType`] is decided by the active feature set's value-type
//! registry, not here; this enum is the closed universe of kinds the
//! registry can map into.

use crate::binary;
use crate::prelude::*;

/// WebAssembly value types recognized by the decoder stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// 32-bit integer
    I32,
    /// 64-bit integer
    I64,
    /// 32-bit IEEE 754 float
    F32,
    /// 64-bit IEEE 754 float
    F64,
    /// 128-bit SIMD vector
    V128,
    /// Function reference
    FuncRef,
    /// External reference
    ExternRef,
}

impl ValueType {
    /// Binary encoding of this value type
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::I32 => binary::I32_TYPE,
            Self::I64 => binary::I64_TYPE,
            Self::F32 => binary::F32_TYPE,
            Self::F64 => binary::F64_TYPE,
            Self::V128 => binary::V128_TYPE,
            Self::FuncRef => binary::FUNCREF_TYPE,
            Self::ExternRef => binary::EXTERNREF_TYPE,
        }
    }
}

/// WebAssembly function type: parameter and result sequences
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    /// Ordered parameter types
    pub params: Vec<ValueType>,
    /// Ordered result types
    pub results: Vec<ValueType>,
}

/// Index addressing width for a memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexType {
    /// 32-bit addressing (WebAssembly 1.0)
    #[default]
    I32,
    /// 64-bit addressing (memory64 feature)
    I64,
}

/// Limits for tables and memories
///
/// For memories, sizes are in 64 KiB pages; for tables, in elements.
/// Invariant (enforced at decode time): when `max` is present, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Minimum size
    pub min: u64,
    /// Optional maximum size
    pub max: Option<u64>,
    /// Addressing width the limits were encoded with
    pub index_type: IndexType,
}

/// WebAssembly table type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableType {
    /// Element type (always `funcref` in the MVP feature set)
    pub element: ValueType,
    /// Table size limits
    pub limits: Limits,
    /// Set during export-section processing
    pub exported: bool,
}

/// WebAssembly memory type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryType {
    /// Memory size limits, in pages
    pub limits: Limits,
    /// Set during export-section processing
    pub exported: bool,
}

/// WebAssembly global type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalType {
    /// Value type of the global
    pub value_type: ValueType,
    /// Whether the global is mutable
    pub mutable: bool,
    /// Set during export-section processing
    pub exported: bool,
}

/// The four kinds of external entities a module can import or export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternKind {
    /// Function
    Func,
    /// Table
    Table,
    /// Memory
    Memory,
    /// Global
    Global,
}

impl ExternKind {
    /// Map a kind byte to an extern kind, if valid
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            binary::EXTERN_FUNC => Some(Self::Func),
            binary::EXTERN_TABLE => Some(Self::Table),
            binary::EXTERN_MEMORY => Some(Self::Memory),
            binary::EXTERN_GLOBAL => Some(Self::Global),
            _ => None,
        }
    }
}

/// Kind-specific payload of an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDesc {
    /// Function import: index into the type section
    Func(u32),
    /// Table import
    Table(TableType),
    /// Memory import
    Memory(MemoryType),
    /// Global import
    Global(GlobalType),
}

impl ImportDesc {
    /// The extern kind of this descriptor
    #[must_use]
    pub const fn kind(&self) -> ExternKind {
        match self {
            Self::Func(_) => ExternKind::Func,
            Self::Table(_) => ExternKind::Table,
            Self::Memory(_) => ExternKind::Memory,
            Self::Global(_) => ExternKind::Global,
        }
    }
}

/// WebAssembly import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Module name
    pub module: String,
    /// Field name
    pub name: String,
    /// Kind-specific descriptor
    pub desc: ImportDesc,
}

/// WebAssembly export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Export name
    pub name: String,
    /// Exported entity kind
    pub kind: ExternKind,
    /// Index into the combined imported-plus-defined space for that kind
    pub index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_encoding() {
        assert_eq!(ValueType::I32.to_byte(), 0x7F);
        assert_eq!(ValueType::F64.to_byte(), 0x7C);
        assert_eq!(ValueType::FuncRef.to_byte(), 0x70);
    }

    #[test]
    fn extern_kind_from_byte() {
        assert_eq!(ExternKind::from_byte(0x00), Some(ExternKind::Func));
        assert_eq!(ExternKind::from_byte(0x03), Some(ExternKind::Global));
        assert_eq!(ExternKind::from_byte(0x04), None);
    }

    #[test]
    fn func_type_structural_equality() {
        let a = FuncType {
            params: vec![ValueType::I32, ValueType::I64],
            results: vec![ValueType::F32],
        };
        let b = FuncType {
            params: vec![ValueType::I32, ValueType::I64],
            results: vec![ValueType::F32],
        };
        let c = FuncType {
            params: vec![ValueType::I32],
            results: vec![ValueType::F32],
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
