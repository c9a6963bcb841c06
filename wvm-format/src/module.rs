// WVM - wvm-format
// Module: WebAssembly Module Storage Aggregate
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Module storage aggregate.
//!
//! [`Module`] holds everything the decoder produces for one parse. It
//! exclusively owns all decoded entities, while function bodies, constant
//! expressions, data payloads and custom-section payloads remain non-owning
//! views into the caller's input buffer; the buffer must therefore outlive
//! the module. No entity is mutated after its owning section decoder
//! returns, except for the `exported` convenience flags set while the
//! export section is processed.

use crate::prelude::*;
use crate::types::{
    Export, ExternKind, FuncType, GlobalType, Import, ImportDesc, MemoryType, TableType, ValueType,
};

/// Raw byte range of a decoded section, relative to module start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    /// Offset of the first payload byte
    pub begin: usize,
    /// Offset one past the last payload byte
    pub end: usize,
}

/// A custom section retained as a named pass-through span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomSection<'a> {
    /// Section name
    pub name: String,
    /// Payload bytes after the name
    pub data: &'a [u8],
    /// Byte range of the whole payload (name included)
    pub span: SectionSpan,
}

/// A run-length group of locals in a code entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalGroup {
    /// Number of locals in the group
    pub count: u32,
    /// Their shared value type
    pub value_type: ValueType,
}

/// A code-section entry: locals plus the opaque body expression
///
/// The body span's only validated properties are that its declared length
/// equals its decoded length and that it ends with the terminator opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry<'a> {
    /// Locals, as (count, type) groups in declaration order
    pub locals: Vec<LocalGroup>,
    /// Opaque expression bytes, terminator included
    pub body: &'a [u8],
}

/// A validated constant expression, terminator included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstExpr<'a> {
    /// Expression bytes
    pub bytes: &'a [u8],
}

/// A defined (non-imported) global
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Global<'a> {
    /// Declared type and mutability
    pub global_type: GlobalType,
    /// Validated initializer expression
    pub init: ConstExpr<'a>,
}

/// An element segment (active, funcref, function-index form)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSegment<'a> {
    /// Index of the table the segment initializes
    pub table_index: u32,
    /// Offset expression, typed to the table's index type
    pub offset: ConstExpr<'a>,
    /// Function indices placed into the table
    pub functions: Vec<u32>,
}

/// Placement mode of a data segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Placed into a memory at instantiation
    Active,
    /// Available for `memory.init` only (bulk-memory feature)
    Passive,
}

/// A data segment; `init` stays a view, ownership is deferred to
/// the instantiation stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSegment<'a> {
    /// Placement mode
    pub mode: DataMode,
    /// Target memory (active segments)
    pub memory_index: u32,
    /// Offset expression, typed to the memory's index type (active segments)
    pub offset: Option<ConstExpr<'a>>,
    /// Raw initialization bytes
    pub init: &'a [u8],
}

/// A parsed WebAssembly module
///
/// One sub-record per registered section kind, plus the per-kind import and
/// export index arrays that make "n-th imported function" an O(1) lookup.
#[derive(Debug, Clone, Default)]
pub struct Module<'a> {
    /// Binary-format version from the module header
    pub version: u32,
    /// Type section: function types
    pub types: Vec<FuncType>,
    /// Import section, in declaration order
    pub imports: Vec<Import>,
    /// Function section: type indices of defined functions
    pub functions: Vec<u32>,
    /// Table section: defined tables
    pub tables: Vec<TableType>,
    /// Memory section: defined memories
    pub memories: Vec<MemoryType>,
    /// Global section: defined globals
    pub globals: Vec<Global<'a>>,
    /// Export section, in declaration order
    pub exports: Vec<Export>,
    /// Start function index, if declared
    pub start: Option<u32>,
    /// Element section segments
    pub elements: Vec<ElementSegment<'a>>,
    /// Code section entries, parallel to `functions`
    pub code: Vec<CodeEntry<'a>>,
    /// Data section segments
    pub data: Vec<DataSegment<'a>>,
    /// Declared segment count from the data-count section
    pub data_count: Option<u32>,
    /// Custom sections, in order of appearance
    pub custom_sections: Vec<CustomSection<'a>>,
    /// Module name from the `"name"` custom section, if present
    pub module_name: Option<String>,
    /// Function names from the `"name"` custom section
    pub function_names: Vec<(u32, String)>,

    /// Indices into `imports` of the function imports, in order
    pub imported_funcs: Vec<u32>,
    /// Indices into `imports` of the table imports, in order
    pub imported_tables: Vec<u32>,
    /// Indices into `imports` of the memory imports, in order
    pub imported_memories: Vec<u32>,
    /// Indices into `imports` of the global imports, in order
    pub imported_globals: Vec<u32>,

    /// Indices into `exports` of the function exports, in order
    pub exported_funcs: Vec<u32>,
    /// Indices into `exports` of the table exports, in order
    pub exported_tables: Vec<u32>,
    /// Indices into `exports` of the memory exports, in order
    pub exported_memories: Vec<u32>,
    /// Indices into `exports` of the global exports, in order
    pub exported_globals: Vec<u32>,

    /// Payload spans of decoded sections, in order of appearance
    pub section_spans: Vec<(u8, SectionSpan)>,

    present: u16,
}

impl<'a> Module<'a> {
    /// Create an empty module for the given binary-format version
    #[must_use]
    pub fn new(version: u32) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Mark a section id as present
    pub fn mark_present(&mut self, id: u8) {
        if id < 16 {
            self.present |= 1 << id;
        }
    }

    /// Whether a section id has been decoded
    #[must_use]
    pub fn is_present(&self, id: u8) -> bool {
        id < 16 && self.present & (1 << id) != 0
    }

    /// Total function count: imported plus defined
    #[must_use]
    pub fn func_count(&self) -> usize {
        self.imported_funcs.len() + self.functions.len()
    }

    /// Total table count: imported plus defined
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.imported_tables.len() + self.tables.len()
    }

    /// Total memory count: imported plus defined
    #[must_use]
    pub fn memory_count(&self) -> usize {
        self.imported_memories.len() + self.memories.len()
    }

    /// Total global count: imported plus defined
    #[must_use]
    pub fn global_count(&self) -> usize {
        self.imported_globals.len() + self.globals.len()
    }

    /// Type index of the function at `func_idx` in the combined
    /// imported-plus-defined space
    #[must_use]
    pub fn func_type_index(&self, func_idx: u32) -> Option<u32> {
        let idx = func_idx as usize;
        let imported = self.imported_funcs.len();
        if idx < imported {
            match self.imports[self.imported_funcs[idx] as usize].desc {
                ImportDesc::Func(type_idx) => Some(type_idx),
                _ => None,
            }
        } else {
            self.functions.get(idx - imported).copied()
        }
    }

    /// Function type of the function at `func_idx`
    #[must_use]
    pub fn func_type(&self, func_idx: u32) -> Option<&FuncType> {
        self.func_type_index(func_idx)
            .and_then(|type_idx| self.types.get(type_idx as usize))
    }

    /// Type of the imported global at `global_idx`, counting imports only
    #[must_use]
    pub fn imported_global_type(&self, global_idx: u32) -> Option<&GlobalType> {
        let import_idx = *self.imported_globals.get(global_idx as usize)?;
        match &self.imports[import_idx as usize].desc {
            ImportDesc::Global(global_type) => Some(global_type),
            _ => None,
        }
    }

    /// Table type at `table_idx` in the combined space
    #[must_use]
    pub fn table_type(&self, table_idx: u32) -> Option<&TableType> {
        let idx = table_idx as usize;
        let imported = self.imported_tables.len();
        if idx < imported {
            match &self.imports[self.imported_tables[idx] as usize].desc {
                ImportDesc::Table(table_type) => Some(table_type),
                _ => None,
            }
        } else {
            self.tables.get(idx - imported)
        }
    }

    /// Memory type at `memory_idx` in the combined space
    #[must_use]
    pub fn memory_type(&self, memory_idx: u32) -> Option<&MemoryType> {
        let idx = memory_idx as usize;
        let imported = self.imported_memories.len();
        if idx < imported {
            match &self.imports[self.imported_memories[idx] as usize].desc {
                ImportDesc::Memory(memory_type) => Some(memory_type),
                _ => None,
            }
        } else {
            self.memories.get(idx - imported)
        }
    }

    /// Entity count in the combined space for an extern kind
    #[must_use]
    pub fn extern_count(&self, kind: ExternKind) -> usize {
        match kind {
            ExternKind::Func => self.func_count(),
            ExternKind::Table => self.table_count(),
            ExternKind::Memory => self.memory_count(),
            ExternKind::Global => self.global_count(),
        }
    }

    /// Find a custom section by name
    #[must_use]
    pub fn find_custom_section(&self, name: &str) -> Option<&CustomSection<'a>> {
        self.custom_sections.iter().find(|s| s.name == name)
    }

    /// Find an export by name
    #[must_use]
    pub fn find_export(&self, name: &str) -> Option<&Export> {
        self.exports.iter().find(|e| e.name == name)
    }
}
