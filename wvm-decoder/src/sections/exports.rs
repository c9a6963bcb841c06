// WVM - wvm-decoder
// Module: Export Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Export section (id 7).
//!
//! Export indices address the combined imported-plus-defined space of their
//! kind; defined entities additionally get their `exported` flag set. Export
//! names must be non-empty and unique across the section.

use crate::features::{DecodeContext, SectionPayload};
use crate::params::check_count;
use crate::prelude::*;
use crate::reader::SectionReader;

use super::read_name;

fn bounds_error(kind: ExternKind, offset: usize) -> Error {
    let (code, message) = match kind {
        ExternKind::Func => (
            codes::FUNC_INDEX_OUT_OF_BOUNDS,
            "export references a function index out of bounds",
        ),
        ExternKind::Table => (
            codes::TABLE_INDEX_OUT_OF_BOUNDS,
            "export references a table index out of bounds",
        ),
        ExternKind::Memory => (
            codes::MEMORY_INDEX_OUT_OF_BOUNDS,
            "export references a memory index out of bounds",
        ),
        ExternKind::Global => (
            codes::GLOBAL_INDEX_OUT_OF_BOUNDS,
            "export references a global index out of bounds",
        ),
    };
    Error::new(ErrorCategory::Bounds, code, offset, message)
}

fn mark_exported(module: &mut Module<'_>, kind: ExternKind, index: u32) {
    let idx = index as usize;
    match kind {
        ExternKind::Func => {}
        ExternKind::Table => {
            let imported = module.imported_tables.len();
            if idx >= imported {
                module.tables[idx - imported].exported = true;
            }
        }
        ExternKind::Memory => {
            let imported = module.imported_memories.len();
            if idx >= imported {
                module.memories[idx - imported].exported = true;
            }
        }
        ExternKind::Global => {
            let imported = module.imported_globals.len();
            if idx >= imported {
                module.globals[idx - imported].global_type.exported = true;
            }
        }
    }
}

/// Decode the export section
pub fn decode<'a>(
    module: &mut Module<'a>,
    payload: SectionPayload<'a>,
    ctx: &DecodeContext<'_>,
) -> Result<usize> {
    let mut reader = SectionReader::new(payload.bytes, payload.offset);

    let count_offset = reader.offset();
    let count = reader.read_leb_u32()?;
    check_count(
        count,
        ctx.params.mvp.max_export_count,
        "too many exports",
        count_offset,
    )?;
    module.exports.reserve(count as usize);

    for _ in 0..count {
        let (name, name_offset) = read_name(&mut reader, ctx)?;
        if name.is_empty() {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::EMPTY_NAME,
                name_offset,
                "export names must be non-empty",
            ));
        }
        if module.find_export(&name).is_some() {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::DUPLICATE_EXPORT_NAME,
                name_offset,
                "export name already used by an earlier export",
            ));
        }

        let kind_offset = reader.offset();
        let kind_byte = reader.read_u8()?;
        let Some(kind) = ExternKind::from_byte(kind_byte) else {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::INVALID_EXPORT_KIND,
                kind_offset,
                "export descriptor kind is not a known extern kind",
            ));
        };

        let index_offset = reader.offset();
        let index = reader.read_leb_u32()?;
        if index as usize >= module.extern_count(kind) {
            return Err(bounds_error(kind, index_offset));
        }

        mark_exported(module, kind, index);

        let export_index = module.exports.len() as u32;
        match kind {
            ExternKind::Func => module.exported_funcs.push(export_index),
            ExternKind::Table => module.exported_tables.push(export_index),
            ExternKind::Memory => module.exported_memories.push(export_index),
            ExternKind::Global => module.exported_globals.push(export_index),
        }
        module.exports.push(Export { name, kind, index });
    }

    Ok(reader.consumed())
}
