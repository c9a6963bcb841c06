// WVM - wvm-decoder
// Module: Import Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Import section (id 2).
//!
//! Imports precede every definition in the combined index spaces, so the
//! per-kind index arrays are filled here, in declaration order.

use crate::features::{DecodeContext, SectionPayload};
use crate::params::check_count;
use crate::prelude::*;
use crate::reader::SectionReader;

use super::{
    check_memory_count, check_memory_pages, check_table_count, read_global_type, read_limits,
    read_name, read_ref_type,
};

fn read_nonempty_name(
    reader: &mut SectionReader<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<String> {
    let (name, offset) = read_name(reader, ctx)?;
    if name.is_empty() {
        return Err(Error::new(
            ErrorCategory::Validation,
            codes::EMPTY_NAME,
            offset,
            "import names must be non-empty",
        ));
    }
    Ok(name)
}

/// Decode the import section
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
        ctx.params.mvp.max_import_count,
        "too many imports",
        count_offset,
    )?;
    module.imports.reserve(count as usize);

    for _ in 0..count {
        let entry_offset = reader.offset();
        let module_name = read_nonempty_name(&mut reader, ctx)?;
        let field_name = read_nonempty_name(&mut reader, ctx)?;

        let kind_offset = reader.offset();
        let kind = reader.read_u8()?;
        let desc = match kind {
            binary::EXTERN_FUNC => {
                let index_offset = reader.offset();
                let type_index = reader.read_leb_u32()?;
                if type_index as usize >= module.types.len() {
                    return Err(Error::new(
                        ErrorCategory::Bounds,
                        codes::TYPE_INDEX_OUT_OF_BOUNDS,
                        index_offset,
                        "imported function references a type index out of bounds",
                    ));
                }
                ImportDesc::Func(type_index)
            }
            binary::EXTERN_TABLE => {
                let element = read_ref_type(&mut reader, ctx)?;
                let limits = read_limits(&mut reader, ctx, false)?;
                ImportDesc::Table(TableType {
                    element,
                    limits,
                    exported: false,
                })
            }
            binary::EXTERN_MEMORY => {
                let limits_offset = reader.offset();
                let limits = read_limits(&mut reader, ctx, true)?;
                check_memory_pages(&limits, limits_offset)?;
                ImportDesc::Memory(MemoryType {
                    limits,
                    exported: false,
                })
            }
            binary::EXTERN_GLOBAL => ImportDesc::Global(read_global_type(&mut reader, ctx)?),
            _ => {
                return Err(Error::new(
                    ErrorCategory::Validation,
                    codes::INVALID_IMPORT_KIND,
                    kind_offset,
                    "import descriptor kind is not a known extern kind",
                ));
            }
        };

        let import_index = module.imports.len() as u32;
        let import_kind = desc.kind();
        let repeated = module.imports.iter().any(|existing| {
            existing.desc.kind() == import_kind
                && existing.module == module_name
                && existing.name == field_name
        });
        if repeated {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::DUPLICATE_IMPORT,
                entry_offset,
                "import repeats the module and field names of an earlier import of the same kind",
            ));
        }
        match import_kind {
            ExternKind::Func => module.imported_funcs.push(import_index),
            ExternKind::Table => module.imported_tables.push(import_index),
            ExternKind::Memory => module.imported_memories.push(import_index),
            ExternKind::Global => module.imported_globals.push(import_index),
        }
        module.imports.push(Import {
            module: module_name,
            name: field_name,
            desc,
        });

        match import_kind {
            ExternKind::Memory => check_memory_count(module, ctx, kind_offset)?,
            ExternKind::Table => check_table_count(module, ctx, kind_offset)?,
            _ => {}
        }
    }

    Ok(reader.consumed())
}
