// WVM - wvm-decoder
// Module: Section Decoders
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Per-section decoders.
//!
//! One module per section kind, each exposing a `decode` function with the
//! [`crate::SectionHandlerFn`] signature. The shared helpers here cover the
//! grammar fragments several sections use: names, value types, limits, and
//! global types.

use crate::features::DecodeContext;
use crate::prelude::*;
use crate::reader::SectionReader;

/// Code section entries
pub mod code;
/// Custom sections
pub mod custom;
/// Data section segments and the data-count section
pub mod data;
/// Element section segments
pub mod elements;
/// Export section entries
pub mod exports;
/// Function section type indices
pub mod functions;
/// Global section entries
pub mod globals;
/// Import section entries
pub mod imports;
/// Memory section entries
pub mod memories;
/// Start section
pub mod start;
/// Table section entries
pub mod tables;
/// Type section entries
pub mod types;

/// Read a length-prefixed name, bound it, and validate it under the
/// active text policy. Returns the name and the offset of its length
/// prefix.
pub(crate) fn read_name<'a>(
    reader: &mut SectionReader<'a>,
    ctx: &DecodeContext<'_>,
) -> Result<(String, usize)> {
    let len_offset = reader.offset();
    let len = reader.read_leb_u32()?;
    if len > ctx.params.mvp.max_name_bytes {
        return Err(Error::new(
            ErrorCategory::Limit,
            codes::NAME_TOO_LONG,
            len_offset,
            "name exceeds the configured byte bound",
        ));
    }
    let name_offset = reader.offset();
    let bytes = reader.read_bytes(len as usize)?;
    text::validate_name(bytes, ctx.params.text_policy, name_offset)?;
    Ok((text::materialize_name(bytes), len_offset))
}

/// Read a value type byte through the active feature set's registry
pub(crate) fn read_value_type(
    reader: &mut SectionReader<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<ValueType> {
    let offset = reader.offset();
    let byte = reader.read_u8()?;
    ctx.types.lookup(byte).ok_or_else(|| {
        Error::new(
            ErrorCategory::Type,
            codes::ILLEGAL_VALUE_TYPE,
            offset,
            "byte is not a registered value type",
        )
    })
}

/// Read a table element type; only reference types qualify
pub(crate) fn read_ref_type(
    reader: &mut SectionReader<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<ValueType> {
    let offset = reader.offset();
    let element = read_value_type(reader, ctx)?;
    match element {
        ValueType::FuncRef | ValueType::ExternRef => Ok(element),
        _ => Err(Error::new(
            ErrorCategory::Type,
            codes::ILLEGAL_VALUE_TYPE,
            offset,
            "table element type must be a reference type",
        )),
    }
}

/// Read a limits record.
///
/// The 64-bit flags are only accepted for memories under the memory64
/// capability; tables always pass `allow64 = false`.
pub(crate) fn read_limits(
    reader: &mut SectionReader<'_>,
    ctx: &DecodeContext<'_>,
    allow64: bool,
) -> Result<Limits> {
    let flag_offset = reader.offset();
    let flag = reader.read_u8()?;

    let (has_max, index_type) = match flag {
        binary::LIMITS_MIN => (false, IndexType::I32),
        binary::LIMITS_MIN_MAX => (true, IndexType::I32),
        binary::LIMITS_MIN_I64 if allow64 && ctx.caps.memory64 => (false, IndexType::I64),
        binary::LIMITS_MIN_MAX_I64 if allow64 && ctx.caps.memory64 => (true, IndexType::I64),
        _ => {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::INVALID_LIMITS_FLAG,
                flag_offset,
                "limits flag is not valid under the active feature set",
            ));
        }
    };

    let min = match index_type {
        IndexType::I32 => u64::from(reader.read_leb_u32()?),
        IndexType::I64 => reader.read_leb_u64()?,
    };
    let max = if has_max {
        let max_offset = reader.offset();
        let max = match index_type {
            IndexType::I32 => u64::from(reader.read_leb_u32()?),
            IndexType::I64 => reader.read_leb_u64()?,
        };
        if max < min {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::LIMITS_MIN_EXCEEDS_MAX,
                max_offset,
                "limits minimum exceeds the declared maximum",
            ));
        }
        Some(max)
    } else {
        None
    };

    Ok(Limits {
        min,
        max,
        index_type,
    })
}

/// Enforce the page bound on a 32-bit memory's limits
pub(crate) fn check_memory_pages(limits: &Limits, offset: usize) -> Result<()> {
    if limits.index_type == IndexType::I32 {
        let bound = binary::MAX_MEMORY32_PAGES;
        if limits.min > bound || limits.max.is_some_and(|max| max > bound) {
            return Err(Error::new(
                ErrorCategory::Limit,
                codes::LIMIT_EXCEEDED,
                offset,
                "memory size exceeds the 32-bit page bound",
            ));
        }
    }
    Ok(())
}

/// Enforce the single-memory rule when the capability is absent
pub(crate) fn check_memory_count(
    module: &Module<'_>,
    ctx: &DecodeContext<'_>,
    offset: usize,
) -> Result<()> {
    if module.memory_count() > 1 && !ctx.caps.multiple_memories {
        return Err(Error::new(
            ErrorCategory::Validation,
            codes::MULTIPLE_MEMORIES_NOT_ALLOWED,
            offset,
            "module declares more than one memory",
        ));
    }
    if module.memory_count() as u64 > u64::from(ctx.params.mvp.max_memory_count) {
        return Err(Error::new(
            ErrorCategory::Limit,
            codes::LIMIT_EXCEEDED,
            offset,
            "too many memories",
        ));
    }
    Ok(())
}

/// Enforce the single-table rule when the capability is absent
pub(crate) fn check_table_count(
    module: &Module<'_>,
    ctx: &DecodeContext<'_>,
    offset: usize,
) -> Result<()> {
    if module.table_count() > 1 && !ctx.caps.multiple_tables {
        return Err(Error::new(
            ErrorCategory::Validation,
            codes::MULTIPLE_TABLES_NOT_ALLOWED,
            offset,
            "module declares more than one table",
        ));
    }
    if module.table_count() as u64 > u64::from(ctx.params.mvp.max_table_count) {
        return Err(Error::new(
            ErrorCategory::Limit,
            codes::LIMIT_EXCEEDED,
            offset,
            "too many tables",
        ));
    }
    Ok(())
}

/// Read a global's value type and mutability flag
pub(crate) fn read_global_type(
    reader: &mut SectionReader<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<GlobalType> {
    let value_type = read_value_type(reader, ctx)?;
    let flag_offset = reader.offset();
    let mutable = match reader.read_u8()? {
        0x00 => false,
        0x01 => true,
        _ => {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::INVALID_MUTABILITY,
                flag_offset,
                "mutability flag must be 0 or 1",
            ));
        }
    };
    Ok(GlobalType {
        value_type,
        mutable,
        exported: false,
    })
}
