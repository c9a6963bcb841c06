// WVM - wvm-decoder
// Module: Data Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Data section (id 11) and the data-count section (id 12).
//!
//! Segment flags 1 (passive) and 2 (active, explicit memory index) require
//! the passive-data capability; the baseline set accepts flag 0 only. The
//! data-count section is only dispatchable when a composed feature registers
//! it, and its stored count is cross-checked against the data section here
//! and, for count-without-data modules, by the framer's final pass.

use crate::const_expr::{index_value_type, read_const_expr};
use crate::features::{DecodeContext, SectionPayload};
use crate::params::check_count;
use crate::prelude::*;
use crate::reader::SectionReader;

/// Decode the data section
pub fn decode<'a>(
    module: &mut Module<'a>,
    payload: SectionPayload<'a>,
    ctx: &DecodeContext<'_>,
) -> Result<usize> {
    let mut reader = SectionReader::new(payload.bytes, payload.offset);

    let count_offset = reader.offset();
    let count = reader.read_leb_u32()?;
    if let Some(declared) = module.data_count {
        if declared != count {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::DATA_COUNT_MISMATCH,
                count_offset,
                "data section entry count differs from the data-count section",
            ));
        }
    }
    check_count(
        count,
        ctx.params.mvp.max_data_count,
        "too many data segments",
        count_offset,
    )?;
    module.data.reserve(count as usize);

    for _ in 0..count {
        let flag_offset = reader.offset();
        let flag = reader.read_leb_u32()?;

        let segment = match flag {
            0 => read_active(&mut reader, module, 0, flag_offset)?,
            1 if ctx.caps.passive_data => {
                let init = read_init(&mut reader)?;
                DataSegment {
                    mode: DataMode::Passive,
                    memory_index: 0,
                    offset: None,
                    init,
                }
            }
            2 if ctx.caps.passive_data => {
                let index_offset = reader.offset();
                let memory_index = reader.read_leb_u32()?;
                read_active(&mut reader, module, memory_index, index_offset)?
            }
            _ => {
                return Err(Error::new(
                    ErrorCategory::Validation,
                    codes::INVALID_DATA_FLAG,
                    flag_offset,
                    "data segment flag is not valid under the active feature set",
                ));
            }
        };
        module.data.push(segment);
    }

    Ok(reader.consumed())
}

fn read_active<'a>(
    reader: &mut SectionReader<'a>,
    module: &Module<'a>,
    memory_index: u32,
    index_offset: usize,
) -> Result<DataSegment<'a>> {
    let Some(memory) = module.memory_type(memory_index) else {
        return Err(Error::new(
            ErrorCategory::Bounds,
            codes::MEMORY_INDEX_OUT_OF_BOUNDS,
            index_offset,
            "data segment references a memory index out of bounds",
        ));
    };
    let offset_type = index_value_type(memory.limits.index_type);
    let offset = read_const_expr(reader, module, offset_type)?;
    let init = read_init(reader)?;
    Ok(DataSegment {
        mode: DataMode::Active,
        memory_index,
        offset: Some(offset),
        init,
    })
}

fn read_init<'a>(reader: &mut SectionReader<'a>) -> Result<&'a [u8]> {
    let len = reader.read_leb_u32()?;
    reader.read_bytes(len as usize)
}

/// Decode the data-count section
pub fn decode_count<'a>(
    module: &mut Module<'a>,
    payload: SectionPayload<'a>,
    ctx: &DecodeContext<'_>,
) -> Result<usize> {
    let mut reader = SectionReader::new(payload.bytes, payload.offset);

    let count_offset = reader.offset();
    let count = reader.read_leb_u32()?;
    check_count(
        count,
        ctx.params.mvp.max_data_count,
        "declared data segment count exceeds the configured bound",
        count_offset,
    )?;
    module.data_count = Some(count);

    Ok(reader.consumed())
}
