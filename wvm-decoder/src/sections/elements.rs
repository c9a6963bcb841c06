// WVM - wvm-decoder
// Module: Element Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Element section (id 9): active funcref segments in function-index form.

use crate::const_expr::{index_value_type, read_const_expr};
use crate::features::{DecodeContext, SectionPayload};
use crate::params::check_count;
use crate::prelude::*;
use crate::reader::SectionReader;

/// Decode the element section
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
        ctx.params.mvp.max_element_count,
        "too many element segments",
        count_offset,
    )?;
    module.elements.reserve(count as usize);

    for _ in 0..count {
        let table_offset = reader.offset();
        let table_index = reader.read_leb_u32()?;
        let Some(table) = module.table_type(table_index) else {
            return Err(Error::new(
                ErrorCategory::Bounds,
                codes::TABLE_INDEX_OUT_OF_BOUNDS,
                table_offset,
                "element segment references a table index out of bounds",
            ));
        };

        let offset_type = index_value_type(table.limits.index_type);
        let offset = read_const_expr(&mut reader, module, offset_type)?;

        let func_count_offset = reader.offset();
        let func_count = reader.read_leb_u32()?;
        check_count(
            func_count,
            ctx.params.mvp.max_element_function_count,
            "too many functions in one element segment",
            func_count_offset,
        )?;
        let mut functions = Vec::with_capacity(func_count as usize);
        for _ in 0..func_count {
            let index_offset = reader.offset();
            let func_index = reader.read_leb_u32()?;
            if func_index as usize >= module.func_count() {
                return Err(Error::new(
                    ErrorCategory::Bounds,
                    codes::FUNC_INDEX_OUT_OF_BOUNDS,
                    index_offset,
                    "element segment references a function index out of bounds",
                ));
            }
            functions.push(func_index);
        }

        module.elements.push(ElementSegment {
            table_index,
            offset,
            functions,
        });
    }

    Ok(reader.consumed())
}
