// WVM - wvm-decoder
// Module: Function Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Function section (id 3): type indices of defined functions.

use crate::features::{DecodeContext, SectionPayload};
use crate::params::check_count;
use crate::prelude::*;
use crate::reader::SectionReader;

/// Decode the function section
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
        ctx.params.mvp.max_function_count,
        "too many functions",
        count_offset,
    )?;
    module.functions.reserve(count as usize);

    for _ in 0..count {
        let index_offset = reader.offset();
        let type_index = reader.read_leb_u32()?;
        if type_index as usize >= module.types.len() {
            return Err(Error::new(
                ErrorCategory::Bounds,
                codes::TYPE_INDEX_OUT_OF_BOUNDS,
                index_offset,
                "function references a type index out of bounds",
            ));
        }
        module.functions.push(type_index);
    }

    Ok(reader.consumed())
}
