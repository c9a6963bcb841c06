// WVM - wvm-decoder
// Module: Start Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Start section (id 8): a single function index of type `() -> ()`.

use crate::features::{DecodeContext, SectionPayload};
use crate::prelude::*;
use crate::reader::SectionReader;

/// Decode the start section
pub fn decode<'a>(
    module: &mut Module<'a>,
    payload: SectionPayload<'a>,
    _ctx: &DecodeContext<'_>,
) -> Result<usize> {
    let mut reader = SectionReader::new(payload.bytes, payload.offset);

    let index_offset = reader.offset();
    let index = reader.read_leb_u32()?;
    let Some(func_type) = module.func_type(index) else {
        return Err(Error::new(
            ErrorCategory::Bounds,
            codes::FUNC_INDEX_OUT_OF_BOUNDS,
            index_offset,
            "start section references a function index out of bounds",
        ));
    };
    if !func_type.params.is_empty() || !func_type.results.is_empty() {
        return Err(Error::new(
            ErrorCategory::Validation,
            codes::INVALID_START_FUNCTION_TYPE,
            index_offset,
            "start function must take no parameters and return no results",
        ));
    }

    module.start = Some(index);
    Ok(reader.consumed())
}
