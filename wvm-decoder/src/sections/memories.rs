// WVM - wvm-decoder
// Module: Memory Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Memory section (id 5).

use crate::features::{DecodeContext, SectionPayload};
use crate::prelude::*;
use crate::reader::SectionReader;

use super::{check_memory_count, check_memory_pages, read_limits};

/// Decode the memory section
pub fn decode<'a>(
    module: &mut Module<'a>,
    payload: SectionPayload<'a>,
    ctx: &DecodeContext<'_>,
) -> Result<usize> {
    let mut reader = SectionReader::new(payload.bytes, payload.offset);

    let count_offset = reader.offset();
    let count = reader.read_leb_u32()?;
    if u64::from(count) > u64::from(ctx.params.mvp.max_memory_count) {
        return Err(Error::new(
            ErrorCategory::Limit,
            codes::LIMIT_EXCEEDED,
            count_offset,
            "too many memories",
        ));
    }
    module.memories.reserve(count as usize);

    for _ in 0..count {
        let limits_offset = reader.offset();
        let limits = read_limits(&mut reader, ctx, true)?;
        check_memory_pages(&limits, limits_offset)?;
        module.memories.push(MemoryType {
            limits,
            exported: false,
        });
        check_memory_count(module, ctx, limits_offset)?;
    }

    Ok(reader.consumed())
}
