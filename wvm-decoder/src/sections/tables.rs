// WVM - wvm-decoder
// Module: Table Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Table section (id 4).

use crate::features::{DecodeContext, SectionPayload};
use crate::prelude::*;
use crate::reader::SectionReader;

use super::{check_table_count, read_limits, read_ref_type};

/// Decode the table section
pub fn decode<'a>(
    module: &mut Module<'a>,
    payload: SectionPayload<'a>,
    ctx: &DecodeContext<'_>,
) -> Result<usize> {
    let mut reader = SectionReader::new(payload.bytes, payload.offset);

    let count_offset = reader.offset();
    let count = reader.read_leb_u32()?;
    if u64::from(count) > u64::from(ctx.params.mvp.max_table_count) {
        return Err(Error::new(
            ErrorCategory::Limit,
            codes::LIMIT_EXCEEDED,
            count_offset,
            "too many tables",
        ));
    }
    module.tables.reserve(count as usize);

    for _ in 0..count {
        let entry_offset = reader.offset();
        let element = read_ref_type(&mut reader, ctx)?;
        let limits = read_limits(&mut reader, ctx, false)?;
        module.tables.push(TableType {
            element,
            limits,
            exported: false,
        });
        check_table_count(module, ctx, entry_offset)?;
    }

    Ok(reader.consumed())
}
