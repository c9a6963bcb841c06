// WVM - wvm-decoder
// Module: Global Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Global section (id 6): typed globals with validated initializers.

use crate::const_expr::read_const_expr;
use crate::features::{DecodeContext, SectionPayload};
use crate::params::check_count;
use crate::prelude::*;
use crate::reader::SectionReader;

use super::read_global_type;

/// Decode the global section
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
        ctx.params.mvp.max_global_count,
        "too many globals",
        count_offset,
    )?;
    module.globals.reserve(count as usize);

    for _ in 0..count {
        let global_type = read_global_type(&mut reader, ctx)?;
        let init = read_const_expr(&mut reader, module, global_type.value_type)?;
        module.globals.push(Global { global_type, init });
    }

    Ok(reader.consumed())
}
