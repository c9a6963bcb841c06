// WVM - wvm-decoder
// Module: Type Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Type section (id 1): function types.

use crate::features::{DecodeContext, SectionPayload};
use crate::params::check_count;
use crate::prelude::*;
use crate::reader::SectionReader;

use super::read_value_type;

/// Decode the type section
pub fn decode<'a>(
    module: &mut Module<'a>,
    payload: SectionPayload<'a>,
    ctx: &DecodeContext<'_>,
) -> Result<usize> {
    let mut reader = SectionReader::new(payload.bytes, payload.offset);

    let count_offset = reader.offset();
    let count = reader.read_leb_u32()?;
    check_count(count, ctx.params.mvp.max_type_count, "too many types", count_offset)?;
    module.types.reserve(count as usize);

    for _ in 0..count {
        let entry_offset = reader.offset();
        let prefix = reader.read_u8()?;
        if prefix != binary::FUNC_TYPE_PREFIX {
            return Err(Error::new(
                ErrorCategory::Type,
                codes::ILLEGAL_TYPE_PREFIX,
                entry_offset,
                "type entry does not begin with the function type prefix",
            ));
        }

        let param_count_offset = reader.offset();
        let param_count = reader.read_leb_u32()?;
        check_count(
            param_count,
            ctx.params.mvp.max_type_count,
            "too many parameters",
            param_count_offset,
        )?;
        let mut params = Vec::with_capacity(param_count as usize);
        for _ in 0..param_count {
            params.push(read_value_type(&mut reader, ctx)?);
        }

        let result_count_offset = reader.offset();
        let result_count = reader.read_leb_u32()?;
        if result_count > 1 && !ctx.caps.multi_value {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::MULTI_RESULT_NOT_ALLOWED,
                result_count_offset,
                "function type declares multiple results without the multi-value capability",
            ));
        }
        check_count(
            result_count,
            ctx.params.mvp.max_type_count,
            "too many results",
            result_count_offset,
        )?;
        let mut results = Vec::with_capacity(result_count as usize);
        for _ in 0..result_count {
            results.push(read_value_type(&mut reader, ctx)?);
        }

        let func_type = FuncType { params, results };
        if ctx.caps.prohibit_duplicate_types && module.types.contains(&func_type) {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::DUPLICATE_TYPE,
                entry_offset,
                "structurally identical function type repeated",
            ));
        }
        module.types.push(func_type);
    }

    Ok(reader.consumed())
}
