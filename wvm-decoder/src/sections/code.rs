// WVM - wvm-decoder
// Module: Code Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Code section (id 10).
//!
//! Bodies are kept opaque: the locals declarations are decoded and bounded,
//! and the expression bytes are retained as a span whose only validated
//! properties are that the declared entry length covers exactly the locals
//! plus the expression, and that the expression's final byte is the
//! terminator opcode.

use crate::features::{DecodeContext, SectionPayload};
use crate::params::check_count;
use crate::prelude::*;
use crate::reader::SectionReader;

use super::read_value_type;

fn body_size_mismatch(offset: usize) -> Error {
    Error::new(
        ErrorCategory::Validation,
        codes::BODY_SIZE_MISMATCH,
        offset,
        "declared function body length disagrees with the encoded body",
    )
}

/// Decode the code section
pub fn decode<'a>(
    module: &mut Module<'a>,
    payload: SectionPayload<'a>,
    ctx: &DecodeContext<'_>,
) -> Result<usize> {
    let mut reader = SectionReader::new(payload.bytes, payload.offset);

    let count_offset = reader.offset();
    let count = reader.read_leb_u32()?;
    if count as usize != module.functions.len() {
        return Err(Error::new(
            ErrorCategory::Validation,
            codes::CODE_COUNT_MISMATCH,
            count_offset,
            "code entry count differs from the function section entry count",
        ));
    }
    check_count(
        count,
        ctx.params.mvp.max_code_count,
        "too many code entries",
        count_offset,
    )?;
    module.code.reserve(count as usize);

    for _ in 0..count {
        let size_offset = reader.offset();
        let body_size = reader.read_leb_u32()? as usize;
        if body_size > reader.remaining() {
            return Err(body_size_mismatch(size_offset));
        }
        let body_end = reader.offset() + body_size;

        let group_count_offset = reader.offset();
        let group_count = reader.read_leb_u32()?;
        check_count(
            group_count,
            ctx.params.mvp.max_code_locals,
            "too many local groups",
            group_count_offset,
        )?;
        let mut locals = Vec::with_capacity(group_count as usize);
        let mut total_locals: u64 = 0;
        for _ in 0..group_count {
            if reader.offset() >= body_end {
                return Err(body_size_mismatch(size_offset));
            }
            let local_count_offset = reader.offset();
            let local_count = reader.read_leb_u32()?;
            total_locals += u64::from(local_count);
            if total_locals > u64::from(ctx.params.mvp.max_code_locals) {
                return Err(Error::new(
                    ErrorCategory::Limit,
                    codes::LIMIT_EXCEEDED,
                    local_count_offset,
                    "function declares too many locals",
                ));
            }
            let value_type = read_value_type(&mut reader, ctx)?;
            locals.push(LocalGroup {
                count: local_count,
                value_type,
            });
        }

        if reader.offset() > body_end {
            return Err(body_size_mismatch(size_offset));
        }
        let expr_len = body_end - reader.offset();
        if expr_len == 0 {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::MISSING_TERMINATOR,
                reader.offset(),
                "function body has no room for its terminator",
            ));
        }
        let body = reader.read_bytes(expr_len)?;
        if body[expr_len - 1] != binary::OP_END {
            return Err(body_size_mismatch(size_offset));
        }

        module.code.push(CodeEntry { locals, body });
    }

    Ok(reader.consumed())
}
