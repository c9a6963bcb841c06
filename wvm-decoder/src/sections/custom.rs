// WVM - wvm-decoder
// Module: Custom Section Decoder
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Custom sections (id 0).
//!
//! Retained as named pass-through spans. The `"name"` section additionally
//! gets a best-effort supplementary parse for the module and function
//! names; a malformed name section never fails the module.

use crate::features::{DecodeContext, SectionPayload};
use crate::name_section;
use crate::prelude::*;
use crate::reader::SectionReader;

use super::read_name;

/// Decode one custom section
pub fn decode<'a>(
    module: &mut Module<'a>,
    payload: SectionPayload<'a>,
    ctx: &DecodeContext<'_>,
) -> Result<usize> {
    let mut reader = SectionReader::new(payload.bytes, payload.offset);

    let (name, _) = read_name(&mut reader, ctx)?;
    let data = reader.read_bytes(reader.remaining())?;
    let data_offset = payload.offset + (payload.bytes.len() - data.len());

    if name == "name" {
        if let Err(_err) = name_section::parse(module, data, data_offset) {
            #[cfg(feature = "log")]
            log::debug!(
                "ignoring malformed name section at offset {:#x}: {}",
                _err.offset,
                _err
            );
        }
    }

    module.custom_sections.push(CustomSection {
        name,
        data,
        span: SectionSpan {
            begin: payload.offset,
            end: payload.offset + payload.bytes.len(),
        },
    });

    Ok(reader.consumed())
}
