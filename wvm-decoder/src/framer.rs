// WVM - wvm-decoder
// Module: Section Framer
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Section framer.
//!
//! Walks the module header and the section stream, enforcing the framing
//! invariants before any payload byte reaches a section decoder: declared
//! lengths stay inside the buffer, non-custom section ids appear at most
//! once and in canonical order, every id has a registered handler, and each
//! handler consumes exactly the bytes its section declared.

use crate::features::{DecodeContext, SectionPayload, SectionTable};
use crate::prelude::*;

/// Byte length of the module header: magic plus version
pub const HEADER_LEN: usize = 8;

/// Validate the module header and return the binary-format version
pub fn read_header(bytes: &[u8]) -> Result<u32> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::new(
            ErrorCategory::Parse,
            codes::UNEXPECTED_END,
            bytes.len(),
            "module header is truncated",
        ));
    }
    if bytes[0..4] != binary::WASM_MAGIC {
        return Err(Error::new(
            ErrorCategory::Parse,
            codes::INVALID_MAGIC,
            0,
            "module does not begin with the WebAssembly magic bytes",
        ));
    }
    let version = [bytes[4], bytes[5], bytes[6], bytes[7]];
    Ok(u32::from_le_bytes(version))
}

/// Ordering rank of a non-custom section id.
///
/// The data-count section sits between the element and code sections, so
/// its rank is pulled out of id order.
fn section_rank(id: u8) -> u32 {
    if id == binary::DATA_COUNT_SECTION_ID {
        u32::from(binary::ELEMENT_SECTION_ID) * 2 + 1
    } else {
        u32::from(id) * 2
    }
}

/// Decode the section stream of a header-validated module.
///
/// This is the entry point the baseline feature registers for version 1.
pub fn decode_module<'a>(
    bytes: &'a [u8],
    ctx: &DecodeContext<'_>,
    table: &SectionTable,
) -> Result<Module<'a>> {
    let version = read_header(bytes)?;
    let mut module = Module::new(version);

    #[cfg(feature = "log")]
    log::trace!("decoding module: {} bytes, version {}", bytes.len(), version);

    let mut pos = HEADER_LEN;
    let mut last_rank: Option<u32> = None;

    while pos < bytes.len() {
        let id_offset = pos;
        let id = bytes[pos];
        pos += 1;

        let (payload_len, len_bytes) = binary::read_leb_u32(bytes, pos)?;
        pos += len_bytes;
        let payload_len = payload_len as usize;

        if payload_len > bytes.len() - pos {
            return Err(Error::new(
                ErrorCategory::Parse,
                codes::SECTION_LENGTH_EXCEEDS_BUFFER,
                id_offset,
                "declared section length runs past the end of the input",
            ));
        }

        let Some(handler) = table.get(id) else {
            return Err(Error::new(
                ErrorCategory::Parse,
                codes::UNKNOWN_SECTION_ID,
                id_offset,
                "no handler registered for this section id",
            ));
        };

        if id != binary::CUSTOM_SECTION_ID {
            let rank = section_rank(id);
            if last_rank.is_some_and(|last| rank <= last) {
                return Err(Error::new(
                    ErrorCategory::Parse,
                    codes::DUPLICATE_SECTION,
                    id_offset,
                    "non-custom section repeated or out of canonical order",
                ));
            }
            last_rank = Some(rank);
        }

        #[cfg(feature = "log")]
        log::trace!(
            "section id {} at offset {:#x}, {} payload bytes",
            id,
            id_offset,
            payload_len
        );

        let payload = SectionPayload {
            id,
            bytes: &bytes[pos..pos + payload_len],
            offset: pos,
        };
        let consumed = handler(&mut module, payload, ctx)?;
        if consumed != payload_len {
            return Err(Error::new(
                ErrorCategory::Parse,
                codes::SECTION_SIZE_MISMATCH,
                id_offset,
                "section handler consumed a different length than declared",
            ));
        }

        module.mark_present(id);
        module.section_spans.push((
            id,
            SectionSpan {
                begin: pos,
                end: pos + payload_len,
            },
        ));
        pos += payload_len;
    }

    finish(&module, bytes.len())?;

    #[cfg(feature = "log")]
    log::trace!(
        "module decoded: {} functions, {} sections",
        module.func_count(),
        module.section_spans.len()
    );

    Ok(module)
}

/// Cross-section checks that only hold once the stream is exhausted
fn finish(module: &Module<'_>, end: usize) -> Result<()> {
    if module.functions.len() != module.code.len() {
        return Err(Error::new(
            ErrorCategory::Validation,
            codes::CODE_COUNT_MISMATCH,
            end,
            "function and code section entry counts disagree",
        ));
    }

    if let Some(declared) = module.data_count {
        if declared as usize != module.data.len() {
            let offset = module
                .section_spans
                .iter()
                .find(|(id, _)| *id == binary::DATA_COUNT_SECTION_ID)
                .map_or(end, |(_, span)| span.begin);
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::DATA_COUNT_MISMATCH,
                offset,
                "data-count section disagrees with the data section entry count",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_of_minimal_module() {
        let bytes = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
        assert_eq!(read_header(&bytes).unwrap(), 1);
    }

    #[test]
    fn bad_magic_is_rejected_at_offset_zero() {
        let bytes = [0x00, 0x61, 0x73, 0x00, 0x01, 0x00, 0x00, 0x00];
        let err = read_header(&bytes).unwrap_err();
        assert_eq!(err.code, codes::INVALID_MAGIC);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn truncated_header_is_rejected() {
        let err = read_header(&[0x00, 0x61, 0x73, 0x6D, 0x01]).unwrap_err();
        assert_eq!(err.code, codes::UNEXPECTED_END);
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn data_count_ranks_between_element_and_code() {
        assert!(section_rank(binary::ELEMENT_SECTION_ID) < section_rank(12));
        assert!(section_rank(12) < section_rank(binary::CODE_SECTION_ID));
        assert!(section_rank(binary::CODE_SECTION_ID) < section_rank(binary::DATA_SECTION_ID));
    }
}
