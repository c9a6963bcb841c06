// WVM - wvm-format
// Module: WebAssembly Binary Constants and Varint Primitives
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly binary format constants and LEB128 primitives.
//!
//! All read functions take `(bytes, pos)` and return the decoded value
//! together with the number of bytes consumed. Errors carry the offset,
//! relative to `bytes`, at which the violation was detected; callers working
//! on sub-slices shift them with [`wvm_error::Error::offset_by`].

use crate::prelude::*;

/// Magic bytes for WebAssembly modules: `\0asm`
pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];

/// Binary-format version 1 (the MVP feature set)
pub const BINFMT_VERSION_1: u32 = 1;

/// WebAssembly section ids
pub const CUSTOM_SECTION_ID: u8 = 0x00;
/// Type section id
pub const TYPE_SECTION_ID: u8 = 0x01;
/// Import section id
pub const IMPORT_SECTION_ID: u8 = 0x02;
/// Function section id
pub const FUNCTION_SECTION_ID: u8 = 0x03;
/// Table section id
pub const TABLE_SECTION_ID: u8 = 0x04;
/// Memory section id
pub const MEMORY_SECTION_ID: u8 = 0x05;
/// Global section id
pub const GLOBAL_SECTION_ID: u8 = 0x06;
/// Export section id
pub const EXPORT_SECTION_ID: u8 = 0x07;
/// Start section id
pub const START_SECTION_ID: u8 = 0x08;
/// Element section id
pub const ELEMENT_SECTION_ID: u8 = 0x09;
/// Code section id
pub const CODE_SECTION_ID: u8 = 0x0A;
/// Data section id
pub const DATA_SECTION_ID: u8 = 0x0B;
/// Data-count section id (registered by the bulk-memory feature)
pub const DATA_COUNT_SECTION_ID: u8 = 0x0C;

/// Function type kind prefix in the type section
pub const FUNC_TYPE_PREFIX: u8 = 0x60;

/// Value type byte for `i32`
pub const I32_TYPE: u8 = 0x7F;
/// Value type byte for `i64`
pub const I64_TYPE: u8 = 0x7E;
/// Value type byte for `f32`
pub const F32_TYPE: u8 = 0x7D;
/// Value type byte for `f64`
pub const F64_TYPE: u8 = 0x7C;
/// Value type byte for `v128`
pub const V128_TYPE: u8 = 0x7B;
/// Reference type byte for `funcref`
pub const FUNCREF_TYPE: u8 = 0x70;
/// Reference type byte for `externref`
pub const EXTERNREF_TYPE: u8 = 0x6F;

/// Constant-expression opcode `i32.const`
pub const OP_I32_CONST: u8 = 0x41;
/// Constant-expression opcode `i64.const`
pub const OP_I64_CONST: u8 = 0x42;
/// Constant-expression opcode `f32.const`
pub const OP_F32_CONST: u8 = 0x43;
/// Constant-expression opcode `f64.const`
pub const OP_F64_CONST: u8 = 0x44;
/// Constant-expression opcode `global.get`
pub const OP_GLOBAL_GET: u8 = 0x23;
/// Expression terminator opcode `end`
pub const OP_END: u8 = 0x0B;

/// Import/export kind byte for functions
pub const EXTERN_FUNC: u8 = 0x00;
/// Import/export kind byte for tables
pub const EXTERN_TABLE: u8 = 0x01;
/// Import/export kind byte for memories
pub const EXTERN_MEMORY: u8 = 0x02;
/// Import/export kind byte for globals
pub const EXTERN_GLOBAL: u8 = 0x03;

/// Limits flag: 32-bit addressing, minimum only
pub const LIMITS_MIN: u8 = 0x00;
/// Limits flag: 32-bit addressing, minimum and maximum
pub const LIMITS_MIN_MAX: u8 = 0x01;
/// Limits flag: 64-bit addressing, minimum only (memory64 feature)
pub const LIMITS_MIN_I64: u8 = 0x04;
/// Limits flag: 64-bit addressing, minimum and maximum (memory64 feature)
pub const LIMITS_MIN_MAX_I64: u8 = 0x05;

/// Maximum number of 64 KiB pages addressable with 32-bit indexing
pub const MAX_MEMORY32_PAGES: u64 = 65_536;

/// Maximum accepted byte length of any single varint.
///
/// Redundantly padded (non-canonical) encodings are accepted as long as the
/// padding carries no value bits, but never beyond the ten-byte envelope a
/// canonical 64-bit varint needs.
pub const MAX_VARINT_BYTES: usize = 10;

fn malformed(offset: usize) -> Error {
    Error::new(
        ErrorCategory::Parse,
        codes::MALFORMED_VARINT,
        offset,
        "varint has no terminating byte",
    )
}

fn overflow(offset: usize) -> Error {
    Error::new(
        ErrorCategory::Parse,
        codes::VARINT_OVERFLOW,
        offset,
        "varint value exceeds the target integer width",
    )
}

/// Read an unsigned LEB128 integer of at most `max_bits` value bits.
///
/// Returns the decoded value and the number of bytes consumed. Fails with
/// `MALFORMED_VARINT` when the buffer ends (or the ten-byte envelope is
/// exhausted) before a terminating byte, and with `VARINT_OVERFLOW` when set
/// bits extend beyond `max_bits`.
pub fn read_leb_unsigned(bytes: &[u8], pos: usize, max_bits: u32) -> Result<(u64, usize)> {
    debug_assert!(max_bits <= 64);
    let mut result: u128 = 0;
    let mut shift: u32 = 0;
    let mut consumed = 0usize;

    loop {
        let Some(&byte) = bytes.get(pos + consumed) else {
            return Err(malformed(pos + consumed));
        };
        consumed += 1;

        result |= u128::from(byte & 0x7F) << shift;

        if byte & 0x80 == 0 {
            break;
        }
        if consumed == MAX_VARINT_BYTES {
            return Err(malformed(pos + consumed));
        }
        shift += 7;
    }

    if max_bits < 64 && (result >> max_bits) != 0 {
        return Err(overflow(pos));
    }
    if max_bits == 64 && (result >> 64) != 0 {
        return Err(overflow(pos));
    }

    Ok((result as u64, consumed))
}

/// Read an unsigned LEB128 `u32`
pub fn read_leb_u32(bytes: &[u8], pos: usize) -> Result<(u32, usize)> {
    let (value, consumed) = read_leb_unsigned(bytes, pos, 32)?;
    Ok((value as u32, consumed))
}

/// Read an unsigned LEB128 `u64`
pub fn read_leb_u64(bytes: &[u8], pos: usize) -> Result<(u64, usize)> {
    read_leb_unsigned(bytes, pos, 64)
}

/// Read a signed LEB128 integer of at most `max_bits` value bits.
///
/// Two's-complement with sign extension from the final group. The same
/// envelope and overflow rules as [`read_leb_unsigned`] apply.
pub fn read_leb_signed(bytes: &[u8], pos: usize, max_bits: u32) -> Result<(i64, usize)> {
    debug_assert!(max_bits <= 64);
    let mut result: i128 = 0;
    let mut shift: u32 = 0;
    let mut consumed = 0usize;

    loop {
        let Some(&byte) = bytes.get(pos + consumed) else {
            return Err(malformed(pos + consumed));
        };
        consumed += 1;

        result |= i128::from(byte & 0x7F) << shift;
        shift += 7;

        if byte & 0x80 == 0 {
            if byte & 0x40 != 0 {
                result |= -1i128 << shift;
            }
            break;
        }
        if consumed == MAX_VARINT_BYTES {
            return Err(malformed(pos + consumed));
        }
    }

    let min = -(1i128 << (max_bits - 1));
    let max = (1i128 << (max_bits - 1)) - 1;
    if result < min || result > max {
        return Err(overflow(pos));
    }

    Ok((result as i64, consumed))
}

/// Read a signed LEB128 `i32`
pub fn read_leb_i32(bytes: &[u8], pos: usize) -> Result<(i32, usize)> {
    let (value, consumed) = read_leb_signed(bytes, pos, 32)?;
    Ok((value as i32, consumed))
}

/// Read a signed LEB128 `i64`
pub fn read_leb_i64(bytes: &[u8], pos: usize) -> Result<(i64, usize)> {
    read_leb_signed(bytes, pos, 64)
}

/// Write an unsigned LEB128 `u32`
pub fn write_leb_u32(value: u32) -> Vec<u8> {
    write_leb_u64(u64::from(value))
}

/// Write an unsigned LEB128 `u64`
pub fn write_leb_u64(value: u64) -> Vec<u8> {
    let mut result = Vec::new();
    let mut value = value;

    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        result.push(byte);
        if value == 0 {
            break;
        }
    }

    result
}

/// Write a signed LEB128 `i64`
pub fn write_leb_i64(value: i64) -> Vec<u8> {
    let mut result = Vec::new();
    let mut value = value;
    let mut more = true;

    while more {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;

        let sign_bit_set = byte & 0x40 != 0;
        more = !((value == 0 && !sign_bit_set) || (value == -1 && sign_bit_set));
        if more {
            byte |= 0x80;
        }
        result.push(byte);
    }

    result
}

/// Write a signed LEB128 `i32`
pub fn write_leb_i32(value: i32) -> Vec<u8> {
    write_leb_i64(i64::from(value))
}

/// Write a length-prefixed name
pub fn write_name(value: &str) -> Vec<u8> {
    let mut result = write_leb_u32(value.len() as u32);
    result.extend_from_slice(value.as_bytes());
    result
}

/// Write a section header (id byte plus payload length)
pub fn write_section_header(id: u8, payload_len: u32) -> Vec<u8> {
    let mut result = Vec::with_capacity(6);
    result.push(id);
    result.extend_from_slice(&write_leb_u32(payload_len));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leb_u32_roundtrip() {
        for value in [0u32, 1, 127, 128, 16_384, 624_485, u32::MAX] {
            let bytes = write_leb_u32(value);
            let (decoded, consumed) = read_leb_u32(&bytes, 0).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn leb_u64_roundtrip() {
        for value in [0u64, 1, 127, 128, 0xFFFF_FFFF, u64::MAX] {
            let bytes = write_leb_u64(value);
            let (decoded, consumed) = read_leb_u64(&bytes, 0).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn leb_i32_roundtrip() {
        for value in [0i32, 1, -1, 63, 64, -64, -65, i32::MIN, i32::MAX] {
            let bytes = write_leb_i32(value);
            let (decoded, consumed) = read_leb_i32(&bytes, 0).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn truncated_varint_is_malformed() {
        let err = read_leb_u32(&[0x80, 0x80], 0).unwrap_err();
        assert_eq!(err.code, codes::MALFORMED_VARINT);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn redundant_zero_padding_is_accepted() {
        // 624485 canonically takes three bytes; pad with two zero groups.
        let bytes = [0xE5, 0x8E, 0xA6, 0x80, 0x00];
        let (value, consumed) = read_leb_u32(&bytes, 0).unwrap();
        assert_eq!(value, 624_485);
        assert_eq!(consumed, 5);
    }

    #[test]
    fn value_bits_beyond_width_overflow() {
        // Fifth byte carries bit 32.
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0x1F];
        let err = read_leb_u32(&bytes, 0).unwrap_err();
        assert_eq!(err.code, codes::VARINT_OVERFLOW);
    }

    #[test]
    fn canonical_five_byte_u32_is_accepted() {
        // u32::MAX: 0xFF 0xFF 0xFF 0xFF 0x0F
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0x0F];
        let (value, consumed) = read_leb_u32(&bytes, 0).unwrap();
        assert_eq!(value, u32::MAX);
        assert_eq!(consumed, 5);
    }

    #[test]
    fn negative_i32_with_sign_padding_is_accepted() {
        // -1 canonically is 0x7F; 0xFF 0x7F is the padded spelling.
        let (value, consumed) = read_leb_i32(&[0xFF, 0x7F], 0).unwrap();
        assert_eq!(value, -1);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn i32_overflow_is_rejected() {
        // 2^31 is out of i32 range.
        let bytes = write_leb_i64(1i64 << 31);
        let err = read_leb_i32(&bytes, 0).unwrap_err();
        assert_eq!(err.code, codes::VARINT_OVERFLOW);
    }

    #[test]
    fn unterminated_envelope_is_malformed() {
        let bytes = [0x80u8; 12];
        let err = read_leb_u64(&bytes, 0).unwrap_err();
        assert_eq!(err.code, codes::MALFORMED_VARINT);
    }

    #[test]
    fn read_at_nonzero_position() {
        let mut bytes = vec![0xAA, 0xBB];
        bytes.extend_from_slice(&write_leb_u32(300));
        let (value, consumed) = read_leb_u32(&bytes, 2).unwrap();
        assert_eq!(value, 300);
        assert_eq!(consumed, 2);
    }
}
