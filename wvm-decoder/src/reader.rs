// WVM - wvm-decoder
// Module: Section Payload Cursor
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Byte cursor over a section payload.
//!
//! [`SectionReader`] wraps a payload slice together with the payload's
//! absolute position in the module, so every error it produces carries an
//! offset relative to the start of the module rather than the slice.

use crate::prelude::*;

/// Forward-only cursor over one section payload
#[derive(Debug, Clone)]
pub struct SectionReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> SectionReader<'a> {
    /// Create a cursor over `bytes`, whose first byte sits at absolute
    /// module offset `base`
    #[must_use]
    pub fn new(bytes: &'a [u8], base: usize) -> Self {
        Self { bytes, pos: 0, base }
    }

    /// Absolute module offset of the next unread byte
    #[must_use]
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Bytes consumed so far
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Bytes left in the payload
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Whether the payload has been fully consumed
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn eof(&self) -> Error {
        Error::new(
            ErrorCategory::Parse,
            codes::UNEXPECTED_END,
            self.offset(),
            "input ended inside a section payload",
        )
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        let Some(&byte) = self.bytes.get(self.pos) else {
            return Err(self.eof());
        };
        self.pos += 1;
        Ok(byte)
    }

    /// Borrow the next `len` bytes without copying
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.eof());
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read an unsigned LEB128 `u32`
    pub fn read_leb_u32(&mut self) -> Result<u32> {
        let (value, consumed) =
            binary::read_leb_u32(self.bytes, self.pos).map_err(|e| e.offset_by(self.base))?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read an unsigned LEB128 `u64`
    pub fn read_leb_u64(&mut self) -> Result<u64> {
        let (value, consumed) =
            binary::read_leb_u64(self.bytes, self.pos).map_err(|e| e.offset_by(self.base))?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read a signed LEB128 `i32`
    pub fn read_leb_i32(&mut self) -> Result<i32> {
        let (value, consumed) =
            binary::read_leb_i32(self.bytes, self.pos).map_err(|e| e.offset_by(self.base))?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read a signed LEB128 `i64`
    pub fn read_leb_i64(&mut self) -> Result<i64> {
        let (value, consumed) =
            binary::read_leb_i64(self.bytes, self.pos).map_err(|e| e.offset_by(self.base))?;
        self.pos += consumed;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_absolute() {
        let payload = [0x01u8, 0x02, 0x03];
        let mut reader = SectionReader::new(&payload, 100);
        assert_eq!(reader.offset(), 100);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.offset(), 101);
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn eof_error_carries_absolute_offset() {
        let payload = [0x01u8];
        let mut reader = SectionReader::new(&payload, 50);
        reader.read_u8().unwrap();
        let err = reader.read_u8().unwrap_err();
        assert_eq!(err.code, codes::UNEXPECTED_END);
        assert_eq!(err.offset, 51);
    }

    #[test]
    fn leb_errors_are_shifted_by_base() {
        let payload = [0x80u8, 0x80];
        let mut reader = SectionReader::new(&payload, 20);
        let err = reader.read_leb_u32().unwrap_err();
        assert_eq!(err.code, codes::MALFORMED_VARINT);
        assert_eq!(err.offset, 22);
    }

    #[test]
    fn read_bytes_borrows_from_payload() {
        let payload = [0xAAu8, 0xBB, 0xCC];
        let mut reader = SectionReader::new(&payload, 0);
        let head = reader.read_bytes(2).unwrap();
        assert_eq!(head, &[0xAA, 0xBB]);
        assert!(!reader.is_done());
        assert_eq!(reader.consumed(), 2);
    }
}
