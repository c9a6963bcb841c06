//! Shared builder vocabulary for hand-assembled test modules.

#![allow(dead_code)]

use wvm_format::binary;

/// Incremental binary module builder
pub struct ModuleBuilder {
    bytes: Vec<u8>,
}

impl ModuleBuilder {
    /// Start a version-1 module: magic plus version header
    pub fn new() -> Self {
        Self {
            bytes: vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00],
        }
    }

    /// Start a module with an arbitrary header version
    pub fn with_version(version: u32) -> Self {
        let mut bytes = vec![0x00, 0x61, 0x73, 0x6D];
        bytes.extend_from_slice(&version.to_le_bytes());
        Self { bytes }
    }

    /// Append a correctly framed section
    pub fn section(mut self, id: u8, payload: &[u8]) -> Self {
        self.bytes
            .extend_from_slice(&binary::write_section_header(id, payload.len() as u32));
        self.bytes.extend_from_slice(payload);
        self
    }

    /// Append raw bytes without framing
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

pub fn leb(value: u32) -> Vec<u8> {
    binary::write_leb_u32(value)
}

/// Entry count followed by the concatenated entries
pub fn counted(entries: &[Vec<u8>]) -> Vec<u8> {
    let mut out = leb(entries.len() as u32);
    for entry in entries {
        out.extend_from_slice(entry);
    }
    out
}

/// One function type entry: `0x60` prefix, params, results
pub fn func_type(params: &[u8], results: &[u8]) -> Vec<u8> {
    let mut out = vec![binary::FUNC_TYPE_PREFIX];
    out.extend_from_slice(&leb(params.len() as u32));
    out.extend_from_slice(params);
    out.extend_from_slice(&leb(results.len() as u32));
    out.extend_from_slice(results);
    out
}

/// One import entry
pub fn import(module: &str, name: &str, desc: &[u8]) -> Vec<u8> {
    let mut out = binary::write_name(module);
    out.extend_from_slice(&binary::write_name(name));
    out.extend_from_slice(desc);
    out
}

/// One export entry
pub fn export(name: &str, kind: u8, index: u32) -> Vec<u8> {
    let mut out = binary::write_name(name);
    out.push(kind);
    out.extend_from_slice(&leb(index));
    out
}

/// Minimum-only 32-bit limits
pub fn limits_min(min: u32) -> Vec<u8> {
    let mut out = vec![binary::LIMITS_MIN];
    out.extend_from_slice(&leb(min));
    out
}

/// Min-max 32-bit limits
pub fn limits_min_max(min: u32, max: u32) -> Vec<u8> {
    let mut out = vec![binary::LIMITS_MIN_MAX];
    out.extend_from_slice(&leb(min));
    out.extend_from_slice(&leb(max));
    out
}

/// `i32.const value; end`
pub fn i32_const_expr(value: i32) -> Vec<u8> {
    let mut out = vec![binary::OP_I32_CONST];
    out.extend_from_slice(&binary::write_leb_i32(value));
    out.push(binary::OP_END);
    out
}

/// One code entry with no locals and the given expression bytes
pub fn code_entry(expr: &[u8]) -> Vec<u8> {
    let body_len = 1 + expr.len();
    let mut out = leb(body_len as u32);
    out.extend_from_slice(&leb(0));
    out.extend_from_slice(expr);
    out
}

/// The smallest valid function body: no locals, bare terminator
pub fn empty_code_entry() -> Vec<u8> {
    code_entry(&[binary::OP_END])
}

/// One active data segment against memory 0
pub fn active_data_segment(offset_expr: &[u8], init: &[u8]) -> Vec<u8> {
    let mut out = leb(0);
    out.extend_from_slice(offset_expr);
    out.extend_from_slice(&leb(init.len() as u32));
    out.extend_from_slice(init);
    out
}
