// WVM - wvm-error
// Module: WVM Error Codes
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for the WVM decoder stack

// Framing error codes (1000-1999)

/// Module does not begin with the `\0asm` magic bytes
pub const INVALID_MAGIC: u16 = 1000;
/// Header version selects no registered feature set
pub const UNSUPPORTED_BINFMT_VERSION: u16 = 1001;
/// Declared section length runs past the end of the input buffer
pub const SECTION_LENGTH_EXCEEDS_BUFFER: u16 = 1002;
/// Section handler consumed a different number of bytes than declared
pub const SECTION_SIZE_MISMATCH: u16 = 1003;
/// No handler registered for this section id in the active feature set
pub const UNKNOWN_SECTION_ID: u16 = 1004;
/// Non-custom section repeated or out of canonical order
pub const DUPLICATE_SECTION: u16 = 1005;
/// Input ended where more bytes were required
pub const UNEXPECTED_END: u16 = 1006;

// Variable-length integer error codes (2000-2999)

/// Varint has no terminating byte within its maximum envelope
pub const MALFORMED_VARINT: u16 = 2000;
/// Varint value has set bits beyond the target integer width
pub const VARINT_OVERFLOW: u16 = 2001;

// Section payload error codes (3000-3999)

/// Byte is not a registered value type in the active feature set
pub const ILLEGAL_VALUE_TYPE: u16 = 3000;
/// Type section entry begins with an unregistered kind prefix
pub const ILLEGAL_TYPE_PREFIX: u16 = 3001;
/// Function type declares multiple results without the multi-value capability
pub const MULTI_RESULT_NOT_ALLOWED: u16 = 3002;
/// Structurally identical function type repeated (opt-in check)
pub const DUPLICATE_TYPE: u16 = 3003;
/// Limits record with a minimum greater than its declared maximum
pub const LIMITS_MIN_EXCEEDS_MAX: u16 = 3004;
/// More than one memory without the multiple-memories capability
pub const MULTIPLE_MEMORIES_NOT_ALLOWED: u16 = 3005;
/// Expression has no room for its terminator opcode
pub const MISSING_TERMINATOR: u16 = 3006;
/// Declared function body length disagrees with the encoded body
pub const BODY_SIZE_MISMATCH: u16 = 3007;
/// Code section entry count differs from the function section entry count
pub const CODE_COUNT_MISMATCH: u16 = 3008;
/// Mutability flag byte is neither 0 nor 1
pub const INVALID_MUTABILITY: u16 = 3009;
/// Import descriptor kind byte is not a known extern kind
pub const INVALID_IMPORT_KIND: u16 = 3010;
/// Export descriptor kind byte is not a known extern kind
pub const INVALID_EXPORT_KIND: u16 = 3011;
/// Limits flag byte is not valid under the active feature set
pub const INVALID_LIMITS_FLAG: u16 = 3012;
/// Data segment flag is not valid under the active feature set
pub const INVALID_DATA_FLAG: u16 = 3013;
/// Data-count section disagrees with the data section entry count
pub const DATA_COUNT_MISMATCH: u16 = 3014;
/// Name has zero length where a non-empty name is required
pub const EMPTY_NAME: u16 = 3015;
/// Start function is not of type `() -> ()`
pub const INVALID_START_FUNCTION_TYPE: u16 = 3016;
/// Two exports share the same name
pub const DUPLICATE_EXPORT_NAME: u16 = 3017;
/// More than one table without the multiple-tables capability
pub const MULTIPLE_TABLES_NOT_ALLOWED: u16 = 3018;
/// Two imports of the same kind share the same module and field names
pub const DUPLICATE_IMPORT: u16 = 3019;

// Index bounds error codes (4000-4999)

/// Type index exceeds the type section entry count
pub const TYPE_INDEX_OUT_OF_BOUNDS: u16 = 4000;
/// Function index exceeds the imported plus defined function count
pub const FUNC_INDEX_OUT_OF_BOUNDS: u16 = 4001;
/// Table index exceeds the imported plus defined table count
pub const TABLE_INDEX_OUT_OF_BOUNDS: u16 = 4002;
/// Memory index exceeds the imported plus defined memory count
pub const MEMORY_INDEX_OUT_OF_BOUNDS: u16 = 4003;
/// Global index exceeds the referencable global count
pub const GLOBAL_INDEX_OUT_OF_BOUNDS: u16 = 4004;

// Constant expression error codes (5000-5999)

/// Opcode outside the constant expression whitelist
pub const ILLEGAL_CONST_EXPR_OPCODE: u16 = 5000;
/// Constant expression produces a different type than declared
pub const CONST_EXPR_TYPE_MISMATCH: u16 = 5001;
/// Constant expression reads a mutable imported global
pub const MUTABLE_GLOBAL_IMPORT_REFERENCE: u16 = 5002;

// Text validation error codes (6000-6999)

/// Name bytes are not valid UTF-8 under the active text policy
pub const INVALID_UTF8_NAME: u16 = 6000;
/// Name contains a NUL byte under the NUL-rejecting text policy
pub const NAME_CONTAINS_NUL: u16 = 6001;

// Feature composition error codes (7000-7999)

/// Two features registered a handler for the same section id
pub const DUPLICATE_SECTION_HANDLER: u16 = 7000;
/// Two features declared the same tunable parameter field name
pub const DUPLICATE_PARAMETER_NAME: u16 = 7001;
/// No feature supplies an entry point for a declared version
pub const MISSING_ENTRY_POINT: u16 = 7002;
/// More than one feature supplies an entry point for the same version
pub const DUPLICATE_ENTRY_POINT: u16 = 7003;
/// A feature attempted to remap an already-registered value type byte
pub const VALUE_TYPE_REMAPPED: u16 = 7004;
/// Composition was attempted over an empty feature list
pub const NO_FEATURES: u16 = 7005;

// Parser limit error codes (8000-8999)

/// Declared element count exceeds the configured parser limit
pub const LIMIT_EXCEEDED: u16 = 8000;
/// Name byte length exceeds the configured parser limit
pub const NAME_TOO_LONG: u16 = 8001;
