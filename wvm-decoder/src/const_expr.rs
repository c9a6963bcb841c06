// WVM - wvm-decoder
// Module: Constant Expression Validator
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Constant-expression validation.
//!
//! Initializer expressions are a single whitelisted instruction followed by
//! the `end` terminator: one of the four numeric `const` opcodes, or
//! `global.get` of an immutable imported global. The produced type must
//! match the declared type of the entity being initialized. The expression
//! bytes are retained as a non-owning span for the instantiation stage.

use crate::prelude::*;
use crate::reader::SectionReader;

fn produced_type<'a>(
    reader: &mut SectionReader<'a>,
    module: &Module<'a>,
    opcode: u8,
    opcode_offset: usize,
) -> Result<ValueType> {
    match opcode {
        binary::OP_I32_CONST => {
            reader.read_leb_i32()?;
            Ok(ValueType::I32)
        }
        binary::OP_I64_CONST => {
            reader.read_leb_i64()?;
            Ok(ValueType::I64)
        }
        binary::OP_F32_CONST => {
            reader.read_bytes(4)?;
            Ok(ValueType::F32)
        }
        binary::OP_F64_CONST => {
            reader.read_bytes(8)?;
            Ok(ValueType::F64)
        }
        binary::OP_GLOBAL_GET => {
            let index_offset = reader.offset();
            let index = reader.read_leb_u32()?;
            let Some(global) = module.imported_global_type(index) else {
                return Err(Error::new(
                    ErrorCategory::Bounds,
                    codes::GLOBAL_INDEX_OUT_OF_BOUNDS,
                    index_offset,
                    "initializer references a global that is not an imported global",
                ));
            };
            if global.mutable {
                return Err(Error::new(
                    ErrorCategory::Validation,
                    codes::MUTABLE_GLOBAL_IMPORT_REFERENCE,
                    index_offset,
                    "initializer references a mutable imported global",
                ));
            }
            Ok(global.value_type)
        }
        _ => Err(Error::new(
            ErrorCategory::Validation,
            codes::ILLEGAL_CONST_EXPR_OPCODE,
            opcode_offset,
            "opcode is not allowed in a constant expression",
        )),
    }
}

/// Read and validate one constant expression, terminator included.
///
/// `expected` is the declared type of the initialized entity; a produced
/// type that differs is rejected at the expression's first byte.
pub fn read_const_expr<'a>(
    reader: &mut SectionReader<'a>,
    module: &Module<'a>,
    expected: ValueType,
) -> Result<ConstExpr<'a>> {
    let expr_offset = reader.offset();
    let mut probe = reader.clone();

    let opcode = probe.read_u8().map_err(|e| {
        Error::new(
            ErrorCategory::Validation,
            codes::MISSING_TERMINATOR,
            e.offset,
            "constant expression is empty",
        )
    })?;
    let produced = produced_type(&mut probe, module, opcode, expr_offset)?;

    let end_offset = probe.offset();
    match probe.read_u8() {
        Ok(byte) if byte == binary::OP_END => {}
        Ok(_) => {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::ILLEGAL_CONST_EXPR_OPCODE,
                end_offset,
                "constant expression continues past its single instruction",
            ));
        }
        Err(_) => {
            return Err(Error::new(
                ErrorCategory::Validation,
                codes::MISSING_TERMINATOR,
                end_offset,
                "constant expression has no terminator",
            ));
        }
    }

    if produced != expected {
        return Err(Error::new(
            ErrorCategory::Validation,
            codes::CONST_EXPR_TYPE_MISMATCH,
            expr_offset,
            "constant expression produces a different type than declared",
        ));
    }

    let len = probe.offset() - expr_offset;
    let bytes = reader.read_bytes(len)?;
    Ok(ConstExpr { bytes })
}

/// Value type a limits record's offsets are expressed in
#[must_use]
pub fn index_value_type(index_type: IndexType) -> ValueType {
    match index_type {
        IndexType::I32 => ValueType::I32,
        IndexType::I64 => ValueType::I64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(bytes: &[u8], expected: ValueType) -> Result<usize> {
        let module = Module::new(1);
        let mut reader = SectionReader::new(bytes, 0);
        read_const_expr(&mut reader, &module, expected).map(|e| e.bytes.len())
    }

    #[test]
    fn i32_const_expression() {
        // i32.const 42; end
        assert_eq!(expr(&[0x41, 42, 0x0B], ValueType::I32).unwrap(), 3);
    }

    #[test]
    fn f64_const_expression() {
        let mut bytes = vec![0x44];
        bytes.extend_from_slice(&1.5f64.to_le_bytes());
        bytes.push(0x0B);
        assert_eq!(expr(&bytes, ValueType::F64).unwrap(), 10);
    }

    #[test]
    fn type_mismatch_points_at_expression_start() {
        // i64.const 0 initializing an i32 entity
        let err = expr(&[0x42, 0x00, 0x0B], ValueType::I32).unwrap_err();
        assert_eq!(err.code, codes::CONST_EXPR_TYPE_MISMATCH);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn arbitrary_opcode_is_rejected() {
        // i32.add is not constant
        let err = expr(&[0x6A, 0x0B], ValueType::I32).unwrap_err();
        assert_eq!(err.code, codes::ILLEGAL_CONST_EXPR_OPCODE);
    }

    #[test]
    fn missing_terminator() {
        let err = expr(&[0x41, 42], ValueType::I32).unwrap_err();
        assert_eq!(err.code, codes::MISSING_TERMINATOR);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn second_instruction_is_rejected() {
        // i32.const 1; i32.const 2; end
        let err = expr(&[0x41, 0x01, 0x41, 0x02, 0x0B], ValueType::I32).unwrap_err();
        assert_eq!(err.code, codes::ILLEGAL_CONST_EXPR_OPCODE);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn global_get_requires_an_imported_global() {
        let err = expr(&[0x23, 0x00, 0x0B], ValueType::I32).unwrap_err();
        assert_eq!(err.code, codes::GLOBAL_INDEX_OUT_OF_BOUNDS);
    }

    #[test]
    fn global_get_of_immutable_import_typechecks() {
        let mut module = Module::new(1);
        module.imports.push(Import {
            module: "env".into(),
            name: "g".into(),
            desc: ImportDesc::Global(GlobalType {
                value_type: ValueType::I64,
                mutable: false,
                exported: false,
            }),
        });
        module.imported_globals.push(0);

        let bytes = [0x23, 0x00, 0x0B];
        let mut reader = SectionReader::new(&bytes, 0);
        let expr = read_const_expr(&mut reader, &module, ValueType::I64).unwrap();
        assert_eq!(expr.bytes, &bytes);
    }

    #[test]
    fn global_get_of_mutable_import_is_rejected() {
        let mut module = Module::new(1);
        module.imports.push(Import {
            module: "env".into(),
            name: "g".into(),
            desc: ImportDesc::Global(GlobalType {
                value_type: ValueType::I32,
                mutable: true,
                exported: false,
            }),
        });
        module.imported_globals.push(0);

        let bytes = [0x23, 0x00, 0x0B];
        let mut reader = SectionReader::new(&bytes, 0);
        let err = read_const_expr(&mut reader, &module, ValueType::I32).unwrap_err();
        assert_eq!(err.code, codes::MUTABLE_GLOBAL_IMPORT_REFERENCE);
    }
}
