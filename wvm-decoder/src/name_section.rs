// WVM - wvm-decoder
// Module: Name Section Supplement
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Supplementary parser for the `"name"` custom section.
//!
//! Best-effort: extracts the module name (subsection 0) and the function
//! name map (subsection 1) when they are well formed. Errors are reported
//! to the caller, which ignores them; diagnostics must never fail a module
//! that is otherwise valid.

use crate::prelude::*;
use crate::reader::SectionReader;

const MODULE_NAME_SUBSECTION: u8 = 0;
const FUNCTION_NAMES_SUBSECTION: u8 = 1;

fn read_utf8_name<'a>(reader: &mut SectionReader<'a>) -> Result<String> {
    let len = reader.read_leb_u32()?;
    let offset = reader.offset();
    let bytes = reader.read_bytes(len as usize)?;
    text::validate_name(bytes, TextPolicy::Strict, offset)?;
    Ok(text::materialize_name(bytes))
}

/// Parse the name section payload into the module's diagnostic fields
pub fn parse<'a>(module: &mut Module<'a>, data: &'a [u8], base: usize) -> Result<()> {
    let mut reader = SectionReader::new(data, base);

    while !reader.is_done() {
        let id = reader.read_u8()?;
        let size = reader.read_leb_u32()?;
        let body = reader.read_bytes(size as usize)?;
        let body_base = reader.offset() - body.len();
        let mut body_reader = SectionReader::new(body, body_base);

        match id {
            MODULE_NAME_SUBSECTION => {
                module.module_name = Some(read_utf8_name(&mut body_reader)?);
            }
            FUNCTION_NAMES_SUBSECTION => {
                let count = body_reader.read_leb_u32()?;
                module.function_names.reserve(count as usize);
                for _ in 0..count {
                    let index = body_reader.read_leb_u32()?;
                    let name = read_utf8_name(&mut body_reader)?;
                    module.function_names.push((index, name));
                }
            }
            // Other subsections (locals, labels, ...) are skipped unparsed.
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subsection(id: u8, body: &[u8]) -> Vec<u8> {
        let mut out = vec![id];
        out.extend_from_slice(&binary::write_leb_u32(body.len() as u32));
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn module_and_function_names() {
        let mut data = subsection(0, &binary::write_name("demo"));
        let mut func_names = binary::write_leb_u32(2);
        func_names.extend_from_slice(&binary::write_leb_u32(0));
        func_names.extend_from_slice(&binary::write_name("alpha"));
        func_names.extend_from_slice(&binary::write_leb_u32(3));
        func_names.extend_from_slice(&binary::write_name("beta"));
        data.extend_from_slice(&subsection(1, &func_names));

        let mut module = Module::new(1);
        parse(&mut module, &data, 0).unwrap();
        assert_eq!(module.module_name.as_deref(), Some("demo"));
        assert_eq!(
            module.function_names,
            vec![(0, "alpha".to_string()), (3, "beta".to_string())]
        );
    }

    #[test]
    fn unknown_subsections_are_skipped() {
        let data = subsection(7, &[0xDE, 0xAD]);
        let mut module = Module::new(1);
        parse(&mut module, &data, 0).unwrap();
        assert!(module.module_name.is_none());
    }

    #[test]
    fn truncated_subsection_reports_an_error() {
        let mut data = vec![0u8];
        data.extend_from_slice(&binary::write_leb_u32(10));
        let mut module = Module::new(1);
        assert!(parse(&mut module, &data, 0).is_err());
    }
}
