//! Decoding well-formed modules with the baseline feature set.

mod common;

use common::*;
use wvm_decoder::{decode_module, DecodeParams, Registry};
use wvm_format::binary;
use wvm_format::types::{ExternKind, ImportDesc, ValueType};

#[test]
fn empty_module_decodes_to_an_empty_module() {
    let wasm = hex::decode("0061736d01000000").unwrap();
    let module = decode_module(&wasm).unwrap();
    assert_eq!(module.version, 1);
    assert!(module.types.is_empty());
    assert!(module.imports.is_empty());
    assert!(module.functions.is_empty());
    assert!(module.exports.is_empty());
    assert!(module.start.is_none());
    assert!(module.section_spans.is_empty());
}

#[test]
fn single_empty_function_type() {
    // Type section with one () -> () entry.
    let wasm = ModuleBuilder::new()
        .section(
            binary::TYPE_SECTION_ID,
            &counted(&[func_type(&[], &[])]),
        )
        .build();
    let module = decode_module(&wasm).unwrap();
    assert_eq!(module.types.len(), 1);
    assert!(module.types[0].params.is_empty());
    assert!(module.types[0].results.is_empty());
    assert!(module.is_present(binary::TYPE_SECTION_ID));
}

#[test]
fn module_from_wat_text() {
    let wasm = wat::parse_str(
        r#"(module
            (func $answer (export "answer") (result i32)
                i32.const 42)
            (memory (export "mem") 1 4)
            (data (i32.const 8) "hello")
            (func $run
                call $answer
                drop)
            (start $run))"#,
    )
    .unwrap();

    let module = decode_module(&wasm).unwrap();
    assert_eq!(module.functions.len(), 2);
    assert_eq!(module.code.len(), 2);
    assert_eq!(module.memories.len(), 1);
    assert_eq!(module.memories[0].limits.min, 1);
    assert_eq!(module.memories[0].limits.max, Some(4));
    assert!(module.memories[0].exported);
    assert_eq!(module.data.len(), 1);
    assert_eq!(module.data[0].init, b"hello");
    assert_eq!(module.start, Some(1));

    let answer = module.find_export("answer").unwrap();
    assert_eq!(answer.kind, ExternKind::Func);
    let func_type = module.func_type(answer.index).unwrap();
    assert_eq!(func_type.results, vec![ValueType::I32]);
}

#[test]
fn imports_fill_the_combined_index_spaces() {
    let wasm = ModuleBuilder::new()
        .section(
            binary::TYPE_SECTION_ID,
            &counted(&[func_type(&[binary::I32_TYPE], &[])]),
        )
        .section(
            binary::IMPORT_SECTION_ID,
            &counted(&[
                import("env", "log", &[binary::EXTERN_FUNC, 0x00]),
                import("env", "mem", &{
                    let mut desc = vec![binary::EXTERN_MEMORY];
                    desc.extend_from_slice(&limits_min(1));
                    desc
                }),
                import("env", "seed", &[binary::EXTERN_GLOBAL, binary::I64_TYPE, 0x00]),
            ]),
        )
        .section(binary::FUNCTION_SECTION_ID, &counted(&[leb(0)]))
        .section(binary::CODE_SECTION_ID, &counted(&[empty_code_entry()]))
        .build();

    let module = decode_module(&wasm).unwrap();
    assert_eq!(module.imports.len(), 3);
    assert_eq!(module.imported_funcs.len(), 1);
    assert_eq!(module.imported_memories.len(), 1);
    assert_eq!(module.imported_globals.len(), 1);
    // Function 0 is the import, function 1 the definition.
    assert_eq!(module.func_count(), 2);
    assert_eq!(module.func_type_index(0), Some(0));
    assert_eq!(module.func_type_index(1), Some(0));
    assert_eq!(module.memory_count(), 1);

    let seed = module.imported_global_type(0).unwrap();
    assert_eq!(seed.value_type, ValueType::I64);
    assert!(!seed.mutable);
    assert!(matches!(module.imports[0].desc, ImportDesc::Func(0)));
}

#[test]
fn globals_tables_elements_and_exports() {
    let wasm = ModuleBuilder::new()
        .section(
            binary::TYPE_SECTION_ID,
            &counted(&[func_type(&[], &[])]),
        )
        .section(binary::FUNCTION_SECTION_ID, &counted(&[leb(0)]))
        .section(binary::TABLE_SECTION_ID, &counted(&[{
            let mut table = vec![binary::FUNCREF_TYPE];
            table.extend_from_slice(&limits_min_max(1, 8));
            table
        }]))
        .section(binary::GLOBAL_SECTION_ID, &counted(&[{
            let mut global = vec![binary::I32_TYPE, 0x01];
            global.extend_from_slice(&i32_const_expr(7));
            global
        }]))
        .section(
            binary::EXPORT_SECTION_ID,
            &counted(&[
                export("f", binary::EXTERN_FUNC, 0),
                export("t", binary::EXTERN_TABLE, 0),
                export("g", binary::EXTERN_GLOBAL, 0),
            ]),
        )
        .section(binary::ELEMENT_SECTION_ID, &counted(&[{
            let mut segment = leb(0);
            segment.extend_from_slice(&i32_const_expr(0));
            segment.extend_from_slice(&counted(&[leb(0)]));
            segment
        }]))
        .section(binary::CODE_SECTION_ID, &counted(&[empty_code_entry()]))
        .build();

    let module = decode_module(&wasm).unwrap();
    assert_eq!(module.tables.len(), 1);
    assert_eq!(module.tables[0].element, ValueType::FuncRef);
    assert_eq!(module.tables[0].limits.max, Some(8));
    assert!(module.tables[0].exported);

    assert_eq!(module.globals.len(), 1);
    assert!(module.globals[0].global_type.mutable);
    assert!(module.globals[0].global_type.exported);
    assert_eq!(module.globals[0].init.bytes, &[0x41, 0x07, 0x0B]);

    assert_eq!(module.elements.len(), 1);
    assert_eq!(module.elements[0].table_index, 0);
    assert_eq!(module.elements[0].functions, vec![0]);

    assert_eq!(module.exported_funcs.len(), 1);
    assert_eq!(module.exported_tables.len(), 1);
    assert_eq!(module.exported_globals.len(), 1);
}

#[test]
fn custom_sections_are_retained_as_spans() {
    let mut payload = wvm_format::binary::write_name("build-id");
    payload.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    let wasm = ModuleBuilder::new()
        .section(binary::CUSTOM_SECTION_ID, &payload)
        .section(
            binary::TYPE_SECTION_ID,
            &counted(&[func_type(&[], &[])]),
        )
        .section(binary::CUSTOM_SECTION_ID, &payload)
        .build();

    let module = decode_module(&wasm).unwrap();
    assert_eq!(module.custom_sections.len(), 2);
    let section = module.find_custom_section("build-id").unwrap();
    assert_eq!(section.data, &[0xDE, 0xAD, 0xBE, 0xEF]);
    // Spans index back into the original buffer.
    assert_eq!(&wasm[section.span.begin..section.span.end], &payload[..]);
}

#[test]
fn name_section_supplements_diagnostics() {
    let mut name_payload = wvm_format::binary::write_name("name");
    // Subsection 0: module name.
    let module_name = wvm_format::binary::write_name("demo");
    name_payload.push(0);
    name_payload.extend_from_slice(&leb(module_name.len() as u32));
    name_payload.extend_from_slice(&module_name);

    let wasm = ModuleBuilder::new()
        .section(binary::CUSTOM_SECTION_ID, &name_payload)
        .build();
    let module = decode_module(&wasm).unwrap();
    assert_eq!(module.module_name.as_deref(), Some("demo"));
}

#[test]
fn malformed_name_section_does_not_fail_the_module() {
    let mut name_payload = wvm_format::binary::write_name("name");
    // Subsection 0 whose declared size overruns the payload.
    name_payload.push(0);
    name_payload.extend_from_slice(&leb(100));

    let wasm = ModuleBuilder::new()
        .section(binary::CUSTOM_SECTION_ID, &name_payload)
        .build();
    let module = decode_module(&wasm).unwrap();
    assert!(module.module_name.is_none());
    assert_eq!(module.custom_sections.len(), 1);
}

#[test]
fn padded_section_length_is_accepted() {
    // Type section length 4 spelled as a two-byte varint with zero padding.
    let wasm = ModuleBuilder::new()
        .raw(&[binary::TYPE_SECTION_ID, 0x84, 0x00])
        .raw(&counted(&[func_type(&[], &[])]))
        .build();
    let module = decode_module(&wasm).unwrap();
    assert_eq!(module.types.len(), 1);
}

#[test]
fn section_spans_are_recorded_in_stream_order() {
    let wasm = ModuleBuilder::new()
        .section(
            binary::TYPE_SECTION_ID,
            &counted(&[func_type(&[], &[])]),
        )
        .section(binary::FUNCTION_SECTION_ID, &counted(&[leb(0)]))
        .section(binary::CODE_SECTION_ID, &counted(&[empty_code_entry()]))
        .build();
    let module = decode_module(&wasm).unwrap();
    let ids: Vec<u8> = module.section_spans.iter().map(|(id, _)| *id).collect();
    assert_eq!(
        ids,
        vec![
            binary::TYPE_SECTION_ID,
            binary::FUNCTION_SECTION_ID,
            binary::CODE_SECTION_ID
        ]
    );
}

#[test]
fn registry_is_reusable_across_parses() {
    let registry = Registry::mvp().unwrap();
    let params = DecodeParams::default();
    let a = ModuleBuilder::new().build();
    let b = ModuleBuilder::new()
        .section(
            binary::TYPE_SECTION_ID,
            &counted(&[func_type(&[], &[])]),
        )
        .build();

    assert!(registry.decode(&a, &params).unwrap().types.is_empty());
    assert_eq!(registry.decode(&b, &params).unwrap().types.len(), 1);
    // The earlier parse is unaffected by the later one.
    assert!(registry.decode(&a, &params).unwrap().types.is_empty());
}
