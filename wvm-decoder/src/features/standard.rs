// WVM - wvm-decoder
// Module: Shipped Feature Descriptors
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Shipped feature descriptors.
//!
//! [`MvpFeature`] anchors binary-format version 1 with the twelve baseline
//! section decoders; the remaining features are additive and extend any
//! version group they are composed into.

use crate::framer;
use crate::prelude::*;
use crate::sections;

use super::{Capabilities, EntryPointFn, Feature, SectionTable, ValueTypeRegistry};

/// Baseline feature set: binary-format version 1, the twelve standard
/// sections, and the numeric plus funcref value types
#[derive(Debug, Clone, Copy, Default)]
pub struct MvpFeature;

impl Feature for MvpFeature {
    fn name(&self) -> &'static str {
        "mvp"
    }

    fn binfmt_version(&self) -> Option<u32> {
        Some(binary::BINFMT_VERSION_1)
    }

    fn entry_point(&self) -> Option<EntryPointFn> {
        Some(framer::decode_module)
    }

    fn register_value_types(&self, registry: &mut ValueTypeRegistry) -> Result<()> {
        registry.register(binary::I32_TYPE, ValueType::I32)?;
        registry.register(binary::I64_TYPE, ValueType::I64)?;
        registry.register(binary::F32_TYPE, ValueType::F32)?;
        registry.register(binary::F64_TYPE, ValueType::F64)?;
        registry.register(binary::FUNCREF_TYPE, ValueType::FuncRef)?;
        Ok(())
    }

    fn register_sections(&self, table: &mut SectionTable) -> Result<()> {
        table.register(binary::CUSTOM_SECTION_ID, sections::custom::decode)?;
        table.register(binary::TYPE_SECTION_ID, sections::types::decode)?;
        table.register(binary::IMPORT_SECTION_ID, sections::imports::decode)?;
        table.register(binary::FUNCTION_SECTION_ID, sections::functions::decode)?;
        table.register(binary::TABLE_SECTION_ID, sections::tables::decode)?;
        table.register(binary::MEMORY_SECTION_ID, sections::memories::decode)?;
        table.register(binary::GLOBAL_SECTION_ID, sections::globals::decode)?;
        table.register(binary::EXPORT_SECTION_ID, sections::exports::decode)?;
        table.register(binary::START_SECTION_ID, sections::start::decode)?;
        table.register(binary::ELEMENT_SECTION_ID, sections::elements::decode)?;
        table.register(binary::CODE_SECTION_ID, sections::code::decode)?;
        table.register(binary::DATA_SECTION_ID, sections::data::decode)?;
        Ok(())
    }

    fn parameter_fields(&self) -> &'static [&'static str] {
        &[
            "max_type_count",
            "max_import_count",
            "max_function_count",
            "max_table_count",
            "max_memory_count",
            "max_global_count",
            "max_export_count",
            "max_element_count",
            "max_element_function_count",
            "max_code_count",
            "max_data_count",
            "max_code_locals",
            "max_name_bytes",
        ]
    }
}

/// Allows function types with more than one result
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiValueFeature;

impl Feature for MultiValueFeature {
    fn name(&self) -> &'static str {
        "multi-value"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            multi_value: true,
            ..Capabilities::default()
        }
    }
}

/// Rejects structurally identical function types in the type section
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictTypesFeature;

impl Feature for StrictTypesFeature {
    fn name(&self) -> &'static str {
        "strict-types"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            prohibit_duplicate_types: true,
            ..Capabilities::default()
        }
    }
}

/// Allows more than one declared or imported memory
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiMemoryFeature;

impl Feature for MultiMemoryFeature {
    fn name(&self) -> &'static str {
        "multi-memory"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            multiple_memories: true,
            ..Capabilities::default()
        }
    }
}

/// Allows more than one declared or imported table
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiTableFeature;

impl Feature for MultiTableFeature {
    fn name(&self) -> &'static str {
        "multi-table"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            multiple_tables: true,
            ..Capabilities::default()
        }
    }
}

/// Accepts 64-bit limits flags on memories
#[derive(Debug, Clone, Copy, Default)]
pub struct Memory64Feature;

impl Feature for Memory64Feature {
    fn name(&self) -> &'static str {
        "memory64"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            memory64: true,
            ..Capabilities::default()
        }
    }
}

/// Registers the data-count section and passive data segments
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkMemoryFeature;

impl Feature for BulkMemoryFeature {
    fn name(&self) -> &'static str {
        "bulk-memory"
    }

    fn register_sections(&self, table: &mut SectionTable) -> Result<()> {
        table.register(binary::DATA_COUNT_SECTION_ID, sections::data::decode_count)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            passive_data: true,
            ..Capabilities::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Registry;

    #[test]
    fn mvp_composes_alone() {
        let registry = Registry::compose(&[&MvpFeature]).unwrap();
        let handlers = registry.version_handlers(1).unwrap();
        assert!(handlers.sections.get(binary::TYPE_SECTION_ID).is_some());
        assert!(handlers
            .sections
            .get(binary::DATA_COUNT_SECTION_ID)
            .is_none());
        assert!(!registry.capabilities().multi_value);
    }

    #[test]
    fn bulk_memory_extends_the_version_group() {
        let registry = Registry::compose(&[&MvpFeature, &BulkMemoryFeature]).unwrap();
        let handlers = registry.version_handlers(1).unwrap();
        assert!(handlers
            .sections
            .get(binary::DATA_COUNT_SECTION_ID)
            .is_some());
        assert!(registry.capabilities().passive_data);
    }

    #[test]
    fn additive_features_alone_cannot_compose() {
        let err = Registry::compose(&[&MultiValueFeature, &Memory64Feature]).unwrap_err();
        assert_eq!(err.code, codes::MISSING_ENTRY_POINT);
    }

    #[test]
    fn composing_mvp_twice_collides_on_parameters() {
        let err = Registry::compose(&[&MvpFeature, &MvpFeature]).unwrap_err();
        assert_eq!(err.code, codes::DUPLICATE_PARAMETER_NAME);
    }
}
