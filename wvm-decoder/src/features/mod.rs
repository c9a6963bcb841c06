// WVM - wvm-decoder
// Module: Feature Composition Engine
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Feature descriptors and the composition registry.
//!
//! Decoding is parameterized by a set of [`Feature`] values composed once,
//! before any byte is read. Composition resolves every cross-feature
//! question up front (who decodes which section id, which bytes name which
//! value types, which capabilities are in force), so the per-parse hot path
//! is a pair of table lookups with no branching on feature identity.
//!
//! A [`Registry`] is immutable after [`Registry::compose`] returns and can
//! be shared freely across threads and parses.

use crate::framer;
use crate::params::DecodeParams;
use crate::prelude::*;

pub mod standard;

/// Static behavior flags resolved at composition time.
///
/// The union (logical OR) of all composed features' flags, except that
/// [`DecodeParams::multi_value_override`] takes precedence over the composed
/// `multi_value` flag for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Function types may declare more than one result
    pub multi_value: bool,
    /// Modules may declare or import more than one memory
    pub multiple_memories: bool,
    /// Modules may declare or import more than one table
    pub multiple_tables: bool,
    /// Structurally identical function types are rejected
    pub prohibit_duplicate_types: bool,
    /// 64-bit memory limits flags are accepted
    pub memory64: bool,
    /// Passive data segments and explicit memory indices are accepted
    pub passive_data: bool,
}

impl Capabilities {
    /// Union of two capability sets
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            multi_value: self.multi_value || other.multi_value,
            multiple_memories: self.multiple_memories || other.multiple_memories,
            multiple_tables: self.multiple_tables || other.multiple_tables,
            prohibit_duplicate_types: self.prohibit_duplicate_types
                || other.prohibit_duplicate_types,
            memory64: self.memory64 || other.memory64,
            passive_data: self.passive_data || other.passive_data,
        }
    }
}

/// Byte-to-value-type map synthesized at composition time.
///
/// Append-only: a feature may re-register an identical mapping, but
/// remapping an already-taken byte to a different type fails composition.
#[derive(Debug, Clone)]
pub struct ValueTypeRegistry {
    map: [Option<ValueType>; 256],
}

impl ValueTypeRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self { map: [None; 256] }
    }

    /// Register `byte` as encoding `value_type`
    pub fn register(&mut self, byte: u8, value_type: ValueType) -> Result<()> {
        match self.map[byte as usize] {
            Some(existing) if existing != value_type => Err(Error::new(
                ErrorCategory::Composition,
                codes::VALUE_TYPE_REMAPPED,
                0,
                "value type byte already registered with a different meaning",
            )),
            _ => {
                self.map[byte as usize] = Some(value_type);
                Ok(())
            }
        }
    }

    /// Value type encoded by `byte`, if registered
    #[must_use]
    pub fn lookup(&self, byte: u8) -> Option<ValueType> {
        self.map[byte as usize]
    }
}

impl Default for ValueTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One section's raw payload, handed to its registered handler
#[derive(Debug, Clone, Copy)]
pub struct SectionPayload<'a> {
    /// Section id byte
    pub id: u8,
    /// Payload bytes, exactly as framed
    pub bytes: &'a [u8],
    /// Absolute module offset of the first payload byte
    pub offset: usize,
}

/// Everything a section handler may consult besides the payload itself
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'ctx> {
    /// Per-parse tunables
    pub params: &'ctx DecodeParams,
    /// Resolved capabilities, runtime override already applied
    pub caps: Capabilities,
    /// Byte-to-value-type map of the active feature set
    pub types: &'ctx ValueTypeRegistry,
}

/// Section handler: decodes one payload into the module, returning the
/// number of payload bytes consumed so the framer can cross-check it
/// against the declared section length.
pub type SectionHandlerFn =
    for<'a> fn(&mut Module<'a>, SectionPayload<'a>, &DecodeContext<'_>) -> Result<usize>;

/// Entry point: drives the whole parse for one binary-format version.
pub type EntryPointFn =
    for<'a> fn(&'a [u8], &DecodeContext<'_>, &SectionTable) -> Result<Module<'a>>;

/// Per-version section dispatch table
#[derive(Debug, Clone)]
pub struct SectionTable {
    handlers: [Option<SectionHandlerFn>; 16],
}

impl SectionTable {
    /// Empty table
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: [None; 16],
        }
    }

    /// Claim a section id for `handler`
    pub fn register(&mut self, id: u8, handler: SectionHandlerFn) -> Result<()> {
        let slot = self.handlers.get_mut(id as usize).ok_or_else(|| {
            Error::new(
                ErrorCategory::Composition,
                codes::DUPLICATE_SECTION_HANDLER,
                0,
                "section id is outside the dispatch table",
            )
        })?;
        if slot.is_some() {
            return Err(Error::new(
                ErrorCategory::Composition,
                codes::DUPLICATE_SECTION_HANDLER,
                0,
                "section id already claimed by another feature",
            ));
        }
        *slot = Some(handler);
        Ok(())
    }

    /// Handler registered for `id`, if any
    #[must_use]
    pub fn get(&self, id: u8) -> Option<SectionHandlerFn> {
        self.handlers.get(id as usize).copied().flatten()
    }
}

impl Default for SectionTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A composable decoder feature.
///
/// Features with a `binfmt_version` anchor a version group (at most one of
/// them per version supplies the entry point); version-less features extend
/// every composed version group.
pub trait Feature {
    /// Stable feature name, for diagnostics
    fn name(&self) -> &'static str;

    /// Binary-format version this feature anchors, if any
    fn binfmt_version(&self) -> Option<u32> {
        None
    }

    /// Entry decoder for the anchored version, if this feature supplies it
    fn entry_point(&self) -> Option<EntryPointFn> {
        None
    }

    /// Contribute byte-to-value-type mappings
    fn register_value_types(&self, _registry: &mut ValueTypeRegistry) -> Result<()> {
        Ok(())
    }

    /// Claim section ids in the dispatch table
    fn register_sections(&self, _table: &mut SectionTable) -> Result<()> {
        Ok(())
    }

    /// Static behavior flags contributed by this feature
    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Tunable parameter field names this feature declares.
    ///
    /// Used only to detect two features claiming the same knob.
    fn parameter_fields(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Entry point and dispatch table for one binary-format version
#[derive(Debug, Clone)]
pub struct VersionHandlers {
    /// The version these handlers decode
    pub version: u32,
    /// Entry decoder driving the parse
    pub entry: EntryPointFn,
    /// Section dispatch table
    pub sections: SectionTable,
}

fn composition_error(code: u16, message: &'static str) -> Error {
    Error::new(ErrorCategory::Composition, code, 0, message)
}

/// An immutable, composed feature set ready to decode modules
#[derive(Debug, Clone)]
pub struct Registry {
    versions: Vec<VersionHandlers>,
    value_types: ValueTypeRegistry,
    caps: Capabilities,
}

impl Registry {
    /// Compose a feature set.
    ///
    /// Fails, before any module byte is read, on: an empty feature list,
    /// duplicate tunable parameter names, a value-type byte remapped to a
    /// different type, a section id claimed twice within one version group,
    /// and a version group with zero or more than one entry point.
    pub fn compose(features: &[&dyn Feature]) -> Result<Self> {
        if features.is_empty() {
            return Err(composition_error(
                codes::NO_FEATURES,
                "cannot compose an empty feature list",
            ));
        }

        let mut fields: Vec<&'static str> = Vec::new();
        for feature in features {
            for &field in feature.parameter_fields() {
                if fields.contains(&field) {
                    return Err(composition_error(
                        codes::DUPLICATE_PARAMETER_NAME,
                        "two features declare the same tunable parameter",
                    ));
                }
                fields.push(field);
            }
        }

        let mut value_types = ValueTypeRegistry::new();
        for feature in features {
            feature.register_value_types(&mut value_types)?;
        }

        let mut declared: Vec<u32> = features
            .iter()
            .filter_map(|feature| feature.binfmt_version())
            .collect();
        declared.sort_unstable();
        declared.dedup();
        if declared.is_empty() {
            return Err(composition_error(
                codes::MISSING_ENTRY_POINT,
                "no feature anchors a binary-format version",
            ));
        }

        let mut versions = Vec::with_capacity(declared.len());
        for &version in &declared {
            let mut entry: Option<EntryPointFn> = None;
            let mut sections = SectionTable::new();
            for feature in features {
                let applies = match feature.binfmt_version() {
                    None => true,
                    Some(v) => v == version,
                };
                if !applies {
                    continue;
                }
                if feature.binfmt_version() == Some(version) {
                    if let Some(point) = feature.entry_point() {
                        if entry.is_some() {
                            return Err(composition_error(
                                codes::DUPLICATE_ENTRY_POINT,
                                "two features supply an entry point for the same version",
                            ));
                        }
                        entry = Some(point);
                    }
                }
                feature.register_sections(&mut sections)?;
            }
            let Some(entry) = entry else {
                return Err(composition_error(
                    codes::MISSING_ENTRY_POINT,
                    "version group has no entry point",
                ));
            };
            versions.push(VersionHandlers {
                version,
                entry,
                sections,
            });
        }

        let caps = features
            .iter()
            .fold(Capabilities::default(), |acc, feature| {
                acc.merge(feature.capabilities())
            });

        Ok(Self {
            versions,
            value_types,
            caps,
        })
    }

    /// Compose the baseline feature set alone
    pub fn mvp() -> Result<Self> {
        Self::compose(&[&standard::MvpFeature])
    }

    /// Composed capabilities, before any runtime override
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// Handlers for `version`, if a composed feature anchors it
    #[must_use]
    pub fn version_handlers(&self, version: u32) -> Option<&VersionHandlers> {
        self.versions.iter().find(|v| v.version == version)
    }

    /// Decode and validate one module.
    ///
    /// Reads the header, selects the version group, and hands the buffer to
    /// that group's entry decoder. The returned [`Module`] borrows `bytes`.
    pub fn decode<'a>(&self, bytes: &'a [u8], params: &DecodeParams) -> Result<Module<'a>> {
        let version = framer::read_header(bytes)?;
        let Some(handlers) = self.version_handlers(version) else {
            return Err(Error::new(
                ErrorCategory::Parse,
                codes::UNSUPPORTED_BINFMT_VERSION,
                4,
                "header version selects no composed feature set",
            ));
        };

        let mut caps = self.caps;
        if let Some(multi_value) = params.multi_value_override {
            caps.multi_value = multi_value;
        }

        let ctx = DecodeContext {
            params,
            caps,
            types: &self.value_types,
        };
        (handlers.entry)(bytes, &ctx, &handlers.sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_merge_is_a_union() {
        let a = Capabilities {
            multi_value: true,
            ..Capabilities::default()
        };
        let b = Capabilities {
            memory64: true,
            ..Capabilities::default()
        };
        let merged = a.merge(b);
        assert!(merged.multi_value);
        assert!(merged.memory64);
        assert!(!merged.passive_data);
    }

    #[test]
    fn value_type_registry_rejects_remapping() {
        let mut registry = ValueTypeRegistry::new();
        registry.register(0x7F, ValueType::I32).unwrap();
        registry.register(0x7F, ValueType::I32).unwrap();
        let err = registry.register(0x7F, ValueType::F64).unwrap_err();
        assert_eq!(err.code, codes::VALUE_TYPE_REMAPPED);
        assert_eq!(registry.lookup(0x7F), Some(ValueType::I32));
        assert_eq!(registry.lookup(0x00), None);
    }

    #[test]
    fn empty_feature_list_is_rejected() {
        let err = Registry::compose(&[]).unwrap_err();
        assert_eq!(err.code, codes::NO_FEATURES);
        assert_eq!(err.category, ErrorCategory::Composition);
    }
}
