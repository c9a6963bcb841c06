// WVM - wvm-decoder
// Module: Decode Parameters
//
// Copyright (c) 2025 The WVM Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Per-parse tunables.
//!
//! There is no process-wide configuration: every knob enters through an
//! explicit [`DecodeParams`] value handed to [`crate::Registry::decode`].
//! Entry-count bounds are checked against the declared count before any
//! allocation is sized from it, so a hostile count cannot drive memory
//! consumption.

use crate::prelude::*;

/// Entry-count and size bounds for the baseline feature set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MvpLimits {
    /// Maximum type section entries
    pub max_type_count: u32,
    /// Maximum import section entries
    pub max_import_count: u32,
    /// Maximum function section entries
    pub max_function_count: u32,
    /// Maximum table section entries
    pub max_table_count: u32,
    /// Maximum memory section entries
    pub max_memory_count: u32,
    /// Maximum global section entries
    pub max_global_count: u32,
    /// Maximum export section entries
    pub max_export_count: u32,
    /// Maximum element section segments
    pub max_element_count: u32,
    /// Maximum function indices in one element segment
    pub max_element_function_count: u32,
    /// Maximum code section entries
    pub max_code_count: u32,
    /// Maximum data section segments
    pub max_data_count: u32,
    /// Maximum declared locals in one function body
    pub max_code_locals: u32,
    /// Maximum byte length of any single name
    pub max_name_bytes: u32,
}

impl Default for MvpLimits {
    fn default() -> Self {
        Self {
            max_type_count: 262_144,
            max_import_count: 262_144,
            max_function_count: 262_144,
            max_table_count: 1_024,
            max_memory_count: 1_024,
            max_global_count: 262_144,
            max_export_count: 262_144,
            max_element_count: 262_144,
            max_element_function_count: 262_144,
            max_code_count: 262_144,
            max_data_count: 262_144,
            max_code_locals: 65_536,
            max_name_bytes: 4_096,
        }
    }
}

/// Parameter aggregate for one parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeParams {
    /// Baseline entry-count bounds
    pub mvp: MvpLimits,
    /// When set, overrides the composed multi-value capability for this parse
    pub multi_value_override: Option<bool>,
    /// Validation policy applied to every name the decoder reads
    pub text_policy: TextPolicy,
}

/// Reject a declared entry count that exceeds its configured bound
pub(crate) fn check_count(count: u32, bound: u32, what: &'static str, offset: usize) -> Result<()> {
    if count > bound {
        return Err(Error::new(
            ErrorCategory::Limit,
            codes::LIMIT_EXCEEDED,
            offset,
            what,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_baseline_bounds() {
        let limits = MvpLimits::default();
        assert_eq!(limits.max_type_count, 262_144);
        assert_eq!(limits.max_table_count, 1_024);
        assert_eq!(limits.max_memory_count, 1_024);
        assert_eq!(limits.max_code_locals, 65_536);
        assert_eq!(limits.max_name_bytes, 4_096);
    }

    #[test]
    fn count_check_reports_limit_category() {
        assert!(check_count(10, 10, "entries", 0).is_ok());
        let err = check_count(11, 10, "too many entries", 7).unwrap_err();
        assert_eq!(err.category, ErrorCategory::Limit);
        assert_eq!(err.code, codes::LIMIT_EXCEEDED);
        assert_eq!(err.offset, 7);
    }
}
