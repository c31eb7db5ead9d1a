//! Field enablement rules

use crate::conversion::config::ConversionConfig;
use crate::directive::{ConversionDirective, StrategyName};

/// Why a field was left out of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Hard-redacted name; no directive can re-enable it
    Redacted,
    /// The per-field or elements directive is disabled
    Disabled,
    /// DEFINED strategy and no directive lists the field
    NotDefined,
    /// SCALARS strategy and the compound field has no directive
    UnlistedCompound,
}

/// Directive lookup result for one field of the value being converted
#[derive(Debug, Clone, Copy)]
pub struct FieldGate {
    pub defined: bool,
    pub enabled: bool,
}

impl FieldGate {
    /// Resolve `defined`/`enabled` for a field.
    ///
    /// The `items` field of a collection is governed by the elements
    /// directive; an absent elements directive leaves it enabled.
    pub fn resolve(directive: &ConversionDirective, name: &str, collection_items: bool) -> Self {
        if collection_items {
            match directive.elements() {
                Some(elements) => FieldGate {
                    defined: true,
                    enabled: elements.is_enabled(),
                },
                None => FieldGate {
                    defined: false,
                    enabled: true,
                },
            }
        } else {
            match directive.field(name) {
                Some(field) => FieldGate {
                    defined: true,
                    enabled: field.is_enabled(),
                },
                None => FieldGate {
                    defined: false,
                    enabled: true,
                },
            }
        }
    }
}

/// Gating that does not need the field's value
///
/// Runs before the field is read so that excluded fields are never fetched.
pub fn pre_read_exclusion(
    config: &ConversionConfig,
    strategy: StrategyName,
    name: &str,
    gate: FieldGate,
) -> Option<Exclusion> {
    if config.is_redacted(name) {
        return Some(Exclusion::Redacted);
    }
    if !gate.enabled {
        return Some(Exclusion::Disabled);
    }
    if strategy == StrategyName::Defined && !gate.defined {
        return Some(Exclusion::NotDefined);
    }
    None
}

/// Gating that depends on whether the field's value is compound
pub fn post_read_exclusion(
    strategy: StrategyName,
    gate: FieldGate,
    compound: bool,
) -> Option<Exclusion> {
    if strategy == StrategyName::Scalars && compound && !gate.defined {
        return Some(Exclusion::UnlistedCompound);
    }
    None
}
