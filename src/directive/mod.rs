//! Conversion directives
//!
//! A directive tree describes how one value position is projected: whether it
//! is emitted, under which name, which of its fields are included, and how a
//! collection's elements are converted. Directives are immutable once built and
//! share their children through `Arc`, so one tree can serve any number of
//! concurrent conversions.

pub mod builder;
pub mod strategy;

pub use builder::{DirectiveBuilder, ElementsBuilder};
pub use strategy::StrategyName;

use crate::error::{ConversionError, ConversionResult};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::sync::Arc;

/// Default name of the list field wrapping a collection's elements
pub const DEFAULT_ELEMENTS_NAME: &str = "items";

/// Directive for a single value position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DirectiveRepr", into = "DirectiveRepr")]
pub struct ConversionDirective {
    pub(crate) enabled: bool,
    pub(crate) output_name: Option<String>,
    pub(crate) strategy: StrategyName,
    pub(crate) fields: Arc<IndexMap<String, ConversionDirective>>,
    pub(crate) single_field: Option<String>,
    pub(crate) elements: Option<Arc<ElementsDirective>>,
}

impl Default for ConversionDirective {
    fn default() -> Self {
        Self {
            enabled: true,
            output_name: None,
            strategy: StrategyName::Scalars,
            fields: Arc::new(IndexMap::new()),
            single_field: None,
            elements: None,
        }
    }
}

impl ConversionDirective {
    /// Start a builder with default settings
    pub fn builder() -> DirectiveBuilder {
        DirectiveBuilder::new()
    }

    /// A directive that removes the value from the output entirely
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn with_strategy(strategy: StrategyName) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Collapse a compound value to one of its fields
    pub fn single(field: &str) -> ConversionResult<Self> {
        DirectiveBuilder::new()
            .strategy(StrategyName::Single)
            .single_field(field)
            .build()
    }

    /// Represent a collection as the bare list of its converted elements
    pub fn list(each: ConversionDirective) -> Self {
        Self {
            strategy: StrategyName::List,
            elements: Some(Arc::new(ElementsDirective::each(each))),
            ..Default::default()
        }
    }

    /// Directive used for account-like resources when the caller has no
    /// configuration of its own: scalar fields, scalar `customData`, and the
    /// `groups` collection reduced to the group fields listed for its elements.
    pub fn resource_default() -> Self {
        let groups = ConversionDirective {
            strategy: StrategyName::Defined,
            elements: Some(Arc::new(ElementsDirective::each(
                ConversionDirective::default(),
            ))),
            ..Default::default()
        };

        let mut fields = IndexMap::new();
        fields.insert(
            "customData".to_string(),
            ConversionDirective::with_strategy(StrategyName::Scalars),
        );
        fields.insert("groups".to_string(), groups);

        Self {
            fields: Arc::new(fields),
            ..Default::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn output_name(&self) -> Option<&str> {
        self.output_name.as_deref()
    }

    pub fn strategy(&self) -> StrategyName {
        self.strategy
    }

    pub fn fields(&self) -> &IndexMap<String, ConversionDirective> {
        &self.fields
    }

    /// Per-field override for `name`, if one was configured
    pub fn field(&self, name: &str) -> Option<&ConversionDirective> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn single_field(&self) -> Option<&str> {
        self.single_field.as_deref()
    }

    pub fn elements(&self) -> Option<&ElementsDirective> {
        self.elements.as_deref()
    }

    /// Check the whole tree, reporting the dotted path of the first bad node
    pub fn validate(&self) -> ConversionResult<()> {
        self.validate_at("")
    }

    pub(crate) fn validate_at(&self, path: &str) -> ConversionResult<()> {
        if let Some(name) = &self.output_name {
            if name.trim().is_empty() {
                return Err(ConversionError::invalid_directive(
                    path,
                    "outputName cannot be empty",
                ));
            }
        }

        if let Some(field) = &self.single_field {
            if field.trim().is_empty() {
                return Err(ConversionError::invalid_directive(
                    path,
                    "singleField cannot be empty",
                ));
            }
        }

        for (name, field) in self.fields.iter() {
            if name.trim().is_empty() {
                return Err(ConversionError::invalid_directive(
                    join_path(path, "fields"),
                    "field names cannot be empty",
                ));
            }
            field.validate_at(&join_path(&join_path(path, "fields"), name))?;
        }

        if let Some(elements) = &self.elements {
            elements.validate_at(&join_path(path, "elements"))?;
        }

        Ok(())
    }
}

/// Directive for the elements of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ElementsRepr", into = "ElementsRepr")]
pub struct ElementsDirective {
    pub(crate) output_name: String,
    pub(crate) enabled: bool,
    pub(crate) each: Arc<ConversionDirective>,
}

impl Default for ElementsDirective {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_ELEMENTS_NAME.to_string(),
            enabled: true,
            each: Arc::new(ConversionDirective::default()),
        }
    }
}

impl ElementsDirective {
    pub fn builder() -> ElementsBuilder {
        ElementsBuilder::new()
    }

    /// Convert every element with `each`, keeping the default wrapper name
    pub fn each(each: ConversionDirective) -> Self {
        Self {
            each: Arc::new(each),
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Name of the list field in the wrapping object. Unused under LIST.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn each_directive(&self) -> &ConversionDirective {
        &self.each
    }

    pub(crate) fn validate_at(&self, path: &str) -> ConversionResult<()> {
        if self.output_name.trim().is_empty() {
            return Err(ConversionError::invalid_directive(
                path,
                "elements outputName cannot be empty",
            ));
        }
        self.each.validate_at(&join_path(path, "each"))
    }
}

/// Join a diagnostic path segment with a dot
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}.{}", parent, child)
    }
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

fn default_elements_name() -> String {
    DEFAULT_ELEMENTS_NAME.to_string()
}

/// Configuration shape of a directive node
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct DirectiveRepr {
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    enabled: bool,
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    output_name: Option<String>,
    #[serde(default)]
    strategy: StrategyName,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    fields: IndexMap<String, ConversionDirective>,
    #[serde(default, alias = "field", skip_serializing_if = "Option::is_none")]
    single_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elements: Option<ElementsDirective>,
}

impl TryFrom<DirectiveRepr> for ConversionDirective {
    type Error = ConversionError;

    fn try_from(repr: DirectiveRepr) -> Result<Self, Self::Error> {
        let directive = ConversionDirective {
            enabled: repr.enabled,
            output_name: repr.output_name,
            strategy: repr.strategy,
            fields: Arc::new(repr.fields),
            single_field: repr.single_field,
            elements: repr.elements.map(Arc::new),
        };
        directive.validate()?;
        Ok(directive)
    }
}

impl From<ConversionDirective> for DirectiveRepr {
    fn from(directive: ConversionDirective) -> Self {
        DirectiveRepr {
            enabled: directive.enabled,
            output_name: directive.output_name,
            strategy: directive.strategy,
            fields: Arc::unwrap_or_clone(directive.fields),
            single_field: directive.single_field,
            elements: directive.elements.map(Arc::unwrap_or_clone),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ElementsRepr {
    #[serde(default = "default_elements_name", alias = "name")]
    output_name: String,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    enabled: bool,
    #[serde(default)]
    each: ConversionDirective,
}

impl TryFrom<ElementsRepr> for ElementsDirective {
    type Error = ConversionError;

    fn try_from(repr: ElementsRepr) -> Result<Self, Self::Error> {
        let elements = ElementsDirective {
            output_name: repr.output_name,
            enabled: repr.enabled,
            each: Arc::new(repr.each),
        };
        elements.validate_at("elements")?;
        Ok(elements)
    }
}

impl From<ElementsDirective> for ElementsRepr {
    fn from(elements: ElementsDirective) -> Self {
        ElementsRepr {
            output_name: elements.output_name,
            enabled: elements.enabled,
            each: Arc::unwrap_or_clone(elements.each),
        }
    }
}
