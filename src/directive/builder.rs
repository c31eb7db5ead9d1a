//! Builders producing immutable directives

use super::{ConversionDirective, ElementsDirective, StrategyName, DEFAULT_ELEMENTS_NAME};
use crate::error::ConversionResult;
use indexmap::IndexMap;
use std::sync::Arc;

/// Mutable builder for [`ConversionDirective`]
#[derive(Debug, Clone)]
pub struct DirectiveBuilder {
    enabled: bool,
    output_name: Option<String>,
    strategy: StrategyName,
    fields: IndexMap<String, ConversionDirective>,
    single_field: Option<String>,
    elements: Option<ElementsDirective>,
}

impl Default for DirectiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveBuilder {
    pub fn new() -> Self {
        Self {
            enabled: true,
            output_name: None,
            strategy: StrategyName::Scalars,
            fields: IndexMap::new(),
            single_field: None,
            elements: None,
        }
    }

    /// Start from an existing directive, e.g. to extend a shared default
    pub fn from_directive(directive: &ConversionDirective) -> Self {
        Self {
            enabled: directive.enabled,
            output_name: directive.output_name.clone(),
            strategy: directive.strategy,
            fields: directive.fields.as_ref().clone(),
            single_field: directive.single_field.clone(),
            elements: directive.elements.as_deref().cloned(),
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    pub fn strategy(mut self, strategy: StrategyName) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the strategy by name (case-insensitive)
    pub fn strategy_name(self, name: &str) -> ConversionResult<Self> {
        Ok(self.strategy(StrategyName::from_name(name)?))
    }

    /// Add or replace the directive for one source field
    pub fn with_field(mut self, name: impl Into<String>, directive: ConversionDirective) -> Self {
        self.fields.insert(name.into(), directive);
        self
    }

    /// Replace every per-field directive at once
    pub fn fields(mut self, fields: IndexMap<String, ConversionDirective>) -> Self {
        self.fields = fields;
        self
    }

    pub fn single_field(mut self, field: impl Into<String>) -> Self {
        self.single_field = Some(field.into());
        self
    }

    pub fn elements(mut self, elements: ElementsDirective) -> Self {
        self.elements = Some(elements);
        self
    }

    /// Shorthand for `elements(ElementsDirective::each(each))`
    pub fn each(self, each: ConversionDirective) -> Self {
        self.elements(ElementsDirective::each(each))
    }

    pub fn build(self) -> ConversionResult<ConversionDirective> {
        let directive = ConversionDirective {
            enabled: self.enabled,
            output_name: self.output_name,
            strategy: self.strategy,
            fields: Arc::new(self.fields),
            single_field: self.single_field,
            elements: self.elements.map(Arc::new),
        };
        directive.validate()?;
        Ok(directive)
    }
}

/// Mutable builder for [`ElementsDirective`]
#[derive(Debug, Clone)]
pub struct ElementsBuilder {
    output_name: String,
    enabled: bool,
    each: ConversionDirective,
}

impl Default for ElementsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementsBuilder {
    pub fn new() -> Self {
        Self {
            output_name: DEFAULT_ELEMENTS_NAME.to_string(),
            enabled: true,
            each: ConversionDirective::default(),
        }
    }

    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn each(mut self, each: ConversionDirective) -> Self {
        self.each = each;
        self
    }

    pub fn build(self) -> ConversionResult<ElementsDirective> {
        let elements = ElementsDirective {
            output_name: self.output_name,
            enabled: self.enabled,
            each: Arc::new(self.each),
        };
        elements.validate_at("elements")?;
        Ok(elements)
    }
}
