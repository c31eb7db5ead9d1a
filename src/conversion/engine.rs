//! Core conversion engine
//!
//! Walks a source object graph depth-first under a directive tree and builds
//! the output graph out of ordered JSON maps, lists and scalars. The engine
//! holds only its configuration; all per-call state lives in a [`Walk`], so a
//! single engine can serve concurrent conversions.

use crate::conversion::config::ConversionConfig;
use crate::conversion::policy::{post_read_exclusion, pre_read_exclusion, Exclusion, FieldGate};
use crate::conversion::stats::ConversionMetadata;
use crate::directive::{
    join_path, ConversionDirective, ElementsDirective, StrategyName, DEFAULT_ELEMENTS_NAME,
};
use crate::error::{ConversionError, ConversionResult};
use crate::value::{Compound, FieldValue, HREF_FIELD, ITEMS_FIELD};
use serde_json::{Map, Value};
use std::time::Instant;

/// Converted output together with statistics about the walk
#[derive(Debug, Clone)]
pub struct Projection {
    pub value: Value,
    pub metadata: ConversionMetadata,
}

impl Projection {
    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Main conversion engine
#[derive(Debug, Clone, Default)]
pub struct ConversionEngine {
    config: ConversionConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Create an engine after validating `config`
    pub fn try_new(config: ConversionConfig) -> ConversionResult<Self> {
        config.validate().map_err(ConversionError::configuration)?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert `value` as directed.
    ///
    /// The root must be compound (a map, a list, or a resource). A disabled
    /// root directive yields `Value::Null`.
    pub fn convert(
        &self,
        value: &FieldValue,
        directive: &ConversionDirective,
    ) -> ConversionResult<Value> {
        self.convert_with_metadata(value, directive)
            .map(Projection::into_value)
    }

    /// Convert `value` and report what the walk did
    pub fn convert_with_metadata(
        &self,
        value: &FieldValue,
        directive: &ConversionDirective,
    ) -> ConversionResult<Projection> {
        let start_time = Instant::now();
        let _span = tracing::debug_span!("convert", strategy = %directive.strategy()).entered();

        if !value.is_compound() {
            return Err(ConversionError::unsupported_value(
                "",
                format!(
                    "expected a map, list or resource to convert, found {}",
                    value.kind()
                ),
            ));
        }

        let mut walk = Walk {
            config: &self.config,
            metadata: ConversionMetadata::new(),
        };

        let value = if directive.is_enabled() {
            walk.convert_value(value, directive, "", 0)?
        } else {
            tracing::debug!("root directive disabled, nothing to convert");
            Value::Null
        };

        walk.metadata.finish(start_time.elapsed());
        tracing::debug!(
            emitted = walk.metadata.fields_emitted,
            skipped = walk.metadata.fields_skipped,
            redacted = walk.metadata.fields_redacted,
            "conversion complete"
        );

        Ok(Projection {
            value,
            metadata: walk.metadata,
        })
    }
}

/// State of one root conversion
struct Walk<'e> {
    config: &'e ConversionConfig,
    metadata: ConversionMetadata,
}

impl<'e> Walk<'e> {
    /// Convert a value at any position. Scalars pass through normalized.
    fn convert_value(
        &mut self,
        value: &FieldValue,
        directive: &ConversionDirective,
        path: &str,
        depth: usize,
    ) -> ConversionResult<Value> {
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                return Err(ConversionError::depth_limit(path, limit));
            }
        }
        self.metadata.record_depth(depth);

        match value.as_compound() {
            Some(compound) => self.convert_compound(compound, directive, path, depth),
            None => Ok(value.to_scalar_json().unwrap_or(Value::Null)),
        }
    }

    fn convert_compound(
        &mut self,
        compound: Compound<'_>,
        directive: &ConversionDirective,
        path: &str,
        depth: usize,
    ) -> ConversionResult<Value> {
        if let Compound::Resource(resource) = compound {
            if !resource.is_materialized() {
                tracing::debug!(path, href = ?resource.href(), "materializing resource");
                resource.materialize()?;
                self.metadata.resources_materialized += 1;
            }
        }

        let strategy = directive.strategy();
        if strategy == StrategyName::Single {
            return self.convert_single(compound, directive, path, depth);
        }

        let is_collection = compound.is_collection();
        if strategy == StrategyName::List && !is_collection {
            tracing::trace!(path, "LIST strategy on a non-collection, using field gating");
        }

        let mut output = Map::new();

        for name in compound.field_names() {
            let collection_items = is_collection && name == ITEMS_FIELD;
            let gate = FieldGate::resolve(directive, &name, collection_items);

            if let Some(exclusion) = pre_read_exclusion(self.config, strategy, &name, gate) {
                tracing::trace!(path, field = %name, ?exclusion, "field excluded");
                self.metadata.record_exclusion(exclusion);
                continue;
            }

            // A collection's items are iterated in place, never copied out.
            let field_value = if collection_items {
                None
            } else {
                Some(compound.read_field(&name))
            };
            let nested = field_value.as_deref().map_or(true, FieldValue::is_compound);

            if let Some(exclusion) = post_read_exclusion(strategy, gate, nested) {
                tracing::trace!(path, field = %name, ?exclusion, "field excluded");
                self.metadata.record_exclusion(exclusion);
                continue;
            }

            let field_directive = directive.field(&name);
            let output_name = if collection_items {
                directive
                    .elements()
                    .map_or(DEFAULT_ELEMENTS_NAME, ElementsDirective::output_name)
            } else {
                field_directive
                    .and_then(ConversionDirective::output_name)
                    .unwrap_or(&name)
            }
            .to_string();

            // Output keys are redacted too. Under LIST the elements name is
            // never written, so only keyed output is checked.
            let keyed = !(collection_items && strategy == StrategyName::List);
            if keyed && self.config.is_redacted(&output_name) {
                tracing::debug!(path, field = %name, output = %output_name, "output name is redacted");
                self.metadata.record_exclusion(Exclusion::Redacted);
                continue;
            }

            let converted = match field_value {
                None => {
                    let default_elements;
                    let elements = match directive.elements() {
                        Some(elements) => elements,
                        None => {
                            default_elements = ElementsDirective::default();
                            &default_elements
                        }
                    };

                    let list = self.convert_elements(compound.elements(), elements, path, depth)?;
                    if strategy == StrategyName::List {
                        return Ok(Value::Array(list));
                    }
                    Value::Array(list)
                }
                Some(value) if nested => {
                    let default_directive;
                    let nested_directive = match field_directive {
                        Some(d) => d,
                        None => {
                            default_directive = ConversionDirective::default();
                            &default_directive
                        }
                    };
                    let field_path = join_path(&join_path(path, "fields"), &name);
                    self.convert_value(&value, nested_directive, &field_path, depth + 1)?
                }
                Some(value) => value.to_scalar_json().unwrap_or(Value::Null),
            };

            self.metadata.fields_emitted += 1;
            output.insert(output_name, converted);
        }

        if output.is_empty() {
            if let Some(href) = compound.href() {
                tracing::debug!(path, %href, "no fields emitted, falling back to href");
                output.insert(HREF_FIELD.to_string(), Value::String(href));
            }
        }

        Ok(Value::Object(output))
    }

    /// Convert every element of a collection with the elements' `each` directive
    fn convert_elements(
        &mut self,
        source: &[FieldValue],
        elements: &ElementsDirective,
        path: &str,
        depth: usize,
    ) -> ConversionResult<Vec<Value>> {
        let each = elements.each_directive();
        let each_path = join_path(&join_path(path, "elements"), "each");

        let mut list = Vec::with_capacity(source.len());
        for (i, element) in source.iter().enumerate() {
            let converted = if each.is_enabled() {
                let element_path = format!("{}[{}]", each_path, i);
                self.convert_value(element, each, &element_path, depth + 1)?
            } else {
                Value::Null
            };

            self.metadata.elements_converted += 1;
            if converted.is_null() && self.config.skip_null_elements {
                continue;
            }
            list.push(converted);
        }

        Ok(list)
    }

    /// SINGLE: the value collapses to one field, or to its href
    fn convert_single(
        &mut self,
        compound: Compound<'_>,
        directive: &ConversionDirective,
        path: &str,
        depth: usize,
    ) -> ConversionResult<Value> {
        if let Some(field) = directive.single_field() {
            if self.config.is_redacted(field) {
                tracing::debug!(path, field, "single field is redacted, ignoring");
                self.metadata.fields_redacted += 1;
            } else if compound.has_field(field) {
                let value = compound.read_field(field);
                self.metadata.fields_emitted += 1;
                return match value.to_scalar_json() {
                    Some(scalar) => Ok(scalar),
                    None => {
                        // A compound single field is emitted whole, minus redactions.
                        let whole = ConversionDirective::with_strategy(StrategyName::All);
                        let field_path = join_path(&join_path(path, "fields"), field);
                        self.convert_value(&value, &whole, &field_path, depth + 1)
                    }
                };
            }
        }

        match compound.href() {
            Some(href) => Ok(Value::String(href)),
            None => {
                tracing::debug!(
                    path,
                    single_field = ?directive.single_field(),
                    "SINGLE found neither the field nor an href"
                );
                Ok(Value::Null)
            }
        }
    }
}

/// Convert `value` with a default-configured engine
pub fn convert(value: &FieldValue, directive: &ConversionDirective) -> ConversionResult<Value> {
    ConversionEngine::default().convert(value, directive)
}

/// Convert `value` with a custom configuration
pub fn convert_with_config(
    value: &FieldValue,
    directive: &ConversionDirective,
    config: &ConversionConfig,
) -> ConversionResult<Value> {
    let engine = ConversionEngine::try_new(config.clone())?;
    engine.convert(value, directive)
}
