//! A directive bound to an engine, applied to one value at a time

use crate::conversion::config::ConversionConfig;
use crate::conversion::engine::{ConversionEngine, Projection};
use crate::conversion::ConversionResult;
use crate::directive::ConversionDirective;
use crate::value::FieldValue;
use serde_json::Value;
use std::sync::Arc;

/// Converts resources or maps into output shaped by a fixed directive
///
/// Cloning is cheap; clones share the directive tree.
#[derive(Debug, Clone)]
pub struct ResourceConverter {
    directive: Arc<ConversionDirective>,
    engine: ConversionEngine,
}

impl Default for ResourceConverter {
    /// Uses [`ConversionDirective::resource_default`]
    fn default() -> Self {
        Self::new(ConversionDirective::resource_default())
    }
}

impl ResourceConverter {
    pub fn new(directive: ConversionDirective) -> Self {
        Self::shared(Arc::new(directive))
    }

    /// Bind a directive tree that is already shared elsewhere
    pub fn shared(directive: Arc<ConversionDirective>) -> Self {
        Self {
            directive,
            engine: ConversionEngine::default(),
        }
    }

    pub fn with_config(mut self, config: ConversionConfig) -> ConversionResult<Self> {
        self.engine = ConversionEngine::try_new(config)?;
        Ok(self)
    }

    pub fn directive(&self) -> &ConversionDirective {
        &self.directive
    }

    pub fn apply(&self, value: &FieldValue) -> ConversionResult<Value> {
        self.engine.convert(value, &self.directive)
    }

    pub fn apply_with_metadata(&self, value: &FieldValue) -> ConversionResult<Projection> {
        self.engine.convert_with_metadata(value, &self.directive)
    }
}
