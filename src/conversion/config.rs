//! Engine options for resource conversion

use serde::{Deserialize, Serialize};

/// Field that is never emitted, whatever the directive says
pub const PASSWORD_FIELD: &str = "password";

/// Default recursion limit
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Conversion engine options
///
/// These are separate from directives: a directive says what the output looks
/// like, the config bounds how the engine walks the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConversionConfig {
    /// Maximum nesting depth; `None` disables the check
    pub max_depth: Option<usize>,
    /// Field names suppressed in addition to `password`
    pub redacted_fields: Vec<String>,
    /// Drop collection elements whose conversion yields nothing
    pub skip_null_elements: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            redacted_fields: Vec::new(),
            skip_null_elements: true,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Suppress another field name everywhere in the graph
    pub fn with_redacted_field(mut self, name: impl Into<String>) -> Self {
        self.redacted_fields.push(name.into());
        self
    }

    pub fn with_skip_null_elements(mut self, skip: bool) -> Self {
        self.skip_null_elements = skip;
        self
    }

    /// Whether `name` is hard-redacted
    pub fn is_redacted(&self, name: &str) -> bool {
        name == PASSWORD_FIELD || self.redacted_fields.iter().any(|f| f == name)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err("Max depth must be at least 1".to_string());
            }
        }

        if self.redacted_fields.iter().any(|f| f.trim().is_empty()) {
            return Err("Redacted field names cannot be empty".to_string());
        }

        Ok(())
    }
}
