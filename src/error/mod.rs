//! Error types for resource conversion and directive loading

use std::fmt;
use std::path::PathBuf;

/// Failure reported by a resource's lazy-load hook.
///
/// The collaborator's error is carried unchanged; the engine only decides
/// when the hook runs.
#[derive(Debug, thiserror::Error)]
#[error("failed to materialize resource{}: {source}", href_suffix(.href))]
pub struct MaterializationError {
    pub href: Option<String>,
    #[source]
    pub source: anyhow::Error,
}

fn href_suffix(href: &Option<String>) -> String {
    match href {
        Some(href) => format!(" '{}'", href),
        None => String::new(),
    }
}

impl MaterializationError {
    pub fn new(source: anyhow::Error) -> Self {
        Self { href: None, source }
    }

    pub fn for_href(href: impl Into<String>, source: anyhow::Error) -> Self {
        Self {
            href: Some(href.into()),
            source,
        }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid directive at '{path}': {message}")]
    InvalidDirective { path: String, message: String },

    #[error("Unsupported value at '{path}': {message}")]
    UnsupportedValue { path: String, message: String },

    #[error(transparent)]
    Materialization(#[from] MaterializationError),

    #[error("Maximum conversion depth {limit} exceeded at '{path}'")]
    DepthLimitExceeded { path: String, limit: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConversionError {
    pub fn invalid_directive(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDirective {
            path: display_path(path.into()),
            message: message.into(),
        }
    }

    pub fn unsupported_value(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            path: display_path(path.into()),
            message: message.into(),
        }
    }

    pub fn depth_limit(path: impl Into<String>, limit: usize) -> Self {
        Self::DepthLimitExceeded {
            path: display_path(path.into()),
            limit,
        }
    }

    pub fn parse(message: String, source_path: Option<PathBuf>) -> Self {
        Self::Parse(ParseError::new(message, source_path))
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDirective { path, message } => {
                format!("Conversion directive is invalid at {}: {}", path, message)
            }
            Self::UnsupportedValue { path, message } => {
                format!("Cannot convert value at {}: {}", path, message)
            }
            Self::Materialization(err) => {
                format!("Resource could not be loaded: {}", err)
            }
            Self::DepthLimitExceeded { path, limit } => format!(
                "Object graph nests deeper than {} levels at {} (possible cycle)",
                limit, path
            ),
            Self::Parse(err) => match &err.source_path {
                Some(path) => format!("Failed to read {}: {}", path.display(), err.message),
                None => format!("Parse error: {}", err.message),
            },
            Self::Configuration { .. } => self.to_string(),
            Self::Other(err) => format!("Unexpected error: {}", err),
        }
    }
}

/// The root of a conversion is reported as `<root>` rather than an empty string.
fn display_path(path: String) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path
    }
}

/// Input and directive parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub source_path: Option<PathBuf>,
}

impl ParseError {
    pub fn new(message: String, source_path: Option<PathBuf>) -> Self {
        Self {
            message,
            source_path,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(path) = &self.source_path {
            write!(f, " ({})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
