//! Input and directive loading
//!
//! Reads the JSON documents handed to the CLI and the directive trees that
//! configure a conversion. Directives may be written as JSON or YAML.

use crate::directive::ConversionDirective;
use crate::error::{ConversionError, ConversionResult, ParseError, ParseResult};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Source of a JSON document
#[derive(Debug, Clone)]
pub enum JsonSource {
    String(String),
    File(PathBuf),
    Stdin,
}

impl JsonSource {
    /// Parse JSON from this source
    pub fn parse(&self) -> ParseResult<serde_json::Value> {
        match self {
            JsonSource::String(content) => parse_json_str(content, None),
            JsonSource::File(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    ParseError::new(format!("Failed to read file: {}", e), Some(path.clone()))
                })?;
                parse_json_str(&content, Some(path))
            }
            JsonSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| ParseError::new(format!("Failed to read stdin: {}", e), None))?;
                parse_json_str(&buffer, None)
            }
        }
    }

    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            JsonSource::String(_) => "string input".to_string(),
            JsonSource::File(path) => format!("file: {}", path.display()),
            JsonSource::Stdin => "standard input".to_string(),
        }
    }
}

/// Parse a JSON document, reporting line and column on failure
fn parse_json_str(content: &str, path: Option<&PathBuf>) -> ParseResult<serde_json::Value> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new("Empty JSON input".to_string(), path.cloned()));
    }

    serde_json::from_str(trimmed).map_err(|e| {
        ParseError::new(
            format!(
                "Invalid JSON at line {}, column {}: {}",
                e.line(),
                e.column(),
                e
            ),
            path.cloned(),
        )
    })
}

/// Serialization format of a directive document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveFormat {
    Json,
    Yaml,
}

impl DirectiveFormat {
    /// Pick the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DirectiveFormat::Json,
            _ => DirectiveFormat::Yaml,
        }
    }
}

/// Parse a directive tree from text
pub fn parse_directive_str(
    content: &str,
    format: DirectiveFormat,
) -> ConversionResult<ConversionDirective> {
    parse_directive(content, format, None)
}

/// Load a directive tree from a `.json`, `.yaml` or `.yml` file
pub fn load_directive(path: impl AsRef<Path>) -> ConversionResult<ConversionDirective> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConversionError::parse(
            format!("Failed to read directive: {}", e),
            Some(path.to_path_buf()),
        )
    })?;

    let directive = parse_directive(&content, DirectiveFormat::from_path(path), Some(path))?;
    tracing::debug!(path = %path.display(), strategy = %directive.strategy(), "loaded directive");
    Ok(directive)
}

fn parse_directive(
    content: &str,
    format: DirectiveFormat,
    path: Option<&Path>,
) -> ConversionResult<ConversionDirective> {
    let source_path = path.map(Path::to_path_buf);
    match format {
        DirectiveFormat::Json => serde_json::from_str(content).map_err(|e| {
            ConversionError::parse(format!("Invalid directive JSON: {}", e), source_path)
        }),
        DirectiveFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
            ConversionError::parse(format!("Invalid directive YAML: {}", e), source_path)
        }),
    }
}
