//! Command-line interface module

use clap::Parser;
use std::path::PathBuf;

use crate::conversion::{ConversionConfig, ConversionMetadata, ResourceConverter};
use crate::directive::{ConversionDirective, DirectiveBuilder, StrategyName};
use crate::error::{ConversionError, ConversionResult};
use crate::parser::{load_directive, JsonSource};
use crate::value::FieldValue;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "resconv")]
#[command(about = "Project JSON resource documents through a conversion directive")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Input JSON (inline document or file path)
    #[arg()]
    pub input: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read JSON from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Directive file (.json, .yaml or .yml)
    #[arg(short, long)]
    pub directive: Option<PathBuf>,

    /// Override the root strategy: defined, single, scalars, list or all
    #[arg(long)]
    pub strategy: Option<String>,

    /// Additional field names to redact everywhere
    #[arg(long = "redact", value_name = "FIELD")]
    pub redact: Vec<String>,

    /// Maximum nesting depth (default: 256)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Treat objects that carry an `href` string as resources
    #[arg(long)]
    pub hrefs: bool,

    /// Disable pretty-printing
    #[arg(long)]
    pub plain: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub converter: ResourceConverter,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let directive = Self::create_directive(&args)?;
        let converter =
            ResourceConverter::new(directive).with_config(Self::create_conversion_config(&args))?;

        Ok(Self { args, converter })
    }

    fn create_directive(args: &Args) -> ConversionResult<ConversionDirective> {
        let directive = match &args.directive {
            Some(path) => load_directive(path)?,
            None => ConversionDirective::default(),
        };

        match &args.strategy {
            Some(name) => DirectiveBuilder::from_directive(&directive)
                .strategy(StrategyName::from_name(name)?)
                .build(),
            None => Ok(directive),
        }
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> ConversionConfig {
        let mut config = ConversionConfig::default();
        if let Some(depth) = args.max_depth {
            config = config.with_max_depth(Some(depth));
        }
        for field in &args.redact {
            config = config.with_redacted_field(field.clone());
        }
        config
    }

    /// Resolve where the input JSON comes from
    pub fn source(&self) -> ConversionResult<JsonSource> {
        if self.args.stdin {
            return Ok(JsonSource::Stdin);
        }

        let input = self.args.input.as_ref().ok_or_else(|| {
            ConversionError::configuration("No input provided. Use --stdin or provide an input")
        })?;

        let trimmed = input.trim();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return Ok(JsonSource::String(input.clone()));
        }

        let path = PathBuf::from(input);
        if path.is_file() {
            Ok(JsonSource::File(path))
        } else {
            Err(ConversionError::parse(
                "Input path does not exist".to_string(),
                Some(path),
            ))
        }
    }

    /// Parse the input and convert it
    pub fn run(&self) -> ConversionResult<(String, ConversionMetadata)> {
        let source = self.source()?;
        tracing::info!(source = %source.description(), "reading input");
        let json = source.parse()?;

        let value = if self.args.hrefs {
            FieldValue::from_json_resources(json)
        } else {
            FieldValue::from_json(json)
        };

        let projection = self.converter.apply_with_metadata(&value)?;

        let rendered = if self.args.plain {
            serde_json::to_string(&projection.value)
        } else {
            serde_json::to_string_pretty(&projection.value)
        }
        .map_err(anyhow::Error::from)?;

        Ok((rendered, projection.metadata))
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    eprintln!("✗ {}", error.user_message());

    match error {
        ConversionError::InvalidDirective { .. } => {
            eprintln!("\nTip: strategies are {}", StrategyName::ALL_NAMES.join(", "));
        }
        ConversionError::DepthLimitExceeded { .. } => {
            eprintln!("\nTip: Use --max-depth to allow deeper documents");
        }
        _ => {}
    }

    eprintln!("\nTry 'resconv --help' for usage information.");
}
