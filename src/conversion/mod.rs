//! Resource conversion module
//!
//! This module contains the conversion engine, its configuration, the field
//! enablement rules, and statistics.

pub mod config;
pub mod converter;
pub mod engine;
pub mod policy;
pub mod stats;

pub use config::{ConversionConfig, PASSWORD_FIELD};
pub use converter::ResourceConverter;
pub use engine::{convert, convert_with_config, ConversionEngine, Projection};
pub use stats::ConversionMetadata;

/// Result type for conversion operations
pub use crate::error::ConversionResult;
