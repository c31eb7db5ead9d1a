//! Declarative resource conversion
//!
//! Projects an in-memory graph of resources, maps and collections into an
//! ordered JSON value, shaped by a tree of [`ConversionDirective`]s that can
//! rename, suppress and recurse into fields. `password` fields are never
//! emitted.
//!
//! ```
//! use resconv::{convert, ConversionDirective, FieldValue};
//! use serde_json::json;
//!
//! let value = FieldValue::from_json(json!({"name": "Acme", "password": "x"}));
//! let output = convert(&value, &ConversionDirective::default()).unwrap();
//! assert_eq!(output, json!({"name": "Acme"}));
//! ```

pub mod cli;
pub mod conversion;
pub mod directive;
pub mod error;
pub mod parser;
pub mod value;

// Re-export commonly used types
pub use conversion::{
    convert, convert_with_config, ConversionConfig, ConversionEngine, ConversionMetadata,
    Projection, ResourceConverter,
};
pub use directive::{
    ConversionDirective, DirectiveBuilder, ElementsBuilder, ElementsDirective, StrategyName,
};
pub use error::{ConversionError, ConversionResult, MaterializationError, ParseError};
pub use parser::{load_directive, parse_directive_str, DirectiveFormat, JsonSource};
pub use value::{
    CollectionResource, FieldMap, FieldValue, JsonResource, LazyResource, Resource,
};
