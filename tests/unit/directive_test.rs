//! Unit tests for directive documents
//!
//! Covers loading directive trees from YAML and JSON, validation errors and
//! the shapes built by the convenience constructors.

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use resconv::{
    load_directive, parse_directive_str, ConversionDirective, ConversionError, DirectiveBuilder,
    DirectiveFormat, ElementsDirective, StrategyName,
};
use std::io::Write;
use tempfile::Builder;

const ACCOUNT_DIRECTIVE: &str = r#"
strategy: scalars
fields:
  email:
    outputName: mail
  status:
    enabled: false
  directory:
    strategy: single
    singleField: name
  customData:
    strategy: all
  groups:
    strategy: defined
    elements:
      outputName: memberships
      each:
        strategy: defined
        fields:
          name: {}
          description:
            name: summary
"#;

#[test]
fn test_account_directive_from_yaml() {
    let directive = parse_directive_str(ACCOUNT_DIRECTIVE, DirectiveFormat::Yaml).unwrap();

    assert_eq!(directive.strategy(), StrategyName::Scalars);
    assert_eq!(directive.fields().len(), 5);
    assert_eq!(directive.field("email").unwrap().output_name(), Some("mail"));
    assert!(!directive.field("status").unwrap().is_enabled());
    assert_eq!(
        directive.field("directory").unwrap().single_field(),
        Some("name")
    );

    let elements = directive.field("groups").unwrap().elements().unwrap();
    assert_eq!(elements.output_name(), "memberships");
    assert!(elements.is_enabled());

    let each = elements.each_directive();
    assert_eq!(each.strategy(), StrategyName::Defined);
    assert_eq!(each.field("description").unwrap().output_name(), Some("summary"));
}

#[test]
fn test_json_and_yaml_documents_agree() {
    let yaml = parse_directive_str(ACCOUNT_DIRECTIVE, DirectiveFormat::Yaml).unwrap();
    let json = serde_json::to_string(&yaml).unwrap();
    let reparsed = parse_directive_str(&json, DirectiveFormat::Json).unwrap();

    assert_eq!(yaml, reparsed);
}

#[test]
fn test_strategy_names_are_case_insensitive_in_documents() {
    for name in ["list", "LIST", "List", " list "] {
        let document = format!("strategy: \"{}\"", name);
        let directive = parse_directive_str(&document, DirectiveFormat::Yaml).unwrap();
        assert_eq!(directive.strategy(), StrategyName::List);
    }
}

#[test]
fn test_empty_document_fields_default() {
    let directive = parse_directive_str("{}", DirectiveFormat::Json).unwrap();
    assert_eq!(directive, ConversionDirective::default());
}

#[test]
fn test_nested_validation_error_is_parse_error() {
    let document = r#"{"fields": {"groups": {"elements": {"outputName": ""}}}}"#;
    let err = parse_directive_str(document, DirectiveFormat::Json).unwrap_err();

    assert_matches!(err, ConversionError::Parse(_));
    assert!(err.to_string().contains("outputName cannot be empty"), "{}", err);
}

#[test]
fn test_unknown_key_rejected() {
    let err = parse_directive_str("strategy: all\nfeilds: {}\n", DirectiveFormat::Yaml).unwrap_err();
    assert!(err.to_string().contains("feilds"), "{}", err);
}

#[test]
fn test_load_yaml_file() {
    let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(ACCOUNT_DIRECTIVE.as_bytes()).unwrap();

    let directive = load_directive(file.path()).unwrap();
    assert!(directive.has_field("customData"));
    assert_eq!(
        directive.field("customData").unwrap().strategy(),
        StrategyName::All
    );
}

#[test]
fn test_builder_matches_document() {
    let built = DirectiveBuilder::new()
        .with_field("email", DirectiveBuilder::new().output_name("mail").build().unwrap())
        .with_field("status", ConversionDirective::disabled())
        .with_field("directory", ConversionDirective::single("name").unwrap())
        .build()
        .unwrap();

    let parsed = parse_directive_str(
        "fields:\n  email: {outputName: mail}\n  status: {enabled: false}\n  directory: {strategy: single, field: name}\n",
        DirectiveFormat::Yaml,
    )
    .unwrap();

    assert_eq!(built, parsed);
}

#[test]
fn test_builder_reports_nested_path() {
    let blank_single = DirectiveBuilder::new().single_field("  ");
    let result = blank_single.build();
    assert_matches!(result, Err(ConversionError::InvalidDirective { .. }));

    let elements = ElementsDirective::builder().output_name("").build();
    assert_matches!(
        elements,
        Err(ConversionError::InvalidDirective { ref path, .. }) if path == "elements"
    );
}

#[test]
fn test_list_constructor_shape() {
    let directive = ConversionDirective::list(ConversionDirective::single("href").unwrap());

    assert_eq!(directive.strategy(), StrategyName::List);
    let elements = directive.elements().unwrap();
    assert_eq!(elements.output_name(), "items");
    assert_eq!(elements.each_directive().single_field(), Some("href"));
}

#[test]
fn test_shared_subtrees_compare_equal() {
    let original = parse_directive_str(ACCOUNT_DIRECTIVE, DirectiveFormat::Yaml).unwrap();
    let copy = original.clone();
    let extended = DirectiveBuilder::from_directive(&original)
        .strategy(StrategyName::All)
        .build()
        .unwrap();

    assert_eq!(original, copy);
    assert_ne!(original, extended);
    assert_eq!(original.fields(), extended.fields());
}
