#![allow(non_snake_case)]

use super::*;
use contractbridge_core::Classification;

const FULL: &str = r#"
[producer]
module = "orders"
catalog = "orders.json"
title = "Orders"
version = "1.2.0"
output = "contracts/orders.yaml"
conflict_policy = "reject"

[[producer.patterns]]
pattern = "Orders.Events.**"
classification = "event"

[[producer.patterns]]
pattern = "Orders.ICommand"
classification = "command"

[consumer]
documents = ["contracts/orders.yaml"]
references = ["refs/models.json"]
output_dir = "src/generated"
language = "kotlin"
class_style = "record"
generate_data_annotations = false

[consumer.type_mappings]
date_time = "java.time.Instant"
"#;

fn producer() -> ProducerConfig {
    ProducerConfig {
        catalog: Some(PathBuf::from("orders.json")),
        title: "Orders".to_string(),
        version: "1.0.0".to_string(),
        patterns: vec![DiscoveryPattern::event("Orders.Events.**")],
        ..ProducerConfig::default()
    }
}

// Config parsing tests

#[test]
fn Config___from_str___parses_both_sections() {
    let config = Config::from_str(FULL).unwrap();

    let producer = config.producer.unwrap();
    assert_eq!(producer.module.as_deref(), Some("orders"));
    assert_eq!(producer.conflict_policy, ConflictPolicy::Reject);
    assert_eq!(producer.patterns.len(), 2);
    assert_eq!(producer.patterns[1].classification, Classification::Command);
    assert_eq!(producer.document_format(), DocumentFormat::Yaml);

    let consumer = config.consumer.unwrap();
    assert_eq!(consumer.language, Language::Kotlin);
    assert_eq!(consumer.class_style, ClassStyle::Record);
    assert!(!consumer.generate_data_annotations);
    assert!(consumer.generate_nullable_reference_types);
    assert_eq!(consumer.type_mappings.date_time.as_deref(), Some("java.time.Instant"));
    assert_eq!(consumer.output_dir, PathBuf::from("src/generated"));
}

#[test]
fn Config___from_str___consumer_defaults() {
    let config = Config::from_str("[consumer]\ndocuments = [\"a.json\"]\n").unwrap();

    let consumer = config.consumer.unwrap();
    assert_eq!(consumer.output_dir, PathBuf::from("generated"));
    assert_eq!(consumer.language, Language::CSharp);
    assert_eq!(consumer.class_style, ClassStyle::Class);
    assert!(consumer.generate_data_annotations);
    assert!(config.producer.is_none());
}

#[test]
fn Config___from_str___unknown_key___error() {
    assert!(Config::from_str("[consumer]\nlanguge = \"kotlin\"\n").is_err());
}

#[test]
fn Config___starter_template___parses_and_validates() {
    let content = include_str!("../../templates/contracts.toml")
        .replace("{{title}}", "Orders")
        .replace("{{name}}", "orders")
        .replace("{{namespace}}", "Orders");

    let config = Config::from_str(&content).unwrap();

    config.validate().unwrap();
}

// Validation tests

#[test]
fn Config___validate___rejects_empty_config() {
    let err = Config::default().validate().unwrap_err();

    assert!(err.to_string().contains("[producer] or [consumer]"));
}

#[test]
fn ProducerConfig___validate___accepts_valid() {
    assert!(producer().validate().is_ok());
}

#[test]
fn ProducerConfig___validate___rejects_missing_catalog() {
    let config = ProducerConfig {
        catalog: None,
        ..producer()
    };

    assert!(config.validate().unwrap_err().to_string().contains("catalog"));
}

#[test]
fn ProducerConfig___validate___rejects_blank_title() {
    let config = ProducerConfig {
        title: "  ".to_string(),
        ..producer()
    };

    assert!(config.validate().unwrap_err().to_string().contains("title"));
}

#[test]
fn ProducerConfig___validate___rejects_no_patterns() {
    let config = ProducerConfig {
        patterns: Vec::new(),
        ..producer()
    };

    assert!(config.validate().is_err());
}

#[test]
fn ProducerConfig___validate___names_invalid_pattern() {
    let config = ProducerConfig {
        patterns: vec![
            DiscoveryPattern::event("Orders.*"),
            DiscoveryPattern::event("Orders..Bad"),
        ],
        ..producer()
    };

    let err = config.validate().unwrap_err();

    assert!(format!("{err:#}").contains("patterns[1]"));
}

#[test]
fn ProducerConfig___output_path___follows_format() {
    let config = ProducerConfig {
        format: Some(DocumentFormat::Yaml),
        ..producer()
    };

    assert_eq!(config.output_path(), PathBuf::from("asyncapi.yaml"));
    assert_eq!(producer().output_path(), PathBuf::from("asyncapi.json"));
}

#[test]
fn ConsumerConfig___validate___rejects_no_documents() {
    assert!(ConsumerConfig::default().validate().is_err());
}

#[test]
fn ConsumerConfig___generator_options___carries_style() {
    let config = ConsumerConfig {
        class_style: ClassStyle::Record,
        generate_nullable_reference_types: false,
        ..ConsumerConfig::default()
    };

    let options = config.generator_options();

    assert_eq!(options.class_style, ClassStyle::Record);
    assert!(!options.generate_nullable_reference_types);
    assert!(options.generate_data_annotations);
}
