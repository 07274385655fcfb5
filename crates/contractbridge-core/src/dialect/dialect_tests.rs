#![allow(non_snake_case)]

use super::*;
use crate::document::MultiFormatSchema;
use crate::schema::{PrimitiveType, Property, SchemaNode};
use std::path::PathBuf;
use test_case::test_case;

fn document() -> Document {
    let mut doc = Document::new("Orders", "2.1.0");
    doc.components.schemas.insert(
        "Order".to_string(),
        MultiFormatSchema::new(
            SchemaNode::object(
                vec![
                    Property::new("id", SchemaNode::formatted(PrimitiveType::String, "uuid")),
                    Property::new(
                        "total",
                        SchemaNode::formatted(PrimitiveType::Number, "decimal").nullable(),
                    ),
                ],
                vec!["id".to_string()],
            )
            .with_origin("Shop.Models", "Shop.Models.Order"),
        ),
    );
    doc
}

#[test_case("spec.json", Some(DocumentFormat::Json) ; "json")]
#[test_case("spec.yaml", Some(DocumentFormat::Yaml) ; "yaml")]
#[test_case("spec.YML", Some(DocumentFormat::Yaml) ; "upper yml")]
#[test_case("spec.cbp", None ; "bundle")]
#[test_case("spec", None ; "no extension")]
fn DocumentFormat___from_path___infers_from_extension(
    path: &str,
    expected: Option<DocumentFormat>,
) {
    assert_eq!(DocumentFormat::from_path(&PathBuf::from(path)), expected);
}

#[test]
fn DocumentFormat___from_str___rejects_unknown() {
    assert!("xml".parse::<DocumentFormat>().is_err());
    assert_eq!("YAML".parse::<DocumentFormat>().unwrap(), DocumentFormat::Yaml);
}

#[test_case(DocumentFormat::Json ; "json")]
#[test_case(DocumentFormat::Yaml ; "yaml")]
fn DocumentFormat___parse___reads_what_serialize_writes(format: DocumentFormat) {
    let doc = document();

    let text = format.serialize(&doc).unwrap();
    let back = format.parse(&text).unwrap();

    assert_eq!(back, doc);
    assert!(text.ends_with('\n'));
}

#[test]
fn DocumentFormat___serialize___is_deterministic() {
    let first = DocumentFormat::Json.serialize(&document()).unwrap();
    let second = DocumentFormat::Json.serialize(&document()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn DocumentFormat___serialize___yaml_uses_wire_keys() {
    let text = DocumentFormat::Yaml.serialize(&document()).unwrap();

    assert!(text.contains("asyncapi: 3.0.0"));
    assert!(text.contains("defaultContentType: application/json"));
    assert!(text.contains("x-origin-namespace: Shop.Models"));
}

#[test]
fn write_document___then_read_document___preserves_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("orders.yaml");

    write_document(&document(), &path, DocumentFormat::Yaml).unwrap();
    let back = read_document(&path).unwrap();

    assert_eq!(back, document());
}

#[test]
fn read_document___unknown_extension___fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.txt");
    std::fs::write(&path, "{}").unwrap();

    let err = read_document(&path).unwrap_err();

    assert!(matches!(err, ContractError::InvalidDocument(_)));
}
