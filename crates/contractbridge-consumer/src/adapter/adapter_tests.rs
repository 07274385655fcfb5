#![allow(non_snake_case)]

use super::*;
use contractbridge_codegen::{PropertySchema, SchemaType, TypeSchemaKind};
use contractbridge_core::{PrimitiveType, Property};
use serde_json::json;
use test_case::test_case;

fn string_with(format: &str) -> SchemaNode {
    SchemaNode::formatted(PrimitiveType::String, format)
}

fn single_property(node: SchemaNode) -> PropertySchema {
    let schema = SchemaNode::object(vec![Property::new("value", node)], vec!["value".to_string()]);
    match to_codegen_schema("Holder", &schema).unwrap().kind {
        TypeSchemaKind::Object(mut properties) => properties.remove(0),
        other => panic!("expected object, got {other:?}"),
    }
}

#[test]
fn to_codegen_schema___object___keeps_order_required_and_docs() {
    let node = SchemaNode::object(
        vec![
            Property::new("orderId", string_with("uuid")),
            Property::new(
                "note",
                SchemaNode::primitive(PrimitiveType::String)
                    .nullable()
                    .with_description("Free text"),
            ),
            Property::new("lines", SchemaNode::array(SchemaNode::reference("OrderLine"))),
        ],
        vec!["orderId".to_string(), "lines".to_string()],
    )
    .with_description("An order")
    .with_origin("Shop.Models", "Shop.Models.Order");

    let schema = to_codegen_schema("Order", &node).unwrap();

    assert_eq!(schema.name, "Order");
    assert_eq!(schema.description.as_deref(), Some("An order"));
    let TypeSchemaKind::Object(properties) = schema.kind else {
        panic!("expected object");
    };
    let names: Vec<_> = properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["orderId", "note", "lines"]);
    assert!(properties[0].required);
    assert_eq!(properties[0].ty, SchemaType::String(Some("uuid".to_string())));
    assert!(!properties[1].required);
    assert!(properties[1].nullable);
    assert_eq!(properties[1].description.as_deref(), Some("Free text"));
    assert_eq!(
        properties[2].ty,
        SchemaType::Array(Box::new(SchemaType::Ref("OrderLine".to_string())))
    );
}

#[test_case(string_with("date-time"), SchemaType::String(Some("date-time".into())) ; "date time")]
#[test_case(string_with("date"), SchemaType::String(Some("date".into())) ; "date")]
#[test_case(string_with("time"), SchemaType::String(Some("time".into())) ; "time")]
#[test_case(string_with("duration"), SchemaType::String(Some("duration".into())) ; "duration")]
#[test_case(SchemaNode::formatted(PrimitiveType::Integer, "int64"), SchemaType::Integer(Some("int64".into())) ; "int64")]
#[test_case(SchemaNode::formatted(PrimitiveType::Number, "decimal"), SchemaType::Number(Some("decimal".into())) ; "decimal")]
#[test_case(SchemaNode::primitive(PrimitiveType::Boolean), SchemaType::Boolean ; "boolean")]
#[test_case(SchemaNode::any(), SchemaType::Any ; "any")]
#[test_case(SchemaNode::map(SchemaNode::primitive(PrimitiveType::Integer)), SchemaType::Map(Box::new(SchemaType::Integer(None))) ; "map")]
#[test_case(SchemaNode::map(SchemaNode::any()), SchemaType::Map(Box::new(SchemaType::Any)) ; "map of any")]
#[test_case(SchemaNode::array(string_with("uuid")), SchemaType::Array(Box::new(SchemaType::String(Some("uuid".into())))) ; "array")]
#[test_case(SchemaNode::reference("Customer"), SchemaType::Ref("Customer".into()) ; "reference")]
fn to_codegen_schema___property_types(node: SchemaNode, expected: SchemaType) {
    assert_eq!(single_property(node).ty, expected);
}

#[test_case(SchemaNode::reference("Customer").nullable() ; "nullable reference")]
#[test_case(SchemaNode::primitive(PrimitiveType::Integer).nullable() ; "nullable primitive")]
#[test_case(SchemaNode::array(SchemaNode::any()).nullable() ; "nullable array")]
fn to_codegen_schema___nullable_forms___marked_nullable(node: SchemaNode) {
    let property = single_property(node);

    assert!(property.nullable);
    assert!(property.is_optional());
}

#[test]
fn to_codegen_schema___nullable_any_from_document___stays_nullable() {
    let reread = SchemaNode::from_value(&SchemaNode::any().nullable().to_value()).unwrap();

    let property = single_property(reread);

    assert_eq!(property.ty, SchemaType::Any);
    assert!(property.nullable);
}

#[test]
fn to_codegen_schema___nullable_reference___keeps_target() {
    let property = single_property(SchemaNode::reference("Customer").nullable());

    assert_eq!(property.ty, SchemaType::Ref("Customer".to_string()));
}

#[test]
fn to_codegen_schema___enum___enum_kind() {
    let node = SchemaNode::enumeration(vec!["pending".to_string(), "shipped".to_string()]);

    let schema = to_codegen_schema("OrderStatus", &node).unwrap();

    assert_eq!(
        schema.kind,
        TypeSchemaKind::Enum(vec!["pending".to_string(), "shipped".to_string()])
    );
}

#[test]
fn to_codegen_schema___empty_object___object_without_properties() {
    let schema = to_codegen_schema("Marker", &SchemaNode::object(Vec::new(), Vec::new())).unwrap();

    assert_eq!(schema.kind, TypeSchemaKind::Object(Vec::new()));
}

#[test]
fn to_codegen_schema___root_array___alias() {
    let node = SchemaNode::array(SchemaNode::reference("OrderLine"));

    let schema = to_codegen_schema("OrderLines", &node).unwrap();

    assert_eq!(
        schema.kind,
        TypeSchemaKind::Alias(SchemaType::Array(Box::new(SchemaType::Ref(
            "OrderLine".to_string()
        ))))
    );
}

#[test]
fn to_codegen_schema___malformed_keyword___generation_error_naming_schema() {
    let node = SchemaNode::object(Vec::new(), Vec::new()).with_extension("properties", json!(5));

    let err = to_codegen_schema("Broken", &node).unwrap_err();

    assert!(matches!(err, ContractError::Generation { ref name, .. } if name == "Broken"));
    assert!(err.to_string().contains("properties"));
}
