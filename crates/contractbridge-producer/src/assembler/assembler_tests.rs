#![allow(non_snake_case)]

use super::*;
use crate::discovery::discover;
use crate::pattern::DiscoveryPattern;
use contractbridge_core::{Action, CHANNEL_REF_PREFIX, Classification, SchemaKind};
use serde_json::json;
use test_case::test_case;

fn field(name: &str, ty: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, ty.parse::<TypeRef>().unwrap())
}

fn shop_catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new("Shop");
    for descriptor in [
        TypeDescriptor::new("Shop.Events", "OrderCreated", TypeKind::Class)
            .with_docs("Raised when an order is placed")
            .with_field(field("order", "Shop.Models.Order"))
            .with_field(FieldDescriptor {
                wire_name: Some("placedAt".to_string()),
                docs: Some("When the order was placed".to_string()),
                ..field("placed_at", "datetime")
            }),
        TypeDescriptor::new("Shop.Models", "Order", TypeKind::Class)
            .with_field(field("id", "uuid"))
            .with_field(field("customer", "Shop.Models.Customer?"))
            .with_field(field("lines", "Shop.Models.OrderLine[]"))
            .with_field(field("status", "Shop.Models.OrderStatus")),
        TypeDescriptor::new("Shop.Models", "Customer", TypeKind::Class)
            .with_field(field("name", "string")),
        TypeDescriptor::new("Shop.Models", "OrderLine", TypeKind::Struct)
            .with_field(field("sku", "string"))
            .with_field(field("quantity", "i32"))
            .with_field(field("order", "Shop.Models.Order?")),
        TypeDescriptor::new("Shop.Models", "OrderStatus", TypeKind::Enum)
            .with_variants(["Pending", "Shipped"]),
        TypeDescriptor::new("Shop.Commands", "CancelOrder", TypeKind::Class)
            .with_field(field("orderId", "uuid")),
    ] {
        catalog.insert(descriptor).unwrap();
    }
    catalog
}

fn assemble_shop() -> Assembly {
    let catalog = shop_catalog();
    let discovery = discover(
        &catalog,
        &[
            DiscoveryPattern::event("Shop.Events.**"),
            DiscoveryPattern::command("Shop.Commands.*"),
        ],
    )
    .unwrap();
    assemble(&catalog, "Shop", "1.0.0", &discovery.types).unwrap()
}

// ============================================================================
// Validation
// ============================================================================

#[test_case(None, Some("1.0.0"), Some(vec![]) ; "missing title")]
#[test_case(Some("  "), Some("1.0.0"), Some(vec![]) ; "blank title")]
#[test_case(Some("Shop"), Some(""), Some(vec![]) ; "blank version")]
#[test_case(Some("Shop"), Some("1.0.0"), None ; "absent type set")]
fn DocumentAssembler___assemble___rejects_invalid_input(
    title: Option<&str>,
    version: Option<&str>,
    types: Option<Vec<DiscoveredType>>,
) {
    let mut assembler = DocumentAssembler::new();
    if let Some(title) = title {
        assembler = assembler.title(title);
    }
    if let Some(version) = version {
        assembler = assembler.version(version);
    }
    if let Some(types) = types {
        assembler = assembler.types(types);
    }

    let err = assembler.assemble(&shop_catalog()).unwrap_err();

    assert!(err.is_configuration());
}

#[test]
fn DocumentAssembler___empty_type_set___yields_empty_document() {
    let assembly = assemble(&shop_catalog(), "Shop", "1.0.0", &[]).unwrap();

    assert!(assembly.document.is_empty());
    assert_eq!(assembly.document.info.title, "Shop");
    assert!(assembly.document.validate().is_ok());
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn assemble___one_triple_per_discovered_type_and_schema_per_closure_type() {
    let document = assemble_shop().document;

    assert_eq!(
        document.channels.keys().collect::<Vec<_>>(),
        vec!["Shop.Commands.CancelOrder", "Shop.Events.OrderCreated"]
    );
    assert_eq!(
        document.operations.keys().collect::<Vec<_>>(),
        vec!["CancelOrderOperation", "OrderCreatedOperation"]
    );
    assert_eq!(document.components.messages.len(), 2);
    assert_eq!(
        document.components.schemas.keys().collect::<Vec<_>>(),
        vec![
            "CancelOrder",
            "Customer",
            "Order",
            "OrderCreated",
            "OrderLine",
            "OrderStatus"
        ]
    );
    assert!(document.validate().is_ok());
}

#[test]
fn assemble___operation_action_follows_classification() {
    let document = assemble_shop().document;

    assert_eq!(
        document.operations["OrderCreatedOperation"].action,
        Action::Receive
    );
    assert_eq!(
        document.operations["CancelOrderOperation"].action,
        Action::Send
    );
    assert_eq!(Classification::Command.action(), Action::Send);
}

#[test]
fn assemble___channel_matches_wire_shape() {
    let document = assemble_shop().document;

    let value = serde_json::to_value(&document.channels["Shop.Events.OrderCreated"]).unwrap();

    assert_eq!(
        value,
        json!({
            "address": "urn:message:Shop.Events:OrderCreated",
            "messages": {"OrderCreated": {"$ref": "#/components/messages/OrderCreated"}}
        })
    );
    assert_eq!(
        document.operations["OrderCreatedOperation"]
            .channel
            .target(CHANNEL_REF_PREFIX)
            .as_deref(),
        Some("Shop.Events.OrderCreated")
    );
}

#[test]
fn assemble___schemas_carry_origin_extensions() {
    let document = assemble_shop().document;

    for (name, node) in document.schemas() {
        let namespace = node.origin_namespace().unwrap();
        let identity = node.origin_identity().unwrap();
        assert_eq!(identity, format!("{}.{}", namespace, name));
    }
}

#[test]
fn assemble___object_schema_properties() {
    let document = assemble_shop().document;

    let value = document.schema("Order").unwrap().to_value();

    assert_eq!(value["properties"]["id"], json!({"type": "string", "format": "uuid"}));
    assert_eq!(
        value["properties"]["customer"],
        json!({"oneOf": [{"type": "null"}, {"$ref": "#/components/schemas/Customer"}]})
    );
    assert_eq!(
        value["properties"]["lines"],
        json!({"type": "array", "items": {"$ref": "#/components/schemas/OrderLine"}})
    );
    assert_eq!(value["required"], json!(["id", "lines", "status"]));
}

#[test]
fn assemble___uses_wire_names_and_docs() {
    let document = assemble_shop().document;

    let node = document.schema("OrderCreated").unwrap();
    assert_eq!(node.description.as_deref(), Some("Raised when an order is placed"));
    let value = node.to_value();
    assert_eq!(
        value["properties"]["placedAt"],
        json!({"type": "string", "description": "When the order was placed", "format": "date-time"})
    );
}

#[test]
fn assemble___enum_becomes_enum_schema() {
    let document = assemble_shop().document;

    let node = document.schema("OrderStatus").unwrap();

    assert_eq!(
        node.kind,
        SchemaKind::Enum {
            values: vec!["Pending".to_string(), "Shipped".to_string()]
        }
    );
}

#[test]
fn assemble___unresolved_field_type___any_schema_and_warning() {
    let mut catalog = TypeCatalog::new("m");
    catalog
        .insert(
            TypeDescriptor::new("N", "Evt", TypeKind::Class).with_field(field("money", "Ext.Money")),
        )
        .unwrap();
    let discovery = discover(&catalog, &[DiscoveryPattern::event("N.*")]).unwrap();

    let assembly = assemble(&catalog, "T", "1", &discovery.types).unwrap();

    let value = assembly.document.schema("Evt").unwrap().to_value();
    assert_eq!(value["properties"]["money"], json!({}));
    assert_eq!(assembly.diagnostics.len(), 1);
}

#[test]
fn assemble___simple_name_collision___names_both_identities() {
    let mut catalog = TypeCatalog::new("m");
    for descriptor in [
        TypeDescriptor::new("Shop", "Created", TypeKind::Class)
            .with_field(field("address", "Billing.Address")),
        TypeDescriptor::new("Shop", "Address", TypeKind::Class),
        TypeDescriptor::new("Billing", "Address", TypeKind::Class),
        TypeDescriptor::new("Shop", "Moved", TypeKind::Class)
            .with_field(field("address", "Shop.Address")),
    ] {
        catalog.insert(descriptor).unwrap();
    }
    let discovery = discover(&catalog, &[DiscoveryPattern::event("Shop.*")]).unwrap();

    let err = assemble(&catalog, "T", "1", &discovery.types).unwrap_err();

    let msg = err.to_string();
    assert!(err.is_configuration());
    assert!(msg.contains("Billing.Address"));
    assert!(msg.contains("Shop.Address"));
}

#[test]
fn assemble___is_deterministic() {
    let first = serde_json::to_string(&assemble_shop().document).unwrap();
    let second = serde_json::to_string(&assemble_shop().document).unwrap();

    assert_eq!(first, second);
}

#[test_case(Primitive::I16, json!({"type": "integer", "format": "int32"}) ; "i16")]
#[test_case(Primitive::U64, json!({"type": "integer", "format": "int64"}) ; "u64")]
#[test_case(Primitive::F32, json!({"type": "number", "format": "float"}) ; "f32")]
#[test_case(Primitive::Decimal, json!({"type": "number", "format": "decimal"}) ; "decimal")]
#[test_case(Primitive::Time, json!({"type": "string", "format": "time"}) ; "time")]
#[test_case(Primitive::Duration, json!({"type": "string", "format": "duration"}) ; "duration")]
#[test_case(Primitive::Bool, json!({"type": "boolean"}) ; "bool")]
#[test_case(Primitive::Any, json!({}) ; "any")]
fn primitive_schema___maps_type_and_format(primitive: Primitive, expected: serde_json::Value) {
    assert_eq!(primitive_schema(primitive).to_value(), expected);
}
