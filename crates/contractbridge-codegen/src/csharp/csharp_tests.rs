#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn order_schema() -> TypeSchema {
    TypeSchema {
        name: "Order".to_string(),
        description: Some("An order & its lines".to_string()),
        kind: TypeSchemaKind::Object(vec![
            PropertySchema {
                name: "id".to_string(),
                ty: SchemaType::String(Some("uuid".to_string())),
                required: true,
                nullable: false,
                description: None,
            },
            PropertySchema {
                name: "customer_name".to_string(),
                ty: SchemaType::String(None),
                required: true,
                nullable: false,
                description: Some("Who ordered".to_string()),
            },
            PropertySchema {
                name: "note".to_string(),
                ty: SchemaType::String(None),
                required: false,
                nullable: true,
                description: None,
            },
            PropertySchema {
                name: "quantity".to_string(),
                ty: SchemaType::Integer(Some("int32".to_string())),
                required: false,
                nullable: false,
                description: None,
            },
            PropertySchema {
                name: "lines".to_string(),
                ty: SchemaType::Array(Box::new(SchemaType::Ref("OrderLine".to_string()))),
                required: true,
                nullable: false,
                description: None,
            },
        ]),
    }
}

#[test]
fn CSharpGenerator___class_style___settable_properties() {
    let code = CSharpGenerator.generate(&order_schema(), &GeneratorOptions::default());

    assert!(code.contains("#nullable enable"));
    assert!(code.contains("using System.Text.Json.Serialization;"));
    assert!(code.contains("using System.ComponentModel.DataAnnotations;"));
    assert!(code.contains("namespace Contracts\n{"));
    assert!(code.contains("/// An order &amp; its lines"));
    assert!(code.contains("    public partial class Order\n    {"));
    assert!(code.contains("        [JsonPropertyName(\"id\")]\n        [Required]\n        public System.Guid Id { get; set; }\n"));
    assert!(code.contains("public string CustomerName { get; set; } = default!;"));
    assert!(code.contains("public string? Note { get; set; }"));
    assert!(code.contains("public int? Quantity { get; set; }"));
    assert!(code.contains(
        "public System.Collections.Generic.ICollection<OrderLine> Lines { get; set; } = default!;"
    ));
    assert!(code.ends_with("    }\n}\n"));
}

#[test]
fn CSharpGenerator___record_style___init_and_required() {
    let options = GeneratorOptions::default()
        .with_namespace("Shop.Models")
        .with_class_style(ClassStyle::Record);

    let code = CSharpGenerator.generate(&order_schema(), &options);

    assert!(code.contains("namespace Shop.Models"));
    assert!(code.contains("public partial record Order"));
    assert!(code.contains("public required System.Guid Id { get; init; }"));
    assert!(code.contains("public string? Note { get; init; }"));
    assert!(!code.contains("default!"));
}

#[test]
fn CSharpGenerator___annotations_and_nullable_disabled() {
    let options = GeneratorOptions {
        generate_data_annotations: false,
        generate_nullable_reference_types: false,
        ..GeneratorOptions::default()
    };

    let code = CSharpGenerator.generate(&order_schema(), &options);

    assert!(!code.contains("#nullable enable"));
    assert!(!code.contains("[Required]"));
    assert!(!code.contains("DataAnnotations"));
    assert!(code.contains("public string Note { get; set; }"));
    assert!(code.contains("public int? Quantity { get; set; }"));
}

#[test]
fn CSharpGenerator___enum___members_with_wire_values() {
    let schema = TypeSchema {
        name: "OrderStatus".to_string(),
        description: None,
        kind: TypeSchemaKind::Enum(vec!["pending".to_string(), "shipped-late".to_string()]),
    };

    let code = CSharpGenerator.generate(&schema, &GeneratorOptions::default());

    assert!(code.contains("[JsonConverter(typeof(JsonStringEnumConverter))]"));
    assert!(code.contains("public enum OrderStatus"));
    assert!(code.contains("[EnumMember(Value = \"pending\")]\n        Pending = 0,"));
    assert!(code.contains("[EnumMember(Value = \"shipped-late\")]\n        ShippedLate = 1,"));
}

#[test]
fn CSharpGenerator___array_alias___derives_collection() {
    let schema = TypeSchema {
        name: "Tags".to_string(),
        description: None,
        kind: TypeSchemaKind::Alias(SchemaType::Array(Box::new(SchemaType::String(None)))),
    };

    let code = CSharpGenerator.generate(&schema, &GeneratorOptions::default());

    assert!(code.contains(
        "public partial class Tags : System.Collections.ObjectModel.Collection<string>"
    ));
}

#[test]
fn CSharpGenerator___member_named_like_type___suffixed() {
    let schema = TypeSchema {
        name: "Price".to_string(),
        description: None,
        kind: TypeSchemaKind::Object(vec![PropertySchema {
            name: "price".to_string(),
            ty: SchemaType::Number(Some("decimal".to_string())),
            required: true,
            nullable: false,
            description: None,
        }]),
    };

    let code = CSharpGenerator.generate(&schema, &GeneratorOptions::default());

    assert!(code.contains("public decimal PriceValue { get; set; }"));
}

#[test_case(SchemaType::String(Some("date".into())), "System.DateTimeOffset" ; "date")]
#[test_case(SchemaType::String(Some("time".into())), "System.TimeSpan" ; "time")]
#[test_case(SchemaType::String(Some("duration".into())), "System.TimeSpan" ; "duration")]
#[test_case(SchemaType::Integer(Some("int64".into())), "long" ; "int64")]
#[test_case(SchemaType::Number(None), "double" ; "number")]
#[test_case(SchemaType::Map(Box::new(SchemaType::Integer(None))), "System.Collections.Generic.IDictionary<string, int>" ; "map")]
#[test_case(SchemaType::Any, "object" ; "any")]
fn map_type___defaults(ty: SchemaType, expected: &str) {
    assert_eq!(map_type(&ty, &TypeMappings::default()), expected);
}

#[test]
fn map_type___custom_mappings_win() {
    let mappings = TypeMappings {
        date_time: Some("System.DateTime".to_string()),
        array: Some("System.Collections.Generic.List".to_string()),
        map: Some("System.Collections.Generic.Dictionary".to_string()),
        ..TypeMappings::default()
    };

    assert_eq!(
        map_type(&SchemaType::String(Some("date-time".into())), &mappings),
        "System.DateTime"
    );
    assert_eq!(
        map_type(&SchemaType::Array(Box::new(SchemaType::Boolean)), &mappings),
        "System.Collections.Generic.List<bool>"
    );
    assert_eq!(
        map_type(&SchemaType::Map(Box::new(SchemaType::Boolean)), &mappings),
        "System.Collections.Generic.Dictionary<string, bool>"
    );
}
