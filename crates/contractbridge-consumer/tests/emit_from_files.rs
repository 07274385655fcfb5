#![allow(non_snake_case)]

use contractbridge_bundle::{BundleBuilder, Manifest};
use contractbridge_catalog::{TypeCatalog, TypeDescriptor, TypeKind};
use contractbridge_consumer::{
    ContractBatch, ContractEmitter, ExternalTypeIndex, GeneratorOptions, Language,
};
use contractbridge_core::{
    Document, DocumentFormat, MultiFormatSchema, PrimitiveType, Property, SchemaNode,
    write_document,
};
use proptest::prelude::*;
use std::collections::HashSet;
use tempfile::TempDir;

fn shop_document() -> Document {
    let mut document = Document::new("Shop", "2.0.0");
    let schemas = [
        (
            "OrderCreated",
            "Shop.Events",
            SchemaNode::object(
                vec![
                    Property::new("order", SchemaNode::reference("Order")),
                    Property::new("customer", SchemaNode::reference("Customer")),
                ],
                vec!["order".to_string()],
            ),
        ),
        (
            "Order",
            "Shop.Models",
            SchemaNode::object(
                vec![Property::new("total", SchemaNode::primitive(PrimitiveType::Number))],
                Vec::new(),
            ),
        ),
        (
            "Customer",
            "Shop.Models",
            SchemaNode::object(
                vec![Property::new("name", SchemaNode::primitive(PrimitiveType::String))],
                Vec::new(),
            ),
        ),
    ];
    for (name, namespace, node) in schemas {
        document.components.schemas.insert(
            name.to_string(),
            MultiFormatSchema::new(node.with_origin(namespace, &format!("{namespace}.{name}"))),
        );
    }
    document
}

#[test]
fn reference_bundle___customer_is_external_and_imported() {
    let temp_dir = TempDir::new().unwrap();
    let mut catalog = TypeCatalog::new("Shop.Models");
    catalog
        .insert(TypeDescriptor::new("Shop.Models", "Customer", TypeKind::Class))
        .unwrap();
    let reference = temp_dir.path().join("models.cbp");
    BundleBuilder::new(Manifest::new("shop-models", "1.0.0"))
        .add_document_value("models", &Document::new("Models", "1.0.0"), DocumentFormat::Json)
        .unwrap()
        .add_catalog_value(&catalog)
        .unwrap()
        .write(&reference)
        .unwrap();

    let mut index = ExternalTypeIndex::new();
    let diagnostics = index.load_modules(&[&reference]);
    let result = ContractEmitter::new(&index, Language::CSharp, GeneratorOptions::default())
        .generate(&shop_document())
        .unwrap();

    assert!(diagnostics.is_empty());
    let external: Vec<_> = result.external_types.iter().map(|t| t.identity()).collect();
    assert_eq!(external, vec!["Shop.Models.Customer"]);
    assert_eq!(
        result.external_types[0].origin_module.as_deref(),
        Some("Shop.Models")
    );
    let events = result.file("Shop.Events.generated.cs").unwrap();
    assert!(events.content.contains("using Shop.Models;"));
    let models = result.file("Shop.Models.generated.cs").unwrap();
    assert!(models.content.contains("class Order"));
    assert!(!models.content.contains("class Customer"));
}

#[test]
fn ContractBatch___same_document_as_yaml_and_bundle___files_written_once() {
    let temp_dir = TempDir::new().unwrap();
    let yaml = temp_dir.path().join("shop.yaml");
    write_document(&shop_document(), &yaml, DocumentFormat::Yaml).unwrap();
    let bundle = temp_dir.path().join("shop.cbp");
    BundleBuilder::new(Manifest::new("shop", "2.0.0"))
        .add_document_value("shop", &shop_document(), DocumentFormat::Json)
        .unwrap()
        .write(&bundle)
        .unwrap();
    let out = temp_dir.path().join("generated");
    let index = ExternalTypeIndex::new();
    let emitter = ContractEmitter::new(&index, Language::Kotlin, GeneratorOptions::default());

    let report = ContractBatch::new(emitter, &out).run(&[yaml, bundle], None).unwrap();

    assert_eq!(report.artifacts.len(), 2);
    assert_eq!(report.artifacts[0].result.files, report.artifacts[1].result.files);
    let mut names: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Shop.Events.generated.kt", "Shop.Models.generated.kt"]);
    assert_eq!(report.written().count(), 2);
    assert!(report.artifacts[1].written.is_empty());
}

/// Schemas as (namespace index, indexed externally) with a reference to an earlier schema
fn registry() -> impl Strategy<Value = Vec<(u8, bool, Option<usize>)>> {
    prop::collection::vec((0u8..3, any::<bool>(), prop::option::of(0usize..8)), 1..8)
}

fn build(entries: &[(u8, bool, Option<usize>)]) -> (Document, ExternalTypeIndex) {
    let mut document = Document::new("Generated", "1.0.0");
    let mut catalog = TypeCatalog::new("Reference");
    for (i, (ns, external, reference)) in entries.iter().enumerate() {
        let namespace = match ns {
            0 => String::new(),
            n => format!("Gen.N{n}"),
        };
        let name = format!("T{i}");
        let mut properties = vec![Property::new("id", SchemaNode::primitive(PrimitiveType::Integer))];
        if let Some(target) = reference.filter(|t| *t < entries.len()) {
            properties.push(Property::new("link", SchemaNode::reference(format!("T{target}")).nullable()));
        }
        let identity = if namespace.is_empty() {
            name.clone()
        } else {
            format!("{namespace}.{name}")
        };
        document.components.schemas.insert(
            name.clone(),
            MultiFormatSchema::new(SchemaNode::object(properties, Vec::new()).with_origin(&namespace, &identity)),
        );
        if *external {
            catalog
                .insert(TypeDescriptor::new(namespace, name, TypeKind::Class))
                .unwrap();
        }
    }
    let mut index = ExternalTypeIndex::new();
    index.insert_catalog(&catalog);
    (document, index)
}

proptest! {
    #[test]
    fn ContractEmitter___arbitrary_registry___partition_and_idempotence(entries in registry()) {
        let (document, index) = build(&entries);
        let emitter = ContractEmitter::new(&index, Language::CSharp, GeneratorOptions::default());

        let first = emitter.generate(&document).unwrap();
        let second = emitter.generate(&document).unwrap();

        prop_assert_eq!(&first.files, &second.files);
        prop_assert_eq!(
            first.external_types.len() + first.generated_types.len(),
            entries.len()
        );
        let declared: Vec<String> = first
            .files
            .iter()
            .flat_map(|f| f.types.iter().map(|t| t.identity()))
            .collect();
        let distinct: HashSet<&String> = declared.iter().collect();
        prop_assert_eq!(declared.len(), distinct.len());
        prop_assert_eq!(declared.len(), first.generated_types.len());
        for info in &first.external_types {
            prop_assert!(index.exists(&info.identity()));
            prop_assert!(!distinct.contains(&info.identity()));
        }
        prop_assert!(first.diagnostics.is_empty());
    }
}
