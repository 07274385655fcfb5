//! Document assembly
//!
//! Turns discovered message types into an AsyncAPI document: one channel,
//! message and operation per discovered type, and one schema per type in the
//! dependency closure.

use crate::discovery::DiscoveredType;
use crate::walker::collect_closure;
use contractbridge_catalog::{
    FieldDescriptor, Primitive, TypeCatalog, TypeDescriptor, TypeId, TypeKind, TypeRef,
};
use contractbridge_core::schema::PrimitiveType;
use contractbridge_core::{
    Channel, ContractError, ContractResult, Diagnostics, Document, JSON_CONTENT_TYPE, Message,
    MultiFormatSchema, Operation, Property, Reference, SchemaNode,
};
use std::collections::{BTreeMap, HashMap};

/// An assembled document plus findings from the walk
#[derive(Debug, Clone)]
pub struct Assembly {
    pub document: Document,
    pub diagnostics: Diagnostics,
}

/// Builder for [`Document`]s
///
/// Title, version and the type set must all be supplied; a missing or blank
/// value is rejected before any work starts.
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    title: Option<String>,
    version: Option<String>,
    description: Option<String>,
    types: Option<Vec<DiscoveredType>>,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn types(mut self, types: Vec<DiscoveredType>) -> Self {
        self.types = Some(types);
        self
    }

    fn validate(&self) -> ContractResult<(&str, &str, &[DiscoveredType])> {
        let title = self
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ContractError::configuration("document title must not be blank"))?;
        let version = self
            .version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ContractError::configuration("document version must not be blank"))?;
        let types = self
            .types
            .as_deref()
            .ok_or_else(|| ContractError::configuration("no discovered type set was supplied"))?;
        Ok((title, version, types))
    }

    /// Build the document from `catalog`
    pub fn assemble(&self, catalog: &TypeCatalog) -> ContractResult<Assembly> {
        let (title, version, discovered) = self.validate()?;

        let closure = collect_closure(catalog, discovered.iter().map(|t| t.id));

        let mut document = Document::new(title, version);
        document.info.description = self.description.clone();

        let mut claimed: HashMap<&str, String> = HashMap::new();
        let mut schemas = BTreeMap::new();
        for id in &closure.types {
            let Some(descriptor) = catalog.get(*id) else {
                continue;
            };
            let identity = descriptor.identity();
            if let Some(first) = claimed.get(descriptor.name.as_str()) {
                return Err(ContractError::SchemaNameCollision {
                    name: descriptor.name.clone(),
                    first: first.clone(),
                    second: identity,
                });
            }
            claimed.insert(&descriptor.name, identity);

            let node = type_schema(catalog, *id, descriptor);
            schemas.insert(descriptor.name.clone(), MultiFormatSchema::new(node));
        }
        document.components.schemas = schemas;

        for discovered_type in discovered {
            let Some(descriptor) = catalog.get(discovered_type.id) else {
                continue;
            };
            add_message(&mut document, descriptor, discovered_type);
        }

        tracing::info!(
            "Assembled document '{}' {}: {} messages, {} schemas",
            title,
            version,
            document.components.messages.len(),
            document.components.schemas.len()
        );

        Ok(Assembly {
            document,
            diagnostics: closure.diagnostics,
        })
    }
}

/// Assemble a document in one call
pub fn assemble(
    catalog: &TypeCatalog,
    title: &str,
    version: &str,
    discovered: &[DiscoveredType],
) -> ContractResult<Assembly> {
    DocumentAssembler::new()
        .title(title)
        .version(version)
        .types(discovered.to_vec())
        .assemble(catalog)
}

/// URN address of the channel carrying a type
pub fn channel_address(namespace: &str, name: &str) -> String {
    format!("urn:message:{}:{}", namespace, name)
}

fn add_message(document: &mut Document, descriptor: &TypeDescriptor, discovered: &DiscoveredType) {
    let name = descriptor.name.clone();
    let identity = discovered.identity.clone();

    let mut messages = BTreeMap::new();
    messages.insert(name.clone(), Reference::to_message(&name));
    document.channels.insert(
        identity.clone(),
        Channel {
            address: channel_address(&descriptor.namespace, &name),
            messages,
        },
    );

    document.components.messages.insert(
        name.clone(),
        Message {
            name: name.clone(),
            content_type: JSON_CONTENT_TYPE.to_string(),
            payload: Reference::to_schema(&name),
        },
    );

    document.operations.insert(
        format!("{}Operation", name),
        Operation {
            action: discovered.classification.action(),
            channel: Reference::to_channel(&identity),
        },
    );
}

/// Root schema node for one catalog type, tagged with its origin
fn type_schema(catalog: &TypeCatalog, id: TypeId, descriptor: &TypeDescriptor) -> SchemaNode {
    let node = match descriptor.kind {
        TypeKind::Enum => SchemaNode::enumeration(descriptor.variants.clone()),
        TypeKind::Class | TypeKind::Struct | TypeKind::Abstract | TypeKind::Interface => {
            let fields = catalog.fields_with_inherited(id);
            object_schema(catalog, &fields)
        }
    };

    let node = match &descriptor.docs {
        Some(docs) => node.with_description(docs.clone()),
        None => node,
    };
    node.with_origin(&descriptor.namespace, &descriptor.identity())
}

fn object_schema(catalog: &TypeCatalog, fields: &[&FieldDescriptor]) -> SchemaNode {
    let mut properties = Vec::with_capacity(fields.len());
    let mut required = Vec::new();

    for field in fields {
        let wire = field.wire_name().to_string();
        let mut schema = type_ref_schema(catalog, &field.ty);
        if let Some(docs) = &field.docs {
            schema = schema.with_description(docs.clone());
        }
        if field.is_required() {
            required.push(wire.clone());
        }
        properties.push(Property::new(wire, schema));
    }

    SchemaNode::object(properties, required)
}

fn type_ref_schema(catalog: &TypeCatalog, ty: &TypeRef) -> SchemaNode {
    match ty {
        TypeRef::Primitive(p) => primitive_schema(*p),
        TypeRef::Named(identity) => match catalog.find_descriptor(identity) {
            Some(target) => SchemaNode::reference(target.name.clone()),
            None => SchemaNode::any(),
        },
        TypeRef::Optional(inner) => type_ref_schema(catalog, inner).nullable(),
        TypeRef::Sequence(inner) => SchemaNode::array(type_ref_schema(catalog, inner)),
        TypeRef::Map(_, value) => SchemaNode::map(type_ref_schema(catalog, value)),
    }
}

/// JSON Schema type and format for a primitive
pub fn primitive_schema(primitive: Primitive) -> SchemaNode {
    match primitive {
        Primitive::String => SchemaNode::primitive(PrimitiveType::String),
        Primitive::Bool => SchemaNode::primitive(PrimitiveType::Boolean),
        Primitive::I8 | Primitive::I16 | Primitive::I32 | Primitive::U8 | Primitive::U16 => {
            SchemaNode::formatted(PrimitiveType::Integer, "int32")
        }
        Primitive::I64 | Primitive::U32 | Primitive::U64 => {
            SchemaNode::formatted(PrimitiveType::Integer, "int64")
        }
        Primitive::F32 => SchemaNode::formatted(PrimitiveType::Number, "float"),
        Primitive::F64 => SchemaNode::formatted(PrimitiveType::Number, "double"),
        Primitive::Decimal => SchemaNode::formatted(PrimitiveType::Number, "decimal"),
        Primitive::Date => SchemaNode::formatted(PrimitiveType::String, "date"),
        Primitive::Time => SchemaNode::formatted(PrimitiveType::String, "time"),
        Primitive::DateTime => SchemaNode::formatted(PrimitiveType::String, "date-time"),
        Primitive::Duration => SchemaNode::formatted(PrimitiveType::String, "duration"),
        Primitive::Uuid => SchemaNode::formatted(PrimitiveType::String, "uuid"),
        Primitive::Any => SchemaNode::any(),
    }
}

#[cfg(test)]
#[path = "assembler/assembler_tests.rs"]
mod assembler_tests;
