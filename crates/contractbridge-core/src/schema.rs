//! Structural schema nodes
//!
//! A [`SchemaNode`] is the single typed representation of one type's shape in
//! a document. It converts to and from draft-07 JSON Schema values; that
//! conversion is the only place the generic JSON form is interpreted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Extension carrying the producer-side namespace of a schema
pub const ORIGIN_NAMESPACE: &str = "x-origin-namespace";

/// Extension carrying the producer-side fully-qualified identity of a schema
pub const ORIGIN_IDENTITY: &str = "x-origin-identity";

/// Prefix of references into the document's schema registry
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Primitive JSON Schema types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Integer,
    Number,
    Boolean,
}

impl PrimitiveType {
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Number => "number",
            PrimitiveType::Boolean => "boolean",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(PrimitiveType::String),
            "integer" => Some(PrimitiveType::Integer),
            "number" => Some(PrimitiveType::Number),
            "boolean" => Some(PrimitiveType::Boolean),
            _ => None,
        }
    }
}

/// A named property of an object node
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub schema: SchemaNode,
}

impl Property {
    pub fn new(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// Structural kind of a schema node
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Object with declared properties, in declaration order
    Object {
        properties: Vec<Property>,
        required: Vec<String>,
    },
    /// Sequence of items
    Array { items: Box<SchemaNode> },
    /// String-keyed map; only the value type is described
    Map { values: Box<SchemaNode> },
    /// Reference to another schema in the registry, by registry key
    Reference { target: String },
    /// Leaf value with an optional format hint
    Primitive {
        kind: PrimitiveType,
        format: Option<String>,
    },
    /// String enumeration
    Enum { values: Vec<String> },
    /// Unconstrained value
    Any,
}

/// One type's structural description plus ordered extensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Value", try_from = "Value")]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub description: Option<String>,
    pub nullable: bool,
    pub extensions: Map<String, Value>,
}

impl SchemaNode {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            nullable: false,
            extensions: Map::new(),
        }
    }

    pub fn object(properties: Vec<Property>, required: Vec<String>) -> Self {
        Self::new(SchemaKind::Object {
            properties,
            required,
        })
    }

    pub fn array(items: SchemaNode) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
        })
    }

    pub fn map(values: SchemaNode) -> Self {
        Self::new(SchemaKind::Map {
            values: Box::new(values),
        })
    }

    pub fn reference(target: impl Into<String>) -> Self {
        Self::new(SchemaKind::Reference {
            target: target.into(),
        })
    }

    pub fn primitive(kind: PrimitiveType) -> Self {
        Self::new(SchemaKind::Primitive { kind, format: None })
    }

    pub fn formatted(kind: PrimitiveType, format: impl Into<String>) -> Self {
        Self::new(SchemaKind::Primitive {
            kind,
            format: Some(format.into()),
        })
    }

    pub fn enumeration(values: Vec<String>) -> Self {
        Self::new(SchemaKind::Enum { values })
    }

    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// Attach the two origin extensions
    #[must_use]
    pub fn with_origin(self, namespace: &str, identity: &str) -> Self {
        self.with_extension(ORIGIN_NAMESPACE, namespace)
            .with_extension(ORIGIN_IDENTITY, identity)
    }

    /// The `x-origin-namespace` extension, if present and a string
    pub fn origin_namespace(&self) -> Option<&str> {
        self.extensions.get(ORIGIN_NAMESPACE).and_then(Value::as_str)
    }

    /// The `x-origin-identity` extension, if present and a string
    pub fn origin_identity(&self) -> Option<&str> {
        self.extensions.get(ORIGIN_IDENTITY).and_then(Value::as_str)
    }

    /// Registry keys referenced anywhere below this node, in first-seen order
    pub fn referenced_schemas(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references(&self, out: &mut Vec<String>) {
        match &self.kind {
            SchemaKind::Object { properties, .. } => {
                for property in properties {
                    property.schema.collect_references(out);
                }
            }
            SchemaKind::Array { items } => items.collect_references(out),
            SchemaKind::Map { values } => values.collect_references(out),
            SchemaKind::Reference { target } => {
                if !out.contains(target) {
                    out.push(target.clone());
                }
            }
            SchemaKind::Primitive { .. } | SchemaKind::Enum { .. } | SchemaKind::Any => {}
        }
    }

    /// Convert to a draft-07 JSON Schema value
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();

        match &self.kind {
            SchemaKind::Reference { target } => {
                let reference = json!({ "$ref": format!("{}{}", SCHEMA_REF_PREFIX, target) });
                if self.nullable {
                    out.insert(
                        "oneOf".to_string(),
                        json!([{ "type": "null" }, reference]),
                    );
                } else if let Value::Object(reference) = reference {
                    out.extend(reference);
                }
            }
            SchemaKind::Any => {
                if self.nullable {
                    out.insert("oneOf".to_string(), json!([{ "type": "null" }, {}]));
                }
            }
            SchemaKind::Object { .. } => {
                out.insert("type".to_string(), self.type_value("object"));
            }
            SchemaKind::Array { .. } => {
                out.insert("type".to_string(), self.type_value("array"));
            }
            SchemaKind::Map { .. } => {
                out.insert("type".to_string(), self.type_value("object"));
            }
            SchemaKind::Primitive { kind, .. } => {
                out.insert("type".to_string(), self.type_value(kind.as_str()));
            }
            SchemaKind::Enum { .. } => {
                out.insert("type".to_string(), self.type_value("string"));
            }
        }

        if let Some(description) = &self.description {
            out.insert("description".to_string(), json!(description));
        }

        match &self.kind {
            SchemaKind::Object {
                properties,
                required,
            } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|p| (p.name.clone(), p.schema.to_value()))
                    .collect();
                out.insert("properties".to_string(), Value::Object(props));
                if !required.is_empty() {
                    out.insert("required".to_string(), json!(required));
                }
            }
            SchemaKind::Array { items } => {
                out.insert("items".to_string(), items.to_value());
            }
            SchemaKind::Map { values } => {
                out.insert("additionalProperties".to_string(), values.to_value());
            }
            SchemaKind::Primitive {
                format: Some(format),
                ..
            } => {
                out.insert("format".to_string(), json!(format));
            }
            SchemaKind::Enum { values } => {
                out.insert("enum".to_string(), json!(values));
            }
            _ => {}
        }

        for (key, value) in &self.extensions {
            out.insert(key.clone(), value.clone());
        }

        Value::Object(out)
    }

    fn type_value(&self, name: &str) -> Value {
        if self.nullable {
            json!([name, "null"])
        } else {
            json!(name)
        }
    }

    /// Read a draft-07 JSON Schema value
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Bool(true) => return Ok(SchemaNode::any()),
            other => return Err(format!("expected a schema object, found {}", other)),
        };

        let mut node = if let Some(reference) = obj.get("$ref") {
            let reference = reference
                .as_str()
                .ok_or_else(|| "'$ref' must be a string".to_string())?;
            SchemaNode::reference(reference_target(reference))
        } else if let Some(branches) = obj.get("oneOf").or_else(|| obj.get("anyOf")) {
            parse_union(branches)?
        } else {
            parse_typed(obj)?
        };

        if let Some(description) = obj.get("description").and_then(Value::as_str) {
            node = node.with_description(description);
        }

        for (key, value) in obj {
            if key.starts_with("x-") {
                node.extensions.insert(key.clone(), value.clone());
            }
        }

        Ok(node)
    }
}

/// Registry key named by a `$ref`
fn reference_target(reference: &str) -> String {
    if let Some(name) = reference.strip_prefix(SCHEMA_REF_PREFIX) {
        return name.to_string();
    }
    reference
        .rsplit('/')
        .next()
        .unwrap_or(reference)
        .to_string()
}

fn is_null_schema(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("null")
}

fn parse_union(branches: &Value) -> Result<SchemaNode, String> {
    let branches = branches
        .as_array()
        .ok_or_else(|| "'oneOf'/'anyOf' must be an array".to_string())?;

    let has_null = branches.iter().any(is_null_schema);
    let rest: Vec<&Value> = branches.iter().filter(|b| !is_null_schema(b)).collect();

    match rest.as_slice() {
        [single] => {
            let node = SchemaNode::from_value(single)?;
            Ok(if has_null { node.nullable() } else { node })
        }
        _ => Ok(if has_null {
            SchemaNode::any().nullable()
        } else {
            SchemaNode::any()
        }),
    }
}

fn parse_typed(obj: &Map<String, Value>) -> Result<SchemaNode, String> {
    let (type_name, nullable) = match obj.get("type") {
        None => (None, false),
        Some(Value::String(name)) => (Some(name.as_str()), false),
        Some(Value::Array(names)) => {
            let nullable = names.iter().any(|n| n.as_str() == Some("null"));
            let name = names
                .iter()
                .filter_map(Value::as_str)
                .find(|n| *n != "null");
            (name, nullable)
        }
        Some(other) => return Err(format!("unsupported 'type' value {}", other)),
    };

    let node = if let Some(values) = obj.get("enum") {
        let values = values
            .as_array()
            .ok_or_else(|| "'enum' must be an array".to_string())?
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        SchemaNode::enumeration(values)
    } else {
        match type_name {
            Some("object") => parse_object(obj)?,
            Some("array") => {
                let items = match obj.get("items") {
                    Some(items) => SchemaNode::from_value(items)?,
                    None => SchemaNode::any(),
                };
                SchemaNode::array(items)
            }
            Some(name) => match PrimitiveType::parse(name) {
                Some(kind) => SchemaNode::new(SchemaKind::Primitive {
                    kind,
                    format: obj
                        .get("format")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                }),
                None => return Err(format!("unsupported type '{}'", name)),
            },
            None if obj.contains_key("properties") => parse_object(obj)?,
            None => SchemaNode::any(),
        }
    };

    Ok(if nullable { node.nullable() } else { node })
}

fn parse_object(obj: &Map<String, Value>) -> Result<SchemaNode, String> {
    if let Some(properties) = obj.get("properties") {
        let properties = properties
            .as_object()
            .ok_or_else(|| "'properties' must be an object".to_string())?;
        let mut parsed = Vec::with_capacity(properties.len());
        for (name, schema) in properties {
            let schema =
                SchemaNode::from_value(schema).map_err(|e| format!("property '{}': {}", name, e))?;
            parsed.push(Property::new(name.clone(), schema));
        }
        let required = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|r| {
                r.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        return Ok(SchemaNode::object(parsed, required));
    }

    match obj.get("additionalProperties") {
        Some(Value::Bool(true)) => Ok(SchemaNode::map(SchemaNode::any())),
        Some(values @ Value::Object(_)) => Ok(SchemaNode::map(SchemaNode::from_value(values)?)),
        _ => Ok(SchemaNode::object(Vec::new(), Vec::new())),
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        node.to_value()
    }
}

impl TryFrom<Value> for SchemaNode {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        SchemaNode::from_value(&value)
    }
}
