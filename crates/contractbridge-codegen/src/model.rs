//! Schema model consumed by the generators
//!
//! A [`TypeSchema`] is one named JSON Schema reduced to what a type generator
//! needs: a list of properties, an enumeration, or an alias of another type.

use crate::error::{CodegenError, CodegenResult};
use serde_json::{Map, Value};

/// A named type to generate
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSchema {
    pub name: String,
    pub description: Option<String>,
    pub kind: TypeSchemaKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSchemaKind {
    /// Properties in declaration order
    Object(Vec<PropertySchema>),
    /// String enumeration
    Enum(Vec<String>),
    /// A root schema that is not an object, e.g. a bare array
    Alias(SchemaType),
}

/// One property of an object type
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    /// Name on the wire
    pub name: String,
    pub ty: SchemaType,
    pub required: bool,
    pub nullable: bool,
    pub description: Option<String>,
}

impl PropertySchema {
    /// Whether the generated member must accept a missing value
    pub fn is_optional(&self) -> bool {
        self.nullable || !self.required
    }
}

/// Structural type of a property or alias
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    String(Option<String>),
    Integer(Option<String>),
    Number(Option<String>),
    Boolean,
    Array(Box<SchemaType>),
    Map(Box<SchemaType>),
    Ref(String),
    Any,
}

impl SchemaType {
    /// Names of all referenced types, in order of appearance
    pub fn references(&self) -> Vec<&str> {
        match self {
            SchemaType::Ref(name) => vec![name.as_str()],
            SchemaType::Array(inner) | SchemaType::Map(inner) => inner.references(),
            _ => Vec::new(),
        }
    }
}

impl TypeSchema {
    /// Names of all types this one refers to, deduplicated
    pub fn references(&self) -> Vec<&str> {
        let types: Vec<&SchemaType> = match &self.kind {
            TypeSchemaKind::Object(properties) => properties.iter().map(|p| &p.ty).collect(),
            TypeSchemaKind::Alias(ty) => vec![ty],
            TypeSchemaKind::Enum(_) => Vec::new(),
        };

        let mut names: Vec<&str> = Vec::new();
        for name in types.into_iter().flat_map(SchemaType::references) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Read a named JSON Schema into a [`TypeSchema`]
///
/// Accepts `$ref`, `type` given as a string or as `[T, "null"]`, `oneOf` and
/// `anyOf` with a null branch, `enum`, `properties`, `required`,
/// `additionalProperties`, `items` and `format`. Unknown keywords are ignored.
pub fn parse_type_schema(name: &str, value: &Value) -> CodegenResult<TypeSchema> {
    let object = match value {
        Value::Object(object) => object,
        Value::Bool(true) => {
            return Ok(TypeSchema {
                name: name.to_string(),
                description: None,
                kind: TypeSchemaKind::Alias(SchemaType::Any),
            });
        }
        other => {
            return Err(CodegenError::invalid(
                name,
                format!("expected a schema object, found {}", kind_of(other)),
            ));
        }
    };

    let kind = if let Some(values) = object.get("enum") {
        TypeSchemaKind::Enum(enum_values(name, values)?)
    } else if let Some(properties) = object.get("properties") {
        TypeSchemaKind::Object(parse_properties(name, properties, object.get("required"))?)
    } else if is_plain_object(object) {
        TypeSchemaKind::Object(Vec::new())
    } else {
        TypeSchemaKind::Alias(parse_type(name, value)?)
    };

    Ok(TypeSchema {
        name: name.to_string(),
        description: description(object),
        kind,
    })
}

fn parse_properties(
    name: &str,
    properties: &Value,
    required: Option<&Value>,
) -> CodegenResult<Vec<PropertySchema>> {
    let Value::Object(properties) = properties else {
        return Err(CodegenError::invalid(name, "'properties' must be an object"));
    };
    let required: Vec<&str> = match required {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(_) => return Err(CodegenError::invalid(name, "'required' must be an array")),
        None => Vec::new(),
    };

    properties
        .iter()
        .map(|(wire, schema)| {
            let context = format!("{}.{}", name, wire);
            Ok(PropertySchema {
                name: wire.clone(),
                ty: parse_type(&context, schema)?,
                required: required.contains(&wire.as_str()),
                nullable: is_nullable(schema),
                description: schema.as_object().and_then(description),
            })
        })
        .collect()
}

/// Structural type of one schema, ignoring nullability
pub fn parse_type(context: &str, value: &Value) -> CodegenResult<SchemaType> {
    let object = match value {
        Value::Object(object) => object,
        Value::Bool(true) => return Ok(SchemaType::Any),
        other => {
            return Err(CodegenError::invalid(
                context,
                format!("expected a schema object, found {}", kind_of(other)),
            ));
        }
    };

    if let Some(reference) = object.get("$ref").and_then(Value::as_str) {
        let target = reference.rsplit('/').next().unwrap_or(reference);
        return Ok(SchemaType::Ref(target.to_string()));
    }

    for keyword in ["oneOf", "anyOf"] {
        if let Some(Value::Array(branches)) = object.get(keyword) {
            let concrete: Vec<&Value> = branches.iter().filter(|b| !is_null_branch(b)).collect();
            return match concrete.as_slice() {
                [single] => parse_type(context, single),
                _ => Ok(SchemaType::Any),
            };
        }
    }

    let format = object
        .get("format")
        .and_then(Value::as_str)
        .map(str::to_string);

    let Some(type_name) = primary_type(context, object.get("type"))? else {
        if let Some(items) = object.get("items") {
            return Ok(SchemaType::Array(Box::new(parse_type(context, items)?)));
        }
        return Ok(SchemaType::Any);
    };

    match type_name {
        "string" => Ok(SchemaType::String(format)),
        "integer" => Ok(SchemaType::Integer(format)),
        "number" => Ok(SchemaType::Number(format)),
        "boolean" => Ok(SchemaType::Boolean),
        "array" => {
            let items = match object.get("items") {
                Some(items) => parse_type(context, items)?,
                None => SchemaType::Any,
            };
            Ok(SchemaType::Array(Box::new(items)))
        }
        "object" => match object.get("additionalProperties") {
            Some(Value::Bool(true)) => Ok(SchemaType::Map(Box::new(SchemaType::Any))),
            Some(values @ Value::Object(_)) => {
                Ok(SchemaType::Map(Box::new(parse_type(context, values)?)))
            }
            _ => Ok(SchemaType::Any),
        },
        "null" => Ok(SchemaType::Any),
        other => Err(CodegenError::invalid(
            context,
            format!("unknown type '{}'", other),
        )),
    }
}

/// Whether a schema admits `null`
pub fn is_nullable(value: &Value) -> bool {
    let Value::Object(object) = value else {
        return false;
    };
    if object.get("nullable").and_then(Value::as_bool) == Some(true) {
        return true;
    }
    if let Some(Value::Array(types)) = object.get("type")
        && types.iter().any(|t| t.as_str() == Some("null"))
    {
        return true;
    }
    ["oneOf", "anyOf"].iter().any(|keyword| {
        matches!(object.get(*keyword), Some(Value::Array(branches)) if branches.iter().any(is_null_branch))
    })
}

/// The non-null entry of `type`, if any
fn primary_type<'v>(context: &str, ty: Option<&'v Value>) -> CodegenResult<Option<&'v str>> {
    match ty {
        None => Ok(None),
        Some(Value::String(name)) => Ok(Some(name.as_str())),
        Some(Value::Array(names)) => {
            let mut concrete = names.iter().filter_map(Value::as_str).filter(|n| *n != "null");
            let first = concrete.next();
            if concrete.next().is_some() {
                return Err(CodegenError::invalid(
                    context,
                    "union types other than [T, \"null\"] are not supported",
                ));
            }
            Ok(first.or(Some("null")))
        }
        Some(_) => Err(CodegenError::invalid(
            context,
            "'type' must be a string or an array",
        )),
    }
}

fn is_null_branch(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("null")
}

fn is_plain_object(object: &Map<String, Value>) -> bool {
    object.get("type").and_then(Value::as_str) == Some("object")
        && !object.contains_key("additionalProperties")
}

fn enum_values(name: &str, values: &Value) -> CodegenResult<Vec<String>> {
    let Value::Array(values) = values else {
        return Err(CodegenError::invalid(name, "'enum' must be an array"));
    };
    Ok(values
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect())
}

fn description(object: &Map<String, Value>) -> Option<String> {
    object
        .get("description")
        .and_then(Value::as_str)
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
