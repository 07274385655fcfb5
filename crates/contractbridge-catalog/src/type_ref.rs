//! Field type expressions
//!
//! Grammar:
//!
//! ```text
//! type   := base suffix*
//! suffix := "?" | "[]"
//! base   := "map" "<" type "," type ">" | primitive | identity
//! ```
//!
//! `string?[]` is a sequence of optional strings, `Order[]?` an optional
//! sequence of orders.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leaf value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal,
    Date,
    Time,
    DateTime,
    Duration,
    Uuid,
    Any,
}

impl Primitive {
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Bool => "bool",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Decimal => "decimal",
            Primitive::Date => "date",
            Primitive::Time => "time",
            Primitive::DateTime => "datetime",
            Primitive::Duration => "duration",
            Primitive::Uuid => "uuid",
            Primitive::Any => "any",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "string" => Primitive::String,
            "bool" => Primitive::Bool,
            "i8" => Primitive::I8,
            "i16" => Primitive::I16,
            "i32" => Primitive::I32,
            "i64" => Primitive::I64,
            "u8" => Primitive::U8,
            "u16" => Primitive::U16,
            "u32" => Primitive::U32,
            "u64" => Primitive::U64,
            "f32" => Primitive::F32,
            "f64" => Primitive::F64,
            "decimal" => Primitive::Decimal,
            "date" => Primitive::Date,
            "time" => Primitive::Time,
            "datetime" => Primitive::DateTime,
            "duration" => Primitive::Duration,
            "uuid" => Primitive::Uuid,
            "any" => Primitive::Any,
            _ => return None,
        };
        Some(primitive)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field type expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TypeRef {
    Primitive(Primitive),
    /// Reference to a catalog type by identity
    Named(String),
    Optional(Box<TypeRef>),
    Sequence(Box<TypeRef>),
    Map(Box<TypeRef>, Box<TypeRef>),
}

impl TypeRef {
    pub fn named(identity: impl Into<String>) -> Self {
        TypeRef::Named(identity.into())
    }

    pub fn optional(inner: TypeRef) -> Self {
        TypeRef::Optional(Box::new(inner))
    }

    pub fn sequence(inner: TypeRef) -> Self {
        TypeRef::Sequence(Box::new(inner))
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Map(Box::new(key), Box::new(value))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeRef::Optional(_))
    }

    /// Named references reachable through optional, sequence and map-value
    /// wrappers, in left-to-right order
    pub fn named_references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_named(&mut out);
        out
    }

    fn collect_named<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeRef::Primitive(_) => {}
            TypeRef::Named(name) => out.push(name),
            TypeRef::Optional(inner) | TypeRef::Sequence(inner) => inner.collect_named(out),
            TypeRef::Map(_, value) => value.collect_named(out),
        }
    }

    /// Rewrite every named reference
    pub fn map_names(&self, f: &mut impl FnMut(&str) -> String) -> TypeRef {
        match self {
            TypeRef::Primitive(p) => TypeRef::Primitive(*p),
            TypeRef::Named(name) => TypeRef::Named(f(name)),
            TypeRef::Optional(inner) => TypeRef::optional(inner.map_names(f)),
            TypeRef::Sequence(inner) => TypeRef::sequence(inner.map_names(f)),
            TypeRef::Map(key, value) => TypeRef::map(key.map_names(f), value.map_names(f)),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{}", p),
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Optional(inner) => write!(f, "{}?", inner),
            TypeRef::Sequence(inner) => write!(f, "{}[]", inner),
            TypeRef::Map(key, value) => write!(f, "map<{}, {}>", key, value),
        }
    }
}

impl FromStr for TypeRef {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            input: s,
            chars: s.char_indices().collect(),
            pos: 0,
        };
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos < parser.chars.len() {
            return Err(parser.error(format!(
                "unexpected '{}' at offset {}",
                parser.chars[parser.pos].1, parser.chars[parser.pos].0
            )));
        }
        Ok(ty)
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.to_string()
    }
}

impl TryFrom<String> for TypeRef {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, reason: impl Into<String>) -> CatalogError {
        CatalogError::InvalidTypeRef {
            input: self.input.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> CatalogResult<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    fn parse_type(&mut self) -> CatalogResult<TypeRef> {
        let mut ty = self.parse_base()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('?') => {
                    self.pos += 1;
                    ty = TypeRef::optional(ty);
                }
                Some('[') => {
                    self.pos += 1;
                    self.expect(']')?;
                    ty = TypeRef::sequence(ty);
                }
                _ => return Ok(ty),
            }
        }
    }

    fn parse_base(&mut self) -> CatalogResult<TypeRef> {
        self.skip_whitespace();
        let ident = self.parse_identifier()?;

        if ident == "map" {
            self.skip_whitespace();
            if self.peek() == Some('<') {
                self.pos += 1;
                let key = self.parse_type()?;
                self.expect(',')?;
                let value = self.parse_type()?;
                self.expect('>')?;
                return Ok(TypeRef::map(key, value));
            }
        }

        Ok(match Primitive::from_name(&ident) {
            Some(p) => TypeRef::Primitive(p),
            None => TypeRef::Named(ident),
        })
    }

    fn parse_identifier(&mut self) -> CatalogResult<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            let valid = if self.pos == start {
                c.is_alphabetic() || c == '_'
            } else {
                c.is_alphanumeric() || c == '_' || c == '.'
            };
            if !valid {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a type name, found '{}'", c)),
                None => self.error("expected a type name, found end of input"),
            });
        }
        let ident: String = self.chars[start..self.pos].iter().map(|(_, c)| c).collect();
        if ident.ends_with('.') || ident.contains("..") {
            return Err(self.error(format!("malformed identity '{}'", ident)));
        }
        Ok(ident)
    }
}
