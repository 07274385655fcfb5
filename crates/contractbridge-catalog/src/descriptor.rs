//! Type descriptors

use crate::type_ref::TypeRef;
use contractbridge_core::identity::join_identity;
use serde::{Deserialize, Serialize};

/// Stable index of a type within one catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Kind of a described type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Struct,
    Abstract,
    Interface,
    Enum,
}

impl TypeKind {
    /// Whether instances of this kind can exist on the wire
    pub fn is_concrete(self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Struct)
    }

    /// Whether other types can derive from or implement this kind
    pub fn is_polymorphic(self) -> bool {
        matches!(self, TypeKind::Abstract | TypeKind::Interface)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Internal,
}

/// One field of a described type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    /// Name on the wire, when it differs from `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_name: Option<String>,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            wire_name: None,
            ty,
            docs: None,
        }
    }

    pub fn wire_name(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.name)
    }

    /// Required unless the type is optional
    pub fn is_required(&self) -> bool {
        !self.ty.is_optional()
    }
}

/// Description of one type in a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,

    #[serde(default)]
    pub namespace: String,

    pub kind: TypeKind,

    #[serde(default)]
    pub visibility: Visibility,

    /// Identity of the base type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Identities of implemented interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,

    /// Enum variant names, in wire form
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

impl TypeDescriptor {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            kind,
            visibility: Visibility::Public,
            base: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            variants: Vec::new(),
            docs: None,
        }
    }

    /// Fully-qualified identity
    pub fn identity(&self) -> String {
        join_identity(&self.namespace, &self.name)
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants.extend(variants.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }
}
