//! Type catalog registry

use crate::descriptor::{FieldDescriptor, TypeDescriptor, TypeId, TypeKind};
use crate::error::{CatalogError, CatalogResult};
use contractbridge_core::identity::is_within_namespace;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

/// All types exported by one module, in declaration order
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    module: String,
    types: Vec<TypeDescriptor>,
    index: HashMap<String, TypeId>,
}

/// On-disk catalog layout
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    module: String,
    #[serde(default)]
    types: Vec<TypeDescriptor>,
}

impl TypeCatalog {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            types: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Module name this catalog describes
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn set_module(&mut self, module: impl Into<String>) {
        self.module = module.into();
    }

    /// Register a type
    ///
    /// Fails if a type with the same fully-qualified identity is already present.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> CatalogResult<TypeId> {
        if descriptor.name.trim().is_empty() {
            return Err(CatalogError::InvalidDescriptor {
                name: descriptor.identity(),
                reason: "type name must not be blank".to_string(),
            });
        }
        if descriptor.kind != TypeKind::Enum && !descriptor.variants.is_empty() {
            return Err(CatalogError::InvalidDescriptor {
                name: descriptor.identity(),
                reason: "only enums may declare variants".to_string(),
            });
        }

        let identity = descriptor.identity();
        if self.index.contains_key(&identity) {
            return Err(CatalogError::DuplicateType(identity));
        }

        let id = TypeId(self.types.len());
        self.types.push(descriptor);
        self.index.insert(identity, id);
        Ok(id)
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.types.get(id.0)
    }

    /// Look up a type by fully-qualified identity
    pub fn find(&self, identity: &str) -> Option<TypeId> {
        self.index.get(identity).copied()
    }

    pub fn find_descriptor(&self, identity: &str) -> Option<&TypeDescriptor> {
        self.find(identity).and_then(|id| self.get(id))
    }

    /// Types in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDescriptor)> {
        self.types.iter().enumerate().map(|(i, t)| (TypeId(i), t))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether any type lives in `namespace` or below it
    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.types
            .iter()
            .any(|t| is_within_namespace(&t.namespace, namespace))
    }

    /// Direct supertypes: base first, then interfaces in declaration order
    fn supertypes(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|t| t.base.iter().chain(t.interfaces.iter()))
            .filter_map(|identity| self.find(identity))
    }

    /// Whether `candidate` is `base`, derives from it, or implements it
    ///
    /// Follows base chains and interface inheritance. Terminates on cyclic
    /// declarations.
    pub fn is_assignable_to(&self, candidate: TypeId, base: TypeId) -> bool {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([candidate]);

        while let Some(current) = queue.pop_front() {
            if current == base {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            queue.extend(self.supertypes(current));
        }

        false
    }

    /// Whether any other catalog type is assignable to `id`
    pub fn has_subtypes(&self, id: TypeId) -> bool {
        self.iter()
            .any(|(other, _)| other != id && self.is_assignable_to(other, id))
    }

    /// Fields of `id` including those inherited along the base chain
    ///
    /// Inherited fields come first, root-most base first. A field redeclared
    /// by a derived type replaces the inherited one in place.
    pub fn fields_with_inherited(&self, id: TypeId) -> Vec<&FieldDescriptor> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(id);

        while let Some(cur) = current {
            if !seen.insert(cur) {
                break;
            }
            chain.push(cur);
            current = self
                .get(cur)
                .and_then(|t| t.base.as_deref())
                .and_then(|b| self.find(b));
        }

        let mut fields: Vec<&FieldDescriptor> = Vec::new();
        for ty in chain.iter().rev().filter_map(|id| self.get(*id)) {
            for field in &ty.fields {
                match fields.iter_mut().find(|f| f.name == field.name) {
                    Some(existing) => *existing = field,
                    None => fields.push(field),
                }
            }
        }
        fields
    }

    /// Parse a JSON catalog
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = TypeCatalog::new(file.module);
        for descriptor in file.types {
            catalog.insert(descriptor)?;
        }
        Ok(catalog)
    }

    pub fn to_json(&self) -> CatalogResult<String> {
        let file = CatalogFile {
            module: self.module.clone(),
            types: self.types.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Only the public types, keeping the module name
    pub fn public_subset(&self) -> TypeCatalog {
        let mut catalog = TypeCatalog::new(self.module.clone());
        for descriptor in self.types.iter().filter(|t| t.is_public()) {
            let id = TypeId(catalog.types.len());
            catalog.index.insert(descriptor.identity(), id);
            catalog.types.push(descriptor.clone());
        }
        catalog
    }

    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
