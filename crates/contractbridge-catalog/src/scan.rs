//! Build a catalog from Rust source.
//!
//! The scanner uses [`syn`] to read a source file and describe the types it
//! declares, so that producers written in Rust get a catalog without a
//! separate build step.
//!
//! # Mapping
//!
//! - inline `mod` blocks add a PascalCase namespace segment below the root namespace
//! - structs with named or no fields become `struct` descriptors
//! - enums whose variants are all unit variants become `enum` descriptors
//! - traits become `interface` descriptors; supertraits are inherited interfaces
//! - `impl Trait for Type` records an implemented interface on `Type`
//! - a `#[serde(flatten)]` field of a named type becomes the base type
//!
//! Field wire names follow `#[serde(rename)]` and the container's
//! `#[serde(rename_all)]`; `#[serde(skip)]` fields are omitted. Doc comments
//! (`///`) are kept.
//!
//! # Limitations
//!
//! - Tuple structs, generic types and enums with data are skipped
//! - `mod foo;` declarations are not followed

use crate::catalog::TypeCatalog;
use crate::descriptor::{FieldDescriptor, TypeDescriptor, TypeKind, Visibility};
use crate::error::CatalogResult;
use crate::type_ref::{Primitive, TypeRef};
use contractbridge_core::identity::join_identity;
use contractbridge_core::{Diagnostic, DiagnosticCode, Diagnostics};
use std::collections::HashMap;
use std::path::Path;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Fields, GenericArgument, Item, LitStr, Meta, PathArguments, Type};

/// Options for scanning Rust source
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Module name recorded in the catalog
    pub module: String,

    /// Namespace prefix for every scanned type
    pub root_namespace: String,
}

impl ScanOptions {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            root_namespace: String::new(),
        }
    }

    #[must_use]
    pub fn with_root_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.root_namespace = namespace.into();
        self
    }
}

/// A catalog plus the findings gathered while building it
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub catalog: TypeCatalog,
    pub diagnostics: Diagnostics,
}

/// Scan a Rust source file
pub fn scan_file(path: &Path, options: &ScanOptions) -> CatalogResult<LoadedCatalog> {
    let content = std::fs::read_to_string(path)?;
    scan_source(&content, options)
}

/// Scan Rust source text
pub fn scan_source(source: &str, options: &ScanOptions) -> CatalogResult<LoadedCatalog> {
    let file = syn::parse_file(source)?;

    let mut scanner = Scanner::default();
    scanner.scan_items(&file.items, &options.root_namespace, true);

    let Scanner {
        mut types,
        impls,
        mut diagnostics,
    } = scanner;

    for (namespace, target, interface) in impls {
        match types
            .iter_mut()
            .find(|t| t.namespace == namespace && t.name == target)
        {
            Some(descriptor) => descriptor.interfaces.push(interface),
            None => diagnostics.push(
                Diagnostic::info(
                    DiagnosticCode::SkippedItem,
                    format!("impl of '{}' for a type not declared here", interface),
                )
                .with_subject(join_identity(&namespace, &target)),
            ),
        }
    }

    let resolver = NameResolver::new(&types);
    let resolved: Vec<TypeDescriptor> = types.iter().map(|t| resolver.resolve(t)).collect();

    let mut catalog = TypeCatalog::new(options.module.clone());
    for descriptor in resolved {
        catalog.insert(descriptor)?;
    }

    tracing::debug!(
        "Scanned {} types for module '{}'",
        catalog.len(),
        options.module
    );

    Ok(LoadedCatalog {
        catalog,
        diagnostics,
    })
}

#[derive(Default)]
struct Scanner {
    types: Vec<TypeDescriptor>,
    /// (namespace, type name, interface path) triples from `impl Trait for Type`
    impls: Vec<(String, String, String)>,
    diagnostics: Diagnostics,
}

impl Scanner {
    fn scan_items(&mut self, items: &[Item], namespace: &str, public_scope: bool) {
        for item in items {
            match item {
                Item::Mod(m) => {
                    if let Some((_, content)) = &m.content {
                        let nested = join_identity(namespace, &pascal_case(&m.ident.to_string()));
                        let public = public_scope && is_pub(&m.vis);
                        self.scan_items(content, &nested, public);
                    }
                }
                Item::Struct(s) => self.scan_struct(s, namespace, public_scope),
                Item::Enum(e) => self.scan_enum(e, namespace, public_scope),
                Item::Trait(t) => self.scan_trait(t, namespace, public_scope),
                Item::Impl(i) => self.scan_impl(i, namespace),
                _ => {}
            }
        }
    }

    fn skip(&mut self, namespace: &str, name: &str, reason: &str) {
        self.diagnostics.push(
            Diagnostic::info(DiagnosticCode::SkippedItem, reason)
                .with_subject(join_identity(namespace, name)),
        );
    }

    fn serde_attrs(&mut self, namespace: &str, subject: &str, attrs: &[Attribute]) -> SerdeAttrs {
        let (parsed, errors) = SerdeAttrs::from_attrs(attrs);
        for e in errors {
            self.diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCode::SkippedItem,
                    format!("ignored unparseable #[serde(..)] attribute: {}", e),
                )
                .with_subject(join_identity(namespace, subject)),
            );
        }
        parsed
    }

    fn scan_struct(&mut self, s: &syn::ItemStruct, namespace: &str, public_scope: bool) {
        let name = s.ident.to_string();
        if !s.generics.params.is_empty() {
            self.skip(namespace, &name, "generic types are not supported");
            return;
        }

        let container = self.serde_attrs(namespace, &name, &s.attrs);
        let mut descriptor = TypeDescriptor::new(namespace, &name, TypeKind::Struct)
            .with_visibility(visibility(public_scope, &s.vis));
        descriptor.docs = docs_of(&s.attrs);

        match &s.fields {
            Fields::Named(fields) => {
                for f in &fields.named {
                    let Some(ident) = &f.ident else { continue };
                    let field_name = ident.to_string();
                    let attrs = self.serde_attrs(
                        namespace,
                        &format!("{}.{}", name, field_name),
                        &f.attrs,
                    );
                    if attrs.skip {
                        continue;
                    }
                    let Some(ty) = map_type(&f.ty) else {
                        self.skip(
                            namespace,
                            &format!("{}.{}", name, field_name),
                            "field type is not supported",
                        );
                        continue;
                    };

                    if attrs.flatten
                        && descriptor.base.is_none()
                        && let TypeRef::Named(base) = &ty
                    {
                        descriptor.base = Some(base.clone());
                        continue;
                    }

                    let wire = attrs.rename.or_else(|| {
                        container
                            .rename_all
                            .as_deref()
                            .map(|rule| apply_rename_rule(rule, &field_name))
                    });
                    let mut field = FieldDescriptor::new(&field_name, ty);
                    field.wire_name = wire.filter(|w| *w != field_name);
                    field.docs = docs_of(&f.attrs);
                    descriptor.fields.push(field);
                }
            }
            Fields::Unnamed(_) => {
                self.skip(namespace, &name, "tuple structs are not supported");
                return;
            }
            Fields::Unit => {}
        }

        self.types.push(descriptor);
    }

    fn scan_enum(&mut self, e: &syn::ItemEnum, namespace: &str, public_scope: bool) {
        let name = e.ident.to_string();
        if !e.generics.params.is_empty() {
            self.skip(namespace, &name, "generic types are not supported");
            return;
        }
        if e.variants.iter().any(|v| !matches!(v.fields, Fields::Unit)) {
            self.skip(namespace, &name, "enums with data are not supported");
            return;
        }

        let container = self.serde_attrs(namespace, &name, &e.attrs);
        let mut variants = Vec::new();
        for v in &e.variants {
            let variant = v.ident.to_string();
            let attrs = self.serde_attrs(namespace, &format!("{}.{}", name, variant), &v.attrs);
            if attrs.skip {
                continue;
            }
            variants.push(attrs.rename.unwrap_or_else(|| match &container.rename_all {
                Some(rule) => apply_rename_rule(rule, &variant),
                None => variant,
            }));
        }

        let mut descriptor = TypeDescriptor::new(namespace, &name, TypeKind::Enum)
            .with_visibility(visibility(public_scope, &e.vis))
            .with_variants(variants);
        descriptor.docs = docs_of(&e.attrs);
        self.types.push(descriptor);
    }

    fn scan_trait(&mut self, t: &syn::ItemTrait, namespace: &str, public_scope: bool) {
        let name = t.ident.to_string();
        let mut descriptor = TypeDescriptor::new(namespace, &name, TypeKind::Interface)
            .with_visibility(visibility(public_scope, &t.vis));
        descriptor.docs = docs_of(&t.attrs);

        for bound in &t.supertraits {
            if let syn::TypeParamBound::Trait(bound) = bound {
                let path = path_string(&bound.path);
                if !is_marker_trait(&path) {
                    descriptor.interfaces.push(path);
                }
            }
        }

        self.types.push(descriptor);
    }

    fn scan_impl(&mut self, i: &syn::ItemImpl, namespace: &str) {
        let Some((_, trait_path, _)) = &i.trait_ else {
            return;
        };
        let Type::Path(self_ty) = i.self_ty.as_ref() else {
            return;
        };
        let Some(target) = self_ty.path.segments.last() else {
            return;
        };
        let interface = path_string(trait_path);
        if is_marker_trait(&interface) {
            return;
        }
        self.impls
            .push((namespace.to_string(), target.ident.to_string(), interface));
    }
}

/// Resolves the Rust paths collected during scanning to catalog identities
struct NameResolver {
    /// simple name -> namespaces declaring it
    by_name: HashMap<String, Vec<String>>,
}

impl NameResolver {
    fn new(types: &[TypeDescriptor]) -> Self {
        let mut by_name: HashMap<String, Vec<String>> = HashMap::new();
        for t in types {
            by_name
                .entry(t.name.clone())
                .or_default()
                .push(t.namespace.clone());
        }
        Self { by_name }
    }

    /// Same namespace first, then a unique declaration anywhere; otherwise
    /// the path is left as written
    fn resolve_in(&self, namespace: &str, path: &str) -> String {
        let simple = path.rsplit("::").next().unwrap_or(path);
        match self.by_name.get(simple) {
            Some(namespaces) if namespaces.iter().any(|ns| ns == namespace) => {
                join_identity(namespace, simple)
            }
            Some(namespaces) if namespaces.len() == 1 => join_identity(&namespaces[0], simple),
            _ => path.replace("::", "."),
        }
    }

    fn resolve(&self, descriptor: &TypeDescriptor) -> TypeDescriptor {
        let ns = descriptor.namespace.as_str();
        let mut out = descriptor.clone();
        out.base = descriptor.base.as_deref().map(|b| self.resolve_in(ns, b));
        out.interfaces = descriptor
            .interfaces
            .iter()
            .map(|i| self.resolve_in(ns, i))
            .collect();
        for field in &mut out.fields {
            field.ty = field.ty.map_names(&mut |name: &str| self.resolve_in(ns, name));
        }
        out
    }
}

/// The serde attributes the scanner honors
#[derive(Debug, Default)]
struct SerdeAttrs {
    rename: Option<String>,
    rename_all: Option<String>,
    skip: bool,
    flatten: bool,
}

impl SerdeAttrs {
    /// Parse every `#[serde(..)]` attribute, keeping what parsed before a failure
    fn from_attrs(attrs: &[Attribute]) -> (Self, Vec<syn::Error>) {
        let mut out = SerdeAttrs::default();
        let mut errors = Vec::new();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    out.rename = serialize_name(&meta)?;
                } else if meta.path.is_ident("rename_all") {
                    out.rename_all = serialize_name(&meta)?;
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    out.skip = true;
                } else if meta.path.is_ident("flatten") {
                    out.flatten = true;
                } else {
                    skip_meta(&meta)?;
                }
                Ok(())
            });
            if let Err(e) = parsed {
                errors.push(e);
            }
        }
        (out, errors)
    }
}

/// `name = "x"` or `name(serialize = "x", deserialize = "y")`
fn serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(syn::Token![=]) {
        let lit: LitStr = meta.value()?.parse()?;
        return Ok(Some(lit.value()));
    }
    let mut found = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            let lit: LitStr = inner.value()?.parse()?;
            found = Some(lit.value());
            Ok(())
        } else {
            skip_meta(&inner)
        }
    })?;
    Ok(found)
}

fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta(&inner))?;
    }
    Ok(())
}

/// Extract documentation comments, one line per `///`
fn docs_of(attrs: &[Attribute]) -> Option<String> {
    let mut lines = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(meta) = &attr.meta
            && let syn::Expr::Lit(expr_lit) = &meta.value
            && let syn::Lit::Str(lit_str) = &expr_lit.lit
        {
            let line = lit_str.value();
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn is_pub(vis: &syn::Visibility) -> bool {
    matches!(vis, syn::Visibility::Public(_))
}

fn visibility(public_scope: bool, vis: &syn::Visibility) -> Visibility {
    if public_scope && is_pub(vis) {
        Visibility::Public
    } else {
        Visibility::Internal
    }
}

fn path_string(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|s| s.ident.to_string())
        .filter(|s| s != "crate" && s != "self" && s != "super")
        .collect::<Vec<_>>()
        .join("::")
}

/// Traits that never describe message contracts
fn is_marker_trait(path: &str) -> bool {
    let simple = path.rsplit("::").next().unwrap_or(path);
    matches!(
        simple,
        "Clone"
            | "Copy"
            | "Debug"
            | "Default"
            | "Display"
            | "PartialEq"
            | "Eq"
            | "PartialOrd"
            | "Ord"
            | "Hash"
            | "Send"
            | "Sync"
            | "Sized"
            | "Serialize"
            | "Deserialize"
            | "From"
            | "Into"
            | "TryFrom"
            | "FromStr"
            | "Drop"
    )
}

fn first_type_arg(args: &PathArguments) -> Option<&Type> {
    type_args(args).next()
}

fn type_args(args: &PathArguments) -> impl Iterator<Item = &Type> {
    let args = match args {
        PathArguments::AngleBracketed(args) => Some(args),
        _ => None,
    };
    args.into_iter().flat_map(|a| {
        a.args.iter().filter_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
    })
}

/// Map a Rust type to a type expression, or `None` if it has no counterpart
fn map_type(ty: &Type) -> Option<TypeRef> {
    match ty {
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last()?;
            let ident = segment.ident.to_string();

            if let Some(primitive) = map_primitive(&ident) {
                return Some(TypeRef::Primitive(primitive));
            }

            match ident.as_str() {
                "Option" => Some(TypeRef::optional(map_type(first_type_arg(
                    &segment.arguments,
                )?)?)),
                "Vec" | "VecDeque" | "LinkedList" | "HashSet" | "BTreeSet" | "IndexSet" => Some(
                    TypeRef::sequence(map_type(first_type_arg(&segment.arguments)?)?),
                ),
                "HashMap" | "BTreeMap" | "IndexMap" => {
                    let mut args = type_args(&segment.arguments);
                    let key = map_type(args.next()?)?;
                    let value = map_type(args.next()?)?;
                    Some(TypeRef::map(key, value))
                }
                "Box" | "Rc" | "Arc" | "Cow" => map_type(first_type_arg(&segment.arguments)?),
                _ => Some(TypeRef::named(path_string(&type_path.path))),
            }
        }
        Type::Reference(reference) => map_type(&reference.elem),
        Type::Slice(slice) => Some(TypeRef::sequence(map_type(&slice.elem)?)),
        Type::Array(array) => Some(TypeRef::sequence(map_type(&array.elem)?)),
        Type::Group(group) => map_type(&group.elem),
        Type::Paren(paren) => map_type(&paren.elem),
        _ => None,
    }
}

fn map_primitive(ident: &str) -> Option<Primitive> {
    let primitive = match ident {
        "String" | "str" | "char" => Primitive::String,
        "bool" => Primitive::Bool,
        "i8" => Primitive::I8,
        "i16" => Primitive::I16,
        "i32" => Primitive::I32,
        "i64" | "isize" => Primitive::I64,
        "u8" => Primitive::U8,
        "u16" => Primitive::U16,
        "u32" => Primitive::U32,
        "u64" | "usize" => Primitive::U64,
        "f32" => Primitive::F32,
        "f64" => Primitive::F64,
        "i128" | "u128" | "Decimal" | "BigDecimal" => Primitive::Decimal,
        "NaiveDate" | "Date" => Primitive::Date,
        "NaiveTime" | "Time" => Primitive::Time,
        "DateTime" | "NaiveDateTime" | "OffsetDateTime" | "PrimitiveDateTime" | "SystemTime"
        | "Timestamp" => Primitive::DateTime,
        "Duration" | "TimeDelta" => Primitive::Duration,
        "Uuid" => Primitive::Uuid,
        "Value" => Primitive::Any,
        _ => return None,
    };
    Some(primitive)
}

/// Split a Rust identifier into lowercase words
fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if c == '_' || c == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn pascal_case(name: &str) -> String {
    words(name).iter().map(|w| capitalize(w)).collect()
}

/// Apply a serde `rename_all` rule
fn apply_rename_rule(rule: &str, name: &str) -> String {
    let words = words(name);
    match rule {
        "lowercase" => words.concat(),
        "UPPERCASE" => words.concat().to_uppercase(),
        "PascalCase" => words.iter().map(|w| capitalize(w)).collect(),
        "camelCase" => words
            .iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
            .collect(),
        "snake_case" => words.join("_"),
        "SCREAMING_SNAKE_CASE" => words.join("_").to_uppercase(),
        "kebab-case" => words.join("-"),
        "SCREAMING-KEBAB-CASE" => words.join("-").to_uppercase(),
        _ => name.to_string(),
    }
}
