//! contractbridge-catalog - Type catalogs for message producers
//!
//! A [`TypeCatalog`] is the explicit description of the types one module
//! exports: names, namespaces, kinds, inheritance and fields. Catalogs are
//! read from JSON files or built by scanning Rust source, and are the input
//! to discovery on the producer side and to external type detection on the
//! consumer side.

mod catalog;
mod descriptor;
mod error;
mod module;
mod scan;
mod type_ref;

pub use catalog::TypeCatalog;
pub use descriptor::{FieldDescriptor, TypeDescriptor, TypeId, TypeKind, Visibility};
pub use error::{CatalogError, CatalogResult};
pub use module::{ModuleFormat, load_module, load_module_with};
pub use scan::{LoadedCatalog, ScanOptions, scan_file, scan_source};
pub use type_ref::{Primitive, TypeRef};
