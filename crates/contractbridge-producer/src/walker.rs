//! Dependency closure of discovered types

use contractbridge_catalog::{TypeCatalog, TypeId};
use contractbridge_core::{Diagnostic, DiagnosticCode, Diagnostics};
use std::collections::HashSet;

/// Collects every catalog type structurally reachable from a set of roots
///
/// One walker is used per batch: the visited set is shared across all
/// [`collect_dependencies`](Self::collect_dependencies) calls, so each type is
/// walked once even when many roots reach it.
pub struct SchemaWalker<'a> {
    catalog: &'a TypeCatalog,
    visited: HashSet<TypeId>,
    order: Vec<TypeId>,
    unresolved: HashSet<String>,
    diagnostics: Diagnostics,
}

/// Closure in first-visit order
#[derive(Debug, Clone, Default)]
pub struct Closure {
    pub types: Vec<TypeId>,
    pub diagnostics: Diagnostics,
}

impl<'a> SchemaWalker<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self {
            catalog,
            visited: HashSet::new(),
            order: Vec::new(),
            unresolved: HashSet::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Walk `root` and everything it references that has not been seen yet
    ///
    /// Optional, sequence and map wrappers are unwrapped (map values only).
    /// Primitives are leaves. Fields come from the type and its base chain.
    pub fn collect_dependencies(&mut self, root: TypeId) {
        let catalog = self.catalog;
        let mut stack = vec![root];

        while let Some(current) = stack.pop() {
            if !self.visited.insert(current) {
                continue;
            }
            self.order.push(current);

            let mut children = Vec::new();
            for field in catalog.fields_with_inherited(current) {
                for name in field.ty.named_references() {
                    match catalog.find(name) {
                        Some(child) => {
                            if !self.visited.contains(&child) {
                                children.push(child);
                            }
                        }
                        None => self.report_unresolved(current, name),
                    }
                }
            }

            // Reverse so the first field's type is visited first
            stack.extend(children.into_iter().rev());
        }
    }

    fn report_unresolved(&mut self, from: TypeId, name: &str) {
        if !self.unresolved.insert(name.to_string()) {
            return;
        }
        let referrer = self
            .catalog
            .get(from)
            .map(|t| t.identity())
            .unwrap_or_default();
        self.diagnostics.push(
            Diagnostic::warning(
                DiagnosticCode::UnresolvedType,
                format!("referenced by {} but not in the catalog", referrer),
            )
            .with_subject(name),
        );
    }

    pub fn is_visited(&self, id: TypeId) -> bool {
        self.visited.contains(&id)
    }

    pub fn finish(self) -> Closure {
        Closure {
            types: self.order,
            diagnostics: self.diagnostics,
        }
    }
}

/// Closure of `roots`, walked in order with one shared visited set
pub fn collect_closure(catalog: &TypeCatalog, roots: impl IntoIterator<Item = TypeId>) -> Closure {
    let mut walker = SchemaWalker::new(catalog);
    for root in roots {
        walker.collect_dependencies(root);
    }
    walker.finish()
}
