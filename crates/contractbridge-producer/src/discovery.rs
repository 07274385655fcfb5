//! Message discovery
//!
//! Resolves [`DiscoveryPattern`]s against a [`TypeCatalog`] and returns the
//! matching message types with their classification.

use crate::pattern::{DiscoveryPattern, PatternTarget};
use contractbridge_catalog::{TypeCatalog, TypeDescriptor, TypeId, TypeKind};
use contractbridge_core::identity::is_within_namespace;
use contractbridge_core::{
    Classification, ContractError, ContractResult, Diagnostic, DiagnosticCode, Diagnostics,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How to treat a type claimed by patterns with different classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// The first pattern wins; later ones add a warning
    #[default]
    FirstWins,
    /// A conflict is a configuration error
    Reject,
}

/// A message type selected by discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredType {
    pub id: TypeId,
    pub identity: String,
    pub classification: Classification,
}

/// Discovered types in pattern order, plus findings
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub types: Vec<DiscoveredType>,
    pub diagnostics: Diagnostics,
}

/// Discover message types with the default first-wins policy
pub fn discover(
    catalog: &TypeCatalog,
    patterns: &[DiscoveryPattern],
) -> ContractResult<Discovery> {
    discover_with(catalog, patterns, ConflictPolicy::default())
}

/// Discover message types
///
/// Patterns are processed in order; within one pattern, matches follow
/// catalog declaration order. Patterns that match nothing contribute a
/// warning, never an error. Malformed patterns are rejected before any
/// matching starts.
pub fn discover_with(
    catalog: &TypeCatalog,
    patterns: &[DiscoveryPattern],
    policy: ConflictPolicy,
) -> ContractResult<Discovery> {
    let targets = patterns
        .iter()
        .map(|p| p.target().map(|t| (p, t)))
        .collect::<ContractResult<Vec<_>>>()?;

    let mut discovery = Discovery::default();
    let mut claimed: HashMap<TypeId, (Classification, &str)> = HashMap::new();

    for (pattern, target) in &targets {
        let matches = match_target(catalog, target);

        if matches.is_empty() {
            tracing::debug!("Pattern '{}' matched no types", pattern.pattern);
            discovery.diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCode::UnmatchedPattern,
                    format!("no message types matched in module '{}'", catalog.module()),
                )
                .with_subject(pattern.pattern.clone()),
            );
            continue;
        }

        for id in matches {
            let Some(descriptor) = catalog.get(id) else {
                continue;
            };
            let identity = descriptor.identity();

            if let Some((existing, by)) = claimed.get(&id) {
                if *existing != pattern.classification {
                    let message = format!(
                        "claimed as {} by '{}' and as {} by '{}'",
                        existing, by, pattern.classification, pattern.pattern
                    );
                    if policy == ConflictPolicy::Reject {
                        return Err(ContractError::configuration(format!(
                            "classification conflict for {}: {}",
                            identity, message
                        )));
                    }
                    discovery.diagnostics.push(
                        Diagnostic::warning(DiagnosticCode::ClassificationConflict, message)
                            .with_subject(identity),
                    );
                }
                continue;
            }

            claimed.insert(id, (pattern.classification, pattern.pattern.as_str()));
            discovery.types.push(DiscoveredType {
                id,
                identity,
                classification: pattern.classification,
            });
        }
    }

    tracing::info!(
        "Discovered {} message types from {} patterns",
        discovery.types.len(),
        patterns.len()
    );

    Ok(discovery)
}

/// A public type that can exist on the wire
fn is_message_candidate(descriptor: &TypeDescriptor) -> bool {
    descriptor.is_public() && descriptor.kind.is_concrete()
}

fn match_target(catalog: &TypeCatalog, target: &PatternTarget) -> Vec<TypeId> {
    match target {
        PatternTarget::Recursive(namespace) => catalog
            .iter()
            .filter(|(_, t)| {
                is_message_candidate(t) && is_within_namespace(&t.namespace, namespace)
            })
            .map(|(id, _)| id)
            .collect(),
        PatternTarget::Exact(namespace) => catalog
            .iter()
            .filter(|(_, t)| is_message_candidate(t) && t.namespace == *namespace)
            .map(|(id, _)| id)
            .collect(),
        PatternTarget::Type(identity) => {
            let Some(base) = catalog.find(identity) else {
                return Vec::new();
            };
            let Some(descriptor) = catalog.get(base) else {
                return Vec::new();
            };

            if descriptor.kind.is_polymorphic() || catalog.has_subtypes(base) {
                catalog
                    .iter()
                    .filter(|(id, t)| {
                        *id != base
                            && is_message_candidate(t)
                            && catalog.is_assignable_to(*id, base)
                    })
                    .map(|(id, _)| id)
                    .collect()
            } else if descriptor.kind == TypeKind::Enum {
                Vec::new()
            } else {
                vec![base]
            }
        }
    }
}
