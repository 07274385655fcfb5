//! Declarative discovery patterns

use contractbridge_core::{Classification, ContractError, ContractResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a pattern selects, before it is resolved against a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternTarget {
    /// `ns.**`: the namespace and everything below it
    Recursive(String),
    /// `ns.*`: the namespace only
    Exact(String),
    /// A type identity; polymorphic bases expand to their concrete subtypes
    Type(String),
}

impl PatternTarget {
    pub fn parse(pattern: &str) -> ContractResult<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(ContractError::configuration("discovery pattern is blank"));
        }
        if pattern.chars().any(char::is_whitespace) {
            return Err(invalid(pattern, "whitespace is not allowed"));
        }

        if let Some(body) = pattern.strip_suffix("**") {
            return Ok(PatternTarget::Recursive(wildcard_namespace(pattern, body)?));
        }
        if let Some(body) = pattern.strip_suffix('*') {
            return Ok(PatternTarget::Exact(wildcard_namespace(pattern, body)?));
        }

        check_segments(pattern, pattern)?;
        Ok(PatternTarget::Type(pattern.to_string()))
    }
}

/// Namespace in front of a trailing wildcard; empty for a bare `*` or `**`
fn wildcard_namespace(pattern: &str, body: &str) -> ContractResult<String> {
    if body.is_empty() {
        return Ok(String::new());
    }
    let namespace = body
        .strip_suffix('.')
        .ok_or_else(|| invalid(pattern, "wildcards must follow a '.'"))?;
    check_segments(pattern, namespace)?;
    Ok(namespace.to_string())
}

fn check_segments(pattern: &str, dotted: &str) -> ContractResult<()> {
    if dotted.contains('*') {
        return Err(invalid(pattern, "wildcards are only allowed at the end"));
    }
    if dotted.split('.').any(str::is_empty) {
        return Err(invalid(pattern, "empty namespace segment"));
    }
    Ok(())
}

fn invalid(pattern: &str, reason: &str) -> ContractError {
    ContractError::configuration(format!(
        "invalid discovery pattern '{}': {}",
        pattern, reason
    ))
}

impl fmt::Display for PatternTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTarget::Recursive(ns) if ns.is_empty() => f.write_str("**"),
            PatternTarget::Recursive(ns) => write!(f, "{}.**", ns),
            PatternTarget::Exact(ns) if ns.is_empty() => f.write_str("*"),
            PatternTarget::Exact(ns) => write!(f, "{}.*", ns),
            PatternTarget::Type(identity) => f.write_str(identity),
        }
    }
}

/// A pattern string tagged with the classification of what it matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryPattern {
    pub pattern: String,
    pub classification: Classification,
}

impl DiscoveryPattern {
    pub fn new(pattern: impl Into<String>, classification: Classification) -> Self {
        Self {
            pattern: pattern.into(),
            classification,
        }
    }

    pub fn event(pattern: impl Into<String>) -> Self {
        Self::new(pattern, Classification::Event)
    }

    pub fn command(pattern: impl Into<String>) -> Self {
        Self::new(pattern, Classification::Command)
    }

    pub fn target(&self) -> ContractResult<PatternTarget> {
        PatternTarget::parse(&self.pattern)
    }
}

impl fmt::Display for DiscoveryPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.pattern, self.classification)
    }
}

/// Parses `pattern=classification`; a bare pattern is an event pattern
impl FromStr for DiscoveryPattern {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pattern, classification) = match s.rsplit_once('=') {
            Some((pattern, classification)) => (pattern, classification.parse()?),
            None => (s, Classification::Event),
        };
        let pattern = DiscoveryPattern::new(pattern.trim(), classification);
        pattern.target()?;
        Ok(pattern)
    }
}

#[cfg(test)]
#[path = "pattern/pattern_tests.rs"]
mod pattern_tests;
