//! Fully-qualified type identity helpers
//!
//! An identity is `{namespace}.{simpleName}`, or the bare simple name when the
//! namespace is empty. Namespaces are dot-separated.

/// Split an identity into `(namespace, simple name)`
pub fn split_identity(identity: &str) -> (&str, &str) {
    match identity.rsplit_once('.') {
        Some((namespace, name)) => (namespace, name),
        None => ("", identity),
    }
}

/// Join a namespace and simple name into an identity
pub fn join_identity(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}

/// Whether `namespace` equals `root` or is nested below it
pub fn is_within_namespace(namespace: &str, root: &str) -> bool {
    if root.is_empty() {
        return true;
    }
    namespace == root
        || (namespace.len() > root.len()
            && namespace.starts_with(root)
            && namespace.as_bytes()[root.len()] == b'.')
}
