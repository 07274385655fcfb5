//! init command implementation
//!
//! Writes a starter contracts.toml with producer and consumer sections.

use crate::config::CONFIG_FILE;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONTRACTS_TOML: &str = include_str!("../templates/contracts.toml");

/// Placeholder values derived from the root namespace
struct TemplateContext {
    /// Document title (e.g., "Orders")
    title: String,
    /// File-name stem (e.g., "orders")
    name: String,
    /// Root namespace for the example patterns (e.g., "MyCompany.Orders")
    namespace: String,
}

impl TemplateContext {
    fn new(namespace: &str) -> Self {
        let title = namespace
            .rsplit('.')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or("Contracts")
            .to_string();
        Self {
            name: title.to_lowercase(),
            title,
            namespace: namespace.to_string(),
        }
    }

    fn apply(&self, template: &str) -> String {
        template
            .replace("{{title}}", &self.title)
            .replace("{{name}}", &self.name)
            .replace("{{namespace}}", &self.namespace)
    }
}

/// Run the init command
pub fn run(path: Option<PathBuf>, namespace: &str, force: bool) -> Result<()> {
    let dir = path.unwrap_or_else(|| PathBuf::from("."));
    let config_path = write_config(&dir, namespace, force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  Edit [producer] catalog and patterns");
    println!("  contractbridge check");
    println!("  contractbridge generate-spec");
    println!("  contractbridge generate-contracts");
    Ok(())
}

fn write_config(dir: &Path, namespace: &str, force: bool) -> Result<PathBuf> {
    let namespace = namespace.trim();
    if namespace.is_empty() {
        anyhow::bail!("Namespace must not be empty");
    }

    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite",
            config_path.display()
        );
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    let content = TemplateContext::new(namespace).apply(CONTRACTS_TOML);
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}
