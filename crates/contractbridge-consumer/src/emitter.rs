//! Contract emitter
//!
//! Turns the schema registry of a document into one source file per
//! namespace, leaving out every type a reference module already provides.

use crate::adapter::to_codegen_schema;
use crate::index::{ExternalTypeIndex, TypeInfo};
use crate::layout::SourceLayout;
use contractbridge_codegen::{DEFAULT_NAMESPACE, GeneratorOptions, Language};
use contractbridge_core::identity::join_identity;
use contractbridge_core::{
    ContractResult, Diagnostic, DiagnosticCode, Diagnostics, Document, SchemaNode,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSourceFile {
    pub file_name: String,
    pub namespace: String,
    pub content: String,
    /// Types declared in this file, in declaration order
    pub types: Vec<TypeInfo>,
}

impl GeneratedSourceFile {
    /// Write this file into an existing directory
    pub fn write_in(&self, dir: &Path) -> ContractResult<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.content)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }
}

/// Everything one `generate` call produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContractGenerationResult {
    pub files: Vec<GeneratedSourceFile>,
    pub external_types: Vec<TypeInfo>,
    pub generated_types: Vec<TypeInfo>,
    pub diagnostics: Diagnostics,
}

impl ContractGenerationResult {
    /// Write every file into `dir` and return the written paths
    pub fn write_to(&self, dir: &Path) -> ContractResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        self.files.iter().map(|file| file.write_in(dir)).collect()
    }

    pub fn file(&self, file_name: &str) -> Option<&GeneratedSourceFile> {
        self.files.iter().find(|f| f.file_name == file_name)
    }
}

/// Generates source files for the schemas of a document
pub struct ContractEmitter<'a> {
    index: &'a ExternalTypeIndex,
    language: Language,
    options: GeneratorOptions,
    layout: SourceLayout,
}

impl<'a> ContractEmitter<'a> {
    pub fn new(
        index: &'a ExternalTypeIndex,
        language: Language,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            index,
            language,
            options,
            layout: SourceLayout::new(language),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn generate(&self, document: &Document) -> ContractResult<ContractGenerationResult> {
        let mut result = ContractGenerationResult::default();
        let mut groups: BTreeMap<&str, Vec<(&str, &SchemaNode)>> = BTreeMap::new();

        for (name, node) in document.schemas() {
            let namespace = node.origin_namespace().unwrap_or_default();
            let identity = join_identity(namespace, name);
            match self.index.lookup(&identity) {
                Some(info) => {
                    tracing::debug!("{} is provided by {:?}", identity, info.origin_module);
                    result.external_types.push(info.clone());
                }
                None => {
                    result.generated_types.push(TypeInfo::generated(name, namespace));
                    groups.entry(namespace).or_default().push((name, node));
                }
            }
        }

        let document_namespaces: Vec<String> = document
            .namespaces()
            .iter()
            .map(|ns| effective_namespace(ns).to_string())
            .collect();
        let mut external_namespaces: Vec<String> = Vec::new();
        for info in &result.external_types {
            if !info.namespace.is_empty() && !external_namespaces.contains(&info.namespace) {
                external_namespaces.push(info.namespace.clone());
            }
        }

        for (namespace, schemas) in groups {
            let file = self.emit_file(
                effective_namespace(namespace),
                &schemas,
                &document_namespaces,
                &external_namespaces,
                &mut result.diagnostics,
            )?;
            result.files.push(file);
        }

        tracing::info!(
            "Generated {} types in {} files ({} external)",
            result.generated_types.len(),
            result.files.len(),
            result.external_types.len()
        );

        Ok(result)
    }

    fn emit_file(
        &self,
        namespace: &str,
        schemas: &[(&str, &SchemaNode)],
        document_namespaces: &[String],
        external_namespaces: &[String],
        diagnostics: &mut Diagnostics,
    ) -> ContractResult<GeneratedSourceFile> {
        let generator = self.language.generator();
        let options = self.options.clone().with_namespace(namespace);

        let mut symbols: Vec<&str> = generator.base_imports().to_vec();
        if options.generate_data_annotations {
            symbols.extend_from_slice(generator.annotation_imports());
        }
        let namespaces: Vec<String> = document_namespaces
            .iter()
            .chain(external_namespaces)
            .filter(|ns| ns.as_str() != namespace)
            .cloned()
            .collect();

        let mut bodies = Vec::with_capacity(schemas.len());
        let mut types = Vec::with_capacity(schemas.len());
        for (name, node) in schemas {
            let schema = to_codegen_schema(name, node)?;
            let unit = generator.generate(&schema, &options);
            let body = match self.layout.extract_type_body(&unit) {
                Some(body) => body,
                None => {
                    let identity = join_identity(node.origin_namespace().unwrap_or_default(), name);
                    tracing::warn!("No type declaration found for {}", identity);
                    diagnostics.push(
                        Diagnostic::warning(
                            DiagnosticCode::PlaceholderType,
                            format!("generated output for '{name}' had no type declaration"),
                        )
                        .with_subject(identity),
                    );
                    self.layout.placeholder(name)
                }
            };
            bodies.push(body);
            types.push(TypeInfo::generated(*name, node.origin_namespace().unwrap_or_default()));
        }

        let mut content = self.layout.header(&options);
        content.push_str(&self.layout.imports(&symbols, &namespaces));
        content.push('\n');
        content.push_str(&self.layout.open_namespace(namespace));
        content.push_str(&bodies.join("\n"));
        content.push_str(self.layout.close_namespace());

        Ok(GeneratedSourceFile {
            file_name: self.layout.file_name(namespace),
            namespace: namespace.to_string(),
            content,
            types,
        })
    }
}

fn effective_namespace(namespace: &str) -> &str {
    if namespace.is_empty() {
        DEFAULT_NAMESPACE
    } else {
        namespace
    }
}
