//! Batch generation over many input documents
//!
//! Inputs are processed one at a time, in order. The first failing input
//! stops the batch; files written for earlier inputs stay on disk. An input
//! whose output would replace a file written earlier in the batch with
//! different content fails before anything of it is written.

use crate::emitter::{ContractEmitter, ContractGenerationResult, GeneratedSourceFile};
use contractbridge_bundle::{BUNDLE_EXTENSION, BundleError, BundleLoader};
use contractbridge_core::{ContractError, ContractResult, Diagnostics, Document, read_document};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// What one input produced
#[derive(Debug, Clone)]
pub struct ArtifactReport {
    pub input: PathBuf,
    pub written: Vec<PathBuf>,
    pub result: ContractGenerationResult,
}

/// Outcome of a whole batch
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub artifacts: Vec<ArtifactReport>,
}

impl BatchReport {
    /// Every written path, in processing order
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.artifacts.iter().flat_map(|a| a.written.iter())
    }

    /// Input that first produced `file_name`, with that file
    fn claimed(&self, file_name: &str) -> Option<(&Path, &GeneratedSourceFile)> {
        self.artifacts.iter().find_map(|artifact| {
            artifact
                .result
                .files
                .iter()
                .find(|file| file.file_name == file_name)
                .map(|file| (artifact.input.as_path(), file))
        })
    }

    /// Diagnostics of all artifacts, in processing order
    pub fn diagnostics(&self) -> Diagnostics {
        let mut all = Diagnostics::new();
        for artifact in &self.artifacts {
            all.extend(artifact.result.diagnostics.clone());
        }
        all
    }
}

/// Runs an emitter over a list of document files
pub struct ContractBatch<'a> {
    emitter: ContractEmitter<'a>,
    output_dir: PathBuf,
}

impl<'a> ContractBatch<'a> {
    pub fn new(emitter: ContractEmitter<'a>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            emitter,
            output_dir: output_dir.into(),
        }
    }

    /// Process `inputs` in order
    ///
    /// `cancel` is checked before each input; once set, the batch returns
    /// [`ContractError::Cancelled`].
    pub fn run<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        cancel: Option<&AtomicBool>,
    ) -> ContractResult<BatchReport> {
        let mut report = BatchReport::default();
        self.run_into(inputs, cancel, &mut report)?;
        Ok(report)
    }

    /// Like [`run`](Self::run), recording each finished input in `report`
    ///
    /// On failure `report` still holds every input completed before it.
    pub fn run_into<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        cancel: Option<&AtomicBool>,
        report: &mut BatchReport,
    ) -> ContractResult<()> {
        if inputs.is_empty() {
            return Err(ContractError::configuration("no input documents given"));
        }

        for input in inputs {
            if cancel.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
                tracing::warn!(
                    "Cancelled after {} of {} inputs",
                    report.artifacts.len(),
                    inputs.len()
                );
                return Err(ContractError::Cancelled);
            }

            let input = input.as_ref();
            let artifact = self
                .process(input, report)
                .map_err(|e| ContractError::for_artifact(input.display().to_string(), e))?;
            report.artifacts.push(artifact);
        }

        Ok(())
    }

    fn process(&self, input: &Path, earlier: &BatchReport) -> ContractResult<ArtifactReport> {
        tracing::info!("Generating contracts from {}", input.display());

        let document = load_input(input)?;
        document.validate()?;

        let result = self.emitter.generate(&document)?;

        // Files already produced with the same content are not written again
        let mut fresh = Vec::with_capacity(result.files.len());
        for file in &result.files {
            match earlier.claimed(&file.file_name) {
                Some((owner, previous)) if previous.content == file.content => {
                    tracing::debug!(
                        "{} unchanged from {}",
                        file.file_name,
                        owner.display()
                    );
                }
                Some((owner, _)) => {
                    return Err(ContractError::configuration(format!(
                        "'{}' was already generated from '{}' with different content; \
                         inputs sharing a namespace must be generated into separate directories",
                        file.file_name,
                        owner.display()
                    )));
                }
                None => fresh.push(file),
            }
        }

        std::fs::create_dir_all(&self.output_dir)?;
        let written = fresh
            .into_iter()
            .map(|file| file.write_in(&self.output_dir))
            .collect::<ContractResult<Vec<_>>>()?;

        Ok(ArtifactReport {
            input: input.to_path_buf(),
            written,
            result,
        })
    }
}

/// Read a document from a `.json`, `.yaml`, `.yml` or `.cbp` file
pub fn load_input(path: &Path) -> ContractResult<Document> {
    let is_bundle = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(BUNDLE_EXTENSION));

    if is_bundle {
        let mut loader = BundleLoader::open(path).map_err(bundle_error)?;
        return loader.read_document().map_err(bundle_error);
    }

    read_document(path)
}

fn bundle_error(error: BundleError) -> ContractError {
    match error {
        BundleError::Document(inner) => inner,
        BundleError::Io(inner) => ContractError::Io(inner),
        other => ContractError::InvalidDocument(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::index::ExternalTypeIndex;
    use contractbridge_codegen::{GeneratorOptions, Language};
    use contractbridge_core::{DocumentFormat, write_document};
    use tempfile::TempDir;

    fn emitter(index: &ExternalTypeIndex) -> ContractEmitter<'_> {
        ContractEmitter::new(index, Language::CSharp, GeneratorOptions::default())
    }

    #[test]
    fn ContractBatch___no_inputs___configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let index = ExternalTypeIndex::new();
        let batch = ContractBatch::new(emitter(&index), temp_dir.path());

        let err = batch.run::<PathBuf>(&[], None).unwrap_err();

        assert!(err.is_configuration());
    }

    #[test]
    fn ContractBatch___cancelled_before_start___nothing_written() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("orders.json");
        write_document(&Document::new("Orders", "1.0.0"), &input, DocumentFormat::Json).unwrap();
        let index = ExternalTypeIndex::new();
        let out = temp_dir.path().join("out");
        let batch = ContractBatch::new(emitter(&index), &out);
        let cancel = AtomicBool::new(true);

        let err = batch.run(&[input], Some(&cancel)).unwrap_err();

        assert!(matches!(err, ContractError::Cancelled));
        assert!(!out.exists());
    }

    #[test]
    fn ContractBatch___second_input_unparseable___error_names_file_first_kept() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.yaml");
        let mut document = Document::new("Orders", "1.0.0");
        document.components.schemas.insert(
            "Ping".to_string(),
            contractbridge_core::MultiFormatSchema::new(contractbridge_core::SchemaNode::object(
                Vec::new(),
                Vec::new(),
            )),
        );
        write_document(&document, &good, DocumentFormat::Yaml).unwrap();
        let bad = temp_dir.path().join("bad.json");
        std::fs::write(&bad, "{ this is not json").unwrap();
        let index = ExternalTypeIndex::new();
        let out = temp_dir.path().join("out");
        let batch = ContractBatch::new(emitter(&index), &out);

        let err = batch.run(&[good, bad], None).unwrap_err();

        assert!(matches!(err, ContractError::Artifact { .. }));
        assert!(err.to_string().contains("bad.json"));
        assert!(out.join("Contracts.generated.cs").exists());
    }

    fn events_document(schema: &str) -> Document {
        let mut document = Document::new("Orders", "1.0.0");
        document.components.schemas.insert(
            schema.to_string(),
            contractbridge_core::MultiFormatSchema::new(
                contractbridge_core::SchemaNode::object(Vec::new(), Vec::new())
                    .with_origin("Shop.Events", &format!("Shop.Events.{schema}")),
            ),
        );
        document
    }

    #[test]
    fn ContractBatch___shared_namespace_different_content___error_first_kept() {
        let temp_dir = TempDir::new().unwrap();
        let created = temp_dir.path().join("created.json");
        write_document(&events_document("OrderCreated"), &created, DocumentFormat::Json).unwrap();
        let shipped = temp_dir.path().join("shipped.json");
        write_document(&events_document("OrderShipped"), &shipped, DocumentFormat::Json).unwrap();
        let index = ExternalTypeIndex::new();
        let out = temp_dir.path().join("out");
        let batch = ContractBatch::new(emitter(&index), &out);
        let mut report = BatchReport::default();

        let err = batch
            .run_into(&[created, shipped], None, &mut report)
            .unwrap_err();

        assert!(err.is_configuration());
        let message = err.to_string();
        assert!(message.contains("shipped.json"));
        assert!(message.contains("Shop.Events.generated.cs"));
        let content = std::fs::read_to_string(out.join("Shop.Events.generated.cs")).unwrap();
        assert!(content.contains("OrderCreated"));
        assert!(!content.contains("OrderShipped"));
        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.written().count(), 1);
    }

    #[test]
    fn ContractBatch___same_document_twice___written_once() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first.json");
        write_document(&events_document("OrderCreated"), &first, DocumentFormat::Json).unwrap();
        let second = temp_dir.path().join("second.yaml");
        write_document(&events_document("OrderCreated"), &second, DocumentFormat::Yaml).unwrap();
        let index = ExternalTypeIndex::new();
        let batch = ContractBatch::new(emitter(&index), temp_dir.path().join("out"));

        let report = batch.run(&[first, second], None).unwrap();

        let written: Vec<_> = report.written().collect();
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("Shop.Events.generated.cs"));
    }

    #[test]
    fn ContractBatch___run_into___keeps_finished_artifacts_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.json");
        write_document(&events_document("OrderCreated"), &good, DocumentFormat::Json).unwrap();
        let missing = temp_dir.path().join("missing.json");
        let index = ExternalTypeIndex::new();
        let batch = ContractBatch::new(emitter(&index), temp_dir.path().join("out"));
        let mut report = BatchReport::default();

        let err = batch.run_into(&[good.clone(), missing], None, &mut report).unwrap_err();

        assert!(err.to_string().contains("missing.json"));
        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.artifacts[0].input, good);
        assert_eq!(report.artifacts[0].written.len(), 1);
    }

    #[test]
    fn load_input___unknown_extension___invalid_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("orders.txt");
        std::fs::write(&path, "{}").unwrap();

        assert!(matches!(load_input(&path), Err(ContractError::InvalidDocument(_))));
    }
}
