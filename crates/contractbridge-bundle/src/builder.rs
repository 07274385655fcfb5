//! Bundle creation utilities.
//!
//! The [`BundleBuilder`] provides a fluent API for creating `.cbp` bundle archives.

use crate::{
    BundleError, BundleResult, CATALOG_FILE, DOCUMENT_DIR, MANIFEST_FILE, Manifest, SOURCES_DIR,
};
use contractbridge_catalog::TypeCatalog;
use contractbridge_core::{Document, DocumentFormat};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builder for creating contract bundles.
///
/// # Example
///
/// ```no_run
/// use contractbridge_bundle::{BundleBuilder, Manifest};
///
/// let manifest = Manifest::new("orders", "1.0.0");
/// let builder = BundleBuilder::new(manifest)
///     .add_document("contracts/orders.json")?
///     .add_source("generated/Orders.Events.generated.cs")?;
///
/// builder.write("orders-1.0.0.cbp")?;
/// # Ok::<(), contractbridge_bundle::BundleError>(())
/// ```
pub struct BundleBuilder {
    manifest: Manifest,
    files: Vec<BundleFile>,
}

/// A file to include in the bundle.
struct BundleFile {
    /// Path within the bundle archive.
    archive_path: String,
    contents: Vec<u8>,
}

impl BundleBuilder {
    /// Create a new bundle builder with the given manifest.
    #[must_use]
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            files: Vec::new(),
        }
    }

    /// Add the AsyncAPI document from a `.json`, `.yaml` or `.yml` file.
    ///
    /// The document is parsed and validated before it is accepted.
    pub fn add_document<P: AsRef<Path>>(self, document_path: P) -> BundleResult<Self> {
        let document_path = document_path.as_ref();

        let format = DocumentFormat::from_path(document_path).ok_or_else(|| {
            BundleError::InvalidManifest(format!(
                "Unsupported document format: {} (expected .json, .yaml or .yml)",
                document_path.display()
            ))
        })?;

        let contents = fs::read_to_string(document_path).map_err(|e| {
            BundleError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to read document {}: {}",
                    document_path.display(),
                    e
                ),
            ))
        })?;
        format.parse(&contents)?.validate()?;

        let file_name = file_name(document_path)?;
        Ok(self.put_document(&file_name, format, contents.into_bytes()))
    }

    /// Add an in-memory document, rendered in `format`.
    pub fn add_document_value(
        self,
        name: &str,
        document: &Document,
        format: DocumentFormat,
    ) -> BundleResult<Self> {
        document.validate()?;
        let contents = format.serialize(document)?;
        let file_name = format!("{}.{}", name, format.extension());
        Ok(self.put_document(&file_name, format, contents.into_bytes()))
    }

    fn put_document(mut self, file_name: &str, format: DocumentFormat, contents: Vec<u8>) -> Self {
        let archive_path = format!("{DOCUMENT_DIR}/{file_name}");
        let checksum = format!("sha256:{}", compute_sha256(&contents));

        self.files.retain(|f| f.archive_path != self.manifest.document.path);
        self.manifest.set_document(&archive_path, format, &checksum);
        self.files.push(BundleFile {
            archive_path,
            contents,
        });
        self
    }

    /// Add the producer's type catalog from a `.json` catalog file.
    pub fn add_catalog<P: AsRef<Path>>(self, catalog_path: P) -> BundleResult<Self> {
        let catalog = TypeCatalog::from_file(catalog_path.as_ref())?;
        self.add_catalog_value(&catalog)
    }

    /// Add an in-memory type catalog.
    pub fn add_catalog_value(mut self, catalog: &TypeCatalog) -> BundleResult<Self> {
        let contents = catalog.to_json()?.into_bytes();
        let checksum = format!("sha256:{}", compute_sha256(&contents));

        self.manifest.set_catalog(CATALOG_FILE, &checksum);
        self.files.retain(|f| f.archive_path != CATALOG_FILE);
        self.files.push(BundleFile {
            archive_path: CATALOG_FILE.to_string(),
            contents,
        });

        Ok(self)
    }

    /// Add a generated source file.
    ///
    /// Sources are stored in the `src/` directory; the language is detected
    /// from the file extension.
    pub fn add_source<P: AsRef<Path>>(mut self, source_path: P) -> BundleResult<Self> {
        let source_path = source_path.as_ref();

        let contents = fs::read(source_path).map_err(|e| {
            BundleError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read source file {}: {}", source_path.display(), e),
            ))
        })?;

        let name = file_name(source_path)?;
        let archive_path = format!("{SOURCES_DIR}/{name}");
        let checksum = format!("sha256:{}", compute_sha256(&contents));

        self.manifest
            .add_source(&name, &archive_path, detect_language(&name), &checksum);
        self.files.push(BundleFile {
            archive_path,
            contents,
        });

        Ok(self)
    }

    /// Write the bundle to a file.
    pub fn write<P: AsRef<Path>>(self, output_path: P) -> BundleResult<()> {
        let output_path = output_path.as_ref();

        self.manifest.validate()?;

        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(output_path)?;
        let mut zip = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let manifest_json = self.manifest.to_json()?;
        zip.start_file(MANIFEST_FILE, options)?;
        zip.write_all(manifest_json.as_bytes())?;

        for bundle_file in &self.files {
            zip.start_file(&bundle_file.archive_path, options)?;
            zip.write_all(&bundle_file.contents)?;
        }

        zip.finish()?;

        tracing::info!(
            "Wrote bundle {} ({} files)",
            output_path.display(),
            self.files.len() + 1
        );

        Ok(())
    }

    /// Get the current manifest (for inspection).
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Get a mutable reference to the manifest (for modification).
    pub fn manifest_mut(&mut self) -> &mut Manifest {
        &mut self.manifest
    }
}

/// Compute SHA256 hash of data and return as hex string.
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Verify SHA256 checksum of data.
///
/// Accepts both `sha256:xxx` and raw `xxx` forms.
pub fn verify_sha256(data: &[u8], expected: &str) -> bool {
    let expected_hex = expected.strip_prefix("sha256:").unwrap_or(expected);
    compute_sha256(data) == expected_hex
}

fn detect_language(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("cs") => "csharp",
        Some("kt") | Some("kts") => "kotlin",
        _ => "text",
    }
}

fn file_name(path: &Path) -> BundleResult<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            BundleError::InvalidManifest(format!("Invalid file path: {}", path.display()))
        })
}
