//! Bundle loading utilities.
//!
//! The [`BundleLoader`] opens `.cbp` bundles, verifies their checksums and
//! reads the contract back out.

use crate::builder::{compute_sha256, verify_sha256};
use crate::{BundleError, BundleResult, MANIFEST_FILE, Manifest};
use contractbridge_catalog::TypeCatalog;
use contractbridge_core::Document;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Loader for contract bundles.
///
/// Every checksummed file is verified when the bundle is opened and again
/// whenever it is read.
///
/// # Example
///
/// ```no_run
/// use contractbridge_bundle::BundleLoader;
///
/// let mut loader = BundleLoader::open("orders-1.0.0.cbp")?;
/// let document = loader.read_document()?;
/// println!("{} {}", document.info.title, document.info.version);
/// # Ok::<(), contractbridge_bundle::BundleError>(())
/// ```
#[derive(Debug)]
pub struct BundleLoader {
    archive: ZipArchive<File>,
    manifest: Manifest,
}

impl BundleLoader {
    /// Open a bundle file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> BundleResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;

        let manifest = {
            let mut manifest_file = archive.by_name(MANIFEST_FILE).map_err(|_| {
                BundleError::MissingFile(format!("{MANIFEST_FILE} not found in bundle"))
            })?;

            let mut manifest_json = String::new();
            manifest_file.read_to_string(&mut manifest_json)?;
            Manifest::from_json(&manifest_json)?
        };

        manifest.validate()?;

        let mut loader = Self { archive, manifest };
        let expected: Vec<(String, String)> = loader
            .manifest
            .checksummed_files()
            .into_iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect();
        for (archive_path, checksum) in &expected {
            loader.read_verified(archive_path, checksum)?;
        }

        tracing::debug!(
            "Opened bundle {} ({} {})",
            path.display(),
            loader.manifest.contract.name,
            loader.manifest.contract.version
        );

        Ok(loader)
    }

    /// Get the bundle manifest.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Read and parse the bundled document.
    pub fn read_document(&mut self) -> BundleResult<Document> {
        let info = self.manifest.document.clone();
        let contents = self.read_verified(&info.path, &info.checksum)?;
        let text = String::from_utf8(contents).map_err(|e| {
            BundleError::InvalidManifest(format!("{} is not valid UTF-8: {}", info.path, e))
        })?;
        Ok(info.format.parse(&text)?)
    }

    /// Read the bundled type catalog, if the bundle has one.
    pub fn read_catalog(&mut self) -> BundleResult<Option<TypeCatalog>> {
        let Some(info) = self.manifest.catalog.clone() else {
            return Ok(None);
        };
        let contents = self.read_verified(&info.path, &info.checksum)?;
        let text = String::from_utf8_lossy(&contents);
        Ok(Some(TypeCatalog::from_json(&text)?))
    }

    /// Extract all generated sources into `output_dir`.
    ///
    /// Returns the written paths in file-name order.
    pub fn extract_sources<P: AsRef<Path>>(&mut self, output_dir: P) -> BundleResult<Vec<PathBuf>> {
        let output_dir = output_dir.as_ref();
        let sources = self.manifest.sources.clone();

        if !sources.is_empty() {
            fs::create_dir_all(output_dir)?;
        }

        let mut written = Vec::with_capacity(sources.len());
        for (name, info) in &sources {
            let contents = self.read_verified(&info.path, &info.checksum)?;
            let file_name = Path::new(name).file_name().ok_or_else(|| {
                BundleError::InvalidManifest(format!("Invalid source name: {name}"))
            })?;
            let output_path = output_dir.join(file_name);
            fs::write(&output_path, &contents)?;
            written.push(output_path);
        }

        Ok(written)
    }

    /// Read a file from the bundle as bytes.
    pub fn read_file(&mut self, path: &str) -> BundleResult<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|_| BundleError::MissingFile(format!("File not found in bundle: {path}")))?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// List all files in the bundle.
    #[must_use]
    pub fn list_files(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i).map(String::from))
            .collect()
    }

    /// Check if a file exists in the bundle.
    #[must_use]
    pub fn has_file(&self, path: &str) -> bool {
        self.archive.index_for_name(path).is_some()
    }

    fn read_verified(&mut self, path: &str, expected: &str) -> BundleResult<Vec<u8>> {
        let contents = self.read_file(path)?;
        if !verify_sha256(&contents, expected) {
            return Err(BundleError::ChecksumMismatch {
                path: path.to_string(),
                expected: expected.to_string(),
                actual: format!("sha256:{}", compute_sha256(&contents)),
            });
        }
        Ok(contents)
    }
}
