//! Plugin traversal
//!
//! Walks package manifests, resolves node modules, flattens version
//! containers, and writes one schema document per (node, version) pair.
//! Module failures are contained and reported; only output-directory
//! creation aborts a run.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::checksum::Checksum;
use crate::descriptor::NodeDescription;
use crate::document::assemble_document;
use crate::error::{Result, SchemaGenError};
use crate::report::{DocumentRecord, GenerateReport, ModuleFailure, OutputManifest, PackageReport};
use crate::resolver::{ModuleResolver, PackageManifest};
use crate::sanitize::sanitize_name;

/// File name of the run summary written into the output directory.
pub const OUTPUT_MANIFEST: &str = "manifest.json";

/// Drives generation: resolves modules, assembles documents, writes files.
pub struct Generator {
    output_dir: PathBuf,
    resolver: Box<dyn ModuleResolver>,
    dry_run: bool,
}

impl Generator {
    /// Create a generator writing into `output_dir`.
    ///
    /// The output directory is created up front; failure here is the only
    /// fatal error in a run.
    pub fn new(output_dir: impl Into<PathBuf>, resolver: Box<dyn ModuleResolver>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| SchemaGenError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self {
            output_dir,
            resolver,
            dry_run: false,
        })
    }

    /// Create a generator that resolves and reports but writes nothing.
    pub fn dry_run(output_dir: impl Into<PathBuf>, resolver: Box<dyn ModuleResolver>) -> Self {
        Self {
            output_dir: output_dir.into(),
            resolver,
            dry_run: true,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generate documents for every module of one package manifest.
    ///
    /// A manifest that cannot be read or parsed yields a report carrying the
    /// error and zero documents; the run moves on to the next package.
    pub fn generate_package(&self, manifest_path: &Path) -> PackageReport {
        let manifest = match PackageManifest::load(manifest_path) {
            Ok(manifest) => manifest,
            Err(error) => {
                warn!("skipping package {}: {}", manifest_path.display(), error);
                let mut report = PackageReport::new(manifest_path.display().to_string());
                report.manifest_error = Some(error.to_string());
                return report;
            }
        };

        let package_name = manifest
            .name
            .clone()
            .unwrap_or_else(|| manifest_path.display().to_string());
        let mut report = PackageReport::new(package_name);
        let package_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));

        for module in &manifest.nodes {
            let module_path = package_dir.join(module);
            if let Err(error) = self.generate_module(&module_path, &mut report) {
                debug!("module {} failed: {}", module_path.display(), error);
                report.failures.push(ModuleFailure {
                    module: module.clone(),
                    cause: error.to_string(),
                });
            }
        }

        report
    }

    /// Generate documents for a set of package manifests, then write the
    /// output manifest summarizing the run.
    pub fn generate_all(&self, manifest_paths: &[PathBuf]) -> Result<GenerateReport> {
        let mut report = GenerateReport::default();
        for manifest_path in manifest_paths {
            report.packages.push(self.generate_package(manifest_path));
        }

        if !self.dry_run {
            let manifest = OutputManifest::from_report(&report);
            let mut content = serde_json::to_string_pretty(&manifest)?;
            content.push('\n');
            fs::write(self.output_dir.join(OUTPUT_MANIFEST), content)?;
        }

        Ok(report)
    }

    fn generate_module(&self, module_path: &Path, report: &mut PackageReport) -> Result<()> {
        for export in self.resolver.resolve(module_path)? {
            let resolved = export.resolve_versions();
            // The version suffix appears only when one export fans out into
            // several documents.
            let suffixed = resolved.len() > 1;
            for (label, description) in resolved {
                let record = self.write_document(&description, label.as_deref(), suffixed)?;
                report.documents.push(record);
            }
        }
        Ok(())
    }

    fn write_document(
        &self,
        description: &NodeDescription,
        label: Option<&str>,
        suffixed: bool,
    ) -> Result<DocumentRecord> {
        let document = assemble_document(description, label);
        let mut rendered = serde_json::to_string_pretty(&document)?;
        rendered.push('\n');

        let base = sanitize_name(
            description
                .display_name
                .as_deref()
                .or(description.name.as_deref()),
        );
        let file_name = match (label, suffixed) {
            (Some(label), true) => format!("{}_v{}.json", base, label),
            _ => format!("{}.json", base),
        };

        if !self.dry_run {
            fs::write(self.output_dir.join(&file_name), rendered.as_bytes())?;
        }

        Ok(DocumentRecord {
            node: description.name.clone().unwrap_or_else(|| base.clone()),
            version: document
                .get("x-conduit-version")
                .cloned()
                .unwrap_or(Value::Null),
            file: file_name,
            checksum: Checksum::from_bytes(rendered.as_bytes()),
        })
    }
}

/// Scan `root` for package manifest files named `file_name`.
///
/// Paths whose location relative to `root` starts with one of
/// `skip_prefixes` are ignored. Matches come back sorted so repeated runs
/// process packages in the same order.
pub fn discover_manifests(root: &Path, file_name: &str, skip_prefixes: &[String]) -> Vec<PathBuf> {
    let mut manifests = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.file_name().map(|name| name != file_name).unwrap_or(true) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative_str = relative.to_string_lossy();
        if skip_prefixes.iter().any(|p| relative_str.starts_with(p.as_str())) {
            continue;
        }

        manifests.push(path.to_path_buf());
    }
    manifests.sort();
    manifests
}
