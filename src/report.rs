//! Generation reporting
//!
//! Accumulates what a run produced: per-package document records, contained
//! module failures with their causes, and the output manifest written next
//! to the documents so consumers can verify what they got.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checksum::Checksum;

/// One generated document, as recorded in the output manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Node name the document was generated from
    pub node: String,
    /// Version carried in the document (numeric when the label was numeric)
    pub version: Value,
    /// File name inside the output directory
    pub file: String,
    /// SHA256 checksum of the file as written
    pub checksum: Checksum,
}

/// A module that failed to resolve or write, with the rendered cause.
#[derive(Debug, Clone)]
pub struct ModuleFailure {
    pub module: String,
    pub cause: String,
}

/// Outcome of one package manifest.
#[derive(Debug, Clone, Default)]
pub struct PackageReport {
    /// Package name, or the manifest path when the manifest names nothing
    pub package: String,
    /// Documents generated from this package, in generation order
    pub documents: Vec<DocumentRecord>,
    /// Modules that failed; the rest of the package still generated
    pub failures: Vec<ModuleFailure>,
    /// Set when the manifest itself could not be read or parsed
    pub manifest_error: Option<String>,
}

impl PackageReport {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }
}

/// Aggregate outcome of a whole run.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub packages: Vec<PackageReport>,
}

impl GenerateReport {
    pub fn total_generated(&self) -> usize {
        self.packages.iter().map(|p| p.documents.len()).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.packages.iter().map(|p| p.failures.len()).sum()
    }

    /// True when any module failed or any manifest was unusable.
    pub fn has_failures(&self) -> bool {
        self.total_failed() > 0 || self.packages.iter().any(|p| p.manifest_error.is_some())
    }

    /// All document records across packages, in generation order.
    pub fn records(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.packages.iter().flat_map(|p| p.documents.iter())
    }
}

/// Summary written as `manifest.json` beside the generated documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputManifest {
    /// Generator name and crate version
    pub generator: String,
    /// When the run finished
    pub generated_at: DateTime<Utc>,
    /// Documents produced, in generation order
    pub documents: Vec<DocumentRecord>,
    pub total_generated: usize,
    pub total_failed: usize,
}

impl OutputManifest {
    /// Build the manifest for a finished run.
    pub fn from_report(report: &GenerateReport) -> Self {
        Self {
            generator: format!("conduit-schemas {}", env!("CARGO_PKG_VERSION")),
            generated_at: Utc::now(),
            documents: report.records().cloned().collect(),
            total_generated: report.total_generated(),
            total_failed: report.total_failed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(node: &str, file: &str) -> DocumentRecord {
        DocumentRecord {
            node: node.to_string(),
            version: json!(1),
            file: file.to_string(),
            checksum: Checksum::from_bytes(file.as_bytes()),
        }
    }

    #[test]
    fn test_report_totals() {
        let mut report = GenerateReport::default();

        let mut healthy = PackageReport::new("conduit-nodes-base");
        healthy.documents.push(record("slack", "Slack.json"));
        healthy.documents.push(record("jira", "Jira.json"));
        report.packages.push(healthy);

        let mut flaky = PackageReport::new("conduit-nodes-extra");
        flaky.documents.push(record("sheets", "Sheets.json"));
        flaky.failures.push(ModuleFailure {
            module: "nodes/broken.node.json".to_string(),
            cause: "unreadable".to_string(),
        });
        report.packages.push(flaky);

        assert_eq!(report.total_generated(), 3);
        assert_eq!(report.total_failed(), 1);
        assert!(report.has_failures());
        assert_eq!(report.records().count(), 3);
    }

    #[test]
    fn test_manifest_error_counts_as_failure() {
        let mut report = GenerateReport::default();
        let mut package = PackageReport::new("broken/conduit.json");
        package.manifest_error = Some("no such file".to_string());
        report.packages.push(package);

        assert_eq!(report.total_generated(), 0);
        assert_eq!(report.total_failed(), 0);
        assert!(report.has_failures());
    }

    #[test]
    fn test_output_manifest_from_report() {
        let mut report = GenerateReport::default();
        let mut package = PackageReport::new("conduit-nodes-base");
        package.documents.push(record("slack", "Slack.json"));
        report.packages.push(package);

        let manifest = OutputManifest::from_report(&report);
        assert_eq!(manifest.total_generated, 1);
        assert_eq!(manifest.total_failed, 0);
        assert_eq!(manifest.documents.len(), 1);
        assert!(manifest.generator.starts_with("conduit-schemas "));
    }
}
