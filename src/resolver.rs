//! Module resolution
//!
//! Plugin packages list their node modules in a manifest; a `ModuleResolver`
//! turns one module path into the node exports it provides. This is the seam
//! where a runtime would hook dynamic plugin loading; the shipped resolver
//! reads modules as JSON documents from disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::{merge_descriptions, NodeDescription};
use crate::error::{Result, SchemaGenError};

/// A plugin package manifest (`conduit.json`): package name plus the
/// module paths, relative to the manifest, that export nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub nodes: Vec<String>,
}

impl PackageManifest {
    /// Read and parse a package manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SchemaGenError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SchemaGenError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// One node export of a module: a plain description, or a version container
/// holding a shared base plus per-version descriptions.
#[derive(Debug, Clone)]
pub enum NodeExport {
    Single(NodeDescription),
    Versioned {
        base: NodeDescription,
        versions: BTreeMap<String, NodeDescription>,
    },
}

impl NodeExport {
    /// Flatten into (version label, effective description) pairs.
    ///
    /// Versioned exports merge each version over the base; the base alone
    /// never yields a document. Labels come back in the container's sorted
    /// order, so output is deterministic for identical input.
    pub fn resolve_versions(&self) -> Vec<(Option<String>, NodeDescription)> {
        match self {
            NodeExport::Single(description) => vec![(None, description.clone())],
            NodeExport::Versioned { base, versions } => versions
                .iter()
                .map(|(label, version)| (Some(label.clone()), merge_descriptions(base, version)))
                .collect(),
        }
    }
}

/// Produces the node exports of one module path.
pub trait ModuleResolver {
    fn resolve(&self, module_path: &Path) -> Result<Vec<NodeExport>>;
}

/// Resolves node modules as JSON documents on disk.
#[derive(Debug, Default)]
pub struct JsonModuleResolver;

impl ModuleResolver for JsonModuleResolver {
    fn resolve(&self, module_path: &Path) -> Result<Vec<NodeExport>> {
        let content = fs::read_to_string(module_path).map_err(|source| SchemaGenError::ModuleRead {
            path: module_path.to_path_buf(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&content).map_err(|source| SchemaGenError::ModuleParse {
                path: module_path.to_path_buf(),
                source,
            })?;
        Ok(exports_from_module(&document))
    }
}

/// Extract the node exports of one module document.
///
/// A module is either a single export at the top level (marked by a
/// `description` or `versions` key) or a mapping of export identifiers to
/// candidate exports. Candidates exposing neither marker are skipped.
pub fn exports_from_module(document: &Value) -> Vec<NodeExport> {
    let object = match document.as_object() {
        Some(object) => object,
        None => return Vec::new(),
    };

    if object.contains_key("description") || object.contains_key("versions") {
        return export_from_value(document).into_iter().collect();
    }

    object.values().filter_map(export_from_value).collect()
}

fn export_from_value(value: &Value) -> Option<NodeExport> {
    let object = value.as_object()?;

    if let Some(container) = object.get("versions").and_then(Value::as_object) {
        let base = object.get("description").and_then(parse_description);
        let mut versions = BTreeMap::new();
        for (label, candidate) in container {
            if let Some(description) = parse_description(candidate) {
                versions.insert(label.clone(), description);
            }
        }
        if !versions.is_empty() {
            return Some(NodeExport::Versioned {
                base: base.unwrap_or_default(),
                versions,
            });
        }
        // A container with no usable versions degrades to its base alone.
        return base.map(NodeExport::Single);
    }

    object
        .get("description")
        .and_then(parse_description)
        .map(NodeExport::Single)
}

fn parse_description(value: &Value) -> Option<NodeDescription> {
    serde_json::from_value(value.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_export_module() {
        let exports = exports_from_module(&json!({
            "description": {
                "name": "slack",
                "displayName": "Slack",
                "properties": [{ "name": "channel", "type": "string" }]
            }
        }));
        assert_eq!(exports.len(), 1);
        let resolved = exports[0].resolve_versions();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].0, None);
        assert_eq!(resolved[0].1.name.as_deref(), Some("slack"));
    }

    #[test]
    fn test_versioned_export_merges_base() {
        let exports = exports_from_module(&json!({
            "description": {
                "name": "slack",
                "displayName": "Slack",
                "description": "Send messages"
            },
            "versions": {
                "1": { "properties": [{ "name": "channel", "type": "string" }] },
                "2": {
                    "displayName": "Slack V2",
                    "properties": [{ "name": "channelId", "type": "string" }]
                }
            }
        }));
        assert_eq!(exports.len(), 1);

        let resolved = exports[0].resolve_versions();
        assert_eq!(resolved.len(), 2);

        let (label, v1) = &resolved[0];
        assert_eq!(label.as_deref(), Some("1"));
        assert_eq!(v1.display_name.as_deref(), Some("Slack"));
        assert_eq!(v1.properties[0].name.as_deref(), Some("channel"));

        let (label, v2) = &resolved[1];
        assert_eq!(label.as_deref(), Some("2"));
        assert_eq!(v2.display_name.as_deref(), Some("Slack V2"));
        assert_eq!(v2.description.as_deref(), Some("Send messages"));
    }

    #[test]
    fn test_export_map_skips_unmarked_candidates() {
        let exports = exports_from_module(&json!({
            "SlackNode": { "description": { "name": "slack", "properties": [] } },
            "helperConstant": 42,
            "unrelated": { "config": true },
            "JiraNode": { "description": { "name": "jira", "properties": [] } }
        }));
        assert_eq!(exports.len(), 2);
    }

    #[test]
    fn test_non_object_module_has_no_exports() {
        assert!(exports_from_module(&json!(["not", "a", "module"])).is_empty());
        assert!(exports_from_module(&json!("plain string")).is_empty());
    }

    #[test]
    fn test_empty_version_container_degrades_to_base() {
        let exports = exports_from_module(&json!({
            "description": { "name": "legacy", "properties": [] },
            "versions": {}
        }));
        assert_eq!(exports.len(), 1);
        assert!(matches!(exports[0], NodeExport::Single(_)));
    }

    #[test]
    fn test_manifest_defaults() {
        let manifest: PackageManifest = serde_json::from_value(json!({})).unwrap();
        assert!(manifest.name.is_none());
        assert!(manifest.nodes.is_empty());
    }
}
