//! Node description data model
//!
//! Typed views over the JSON node definitions shipped by Conduit plugin
//! packages. Every attribute is optional and unknown attributes are ignored:
//! a malformed definition must degrade to "no schema contribution" (or a
//! skipped module), never to a hard failure inside the converter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One configurable field descriptor within a plugin node.
///
/// The `type` tag is an open set carried as a plain string; the converter
/// dispatches on it and degrades unrecognized tags gracefully instead of
/// rejecting them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyDefinition {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub required: Option<bool>,
    /// Conditional-visibility metadata; opaque to the converter, carried
    /// through to the fragment unchanged.
    pub display_options: Option<Value>,
    /// Tag-specific tuning: numeric bounds, editor hints, the
    /// multiple-values flag for grouped collections.
    pub type_options: Option<Map<String, Value>>,
    /// Ordered choice/sub-definition entries. Their meaning depends on the
    /// tag: enum choices, nested sub-definitions, or named groups carrying a
    /// `values` list.
    pub options: Option<Vec<Value>>,
    /// Declared input modes for locator-style widgets.
    pub modes: Option<Vec<Value>>,
}

impl PropertyDefinition {
    /// Tolerant conversion from a raw JSON entry. Anything that does not
    /// deserialize as a definition (a bare string in an `options` list, a
    /// wrongly typed attribute) is simply not a sub-definition.
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Look up a single `typeOptions` entry.
    pub fn type_option(&self, key: &str) -> Option<&Value> {
        self.type_options.as_ref().and_then(|opts| opts.get(key))
    }
}

/// `group` appears in the wild both as a single string and as a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupList {
    One(String),
    Many(Vec<String>),
}

impl GroupList {
    /// Normalized list form.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            GroupList::One(group) => vec![group.clone()],
            GroupList::Many(groups) => groups.clone(),
        }
    }
}

/// Full metadata and property list for one plugin node (one version).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeDescription {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub version: Option<i64>,
    pub group: Option<GroupList>,
    pub properties: Vec<PropertyDefinition>,

    // Pass-through metadata, copied into the document only when present.
    pub icon: Option<Value>,
    pub subtitle: Option<Value>,
    pub inputs: Option<Value>,
    pub outputs: Option<Value>,
    pub credentials: Option<Value>,
    pub webhook: Option<bool>,
}

impl NodeDescription {
    /// Group membership, normalized to a list.
    pub fn groups(&self) -> Vec<String> {
        self.group.as_ref().map(GroupList::to_vec).unwrap_or_default()
    }
}

/// Merge a version description over the shared base description of a
/// version container. Version fields override base fields; the properties
/// list always comes from the version, even when empty.
pub fn merge_descriptions(base: &NodeDescription, version: &NodeDescription) -> NodeDescription {
    NodeDescription {
        name: version.name.clone().or_else(|| base.name.clone()),
        display_name: version
            .display_name
            .clone()
            .or_else(|| base.display_name.clone()),
        description: version
            .description
            .clone()
            .or_else(|| base.description.clone()),
        version: version.version.or(base.version),
        group: version.group.clone().or_else(|| base.group.clone()),
        properties: version.properties.clone(),
        icon: version.icon.clone().or_else(|| base.icon.clone()),
        subtitle: version.subtitle.clone().or_else(|| base.subtitle.clone()),
        inputs: version.inputs.clone().or_else(|| base.inputs.clone()),
        outputs: version.outputs.clone().or_else(|| base.outputs.clone()),
        credentials: version
            .credentials
            .clone()
            .or_else(|| base.credentials.clone()),
        webhook: version.webhook.or(base.webhook),
    }
}
