//! Schema document assembly
//!
//! Builds one complete, standalone JSON Schema document from a flat node
//! description. Version containers never reach this layer; traversal
//! resolves them first and passes the effective description together with
//! the version label destined for the document.

use serde_json::{json, Map, Value};

use crate::convert::convert_property;
use crate::descriptor::NodeDescription;

/// Draft identifier stamped into every generated document.
pub const SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// Assemble a complete schema document for one node description.
///
/// `version` is the label chosen by the caller (a version-container key, or
/// `None` for single-description exports). The emitted `x-conduit-version`
/// prefers the label, then the description's own version, then `1`, and is
/// numeric whenever the label parses as an integer.
pub fn assemble_document(description: &NodeDescription, version: Option<&str>) -> Value {
    let mut doc = Map::new();
    doc.insert("$schema".to_string(), json!(SCHEMA_DRAFT));

    let title = description
        .display_name
        .as_deref()
        .or(description.name.as_deref());
    if let Some(title) = title {
        doc.insert("title".to_string(), json!(title));
    }
    if let Some(text) = &description.description {
        doc.insert("description".to_string(), json!(text));
    }
    doc.insert("type".to_string(), json!("object"));

    if let Some(name) = &description.name {
        doc.insert("x-conduit-node".to_string(), json!(name));
    }
    doc.insert(
        "x-conduit-version".to_string(),
        version_value(description, version),
    );
    let groups = description.groups();
    if !groups.is_empty() {
        doc.insert("x-conduit-group".to_string(), json!(groups));
    }

    if let Some(icon) = &description.icon {
        doc.insert("x-conduit-icon".to_string(), icon.clone());
    }
    if let Some(subtitle) = &description.subtitle {
        doc.insert("x-conduit-subtitle".to_string(), subtitle.clone());
    }
    if let Some(inputs) = &description.inputs {
        doc.insert("x-conduit-inputs".to_string(), inputs.clone());
    }
    if let Some(outputs) = &description.outputs {
        doc.insert("x-conduit-outputs".to_string(), outputs.clone());
    }
    if let Some(credentials) = &description.credentials {
        doc.insert("x-conduit-credentials".to_string(), credentials.clone());
    }
    if let Some(webhook) = description.webhook {
        doc.insert("x-conduit-webhook".to_string(), json!(webhook));
    }

    let mut properties = Map::new();
    for prop in &description.properties {
        let name = match prop.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        if let Some(fragment) = convert_property(prop) {
            // Duplicate names replace the value but keep the original slot.
            properties.insert(name, Value::Object(fragment));
        }
    }
    doc.insert("properties".to_string(), Value::Object(properties));

    Value::Object(doc)
}

fn version_value(description: &NodeDescription, label: Option<&str>) -> Value {
    match label {
        Some(label) => match label.parse::<i64>() {
            Ok(number) => json!(number),
            Err(_) => json!(label),
        },
        None => json!(description.version.unwrap_or(1)),
    }
}
