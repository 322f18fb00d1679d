//! Property conversion
//!
//! The heart of the generator: maps one property definition onto one JSON
//! Schema fragment. Dispatch is keyed on the open `type` tag set with an
//! explicit default arm, so new Conduit property types degrade to a string
//! fragment carrying the original tag as a vendor key instead of breaking
//! generation.
//!
//! Key constraints:
//! - Conversion is a pure function of its input; nothing is retained.
//! - Malformed definitions (no `name`, `notice` type) contribute nothing.
//! - Every fragment carries at most one standard `type`, or a `oneOf` for
//!   the inherently polymorphic `json` tag.

use serde_json::{json, Map, Value};

use crate::descriptor::PropertyDefinition;

// =============================================================================
// Public API
// =============================================================================

/// Convert one property definition into a JSON Schema fragment.
///
/// Returns `None` for definitions that contribute nothing: a missing or
/// empty `name`, or the purely informational `notice` type. That is a
/// defined no-op, not an error.
pub fn convert_property(prop: &PropertyDefinition) -> Option<Map<String, Value>> {
    match prop.name.as_deref() {
        Some(name) if !name.is_empty() => {}
        _ => return None,
    }
    if prop.kind.as_deref() == Some("notice") {
        return None;
    }

    let mut schema = Map::new();
    apply_common_fields(&mut schema, prop);

    match prop.kind.as_deref() {
        Some("string") | Some("hidden") => convert_string(&mut schema, prop),
        Some("number") => convert_number(&mut schema, prop),
        Some("boolean") => {
            schema.insert("type".to_string(), json!("boolean"));
        }
        Some("options") => convert_options(&mut schema, prop),
        Some("multiOptions") => convert_multi_options(&mut schema, prop),
        Some("collection") => convert_collection(&mut schema, prop),
        Some("fixedCollection") => convert_fixed_collection(&mut schema, prop),
        Some("json") => {
            // Runtime values arrive pre-serialized or already structured.
            schema.insert(
                "oneOf".to_string(),
                json!([{ "type": "string" }, { "type": "object" }, { "type": "array" }]),
            );
        }
        Some("dateTime") => {
            schema.insert("type".to_string(), json!("string"));
            schema.insert("format".to_string(), json!("date-time"));
        }
        Some("color") => convert_color(&mut schema),
        Some("resourceLocator") => convert_resource_locator(&mut schema, prop),
        Some("filter") => convert_filter(&mut schema),
        Some("credentialsSelect") => convert_credentials_select(&mut schema),
        Some("assignmentCollection") => convert_assignment_collection(&mut schema),
        Some(other) => {
            schema.insert("type".to_string(), json!("string"));
            schema.insert("x-conduit-type".to_string(), json!(other));
        }
        None => {
            schema.insert("type".to_string(), json!("string"));
        }
    }

    Some(schema)
}

// =============================================================================
// Common Fields
// =============================================================================

fn apply_common_fields(schema: &mut Map<String, Value>, prop: &PropertyDefinition) {
    if let Some(display_name) = &prop.display_name {
        schema.insert("title".to_string(), json!(display_name));
    }
    if let Some(description) = &prop.description {
        schema.insert("description".to_string(), json!(description));
    }
    if let Some(default) = &prop.default {
        schema.insert("default".to_string(), default.clone());
    }
    if let Some(display_options) = &prop.display_options {
        schema.insert("x-conduit-display-options".to_string(), display_options.clone());
    }
    if prop.required == Some(true) {
        schema.insert("x-conduit-required".to_string(), json!(true));
    }
}

// =============================================================================
// Scalar Fragments
// =============================================================================

fn convert_string(schema: &mut Map<String, Value>, prop: &PropertyDefinition) {
    schema.insert("type".to_string(), json!("string"));
    if prop.type_option("password").and_then(Value::as_bool) == Some(true) {
        schema.insert("format".to_string(), json!("password"));
    }
    if let Some(rows) = prop.type_option("rows") {
        schema.insert("x-conduit-rows".to_string(), rows.clone());
    }
    if let Some(editor) = prop.type_option("editor") {
        schema.insert("x-conduit-editor".to_string(), editor.clone());
    }
}

fn convert_number(schema: &mut Map<String, Value>, prop: &PropertyDefinition) {
    schema.insert("type".to_string(), json!("number"));
    if let Some(min) = prop.type_option("minValue") {
        schema.insert("minimum".to_string(), min.clone());
    }
    if let Some(max) = prop.type_option("maxValue") {
        schema.insert("maximum".to_string(), max.clone());
    }
    if let Some(step) = prop.type_option("numberStepSize") {
        schema.insert("multipleOf".to_string(), step.clone());
    }
    if let Some(precision) = prop.type_option("numberPrecision") {
        schema.insert("x-conduit-number-precision".to_string(), precision.clone());
    }
}

fn convert_color(schema: &mut Map<String, Value>) {
    schema.insert("type".to_string(), json!("string"));
    // #RRGGBB with an optional alpha pair.
    schema.insert("pattern".to_string(), json!("^#[0-9a-fA-F]{6}([0-9a-fA-F]{2})?$"));
    schema.insert("x-conduit-format".to_string(), json!("color"));
}

// =============================================================================
// Enumerations
// =============================================================================

struct EnumChoices {
    values: Vec<Value>,
    names: Vec<Value>,
    descriptions: Vec<Value>,
    has_description: bool,
}

/// Collect choice entries for `options`/`multiOptions`. Only entries that
/// declare a `value` participate; names and descriptions default to the
/// empty string so the lists stay index-aligned with the enum.
fn collect_choices(prop: &PropertyDefinition) -> EnumChoices {
    let mut choices = EnumChoices {
        values: Vec::new(),
        names: Vec::new(),
        descriptions: Vec::new(),
        has_description: false,
    };

    for entry in prop.options.iter().flatten() {
        let value = match entry.get("value") {
            Some(value) => value,
            None => continue,
        };
        choices.values.push(value.clone());

        let name = entry.get("name").and_then(Value::as_str).unwrap_or_default();
        choices.names.push(json!(name));

        let description = entry
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !description.is_empty() {
            choices.has_description = true;
        }
        choices.descriptions.push(json!(description));
    }

    choices
}

fn convert_options(schema: &mut Map<String, Value>, prop: &PropertyDefinition) {
    schema.insert("type".to_string(), json!("string"));
    let choices = collect_choices(prop);
    schema.insert("enum".to_string(), Value::Array(choices.values));
    schema.insert("x-conduit-enum-names".to_string(), Value::Array(choices.names));
    if choices.has_description {
        schema.insert(
            "x-conduit-enum-descriptions".to_string(),
            Value::Array(choices.descriptions),
        );
    }
}

fn convert_multi_options(schema: &mut Map<String, Value>, prop: &PropertyDefinition) {
    schema.insert("type".to_string(), json!("array"));
    let choices = collect_choices(prop);
    schema.insert(
        "items".to_string(),
        json!({ "type": "string", "enum": choices.values }),
    );
    schema.insert("x-conduit-enum-names".to_string(), Value::Array(choices.names));
    if choices.has_description {
        schema.insert(
            "x-conduit-enum-descriptions".to_string(),
            Value::Array(choices.descriptions),
        );
    }
}

// =============================================================================
// Nested Collections
// =============================================================================

fn convert_collection(schema: &mut Map<String, Value>, prop: &PropertyDefinition) {
    schema.insert("type".to_string(), json!("object"));
    let entries = prop.options.as_deref().unwrap_or_default();
    schema.insert(
        "properties".to_string(),
        Value::Object(convert_sub_definitions(entries)),
    );
}

/// Convert a list of raw sub-definition entries into a properties mapping.
///
/// Entries that are not definitions, lack a name, or contribute nothing are
/// skipped; duplicate names overwrite in place (last write wins).
fn convert_sub_definitions(entries: &[Value]) -> Map<String, Value> {
    let mut properties = Map::new();
    for entry in entries {
        let sub = match PropertyDefinition::from_value(entry) {
            Some(sub) => sub,
            None => continue,
        };
        let name = match sub.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        if let Some(fragment) = convert_property(&sub) {
            properties.insert(name, Value::Object(fragment));
        }
    }
    properties
}

fn convert_fixed_collection(schema: &mut Map<String, Value>, prop: &PropertyDefinition) {
    schema.insert("type".to_string(), json!("object"));
    let multiple = prop
        .type_option("multipleValues")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut groups = Map::new();
    for entry in prop.options.iter().flatten() {
        let group_name = match entry.get("name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };
        let values = entry
            .get("values")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut item = Map::new();
        item.insert("type".to_string(), json!("object"));
        item.insert(
            "properties".to_string(),
            Value::Object(convert_sub_definitions(values)),
        );

        let mut group_schema = if multiple {
            let mut array = Map::new();
            array.insert("type".to_string(), json!("array"));
            array.insert("items".to_string(), Value::Object(item));
            array
        } else {
            item
        };
        if let Some(display_name) = entry.get("displayName").and_then(Value::as_str) {
            group_schema.insert("x-conduit-display-name".to_string(), json!(display_name));
        }

        groups.insert(group_name.to_string(), Value::Object(group_schema));
    }
    schema.insert("properties".to_string(), Value::Object(groups));
}

// =============================================================================
// Composite Widgets
// =============================================================================

fn convert_resource_locator(schema: &mut Map<String, Value>, prop: &PropertyDefinition) {
    schema.insert("type".to_string(), json!("object"));

    let declared: Vec<&Value> = prop.modes.iter().flatten().collect();
    let mode_names: Vec<Value> = declared
        .iter()
        .filter_map(|mode| mode.get("name"))
        .cloned()
        .collect();
    let mode_enum = if mode_names.is_empty() {
        json!(["id", "url", "list"])
    } else {
        Value::Array(mode_names)
    };

    let mut properties = Map::new();
    properties.insert("__rl".to_string(), json!({ "type": "boolean", "const": true }));
    properties.insert("mode".to_string(), json!({ "type": "string", "enum": mode_enum }));
    properties.insert("value".to_string(), json!({}));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert("required".to_string(), json!(["mode", "value"]));

    if !declared.is_empty() {
        let modes_meta: Vec<Value> = declared
            .iter()
            .map(|mode| {
                let mut meta = Map::new();
                for key in ["name", "displayName", "type"] {
                    if let Some(value) = mode.get(key) {
                        meta.insert(key.to_string(), value.clone());
                    }
                }
                Value::Object(meta)
            })
            .collect();
        schema.insert("x-conduit-modes".to_string(), Value::Array(modes_meta));
    }
}

fn convert_filter(schema: &mut Map<String, Value>) {
    schema.insert("type".to_string(), json!("object"));
    schema.insert(
        "properties".to_string(),
        json!({
            "conditions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "leftValue": { "type": "string" },
                        "rightValue": {},
                        "operator": { "type": "object" }
                    }
                }
            },
            "combinator": { "type": "string", "enum": ["and", "or"], "default": "and" },
            "options": {
                "type": "object",
                "properties": {
                    "caseSensitive": { "type": "boolean" },
                    "leftValue": { "type": "string" },
                    "typeValidation": { "type": "string" }
                }
            }
        }),
    );
}

fn convert_credentials_select(schema: &mut Map<String, Value>) {
    schema.insert("type".to_string(), json!("object"));
    schema.insert(
        "properties".to_string(),
        json!({
            "name": { "type": "string" },
            "value": { "type": "string" }
        }),
    );
}

fn convert_assignment_collection(schema: &mut Map<String, Value>) {
    schema.insert("type".to_string(), json!("object"));
    schema.insert(
        "properties".to_string(),
        json!({
            "assignments": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "value": {},
                        "type": {
                            "type": "string",
                            "enum": ["string", "number", "boolean", "array", "object"]
                        }
                    },
                    "required": ["name"]
                }
            }
        }),
    );
}
