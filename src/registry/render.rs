//! Operation table → OpenAPI document JSON.

use crate::config::DocumentInfo;
use crate::error::{RegistrarError, Result};
use crate::schema::{Components, Schema, SchemaKind};
use crate::spec::{
    ContentMap, OperationEntry, ParameterLocation, RequestBodyEntry, RequestEntry, ResponseEntry,
};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Render the whole document.
///
/// Explicitly registered components are emitted first so they appear even when no
/// operation references them.
pub(crate) fn render_document(
    info: &DocumentInfo,
    operations: &[OperationEntry],
    registered: &[Schema],
) -> Result<Value> {
    check_component_names(operations, registered)?;

    let mut components = Components::new();
    for schema in registered {
        schema.emit_components(&mut components);
    }

    let mut paths: Map<String, Value> = Map::new();
    for op in operations {
        let rendered = render_operation(op, &mut components);
        let item = paths
            .entry(op.path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(methods) = item {
            methods.insert(op.method.as_str().to_ascii_lowercase(), rendered);
        }
    }

    let mut info_obj = Map::new();
    info_obj.insert("title".into(), Value::String(info.title.clone()));
    info_obj.insert("version".into(), Value::String(info.version.clone()));
    if let Some(desc) = &info.description {
        info_obj.insert("description".into(), Value::String(desc.clone()));
    }

    let mut doc = Map::new();
    doc.insert("openapi".into(), Value::String(info.openapi.clone()));
    doc.insert("info".into(), Value::Object(info_obj));
    doc.insert("paths".into(), Value::Object(paths));
    if !components.is_empty() {
        let schemas: Map<String, Value> = components.into_iter().collect();
        doc.insert("components".into(), json!({ "schemas": schemas }));
    }
    Ok(Value::Object(doc))
}

pub(crate) fn render_operation(op: &OperationEntry, components: &mut Components) -> Value {
    let mut out = Map::new();
    let meta = &op.metadata;
    if let Some(summary) = &meta.summary {
        out.insert("summary".into(), Value::String(summary.clone()));
    }
    if let Some(desc) = &meta.description {
        out.insert("description".into(), Value::String(desc.clone()));
    }
    if !meta.tags.is_empty() {
        out.insert("tags".into(), json!(meta.tags));
    }
    if let Some(id) = &meta.operation_id {
        out.insert("operationId".into(), Value::String(id.clone()));
    }
    if meta.deprecated {
        out.insert("deprecated".into(), Value::Bool(true));
    }

    if let Some(request) = &op.request {
        let parameters = render_parameters(request, components);
        if !parameters.is_empty() {
            out.insert("parameters".into(), Value::Array(parameters));
        }
        if let Some(body) = &request.body {
            out.insert("requestBody".into(), render_request_body(body, components));
        }
    }

    let responses: Map<String, Value> = op
        .responses
        .iter()
        .map(|(code, entry)| (code.to_string(), render_response(entry, components)))
        .collect();
    out.insert("responses".into(), Value::Object(responses));
    Value::Object(out)
}

fn render_parameters(request: &RequestEntry, components: &mut Components) -> Vec<Value> {
    let mut parameters = Vec::new();
    for (location, schema) in request.parameter_schemas() {
        for (name, required, fragment, description) in parameter_fields(schema, components) {
            let mut param = Map::new();
            param.insert("name".into(), Value::String(name));
            param.insert("in".into(), Value::String(location.as_str().into()));
            // Path parameters are always required in OpenAPI.
            param.insert(
                "required".into(),
                Value::Bool(location == ParameterLocation::Path || required),
            );
            if let Some(description) = description {
                param.insert("description".into(), Value::String(description));
            }
            param.insert("schema".into(), fragment);
            parameters.push(Value::Object(param));
        }
    }
    parameters
}

/// `(name, required, schema fragment, description)` for each property of an object schema.
fn parameter_fields(
    schema: &Schema,
    components: &mut Components,
) -> Vec<(String, bool, Value, Option<String>)> {
    if let Some(props) = schema.properties() {
        return props
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    p.required,
                    p.schema.render(components),
                    p.schema.description().map(str::to_string),
                )
            })
            .collect();
    }

    // Raw object fragments: read `properties` and `required` directly.
    let SchemaKind::Raw(raw) = schema.kind() else {
        return Vec::new();
    };
    let required: Vec<&str> = raw
        .get("required")
        .and_then(Value::as_array)
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    raw.get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, fragment)| {
                    let description = fragment
                        .get("description")
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    (
                        name.clone(),
                        required.contains(&name.as_str()),
                        fragment.clone(),
                        description,
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

fn render_content(content: &ContentMap, components: &mut Components) -> Value {
    let map: Map<String, Value> = content
        .iter()
        .map(|(media_type, media)| {
            let mut obj = Map::new();
            obj.insert("schema".into(), media.schema.render(components));
            if let Some(example) = &media.example {
                obj.insert("example".into(), example.clone());
            }
            (media_type.clone(), Value::Object(obj))
        })
        .collect();
    Value::Object(map)
}

fn render_request_body(body: &RequestBodyEntry, components: &mut Components) -> Value {
    let mut out = Map::new();
    if let Some(desc) = &body.description {
        out.insert("description".into(), Value::String(desc.clone()));
    }
    if let Some(required) = body.required {
        out.insert("required".into(), Value::Bool(required));
    }
    out.insert("content".into(), render_content(&body.content, components));
    Value::Object(out)
}

fn render_response(entry: &ResponseEntry, components: &mut Components) -> Value {
    let mut out = Map::new();
    out.insert("description".into(), Value::String(entry.description.clone()));
    if let Some(content) = &entry.content {
        out.insert("content".into(), render_content(content, components));
    }
    Value::Object(out)
}

/// Reject two structurally different schemas sharing one component name.
fn check_component_names(operations: &[OperationEntry], registered: &[Schema]) -> Result<()> {
    let mut seen: BTreeMap<String, Schema> = BTreeMap::new();
    let mut roots: Vec<&Schema> = registered.iter().collect();
    for op in operations {
        if let Some(request) = &op.request {
            roots.extend(request.parameter_schemas().map(|(_, s)| s));
            if let Some(body) = &request.body {
                roots.extend(body.content.values().map(|m| &m.schema));
            }
        }
        for entry in op.responses.values() {
            if let Some(content) = &entry.content {
                roots.extend(content.values().map(|m| &m.schema));
            }
        }
    }
    for schema in roots {
        collect_named(schema, &mut seen)?;
    }
    Ok(())
}

fn collect_named(schema: &Schema, seen: &mut BTreeMap<String, Schema>) -> Result<()> {
    if let Some(name) = schema.name() {
        match seen.get(name) {
            Some(existing) if existing.ptr_eq(schema) => return Ok(()),
            Some(existing) => {
                if existing.definition() != schema.definition() {
                    return Err(RegistrarError::ComponentNameConflict {
                        name: name.to_string(),
                    });
                }
            }
            None => {
                seen.insert(name.to_string(), schema.clone());
            }
        }
    }
    match schema.kind() {
        SchemaKind::Array(items) => collect_named(items, seen),
        SchemaKind::Object(props) => props
            .iter()
            .try_for_each(|p| collect_named(&p.schema, seen)),
        SchemaKind::AnyOf(members) => members.iter().try_for_each(|m| collect_named(m, seen)),
        _ => Ok(()),
    }
}
