//! Schema document aggregation: property schemas and their fields.

use std::path::Path;

use serde_json::Value;

use super::documents::{DocumentKind, DocumentStore};
use super::paths;
use super::templates::{bool_str, fill, TemplateKind, TemplateStore};
use crate::model::{RouteId, SchemaKind};
use crate::registry::Registry;

/// Declared types accepted verbatim; anything else falls back to `object`.
pub(crate) const DATA_TYPES: [&str; 6] =
    ["string", "number", "integer", "boolean", "array", "object"];

pub(crate) const DEFAULT_TYPE: &str = "object";

pub(crate) fn normalized_type(declared: Option<&str>) -> &str {
    match declared {
        Some(ty) if DATA_TYPES.iter().any(|known| *known == ty) => ty,
        _ => DEFAULT_TYPE,
    }
}

/// Type-aware example rendering: strings are quoted, objects serialize to
/// JSON, everything else renders as-is. An absent example renders as the
/// literal `undefined`.
pub(crate) fn render_example(ty: &str, example: Option<&Value>) -> String {
    match ty {
        "string" => format!(
            "'{}'",
            example
                .map(display_value)
                .unwrap_or_else(|| "undefined".to_string())
        ),
        "object" => example
            .map(Value::to_string)
            .unwrap_or_else(|| "undefined".to_string()),
        _ => example
            .map(display_value)
            .unwrap_or_else(|| "undefined".to_string()),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Distinct root routes of the given route references, first-seen order.
pub(crate) fn attached_main_routes(
    registry: &Registry,
    ids: impl Iterator<Item = RouteId>,
) -> anyhow::Result<Vec<String>> {
    let mut routes: Vec<String> = Vec::new();
    for id in ids {
        let main = registry.main_route(id)?;
        if !routes.iter().any(|existing| existing == main) {
            routes.push(main.to_string());
        }
    }
    Ok(routes)
}

/// Renders one schema block per property schema with its nested property
/// blocks, grouped into documents by root route.
pub fn generate_schemas(
    registry: &Registry,
    templates: &TemplateStore,
    documents: &mut DocumentStore,
    folder: &Path,
) -> anyhow::Result<()> {
    let schema_template = templates.get(TemplateKind::Schema);
    let property_template = templates.get(TemplateKind::Property);

    let property_schemas: Vec<_> = registry
        .schemas()
        .iter()
        .filter(|schema| schema.kind == SchemaKind::Property)
        .collect();

    for route in attached_main_routes(registry, property_schemas.iter().map(|s| s.route))? {
        let path = paths::document_file_path(folder, &route, DocumentKind::Schema)?;
        documents.create(DocumentKind::Schema, &route, path);
    }

    for schema in &property_schemas {
        let mut properties = String::new();
        for property in registry
            .properties()
            .iter()
            .filter(|property| property.schema == schema.name)
        {
            let ty = normalized_type(property.ty.as_deref());
            properties.push_str(&fill(
                property_template,
                &[
                    ("{{PROPERTY_NAME}}", property.name.as_str()),
                    ("{{PROPERTY_TYPE}}", ty),
                    (
                        "{{PROPERTY_DESCRIPTION}}",
                        property.description.as_deref().unwrap_or_default(),
                    ),
                    ("{{PROPERTY_REQUIRED}}", bool_str(property.required)),
                    (
                        "{{PROPERTY_EXAMPLE}}",
                        render_example(ty, property.example.as_ref()).as_str(),
                    ),
                ],
            ));
        }

        let block = fill(
            schema_template,
            &[
                ("{{SCHEMA_NAME}}", schema.name.as_str()),
                ("{{PROPERTIES}}", properties.as_str()),
            ],
        );
        let route = registry.main_route(schema.route)?;
        documents.append(DocumentKind::Schema, route, &block);
    }
    Ok(())
}
