//! Parameter document aggregation: parameter schemas and their fields.

use std::path::Path;

use super::documents::{DocumentKind, DocumentStore};
use super::paths;
use super::schema::{attached_main_routes, normalized_type, render_example};
use super::templates::{bool_str, fill, TemplateKind, TemplateStore};
use crate::model::SchemaKind;
use crate::registry::Registry;

/// Mirrors schema generation for parameter schemas; each block carries the
/// parameter's location and required flag on top of the shared fields.
pub fn generate_parameters(
    registry: &Registry,
    templates: &TemplateStore,
    documents: &mut DocumentStore,
    folder: &Path,
) -> anyhow::Result<()> {
    let parameter_template = templates.get(TemplateKind::Parameter);
    let parameters_template = templates.get(TemplateKind::Parameters);

    let parameter_schemas: Vec<_> = registry
        .schemas()
        .iter()
        .filter(|schema| schema.kind == SchemaKind::Parameter)
        .collect();

    for route in attached_main_routes(registry, parameter_schemas.iter().map(|s| s.route))? {
        let path = paths::document_file_path(folder, &route, DocumentKind::Parameter)?;
        documents.create(DocumentKind::Parameter, &route, path);
    }

    for schema in &parameter_schemas {
        let mut rendered = String::new();
        for parameter in registry
            .parameters()
            .iter()
            .filter(|parameter| parameter.schema == schema.name)
        {
            let ty = normalized_type(parameter.ty.as_deref());
            rendered.push_str(&fill(
                parameter_template,
                &[
                    ("{{PARAMETER_NAME}}", parameter.name.as_str()),
                    ("{{PARAMETER_PROP_NAME}}", parameter.name.as_str()),
                    (
                        "{{PARAMETER_IN}}",
                        parameter
                            .location
                            .map(|location| location.as_str())
                            .unwrap_or_default(),
                    ),
                    ("{{PARAMETER_TYPE}}", ty),
                    ("{{PARAMETER_REQUIRED}}", bool_str(parameter.required)),
                    (
                        "{{PARAMETER_DESCRIPTION}}",
                        parameter.description.as_deref().unwrap_or_default(),
                    ),
                    (
                        "{{PARAMETER_EXAMPLE}}",
                        render_example(ty, parameter.example.as_ref()).as_str(),
                    ),
                ],
            ));
        }

        let block = fill(
            parameters_template,
            &[
                ("{{PARAMETER_SCHEMA_NAME}}", schema.name.as_str()),
                ("{{PARAMETERS}}", rendered.as_str()),
            ],
        );
        let route = registry.main_route(schema.route)?;
        documents.append(DocumentKind::Parameter, route, &block);
    }
    Ok(())
}
