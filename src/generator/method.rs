//! Method document aggregation.
//!
//! The most involved kind: each method renders its request body, response
//! and parameter-reference blocks into one route-method block, blocks are
//! merged per (full path, root route) so every verb of an endpoint lands
//! under one path entry, and path entries are merged again per root route
//! because one output file serves one root route.

use std::path::Path;

use super::documents::{DocumentKind, DocumentStore};
use super::paths;
use super::templates::{bool_str, fill, TemplateKind, TemplateStore};
use crate::model::SecurityScheme;
use crate::registry::Registry;

struct RouteMethodGroup {
    endpoint: String,
    route: String,
    rendered: String,
}

struct MethodDocumentGroup {
    route: String,
    rendered: String,
}

/// Only the bearer-token scheme renders a marker; anything else is empty.
pub(crate) fn security_scheme_fragment(scheme: Option<SecurityScheme>) -> &'static str {
    match scheme {
        Some(SecurityScheme::Bearer) => "{ BearerAuth: [] }",
        None => "",
    }
}

pub fn generate_methods(
    registry: &Registry,
    templates: &TemplateStore,
    documents: &mut DocumentStore,
    folder: &Path,
) -> anyhow::Result<()> {
    let request_body_template = templates.get(TemplateKind::RequestBody);
    let response_template = templates.get(TemplateKind::Response);
    let response_array_template = templates.get(TemplateKind::ResponseArray);
    let method_template = templates.get(TemplateKind::Method);
    let route_method_template = templates.get(TemplateKind::RouteMethod);
    let method_parameter_template = templates.get(TemplateKind::MethodParameter);

    let mut route_methods: Vec<RouteMethodGroup> = Vec::new();

    for method in registry.methods() {
        let mut request_body = String::new();
        if let Some(body) = &method.request_body {
            request_body = fill(
                request_body_template,
                &[
                    ("{{REQUEST_SCHEMA}}", body.schema.as_str()),
                    ("{{REQUIRED}}", bool_str(body.required)),
                ],
            );
        }

        let mut responses = String::new();
        for response in &method.responses {
            let template = if response.content.array_of {
                response_array_template
            } else {
                response_template
            };
            responses.push_str(&fill(
                template,
                &[
                    ("{{RESPONSE_CODE}}", response.status.to_string().as_str()),
                    ("{{RESPONSE_DESCRIPTION}}", response.description.as_str()),
                    ("{{RESPONSE_SCHEMA}}", response.content.schema.as_str()),
                ],
            ));
        }

        let mut parameter_refs = String::new();
        for schema_name in &method.parameter_schemas {
            for parameter in registry
                .parameters()
                .iter()
                .filter(|parameter| &parameter.schema == schema_name)
            {
                parameter_refs.push_str(&fill(
                    method_parameter_template,
                    &[
                        ("{{PARAMETER_SCHEMA}}", parameter.schema.as_str()),
                        ("{{PARAMETER_NAME}}", parameter.name.as_str()),
                    ],
                ));
            }
        }

        let mut tag_list = String::new();
        for tag in &method.tags {
            tag_list.push_str(&format!("'{tag}',"));
        }

        let endpoint = registry.full_path(method.route)?;
        let root = registry.main_route(method.route)?.to_string();

        let rendered = fill(
            route_method_template,
            &[
                ("{{SECURITY_SCHEME}}", security_scheme_fragment(method.security)),
                ("{{HTTP_METHOD}}", method.http_method.as_str()),
                ("{{TAGS}}", tag_list.as_str()),
                ("{{SUMMARY}}", method.summary.as_str()),
                ("{{DESCRIPTION}}", method.description.as_str()),
                ("{{NAME}}", method.name.as_str()),
                ("{{PARAMETERS}}", parameter_refs.as_str()),
                ("{{REQUEST_BODY}}", request_body.as_str()),
                ("{{RESPONSES}}", responses.as_str()),
            ],
        );

        // Verbs sharing path and root concatenate under one path entry.
        match route_methods
            .iter_mut()
            .find(|group| group.endpoint == endpoint && group.route == root)
        {
            Some(group) => group.rendered.push_str(&rendered),
            None => route_methods.push(RouteMethodGroup {
                endpoint,
                route: root,
                rendered,
            }),
        }
    }

    let mut method_documents: Vec<MethodDocumentGroup> = Vec::new();
    for group in &route_methods {
        let rendered = fill(
            method_template,
            &[
                ("{{METHOD_ROUTE}}", group.endpoint.as_str()),
                ("{{ROUTE_METHODS}}", group.rendered.as_str()),
            ],
        );
        match method_documents
            .iter_mut()
            .find(|document| document.route == group.route)
        {
            Some(document) => document.rendered.push_str(&rendered),
            None => method_documents.push(MethodDocumentGroup {
                route: group.route.clone(),
                rendered,
            }),
        }
    }

    for group in &method_documents {
        let path = paths::document_file_path(folder, &group.route, DocumentKind::Method)?;
        documents.create(DocumentKind::Method, &group.route, path);
    }
    for group in &method_documents {
        documents.append(DocumentKind::Method, &group.route, &group.rendered);
    }
    Ok(())
}
