//! Template loading and placeholder substitution.
//!
//! Templates are opaque text bodies keyed by [`TemplateKind`], supplied by
//! an external [`TemplateSource`] and cached in a [`TemplateStore`] for one
//! generation run. Rendering is literal substitution: each `{{NAME}}`
//! placeholder is replaced at most once per invocation, in the order the
//! call site lists the pairs. A template that fails to load degrades to an
//! empty rendered section instead of failing the run.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing::warn;

/// Identifies one template body used somewhere in the generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Schema,
    Schemas,
    Property,
    Tag,
    Tags,
    Parameter,
    Parameters,
    ParameterObject,
    Method,
    Methods,
    RouteMethod,
    MethodParameter,
    RequestBody,
    Response,
    ResponseArray,
    Index,
    Spec,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 17] = [
        TemplateKind::Schema,
        TemplateKind::Schemas,
        TemplateKind::Property,
        TemplateKind::Tag,
        TemplateKind::Tags,
        TemplateKind::Parameter,
        TemplateKind::Parameters,
        TemplateKind::ParameterObject,
        TemplateKind::Method,
        TemplateKind::Methods,
        TemplateKind::RouteMethod,
        TemplateKind::MethodParameter,
        TemplateKind::RequestBody,
        TemplateKind::Response,
        TemplateKind::ResponseArray,
        TemplateKind::Index,
        TemplateKind::Spec,
    ];

    /// File name the template is stored under in a template directory.
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKind::Schema => "schema.template",
            TemplateKind::Schemas => "schemas.template",
            TemplateKind::Property => "property.template",
            TemplateKind::Tag => "tag.template",
            TemplateKind::Tags => "tags.template",
            TemplateKind::Parameter => "parameter.template",
            TemplateKind::Parameters => "parameters.template",
            TemplateKind::ParameterObject => "parameter-object.template",
            TemplateKind::Method => "method.template",
            TemplateKind::Methods => "methods.template",
            TemplateKind::RouteMethod => "route-method.template",
            TemplateKind::MethodParameter => "method-parameter.template",
            TemplateKind::RequestBody => "request-body.template",
            TemplateKind::Response => "response.template",
            TemplateKind::ResponseArray => "response-array.template",
            TemplateKind::Index => "index.template",
            TemplateKind::Spec => "spec.template",
        }
    }
}

/// External source of raw template text.
pub trait TemplateSource {
    fn read(&self, kind: TemplateKind) -> anyhow::Result<String>;
}

/// Reads templates from a directory, one `<kind>.template` file each.
pub struct DirTemplateSource {
    dir: PathBuf,
}

impl DirTemplateSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TemplateSource for DirTemplateSource {
    fn read(&self, kind: TemplateKind) -> anyhow::Result<String> {
        let path = self.dir.join(kind.file_name());
        fs::read_to_string(&path).with_context(|| format!("failed to read template {path:?}"))
    }
}

/// Default template bodies shipped with the crate, compiled in.
pub struct EmbeddedTemplates;

impl TemplateSource for EmbeddedTemplates {
    fn read(&self, kind: TemplateKind) -> anyhow::Result<String> {
        let body = match kind {
            TemplateKind::Schema => include_str!("../../templates/schema.template"),
            TemplateKind::Schemas => include_str!("../../templates/schemas.template"),
            TemplateKind::Property => include_str!("../../templates/property.template"),
            TemplateKind::Tag => include_str!("../../templates/tag.template"),
            TemplateKind::Tags => include_str!("../../templates/tags.template"),
            TemplateKind::Parameter => include_str!("../../templates/parameter.template"),
            TemplateKind::Parameters => include_str!("../../templates/parameters.template"),
            TemplateKind::ParameterObject => {
                include_str!("../../templates/parameter-object.template")
            }
            TemplateKind::Method => include_str!("../../templates/method.template"),
            TemplateKind::Methods => include_str!("../../templates/methods.template"),
            TemplateKind::RouteMethod => include_str!("../../templates/route-method.template"),
            TemplateKind::MethodParameter => {
                include_str!("../../templates/method-parameter.template")
            }
            TemplateKind::RequestBody => include_str!("../../templates/request-body.template"),
            TemplateKind::Response => include_str!("../../templates/response.template"),
            TemplateKind::ResponseArray => include_str!("../../templates/response-array.template"),
            TemplateKind::Index => include_str!("../../templates/index.template"),
            TemplateKind::Spec => include_str!("../../templates/spec.template"),
        };
        Ok(body.to_string())
    }
}

/// Caches template bodies for one generation run.
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: HashMap<TemplateKind, String>,
}

impl TemplateStore {
    /// Reads every template kind once. An unreadable template is logged
    /// and left unloaded; its sections render empty.
    pub fn load_all(&mut self, source: &dyn TemplateSource) {
        for kind in TemplateKind::ALL {
            match source.read(kind) {
                Ok(content) => {
                    self.templates.insert(kind, content);
                }
                Err(err) => {
                    warn!(
                        "template {} unavailable, sections render empty: {err:#}",
                        kind.file_name()
                    );
                }
            }
        }
    }

    /// Cached body, or the empty-string sentinel for a template that never
    /// loaded. Never fails.
    pub fn get(&self, kind: TemplateKind) -> &str {
        self.templates
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Substitutes each placeholder at most once, in the order given.
pub(crate) fn fill(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (placeholder, value) in substitutions {
        out = out.replacen(placeholder, value, 1);
    }
    out
}

pub(crate) fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_fill_substitutes_each_placeholder_once() {
        let rendered = fill(
            "{{NAME}} and {{NAME}} with {{OTHER}}",
            &[("{{NAME}}", "first"), ("{{OTHER}}", "second")],
        );
        // The second occurrence stays literal; placeholders are single-use.
        assert_eq!(rendered, "first and {{NAME}} with second");
    }

    #[test]
    fn test_store_returns_empty_for_missing_template() {
        let store = TemplateStore::default();
        assert_eq!(store.get(TemplateKind::Schema), "");
    }

    #[test]
    fn test_dir_source_reads_template_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tag.template"), "name: {{TAG_NAME}}").unwrap();

        let source = DirTemplateSource::new(dir.path());
        assert_eq!(
            source.read(TemplateKind::Tag).unwrap(),
            "name: {{TAG_NAME}}"
        );
        assert!(source.read(TemplateKind::Schema).is_err());
    }

    #[test]
    fn test_load_all_tolerates_missing_templates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tag.template"), "{{TAG_NAME}}").unwrap();

        let mut store = TemplateStore::default();
        store.load_all(&DirTemplateSource::new(dir.path()));
        assert_eq!(store.get(TemplateKind::Tag), "{{TAG_NAME}}");
        assert_eq!(store.get(TemplateKind::Schema), "");
    }

    #[test]
    fn test_embedded_templates_cover_every_kind() {
        for kind in TemplateKind::ALL {
            let body = EmbeddedTemplates.read(kind).unwrap();
            assert!(!body.is_empty(), "missing embedded {}", kind.file_name());
        }
    }
}
