//! Tag document aggregation.

use std::path::Path;

use super::documents::{DocumentKind, DocumentStore};
use super::paths;
use super::schema::attached_main_routes;
use super::templates::{fill, TemplateKind, TemplateStore};
use crate::registry::Registry;

/// Renders one block per tag, grouped by the tag's route's root.
pub fn generate_tags(
    registry: &Registry,
    templates: &TemplateStore,
    documents: &mut DocumentStore,
    folder: &Path,
) -> anyhow::Result<()> {
    let tag_template = templates.get(TemplateKind::Tag);

    for route in attached_main_routes(registry, registry.tags().iter().map(|tag| tag.route))? {
        let path = paths::document_file_path(folder, &route, DocumentKind::Tag)?;
        documents.create(DocumentKind::Tag, &route, path);
    }

    for tag in registry.tags() {
        let block = fill(tag_template, &[("{{TAG_NAME}}", tag.name.as_str())]);
        let route = registry.main_route(tag.route)?;
        documents.append(DocumentKind::Tag, route, &block);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::generator::templates::EmbeddedTemplates;

    #[test]
    fn test_tags_group_under_root_route() {
        let mut registry = Registry::new();
        let users = registry.add_route("/users", None);
        let child = registry.add_route("{id}", Some(users));
        registry.add_tag("users", users);
        registry.add_tag("user-details", child);

        let mut templates = TemplateStore::default();
        templates.load_all(&EmbeddedTemplates);
        let mut documents = DocumentStore::default();
        let dir = tempfile::tempdir().unwrap();

        generate_tags(&registry, &templates, &mut documents, dir.path()).unwrap();

        let docs: Vec<_> = documents.documents_of(DocumentKind::Tag).collect();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].content.contains("users"));
        assert!(docs[0].content.contains("user-details"));
    }
}
