//! Accumulation of rendered content into per-route documents and per-kind
//! index material.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::paths;
use super::templates::{fill, TemplateKind, TemplateStore};

/// The four independently generated document categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentKind {
    Schema,
    Tag,
    Parameter,
    Method,
}

impl DocumentKind {
    /// Generation order: schemas first, methods last.
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Schema,
        DocumentKind::Tag,
        DocumentKind::Parameter,
        DocumentKind::Method,
    ];

    pub fn folder_name(self) -> &'static str {
        match self {
            DocumentKind::Schema => "schema",
            DocumentKind::Tag => "tag",
            DocumentKind::Parameter => "parameter",
            DocumentKind::Method => "method",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            DocumentKind::Schema => ".swagger.schema.ts",
            DocumentKind::Tag => ".swagger.tag.ts",
            DocumentKind::Parameter => ".swagger.parameter.ts",
            DocumentKind::Method => ".swagger.method.ts",
        }
    }

    /// Collection constant each kind's index file exports.
    pub fn index_property(self) -> &'static str {
        match self {
            DocumentKind::Schema => "allSchemas",
            DocumentKind::Tag => "allTags",
            DocumentKind::Parameter => "allParameters",
            DocumentKind::Method => "allMethods",
        }
    }

    /// Suffix appended to a route's export symbol.
    pub fn symbol_suffix(self) -> &'static str {
        match self {
            DocumentKind::Schema => "Schemas",
            DocumentKind::Tag => "Tags",
            DocumentKind::Parameter => "Parameters",
            DocumentKind::Method => "Methods",
        }
    }

    /// Template wrapping a document's accumulated content into a file.
    pub(crate) fn wrapper_template(self) -> TemplateKind {
        match self {
            DocumentKind::Schema => TemplateKind::Schemas,
            DocumentKind::Tag => TemplateKind::Tags,
            DocumentKind::Parameter => TemplateKind::ParameterObject,
            DocumentKind::Method => TemplateKind::Methods,
        }
    }

    /// Placeholder in the wrapper template the content lands in.
    pub(crate) fn content_placeholder(self) -> &'static str {
        match self {
            DocumentKind::Schema => "{{SCHEMAS}}",
            DocumentKind::Tag => "{{TAGS}}",
            DocumentKind::Parameter => "{{PARAMETERS}}",
            DocumentKind::Method => "{{METHODS}}",
        }
    }
}

/// One generated source file: accumulated content plus its stable path.
#[derive(Debug)]
pub struct Document {
    pub route: String,
    pub file_path: PathBuf,
    pub content: String,
}

/// Every document of the current run, keyed by (kind, root route).
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: BTreeMap<(DocumentKind, String), Document>,
}

impl DocumentStore {
    /// Creates the document for (kind, route) if it does not exist yet.
    /// The file path is assigned once and stays stable for the run.
    pub fn create(&mut self, kind: DocumentKind, route: &str, file_path: PathBuf) {
        self.documents
            .entry((kind, route.to_string()))
            .or_insert_with(|| Document {
                route: route.to_string(),
                file_path,
                content: String::new(),
            });
    }

    /// Appends rendered text to an existing document. Content for a
    /// document that was never created is dropped; creation and
    /// accumulation are distinct, ordered steps.
    pub fn append(&mut self, kind: DocumentKind, route: &str, text: &str) {
        if let Some(document) = self.documents.get_mut(&(kind, route.to_string())) {
            document.content.push_str(text);
        }
    }

    /// Documents of one kind, in route order.
    pub fn documents_of(&self, kind: DocumentKind) -> impl Iterator<Item = &Document> {
        self.documents
            .iter()
            .filter(move |(key, _)| key.0 == kind)
            .map(|(_, document)| document)
    }
}

#[derive(Debug, Default)]
struct IndexEntry {
    imports: String,
    spreads: String,
}

/// Accumulates, per kind, the import statements and spread fragments
/// contributed by every persisted file of that kind.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    entries: BTreeMap<DocumentKind, IndexEntry>,
}

impl IndexBuilder {
    /// Opens one accumulator per kind at the start of a run.
    pub fn init_all(&mut self) {
        for kind in DocumentKind::ALL {
            self.entries.entry(kind).or_default();
        }
    }

    /// Records one persisted file: an import line referencing the export
    /// symbol plus a spread fragment. Ignored for a kind whose accumulator
    /// was never opened.
    pub fn record(&mut self, kind: DocumentKind, symbol: &str, file_path: &Path) {
        let Some(entry) = self.entries.get_mut(&kind) else {
            return;
        };
        let stem = paths::file_stem(file_path);
        entry
            .imports
            .push_str(&format!("import {{ {symbol} }} from './{stem}';\n"));
        entry.spreads.push_str(&format!("...{symbol}, "));
    }

    /// Renders the kind's index document from the Index template.
    pub fn render(&self, kind: DocumentKind, templates: &TemplateStore) -> String {
        let (imports, spreads) = self
            .entries
            .get(&kind)
            .map(|entry| (entry.imports.as_str(), entry.spreads.as_str()))
            .unwrap_or_default();
        fill(
            templates.get(TemplateKind::Index),
            &[
                ("{{IMPORTS}}", imports),
                ("{{PROPERTY_NAME}}", kind.index_property()),
                ("{{ITEMS}}", spreads),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_append_before_create_is_dropped() {
        let mut store = DocumentStore::default();
        store.append(DocumentKind::Schema, "/users", "lost");
        assert_eq!(store.documents_of(DocumentKind::Schema).count(), 0);

        store.create(DocumentKind::Schema, "/users", PathBuf::from("users.ts"));
        store.append(DocumentKind::Schema, "/users", "first ");
        store.append(DocumentKind::Schema, "/users", "second");

        let document = store.documents_of(DocumentKind::Schema).next().unwrap();
        assert_eq!(document.content, "first second");
    }

    #[test]
    fn test_create_keeps_first_file_path() {
        let mut store = DocumentStore::default();
        store.create(DocumentKind::Tag, "/users", PathBuf::from("a.ts"));
        store.create(DocumentKind::Tag, "/users", PathBuf::from("b.ts"));

        let document = store.documents_of(DocumentKind::Tag).next().unwrap();
        assert_eq!(document.file_path, PathBuf::from("a.ts"));
    }

    #[test]
    fn test_documents_are_scoped_by_kind() {
        let mut store = DocumentStore::default();
        store.create(DocumentKind::Schema, "/users", PathBuf::from("s.ts"));
        store.create(DocumentKind::Tag, "/users", PathBuf::from("t.ts"));
        store.append(DocumentKind::Schema, "/users", "schema content");

        let tag = store.documents_of(DocumentKind::Tag).next().unwrap();
        assert_eq!(tag.content, "");
        assert_eq!(store.documents_of(DocumentKind::Schema).count(), 1);
    }

    #[test]
    fn test_record_ignored_before_init() {
        let mut builder = IndexBuilder::default();
        builder.record(
            DocumentKind::Schema,
            "UsersSchemas",
            Path::new("users.swagger.schema.ts"),
        );

        let mut store = TemplateStore::default();
        store.load_all(&crate::generator::templates::EmbeddedTemplates);
        let rendered = builder.render(DocumentKind::Schema, &store);
        assert!(!rendered.contains("UsersSchemas"));
    }

    #[test]
    fn test_record_accumulates_imports_and_spreads() {
        let mut builder = IndexBuilder::default();
        builder.init_all();
        builder.record(
            DocumentKind::Schema,
            "UsersSchemas",
            Path::new("/out/schema/users.swagger.schema.ts"),
        );

        let mut store = TemplateStore::default();
        store.load_all(&crate::generator::templates::EmbeddedTemplates);
        let rendered = builder.render(DocumentKind::Schema, &store);
        assert!(rendered.contains("import { UsersSchemas } from './users.swagger.schema';"));
        assert!(rendered.contains("...UsersSchemas, "));
        assert!(rendered.contains("allSchemas"));
    }
}
