//! Generation orchestration.
//!
//! One run moves through a fixed forward-only sequence: load templates,
//! open index accumulators, then per kind wipe the destination folder,
//! aggregate content and persist the files, and finally persist the index
//! files and the top-level spec document. Per-entity folders are fully
//! regenerated each run; already-persisted individual files are refused
//! rather than overwritten, and an existing top-level spec is preserved
//! untouched.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use tracing::{error, info, warn};

use super::documents::{DocumentKind, DocumentStore, IndexBuilder};
use super::format::TextFormatter;
use super::method::generate_methods;
use super::parameter::generate_parameters;
use super::paths;
use super::schema::generate_schemas;
use super::tag::generate_tags;
use super::templates::{fill, TemplateKind, TemplateSource, TemplateStore};
use crate::registry::Registry;

/// Top-level folder every generated file lives under.
pub const OUTPUT_FOLDER_NAME: &str = "swagger";

/// Name of the top-level spec document, written once and never overwritten.
pub const SPEC_FILE_NAME: &str = "index.swagger.ts";

/// Drives one full generation run over a quiesced registry.
///
/// The generator holds per-run state; create a fresh one for every run.
pub struct SpecGenerator<'a> {
    registry: &'a Registry,
    formatter: &'a dyn TextFormatter,
    templates: TemplateStore,
    documents: DocumentStore,
    indexes: IndexBuilder,
}

impl<'a> SpecGenerator<'a> {
    pub fn new(registry: &'a Registry, formatter: &'a dyn TextFormatter) -> Self {
        Self {
            registry,
            formatter,
            templates: TemplateStore::default(),
            documents: DocumentStore::default(),
            indexes: IndexBuilder::default(),
        }
    }

    /// Runs generation rooted at `out_dir`. Any failure is caught here,
    /// logged and swallowed; files already written stay in place.
    pub fn generate(&mut self, source: &dyn TemplateSource, out_dir: &Path) {
        info!("generating swagger documents");
        if let Err(err) = self.run(source, out_dir) {
            error!("error while generating swagger documents: {err:#}");
        }
    }

    fn run(&mut self, source: &dyn TemplateSource, out_dir: &Path) -> anyhow::Result<()> {
        let root = out_dir.join(OUTPUT_FOLDER_NAME);
        fs::create_dir_all(&root).with_context(|| format!("failed to create {root:?}"))?;

        self.templates.load_all(source);
        self.indexes.init_all();
        info!("templates loaded, indexes initialized");

        for kind in DocumentKind::ALL {
            let folder = root.join(kind.folder_name());
            wipe_folder(&folder)?;
            self.generate_kind(kind, &folder)?;
            self.persist_kind(kind)?;
            info!("{} documents generated", kind.folder_name());
        }

        self.persist_indexes(&root)?;
        self.persist_spec(&root)?;
        info!("swagger documents generated successfully");
        Ok(())
    }

    fn generate_kind(&mut self, kind: DocumentKind, folder: &Path) -> anyhow::Result<()> {
        match kind {
            DocumentKind::Schema => {
                generate_schemas(self.registry, &self.templates, &mut self.documents, folder)
            }
            DocumentKind::Tag => {
                generate_tags(self.registry, &self.templates, &mut self.documents, folder)
            }
            DocumentKind::Parameter => {
                generate_parameters(self.registry, &self.templates, &mut self.documents, folder)
            }
            DocumentKind::Method => {
                generate_methods(self.registry, &self.templates, &mut self.documents, folder)
            }
        }
    }

    /// Formats and writes every document of the kind, recording each
    /// persisted file with the index builder. A destination that already
    /// exists is refused with a warning; the run continues.
    fn persist_kind(&mut self, kind: DocumentKind) -> anyhow::Result<()> {
        let Self {
            documents,
            indexes,
            formatter,
            templates,
            ..
        } = self;
        let wrapper = templates.get(kind.wrapper_template());

        for document in documents.documents_of(kind) {
            let symbol = paths::export_symbol(&document.route, kind);
            let rendered = fill(
                wrapper,
                &[
                    ("{{ROUTE_NAME}}", symbol.as_str()),
                    (kind.content_placeholder(), document.content.as_str()),
                ],
            );
            let formatted = formatter.format(&rendered)?;
            match write_new(&document.file_path, &formatted) {
                Ok(()) => indexes.record(kind, &symbol, &document.file_path),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    warn!("refusing to overwrite existing {:?}", document.file_path);
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("failed to write {:?}", document.file_path))
                }
            }
        }
        Ok(())
    }

    fn persist_indexes(&mut self, root: &Path) -> anyhow::Result<()> {
        for kind in DocumentKind::ALL {
            let rendered = self.indexes.render(kind, &self.templates);
            let formatted = self.formatter.format(&rendered)?;

            // A kind without documents never re-created its folder after the
            // wipe; the index file still gets written.
            let folder = root.join(kind.folder_name());
            fs::create_dir_all(&folder)
                .with_context(|| format!("failed to create folder {folder:?}"))?;

            let path = folder.join(paths::index_file_name(kind));
            match write_new(&path, &formatted) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    warn!("refusing to overwrite existing {path:?}");
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("failed to write {path:?}"));
                }
            }
        }
        Ok(())
    }

    /// Writes the top-level spec document unless one already exists; an
    /// existing spec is hand-editable and silently preserved.
    fn persist_spec(&mut self, root: &Path) -> anyhow::Result<()> {
        let path = root.join(SPEC_FILE_NAME);
        if path.exists() {
            return Ok(());
        }

        let schema_index = index_stem(DocumentKind::Schema);
        let tag_index = index_stem(DocumentKind::Tag);
        let method_index = index_stem(DocumentKind::Method);
        let parameter_index = index_stem(DocumentKind::Parameter);

        let rendered = fill(
            self.templates.get(TemplateKind::Spec),
            &[
                ("{{SCHEMA_FOLDER_PATH}}", DocumentKind::Schema.folder_name()),
                ("{{TAG_FOLDER_PATH}}", DocumentKind::Tag.folder_name()),
                ("{{METHOD_FOLDER_PATH}}", DocumentKind::Method.folder_name()),
                (
                    "{{PARAMETER_FOLDER_PATH}}",
                    DocumentKind::Parameter.folder_name(),
                ),
                ("{{SCHEMA_INDEX_FILE_NAME}}", schema_index.as_str()),
                ("{{TAG_INDEX_FILE_NAME}}", tag_index.as_str()),
                ("{{METHOD_INDEX_FILE_NAME}}", method_index.as_str()),
                ("{{PARAMETER_INDEX_FILE_NAME}}", parameter_index.as_str()),
            ],
        );
        let formatted = self.formatter.format(&rendered)?;
        write_new(&path, &formatted).with_context(|| format!("failed to write {path:?}"))
    }
}

fn index_stem(kind: DocumentKind) -> String {
    paths::file_stem(Path::new(&paths::index_file_name(kind)))
}

/// Recursively removes the folder; an absent folder is fine.
fn wipe_folder(folder: &Path) -> anyhow::Result<()> {
    match fs::remove_dir_all(folder) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("failed to wipe folder {folder:?}")),
    }
}

/// Creates the file; an existing file is refused, never truncated.
fn write_new(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(contents.as_bytes())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_wipe_folder_tolerates_absent_folder() {
        let dir = tempfile::tempdir().unwrap();
        assert!(wipe_folder(&dir.path().join("never-created")).is_ok());
    }

    #[test]
    fn test_wipe_folder_removes_contents() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("schema");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("stale.ts"), "old").unwrap();

        wipe_folder(&folder).unwrap();
        assert!(!folder.exists());
    }

    #[test]
    fn test_write_new_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.ts");
        write_new(&path, "first").unwrap();

        let err = write_new(&path, "second").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_index_stem() {
        assert_eq!(index_stem(DocumentKind::Schema), "index.swagger.schema");
        assert_eq!(index_stem(DocumentKind::Parameter), "index.swagger.parameter");
    }
}
