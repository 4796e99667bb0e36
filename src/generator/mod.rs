//! # Generator Module
//!
//! Turns a populated [`Registry`](crate::registry::Registry) into a tree of
//! Swagger document source files.
//!
//! ## Pipeline
//!
//! ```text
//! Registry → Aggregators → Document Store → Wrapper Templates → Formatter → Files
//!                                        ↘ Index Builder → Index Files
//!                                                         ↘ Spec Document
//! ```
//!
//! 1. **Templates** — raw bodies are loaded once per run from a
//!    [`TemplateSource`] and rendered by literal placeholder substitution.
//! 2. **Aggregators** — one per document kind (schema, tag, parameter,
//!    method); each filters the registry, renders one block per entity and
//!    groups blocks by root route.
//! 3. **Document store** — accumulates rendered blocks per (kind, route)
//!    and pins each document's output path.
//! 4. **Orchestrator** — [`SpecGenerator`] wipes each kind's folder,
//!    persists the documents through the [`TextFormatter`] collaborator,
//!    then assembles per-kind index files and the top-level spec document.
//!
//! ## Generated layout
//!
//! ```text
//! <out>/swagger/
//! ├── schema/<slug>.swagger.schema.ts        + index.swagger.schema.ts
//! ├── tag/<slug>.swagger.tag.ts              + index.swagger.tag.ts
//! ├── parameter/<slug>.swagger.parameter.ts  + index.swagger.parameter.ts
//! ├── method/<slug>.swagger.method.ts        + index.swagger.method.ts
//! └── index.swagger.ts                       (written once, never overwritten)
//! ```

mod documents;
mod format;
mod method;
mod parameter;
mod paths;
mod project;
mod schema;
mod tag;
mod templates;

pub use documents::{Document, DocumentKind, DocumentStore, IndexBuilder};
pub use format::{CommandFormatter, PassthroughFormatter, TextFormatter};
pub use method::generate_methods;
pub use parameter::generate_parameters;
pub use paths::{document_file_path, export_symbol, file_stem, index_file_name, route_slug};
pub use project::{SpecGenerator, OUTPUT_FOLDER_NAME, SPEC_FILE_NAME};
pub use schema::generate_schemas;
pub use tag::generate_tags;
pub use templates::{
    DirTemplateSource, EmbeddedTemplates, TemplateKind, TemplateSource, TemplateStore,
};
