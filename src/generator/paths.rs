//! File naming and path allocation for generated documents.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;

use super::documents::DocumentKind;

static FILE_NAME_ILLEGAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]+"#).expect("valid file name regex"));

static SYMBOL_ILLEGAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Latin}\p{Zs}\p{M}\p{Nd}'\s-]").expect("valid symbol regex"));

/// Filesystem-safe, lower-cased derivation of a route name.
pub fn route_slug(name: &str) -> String {
    FILE_NAME_ILLEGAL
        .replace_all(name, "")
        .to_lowercase()
        .trim()
        .to_string()
}

/// Allocates the output path for (route, kind) inside `folder`, creating
/// the folder when missing. No content is written here.
pub fn document_file_path(
    folder: &Path,
    route: &str,
    kind: DocumentKind,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(folder).with_context(|| format!("failed to create folder {folder:?}"))?;
    Ok(folder.join(format!("{}{}", route_slug(route), kind.file_extension())))
}

/// Export symbol naming a route's collection in generated TypeScript:
/// the route name stripped to safe characters, capitalized, plus the
/// kind suffix.
pub fn export_symbol(route: &str, kind: DocumentKind) -> String {
    let cleaned = SYMBOL_ILLEGAL.replace_all(route, "");
    let mut chars = cleaned.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("{capitalized}{}", kind.symbol_suffix())
}

/// Index file name for a kind, e.g. `index.swagger.schema.ts`.
pub fn index_file_name(kind: DocumentKind) -> String {
    format!("index{}", kind.file_extension())
}

/// File name minus its final extension, as used in import statements.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
