//! Template gallery engine.
//!
//! Loads the gallery's static catalog, runs the filter/sort pipeline over it
//! and keeps the catalog in sync with template READMEs. The binaries under
//! `src/bin` are thin wrappers over this library.

pub mod catalog;
pub mod display;
pub mod frontmatter;
pub mod gallery;
pub mod pipeline;
pub mod schema;

pub use catalog::{
    FEATURED_FILE, FilterOptions, TEMPLATES_FILE, TemplateCatalog, TemplateId, TemplateRecord,
};
pub use frontmatter::{UpdateOutcome, parse_frontmatter, update_catalog};
pub use gallery::{Gallery, LabelGroup};
pub use pipeline::{FilterState, SortKey, select};
pub use schema::CatalogSchema;

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Points at the directory holding `templates.json` (or its parent `docs/`).
pub const ENV_GALLERY_ROOT: &str = "TEMPLATE_GALLERY_ROOT";
const DOCS_DIR: &str = "docs";

fn docs_dir_in(candidate: &Path) -> Option<PathBuf> {
    if candidate.join(TEMPLATES_FILE).is_file() {
        return Some(candidate.to_path_buf());
    }
    let nested = candidate.join(DOCS_DIR);
    if nested.join(TEMPLATES_FILE).is_file() {
        return Some(nested);
    }
    None
}

fn docs_dir_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let found = docs_dir_in(Path::new(hint))?;
    fs::canonicalize(found).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if let Some(found) = docs_dir_in(&dir) {
            return Some(found);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the directory serving `templates.json`.
///
/// Checks `TEMPLATE_GALLERY_ROOT` first, then walks up from the working
/// directory looking for `templates.json` or `docs/templates.json`.
pub fn find_docs_root() -> Result<PathBuf> {
    if let Ok(hint) = env::var(ENV_GALLERY_ROOT) {
        if let Some(root) = docs_dir_from_hint(&hint) {
            return Ok(root);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate {TEMPLATES_FILE}. Pass --catalog or set {ENV_GALLERY_ROOT} to the gallery docs directory."
    );
}

/// `templates.json` inside a docs directory.
pub fn default_catalog_path(docs_root: &Path) -> PathBuf {
    docs_root.join(TEMPLATES_FILE)
}

/// `featured-templates.json` inside a docs directory.
pub fn default_featured_path(docs_root: &Path) -> PathBuf {
    docs_root.join(FEATURED_FILE)
}

/// Split repeated/comma-separated CLI values into a flat list.
///
/// Only commas separate entries; labels such as `Azure Functions` keep their
/// inner spaces.
pub fn split_list<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.as_ref().split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
