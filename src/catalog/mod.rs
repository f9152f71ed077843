//! Template catalog wiring.
//!
//! This module wraps the gallery's static data (`templates.json` and
//! `featured-templates.json`) so the pipeline and the CLI share one loaded,
//! validated snapshot. Types here mirror the catalog fields; callers use
//! `TemplateCatalog` for ordered access and id lookups.

pub mod index;
pub mod model;

pub use index::{
    FilterOptions, TemplateCatalog, load_featured_from_path, load_templates_from_path,
    records_from_value,
};
pub use model::{TemplateId, TemplateRecord, parse_commit_date};

/// Catalog file name inside the docs directory.
pub const TEMPLATES_FILE: &str = "templates.json";

/// Featured id list file name inside the docs directory.
pub const FEATURED_FILE: &str = "featured-templates.json";
