//! Loaded template catalog plus derived lookups.
//!
//! The catalog keeps records in file order (the order every stable sort falls
//! back to) and indexes them by id. It is strict about structural problems in
//! `templates.json` and lenient about individual fields, which the model
//! already normalizes.

use crate::catalog::{TemplateId, TemplateRecord};
use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
/// Template records in catalog order plus the featured id list.
pub struct TemplateCatalog {
    records: Vec<TemplateRecord>,
    by_id: BTreeMap<TemplateId, usize>,
    featured: Vec<TemplateId>,
}

impl TemplateCatalog {
    /// Build a catalog from records already in memory.
    ///
    /// Ids must be non-empty and unique. Featured ids that do not name a
    /// record are dropped with a warning.
    pub fn new(records: Vec<TemplateRecord>, featured: Vec<TemplateId>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for (position, record) in records.iter().enumerate() {
            if record.id.0.trim().is_empty() {
                bail!("encountered template with no id at position {position}");
            }
            if by_id.insert(record.id.clone(), position).is_some() {
                bail!("duplicate template id {}", record.id);
            }
        }

        let mut seen = BTreeSet::new();
        let mut kept = Vec::with_capacity(featured.len());
        for id in featured {
            if !by_id.contains_key(&id) {
                warn!("featured template '{id}' is not in the catalog; skipping");
                continue;
            }
            if seen.insert(id.clone()) {
                kept.push(id);
            }
        }

        Ok(Self {
            records,
            by_id,
            featured: kept,
        })
    }

    /// Load `templates.json` and, when given, `featured-templates.json`.
    pub fn load(templates_path: &Path, featured_path: Option<&Path>) -> Result<Self> {
        let records = load_templates_from_path(templates_path)?;
        let featured = match featured_path {
            Some(path) => load_featured_from_path(path)?,
            None => Vec::new(),
        };
        let catalog = Self::new(records, featured)
            .with_context(|| format!("indexing {}", templates_path.display()))?;
        info!(
            "loaded {} templates ({} featured) from {}",
            catalog.len(),
            catalog.featured.len(),
            templates_path.display()
        );
        Ok(catalog)
    }

    /// All records in catalog order.
    pub fn records(&self) -> &[TemplateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a template by id.
    pub fn get(&self, id: &TemplateId) -> Option<&TemplateRecord> {
        self.by_id.get(id).map(|&position| &self.records[position])
    }

    /// Featured ids that resolved against the catalog, in file order.
    pub fn featured_ids(&self) -> &[TemplateId] {
        &self.featured
    }

    /// Featured records in catalog order, which is how the gallery shows them.
    pub fn featured(&self) -> impl Iterator<Item = &TemplateRecord> {
        self.records
            .iter()
            .filter(|record| self.featured.contains(&record.id))
    }

    /// Distinct values offered by each filter control.
    pub fn filter_options(&self) -> FilterOptions {
        let mut options = FilterOptions::default();
        for record in &self.records {
            if let Some(category) = &record.category {
                options.categories.insert(category.clone());
            }
            if let Some(industry) = &record.industry {
                options.industries.insert(industry.clone());
            }
            options.languages.extend(record.languages.iter().cloned());
            options.services.extend(record.services.iter().cloned());
            options.frameworks.extend(record.frameworks.iter().cloned());
        }
        options
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
/// Sorted distinct values per filter control.
pub struct FilterOptions {
    pub categories: BTreeSet<String>,
    pub industries: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub services: BTreeSet<String>,
    pub frameworks: BTreeSet<String>,
}

/// Read `templates.json` into records, keeping the file's key order.
pub fn load_templates_from_path(path: &Path) -> Result<Vec<TemplateRecord>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading template catalog {}", path.display()))?;
    let value: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing template catalog {}", path.display()))?;
    records_from_value(value).with_context(|| format!("loading {}", path.display()))
}

/// Convert a parsed `templates.json` document into records.
pub fn records_from_value(value: Value) -> Result<Vec<TemplateRecord>> {
    let entries: Map<String, Value> = match value {
        Value::Object(entries) => entries,
        _ => bail!("template catalog must be a JSON object keyed by template id"),
    };

    let mut records = Vec::with_capacity(entries.len());
    for (key, entry) in entries {
        if !entry.is_object() {
            bail!("template '{key}' must be a JSON object");
        }
        let mut record: TemplateRecord = serde_json::from_value(entry)
            .with_context(|| format!("parsing template '{key}'"))?;
        record.extra.remove("id");
        record.id = TemplateId(key);
        records.push(record);
    }
    Ok(records)
}

/// Read `featured-templates.json` (a JSON array of template ids).
pub fn load_featured_from_path(path: &Path) -> Result<Vec<TemplateId>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading featured list {}", path.display()))?;
    let ids: Vec<String> = serde_json::from_str(&data)
        .with_context(|| format!("parsing featured list {}", path.display()))?;
    Ok(ids.into_iter().map(TemplateId).collect())
}
