//! Filter predicate: an AND of independent criteria, each multi-select being
//! an OR over its selected labels.

use crate::catalog::TemplateRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// The active search/category/industry/multi-select criteria.
pub struct FilterState {
    /// Free-text search. Matched case-insensitively; not trimmed.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub services: BTreeSet<String>,
    #[serde(default)]
    pub frameworks: BTreeSet<String>,
}

impl FilterState {
    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && selection(&self.category).is_none()
            && selection(&self.industry).is_none()
            && self.languages.is_empty()
            && self.services.is_empty()
            && self.frameworks.is_empty()
    }

    /// Whether `record` passes every active criterion.
    pub fn matches(&self, record: &TemplateRecord) -> bool {
        self.matches_with_needle(record, &self.query.to_lowercase())
    }

    fn matches_with_needle(&self, record: &TemplateRecord, needle: &str) -> bool {
        matches_query(record, needle)
            && matches_exact(&self.category, record.category.as_deref())
            && matches_exact(&self.industry, record.industry.as_deref())
            && intersects(&self.languages, &record.languages)
            && intersects(&self.services, &record.services)
            && intersects(&self.frameworks, &record.frameworks)
    }
}

/// Positions of the records passing `filter`, ascending.
///
/// Every filtering entry point goes through here, so the query is lowercased
/// once per pass rather than once per record.
pub fn matching_positions(records: &[TemplateRecord], filter: &FilterState) -> Vec<usize> {
    let needle = filter.query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches_with_needle(record, &needle))
        .map(|(position, _)| position)
        .collect()
}

/// Records passing `filter`, in input order.
pub fn filter_records<'a>(
    records: &'a [TemplateRecord],
    filter: &FilterState,
) -> Vec<&'a TemplateRecord> {
    matching_positions(records, filter)
        .into_iter()
        .map(|position| &records[position])
        .collect()
}

// An empty string from an unselected dropdown means "any".
fn selection(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn matches_query(record: &TemplateRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(needle);
    hit(record.title.as_str())
        || hit(record.description.as_str())
        || record.category.as_deref().is_some_and(hit)
        || record.industry.as_deref().is_some_and(hit)
        || record
            .languages
            .iter()
            .chain(&record.services)
            .chain(&record.frameworks)
            .chain(&record.tags)
            .any(|label| hit(label.as_str()))
}

fn matches_exact(wanted: &Option<String>, actual: Option<&str>) -> bool {
    match selection(wanted) {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}

fn intersects(selected: &BTreeSet<String>, labels: &[String]) -> bool {
    selected.is_empty() || labels.iter().any(|label| selected.contains(label))
}
