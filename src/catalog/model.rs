//! Serde model for `templates.json` entries.
//!
//! The catalog file is an object keyed by template id. Entry values come from
//! README front matter, so any field may be `null`, a bare string where a list
//! is expected, or missing entirely. Deserialization normalizes all of that
//! into `Option`s and label lists; empty strings count as absent.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Unique key of a template within the catalog (the template's folder name).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(value: &str) -> Self {
        TemplateId(value.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// One template's metadata entry.
pub struct TemplateRecord {
    /// Filled from the catalog object key, never from the entry body.
    #[serde(skip_deserializing)]
    pub id: TemplateId,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "labels", skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "labels", skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    #[serde(default, deserialize_with = "labels", skip_serializing_if = "Vec::is_empty")]
    pub frameworks: Vec<String>,
    #[serde(default, deserialize_with = "labels", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(
        rename = "last-commit-date",
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_commit_date: Option<String>,
    /// Front matter keys this model does not know about.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TemplateRecord {
    /// Parsed `last-commit-date`, or `None` when missing or unparseable.
    pub fn last_commit_at(&self) -> Option<DateTime<FixedOffset>> {
        self.last_commit_date.as_deref().and_then(parse_commit_date)
    }

    /// Timestamp used for date ordering; records without one sort as the epoch.
    pub fn sort_timestamp(&self) -> DateTime<FixedOffset> {
        self.last_commit_at().unwrap_or_else(epoch)
    }

    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }

    /// All label lists in card order: services, languages, frameworks, tags.
    pub fn badges(&self) -> impl Iterator<Item = &str> {
        self.services
            .iter()
            .chain(&self.languages)
            .chain(&self.frameworks)
            .chain(&self.tags)
            .map(String::as_str)
    }
}

/// Parse a commit timestamp as written by the publishing workflow
/// (`git log --format=%ci`), falling back to RFC 3339 and a bare date.
pub fn parse_commit_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
        })
}

fn epoch() -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&NaiveDateTime::default()).fixed_offset()
}

// Front matter is hand-written, so a field of the wrong JSON type is dropped
// with a warning instead of failing the whole catalog.

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) if !value.is_empty() => Some(value),
        Value::String(_) | Value::Null => None,
        other => {
            warn!("ignoring non-text field value {other}");
            None
        }
    })
}

fn labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::String(single) => vec![single],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(label) => Some(label),
                Value::Null => None,
                other => {
                    warn!("ignoring non-text label {other}");
                    None
                }
            })
            .collect(),
        other => {
            warn!("ignoring label field value {other}");
            Vec::new()
        }
    };
    Ok(items.into_iter().filter(|item| !item.is_empty()).collect())
}
