//! README front matter extraction and `templates.json` upkeep.
//!
//! Each template folder carries a README whose leading `---` block lists the
//! template's metadata as flat `key: value` lines. The publishing workflow
//! runs [`update_catalog`] for every changed README so the gallery's catalog
//! stays in sync with the templates themselves.

use crate::catalog::TEMPLATES_FILE;
use anyhow::{Context, Result, bail};
use log::{info, warn};
use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Key the workflow stamps with the template's last commit time.
pub const LAST_COMMIT_KEY: &str = "last-commit-date";

const FRONTMATTER_PATTERN: &str = r"(?s)\A---\s*\n(.*?)\n---\s*\n";

/// Extract the front matter block as ordered metadata, or `None` when the
/// content does not open with one.
///
/// Values are `[a, b]` lists, `null` for an empty value, or plain strings.
/// Anything after a `#` on a line is dropped as a comment.
pub fn parse_frontmatter(content: &str) -> Result<Option<Map<String, Value>>> {
    let pattern = Regex::new(FRONTMATTER_PATTERN).context("compiling front matter pattern")?;
    let Some(block) = pattern.captures(content).and_then(|caps| caps.get(1)) else {
        return Ok(None);
    };

    let mut metadata = Map::new();
    for raw_line in block.as_str().split('\n') {
        let line = match raw_line.find('#') {
            Some(comment) => &raw_line[..comment],
            None => raw_line,
        }
        .trim();
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        metadata.insert(key.trim().to_string(), parse_value(value.trim()));
    }
    Ok(Some(metadata))
}

fn parse_value(value: &str) -> Value {
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        return Value::Array(
            inner
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        );
    }
    if value.is_empty() {
        Value::Null
    } else {
        Value::String(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The template's entry was written to the catalog.
    Updated { template: String },
    /// Folders starting with `_` are scaffolding, not templates.
    Skipped { template: String },
    /// The README has no front matter; the catalog was left alone.
    NoFrontmatter,
}

/// Fold the front matter of `readme_path` into `repo_root/templates.json`.
///
/// The template name is the README's parent folder. `last_commit_date`, when
/// non-empty, is stored trimmed under [`LAST_COMMIT_KEY`]. The existing entry
/// for the template is replaced in place; other entries keep their order.
pub fn update_catalog(
    readme_path: &Path,
    repo_root: &Path,
    last_commit_date: Option<&str>,
) -> Result<UpdateOutcome> {
    let readme_full_path = repo_root.join(readme_path);
    if !readme_full_path.is_file() {
        bail!("README file not found: {}", readme_full_path.display());
    }

    let template = template_name(readme_path)?;
    if template.starts_with('_') {
        info!("skipping template folder {template} (starts with underscore)");
        return Ok(UpdateOutcome::Skipped { template });
    }

    let content = fs::read_to_string(&readme_full_path)
        .with_context(|| format!("reading {}", readme_full_path.display()))?;
    // A block holding only comments or blank lines carries no metadata either.
    let Some(mut metadata) = parse_frontmatter(&content)?.filter(|fields| !fields.is_empty())
    else {
        warn!("no front matter found in {}", readme_path.display());
        return Ok(UpdateOutcome::NoFrontmatter);
    };

    if let Some(date) = last_commit_date.map(str::trim).filter(|date| !date.is_empty()) {
        metadata.insert(LAST_COMMIT_KEY.to_string(), Value::String(date.to_string()));
    }

    let catalog_path = repo_root.join(TEMPLATES_FILE);
    let mut catalog = read_catalog_object(&catalog_path)?;
    catalog.insert(template.clone(), Value::Object(metadata));
    write_catalog_object(&catalog_path, &catalog)?;

    info!("updated {} with metadata from {template}", catalog_path.display());
    Ok(UpdateOutcome::Updated { template })
}

fn template_name(readme_path: &Path) -> Result<String> {
    let name = readme_path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.is_empty() {
        bail!(
            "cannot derive a template name from {}; expected <template>/README.md",
            readme_path.display()
        );
    }
    Ok(name)
}

/// Existing catalog entries, or an empty catalog when the file is missing.
fn read_catalog_object(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    match serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))? {
        Value::Object(entries) => Ok(entries),
        _ => bail!("{} must contain a JSON object", path.display()),
    }
}

/// Two-space indented JSON with a trailing newline, swapped in atomically.
fn write_catalog_object(path: &Path, catalog: &Map<String, Value>) -> Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    let rendered = serde_json::to_string_pretty(catalog).context("serializing catalog")?;
    temp.write_all(rendered.as_bytes())
        .and_then(|_| temp.write_all(b"\n"))
        .with_context(|| format!("writing {}", temp.path().display()))?;
    temp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
