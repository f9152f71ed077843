#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use template_gallery::{TemplateCatalog, TemplateId, TemplateRecord};
use tempfile::TempDir;

// A docs directory holding templates.json and featured-templates.json,
// removed when dropped.
pub struct FixtureDocs {
    pub dir: TempDir,
}

impl FixtureDocs {
    pub fn new(templates: &Value, featured: &[&str]) -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate docs dir")?;
        fs::write(
            dir.path().join("templates.json"),
            serde_json::to_string_pretty(templates)?,
        )?;
        fs::write(
            dir.path().join("featured-templates.json"),
            serde_json::to_string(featured)?,
        )?;
        Ok(Self { dir })
    }

    pub fn sample() -> Result<Self> {
        Self::new(&sample_templates(), &["rag-chat", "legacy-java"])
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn templates_path(&self) -> PathBuf {
        self.root().join("templates.json")
    }

    pub fn featured_path(&self) -> PathBuf {
        self.root().join("featured-templates.json")
    }

    pub fn load(&self) -> Result<TemplateCatalog> {
        TemplateCatalog::load(&self.templates_path(), Some(&self.featured_path()))
    }
}

// Catalog shaped like the published gallery: mixed nulls, bare-string labels,
// one entry without a commit date.
pub fn sample_templates() -> Value {
    json!({
        "rag-chat": {
            "title": "RAG Chat Assistant",
            "description": "Chat over your documents with retrieval augmented generation.",
            "category": "AI Apps & Agents",
            "industry": "Retail",
            "languages": ["Python", "TypeScript"],
            "services": ["Azure OpenAI", "Azure AI Search"],
            "frameworks": ["FastAPI", "React"],
            "tags": ["RAG", "chat"],
            "thumbnail": "media/thumbnail.png",
            "video": "media/demo.mp4",
            "version": "1.2.0",
            "last-commit-date": "2025-11-11 09:30:00 +0000"
        },
        "legacy-java": {
            "title": "legacy Java modernization",
            "description": "Move a Spring monolith to containers.",
            "category": "App Modernization",
            "industry": null,
            "languages": "Java",
            "services": ["Azure Container Apps"],
            "frameworks": ["Spring Boot"],
            "tags": null,
            "version": "0.9.1",
            "last-commit-date": "2025-03-02 14:00:00 +0100"
        },
        "go-ingest": {
            "title": "Event ingestion in Go",
            "description": "Stream events into a lakehouse.",
            "category": "Data Centric Apps",
            "industry": "Manufacturing",
            "languages": ["Go", "Rust"],
            "services": ["Event Hubs", "Azure Functions"],
            "frameworks": null,
            "version": "2.0.0",
            "last-commit-date": "2024-12-24 08:00:00 +0000"
        },
        "py-notebook": {
            "title": "Analytics notebook",
            "description": "Python notebooks for exploratory analysis.",
            "category": "Data Centric Apps",
            "industry": "",
            "languages": ["Python"],
            "services": ["Azure Functions"],
            "tags": ["notebook"]
        }
    })
}

pub fn record(id: &str, title: &str) -> TemplateRecord {
    TemplateRecord {
        id: TemplateId::from(id),
        title: title.to_string(),
        ..TemplateRecord::default()
    }
}

pub fn ids<'a>(records: impl IntoIterator<Item = &'a TemplateRecord>) -> Vec<&'a str> {
    records.into_iter().map(|r| r.id.as_str()).collect()
}

pub fn bin(name: &str) -> PathBuf {
    match name {
        "gallery" => PathBuf::from(env!("CARGO_BIN_EXE_gallery")),
        "update-templates" => PathBuf::from(env!("CARGO_BIN_EXE_update-templates")),
        "catalog-validate" => PathBuf::from(env!("CARGO_BIN_EXE_catalog-validate")),
        other => panic!("unknown binary {other}"),
    }
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if !output.status.success() {
        anyhow::bail!(
            "command {:?} failed: {}\nstdout:\n{}\nstderr:\n{}",
            cmd.get_program(),
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}
