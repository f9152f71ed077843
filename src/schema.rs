//! JSON Schema contract for `templates.json`.
//!
//! The schema ships inside the binary so the publishing workflow can check a
//! catalog without a checkout of this repository. It only constrains shape;
//! the loader's normalization (empty strings, bare labels) still applies.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;

const BUNDLED_SCHEMA: &str = include_str!("../schema/templates.schema.json");

/// Compiled catalog schema.
pub struct CatalogSchema {
    compiled: JSONSchema,
}

impl CatalogSchema {
    /// Compile the schema bundled with the crate.
    pub fn bundled() -> Result<Self> {
        let raw: Value =
            serde_json::from_str(BUNDLED_SCHEMA).context("parsing bundled catalog schema")?;
        Self::compile(&raw)
    }

    pub fn compile(raw: &Value) -> Result<Self> {
        let compiled = JSONSchema::compile(raw)
            .map_err(|err| anyhow!("compiling catalog schema: {err}"))?;
        Ok(Self { compiled })
    }

    /// Check `document`, reporting every violation at once.
    pub fn validate(&self, document: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(document) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("catalog failed schema validation:\n{}", details);
        }
        Ok(())
    }
}
