//! Validate a templates.json document against the bundled catalog schema,
//! then load it the way the gallery does.
//!
//! Usage:
//!   catalog-validate --file docs/templates.json
//!   catalog-validate < templates.json

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::fs::File;
use std::io::{Read, stdin};
use std::path::PathBuf;
use template_gallery::catalog::records_from_value;
use template_gallery::{CatalogSchema, TemplateCatalog};

#[derive(Parser, Debug)]
#[command(name = "catalog-validate")]
#[command(about = "Validate templates.json against the catalog schema")]
struct Cli {
    /// Optional input file; reads stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
}

fn read_input(file: Option<PathBuf>) -> Result<Value> {
    let mut buf = String::new();
    if let Some(path) = file {
        File::open(&path)
            .with_context(|| format!("opening input file {}", path.display()))?
            .read_to_string(&mut buf)
            .with_context(|| format!("reading input file {}", path.display()))?;
    } else {
        stdin()
            .read_to_string(&mut buf)
            .context("reading stdin for input JSON")?;
    }
    let value: Value = serde_json::from_str(&buf).context("parsing input JSON")?;
    Ok(value)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let input = read_input(cli.file)?;

    CatalogSchema::bundled()?.validate(&input)?;
    let records = records_from_value(input)?;
    let catalog = TemplateCatalog::new(records, Vec::new())?;

    println!("catalog ok: {} templates", catalog.len());
    Ok(())
}
