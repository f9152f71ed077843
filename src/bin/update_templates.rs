//! Fold a template README's front matter into templates.json.
//!
//! Run by the publishing workflow for every changed README. The repository
//! root comes from GITHUB_WORKSPACE (default `.`) and the commit timestamp
//! from LAST_COMMIT_DATE.

use anyhow::Result;
use clap::Parser;
use std::env;
use std::path::PathBuf;
use template_gallery::{UpdateOutcome, update_catalog};

const ENV_WORKSPACE: &str = "GITHUB_WORKSPACE";
const ENV_LAST_COMMIT_DATE: &str = "LAST_COMMIT_DATE";

#[derive(Parser, Debug)]
#[command(name = "update-templates")]
#[command(about = "Update templates.json from a template README's front matter")]
struct Cli {
    /// README path relative to the repository root, e.g. templates/rag-chat/README.md.
    readme_path: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let repo_root = env_non_empty(ENV_WORKSPACE)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let last_commit_date = env_non_empty(ENV_LAST_COMMIT_DATE);

    match update_catalog(&cli.readme_path, &repo_root, last_commit_date.as_deref())? {
        UpdateOutcome::Updated { template } => {
            println!("Updated templates.json with metadata from {template}");
        }
        UpdateOutcome::Skipped { template } => {
            println!("Skipping template folder: {template} (starts with underscore)");
        }
        UpdateOutcome::NoFrontmatter => {
            println!("Warning: No frontmatter found in {}", cli.readme_path.display());
        }
    }
    println!("Successfully processed {}", cli.readme_path.display());
    Ok(())
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
