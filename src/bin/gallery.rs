//! Browse the template catalog from the terminal.
//!
//! Usage:
//!   gallery --search agent --language Python --sort alpha-asc
//!   gallery --catalog docs/templates.json --facets
//!   gallery --featured-only --format json
//!   gallery --show rag-chat

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use template_gallery::display::{render_card, render_details};
use template_gallery::{
    FilterState, Gallery, SortKey, TemplateCatalog, TemplateId, TemplateRecord,
    default_catalog_path, default_featured_path, find_docs_root, split_list,
};

#[derive(Parser, Debug)]
#[command(name = "gallery")]
#[command(about = "Filter, search and sort the template catalog")]
struct Cli {
    /// Path to templates.json; located via TEMPLATE_GALLERY_ROOT or the working directory when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Path to featured-templates.json; defaults to the file next to the catalog.
    #[arg(long)]
    featured: Option<PathBuf>,
    /// Case-insensitive text matched against titles, descriptions, categories and labels.
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    industry: Option<String>,
    /// Repeat or comma-separate to select several.
    #[arg(long = "language")]
    languages: Vec<String>,
    #[arg(long = "service")]
    services: Vec<String>,
    #[arg(long = "framework")]
    frameworks: Vec<String>,
    #[arg(long, default_value_t = SortKey::DateDesc)]
    sort: SortKey,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// List the values available for each filter instead of templates.
    #[arg(long, conflicts_with_all = ["show", "featured_only"])]
    facets: bool,
    /// List only the featured templates.
    #[arg(long)]
    featured_only: bool,
    /// Print every field of one template.
    #[arg(long, value_name = "ID")]
    show: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Listing<'a> {
    shown: usize,
    total: usize,
    sort: String,
    templates: Vec<&'a TemplateRecord>,
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
    let catalog = load(&cli)?;

    if cli.facets {
        return print_facets(&catalog, cli.format);
    }
    if let Some(id) = &cli.show {
        let Some(record) = catalog.get(&TemplateId::from(id.as_str())) else {
            bail!("no template with id '{id}'");
        };
        match cli.format {
            Format::Text => print!("{}", render_details(record)),
            Format::Json => println!("{}", serde_json::to_string_pretty(record)?),
        }
        return Ok(());
    }

    let filter = FilterState {
        query: cli.search.clone(),
        category: cli.category.clone(),
        industry: cli.industry.clone(),
        languages: split_list(&cli.languages).into_iter().collect(),
        services: split_list(&cli.services).into_iter().collect(),
        frameworks: split_list(&cli.frameworks).into_iter().collect(),
    };
    let mut gallery = Gallery::new(catalog);
    gallery.apply(filter, cli.sort);

    let featured_ids: Vec<TemplateId> = gallery.catalog().featured_ids().to_vec();
    let templates: Vec<&TemplateRecord> = if cli.featured_only {
        gallery.featured().collect()
    } else {
        gallery.visible().collect()
    };

    match cli.format {
        Format::Json => {
            let listing = Listing {
                shown: templates.len(),
                total: gallery.catalog().len(),
                sort: gallery.sort_key().to_string(),
                templates,
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Format::Text => {
            if templates.is_empty() {
                println!("No templates match the current filters.");
            }
            for record in &templates {
                println!("{}", render_card(record, featured_ids.contains(&record.id)));
            }
            if !cli.featured_only {
                println!("{}", gallery.summary());
            }
        }
    }
    Ok(())
}

fn load(cli: &Cli) -> Result<TemplateCatalog> {
    let catalog_path = match &cli.catalog {
        Some(path) => path.clone(),
        None => default_catalog_path(&find_docs_root().context("locating gallery docs")?),
    };
    let featured_path = match &cli.featured {
        Some(path) => Some(path.clone()),
        None => catalog_path
            .parent()
            .map(default_featured_path)
            .filter(|path| path.is_file()),
    };
    TemplateCatalog::load(&catalog_path, featured_path.as_deref())
}

fn print_facets(catalog: &TemplateCatalog, format: Format) -> Result<()> {
    let options = catalog.filter_options();
    match format {
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "categories": options.categories,
                "industries": options.industries,
                "languages": options.languages,
                "services": options.services,
                "frameworks": options.frameworks,
            }))?
        ),
        Format::Text => {
            for (name, values) in [
                ("categories", &options.categories),
                ("industries", &options.industries),
                ("languages", &options.languages),
                ("services", &options.services),
                ("frameworks", &options.frameworks),
            ] {
                let joined = values.iter().cloned().collect::<Vec<_>>().join(", ");
                println!("{name}: {joined}");
            }
        }
    }
    Ok(())
}
