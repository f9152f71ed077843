// Catalog loading guard rails: file order, normalization, featured lookup and
// structural rejection.
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use serde_json::json;
use std::fs;
use template_gallery::{CatalogSchema, Gallery, SortKey, TemplateCatalog, TemplateId};

use common::{FixtureDocs, ids, sample_templates};

#[test]
fn load_keeps_file_order_and_normalizes_fields() -> Result<()> {
    let docs = FixtureDocs::sample()?;
    let catalog = docs.load()?;
    assert_eq!(
        ids(catalog.records()),
        vec!["rag-chat", "legacy-java", "go-ingest", "py-notebook"]
    );

    let legacy = catalog.get(&TemplateId::from("legacy-java")).expect("legacy present");
    assert_eq!(legacy.languages, vec!["Java"]);
    assert!(legacy.industry.is_none());
    assert!(legacy.tags.is_empty());

    let notebook = catalog.get(&TemplateId::from("py-notebook")).expect("notebook present");
    assert!(notebook.industry.is_none(), "empty string counts as absent");
    assert!(notebook.last_commit_at().is_none());
    Ok(())
}

#[test]
fn featured_follows_catalog_order_and_drops_unknown_ids() -> Result<()> {
    let docs = FixtureDocs::new(&sample_templates(), &["go-ingest", "retired", "rag-chat"])?;
    let catalog = docs.load()?;
    assert_eq!(ids(catalog.featured()), vec!["rag-chat", "go-ingest"]);
    assert_eq!(catalog.featured_ids().len(), 2);
    Ok(())
}

#[test]
fn featured_file_is_optional() -> Result<()> {
    let docs = FixtureDocs::sample()?;
    let catalog = TemplateCatalog::load(&docs.templates_path(), None)?;
    assert_eq!(catalog.featured().count(), 0);
    assert_eq!(catalog.len(), 4);
    Ok(())
}

#[test]
fn filter_options_cover_every_record() -> Result<()> {
    let catalog = FixtureDocs::sample()?.load()?;
    let options = catalog.filter_options();
    assert_eq!(
        options.categories.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["AI Apps & Agents", "App Modernization", "Data Centric Apps"]
    );
    assert_eq!(
        options.industries.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["Manufacturing", "Retail"]
    );
    assert!(options.languages.contains("Java"));
    assert!(options.services.contains("Event Hubs"));
    assert!(!options.frameworks.contains("RAG"), "tags are not a filter control");
    Ok(())
}

#[test]
fn structural_problems_are_errors() -> Result<()> {
    let docs = FixtureDocs::new(&json!({"ok": {"title": "fine"}}), &[])?;

    fs::write(docs.templates_path(), "[1, 2]")?;
    let err = TemplateCatalog::load(&docs.templates_path(), None).unwrap_err();
    assert!(format!("{err:#}").contains("JSON object keyed by template id"));

    fs::write(docs.templates_path(), r#"{"a": "not an object"}"#)?;
    let err = TemplateCatalog::load(&docs.templates_path(), None).unwrap_err();
    assert!(format!("{err:#}").contains("template 'a' must be a JSON object"));

    fs::write(docs.templates_path(), "{not json")?;
    assert!(TemplateCatalog::load(&docs.templates_path(), None).is_err());

    fs::write(docs.templates_path(), "{}")?;
    fs::write(docs.featured_path(), r#"{"not": "a list"}"#)?;
    assert!(TemplateCatalog::load(&docs.templates_path(), Some(&docs.featured_path())).is_err());
    Ok(())
}

// One badly typed field must not take the rest of the catalog down with it.
#[test]
fn mistyped_fields_do_not_reject_the_catalog() -> Result<()> {
    let docs = FixtureDocs::new(
        &json!({
            "good": {"title": "Good", "version": "1.0.0"},
            "odd": {"title": ["not", "text"], "version": 2, "tags": 7, "languages": ["Go", 3]}
        }),
        &["odd"],
    )?;
    let catalog = docs.load()?;
    assert_eq!(ids(catalog.records()), vec!["good", "odd"]);

    let odd = catalog.get(&TemplateId::from("odd")).expect("odd present");
    assert_eq!(odd.title, "");
    assert!(odd.version.is_none());
    assert!(odd.tags.is_empty());
    assert_eq!(odd.languages, vec!["Go"]);
    assert_eq!(ids(catalog.featured()), vec!["odd"]);
    Ok(())
}

#[test]
fn gallery_state_drives_the_pipeline() -> Result<()> {
    let mut gallery = Gallery::new(FixtureDocs::sample()?.load()?);
    assert_eq!(ids(gallery.visible()).last(), Some(&"py-notebook"));

    gallery.filter_mut().query = "PYTHON".into();
    gallery.set_sort(SortKey::AlphaAsc);
    gallery.refresh();
    assert_eq!(ids(gallery.visible()), vec!["py-notebook", "rag-chat"]);
    assert_eq!(gallery.summary(), "Showing 2 of 4 templates");
    Ok(())
}

#[test]
fn sample_catalog_satisfies_bundled_schema() -> Result<()> {
    CatalogSchema::bundled()?.validate(&sample_templates())?;
    Ok(())
}
