//! Plain-text presentation of gallery cards.

use crate::catalog::TemplateRecord;
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt::Write;

pub const TITLE_LIMIT: usize = 60;
pub const DESCRIPTION_LIMIT: usize = 200;
/// Badges shown on a card before the rest collapse into `...`.
pub const MAX_VISIBLE_BADGES: usize = 8;

/// Cut `text` to `max` characters, marking the cut with `...`.
pub fn truncate_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// `Nov 11, 2025`, as the calendar day in UTC, so one instant always shows
/// the same day whatever offset its commit was stamped with.
pub fn format_date(at: &DateTime<FixedOffset>) -> String {
    at.with_timezone(&Utc).format("%b %-d, %Y").to_string()
}

pub fn results_summary(shown: usize, total: usize) -> String {
    format!("Showing {shown} of {total} templates")
}

/// Badge labels for a card, capped at [`MAX_VISIBLE_BADGES`]. The flag is
/// true when some labels were left out.
pub fn visible_badges(record: &TemplateRecord) -> (Vec<&str>, bool) {
    let all: Vec<&str> = record.badges().collect();
    let overflow = all.len() > MAX_VISIBLE_BADGES;
    (all.into_iter().take(MAX_VISIBLE_BADGES).collect(), overflow)
}

/// Multi-line text card: title, description, metadata line and badges.
pub fn render_card(record: &TemplateRecord, featured: bool) -> String {
    let mut out = String::new();
    let marker = if featured { "* " } else { "" };
    let _ = writeln!(
        out,
        "{marker}{} [{}]",
        truncate_text(&record.title, TITLE_LIMIT),
        record.id
    );
    if !record.description.is_empty() {
        let _ = writeln!(
            out,
            "    {}",
            truncate_text(&record.description, DESCRIPTION_LIMIT)
        );
    }

    let mut meta = Vec::new();
    if let Some(version) = &record.version {
        meta.push(format!("v{version}"));
    }
    if let Some(at) = record.last_commit_at() {
        meta.push(format!("Last updated: {}", format_date(&at)));
    }
    if record.has_video() {
        meta.push("video".to_string());
    }
    if !meta.is_empty() {
        let _ = writeln!(out, "    {}", meta.join(" | "));
    }

    let groups: Vec<&str> = [record.category.as_deref(), record.industry.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !groups.is_empty() {
        let _ = writeln!(out, "    {}", groups.join(" / "));
    }

    let (badges, overflow) = visible_badges(record);
    if !badges.is_empty() {
        let suffix = if overflow { ", ..." } else { "" };
        let _ = writeln!(out, "    {}{suffix}", badges.join(", "));
    }
    out
}

/// Every field of a record, for the details view.
pub fn render_details(record: &TemplateRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", record.title);
    let _ = writeln!(out, "id: {}", record.id);
    if let Some(version) = &record.version {
        let _ = writeln!(out, "version: v{version}");
    }
    if let Some(at) = record.last_commit_at() {
        let _ = writeln!(out, "last updated: {}", format_date(&at));
    }
    if let Some(category) = &record.category {
        let _ = writeln!(out, "category: {category}");
    }
    if let Some(industry) = &record.industry {
        let _ = writeln!(out, "industry: {industry}");
    }
    if !record.description.is_empty() {
        let _ = writeln!(out, "\n{}\n", record.description);
    }
    for (name, labels) in [
        ("services", &record.services),
        ("languages", &record.languages),
        ("frameworks", &record.frameworks),
        ("tags", &record.tags),
    ] {
        if !labels.is_empty() {
            let _ = writeln!(out, "{name}: {}", labels.join(", "));
        }
    }
    if let Some(thumbnail) = &record.thumbnail {
        let _ = writeln!(out, "thumbnail: {thumbnail}");
    }
    if let Some(video) = &record.video {
        let _ = writeln!(out, "video: {video}");
    }
    out
}
