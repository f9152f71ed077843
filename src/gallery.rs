//! Gallery session state.
//!
//! Owns the loaded catalog together with the current filter, the current sort
//! key and the subset they produce. Every setter leaves the visible subset
//! stale until [`Gallery::refresh`] runs the pipeline again; the `apply_*`
//! helpers do both in one call.

use crate::catalog::{FilterOptions, TemplateCatalog, TemplateRecord};
use crate::display::results_summary;
use crate::pipeline::{FilterState, SortKey, select_positions};
use log::debug;

#[derive(Debug, Clone)]
pub struct Gallery {
    catalog: TemplateCatalog,
    filter: FilterState,
    sort: SortKey,
    visible: Vec<usize>,
}

impl Gallery {
    /// Open the gallery with no filter and the default sort (newest first).
    pub fn new(catalog: TemplateCatalog) -> Self {
        let mut gallery = Self {
            catalog,
            filter: FilterState::default(),
            sort: SortKey::default(),
            visible: Vec::new(),
        };
        gallery.refresh();
        gallery
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// Mutable access to the filter. Call [`Gallery::refresh`] afterwards.
    pub fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
    }

    /// Replace filter and sort, then recompute.
    pub fn apply(&mut self, filter: FilterState, key: SortKey) {
        self.filter = filter;
        self.sort = key;
        self.refresh();
    }

    /// Flip one label in a multi-select group, then recompute.
    pub fn toggle(&mut self, group: LabelGroup, label: &str) {
        let selected = match group {
            LabelGroup::Languages => &mut self.filter.languages,
            LabelGroup::Services => &mut self.filter.services,
            LabelGroup::Frameworks => &mut self.filter.frameworks,
        };
        if !selected.remove(label) {
            selected.insert(label.to_string());
        }
        self.refresh();
    }

    /// Drop every criterion, keeping the sort key.
    pub fn clear_filter(&mut self) {
        self.filter = FilterState::default();
        self.refresh();
    }

    /// Recompute the visible subset from the current selections.
    pub fn refresh(&mut self) {
        self.visible = select_positions(self.catalog.records(), &self.filter, self.sort);
        debug!(
            "gallery refreshed: {} of {} visible, sort {}",
            self.visible.len(),
            self.catalog.len(),
            self.sort
        );
    }

    /// Records to display, in display order.
    pub fn visible(&self) -> impl Iterator<Item = &TemplateRecord> {
        let records = self.catalog.records();
        self.visible.iter().map(move |&position| &records[position])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn featured(&self) -> impl Iterator<Item = &TemplateRecord> {
        self.catalog.featured()
    }

    pub fn filter_options(&self) -> FilterOptions {
        self.catalog.filter_options()
    }

    /// "Showing N of M templates".
    pub fn summary(&self) -> String {
        results_summary(self.visible.len(), self.catalog.len())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelGroup {
    Languages,
    Services,
    Frameworks,
}
