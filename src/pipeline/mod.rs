//! Catalog filter pipeline.
//!
//! Raw records pass through the filter predicate, then a stable sort by the
//! chosen key. Both stages borrow the catalog; the output is a fresh list of
//! references and the input slice is never reordered.

pub mod filter;
pub mod sort;

pub use filter::{FilterState, filter_records, matching_positions};
pub use sort::{SortKey, locale_cmp, sort_records};

use crate::catalog::TemplateRecord;

/// Filter then sort: the ordered subset to display.
pub fn select<'a>(
    records: &'a [TemplateRecord],
    filter: &FilterState,
    key: SortKey,
) -> Vec<&'a TemplateRecord> {
    select_positions(records, filter, key)
        .into_iter()
        .map(|position| &records[position])
        .collect()
}

/// Same as [`select`], but as positions into `records`.
pub fn select_positions(
    records: &[TemplateRecord],
    filter: &FilterState,
    key: SortKey,
) -> Vec<usize> {
    let matching = matching_positions(records, filter);
    sort::sorted_order(matching.iter().map(|&position| &records[position]), key)
        .into_iter()
        .map(|rank| matching[rank])
        .collect()
}
