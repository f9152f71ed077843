//! Sort keys offered by the gallery and their comparators.

use crate::catalog::TemplateRecord;
use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset};
use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use log::warn;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

thread_local! {
    // Root collation, the order an English browser's `localeCompare` gives:
    // punctuation before digits before letters, accents and then case only
    // breaking ties, lowercase first.
    static TITLE_COLLATOR: Option<Collator> =
        Collator::try_new(&locale!("en").into(), CollatorOptions::new())
            .map_err(|err| warn!("title collation unavailable, falling back to case folding: {err:?}"))
            .ok();
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    AlphaAsc,
    AlphaDesc,
    DateAsc,
    /// Newest first; what the gallery opens with.
    #[default]
    DateDesc,
    VersionAsc,
    VersionDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::AlphaAsc,
        SortKey::AlphaDesc,
        SortKey::DateAsc,
        SortKey::DateDesc,
        SortKey::VersionAsc,
        SortKey::VersionDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::AlphaAsc => "alpha-asc",
            SortKey::AlphaDesc => "alpha-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::VersionAsc => "version-asc",
            SortKey::VersionDesc => "version-desc",
        }
    }

    /// The same field in the opposite direction.
    pub fn reversed(&self) -> SortKey {
        match self {
            SortKey::AlphaAsc => SortKey::AlphaDesc,
            SortKey::AlphaDesc => SortKey::AlphaAsc,
            SortKey::DateAsc => SortKey::DateDesc,
            SortKey::DateDesc => SortKey::DateAsc,
            SortKey::VersionAsc => SortKey::VersionDesc,
            SortKey::VersionDesc => SortKey::VersionAsc,
        }
    }

    fn is_descending(&self) -> bool {
        matches!(
            self,
            SortKey::AlphaDesc | SortKey::DateDesc | SortKey::VersionDesc
        )
    }

    fn value_of<'a>(&self, record: &'a TemplateRecord) -> SortValue<'a> {
        match self {
            SortKey::AlphaAsc | SortKey::AlphaDesc => SortValue::Title(&record.title),
            SortKey::DateAsc | SortKey::DateDesc => SortValue::Date(record.sort_timestamp()),
            SortKey::VersionAsc | SortKey::VersionDesc => {
                SortValue::Version(record.version.as_deref().unwrap_or(""))
            }
        }
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        if self.is_descending() {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Orders two records by this key. For whole lists use [`sort_records`],
    /// which extracts each record's value once.
    pub fn compare(&self, a: &TemplateRecord, b: &TemplateRecord) -> Ordering {
        let (a, b) = (self.value_of(a), self.value_of(b));
        with_title_collator(|collator| self.directed(a.compare(&b, collator)))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SortKey {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match SortKey::ALL.iter().find(|key| key.as_str() == value) {
            Some(key) => Ok(*key),
            None => bail!("Unknown sort key: {value}"),
        }
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        SortKey::try_from(value)
    }
}

/// The field a key sorts on, pulled out of a record once per sort.
enum SortValue<'a> {
    Title(&'a str),
    Date(DateTime<FixedOffset>),
    Version(&'a str),
}

impl SortValue<'_> {
    fn compare(&self, other: &Self, collator: Option<&Collator>) -> Ordering {
        match (self, other) {
            (SortValue::Title(a), SortValue::Title(b)) => title_cmp(collator, a, b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Version(a), SortValue::Version(b)) => a.cmp(b),
            // A single key produces a single variant.
            _ => Ordering::Equal,
        }
    }
}

/// Stable sort order of `records` by `key`, as positions into the input.
///
/// Dates are parsed once per record, not once per comparison.
pub(crate) fn sorted_order<'a, I>(records: I, key: SortKey) -> Vec<usize>
where
    I: IntoIterator<Item = &'a TemplateRecord>,
{
    let mut keyed: Vec<(usize, SortValue<'a>)> = records
        .into_iter()
        .map(|record| key.value_of(record))
        .enumerate()
        .collect();
    with_title_collator(|collator| {
        keyed.sort_by(|(_, a), (_, b)| key.directed(a.compare(b, collator)));
    });
    keyed.into_iter().map(|(position, _)| position).collect()
}

/// Stable in-place sort; equal records keep their relative order.
pub fn sort_records(records: &mut [&TemplateRecord], key: SortKey) {
    let order = sorted_order(records.iter().copied(), key);
    let snapshot = records.to_vec();
    for (slot, position) in records.iter_mut().zip(order) {
        *slot = snapshot[position];
    }
}

/// Human-facing string order, as a browser's `localeCompare` gives it:
/// accents and case only break ties, lowercase sorts first, and code points
/// settle anything the collation leaves equal so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    with_title_collator(|collator| title_cmp(collator, a, b))
}

fn with_title_collator<T>(f: impl FnOnce(Option<&Collator>) -> T) -> T {
    TITLE_COLLATOR.with(|collator| f(collator.as_ref()))
}

fn title_cmp(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
        None => folded_cmp(a, b),
    }
}

fn folded_cmp(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a)
        .cmp(&folded(b))
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        };
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplateId;

    fn dated(id: &str, date: Option<&str>) -> TemplateRecord {
        TemplateRecord {
            id: TemplateId::from(id),
            last_commit_date: date.map(str::to_string),
            ..TemplateRecord::default()
        }
    }

    #[test]
    fn sort_key_strings_round_trip() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::try_from(key.as_str()).unwrap(), key);
            assert_eq!(key.reversed().reversed(), key);
        }
        assert!("newest".parse::<SortKey>().is_err());
    }

    #[test]
    fn locale_order_ignores_case_first() {
        let mut words = vec!["banana", "Apple", "apple", "Cherry", "_under"];
        words.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(words, vec!["_under", "apple", "Apple", "banana", "Cherry"]);
    }

    #[test]
    fn locale_order_folds_accents_and_ranks_punctuation() {
        let mut words = vec!["Zeta", "Éclair", "eclair", "Alpha", "-dash", "_under", "9lives"];
        words.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(
            words,
            vec!["_under", "-dash", "9lives", "Alpha", "eclair", "Éclair", "Zeta"]
        );
    }

    #[test]
    fn locale_order_is_total() {
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
        assert_ne!(locale_cmp("Ab", "aB"), Ordering::Equal);
        assert_eq!(locale_cmp("Ab", "aB"), locale_cmp("aB", "Ab").reverse());
    }

    #[test]
    fn folded_fallback_matches_collation_on_plain_ascii() {
        let words = ["banana", "Apple", "apple", "Cherry"];
        for a in words {
            for b in words {
                assert_eq!(folded_cmp(a, b), locale_cmp(a, b), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn sorted_order_agrees_with_pairwise_compare() {
        let records = vec![
            dated("rfc", Some("2025-03-01T00:00:00Z")),
            dated("none", None),
            dated("git", Some("2025-11-11 09:30:00 +0000")),
            dated("day", Some("2024-06-30")),
            dated("bad", Some("yesterday")),
        ];
        for key in [SortKey::DateAsc, SortKey::DateDesc] {
            let order = sorted_order(&records, key);
            let mut expected: Vec<usize> = (0..records.len()).collect();
            expected.sort_by(|&a, &b| key.compare(&records[a], &records[b]));
            assert_eq!(order, expected, "{key}");
        }
        let newest: Vec<&str> = sorted_order(&records, SortKey::DateDesc)
            .into_iter()
            .map(|i| records[i].id.as_str())
            .collect();
        // Missing and unparseable dates tie at the epoch and keep input order.
        assert_eq!(newest, vec!["git", "rfc", "day", "none", "bad"]);
    }

    #[test]
    fn sort_records_reorders_references_only() {
        let records = vec![dated("old", Some("2020-01-01")), dated("new", Some("2025-01-01"))];
        let mut refs: Vec<&TemplateRecord> = records.iter().collect();
        sort_records(&mut refs, SortKey::DateDesc);
        assert_eq!(refs[0].id.as_str(), "new");
        assert_eq!(records[0].id.as_str(), "old");
    }
}
