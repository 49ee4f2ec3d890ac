//! Partition roster rows by state and order each partition.
//!
//! ```text
//! Loaded rows                       →  Groups (borrowed)
//! ┌──────────────────────────┐       ┌──────────────────────────┐
//! │ M2  LAGOS                │       │ LAGOS: [M1, M2]          │
//! │ M3  OGUN                 │  →    ├──────────────────────────┤
//! │ M1  LAGOS                │       │ OGUN:  [M3]              │
//! └──────────────────────────┘       └──────────────────────────┘
//! ```
//!
//! Keys are taken verbatim: no trimming, no case folding. Rows inside a
//! group are stable-sorted by matriculation number using byte order, so
//! `"A10"` sorts before `"A2"`.

use std::collections::BTreeMap;

use crate::models::StudentRecord;

/// State key → rows of that state, ordered by matriculation number.
///
/// Groups borrow from the loaded records; iteration is in byte order of
/// the key.
pub type Groups<'a> = BTreeMap<&'a str, Vec<&'a StudentRecord>>;

/// Group records by state and sort every group by matriculation number.
pub fn group_and_sort(records: &[StudentRecord]) -> Groups<'_> {
    let mut groups: Groups<'_> = BTreeMap::new();

    for record in records {
        groups.entry(record.state()).or_default().push(record);
    }

    for rows in groups.values_mut() {
        rows.sort_by(|a, b| a.matric_num().cmp(b.matric_num()));
    }

    groups
}

/// True when the key is empty or whitespace only.
pub fn is_blank_key(key: &str) -> bool {
    key.trim().is_empty()
}
