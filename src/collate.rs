//! Orderings for listing entries.
//!
//! Names compare by Unicode scalar value (equivalently, UTF-8 byte order).
//! No locale tailoring and no case folding, so a listing sorts the same way
//! everywhere. None of these functions touch the filesystem.

use crate::models::TrashEntry;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ascending by name.
pub fn collate_by_name(a: &TrashEntry, b: &TrashEntry) -> Ordering {
    a.name().as_bytes().cmp(b.name().as_bytes())
}

/// Ascending by deletion time, then by name.
pub fn collate_by_date(a: &TrashEntry, b: &TrashEntry) -> Ordering {
    a.deleted_at()
        .cmp(&b.deleted_at())
        .then_with(|| collate_by_name(a, b))
}

/// Directories first, then by name within each group.
pub fn collate_by_type(a: &TrashEntry, b: &TrashEntry) -> Ordering {
    b.is_directory()
        .cmp(&a.is_directory())
        .then_with(|| collate_by_name(a, b))
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum SortOrder {
    #[default]
    Date,
    Name,
    Type,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Name => "name",
            Self::Type => "type",
        }
    }

    pub fn comparator(self) -> fn(&TrashEntry, &TrashEntry) -> Ordering {
        match self {
            Self::Date => collate_by_date,
            Self::Name => collate_by_name,
            Self::Type => collate_by_type,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "date" => Ok(Self::Date),
            "name" => Ok(Self::Name),
            "type" => Ok(Self::Type),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

/// Stable in-place sort of a listing.
pub fn sort_entries(entries: &mut [TrashEntry], order: SortOrder) {
    entries.sort_by(order.comparator());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TrashInfo;
    use crate::models::IconRef;
    use chrono::{TimeZone, Utc};

    fn entry(name: &str, is_directory: bool, deleted_secs: i64) -> TrashEntry {
        let info = TrashInfo::new(format!("/home/u/{name}"), Utc.timestamp_opt(deleted_secs, 0).unwrap());
        TrashEntry::new(name, format!("/trash/files/{name}"), IconRef::default(), is_directory, &info).unwrap()
    }

    fn names(entries: &[TrashEntry]) -> Vec<&str> {
        entries.iter().map(TrashEntry::name).collect()
    }

    fn sample() -> Vec<TrashEntry> {
        vec![
            entry("b.txt", false, 2),
            entry("A.txt", false, 2),
            entry("a.txt", true, 1),
            entry("zeta", true, 3),
            entry("é.txt", false, 0),
            entry("a.txt", false, 1),
        ]
    }

    #[test]
    fn type_then_date_example() {
        let mut entries = vec![entry("b.txt", false, 2), entry("a.txt", true, 1)];

        sort_entries(&mut entries, SortOrder::Type);
        assert_eq!(names(&entries), ["a.txt", "b.txt"]);

        sort_entries(&mut entries, SortOrder::Date);
        assert_eq!(names(&entries), ["a.txt", "b.txt"]);
    }

    #[test]
    fn name_order_is_case_sensitive_codepoint_order() {
        let mut entries = sample();
        sort_entries(&mut entries, SortOrder::Name);

        assert_eq!(names(&entries), ["A.txt", "a.txt", "a.txt", "b.txt", "zeta", "é.txt"]);
    }

    #[test]
    fn directories_always_first() {
        let dir = entry("zz", true, 5);
        let file = entry("zz.txt", false, 5);
        let early_file = entry("a", false, 0);

        assert_eq!(collate_by_type(&dir, &file), Ordering::Less);
        assert_eq!(collate_by_type(&dir, &early_file), Ordering::Less);
        assert_eq!(collate_by_type(&early_file, &dir), Ordering::Greater);
    }

    #[test]
    fn date_ties_break_on_name() {
        let a = entry("a", false, 10);
        let b = entry("b", false, 10);

        assert_eq!(collate_by_date(&a, &b), Ordering::Less);
        assert_eq!(collate_by_date(&b, &a), Ordering::Greater);
        assert_eq!(collate_by_date(&a, &a.clone()), Ordering::Equal);
    }

    #[test]
    fn comparators_are_antisymmetric_and_transitive() {
        let entries = sample();
        for order in [SortOrder::Date, SortOrder::Name, SortOrder::Type] {
            let cmp = order.comparator();
            for a in &entries {
                for b in &entries {
                    assert_eq!(cmp(a, b), cmp(b, a).reverse(), "{order}: {} vs {}", a.name(), b.name());
                    for c in &entries {
                        if cmp(a, b) != Ordering::Greater && cmp(b, c) != Ordering::Greater {
                            assert_ne!(cmp(a, c), Ordering::Greater, "{order} not transitive");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn sort_order_parses_and_displays() {
        for order in [SortOrder::Date, SortOrder::Name, SortOrder::Type] {
            assert_eq!(order.to_string().parse::<SortOrder>(), Ok(order));
        }
        assert_eq!("size".parse::<SortOrder>(), Err(UnknownSortOrder("size".to_string())));
    }
}
