//! Client-side search over loaded lists
//!
//! Filtering is a case-insensitive substring match over a fixed set of
//! fields per record type, recomputed against whatever list is loaded.

use crate::models::{Note, Textbook};

/// A record that can be matched by the list search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    /// True when any search field contains `needle` (already lowercased).
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for Note {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.content.as_str(),
            self.board.as_str(),
            self.class.as_str(),
            self.subject.as_str(),
        ]
    }
}

impl Searchable for Textbook {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.author.as_str(),
            self.subject.as_str(),
        ]
    }
}

/// Returns the records matching `term`, preserving order.
///
/// An empty term matches everything. The term is used as typed, so
/// surrounding spaces take part in the match.
pub fn filter_records<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| record.matches_lowercase(&needle))
        .collect()
}
