//! Cleanup of list-valued event details.
//!
//! Incremental form edits tend to leave blank rows and duplicates
//! behind. Entries are identified by their content, not by position.

use std::hash::Hash;

use itertools::Itertools as _;

use crate::entities::{CustomDate, Faq, Speaker};

pub trait Deduplicate {
    type Key: Eq + Hash;

    /// All significant fields are empty or whitespace.
    fn is_blank(&self) -> bool;

    fn identity_key(&self) -> Self::Key;
}

fn fold_case(s: &str) -> String {
    s.trim().to_lowercase()
}

impl Deduplicate for Speaker {
    type Key = (String, String);

    fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.bio.trim().is_empty()
    }

    fn identity_key(&self) -> Self::Key {
        (fold_case(&self.name), self.bio.trim().to_owned())
    }
}

impl Deduplicate for Faq {
    type Key = (String, String);

    fn is_blank(&self) -> bool {
        self.question.trim().is_empty() && self.answer.trim().is_empty()
    }

    fn identity_key(&self) -> Self::Key {
        (fold_case(&self.question), self.answer.trim().to_owned())
    }
}

impl Deduplicate for CustomDate {
    type Key = (i64, i64);

    fn is_blank(&self) -> bool {
        false
    }

    fn identity_key(&self) -> Self::Key {
        (self.start.as_secs(), self.end.as_secs())
    }
}

/// Drops blank entries and keeps only the first entry of each identity.
///
/// The relative order of the remaining entries is preserved.
pub fn normalize_entities<T: Deduplicate>(entities: Vec<T>) -> Vec<T> {
    entities
        .into_iter()
        .filter(|e| !e.is_blank())
        .unique_by(T::identity_key)
        .collect()
}
