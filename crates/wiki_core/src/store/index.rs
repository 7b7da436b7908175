//! Case-insensitive title index.
//!
//! Maps `title_key(title)` to the stored title so backends resolve any casing
//! to one canonical entry without scanning.

use crate::model::entry::title_key;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleIndex {
    canonical: HashMap<String, String>,
}

impl TitleIndex {
    /// Builds an index from stored titles.
    ///
    /// Titles are taken in ascending order; when two collide case-insensitively
    /// the first one wins and the losers are returned for reporting.
    pub fn build<I>(titles: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = String>,
    {
        let mut sorted = titles.into_iter().collect::<Vec<_>>();
        sorted.sort();

        let mut index = Self::default();
        let mut shadowed = Vec::new();
        for title in sorted {
            if !index.insert(title.clone()) {
                shadowed.push(title);
            }
        }
        (index, shadowed)
    }

    /// Resolves any casing of `title` to the stored title.
    pub fn lookup(&self, title: &str) -> Option<&str> {
        self.canonical.get(&title_key(title)).map(String::as_str)
    }

    /// Inserts a title unless another casing of it is already indexed.
    ///
    /// Returns `false` when the key was already taken.
    pub fn insert(&mut self, title: String) -> bool {
        let key = title_key(&title);
        if self.canonical.contains_key(&key) {
            return false;
        }
        self.canonical.insert(key, title);
        true
    }

    /// Returns all canonical titles in ascending order.
    pub fn titles(&self) -> Vec<String> {
        let mut titles = self.canonical.values().cloned().collect::<Vec<_>>();
        titles.sort();
        titles
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}
