//! Insertion-ordered frequency table.
//!
//! The table maps space-joined token windows to counts (and, after
//! [`normalize`](FrequencyTable::normalize), to probabilities). Iteration
//! order is part of the contract: prediction scans the table front to
//! back and the first-encountered entry wins probability ties, so the
//! table must iterate in insertion order — a plain hash map would make
//! tie-breaking nondeterministic. Entries live in a `Vec` with a hash
//! index mapping keys to their slots; overwriting a key keeps its
//! original position.

use rustc_hash::FxHashMap;

/// An insertion-ordered map from n-gram keys to counts or probabilities.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct FrequencyTable {
    entries: Vec<(String, f64)>,
    index: FxHashMap<String, usize>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    /// Insert or overwrite `key`. An overwritten key keeps its original
    /// position in iteration order.
    pub fn insert(&mut self, key: String, value: f64) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Sum of all stored values.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }

    /// Divide every value by the total, turning counts into a global
    /// frequency distribution that sums to 1. A table of counts summing
    /// to zero is left untouched.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for (_, value) in &mut self.entries {
                *value /= total;
            }
        }
    }

    /// Replace this table wholesale with `other`.
    pub fn replace(&mut self, other: FrequencyTable) {
        *self = other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut table = FrequencyTable::new();
        table.insert("a b".to_string(), 2.0);
        table.insert("b a".to_string(), 1.0);
        assert_eq!(table.get("a b"), Some(2.0));
        assert_eq!(table.get("b a"), Some(1.0));
        assert_eq!(table.get("c d"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut table = FrequencyTable::new();
        table.insert("z".to_string(), 1.0);
        table.insert("a".to_string(), 2.0);
        table.insert("m".to_string(), 3.0);

        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut table = FrequencyTable::new();
        table.insert("first".to_string(), 1.0);
        table.insert("second".to_string(), 1.0);
        table.insert("first".to_string(), 5.0);

        let entries: Vec<(&str, f64)> = table.iter().collect();
        assert_eq!(entries, vec![("first", 5.0), ("second", 1.0)]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let mut table = FrequencyTable::new();
        table.insert("a b".to_string(), 2.0);
        table.insert("b a".to_string(), 2.0);
        table.insert("a c".to_string(), 2.0);
        table.insert("c a".to_string(), 1.0);

        table.normalize();
        assert!((table.total() - 1.0).abs() < 1e-12);
        assert_eq!(table.get("a b"), Some(2.0 / 7.0));
        assert_eq!(table.get("c a"), Some(1.0 / 7.0));
    }

    #[test]
    fn test_normalize_empty_table() {
        let mut table = FrequencyTable::new();
        table.normalize();
        assert!(table.is_empty());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut table = FrequencyTable::new();
        table.insert("old".to_string(), 1.0);

        let mut other = FrequencyTable::new();
        other.insert("new".to_string(), 1.0);

        table.replace(other);
        assert_eq!(table.get("old"), None);
        assert_eq!(table.get("new"), Some(1.0));
        assert_eq!(table.len(), 1);
    }
}
