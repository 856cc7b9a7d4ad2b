use std::collections::HashMap;
use std::hash::Hash;

/// Counts per key, remembering the order keys were first seen.
///
/// Absent keys read as zero. [`Tally::top`] breaks count ties by that
/// first-seen order.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn add(&mut self, key: K, amount: u64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    pub fn get(&self, key: &K) -> u64 {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` highest counts, descending.
    pub fn top(&self, n: usize) -> Vec<(K, u64)> {
        let mut sorted = self.entries.clone();
        // sort_by is stable, so equal counts keep first-seen order
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

impl<K: Eq + Hash + Clone> Default for Tally<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_keys_are_zero() {
        let mut t = Tally::new();
        t.add("a", 2);
        assert_eq!(t.get(&"a"), 2);
        assert_eq!(t.get(&"b"), 0);
    }

    #[test]
    fn top_is_descending_with_first_seen_ties() {
        let mut t = Tally::new();
        for key in ["c", "a", "b", "a", "b", "d"] {
            t.add(key, 1);
        }
        assert_eq!(t.top(10), vec![("a", 2), ("b", 2), ("c", 1), ("d", 1)]);
        assert_eq!(t.top(3), vec![("a", 2), ("b", 2), ("c", 1)]);
        assert_eq!(t.len(), 4);
    }
}
