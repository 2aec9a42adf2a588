//! Key → list of values, iterated in key order.

use std::collections::BTreeMap;
use std::collections::btree_map;

#[derive(Debug, Clone)]
pub struct Multimap<K, V> {
    entries: BTreeMap<K, Vec<V>>,
}

impl<K: Ord, V> Multimap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Append a value under `key`, keeping insertion order within the key.
    pub fn add(&mut self, key: K, value: V) {
        self.entries.entry(key).or_default().push(value);
    }

    pub fn get(&self, key: &K) -> &[V] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, Vec<V>> {
        self.entries.iter()
    }
}

impl<K: Ord, V> Default for Multimap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a Multimap<K, V> {
    type Item = (&'a K, &'a Vec<V>);
    type IntoIter = btree_map::Iter<'a, K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_keep_insertion_order() {
        let mut map = Multimap::new();
        map.add("id", 3);
        map.add("id", 1);
        map.add("id", 3);
        assert_eq!(map.get(&"id"), &[3, 1, 3]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_keys_iterate_sorted() {
        let mut map = Multimap::new();
        map.add("zeta", 1);
        map.add("alpha", 2);
        map.add("mid", 3);
        let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_missing_key_is_empty_slice() {
        let map: Multimap<&str, i32> = Multimap::new();
        assert!(map.get(&"nope").is_empty());
        assert!(map.is_empty());
        assert!(!map.contains_key(&"nope"));
    }
}
