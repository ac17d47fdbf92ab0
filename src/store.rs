use std::hash::Hash;
use std::sync::Arc;

use ahash::AHashMap;

use crate::key::CanonicalKey;

// ---------------------------------------------------------------------------
// CacheEntry
// ---------------------------------------------------------------------------

/// A single entry: the stored value plus its caller-supplied cost.
pub(crate) struct CacheEntry<V> {
    pub(crate) value: Arc<V>,
    /// Opaque weight counted toward the total-cost limit.  Negative values
    /// are caller error and flow through the aggregate unvalidated.
    pub(crate) cost: i64,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// The entry map plus aggregate-cost bookkeeping.
///
/// Not internally synchronized: the cache wraps the whole store in a single
/// `RwLock`, so every `&mut self` method here runs under the write lock.
/// Aggregate arithmetic saturates at the `i64` bounds; exact accounting under
/// absurd or negative costs is not promised.
pub(crate) struct Store<K, V> {
    map: AHashMap<CanonicalKey<K>, CacheEntry<V>>,
    total_cost: i64,
}

impl<K: Hash + Eq, V> Store<K, V> {
    pub(crate) fn new() -> Self {
        Store {
            map: AHashMap::new(),
            total_cost: 0,
        }
    }

    /// Adds a new entry for `key`.
    ///
    /// The caller removes any existing entry for the key first, so this
    /// always grows the map by one.
    pub(crate) fn insert(&mut self, key: CanonicalKey<K>, value: V, cost: i64) {
        self.total_cost = self.total_cost.saturating_add(cost);
        self.map.insert(
            key,
            CacheEntry {
                value: Arc::new(value),
                cost,
            },
        );
    }

    pub(crate) fn get(&self, key: &K) -> Option<Arc<V>> {
        self.map.get(key).map(|entry| Arc::clone(&entry.value))
    }

    /// Removes the entry for `key`, if present, and returns its value.
    pub(crate) fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let entry = self.map.remove(key)?;
        self.total_cost = self.total_cost.saturating_sub(entry.cost);
        Some(entry.value)
    }

    /// Removes all entries and resets the aggregate cost to zero.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.total_cost = 0;
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn total_cost(&self) -> i64 {
        self.total_cost
    }

    /// Victim traversal for the eviction policy.
    ///
    /// Walks the map in hash-iteration order, removing each entry for which
    /// `over(remaining_len, remaining_cost)` still reports a limit breach and
    /// appending its value to `evicted`.  Once the predicate reports the
    /// limits restored, the remaining entries are kept untouched.  The walk
    /// order comes from the per-instance hasher seed and is deliberately
    /// unspecified; a pass visits each entry at most once, so it always
    /// terminates.
    pub(crate) fn sweep(
        &mut self,
        evicted: &mut Vec<Arc<V>>,
        mut over: impl FnMut(usize, i64) -> bool,
    ) {
        if !over(self.map.len(), self.total_cost) {
            return;
        }
        let mut len = self.map.len();
        let mut cost = self.total_cost;
        self.map.retain(|_, entry| {
            if over(len, cost) {
                len -= 1;
                cost = cost.saturating_sub(entry.cost);
                evicted.push(Arc::clone(&entry.value));
                false
            } else {
                true
            }
        });
        self.total_cost = cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store<&'static str, u32> {
        Store::new()
    }

    #[test]
    fn insert_and_remove_track_cost() {
        let mut s = store();
        s.insert(CanonicalKey::new("a"), 1, 4);
        s.insert(CanonicalKey::new("b"), 2, 6);
        assert_eq!(s.len(), 2);
        assert_eq!(s.total_cost(), 10);

        assert_eq!(s.remove(&"a"), Some(Arc::new(1)));
        assert_eq!(s.len(), 1);
        assert_eq!(s.total_cost(), 6);

        // Removing an absent key is a no-op.
        assert_eq!(s.remove(&"a"), None);
        assert_eq!(s.total_cost(), 6);
    }

    #[test]
    fn clear_resets_bookkeeping() {
        let mut s = store();
        s.insert(CanonicalKey::new("a"), 1, 5);
        s.insert(CanonicalKey::new("b"), 2, 5);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.total_cost(), 0);
        assert_eq!(s.get(&"a"), None);
    }

    #[test]
    fn negative_cost_flows_through() {
        let mut s = store();
        s.insert(CanonicalKey::new("a"), 1, -5);
        assert_eq!(s.total_cost(), -5);
        s.remove(&"a");
        assert_eq!(s.total_cost(), 0);
    }

    #[test]
    fn sweep_removes_until_predicate_clears() {
        let mut s = store();
        for (k, cost) in [("a", 3), ("b", 3), ("c", 3), ("d", 3)] {
            s.insert(CanonicalKey::new(k), 0, cost);
        }

        let mut evicted = Vec::new();
        s.sweep(&mut evicted, |_, cost| cost > 6);
        assert_eq!(evicted.len(), 2);
        assert_eq!(s.len(), 2);
        assert_eq!(s.total_cost(), 6);
    }

    #[test]
    fn sweep_is_a_noop_under_the_limit() {
        let mut s = store();
        s.insert(CanonicalKey::new("a"), 1, 1);

        let mut evicted = Vec::new();
        s.sweep(&mut evicted, |len, _| len > 8);
        assert!(evicted.is_empty());
        assert_eq!(s.len(), 1);
    }
}
