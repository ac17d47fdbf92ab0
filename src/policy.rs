use std::hash::Hash;
use std::sync::Arc;

use crate::store::Store;

/// Capacity limits and the eviction sweeps that enforce them.
///
/// A limit of zero (or below, for the cost limit) disables that bound.  The
/// count and cost checks run independently on every mutating call.  Victim
/// selection is deliberately unspecified: the sweep walks the store in
/// hash-iteration order, which varies per cache instance, and callers must
/// not rely on any particular entry surviving — including the one they just
/// inserted.
pub(crate) struct LimitPolicy {
    count_limit: u64,
    cost_limit: i64,
}

impl LimitPolicy {
    pub(crate) fn new(count_limit: u64, cost_limit: i64) -> Self {
        LimitPolicy {
            count_limit,
            cost_limit,
        }
    }

    pub(crate) fn count_limit(&self) -> u64 {
        self.count_limit
    }

    pub(crate) fn set_count_limit(&mut self, limit: u64) {
        self.count_limit = limit;
    }

    pub(crate) fn cost_limit(&self) -> i64 {
        self.cost_limit
    }

    pub(crate) fn set_cost_limit(&mut self, limit: i64) {
        self.cost_limit = limit;
    }

    /// Evicts enough existing entries that one more entry of `incoming_cost`
    /// fits within both limits.
    ///
    /// Runs before the incoming entry lands in the store, so the sweep only
    /// selects entries that were already present.  An entry that cannot fit
    /// even in an empty cache is caught by the [`enforce`](Self::enforce)
    /// pass that follows the insert.
    pub(crate) fn make_room<K: Hash + Eq, V>(
        &self,
        store: &mut Store<K, V>,
        incoming_cost: i64,
    ) -> Vec<Arc<V>> {
        let mut evicted = Vec::new();
        if self.count_limit > 0 {
            let limit = self.count_limit;
            store.sweep(&mut evicted, |len, _| len as u64 + 1 > limit);
        }
        if self.cost_limit > 0 {
            let limit = self.cost_limit;
            store.sweep(&mut evicted, move |_, cost| {
                cost.saturating_add(incoming_cost) > limit
            });
        }
        evicted
    }

    /// Evicts entries until the store satisfies both limits as-is.
    ///
    /// Used after an insert (to catch an entry that cannot fit even in an
    /// otherwise empty cache) and after a limit is lowered at runtime.
    pub(crate) fn enforce<K: Hash + Eq, V>(&self, store: &mut Store<K, V>) -> Vec<Arc<V>> {
        let mut evicted = Vec::new();
        if self.count_limit > 0 {
            let limit = self.count_limit;
            store.sweep(&mut evicted, |len, _| len as u64 > limit);
        }
        if self.cost_limit > 0 {
            let limit = self.cost_limit;
            store.sweep(&mut evicted, |_, cost| cost > limit);
        }
        evicted
    }
}
