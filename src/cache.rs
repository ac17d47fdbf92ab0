use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::builder::CacheBuilder;
use crate::key::CanonicalKey;
use crate::listener::{EvictionListener, FnListener};
use crate::metrics::{Metrics, StatsCounter};
use crate::policy::LimitPolicy;
use crate::store::Store;

// ---------------------------------------------------------------------------
// Cache interior
// ---------------------------------------------------------------------------

/// Everything guarded by the cache's lock.
///
/// Mutating operations (insert, remove, clear, limit and listener changes)
/// take the write lock and run their eviction sweep before releasing it, so
/// at most one mutation is in flight per cache instance.  `get` and the
/// introspection methods take the read lock and may run concurrently with
/// each other; none of them ever observes the store mid-sweep with stale
/// count/cost totals.
pub(crate) struct State<K, V> {
    pub(crate) store: Store<K, V>,
    pub(crate) policy: LimitPolicy,
    /// Diagnostic label, no behavioral effect.
    pub(crate) name: String,
    /// Optional eviction listener.  `None` if the user didn't register one.
    pub(crate) listener: Option<Arc<dyn EvictionListener<V>>>,
}

/// Shared interior of a [`Cache`].
pub(crate) struct Inner<K, V> {
    pub(crate) state: RwLock<State<K, V>>,
    pub(crate) metrics: StatsCounter,
}

// ---------------------------------------------------------------------------
// Cache handle
// ---------------------------------------------------------------------------

/// A concurrent in-memory key-value cache bounded by entry count and by
/// aggregate cost.
///
/// Both limits default to 0, meaning unbounded; either can be set at build
/// time or changed later.  When an insert pushes the cache over a limit,
/// entries are evicted until the limit holds again and the registered
/// eviction listener (if any) is called once per evicted value.  Which
/// entries are chosen is unspecified — callers must not rely on any
/// particular entry surviving, including the one they just wrote.
///
/// Handles are cheap to clone and share one underlying cache.
///
/// # Example
/// ```
/// use cortado::Cache;
///
/// let cache: Cache<String, String> = Cache::builder().count_limit(100).build();
/// cache.insert("hello".to_string(), "world".to_string());
/// assert_eq!(
///     cache.get(&"hello".to_string()),
///     Some(std::sync::Arc::new("world".to_string()))
/// );
/// ```
pub struct Cache<K, V> {
    inner: Arc<Inner<K, V>>,
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Cache {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub(crate) fn with_config(
        count_limit: u64,
        cost_limit: i64,
        name: String,
        listener: Option<Arc<dyn EvictionListener<V>>>,
    ) -> Self {
        Cache {
            inner: Arc::new(Inner {
                state: RwLock::new(State {
                    store: Store::new(),
                    policy: LimitPolicy::new(count_limit, cost_limit),
                    name,
                    listener,
                }),
                metrics: StatsCounter::new(),
            }),
        }
    }

    /// Creates an unbounded cache: no count limit, no cost limit, no
    /// listener, empty name.
    pub fn new() -> Self {
        Cache::with_config(0, 0, String::new(), None)
    }

    /// Returns a [`CacheBuilder`] for constructing a configured cache.
    pub fn builder() -> CacheBuilder<K, V> {
        CacheBuilder::new()
    }

    // -----------------------------------------------------------------------
    // Hot-path: get
    // -----------------------------------------------------------------------

    /// Returns the value for `key`, if present.
    ///
    /// Lookups never trigger eviction and carry no recency signal — the
    /// cache tracks no access order.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        match self.inner.state.read().store.get(key) {
            Some(value) => {
                self.inner.metrics.record_hit();
                Some(value)
            }
            None => {
                self.inner.metrics.record_miss();
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Hot-path: insert
    // -----------------------------------------------------------------------

    /// Inserts `value` for `key` with a cost of 0.
    ///
    /// If the key already exists the value is replaced in place; the
    /// displaced value is dropped silently, not reported as an eviction.
    pub fn insert(&self, key: K, value: V) {
        self.insert_with_cost(key, value, 0)
    }

    /// Inserts `value` for `key`, charging `cost` against the total-cost
    /// limit.
    ///
    /// Cost is an opaque weight, typically a byte size; the cache assigns it
    /// no unit.  Pass 0 when no meaningful cost is available rather than
    /// computing one.  Negative costs are a caller error: they are accepted
    /// unvalidated and can drive the aggregate negative.
    ///
    /// Room is made for the incoming entry before it lands, so eviction
    /// normally removes older entries.  An entry whose cost alone exceeds
    /// the cost limit is itself evicted (and reported) before this call
    /// returns.
    pub fn insert_with_cost(&self, key: K, value: V, cost: i64) {
        let (evicted, listener) = {
            let mut guard = self.inner.state.write();
            let state = &mut *guard;
            // Replace-in-place: the displaced value is not an eviction.
            state.store.remove(&key);
            let mut evicted = state.policy.make_room(&mut state.store, cost);
            state.store.insert(CanonicalKey::new(key), value, cost);
            evicted.extend(state.policy.enforce(&mut state.store));
            (evicted, state.listener.clone())
        };
        self.dispatch_evictions(evicted, listener);
    }

    // -----------------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------------

    /// Removes the entry for `key`.  No-op if the key is absent.
    ///
    /// Explicit removal is not an eviction: the listener does not fire.
    pub fn invalidate(&self, key: &K) {
        self.inner.state.write().store.remove(key);
    }

    /// Removes all entries and resets the aggregate cost to zero.
    ///
    /// Like [`invalidate`](Cache::invalidate), this never fires the
    /// eviction listener.
    pub fn invalidate_all(&self) {
        self.inner.state.write().store.clear();
    }

    // -----------------------------------------------------------------------
    // Limits
    // -----------------------------------------------------------------------

    /// The maximum number of entries.  0 = unbounded (the default).
    pub fn count_limit(&self) -> u64 {
        self.inner.state.read().policy.count_limit()
    }

    /// Sets the entry-count limit.
    ///
    /// Lowering the limit below the current occupancy evicts immediately,
    /// before this call returns, notifying the listener per victim.
    pub fn set_count_limit(&self, limit: u64) {
        let (evicted, listener) = {
            let mut guard = self.inner.state.write();
            let state = &mut *guard;
            state.policy.set_count_limit(limit);
            (state.policy.enforce(&mut state.store), state.listener.clone())
        };
        self.dispatch_evictions(evicted, listener);
    }

    /// The maximum aggregate cost.  0 (or below) = unbounded (the default).
    pub fn total_cost_limit(&self) -> i64 {
        self.inner.state.read().policy.cost_limit()
    }

    /// Sets the total-cost limit.
    ///
    /// Lowering the limit below the current aggregate evicts immediately,
    /// before this call returns, notifying the listener per victim.
    pub fn set_total_cost_limit(&self, limit: i64) {
        let (evicted, listener) = {
            let mut guard = self.inner.state.write();
            let state = &mut *guard;
            state.policy.set_cost_limit(limit);
            (state.policy.enforce(&mut state.store), state.listener.clone())
        };
        self.dispatch_evictions(evicted, listener);
    }

    // -----------------------------------------------------------------------
    // Name
    // -----------------------------------------------------------------------

    /// Diagnostic label for this cache.  Defaults to `""`.
    pub fn name(&self) -> String {
        self.inner.state.read().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.state.write().name = name.into();
    }

    // -----------------------------------------------------------------------
    // Listener
    // -----------------------------------------------------------------------

    /// Registers a closure called once per evicted value.
    ///
    /// Replaces any previously registered listener and applies to subsequent
    /// evictions only.
    pub fn set_eviction_listener<F>(&self, f: F)
    where
        F: Fn(Arc<V>) + Send + Sync + 'static,
    {
        self.inner.state.write().listener = Some(Arc::new(FnListener(f)));
    }

    /// Registers an eviction listener via the [`EvictionListener`] trait.
    pub fn set_eviction_listener_impl<L: EvictionListener<V>>(&self, listener: L) {
        self.inner.state.write().listener = Some(Arc::new(listener));
    }

    /// Unregisters the eviction listener, if any.
    pub fn clear_eviction_listener(&self) {
        self.inner.state.write().listener = None;
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn entry_count(&self) -> usize {
        self.inner.state.read().store.len()
    }

    /// Aggregate cost of all entries.  Negative only when the caller
    /// supplied negative costs.
    pub fn total_cost(&self) -> i64 {
        self.inner.state.read().store.total_cost()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.read().store.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.state.read().store.contains(key)
    }

    pub fn stats(&self) -> Metrics {
        self.inner.metrics.snapshot()
    }

    // -----------------------------------------------------------------------
    // Eviction dispatch
    // -----------------------------------------------------------------------

    /// Fires the listener once per victim, after the write lock is gone.
    fn dispatch_evictions(
        &self,
        evicted: Vec<Arc<V>>,
        listener: Option<Arc<dyn EvictionListener<V>>>,
    ) {
        if evicted.is_empty() {
            return;
        }
        self.inner.metrics.record_evictions(evicted.len() as u64);
        if let Some(listener) = listener {
            for value in evicted {
                listener.on_evict(value);
            }
        }
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Cache::new()
    }
}
