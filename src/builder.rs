use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::cache::Cache;
use crate::listener::{EvictionListener, FnListener};

/// Builder for configuring and constructing a [`Cache`].
///
/// Every knob is optional: `build()` on a fresh builder yields an unbounded
/// cache with no listener, equivalent to [`Cache::new`].
///
/// # Example
/// ```
/// use cortado::CacheBuilder;
///
/// let cache: cortado::Cache<String, Vec<u8>> = CacheBuilder::new()
///     .count_limit(10_000)
///     .total_cost_limit(64 * 1024 * 1024)
///     .build();
/// ```
pub struct CacheBuilder<K, V> {
    count_limit: u64,
    cost_limit: i64,
    name: String,
    listener: Option<Arc<dyn EvictionListener<V>>>,
    _key: PhantomData<fn(K)>,
}

impl<K: 'static, V: 'static> CacheBuilder<K, V> {
    pub fn new() -> Self {
        CacheBuilder {
            count_limit: 0,
            cost_limit: 0,
            name: String::new(),
            listener: None,
            _key: PhantomData,
        }
    }

    /// Maximum number of entries.  0 = unbounded (the default).
    pub fn count_limit(mut self, limit: u64) -> Self {
        self.count_limit = limit;
        self
    }

    /// Maximum aggregate cost across all entries.  0 = unbounded (the
    /// default).  Costs are charged per entry via
    /// [`Cache::insert_with_cost`].
    pub fn total_cost_limit(mut self, limit: i64) -> Self {
        self.cost_limit = limit;
        self
    }

    /// Diagnostic label for the cache (default: empty).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Register an eviction listener closure.
    ///
    /// The closure is called synchronously, once per evicted value, on the
    /// thread whose mutation triggered the eviction.  Explicit removals do
    /// not notify.
    ///
    /// # Example
    /// ```
    /// use cortado::CacheBuilder;
    ///
    /// let cache: cortado::Cache<u64, u64> = CacheBuilder::new()
    ///     .count_limit(10)
    ///     .eviction_listener(|value| println!("evicted value={value}"))
    ///     .build();
    /// ```
    pub fn eviction_listener<F>(mut self, f: F) -> Self
    where
        F: Fn(Arc<V>) + Send + Sync + 'static,
    {
        self.listener = Some(Arc::new(FnListener(f)));
        self
    }

    /// Register an eviction listener via the [`EvictionListener`] trait.
    pub fn eviction_listener_impl<L: EvictionListener<V>>(mut self, l: L) -> Self {
        self.listener = Some(Arc::new(l));
        self
    }
}

impl<K, V> CacheBuilder<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn build(self) -> Cache<K, V> {
        Cache::with_config(self.count_limit, self.cost_limit, self.name, self.listener)
    }
}

impl<K: 'static, V: 'static> Default for CacheBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
