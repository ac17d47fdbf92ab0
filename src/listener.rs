//! Eviction listener — a callback fired for every entry the cache removes on
//! its own to stay within its limits.
//!
//! Only capacity-driven eviction notifies.  Explicit removal
//! ([`Cache::invalidate`], [`Cache::invalidate_all`]) and overwriting an
//! existing key are silent.
//!
//! # Example
//! ```
//! use cortado::Cache;
//! use std::sync::{Arc, Mutex};
//!
//! let evicted: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&evicted);
//!
//! let cache: Cache<u64, u64> = Cache::builder()
//!     .count_limit(1)
//!     .eviction_listener(move |value| log.lock().unwrap().push(*value))
//!     .build();
//!
//! cache.insert(1, 10);
//! cache.insert(2, 20); // exceeds the count limit
//! assert_eq!(*evicted.lock().unwrap(), vec![10]);
//! ```
//!
//! [`Cache::invalidate`]: crate::Cache::invalidate
//! [`Cache::invalidate_all`]: crate::Cache::invalidate_all

use std::sync::Arc;

/// A callback invoked once per evicted value.
///
/// The listener runs synchronously on the thread whose mutation triggered
/// the eviction, after the cache's internal lock has been released.  Calling
/// back into the cache from the listener therefore cannot deadlock, but a
/// mutation made from inside it interleaves with other threads' operations
/// and carries no ordering guarantee relative to the eviction that is being
/// reported.
pub trait EvictionListener<V>: Send + Sync + 'static {
    fn on_evict(&self, value: Arc<V>);
}

/// An [`EvictionListener`] backed by a closure.
///
/// Created via [`CacheBuilder::eviction_listener`] or
/// [`Cache::set_eviction_listener`].
///
/// [`CacheBuilder::eviction_listener`]: crate::CacheBuilder::eviction_listener
/// [`Cache::set_eviction_listener`]: crate::Cache::set_eviction_listener
pub struct FnListener<F>(pub F);

impl<V, F> EvictionListener<V> for FnListener<F>
where
    F: Fn(Arc<V>) + Send + Sync + 'static,
{
    fn on_evict(&self, value: Arc<V>) {
        (self.0)(value)
    }
}
