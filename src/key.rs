use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

/// The cache-internal representation of a caller key.
///
/// Equality and hashing delegate verbatim to the wrapped key: two
/// `CanonicalKey`s are equal iff the caller's keys are equal under `K`'s own
/// semantics.  The wrapper never copies or reinterprets the key, so lookup
/// correctness rests entirely on `K`'s `Hash`/`Eq` being consistent with each
/// other (a key type violating that is caller error, not caught here).
#[repr(transparent)]
#[derive(Debug)]
pub(crate) struct CanonicalKey<K>(K);

impl<K> CanonicalKey<K> {
    #[inline]
    pub(crate) fn new(key: K) -> Self {
        CanonicalKey(key)
    }
}

impl<K: Hash> Hash for CanonicalKey<K> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<K: PartialEq> PartialEq for CanonicalKey<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K: Eq> Eq for CanonicalKey<K> {}

/// Lets the entry map be probed with a bare `&K`, so lookups never wrap or
/// clone the caller's key.  The `Borrow` contract (borrowed hash/eq must
/// match the owned form) holds because both impls above are pure delegations.
impl<K> Borrow<K> for CanonicalKey<K> {
    #[inline]
    fn borrow(&self) -> &K {
        &self.0
    }
}
