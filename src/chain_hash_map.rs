//! ChainHashMap: fixed-bucket separate-chaining map from `i32` keys.

use crate::bucket_table::{BucketTable, DEFAULT_BUCKETS};
use crate::chain::{Arena, NodeKey, Probe};
use crate::dump::BucketDump;
use core::fmt;
use core::mem;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertError {
    DuplicateKey,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey => f.write_str("key already present in map"),
        }
    }
}

impl std::error::Error for InsertError {}

/// A map from `i32` keys to owned values with a bucket table fixed at
/// construction.
///
/// Each bucket heads a doubly-linked chain of colliding entries. The table
/// never grows: chains get longer as entries are added, so callers that
/// need short chains should size the table up front with
/// [`ChainHashMap::with_buckets`].
pub struct ChainHashMap<V> {
    table: BucketTable,
    arena: Arena<V>,
}

impl<V> ChainHashMap<V> {
    /// Creates a map with [`DEFAULT_BUCKETS`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Creates a map whose bucket count is `requested` rounded up to a
    /// power of two (see [`bucket_count_for`](crate::bucket_count_for)).
    pub fn with_buckets(requested: u32) -> Self {
        Self {
            table: BucketTable::with_buckets(requested),
            arena: Arena::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.table.len()
    }

    /// Bucket that `key` hashes to. Keys are masked as raw two's-complement
    /// bits, so `-1` lands in the last bucket.
    pub fn bucket_index(&self, key: i32) -> usize {
        self.table.index_of(key)
    }

    /// Number of entries chained in the bucket that `key` hashes to,
    /// whether or not `key` itself is present.
    pub fn bucket_density(&self, key: i32) -> usize {
        let bucket = self.table.index_of(key);
        self.arena.walk(self.table.head(bucket)).count()
    }

    fn find(&self, key: i32) -> Option<NodeKey> {
        self.arena.find(self.table.head(self.table.index_of(key)), key)
    }

    pub fn contains_key(&self, key: i32) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: i32) -> Option<&V> {
        self.find(key).map(|k| &self.arena.node(k).value)
    }

    pub fn get_mut(&mut self, key: i32) -> Option<&mut V> {
        let k = self.find(key)?;
        Some(&mut self.arena.node_mut(k).value)
    }

    /// Returns the value for `key`, inserting `default()` at the end of the
    /// key's chain if it is absent. `default` is not called when the key is
    /// already present.
    pub fn get_or_insert_with<F>(&mut self, key: i32, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let bucket = self.table.index_of(key);
        let node = match self.arena.probe(self.table.head(bucket), key) {
            Probe::Found(k) => k,
            Probe::Vacant { tail } => {
                // Built before linking: a panic here leaves the chain as is.
                let value = default();
                self.arena
                    .append(self.table.head_mut(bucket), tail, key, value)
            }
        };
        &mut self.arena.node_mut(node).value
    }

    pub fn insert_with<F>(&mut self, key: i32, default: F) -> Result<&mut V, InsertError>
    where
        F: FnOnce() -> V,
    {
        let bucket = self.table.index_of(key);
        match self.arena.probe(self.table.head(bucket), key) {
            Probe::Found(_) => Err(InsertError::DuplicateKey),
            Probe::Vacant { tail } => {
                let value = default();
                let k = self
                    .arena
                    .append(self.table.head_mut(bucket), tail, key, value);
                Ok(&mut self.arena.node_mut(k).value)
            }
        }
    }

    pub fn try_insert(&mut self, key: i32, value: V) -> Result<&mut V, InsertError> {
        self.insert_with(key, || value)
    }

    /// Removes `key` and returns its value. Other entries in the same chain
    /// keep their order. Erasing an absent key does nothing.
    pub fn erase(&mut self, key: i32) -> Option<V> {
        let bucket = self.table.index_of(key);
        let node = self.arena.find(self.table.head(bucket), key)?;
        self.arena
            .unlink(self.table.head_mut(bucket), node)
            .map(|n| n.value)
    }

    /// Drops every entry. The bucket count is unchanged.
    pub fn clear(&mut self) {
        // Detach everything before any value's `Drop` runs.
        self.table.reset();
        let old = mem::replace(&mut self.arena, Arena::new());
        drop(old);
    }

    /// Exchanges the contents of two maps, bucket tables included, without
    /// allocating.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the contents out, leaving `self` empty with the same bucket
    /// count. This allocates a fresh table of `bucket_count()` slots; a
    /// plain move or [`swap`](Self::swap) transfers the map without
    /// allocating.
    pub fn take(&mut self) -> Self {
        let empty = Self::with_buckets(self.table.len() as u32);
        mem::replace(self, empty)
    }

    /// Read-only view listing entries by bucket, then chain order.
    pub fn dump(&self) -> BucketDump<'_, V> {
        BucketDump::new(self)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (usize, i32, &V)> + '_ {
        self.table.occupied().flat_map(move |(bucket, head)| {
            self.arena
                .walk(Some(head))
                .map(move |(_, n)| (bucket, n.key, &n.value))
        })
    }
}

impl<V: Default> ChainHashMap<V> {
    /// Returns the value for `key`, first inserting `V::default()` if the
    /// key has never been touched (or was erased).
    pub fn get_or_insert(&mut self, key: i32) -> &mut V {
        self.get_or_insert_with(key, V::default)
    }
}

/// Exchanges the contents of `a` and `b`.
pub fn swap<V>(a: &mut ChainHashMap<V>, b: &mut ChainHashMap<V>) {
    a.swap(b);
}

impl<V> Default for ChainHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for ChainHashMap<V> {
    /// Deep copy: same bucket count, every chain rebuilt in order with
    /// cloned values. The copy's arena holds exactly `len()` nodes.
    fn clone(&self) -> Self {
        let mut table = BucketTable::with_buckets(self.table.len() as u32);
        let mut arena = Arena::with_capacity(self.arena.len());
        for (bucket, head) in self.table.occupied() {
            let copy = self.arena.clone_chain_into(Some(head), &mut arena);
            table.set_head(bucket, copy);
        }
        Self { table, arena }
    }

    /// Builds the full copy before committing it with a swap; if a value's
    /// `clone` panics, `self` keeps its previous contents.
    fn clone_from(&mut self, source: &Self) {
        let mut fresh = source.clone();
        self.swap(&mut fresh);
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries().map(|(_, k, v)| (k, v)))
            .finish()
    }
}

/// Maps are equal when they hold the same key/value pairs; bucket counts
/// and chain order are not compared.
impl<V: PartialEq> PartialEq for ChainHashMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries().all(|(_, k, v)| other.get(k) == Some(v))
    }
}

impl<V: Eq> Eq for ChainHashMap<V> {}

#[cfg(test)]
impl<V> ChainHashMap<V> {
    /// Panics unless every chain is well formed: nodes sit in their home
    /// bucket, keys are unique per chain, back-links mirror forward links,
    /// and every arena node is reachable from some head.
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        assert!(self.table.len().is_power_of_two());
        let mut reachable = 0usize;
        for bucket in 0..self.table.len() {
            let mut prev = None;
            let mut keys = HashSet::new();
            for (k, n) in self.arena.walk(self.table.head(bucket)) {
                assert_eq!(self.table.index_of(n.key), bucket, "key {} off its bucket", n.key);
                assert!(keys.insert(n.key), "duplicate key {} in bucket {bucket}", n.key);
                assert_eq!(n.prev(), prev, "back-link mismatch at key {}", n.key);
                prev = Some(k);
                reachable += 1;
            }
        }
        assert_eq!(reachable, self.arena.len(), "arena holds unreachable nodes");
    }
}
