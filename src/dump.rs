//! Diagnostic listing of a map's buckets.

use crate::chain_hash_map::ChainHashMap;
use core::fmt;

/// Borrowed view of a [`ChainHashMap`] that enumerates
/// `(bucket, key, value)` triples, buckets ascending and each chain in link
/// order. With `V: Display` it renders as a tab-separated table:
///
/// ```text
/// Loc	Key	Value
/// 1	1	a
/// 1	257	b
/// ```
pub struct BucketDump<'a, V> {
    map: &'a ChainHashMap<V>,
}

impl<'a, V> BucketDump<'a, V> {
    pub(crate) fn new(map: &'a ChainHashMap<V>) -> Self {
        Self { map }
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, i32, &'a V)> + 'a {
        self.map.entries()
    }
}

impl<V: fmt::Display> fmt::Display for BucketDump<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loc\tKey\tValue")?;
        for (bucket, key, value) in self.entries() {
            writeln!(f, "{bucket}\t{key}\t{value}")?;
        }
        Ok(())
    }
}
