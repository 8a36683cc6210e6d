//! BucketTable: fixed array of chain heads addressed by masked key bits.

use crate::chain::NodeKey;

/// Bucket count used by `ChainHashMap::new` and as the floor for
/// requests that round to zero.
pub const DEFAULT_BUCKETS: u32 = 256;

/// Rounds `requested` up to the next power of two.
///
/// The arithmetic is done in 32 bits: a request of `0`, or one larger than
/// `2^31`, wraps to zero and is replaced by [`DEFAULT_BUCKETS`]. A request
/// that is already a power of two is returned unchanged, so `1` yields a
/// single bucket.
pub fn bucket_count_for(requested: u32) -> u32 {
    let mut r = requested.wrapping_sub(1);
    r |= r >> 1;
    r |= r >> 2;
    r |= r >> 4;
    r |= r >> 8;
    r |= r >> 16;
    r = r.wrapping_add(1);
    if r == 0 {
        DEFAULT_BUCKETS
    } else {
        r
    }
}

pub(crate) struct BucketTable {
    heads: Box<[Option<NodeKey>]>,
    mask: u32,
}

impl BucketTable {
    pub(crate) fn with_buckets(requested: u32) -> Self {
        let count = bucket_count_for(requested);
        Self {
            heads: vec![None; count as usize].into_boxed_slice(),
            mask: count - 1,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heads.len()
    }

    /// Home bucket of `key`. The key's two's-complement bits are masked
    /// directly, so `k` and `-k` generally land in different buckets.
    #[inline]
    pub(crate) fn index_of(&self, key: i32) -> usize {
        ((key as u32) & self.mask) as usize
    }

    #[inline]
    pub(crate) fn head(&self, bucket: usize) -> Option<NodeKey> {
        self.heads[bucket]
    }

    #[inline]
    pub(crate) fn head_mut(&mut self, bucket: usize) -> &mut Option<NodeKey> {
        &mut self.heads[bucket]
    }

    #[inline]
    pub(crate) fn set_head(&mut self, bucket: usize, head: Option<NodeKey>) {
        self.heads[bucket] = head;
    }

    pub(crate) fn reset(&mut self) {
        self.heads.fill(None);
    }

    /// Occupied buckets in ascending order with their head nodes.
    pub(crate) fn occupied(&self) -> impl Iterator<Item = (usize, NodeKey)> + '_ {
        self.heads
            .iter()
            .enumerate()
            .filter_map(|(i, h)| h.map(|k| (i, k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: rounding yields the next power of two, with the zero
    /// request (and 32-bit overflow) falling back to 256.
    #[test]
    fn rounding_rule() {
        assert_eq!(bucket_count_for(0), 256);
        assert_eq!(bucket_count_for(1), 1);
        assert_eq!(bucket_count_for(2), 2);
        assert_eq!(bucket_count_for(3), 4);
        assert_eq!(bucket_count_for(5), 8);
        assert_eq!(bucket_count_for(256), 256);
        assert_eq!(bucket_count_for(257), 512);
        assert_eq!(bucket_count_for(300), 512);
        assert_eq!(bucket_count_for(1 << 31), 1 << 31);
        assert_eq!(bucket_count_for((1 << 31) + 1), 256);
        assert_eq!(bucket_count_for(u32::MAX), 256);
    }

    /// Invariant: every result is a power of two and never below the request
    /// (unless the request overflowed 32 bits).
    #[test]
    fn rounding_is_power_of_two() {
        for req in 0u32..2048 {
            let n = bucket_count_for(req);
            assert!(n.is_power_of_two(), "{req} -> {n}");
            if req != 0 {
                assert!(n >= req);
                assert!(n / 2 < req);
            }
        }
    }

    /// Invariant: index_of masks the raw bit pattern, including negatives.
    #[test]
    fn index_masks_raw_bits() {
        let t = BucketTable::with_buckets(256);
        assert_eq!(t.len(), 256);
        assert_eq!(t.index_of(1), 1);
        assert_eq!(t.index_of(257), 1);
        assert_eq!(t.index_of(256), 0);
        assert_eq!(t.index_of(-1), 255);
        assert_eq!(t.index_of(-256), 0);
        assert_eq!(t.index_of(i32::MIN), 0);
        assert_eq!(t.index_of(i32::MAX), 255);
    }

    /// Invariant: a single-bucket table sends every key to bucket 0.
    #[test]
    fn single_bucket_table() {
        let t = BucketTable::with_buckets(1);
        assert_eq!(t.len(), 1);
        for k in [-7, 0, 1, 99, i32::MIN, i32::MAX] {
            assert_eq!(t.index_of(k), 0);
        }
    }

    #[test]
    fn fresh_table_is_unoccupied() {
        let t = BucketTable::with_buckets(16);
        assert_eq!(t.occupied().count(), 0);
        assert!((0..16).all(|b| t.head(b).is_none()));
    }
}
