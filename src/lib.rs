//! chain-hashmap: a fixed-bucket, separate-chaining map from `i32` keys to
//! owned values.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, predictable hash map whose memory layout is decided at
//!   construction. The bucket table is sized once (rounded up to a power of
//!   two) and never rehashed; collisions extend per-bucket chains.
//! - Layers:
//!   - `BucketTable`: boxed slice of optional chain heads plus the bit mask
//!     that maps a key to its home bucket.
//!   - `Arena<V>` / `Node<V>`: every entry is a node in one `SlotMap`;
//!     chains are threaded through it with `next`/`prev` keys.
//!   - `ChainHashMap<V>`: public API orchestrating the two, plus value
//!     semantics (deep clone, `clone_from`, `take`, `swap`).
//!   - `BucketDump`: read-only diagnostic listing of the buckets.
//!
//! Constraints
//! - Single-threaded: no internal synchronization. The map is `Send`/`Sync`
//!   exactly when `V` is, like any plain container.
//! - Fixed geometry: `bucket_count()` is a power of two, at least 1, and
//!   constant for the map's lifetime (`swap` exchanges it along with the
//!   contents).
//! - Unique keys per map; first touch through `get_or_insert` materializes
//!   `V::default()`.
//!
//! Hashing
//! - A key's bucket is `key as u32 & (bucket_count - 1)`. The raw
//!   two's-complement bits are used with no sign normalization, so `k` and
//!   `-k` usually sit in different buckets, and `-1` always sits in the last
//!   one.
//!
//! Ownership and splicing
//! - A node is reachable from exactly one predecessor: a bucket head or the
//!   previous node in its chain. `prev` is a back-reference used only to
//!   splice. `erase` hands the removed node's `next` to its predecessor,
//!   repoints the successor's `prev`, and frees only the removed node.
//! - Arena keys replace raw pointers, so a stale link is caught by slotmap
//!   rather than dereferenced.
//!
//! Failure model
//! - Lookups and `erase` of absent keys are not errors. Duplicate inserts
//!   through `try_insert`/`insert_with` return `InsertError::DuplicateKey`.
//! - Allocation failure aborts, as with the rest of `std`.
//! - Panics from `V::clone` or user closures leave the map unchanged: values
//!   are produced before any link is written, and `clone_from` builds the
//!   full copy before swapping it in.
//!
//! Notes and non-goals
//! - No resizing, no custom hashers, no public iteration over all entries;
//!   `BucketDump` is the only enumeration and is meant for diagnostics.

mod bucket_table;
mod chain;
mod chain_hash_map;
mod chain_hash_map_proptest;
mod dump;

// Public surface
pub use bucket_table::{bucket_count_for, DEFAULT_BUCKETS};
pub use chain_hash_map::{swap, ChainHashMap, InsertError};
pub use dump::BucketDump;
