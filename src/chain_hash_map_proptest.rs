#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so they can call
// the structural invariant checker after every step.

use crate::chain_hash_map::{ChainHashMap, InsertError};
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations: indices shrink toward earlier keys, and the pool
// is drawn from a narrow range so small tables see long chains.
#[derive(Clone, Debug)]
enum OpI {
    Touch(usize),
    Set(usize, i32),
    TryInsert(usize, i32),
    Erase(usize),
    Get(usize),
    Density(usize),
    Clear,
    CloneAndDiverge(usize),
}

fn arb_scenario() -> impl Strategy<Value = (u32, Vec<i32>, Vec<OpI>)> {
    let buckets = prop_oneof![Just(0u32), Just(1u32), Just(2u32), 3u32..=8, Just(64u32)];
    let pool = proptest::collection::vec(-40i32..40, 1..=12);
    (buckets, pool).prop_flat_map(|(buckets, pool)| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            4 => idx.clone().prop_map(OpI::Touch),
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::TryInsert(i, v)),
            4 => idx.clone().prop_map(OpI::Erase),
            2 => idx.clone().prop_map(OpI::Get),
            2 => idx.clone().prop_map(OpI::Density),
            1 => Just(OpI::Clear),
            1 => idx.clone().prop_map(OpI::CloneAndDiverge),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (buckets, pool.clone(), ops))
    })
}

fn model_density(model: &HashMap<i32, i32>, bucket_count: usize, key: i32) -> usize {
    let mask = bucket_count as u32 - 1;
    model
        .keys()
        .filter(|&&k| (k as u32 & mask) == (key as u32 & mask))
        .count()
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - First touch inserts `V::default()` exactly once; later touches alias it.
// - `erase` removes only the named key and never disturbs chain neighbours.
// - `bucket_density` matches the model's per-bucket key count.
// - `clear` empties every bucket.
// - A clone diverges independently from its source.
// - Chains stay well formed after every step (home bucket, unique keys,
//   mirrored back-links, no unreachable nodes).
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((buckets, pool, ops) in arb_scenario()) {
        let mut sut: ChainHashMap<i32> = ChainHashMap::with_buckets(buckets);
        let mut model: HashMap<i32, i32> = HashMap::new();
        let bucket_count = sut.bucket_count();
        prop_assert!(bucket_count.is_power_of_two());

        for op in ops {
            match op {
                OpI::Touch(i) => {
                    let k = pool[i];
                    let v = *sut.get_or_insert(k);
                    let mv = *model.entry(k).or_default();
                    prop_assert_eq!(v, mv);
                }
                OpI::Set(i, v) => {
                    let k = pool[i];
                    *sut.get_or_insert(k) = v;
                    model.insert(k, v);
                }
                OpI::TryInsert(i, v) => {
                    let k = pool[i];
                    let already = model.contains_key(&k);
                    match sut.try_insert(k, v) {
                        Ok(slot) => {
                            prop_assert!(!already, "try_insert must fail on duplicate");
                            prop_assert_eq!(*slot, v);
                            model.insert(k, v);
                        }
                        Err(InsertError::DuplicateKey) => {
                            prop_assert!(already, "duplicate error only when key exists");
                        }
                    }
                }
                OpI::Erase(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.erase(k), model.remove(&k));
                    prop_assert!(!sut.contains_key(k));
                }
                OpI::Get(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.get(k), model.get(&k));
                }
                OpI::Density(i) => {
                    let k = pool[i];
                    let expected = model_density(&model, bucket_count, k);
                    prop_assert_eq!(sut.bucket_density(k), expected);
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                    for &k in &pool {
                        prop_assert_eq!(sut.bucket_density(k), 0);
                    }
                }
                OpI::CloneAndDiverge(i) => {
                    let k = pool[i];
                    let mut copy = sut.clone();
                    copy.assert_invariants();
                    prop_assert_eq!(&copy, &sut);
                    let bumped = copy.get(k).copied().unwrap_or(0).wrapping_add(1);
                    *copy.get_or_insert(k) = bumped;
                    copy.erase(k.wrapping_add(1));
                    prop_assert_eq!(sut.get(k), model.get(&k));
                }
            }

            sut.assert_invariants();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.bucket_count(), bucket_count);
        }

        // Final sweep: every model entry is reachable and nothing extra is.
        for (&k, &v) in &model {
            prop_assert_eq!(sut.get(k), Some(&v));
        }
        let dumped = sut.dump().entries().count();
        prop_assert_eq!(dumped, model.len());
    }
}
