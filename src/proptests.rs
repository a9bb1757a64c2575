use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

use crate::search::{direct_comparisons, linear_scan_comparisons};

fn validate_index<V>(idx: &ChainedIndex<V>) {
    let entries: Vec<(&str, &[V])> = idx.entries().collect();
    assert_eq!(entries.len(), idx.distinct_key_count());

    let total: usize = entries.iter().map(|(_, chain)| chain.len()).sum();
    assert_eq!(
        total,
        idx.total_record_count(),
        "chain lengths must sum to record count"
    );

    for (pos, (key, chain)) in entries.iter().enumerate() {
        assert!(!chain.is_empty(), "a key never exists without a record");
        assert_eq!(
            idx.position(key),
            Some(pos),
            "every key must be reachable at its own position"
        );
    }

    assert!(idx.capacity() >= 1);
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u64),
    Lookup(String),
    Resize,
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // A small alphabet so keys repeat and chains grow; spaces exercise
    // last-name hashing, including the empty last name.
    "[ab ]{0,4}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        60 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        35 => key.prop_map(Op::Lookup),
        5 => Just(Op::Resize),
    ];
    prop::collection::vec(op, 0..=500)
}

fn hash_function_strategy() -> impl Strategy<Value = HashFunction> {
    prop_oneof![
        Just(HashFunction::General),
        Just(HashFunction::LastNameOrdinalSum),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_model(ops in ops_strategy(), hash in hash_function_strategy()) {
        let config = IndexConfig::default().with_hash_function(hash);
        let mut idx: ChainedIndex<u64> = ChainedIndex::with_config(config);
        let mut model: BTreeMap<String, Vec<u64>> = BTreeMap::new();
        let mut order: Vec<String> = Vec::new();
        let mut expected_resizes = 0usize;

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    idx.insert(&key, value);
                    if !model.contains_key(&key) {
                        order.push(key.clone());
                    }
                    model.entry(key).or_default().push(value);

                    let total: usize = model.values().map(Vec::len).sum();
                    if total as f64 / model.len() as f64 > 2.0 {
                        expected_resizes += 1;
                    }
                }
                Op::Lookup(key) => {
                    let expected = model.get(&key).map(Vec::as_slice).unwrap_or(&[]);
                    prop_assert_eq!(idx.lookup(&key), expected);
                }
                Op::Resize => {
                    idx.resize();
                    expected_resizes += 1;
                }
            }

            prop_assert_eq!(idx.distinct_key_count(), model.len());
            prop_assert_eq!(idx.resize_count(), expected_resizes);
        }

        validate_index(&idx);
        let keys: Vec<&str> = idx.entries().map(|(k, _)| k).collect();
        prop_assert_eq!(keys, order.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn prop_lookup_is_stable_under_unrelated_inserts(
        chain in prop::collection::vec(any::<u64>(), 1..20),
        others in prop::collection::vec(("[c-z]{1,3}", any::<u64>()), 0..200),
    ) {
        let mut idx: ChainedIndex<u64> = ChainedIndex::new();
        for &v in &chain {
            idx.insert("ab", v);
        }
        let before = idx.lookup("ab").to_vec();
        prop_assert_eq!(&before, &chain);

        for (key, v) in others {
            idx.insert(&key, v);
            prop_assert_eq!(idx.lookup("ab"), before.as_slice());
        }
        prop_assert_eq!(idx.lookup("ab"), idx.lookup("ab"));
    }

    #[test]
    fn prop_resize_preserves_every_chain(ops in ops_strategy()) {
        let mut idx: ChainedIndex<u64> = ChainedIndex::new();
        for op in ops {
            if let Op::Insert(key, value) = op {
                idx.insert(&key, value);
            }
        }
        let before: Vec<(String, Vec<u64>)> = idx
            .entries()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect();
        let capacity = idx.capacity();

        idx.resize();

        prop_assert!(idx.capacity() >= capacity);
        for (key, chain) in &before {
            prop_assert_eq!(idx.lookup(key), chain.as_slice());
        }
        validate_index(&idx);
    }

    #[test]
    fn prop_comparison_counts(ops in ops_strategy(), probe in key_strategy()) {
        let mut idx: ChainedIndex<u64> = ChainedIndex::new();
        for op in ops {
            if let Op::Insert(key, value) = op {
                idx.insert(&key, value);
            }
        }

        let chain_len = idx.lookup(&probe).len() as u64;
        let direct = direct_comparisons(&idx, &probe);
        let linear = linear_scan_comparisons(&idx, &probe);

        match idx.position(&probe) {
            Some(pos) => {
                prop_assert_eq!(direct, 1 + chain_len);
                prop_assert_eq!(linear, pos as u64 + 1);
            }
            None => {
                prop_assert_eq!(direct, 1);
                prop_assert_eq!(linear, idx.distinct_key_count() as u64);
            }
        }
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(
        items: &[T],
        used: &mut [bool],
        out: &mut Vec<T>,
        f: &mut impl FnMut(Vec<T>),
    ) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = ["Smith", "Jones", "Smith", "Lee", "Jones", ""];

    for_each_permutation(&keys, |perm| {
        let mut idx: ChainedIndex<u64> = ChainedIndex::new();
        let mut model: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
        let mut first_seen: Vec<&str> = Vec::new();

        for (i, k) in perm.iter().enumerate() {
            idx.insert(k, i as u64);
            if !model.contains_key(k) {
                first_seen.push(*k);
            }
            model.entry(*k).or_default().push(i as u64);
        }

        validate_index(&idx);
        assert_eq!(idx.distinct_key_count(), 4);
        for (key, chain) in &model {
            assert_eq!(idx.lookup(key), chain.as_slice());
            assert_eq!(direct_comparisons(&idx, key), 1 + chain.len() as u64);
        }
        for (pos, key) in first_seen.iter().enumerate() {
            assert_eq!(linear_scan_comparisons(&idx, key), pos as u64 + 1);
        }

        // Six records over four keys never exceeds 2.0.
        assert_eq!(idx.resize_count(), 0);
    });
}
