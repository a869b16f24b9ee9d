use crate::store::KeyedStore;
use crate::segment_tree::RangeSumStructure;
use crate::trie::PrefixIndex;

use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hasher};

/// Sends every key to bucket 0
#[derive(Default)]
struct ConstantHasher;

impl Hasher for ConstantHasher {
    fn write(&mut self, _bytes: &[u8]) {}

    fn finish(&self) -> u64 {
        0
    }
}

#[derive(Clone, Copy, Default)]
struct ConstantBuildHasher;

impl BuildHasher for ConstantBuildHasher {
    type Hasher = ConstantHasher;

    fn build_hasher(&self) -> Self::Hasher {
        ConstantHasher
    }
}

#[derive(Debug, Clone)]
enum StoreOp {
    Insert(String, u32),
    Delete(String),
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{0,3}"
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        3 => (key_strategy(), any::<u32>()).prop_map(|(k, v)| StoreOp::Insert(k, v)),
        1 => key_strategy().prop_map(StoreOp::Delete),
    ]
}

proptest! {
    #[test]
    fn store_matches_hashmap_model(
        capacity in 1usize..16,
        ops in prop::collection::vec(store_op_strategy(), 0..200),
    ) {
        let mut store: KeyedStore<String, u32> = KeyedStore::new(capacity).unwrap();
        let mut model: HashMap<String, u32> = HashMap::new();

        for op in ops {
            match op {
                StoreOp::Insert(k, v) => {
                    prop_assert_eq!(store.insert(k.clone(), v), model.insert(k, v));
                }
                StoreOp::Delete(k) => {
                    prop_assert_eq!(store.delete(k.as_str()), model.remove(&k).is_some());
                    prop_assert!(!store.contains(k.as_str()));
                }
            }

            prop_assert_eq!(store.len(), model.len());
            let stats = store.stats();
            prop_assert_eq!(stats.load_factor, model.len() as f64 / capacity as f64);
            prop_assert!(stats.max_chain_length <= model.len());
        }

        prop_assert_eq!(store.all_entries(), model);
    }

    #[test]
    fn same_bucket_keys_collide_n_minus_one_times(
        keys in prop::collection::btree_set("[a-z]{1,6}", 1..50),
    ) {
        let mut store = KeyedStore::with_hasher(8, ConstantBuildHasher).unwrap();
        for key in &keys {
            store.insert(key.clone(), ());
        }
        // Re-inserting existing keys never counts
        for key in &keys {
            store.insert(key.clone(), ());
        }

        prop_assert_eq!(store.collision_count(), keys.len() - 1);
        prop_assert_eq!(store.stats().max_chain_length, keys.len());
    }

    #[test]
    fn trie_matches_btreemap_model(
        entries in prop::collection::vec(("[a-cA-C]{0,5}", any::<u16>()), 0..100),
    ) {
        let mut index = PrefixIndex::new();
        let mut model: BTreeMap<String, u16> = BTreeMap::new();

        for (key, value) in &entries {
            let before = index.len();
            let replaced = index.insert(key, *value);
            let folded = key.to_lowercase();
            prop_assert_eq!(replaced.is_some(), model.contains_key(&folded));
            prop_assert_eq!(index.len(), before + usize::from(replaced.is_none()));
            model.insert(folded, *value);
        }

        for (key, value) in &model {
            prop_assert_eq!(index.search(key), Some(value));
        }

        // Pre-order with ascending children is lexicographic order
        let all: Vec<_> = index
            .starts_with("")
            .into_iter()
            .map(|m| (m.key, *m.value))
            .collect();
        let expected: Vec<_> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(all.len(), index.len());
        prop_assert_eq!(all, expected);
    }

    #[test]
    fn trie_prefix_results_share_prefix(
        keys in prop::collection::vec("[a-c]{0,5}", 0..60),
        prefix in "[a-c]{0,3}",
    ) {
        let mut index = PrefixIndex::new();
        for key in &keys {
            index.insert(key, ());
        }

        let hits: Vec<_> = index.starts_with(&prefix).into_iter().map(|m| m.key).collect();
        let mut expected: Vec<_> = keys.iter().filter(|k| k.starts_with(&prefix)).cloned().collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(hits, expected);
    }

    #[test]
    fn segment_tree_update_then_point_query(
        values in prop::collection::vec(-1000i64..1000, 1..64),
        updates in prop::collection::vec((any::<prop::sample::Index>(), -1000i64..1000), 0..32),
    ) {
        let mut tree = RangeSumStructure::new(&values);
        let mut model = values.clone();

        for (index, value) in updates {
            let i = index.index(model.len());
            tree.update(i, value).unwrap();
            model[i] = value;
            prop_assert_eq!(tree.query(i, i).unwrap(), value);
        }

        prop_assert_eq!(tree.query(0, model.len() - 1).unwrap(), model.iter().sum::<i64>());
    }

    #[test]
    fn segment_tree_adjacent_ranges_add(
        values in prop::collection::vec(-1000i64..1000, 2..64),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
        c in any::<prop::sample::Index>(),
    ) {
        let n = values.len();
        let mut bounds = [a.index(n), b.index(n), c.index(n)];
        bounds.sort();
        let [a, b, c] = bounds;
        prop_assume!(b < c);

        let tree = RangeSumStructure::new(&values);
        let whole = tree.query(a, c).unwrap();
        let split = tree.query(a, b).unwrap() + tree.query(b + 1, c).unwrap();
        prop_assert_eq!(whole, split);
        prop_assert_eq!(whole, values[a..=c].iter().sum::<i64>());
    }
}
