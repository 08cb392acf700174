use crate::bin_tree::{BinTree, Node};

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_tree<K: Ord + Copy, V>(tree: &BinTree<K, V>) {
    let nodes: Vec<&Node<K, V>> = tree.nodes().collect();
    assert_eq!(nodes.len(), tree.len(), "len must match reachable nodes");
    assert_eq!(tree.is_empty(), nodes.is_empty());
    for pair in nodes.windows(2) {
        assert!(
            pair[0].key() < pair[1].key(),
            "in-order keys must be strictly ascending"
        );
    }
    for node in nodes {
        assert!(node.count() >= 1, "live node must have a positive count");
    }
}

#[derive(Clone, Debug)]
enum Op {
    Add(u8, u16),
    Remove(u8),
    Query(u8),
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // a narrow key range keeps plenty of repeated adds and hits on remove
    let key = 0u8..64;
    let op = prop_oneof![
        50 => (key.clone(), any::<u16>()).prop_map(|(k, v)| Op::Add(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        24 => key.prop_map(Op::Query),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_matches_model(ops in ops_strategy()) {
        let mut tree: BinTree<u8, u16> = BinTree::new();
        let mut model: BTreeMap<u8, (u16, usize)> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(key, value) => {
                    tree.add(key, value);
                    model.entry(key).or_insert((value, 0)).1 += 1;
                }
                Op::Remove(key) => {
                    tree.remove(&key);
                    model.remove(&key);
                    prop_assert!(!tree.contains(&key));
                    prop_assert_eq!(tree.count(&key), 0);
                }
                Op::Query(key) => {
                    let expected = model.get(&key);
                    prop_assert_eq!(tree.contains(&key), expected.is_some());
                    prop_assert_eq!(tree.count(&key), expected.map_or(0, |(_, count)| *count));
                    prop_assert_eq!(
                        tree.find(&key).map(|node| *node.value()),
                        expected.map(|(value, _)| *value)
                    );
                }
                Op::Clear => {
                    tree.clear();
                    model.clear();
                }
            }
            validate_tree(&tree);
            prop_assert_eq!(tree.len(), model.len());
        }

        let expected: Vec<(u8, u16)> = model
            .iter()
            .flat_map(|(key, (value, count))| std::iter::repeat_n((*key, *value), *count))
            .collect();
        let actual: Vec<(u8, u16)> = tree.iter().map(|(key, value)| (*key, *value)).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_remove_keeps_order(
        keys in prop::collection::vec(any::<i16>(), 1..200),
        pick in any::<prop::sample::Index>()
    ) {
        let mut tree: BinTree<i16, ()> = keys.iter().map(|&key| (key, ())).collect();
        let mut remaining: Vec<i16> = tree.nodes().map(|node| *node.key()).collect();

        let victim = remaining.remove(pick.index(remaining.len()));
        tree.remove(&victim);

        validate_tree(&tree);
        let after: Vec<i16> = tree.nodes().map(|node| *node.key()).collect();
        prop_assert_eq!(after, remaining);
    }
}
