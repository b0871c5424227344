use std::collections::{BTreeMap, HashSet};

use labelbench::aggregate::{invert, rank_by_cardinality, Order};
use labelbench::ir::ItemId;
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn inverted_ids_are_unique_per_label(pairs in proptest_helpers::arb_id2labels(20, 5)) {
        let index = invert(pairs);

        for (label, ids) in index.iter() {
            let distinct: HashSet<_> = ids.iter().collect();
            prop_assert_eq!(distinct.len(), ids.len(), "duplicate id under {}", label);
            prop_assert!(!ids.is_empty());
        }
    }

    #[test]
    fn inversion_agrees_with_input(pairs in proptest_helpers::arb_id2labels(20, 5)) {
        let index = invert(pairs.clone());

        for (id, labels) in &pairs {
            for label in labels {
                if label.is_empty() {
                    prop_assert!(index.get(label).is_none());
                    continue;
                }
                let ids = index.get(label);
                prop_assert!(ids.is_some_and(|ids| ids.contains(id)));
            }
        }
        let seen: HashSet<&str> = pairs
            .iter()
            .flat_map(|(_, labels)| labels.iter().map(String::as_str))
            .collect();
        for label in index.labels() {
            prop_assert!(!label.is_empty());
            prop_assert!(seen.contains(label), "label {:?} not in input", label);
        }
    }

    #[test]
    fn ids_keep_first_encounter_order(pairs in proptest_helpers::arb_id2labels(20, 5)) {
        let mut expected: BTreeMap<String, Vec<ItemId>> = BTreeMap::new();
        for (id, labels) in &pairs {
            for label in labels.iter().filter(|label| !label.is_empty()) {
                let ids = expected.entry(label.clone()).or_default();
                if !ids.contains(id) {
                    ids.push(id.clone());
                }
            }
        }

        prop_assert_eq!(invert(pairs).into_map(), expected);
    }

    #[test]
    fn ranking_is_ordered_by_count_then_label(pairs in proptest_helpers::arb_id2labels(20, 5)) {
        let map = invert(pairs).into_map();

        let desc = rank_by_cardinality(&map, Order::Desc);
        prop_assert_eq!(desc.len(), map.len());
        for window in desc.windows(2) {
            let (a, b) = (map[&window[0]].len(), map[&window[1]].len());
            prop_assert!(a > b || (a == b && window[0] < window[1]));
        }

        let asc = rank_by_cardinality(&map, Order::Asc);
        for window in asc.windows(2) {
            let (a, b) = (map[&window[0]].len(), map[&window[1]].len());
            prop_assert!(a < b || (a == b && window[0] < window[1]));
        }
    }
}
