use std::collections::HashSet;

use labelbench::confusion::{positive_ids, score_confusion, ListedAs};
use labelbench::ir::ItemId;
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn partition_covers_universe_exactly_once(
        universe in proptest_helpers::arb_universe(30),
        expected in proptest_helpers::arb_id_set(20),
        predicted in proptest_helpers::arb_id_set(20),
    ) {
        let partition = score_confusion(&universe, &expected, &predicted);

        let distinct: HashSet<&ItemId> = universe.iter().collect();
        prop_assert_eq!(partition.total(), distinct.len());

        let mut seen: HashSet<&ItemId> = HashSet::new();
        for id in partition
            .true_positive
            .iter()
            .chain(&partition.false_positive)
            .chain(&partition.false_negative)
            .chain(&partition.true_negative)
        {
            prop_assert!(seen.insert(id), "id {} appears in two buckets", id);
        }
        prop_assert_eq!(seen, distinct);
    }

    #[test]
    fn buckets_match_membership(
        universe in proptest_helpers::arb_universe(30),
        expected in proptest_helpers::arb_id_set(20),
        predicted in proptest_helpers::arb_id_set(20),
    ) {
        let partition = score_confusion(&universe, &expected, &predicted);

        for id in &partition.true_positive {
            prop_assert!(expected.contains(id) && predicted.contains(id));
        }
        for id in &partition.false_positive {
            prop_assert!(!expected.contains(id) && predicted.contains(id));
        }
        for id in &partition.false_negative {
            prop_assert!(expected.contains(id) && !predicted.contains(id));
        }
        for id in &partition.true_negative {
            prop_assert!(!expected.contains(id) && !predicted.contains(id));
        }
    }

    #[test]
    fn metrics_are_bounded_and_complementary(
        universe in proptest_helpers::arb_universe(30),
        expected in proptest_helpers::arb_id_set(20),
        predicted in proptest_helpers::arb_id_set(20),
    ) {
        let metrics = score_confusion(&universe, &expected, &predicted).metrics();

        for value in [metrics.accuracy, metrics.error_rate, metrics.precision, metrics.recall] {
            prop_assert!((0.0..=1.0).contains(&value), "metric {} out of range", value);
        }
        prop_assert!((metrics.accuracy + metrics.error_rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn complement_listing_flips_positives(
        universe in proptest_helpers::arb_universe(30),
        listed in proptest_helpers::arb_id_set(20),
    ) {
        let positives = positive_ids(&universe, &listed, ListedAs::Negative);
        for id in &universe {
            prop_assert_eq!(positives.contains(id), !listed.contains(id));
        }
    }
}
