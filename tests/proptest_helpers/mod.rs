#![allow(dead_code)]

use std::collections::HashSet;

use labelbench::ir::ItemId;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Small id space so universes, expected and predicted sets overlap often.
pub fn arb_item_id() -> BoxedStrategy<ItemId> {
    prop_oneof![
        (0i64..40).prop_map(ItemId::Int),
        "[a-e]{1,2}".prop_map(ItemId::Str),
    ]
    .boxed()
}

pub fn arb_universe(max_len: usize) -> BoxedStrategy<Vec<ItemId>> {
    prop::collection::vec(arb_item_id(), 0..=max_len).boxed()
}

pub fn arb_id_set(max_len: usize) -> BoxedStrategy<HashSet<ItemId>> {
    prop::collection::hash_set(arb_item_id(), 0..=max_len).boxed()
}

/// Labels drawn from a small alphabet, with occasional padding and blanks.
/// Padded labels collide with their bare form only if something trims them.
pub fn arb_label() -> BoxedStrategy<String> {
    prop_oneof![
        4 => "[a-f]{1,3}",
        1 => " [a-f]{1,3} ",
        1 => Just(String::new()),
    ]
    .boxed()
}

pub fn arb_id2labels(
    max_items: usize,
    max_labels: usize,
) -> BoxedStrategy<Vec<(ItemId, Vec<String>)>> {
    prop::collection::vec(
        (
            arb_item_id(),
            prop::collection::vec(arb_label(), 0..=max_labels),
        ),
        0..=max_items,
    )
    .boxed()
}
