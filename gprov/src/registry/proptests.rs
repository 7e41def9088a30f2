//! Property-based tests for registry merging.

use super::{merge_registries, OperationRegistry};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn registry_strategy() -> impl Strategy<Value = OperationRegistry<u32>> {
    prop::collection::btree_map("[a-e]{1,2}", any::<u32>(), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every key of every input appears in the merged map.
    #[test]
    fn merged_keys_are_union(registries in prop::collection::vec(registry_strategy(), 0..6)) {
        let expected: BTreeSet<String> = registries
            .iter()
            .flat_map(|r| r.keys().cloned())
            .collect();
        let outcome = merge_registries(registries);
        let actual: BTreeSet<String> = outcome.merged.keys().cloned().collect();
        prop_assert_eq!(actual, expected);
    }

    // The value for each key comes from the last registry that has it.
    #[test]
    fn last_writer_wins(registries in prop::collection::vec(registry_strategy(), 0..6)) {
        let outcome = merge_registries(registries.clone());
        for (key, value) in &outcome.merged {
            let last = registries.iter().rev().find_map(|r| r.get(key));
            prop_assert_eq!(Some(value), last);
        }
    }

    // A key seen n times is recorded as a duplicate n - 1 times.
    #[test]
    fn duplicate_count_matches_occurrences(
        registries in prop::collection::vec(registry_strategy(), 0..6)
    ) {
        let total: usize = registries.iter().map(BTreeMap::len).sum();
        let outcome = merge_registries(registries.clone());
        prop_assert_eq!(outcome.duplicates.len(), total - outcome.merged.len());

        for key in outcome.merged.keys() {
            let seen = registries.iter().filter(|r| r.contains_key(key)).count();
            let recorded = outcome.duplicates.iter().filter(|d| *d == key).count();
            prop_assert_eq!(recorded, seen - 1);
        }
    }

    // Merging is deterministic.
    #[test]
    fn merge_is_deterministic(registries in prop::collection::vec(registry_strategy(), 0..6)) {
        let a = merge_registries(registries.clone());
        let b = merge_registries(registries);
        prop_assert_eq!(a, b);
    }

    // Strict mode fails exactly when duplicates were recorded.
    #[test]
    fn strict_fails_iff_duplicates(registries in prop::collection::vec(registry_strategy(), 0..6)) {
        let outcome = merge_registries(registries);
        let clean = outcome.is_clean();
        prop_assert_eq!(outcome.into_strict().is_ok(), clean);
    }
}
