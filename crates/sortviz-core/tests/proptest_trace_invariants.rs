//! Property-based invariant tests for the step tracers.
//!
//! These tests verify, for both algorithms and arbitrary inputs:
//!
//! 1. The last step holds the sorted values, every element marked sorted
//! 2. Every step is a permutation of the input ids
//! 3. The (id, value) layout only changes at indices the steps name
//! 4. Tracing is deterministic
//! 5. The first step is the untouched input
//! 6. No comparison or swap names an out-of-range index

use std::collections::BTreeSet;

use proptest::prelude::*;
use sortviz_core::{
    Algorithm, Element, ElementId, ElementState, Step, Trace, elements_from_values,
    generate_seeded,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn values_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-50i64..50, 0..24)
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop_oneof![Just(Algorithm::Bubble), Just(Algorithm::Merge)]
}

fn layout(step: &Step) -> Vec<(ElementId, i64)> {
    step.array
        .iter()
        .map(|el| (el.id().clone(), el.value()))
        .collect()
}

fn id_set(step: &Step) -> BTreeSet<ElementId> {
    step.array.iter().map(|el| el.id().clone()).collect()
}

fn run(algorithm: Algorithm, values: &[i64]) -> (Vec<Element>, Trace) {
    let input = elements_from_values(values);
    let trace = algorithm.trace(&input);
    (input, trace)
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Final step is sorted
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn final_step_is_sorted_multiset(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let (_, trace) = run(algorithm, &values);
        let last = trace.last().expect("trace is never empty");
        let mut expected = values.clone();
        expected.sort_unstable();
        prop_assert_eq!(last.values(), expected);
        if !values.is_empty() {
            prop_assert!(last.is_fully_sorted());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Ids preserved
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_step_is_a_permutation_of_input(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let (input, trace) = run(algorithm, &values);
        let expected: BTreeSet<ElementId> = input.iter().map(|el| el.id().clone()).collect();
        for (i, step) in trace.iter().enumerate() {
            prop_assert_eq!(step.len(), input.len(), "length changed at step {}", i);
            prop_assert_eq!(id_set(step), expected.clone(), "ids changed at step {}", i);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Bounded diff
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_changes_only_at_named_indices(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let (_, trace) = run(algorithm, &values);
        for i in 1..trace.len() {
            let before = layout(&trace[i - 1]);
            let after = layout(&trace[i]);
            let mut named = trace.touched_indices(i - 1);
            named.extend(trace.touched_indices(i));
            for (idx, (a, b)) in before.iter().zip(&after).enumerate() {
                if a != b {
                    prop_assert!(
                        named.contains(&idx),
                        "index {} changed between steps {} and {} without being named",
                        idx, i - 1, i
                    );
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Determinism
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tracing_twice_is_identical(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let (input, first) = run(algorithm, &values);
        let second = algorithm.trace(&input);
        prop_assert_eq!(first, second);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. First step is the input
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn first_step_is_untouched_input(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let (input, trace) = run(algorithm, &values);
        let first = &trace[0];
        prop_assert_eq!(&first.array, &input);
        prop_assert!(first.description.starts_with("Starting"));
        prop_assert!(first.touched_indices().is_empty());
    }

    #[test]
    fn input_states_are_reset_before_tracing(
        algorithm in algorithm_strategy(),
        seed in any::<u64>(),
    ) {
        let input: Vec<Element> = generate_seeded(8, 1, 40, seed)
            .into_iter()
            .map(|el| el.with_state(ElementState::Swapping))
            .collect();
        let trace = algorithm.trace(&input);
        prop_assert!(trace[0].states().iter().all(|s| *s == ElementState::Default));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Index bounds
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn named_indices_are_in_bounds(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let (_, trace) = run(algorithm, &values);
        for step in &trace {
            if let Some(max) = step.touched_indices().last() {
                prop_assert!(*max < values.len());
            }
        }
    }

    #[test]
    fn sorted_state_is_never_revoked(
        algorithm in algorithm_strategy(),
        values in values_strategy(),
    ) {
        let (_, trace) = run(algorithm, &values);
        for i in 1..trace.len() {
            for (prev, next) in trace[i - 1].array.iter().zip(&trace[i].array) {
                if prev.state() == ElementState::Sorted && prev.id() == next.id() {
                    prop_assert_eq!(next.state(), ElementState::Sorted);
                }
            }
        }
    }
}
