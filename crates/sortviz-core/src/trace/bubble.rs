#![forbid(unsafe_code)]

use tracing::debug;

use super::{Recorder, Trace};
use crate::element::{Element, ElementState};
use crate::step::Step;

const STARTING: &str = "Starting Bubble Sort algorithm";
const COMPLETED: &str = "Bubble Sort completed! Array is now sorted.";

/// Run bubble sort over a copy of `input` and record every step.
///
/// Each inner iteration emits a comparison step for `j, j+1` and, when
/// `array[j] > array[j+1]`, a swap step; the exchange itself shows up in the
/// following snapshot. After pass `i` the element at `n-1-i` is marked sorted.
/// Equal values never swap.
#[must_use]
pub fn trace_bubble_sort(input: &[Element]) -> Trace {
    let _span = tracing::debug_span!("trace_bubble_sort", n = input.len()).entered();

    let mut rec = Recorder::new(input);
    let n = rec.len();
    rec.push(rec.snapshot(STARTING));

    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            let pair = [j, j + 1];
            rec.push(
                Step::new(
                    rec.highlighted(&pair, ElementState::Comparing),
                    format!("Comparing elements at positions {j} and {}", j + 1),
                )
                .with_comparing(pair.to_vec()),
            );

            if rec.value(j) > rec.value(j + 1) {
                rec.push(
                    Step::new(
                        rec.highlighted(&pair, ElementState::Swapping),
                        format!("Swapping elements at positions {j} and {}", j + 1),
                    )
                    .with_swapping(pair.to_vec()),
                );
                rec.swap(j, j + 1);
            }

            rec.set_state(j, ElementState::Default);
            rec.set_state(j + 1, ElementState::Default);
        }

        let settled = n - 1 - i;
        rec.set_state(settled, ElementState::Sorted);
        rec.push(rec.snapshot(format!(
            "Element at position {settled} is now in its final position"
        )));
    }

    if n > 0 {
        rec.set_state(0, ElementState::Sorted);
        rec.push(rec.snapshot(COMPLETED));
    }

    let trace = rec.finish();
    debug!(steps = trace.len(), "bubble sort trace recorded");
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementId;

    fn elements(values: &[i64]) -> Vec<Element> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Element::new(v, ElementId::from_index(i)))
            .collect()
    }

    #[test]
    fn scenario_5_3_8_1() {
        let trace = trace_bubble_sort(&elements(&[5, 3, 8, 1]));

        let first = trace.first().unwrap();
        assert_eq!(first.values(), vec![5, 3, 8, 1]);
        assert_eq!(first.description, STARTING);
        assert!(first.touched_indices().is_empty());

        let last = trace.last().unwrap();
        assert_eq!(last.values(), vec![1, 3, 5, 8]);
        assert!(last.is_fully_sorted());
        assert_eq!(last.description, COMPLETED);
    }

    #[test]
    fn opening_steps_compare_then_swap() {
        let trace = trace_bubble_sort(&elements(&[5, 3, 8, 1]));

        let cmp = &trace[1];
        assert_eq!(cmp.comparing, Some(vec![0, 1]));
        assert_eq!(cmp.description, "Comparing elements at positions 0 and 1");
        assert_eq!(cmp.array[0].state(), ElementState::Comparing);
        assert_eq!(cmp.array[1].state(), ElementState::Comparing);
        assert_eq!(cmp.array[2].state(), ElementState::Default);

        let swap = &trace[2];
        assert_eq!(swap.swapping, Some(vec![0, 1]));
        assert_eq!(swap.values(), vec![5, 3, 8, 1]);
        assert_eq!(swap.description, "Swapping elements at positions 0 and 1");

        // The exchange and the state reset land in the next snapshot.
        let next = &trace[3];
        assert_eq!(next.values(), vec![3, 5, 8, 1]);
        assert_eq!(next.comparing, Some(vec![1, 2]));
        assert_eq!(next.array[0].state(), ElementState::Default);
    }

    #[test]
    fn marks_positions_sorted_from_the_right() {
        let trace = trace_bubble_sort(&elements(&[5, 3, 8, 1]));
        let marks: Vec<&str> = trace
            .iter()
            .filter(|s| s.description.ends_with("final position"))
            .map(|s| s.description.as_str())
            .collect();
        assert_eq!(
            marks,
            vec![
                "Element at position 3 is now in its final position",
                "Element at position 2 is now in its final position",
                "Element at position 1 is now in its final position",
            ]
        );
    }

    #[test]
    fn sorted_marks_are_permanent() {
        let trace = trace_bubble_sort(&elements(&[4, 2, 3, 1]));
        let mark = trace
            .iter()
            .position(|s| s.description.starts_with("Element at position 3"))
            .unwrap();
        for step in trace.steps().iter().skip(mark) {
            assert_eq!(step.array[3].state(), ElementState::Sorted);
        }
    }

    #[test]
    fn reversed_input_step_count() {
        let n = 6usize;
        let values: Vec<i64> = (0..n as i64).rev().collect();
        let trace = trace_bubble_sort(&elements(&values));
        let pairs = n * (n - 1) / 2;
        // start + comparisons + swaps + sorted marks + completed
        assert_eq!(trace.len(), 1 + pairs + pairs + (n - 1) + 1);
    }

    #[test]
    fn sorted_input_never_swaps() {
        let trace = trace_bubble_sort(&elements(&[1, 2, 3, 4]));
        assert!(trace.iter().all(|s| s.swapping.is_none()));
    }

    #[test]
    fn equal_values_never_swap() {
        let trace = trace_bubble_sort(&elements(&[2, 2]));
        assert!(trace.iter().all(|s| s.swapping.is_none()));
        let ids: Vec<_> = trace.last().unwrap().array.iter().map(|e| e.id().clone()).collect();
        assert_eq!(ids, vec![ElementId::from_index(0), ElementId::from_index(1)]);
    }

    #[test]
    fn empty_input_yields_only_start() {
        let trace = trace_bubble_sort(&[]);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].description, STARTING);
        assert!(trace[0].is_empty());
    }

    #[test]
    fn single_element_starts_and_completes() {
        let trace = trace_bubble_sort(&elements(&[7]));
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].values(), trace[1].values());
        assert_eq!(trace[0].array[0].state(), ElementState::Default);
        assert!(trace[1].is_fully_sorted());
        assert_eq!(trace[1].description, COMPLETED);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = elements(&[3, 1, 2]);
        let before = input.clone();
        let _ = trace_bubble_sort(&input);
        assert_eq!(input, before);
    }
}
