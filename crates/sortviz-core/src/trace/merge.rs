#![forbid(unsafe_code)]

use std::iter::Peekable;
use std::vec::IntoIter;

use tracing::{debug, trace};

use super::{Recorder, Trace};
use crate::element::{Element, ElementState};
use crate::step::Step;

const STARTING: &str = "Starting Merge Sort algorithm";
const COMPLETED: &str = "Merge Sort completed! Array is now sorted.";

/// Run top-down merge sort over a copy of `input` and record every step.
///
/// Every non-trivial range emits a "dividing" step before recursing and a
/// "merging" step before its merge. The merge itself emits one step per
/// placed element. Ties take from the left run, so the merge is stable.
///
/// A placement moves the taken element into the output slot and the element
/// it displaces into the slot the taken one came from. That slot is reported
/// as the step's `pivot`, so every snapshot stays a permutation of the input.
#[must_use]
pub fn trace_merge_sort(input: &[Element]) -> Trace {
    let _span = tracing::debug_span!("trace_merge_sort", n = input.len()).entered();

    let mut rec = Recorder::new(input);
    rec.push(rec.snapshot(STARTING));

    match rec.len() {
        0 => {}
        1 => {
            rec.set_state(0, ElementState::Sorted);
            rec.push(rec.snapshot(COMPLETED));
        }
        n => sort_range(&mut rec, 0, n - 1),
    }

    let trace = rec.finish();
    debug!(steps = trace.len(), "merge sort trace recorded");
    trace
}

fn sort_range(rec: &mut Recorder, start: usize, end: usize) {
    if start >= end {
        return;
    }
    let mid = start + (end - start) / 2;

    let range: Vec<usize> = (start..=end).collect();
    rec.push(
        Step::new(
            rec.highlighted(&range, ElementState::Comparing),
            format!("Dividing subarray from index {start} to {end}"),
        )
        .with_comparing(range),
    );

    sort_range(rec, start, mid);
    sort_range(rec, mid + 1, end);
    merge(rec, start, mid, end);
}

fn merge(rec: &mut Recorder, start: usize, mid: usize, end: usize) {
    trace!(start, mid, end, "merge");
    let mut left = rec.working[start..=mid].to_vec().into_iter().peekable();
    let mut right = rec.working[mid + 1..=end].to_vec().into_iter().peekable();

    let range: Vec<usize> = (start..=end).collect();
    rec.push(Step::new(
        rec.highlighted(&range, ElementState::Pivot),
        format!(
            "Merging subarrays from index {start} to {mid} and {} to {end}",
            mid + 1
        ),
    ));

    let mut k = start;
    while let Some(taken) = take_next(&mut left, &mut right) {
        let value = taken.value();
        let displaced = rec.place(k, end, &taken);
        let step = placement_step(
            rec,
            k,
            displaced,
            format!("Placing element {value} in position {k}"),
        );
        rec.push(step);
        k += 1;
    }

    for taken in left.chain(right) {
        let value = taken.value();
        let displaced = rec.place(k, end, &taken);
        let step = placement_step(
            rec,
            k,
            displaced,
            format!("Placing remaining element {value} in position {k}"),
        );
        rec.push(step);
        k += 1;
    }

    if start == 0 && end + 1 == rec.len() {
        for idx in start..=end {
            rec.set_state(idx, ElementState::Sorted);
        }
        rec.push(rec.snapshot(COMPLETED));
    } else {
        for idx in start..=end {
            rec.set_state(idx, ElementState::Default);
        }
    }
}

/// Head of whichever run sorts first, or `None` once either run is empty.
fn take_next(
    left: &mut Peekable<IntoIter<Element>>,
    right: &mut Peekable<IntoIter<Element>>,
) -> Option<Element> {
    let take_left = match (left.peek(), right.peek()) {
        (Some(l), Some(r)) => l.value() <= r.value(),
        _ => return None,
    };
    if take_left { left.next() } else { right.next() }
}

fn placement_step(rec: &Recorder, k: usize, displaced: Option<usize>, description: String) -> Step {
    let step = rec.snapshot(description).with_swapping(vec![k]);
    match displaced {
        Some(slot) => step.with_pivot(slot),
        None => step,
    }
}

impl Recorder {
    /// Move `taken` into slot `k`, searching `k..=end` for its current slot.
    ///
    /// Returns the slot that received the displaced element, if any.
    fn place(&mut self, k: usize, end: usize, taken: &Element) -> Option<usize> {
        let found = self.working[k..=end]
            .iter()
            .position(|el| el.id() == taken.id() && el.value() == taken.value())
            .map(|offset| k + offset);

        let displaced = match found {
            Some(slot) if slot != k => {
                self.working.swap(k, slot);
                Some(slot)
            }
            Some(_) => None,
            None => {
                self.working[k] = taken.clone();
                None
            }
        };
        self.working[k].set_state(ElementState::Swapping);
        displaced
    }
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

    fn find<'a>(trace: &'a Trace, description: &str) -> &'a Step {
        trace
            .iter()
            .find(|s| s.description == description)
            .unwrap_or_else(|| panic!("missing step {description:?}"))
    }

    #[test]
    fn scenario_5_3_8_1() {
        let trace = trace_merge_sort(&elements(&[5, 3, 8, 1]));

        assert_eq!(trace[0].values(), vec![5, 3, 8, 1]);
        assert_eq!(trace[0].description, STARTING);

        let left_merge = find(&trace, "Merging subarrays from index 0 to 0 and 1 to 1");
        assert_eq!(left_merge.values(), vec![5, 3, 8, 1]);
        assert_eq!(
            left_merge.states()[..2],
            [ElementState::Pivot, ElementState::Pivot]
        );
        assert_eq!(left_merge.array[2].state(), ElementState::Default);

        let right_merge = find(&trace, "Merging subarrays from index 2 to 2 and 3 to 3");
        assert_eq!(right_merge.values(), vec![3, 5, 8, 1]);
        assert_eq!(
            right_merge.states()[2..],
            [ElementState::Pivot, ElementState::Pivot]
        );

        let final_merge = find(&trace, "Merging subarrays from index 0 to 1 and 2 to 3");
        assert_eq!(final_merge.values(), vec![3, 5, 1, 8]);
        assert!(final_merge.states().iter().all(|s| *s == ElementState::Pivot));

        let last = trace.last().unwrap();
        assert_eq!(last.values(), vec![1, 3, 5, 8]);
        assert!(last.is_fully_sorted());
        assert_eq!(last.description, COMPLETED);
    }

    #[test]
    fn full_step_sequence_for_5_3_8_1() {
        let trace = trace_merge_sort(&elements(&[5, 3, 8, 1]));
        let descriptions: Vec<&str> = trace.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Starting Merge Sort algorithm",
                "Dividing subarray from index 0 to 3",
                "Dividing subarray from index 0 to 1",
                "Merging subarrays from index 0 to 0 and 1 to 1",
                "Placing element 3 in position 0",
                "Placing remaining element 5 in position 1",
                "Dividing subarray from index 2 to 3",
                "Merging subarrays from index 2 to 2 and 3 to 3",
                "Placing element 1 in position 2",
                "Placing remaining element 8 in position 3",
                "Merging subarrays from index 0 to 1 and 2 to 3",
                "Placing element 1 in position 0",
                "Placing element 3 in position 1",
                "Placing element 5 in position 2",
                "Placing remaining element 8 in position 3",
                "Merge Sort completed! Array is now sorted.",
            ]
        );
    }

    #[test]
    fn dividing_step_names_whole_range() {
        let trace = trace_merge_sort(&elements(&[4, 1, 3]));
        let divide = &trace[1];
        assert_eq!(divide.comparing, Some(vec![0, 1, 2]));
        assert!(divide.states().iter().all(|s| *s == ElementState::Comparing));
    }

    #[test]
    fn placement_reports_output_and_displaced_slot() {
        let trace = trace_merge_sort(&elements(&[5, 3, 8, 1]));
        let placed = find(&trace, "Placing element 3 in position 0");
        assert_eq!(placed.swapping, Some(vec![0]));
        assert_eq!(placed.pivot, Some(1));
        assert_eq!(placed.values(), vec![3, 5, 8, 1]);
        assert_eq!(placed.array[0].state(), ElementState::Swapping);

        let in_place = find(&trace, "Placing remaining element 5 in position 1");
        assert_eq!(in_place.swapping, Some(vec![1]));
        assert_eq!(in_place.pivot, None);
    }

    #[test]
    fn inner_merge_resets_range_silently() {
        let trace = trace_merge_sort(&elements(&[5, 3, 8, 1]));
        let next = find(&trace, "Dividing subarray from index 2 to 3");
        assert_eq!(next.array[0].state(), ElementState::Default);
        assert_eq!(next.array[1].state(), ElementState::Default);
    }

    #[test]
    fn ties_take_from_left_run() {
        let trace = trace_merge_sort(&elements(&[2, 2, 1]));
        let last = trace.last().unwrap();
        assert_eq!(last.values(), vec![1, 2, 2]);
        let ids: Vec<&str> = last.array.iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["element-2", "element-0", "element-1"]);
    }

    #[test]
    fn empty_input_yields_only_start() {
        let trace = trace_merge_sort(&[]);
        assert_eq!(trace.len(), 1);
        assert!(trace[0].is_empty());
    }

    #[test]
    fn single_element_starts_and_completes() {
        let trace = trace_merge_sort(&elements(&[9]));
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].description, STARTING);
        assert_eq!(trace[0].array[0].state(), ElementState::Default);
        assert_eq!(trace[1].values(), vec![9]);
        assert!(trace[1].is_fully_sorted());
    }

    #[test]
    fn two_elements_already_sorted() {
        let trace = trace_merge_sort(&elements(&[1, 2]));
        let descriptions: Vec<&str> = trace.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                STARTING,
                "Dividing subarray from index 0 to 1",
                "Merging subarrays from index 0 to 0 and 1 to 1",
                "Placing element 1 in position 0",
                "Placing remaining element 2 in position 1",
                COMPLETED,
            ]
        );
        assert!(trace.iter().all(|s| s.pivot.is_none()));
    }
}
