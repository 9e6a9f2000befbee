#![forbid(unsafe_code)]

//! Step traces: a sorting run materialized as an ordered list of snapshots.
//!
//! Each tracer copies its input into a private working array, runs the
//! algorithm to completion, and records a [`Step`] for every comparison,
//! swap, placement and range highlight.
//!
//! # Invariants
//!
//! 1. `trace[0]` is the untouched input with every state reset to default.
//! 2. For a non-empty input the last step holds the sorted array with every
//!    element marked sorted.
//! 3. Every step is a permutation of the input: ids are never created,
//!    duplicated, or dropped.
//! 4. The `(id, value)` layout changes between consecutive steps only at
//!    indices named by one of the two steps.
//! 5. Tracing is deterministic. The same input always yields the same trace.
//!
//! # Failure Modes
//!
//! None. Tracers are total over every array length, including 0 and 1.

mod bubble;
mod merge;

use std::collections::BTreeSet;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementState};
use crate::step::Step;

pub use bubble::trace_bubble_sort;
pub use merge::trace_merge_sort;

/// Immutable, fully materialized sequence of steps for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    /// Indices named by step `index`, or an empty set when out of range.
    #[must_use]
    pub fn touched_indices(&self, index: usize) -> BTreeSet<usize> {
        self.get(index).map(Step::touched_indices).unwrap_or_default()
    }
}

impl Index<usize> for Trace {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Working array plus the steps recorded so far.
///
/// Highlights are applied to a copy at snapshot time; only explicit
/// `set_state`/`swap`/`place` calls touch the working array.
#[derive(Debug)]
struct Recorder {
    working: Vec<Element>,
    steps: Vec<Step>,
}

impl Recorder {
    fn new(input: &[Element]) -> Self {
        let working = input
            .iter()
            .cloned()
            .map(|el| el.with_state(ElementState::Default))
            .collect();
        Self {
            working,
            steps: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.working.len()
    }

    fn value(&self, index: usize) -> i64 {
        self.working[index].value()
    }

    fn set_state(&mut self, index: usize, state: ElementState) {
        self.working[index].set_state(state);
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.working.swap(a, b);
    }

    /// Copy of the working array with `indices` overlaid by `state`.
    fn highlighted(&self, indices: &[usize], state: ElementState) -> Vec<Element> {
        let mut array = self.working.clone();
        for &idx in indices {
            array[idx].set_state(state);
        }
        array
    }

    /// Snapshot of the working array as it stands.
    fn snapshot(&self, description: impl Into<String>) -> Step {
        Step::new(self.working.clone(), description)
    }

    fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    fn finish(self) -> Trace {
        Trace { steps: self.steps }
    }
}
