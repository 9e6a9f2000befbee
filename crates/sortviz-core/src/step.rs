#![forbid(unsafe_code)]

//! A single frozen frame of a sorting run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementState};

/// Full snapshot of the array plus the indices that took part in the
/// operation that produced it.
///
/// `array` is never a diff: every step holds all `n` elements exactly as they
/// stood at that instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub array: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparing: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swapping: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<usize>,
    pub description: String,
}

impl Step {
    /// Step with no participating indices.
    #[must_use]
    pub fn new(array: Vec<Element>, description: impl Into<String>) -> Self {
        Self {
            array,
            comparing: None,
            swapping: None,
            pivot: None,
            description: description.into(),
        }
    }

    #[must_use]
    pub fn with_comparing(mut self, indices: Vec<usize>) -> Self {
        self.comparing = Some(indices);
        self
    }

    #[must_use]
    pub fn with_swapping(mut self, indices: Vec<usize>) -> Self {
        self.swapping = Some(indices);
        self
    }

    #[must_use]
    pub fn with_pivot(mut self, index: usize) -> Self {
        self.pivot = Some(index);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Values in array order.
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.array.iter().map(Element::value).collect()
    }

    /// States in array order.
    #[must_use]
    pub fn states(&self) -> Vec<ElementState> {
        self.array.iter().map(Element::state).collect()
    }

    /// Union of the `comparing`, `swapping` and `pivot` indices.
    #[must_use]
    pub fn touched_indices(&self) -> BTreeSet<usize> {
        let mut out = BTreeSet::new();
        out.extend(self.comparing.iter().flatten().copied());
        out.extend(self.swapping.iter().flatten().copied());
        out.extend(self.pivot);
        out
    }

    /// True when every element carries [`ElementState::Sorted`].
    #[must_use]
    pub fn is_fully_sorted(&self) -> bool {
        self.array.iter().all(|el| el.state() == ElementState::Sorted)
    }

    /// Largest value in the snapshot, used to scale bar heights.
    #[must_use]
    pub fn max_value(&self) -> Option<i64> {
        self.array.iter().map(Element::value).max()
    }
}
