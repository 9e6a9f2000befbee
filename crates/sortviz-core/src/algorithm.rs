#![forbid(unsafe_code)]

//! Algorithm selector and display catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::InputError;
use crate::trace::{Trace, trace_bubble_sort, trace_merge_sort};

/// Sorting algorithms the engine can trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Merge,
}

/// Static description shown next to the visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub description: &'static str,
}

const BUBBLE_INFO: AlgorithmInfo = AlgorithmInfo {
    name: "Bubble Sort",
    time_complexity: "O(n²)",
    space_complexity: "O(1)",
    description: "Bubble sort repeatedly steps through the list, compares adjacent elements and swaps them if they are in the wrong order.",
};

const MERGE_INFO: AlgorithmInfo = AlgorithmInfo {
    name: "Merge Sort",
    time_complexity: "O(n log n)",
    space_complexity: "O(n)",
    description: "Merge sort divides the array into halves, sorts them separately, and then merges the sorted halves back together.",
};

impl Algorithm {
    pub const ALL: [Self; 2] = [Self::Bubble, Self::Merge];

    /// Short machine name, as accepted by [`FromStr`].
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Merge => "merge",
        }
    }

    #[must_use]
    pub fn info(self) -> &'static AlgorithmInfo {
        match self {
            Self::Bubble => &BUBBLE_INFO,
            Self::Merge => &MERGE_INFO,
        }
    }

    /// Trace this algorithm over `input`.
    #[must_use]
    pub fn trace(self, input: &[Element]) -> Trace {
        match self {
            Self::Bubble => trace_bubble_sort(input),
            Self::Merge => trace_merge_sort(input),
        }
    }

    /// The other algorithm; used by front ends that cycle the selection.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Bubble => Self::Merge,
            Self::Merge => Self::Bubble,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

impl FromStr for Algorithm {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|alg| {
                key.eq_ignore_ascii_case(alg.key()) || key.eq_ignore_ascii_case(alg.info().name)
            })
            .ok_or_else(|| InputError::UnknownAlgorithm(key.to_owned()))
    }
}
