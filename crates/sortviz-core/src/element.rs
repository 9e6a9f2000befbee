#![forbid(unsafe_code)]

//! Array elements and their per-step highlight state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier assigned when an element is created.
///
/// Ids survive reordering so a renderer can follow one element as it moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Id for the element created at generation position `index`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(format!("element-{index}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Visualization tag attached to an element for a single step.
///
/// Only [`ElementState::Sorted`] is permanent; every other state is cleared
/// once the operation that set it concludes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementState {
    #[default]
    Default,
    Comparing,
    Swapping,
    Sorted,
    Pivot,
}

impl ElementState {
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Comparing,
        Self::Swapping,
        Self::Sorted,
        Self::Pivot,
    ];

    /// Human-readable label used by legends.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Comparing => "Comparing",
            Self::Swapping => "Swapping",
            Self::Sorted => "Sorted",
            Self::Pivot => "Pivot/Merge",
        }
    }

    /// True for states that mark an in-flight operation.
    #[must_use]
    pub fn is_transient(self) -> bool {
        !matches!(self, Self::Default | Self::Sorted)
    }
}

/// One bar of the visualized array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    value: i64,
    id: ElementId,
    state: ElementState,
}

impl Element {
    /// Create an element in the [`ElementState::Default`] state.
    #[must_use]
    pub fn new(value: i64, id: ElementId) -> Self {
        Self {
            value,
            id,
            state: ElementState::Default,
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: ElementState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    #[must_use]
    pub fn state(&self) -> ElementState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: ElementState) {
        self.state = state;
    }
}
