#![forbid(unsafe_code)]

//! Core: array generation and step traces for the SortViz visualizer.
//!
//! # Role in SortViz
//! `sortviz-core` is the algorithmic layer. It produces input arrays and runs
//! each supported sorting algorithm to completion, recording every
//! intermediate array configuration as a [`Step`]. The resulting [`Trace`] is
//! immutable and carries no notion of playback position.
//!
//! # Primary responsibilities
//! - **Generator**: distinct random values, presets, seeded reproducibility.
//! - **Input**: parsing of user-authored arrays.
//! - **Tracers**: bubble sort and merge sort step recorders.
//! - **Catalog**: per-algorithm display metadata.
//!
//! # How it fits in the system
//! The runtime (`sortviz-runtime`) owns a trace and a current index and drives
//! playback. The CLI renders `trace[index].array`. Nothing flows back into the
//! core; every function here is pure apart from consuming a random source.

pub mod algorithm;
pub mod element;
pub mod error;
pub mod generator;
pub mod input;
pub mod step;
pub mod trace;

pub use algorithm::{Algorithm, AlgorithmInfo};
pub use element::{Element, ElementId, ElementState};
pub use error::InputError;
pub use generator::{Preset, generate, generate_array, generate_seeded};
pub use input::{MAX_CUSTOM_ELEMENTS, elements_from_values, parse_values};
pub use step::Step;
pub use trace::{Trace, trace_bubble_sort, trace_merge_sort};
