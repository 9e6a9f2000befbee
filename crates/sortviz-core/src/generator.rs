#![forbid(unsafe_code)]

//! Input array generation.
//!
//! [`generate`] draws distinct values so that no two bars share a height;
//! [`Preset`] builds the structured inputs offered next to it (already
//! sorted, reversed, nearly sorted, or plain random with repeats).
//!
//! All generators take the random source as a parameter. Use
//! [`generate_seeded`] when output must be reproducible.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::element::{Element, ElementId};
use crate::error::InputError;
use crate::input::elements_from_values;

pub const DEFAULT_ARRAY_SIZE: usize = 15;
pub const MIN_ARRAY_SIZE: usize = 5;
pub const MAX_ARRAY_SIZE: usize = 50;
pub const DEFAULT_MIN_VALUE: i64 = 5;
pub const DEFAULT_MAX_VALUE: i64 = 100;

/// Number of distinct integers in `[min_value, max_value]`, saturating at
/// `usize::MAX` and zero for an inverted range.
#[must_use]
pub fn range_len(min_value: i64, max_value: i64) -> usize {
    if max_value < min_value {
        return 0;
    }
    let span = max_value.abs_diff(min_value);
    usize::try_from(span)
        .ok()
        .and_then(|s| s.checked_add(1))
        .unwrap_or(usize::MAX)
}

/// Draw `size` mutually distinct values from `[min_value, max_value]`.
///
/// Values come back in random order with ids `element-0`, `element-1`, ...
/// by position. If the range holds fewer than `size` integers the result is
/// truncated to the range size.
pub fn generate<R: Rng + ?Sized>(
    size: usize,
    min_value: i64,
    max_value: i64,
    rng: &mut R,
) -> Vec<Element> {
    let available = range_len(min_value, max_value);
    let amount = size.min(available);
    if amount < size {
        warn!(
            size,
            min_value, max_value, available, "range cannot supply enough distinct values"
        );
    }

    rand::seq::index::sample(rng, available, amount)
        .into_iter()
        .enumerate()
        .map(|(i, offset)| {
            let value = min_value.saturating_add_unsigned(offset as u64);
            Element::new(value, ElementId::from_index(i))
        })
        .collect()
}

/// [`generate`] over the thread-local RNG.
#[must_use]
pub fn generate_array(size: usize, min_value: i64, max_value: i64) -> Vec<Element> {
    generate(size, min_value, max_value, &mut rand::rng())
}

/// [`generate`] over a [`StdRng`] seeded with `seed`.
#[must_use]
pub fn generate_seeded(size: usize, min_value: i64, max_value: i64, seed: u64) -> Vec<Element> {
    generate(size, min_value, max_value, &mut StdRng::seed_from_u64(seed))
}

/// Structured input layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Distinct random values (the default generator).
    #[default]
    Distinct,
    /// Uniform random values; repeats allowed.
    Random,
    /// `min, min+1, ...`
    Ascending,
    /// `max, max-1, ...`
    Descending,
    /// Ascending with `size / 10` random pair swaps.
    NearlySorted,
}

impl Preset {
    pub const ALL: [Self; 5] = [
        Self::Distinct,
        Self::Random,
        Self::Ascending,
        Self::Descending,
        Self::NearlySorted,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Distinct => "distinct",
            Self::Random => "random",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::NearlySorted => "nearly-sorted",
        }
    }

    /// Raw values for this layout.
    pub fn values<R: Rng + ?Sized>(
        self,
        size: usize,
        min_value: i64,
        max_value: i64,
        rng: &mut R,
    ) -> Vec<i64> {
        match self {
            Self::Distinct => generate(size, min_value, max_value, rng)
                .iter()
                .map(Element::value)
                .collect(),
            Self::Random => {
                if max_value < min_value {
                    return Vec::new();
                }
                (0..size)
                    .map(|_| rng.random_range(min_value..=max_value))
                    .collect()
            }
            Self::Ascending => ascending(size, min_value),
            Self::Descending => (0..size)
                .map(|i| max_value.saturating_sub_unsigned(i as u64))
                .collect(),
            Self::NearlySorted => {
                let mut values = ascending(size, min_value);
                if size > 1 {
                    for _ in 0..size / 10 {
                        let a = rng.random_range(0..size);
                        let b = rng.random_range(0..size);
                        values.swap(a, b);
                    }
                }
                values
            }
        }
    }

    /// Elements for this layout with generation-order ids.
    pub fn generate<R: Rng + ?Sized>(
        self,
        size: usize,
        min_value: i64,
        max_value: i64,
        rng: &mut R,
    ) -> Vec<Element> {
        elements_from_values(&self.values(size, min_value, max_value, rng))
    }
}

fn ascending(size: usize, min_value: i64) -> Vec<i64> {
    (0..size)
        .map(|i| min_value.saturating_add_unsigned(i as u64))
        .collect()
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Preset {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| key.eq_ignore_ascii_case(p.key()))
            .ok_or_else(|| InputError::UnknownPreset(key.to_owned()))
    }
}
