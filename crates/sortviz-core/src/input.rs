#![forbid(unsafe_code)]

//! User-authored arrays.

use crate::element::{Element, ElementId};
use crate::error::InputError;

/// Largest array a user may enter by hand.
pub const MAX_CUSTOM_ELEMENTS: usize = 50;

/// Parse a comma- or whitespace-separated list of integers.
///
/// Tokens that are not integers are dropped. The result must hold between
/// one and [`MAX_CUSTOM_ELEMENTS`] values.
pub fn parse_values(text: &str) -> Result<Vec<i64>, InputError> {
    let values: Vec<i64> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<i64>().ok())
        .collect();

    if values.is_empty() {
        return Err(InputError::Empty);
    }
    if values.len() > MAX_CUSTOM_ELEMENTS {
        return Err(InputError::TooMany {
            count: values.len(),
            max: MAX_CUSTOM_ELEMENTS,
        });
    }
    Ok(values)
}

/// Wrap raw values as default-state elements with positional ids.
#[must_use]
pub fn elements_from_values(values: &[i64]) -> Vec<Element> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Element::new(value, ElementId::from_index(i)))
        .collect()
}
