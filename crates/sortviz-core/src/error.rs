use thiserror::Error;

/// Errors raised while turning user input into core values.
///
/// Tracing itself never fails; these only come from the edges where text is
/// parsed into arrays, algorithms, or presets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter valid comma-separated numbers.")]
    Empty,

    #[error("Maximum {max} elements allowed (got {count}).")]
    TooMany { count: usize, max: usize },

    #[error("unknown algorithm `{0}` (expected `bubble` or `merge`)")]
    UnknownAlgorithm(String),

    #[error("unknown preset `{0}` (expected `distinct`, `random`, `ascending`, `descending`, or `nearly-sorted`)")]
    UnknownPreset(String),
}
