//! Cumulative-weight sampling over a small candidate table.
//!
//! Weights must be positive integers. The fixed anchor tables satisfy this by
//! construction; [`validate_weights`] checks it for anything else.

use rand::Rng;

use crate::error::{DiceError, DiceResult};

/// A candidate value paired with its sampling weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedOption<T> {
    /// The value returned when this option is drawn.
    pub value: T,
    /// Relative weight (must be positive).
    pub weight: u32,
}

impl<T> WeightedOption<T> {
    /// Pair a value with a weight.
    pub const fn new(value: T, weight: u32) -> Self {
        Self { value, weight }
    }
}

/// Check that a table is non-empty and every weight is positive.
pub fn validate_weights<T>(options: &[WeightedOption<T>]) -> DiceResult<()> {
    if options.is_empty() {
        return Err(DiceError::InvalidWeights("table is empty".into()));
    }
    if let Some(pos) = options.iter().position(|o| o.weight == 0) {
        return Err(DiceError::InvalidWeights(format!(
            "weight at position {pos} is zero"
        )));
    }
    Ok(())
}

/// Draw one value from `options` with probability proportional to its weight.
///
/// Draws `r` uniformly from `[0, W)` where `W` is the weight sum, then walks
/// the table subtracting each weight until `r` drops to zero or below. Ties
/// resolve structurally to the first option whose cumulative weight reaches
/// `r`. If the walk ends without a hit the last option is returned.
///
/// Returns `None` only for an empty table.
pub fn weighted_pick<'a, T, R: Rng + ?Sized>(
    options: &'a [WeightedOption<T>],
    rng: &mut R,
) -> Option<&'a T> {
    let last = options.last()?;
    let sum: u64 = options.iter().map(|o| u64::from(o.weight)).sum();
    let mut r = rng.random::<f64>() * sum as f64;
    for option in options {
        r -= f64::from(option.weight);
        if r <= 0.0 {
            return Some(&option.value);
        }
    }
    Some(&last.value)
}
