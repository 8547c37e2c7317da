//! Six-sided dice faces, totals and face decomposition.

pub mod roll;

pub use roll::RollResult;

use rand::Rng;

/// A single six-sided die face (1 to 6).
pub type DieFace = u32;

/// The sum of two die faces (2 to 12).
pub type Total = u32;

/// Lowest face on a die.
pub const MIN_FACE: DieFace = 1;

/// Highest face on a die.
pub const MAX_FACE: DieFace = 6;

/// Pair returned when a total has no valid decomposition.
pub const FALLBACK_PAIR: (DieFace, DieFace) = (1, 1);

/// All ordered face pairs that sum to `total`, in `(d1, d2)` order.
pub fn pairs_for_total(total: Total) -> Vec<(DieFace, DieFace)> {
    (MIN_FACE..=MAX_FACE)
        .flat_map(|d1| (MIN_FACE..=MAX_FACE).map(move |d2| (d1, d2)))
        .filter(|(d1, d2)| d1 + d2 == total)
        .collect()
}

/// Pick a pair of faces summing to `total`, uniformly over ordered pairs.
///
/// Totals outside 2..=12 have no decomposition and yield [`FALLBACK_PAIR`].
pub fn decompose_total<R: Rng + ?Sized>(total: Total, rng: &mut R) -> (DieFace, DieFace) {
    let pairs = pairs_for_total(total);
    if pairs.is_empty() {
        tracing::warn!(total, "total has no two-dice decomposition, using (1, 1)");
        return FALLBACK_PAIR;
    }
    pairs[rng.random_range(0..pairs.len())]
}

/// Two independent fair faces, used for animation frames.
pub fn fair_pair<R: Rng + ?Sized>(rng: &mut R) -> (DieFace, DieFace) {
    (
        rng.random_range(MIN_FACE..=MAX_FACE),
        rng.random_range(MIN_FACE..=MAX_FACE),
    )
}
