//! Uniform random reordering of question sets.

use rand::Rng;
use rand::seq::SliceRandom;

/// Returns a uniformly shuffled copy of `items`, leaving the input untouched.
///
/// Uses a Fisher–Yates pass (last index down to 1, each swapped with a
/// uniformly chosen position at or below it), so every permutation is equally
/// likely for a fair `rng`.
#[must_use]
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.as_mut_slice().shuffle(rng);
    out
}
