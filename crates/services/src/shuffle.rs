//! Unbiased shuffling for question order.

use rand::Rng;

/// Returns a fresh, uniformly shuffled copy of `items` using the thread rng.
///
/// The source slice is never mutated, so a shared question bank stays in its
/// canonical order.
#[must_use]
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut rng = rand::rng();
    shuffled_with(items, &mut rng)
}

/// Fisher–Yates late-exchange shuffle with a caller-supplied rng.
///
/// Walks from the last index down to 1, swapping each position with a
/// uniformly drawn index at or below it. A sort-by-random-key shuffle is not
/// uniformly distributed; this one is.
#[must_use]
pub fn shuffled_with<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}
