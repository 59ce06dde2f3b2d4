//! Fisher–Yates shuffling that never mutates its input.

use rand::Rng;
use rand::seq::SliceRandom;

/// Reshuffles tried before falling back to a rotation in [`shuffle_avoiding_with`].
const AVOID_ATTEMPTS: usize = 8;

/// Returns a uniformly random permutation of `items` using the thread RNG.
#[must_use]
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::rng())
}

/// Returns a uniformly random permutation of `items` drawn from `rng`.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Like [`shuffle_with`], but never returns `items` in their original order
/// when any other order exists.
///
/// If every element is equal no other order exists and the copy is returned
/// as is.
pub fn shuffle_avoiding_with<T: Clone + PartialEq, R: Rng + ?Sized>(
    items: &[T],
    rng: &mut R,
) -> Vec<T> {
    shuffle_avoiding_by_key(items, rng, Clone::clone)
}

/// Like [`shuffle_avoiding_with`], with orders compared through `key`.
///
/// Used when distinct elements display identically, e.g. two copies of the
/// same word: such a permutation still counts as the original order.
pub fn shuffle_avoiding_by_key<T, K, R, F>(items: &[T], rng: &mut R, key: F) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    R: Rng + ?Sized,
    F: Fn(&T) -> K,
{
    let same = |order: &[T]| order.iter().map(&key).eq(items.iter().map(&key));

    let mut out = shuffle_with(items, rng);
    for _ in 0..AVOID_ATTEMPTS {
        if !same(&out) {
            return out;
        }
        out.shuffle(rng);
    }
    if same(&out) && !out.is_empty() {
        // A rotation by one only keeps the keys when all keys match.
        out.rotate_left(1);
    }
    out
}
