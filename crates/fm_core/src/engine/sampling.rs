//! Weighted random selection over explicit `(item, weight)` pairs.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Picks one item with probability proportional to its weight.
///
/// Returns `None` for an empty pool or when no weight is positive.
pub fn weighted_choice<'a, T, R>(rng: &mut R, pool: &'a [(T, f64)]) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    let index = WeightedIndex::new(pool.iter().map(|(_, w)| *w)).ok()?;
    pool.get(index.sample(rng)).map(|(item, _)| item)
}

/// Same as [`weighted_choice`] but never returns an item equal to `excluded`.
pub fn weighted_choice_excluding<'a, T, R>(
    rng: &mut R,
    pool: &'a [(T, f64)],
    excluded: &T,
) -> Option<&'a T>
where
    T: PartialEq,
    R: Rng + ?Sized,
{
    let remaining: Vec<(&'a T, f64)> =
        pool.iter().filter(|(item, _)| item != excluded).map(|(item, w)| (item, *w)).collect();
    weighted_choice(rng, &remaining).copied()
}
