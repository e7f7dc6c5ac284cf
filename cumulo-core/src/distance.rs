//! Pairwise distance enumeration and ordering.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::point::Point;

/// The distance between two points, identified by their indices.
///
/// `left < right` in every pair produced by [`pairwise_distances`]. The
/// derived ordering compares distance first and falls back to the endpoint
/// indices, giving a total order even when distances tie.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairDistance {
    distance: f64,
    left: usize,
    right: usize,
}

impl PairDistance {
    /// Creates a pair from a distance and two point indices.
    #[must_use]
    pub const fn new(distance: f64, left: usize, right: usize) -> Self {
        Self {
            distance,
            left,
            right,
        }
    }

    /// Returns the Euclidean distance between the endpoints.
    #[must_use]
    #[rustfmt::skip]
    pub const fn distance(&self) -> f64 { self.distance }

    /// Returns the lower endpoint index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn left(&self) -> usize { self.left }

    /// Returns the higher endpoint index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn right(&self) -> usize { self.right }
}

impl Eq for PairDistance {}

impl Ord for PairDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.left.cmp(&other.left))
            .then_with(|| self.right.cmp(&other.right))
    }
}

impl PartialOrd for PairDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes the distance between every unordered pair of distinct points.
///
/// Pairs are generated with `left` ascending and `right` ascending within
/// each `left`, so the output order is deterministic. Quadratic in time and
/// space; acceptable for the bounded input sizes this crate targets.
///
/// # Examples
/// ```
/// use cumulo_core::{Point, pairwise_distances};
///
/// let points = vec![Point::new(0, 0, 0), Point::new(3, 4, 0), Point::new(0, 0, 1)];
/// let pairs = pairwise_distances(&points);
/// assert_eq!(pairs.len(), 3);
/// assert_eq!(pairs[0].distance(), 5.0);
/// assert_eq!((pairs[0].left(), pairs[0].right()), (0, 1));
/// ```
#[must_use]
pub fn pairwise_distances(points: &[Point]) -> Vec<PairDistance> {
    let n = points.len();
    let mut pairs = Vec::with_capacity(n.saturating_mul(n.saturating_sub(1)) / 2);

    for (left, a) in points.iter().enumerate() {
        for (offset, b) in points[left + 1..].iter().enumerate() {
            let right = left + 1 + offset;
            pairs.push(PairDistance::new(a.distance_to(b), left, right));
        }
    }

    pairs
}

/// Sorts pairs ascending by distance.
///
/// The comparison key is `(distance, left, right)`. Because
/// [`pairwise_distances`] generates pairs in `(left, right)`-lexicographic
/// order, sorting on this key is observably identical to a stable sort by
/// distance alone: equal distances keep their generation order. An unstable
/// parallel sort is therefore safe here.
pub fn sort_by_distance(pairs: &mut [PairDistance]) {
    pairs.par_sort_unstable();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_every_unordered_pair_once() {
        let points: Vec<Point> = (0..7).map(|i| Point::new(i, 0, 0)).collect();
        let pairs = pairwise_distances(&points);
        assert_eq!(pairs.len(), 21);
        assert!(pairs.iter().all(|pair| pair.left() < pair.right()));

        let mut seen: Vec<(usize, usize)> =
            pairs.iter().map(|pair| (pair.left(), pair.right())).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 21);
    }

    #[test]
    fn generation_order_is_lexicographic() {
        let points: Vec<Point> = (0..4).map(|i| Point::new(i, i, 0)).collect();
        let pairs = pairwise_distances(&points);
        let order: Vec<(usize, usize)> =
            pairs.iter().map(|pair| (pair.left(), pair.right())).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn empty_and_singleton_inputs_yield_no_pairs() {
        assert!(pairwise_distances(&[]).is_empty());
        assert!(pairwise_distances(&[Point::new(1, 2, 3)]).is_empty());
    }

    #[test]
    fn sort_orders_by_distance_then_generation_order() {
        // Four collinear points: six pairs, with distance ties between the
        // unit-spaced neighbours and again between the two-step pairs.
        let points: Vec<Point> = (0..4).map(|i| Point::new(i, 0, 0)).collect();
        let mut pairs = pairwise_distances(&points);
        sort_by_distance(&mut pairs);

        let order: Vec<(usize, usize)> =
            pairs.iter().map(|pair| (pair.left(), pair.right())).collect();
        assert_eq!(order, vec![(0, 1), (1, 2), (2, 3), (0, 2), (1, 3), (0, 3)]);
        assert!(pairs.windows(2).all(|w| w[0].distance() <= w[1].distance()));
    }
}
