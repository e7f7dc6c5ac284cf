//! Clustering traversals over a sorted pairwise-distance list.
//!
//! Two consumers share the same sorted input: a bounded prefix walk that
//! connects a fixed number of shortest pairs and reports component sizes, and
//! a full scan that connects pairs until a single component remains. Each
//! traversal owns a fresh [`DisjointSet`]; the two modes never share state
//! because they finish in different partitions.

mod union_find;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{distance::PairDistance, point::Point};

pub use self::union_find::DisjointSet;

/// Errors returned by the clustering traversals and their supporting types.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClusterError {
    /// An element index was outside the partition.
    #[error("index {index} is out of bounds for {len} elements")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of elements in the partition.
        len: usize,
    },
    /// The connection budget exceeded the number of available pairs.
    #[error("connection budget {budget} exceeds the {pair_count} available pairs")]
    BudgetExceedsPairs {
        /// Requested number of connections.
        budget: usize,
        /// Number of pairs actually available.
        pair_count: usize,
    },
    /// A size ranking was requested over fewer components than it needs.
    #[error("ranking requires {required} components but only {remaining} remain")]
    TooFewComponents {
        /// Number of components the ranking needs.
        required: usize,
        /// Number of components left after the traversal.
        remaining: usize,
    },
    /// The full scan exhausted every pair without reaching one component.
    ///
    /// A complete pairwise-distance list always connects the point set, so
    /// this indicates corrupt input or an upstream logic error, never a
    /// condition to retry.
    #[error("scan exhausted all pairs with {components} components remaining")]
    UnificationIncomplete {
        /// Components remaining when the pair list ran out.
        components: usize,
    },
    /// A checked product overflowed its integer type.
    #[error("product does not fit in the result type")]
    ProductOverflow,
}

/// Machine-readable error codes for [`ClusterError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ClusterErrorCode {
    /// An element index was outside the partition.
    IndexOutOfRange,
    /// The connection budget exceeded the number of available pairs.
    BudgetExceedsPairs,
    /// A size ranking was requested over fewer components than it needs.
    TooFewComponents,
    /// The full scan exhausted every pair without reaching one component.
    UnificationIncomplete,
    /// A checked product overflowed its integer type.
    ProductOverflow,
}

impl ClusterError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> ClusterErrorCode {
        match self {
            Self::IndexOutOfRange { .. } => ClusterErrorCode::IndexOutOfRange,
            Self::BudgetExceedsPairs { .. } => ClusterErrorCode::BudgetExceedsPairs,
            Self::TooFewComponents { .. } => ClusterErrorCode::TooFewComponents,
            Self::UnificationIncomplete { .. } => ClusterErrorCode::UnificationIncomplete,
            Self::ProductOverflow => ClusterErrorCode::ProductOverflow,
        }
    }
}

impl ClusterErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IndexOutOfRange => "INDEX_OUT_OF_RANGE",
            Self::BudgetExceedsPairs => "BUDGET_EXCEEDS_PAIRS",
            Self::TooFewComponents => "TOO_FEW_COMPONENTS",
            Self::UnificationIncomplete => "UNIFICATION_INCOMPLETE",
            Self::ProductOverflow => "PRODUCT_OVERFLOW",
        }
    }
}

/// Component sizes left after a bounded prefix of connections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixClustering {
    sizes: Vec<usize>,
}

impl PrefixClustering {
    /// Returns the component sizes, sorted descending.
    #[must_use]
    #[rustfmt::skip]
    pub fn sizes(&self) -> &[usize] { &self.sizes }

    /// Returns the number of components left after the traversal.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    /// Returns the product of the `count` largest component sizes.
    ///
    /// # Errors
    /// Returns [`ClusterError::TooFewComponents`] when fewer than `count`
    /// components remain, and [`ClusterError::ProductOverflow`] when the
    /// product exceeds `u64`.
    ///
    /// # Examples
    /// ```
    /// use cumulo_core::{Point, pairwise_distances, prefix_cluster, sort_by_distance};
    ///
    /// let points: Vec<Point> = (0..5).map(|i| Point::new(i * i, 0, 0)).collect();
    /// let mut pairs = pairwise_distances(&points);
    /// sort_by_distance(&mut pairs);
    /// let clustering = prefix_cluster(points.len(), &pairs, 2)?;
    /// assert_eq!(clustering.largest_product(3)?, 3 * 1 * 1);
    /// # Ok::<(), cumulo_core::ClusterError>(())
    /// ```
    pub fn largest_product(&self, count: usize) -> Result<u64, ClusterError> {
        if self.sizes.len() < count {
            return Err(ClusterError::TooFewComponents {
                required: count,
                remaining: self.sizes.len(),
            });
        }

        self.sizes[..count].iter().try_fold(1u64, |product, &size| {
            product
                .checked_mul(size as u64)
                .ok_or(ClusterError::ProductOverflow)
        })
    }
}

/// The connection whose union merged the final two components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unification {
    left: usize,
    right: usize,
    distance: f64,
    connection: usize,
}

impl Unification {
    /// Returns the lower endpoint index of the unifying pair.
    #[must_use]
    #[rustfmt::skip]
    pub const fn left(&self) -> usize { self.left }

    /// Returns the higher endpoint index of the unifying pair.
    #[must_use]
    #[rustfmt::skip]
    pub const fn right(&self) -> usize { self.right }

    /// Returns the distance between the unifying pair's endpoints.
    #[must_use]
    #[rustfmt::skip]
    pub const fn distance(&self) -> f64 { self.distance }

    /// Returns the zero-based position of the pair in the sorted scan.
    #[must_use]
    #[rustfmt::skip]
    pub const fn connection(&self) -> usize { self.connection }

    /// Returns the product of the endpoints' x-coordinates.
    ///
    /// # Errors
    /// Returns [`ClusterError::IndexOutOfRange`] when either endpoint does
    /// not index into `points`, and [`ClusterError::ProductOverflow`] when
    /// the product exceeds `i64`.
    pub fn x_product(&self, points: &[Point]) -> Result<i64, ClusterError> {
        let coordinate = |index: usize| {
            points
                .get(index)
                .map(Point::x)
                .ok_or(ClusterError::IndexOutOfRange {
                    index,
                    len: points.len(),
                })
        };

        coordinate(self.left)?
            .checked_mul(coordinate(self.right)?)
            .ok_or(ClusterError::ProductOverflow)
    }
}

/// Connects the first `connection_budget` pairs and reports component sizes.
///
/// `pairs` must be sorted ascending by distance (see
/// [`crate::sort_by_distance`]). Pairs whose endpoints are already connected
/// still consume budget: the traversal counts connections made, not merges
/// achieved.
///
/// # Errors
/// Returns [`ClusterError::BudgetExceedsPairs`] when the budget is larger
/// than the pair list, and [`ClusterError::IndexOutOfRange`] when a pair
/// references an index `>= point_count`.
#[instrument(
    name = "cluster.prefix",
    err,
    skip(pairs),
    fields(pair_count = pairs.len()),
)]
pub fn prefix_cluster(
    point_count: usize,
    pairs: &[PairDistance],
    connection_budget: usize,
) -> Result<PrefixClustering, ClusterError> {
    let prefix = pairs
        .get(..connection_budget)
        .ok_or(ClusterError::BudgetExceedsPairs {
            budget: connection_budget,
            pair_count: pairs.len(),
        })?;

    if let (Some(first), Some(last)) = (prefix.first(), prefix.last()) {
        debug!(
            shortest = first.distance(),
            boundary = last.distance(),
            "connecting shortest pairs"
        );
    }

    let mut set = DisjointSet::new(point_count);
    for pair in prefix {
        set.union(pair.left(), pair.right())?;
    }

    let mut sizes = set.component_sizes();
    sizes.sort_unstable_by(|a, b| b.cmp(a));

    debug!(
        components = sizes.len(),
        largest = ?&sizes[..sizes.len().min(3)],
        "prefix clustering complete"
    );

    Ok(PrefixClustering { sizes })
}

/// Connects pairs in ascending order until one component remains.
///
/// `pairs` must be sorted ascending by distance and cover the whole point
/// set. The scan stops at the first union that both merges two components
/// and leaves exactly one; that pair is returned. A set that starts with at
/// most one component is vacuously unified and yields `None` without
/// touching the pair list.
///
/// # Errors
/// Returns [`ClusterError::UnificationIncomplete`] when every pair is
/// consumed while more than one component remains, and
/// [`ClusterError::IndexOutOfRange`] when a pair references an index
/// `>= point_count`.
#[instrument(
    name = "cluster.unify",
    err,
    skip(pairs),
    fields(pair_count = pairs.len()),
)]
pub fn scan_until_unified(
    point_count: usize,
    pairs: &[PairDistance],
) -> Result<Option<Unification>, ClusterError> {
    let mut set = DisjointSet::new(point_count);
    if set.components() <= 1 {
        return Ok(None);
    }

    for (connection, pair) in pairs.iter().enumerate() {
        let merged = set.union(pair.left(), pair.right())?;
        if merged && set.components() == 1 {
            debug!(
                connection,
                distance = pair.distance(),
                left = pair.left(),
                right = pair.right(),
                "single component reached"
            );
            return Ok(Some(Unification {
                left: pair.left(),
                right: pair.right(),
                distance: pair.distance(),
                connection,
            }));
        }
    }

    Err(ClusterError::UnificationIncomplete {
        components: set.components(),
    })
}
