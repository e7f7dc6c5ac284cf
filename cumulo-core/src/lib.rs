//! Cumulo core library.
//!
//! Clusters a set of 3-D integer coordinates by ascending pairwise Euclidean
//! distance. The pipeline is: parse points, compute all pairwise distances
//! once, sort them ascending, then consume the sorted list with one of two
//! disjoint-set traversals — a bounded prefix walk that reports component
//! sizes, or a full scan that stops at the union completing a single
//! component.

mod cluster;
mod distance;
mod point;

pub use crate::{
    cluster::{
        ClusterError, ClusterErrorCode, DisjointSet, PrefixClustering, Unification,
        prefix_cluster, scan_until_unified,
    },
    distance::{PairDistance, pairwise_distances, sort_by_distance},
    point::{Point, PointParseError},
};
