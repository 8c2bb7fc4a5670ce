//! Map-model contract consumed by the path search
//!
//! The search never looks at coordinates, road types or file formats. It only
//! needs identifier resolution, an ordered neighbor list and a turn-legality
//! predicate.

use std::fmt::Debug;
use std::hash::Hash;

use crate::core::error::Result;

/// A road graph that can be searched with turn restrictions
///
/// Implementations must answer every query without mutating themselves, so a
/// shared reference can be searched from several threads at once.
pub trait RoadNetwork {
    /// Compact handle of an intersection
    type Node: Copy + Eq + Hash + Debug;

    /// Resolve an external intersection identifier
    ///
    /// Unknown identifiers are an error. A known intersection without any
    /// roads still resolves, it simply has no neighbors.
    fn resolve(&self, id: &str) -> Result<Self::Node>;

    /// Neighbors of `node` in configuration order
    ///
    /// The order decides which of several equally short paths is returned, so
    /// it must be identical across repeated calls.
    fn neighbors(&self, node: Self::Node) -> &[Self::Node];

    /// Whether the continuation `from -> through -> to` is legal
    fn is_turn_allowed(&self, from: Self::Node, through: Self::Node, to: Self::Node) -> bool;
}
