//! Turn-aware shortest path search
//!
//! Breadth-first search over `(intersection, predecessor)` states rather than
//! bare intersections: whether a road may be taken out of an intersection
//! depends on the road used to arrive, so the same intersection reached from
//! two different neighbors is two different states.
//!
//! Paths are shortest in number of edges. Among equally short paths the one
//! returned is the first discovered, which is fixed by the neighbor order of
//! the network.

use std::collections::VecDeque;

use log::debug;
use rustc_hash::FxHashSet;

use crate::core::error::Result;
use crate::core::network::RoadNetwork;

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped from the frontier
    pub states_expanded: usize,
    /// States pushed onto the frontier (the seed state included)
    pub states_enqueued: usize,
    /// Neighbor entries looked at across all expansions
    pub neighbors_examined: usize,
    /// Continuations skipped because the turn was illegal
    pub turns_rejected: usize,
}

/// Result of a search between two resolved intersections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<N> {
    /// Start-to-goal inclusive, or `None` when the goal is unreachable
    pub path: Option<Vec<N>>,
    pub stats: SearchStats,
}

impl<N> SearchOutcome<N> {
    /// Number of edges in the path found
    pub fn hops(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

/// One discovered state. The predecessor is the node of the parent record.
struct StateRecord<N> {
    node: N,
    parent: Option<usize>,
}

/// Walk parent links back from `last` and return the path in travel order
fn rebuild_path<N: Copy>(arena: &[StateRecord<N>], last: usize, goal: N) -> Vec<N> {
    let mut path = vec![goal];
    let mut cursor = Some(last);
    while let Some(idx) = cursor {
        path.push(arena[idx].node);
        cursor = arena[idx].parent;
    }
    path.reverse();
    path
}

/// Find the shortest turn-legal path between two external identifiers
///
/// Returns `Err(UnknownIntersection)` if either identifier does not resolve,
/// `Ok(None)` if both are known but no legal path connects them.
pub fn find_path<M>(network: &M, start: &str, goal: &str) -> Result<Option<Vec<M::Node>>>
where
    M: RoadNetwork + ?Sized,
{
    let start = network.resolve(start)?;
    let goal = network.resolve(goal)?;
    Ok(search(network, start, goal).path)
}

/// Turn-aware BFS between two resolved intersections
pub fn search<M>(network: &M, start: M::Node, goal: M::Node) -> SearchOutcome<M::Node>
where
    M: RoadNetwork + ?Sized,
{
    let mut stats = SearchStats::default();

    // Zero edges means no turn to check
    if start == goal {
        return SearchOutcome {
            path: Some(vec![start]),
            stats,
        };
    }

    let mut arena: Vec<StateRecord<M::Node>> = vec![StateRecord {
        node: start,
        parent: None,
    }];
    let mut frontier: VecDeque<usize> = VecDeque::from([0]);
    let mut visited: FxHashSet<(M::Node, Option<M::Node>)> = FxHashSet::default();
    visited.insert((start, None));
    stats.states_enqueued = 1;

    while let Some(idx) = frontier.pop_front() {
        stats.states_expanded += 1;

        let current = arena[idx].node;
        let previous = arena[idx].parent.map(|p| arena[p].node);

        for &neighbor in network.neighbors(current) {
            stats.neighbors_examined += 1;

            if let Some(prev) = previous {
                if !network.is_turn_allowed(prev, current, neighbor) {
                    stats.turns_rejected += 1;
                    continue;
                }
            }

            if neighbor == goal {
                let path = rebuild_path(&arena, idx, neighbor);
                debug!(
                    "path found: {} hops, {} states expanded, {} turns rejected",
                    path.len() - 1,
                    stats.states_expanded,
                    stats.turns_rejected
                );
                return SearchOutcome {
                    path: Some(path),
                    stats,
                };
            }

            if visited.insert((neighbor, Some(current))) {
                arena.push(StateRecord {
                    node: neighbor,
                    parent: Some(idx),
                });
                frontier.push_back(arena.len() - 1);
                stats.states_enqueued += 1;
            }
        }
    }

    debug!(
        "no path: frontier exhausted after {} states, {} turns rejected",
        stats.states_expanded, stats.turns_rejected
    );
    SearchOutcome { path: None, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use std::collections::HashSet;

    /// Adjacency-list network over single-letter names with a ban list
    struct Sketch {
        names: Vec<&'static str>,
        adjacency: Vec<Vec<usize>>,
        banned: HashSet<(usize, usize, usize)>,
    }

    impl Sketch {
        /// `edges` lists each node with its space separated neighbors
        fn new(edges: &[(&'static str, &'static str)]) -> Self {
            let names: Vec<&'static str> = edges.iter().map(|(n, _)| *n).collect();
            let index = |n: &str| names.iter().position(|x| *x == n).unwrap();
            let adjacency = edges
                .iter()
                .map(|(_, targets)| targets.split_whitespace().map(index).collect())
                .collect();
            Self {
                names,
                adjacency,
                banned: HashSet::new(),
            }
        }

        fn ban(mut self, from: &str, through: &str, to: &str) -> Self {
            let idx = |n: &str| self.names.iter().position(|x| *x == n).unwrap();
            let triple = (idx(from), idx(through), idx(to));
            self.banned.insert(triple);
            self
        }

        fn names_of(&self, path: &[usize]) -> Vec<&'static str> {
            path.iter().map(|&i| self.names[i]).collect()
        }
    }

    impl RoadNetwork for Sketch {
        type Node = usize;

        fn resolve(&self, id: &str) -> Result<usize> {
            self.names
                .iter()
                .position(|n| *n == id)
                .ok_or_else(|| Error::unknown_intersection(id, self.names.iter().copied()))
        }

        fn neighbors(&self, node: usize) -> &[usize] {
            &self.adjacency[node]
        }

        fn is_turn_allowed(&self, from: usize, through: usize, to: usize) -> bool {
            !self.banned.contains(&(from, through, to))
        }
    }

    fn route(net: &Sketch, from: &str, to: &str) -> Option<Vec<&'static str>> {
        find_path(net, from, to)
            .expect("ids should resolve")
            .map(|p| net.names_of(&p))
    }

    #[test]
    fn test_trivial_path() {
        let net = Sketch::new(&[("A", "B"), ("B", "A")]);
        assert_eq!(route(&net, "A", "A"), Some(vec!["A"]));

        // Isolated node is still its own trivial path
        let net = Sketch::new(&[("A", "")]);
        let outcome = search(&net, 0, 0);
        assert_eq!(outcome.path, Some(vec![0]));
        assert_eq!(outcome.hops(), Some(0));
        assert_eq!(outcome.stats, SearchStats::default());
    }

    #[test]
    fn test_direct_neighbor_needs_no_turn_check() {
        // Every turn is banned, but the first step makes no turn
        let net = Sketch::new(&[("A", "B"), ("B", "A")]).ban("B", "A", "B");
        assert_eq!(route(&net, "A", "B"), Some(vec!["A", "B"]));
    }

    #[test]
    fn test_tie_break_follows_neighbor_order() {
        // Two 2-hop paths A-B-D and A-C-D; the first listed neighbor wins
        let net = Sketch::new(&[
            ("A", "B C"),
            ("B", "A D"),
            ("C", "A D"),
            ("D", "B C"),
        ]);
        assert_eq!(route(&net, "A", "D"), Some(vec!["A", "B", "D"]));

        let net = Sketch::new(&[
            ("A", "C B"),
            ("B", "A D"),
            ("C", "A D"),
            ("D", "B C"),
        ]);
        assert_eq!(route(&net, "A", "D"), Some(vec!["A", "C", "D"]));
    }

    #[test]
    fn test_banned_turn_forces_detour() {
        // A-B-C-D in a line with a loop B-E-B allowing a turnaround.
        // B->C straight on from A is banned; arriving at B from E is fine.
        let net = Sketch::new(&[
            ("A", "B"),
            ("B", "A C E"),
            ("C", "B D"),
            ("D", "C"),
            ("E", "B"),
        ])
        .ban("A", "B", "C");

        assert_eq!(route(&net, "A", "D"), Some(vec!["A", "B", "E", "B", "C", "D"]));
    }

    #[test]
    fn test_same_node_different_predecessor_is_new_state() {
        // B is reached first from A (dead end for the goal) and later from E
        let net = Sketch::new(&[
            ("A", "B E"),
            ("B", "A C E"),
            ("C", "B"),
            ("E", "A B"),
        ])
        .ban("A", "B", "C")
        .ban("B", "A", "E");

        assert_eq!(route(&net, "A", "C"), Some(vec!["A", "E", "B", "C"]));
    }

    #[test]
    fn test_unreachable_goal_is_not_an_error() {
        let net = Sketch::new(&[("A", "B"), ("B", "A"), ("C", "")]);
        assert_eq!(route(&net, "A", "C"), None);

        let outcome = search(&net, 0, 2);
        assert!(outcome.path.is_none());
        assert_eq!(outcome.hops(), None);
        // Seed (A, none) and (B, A), then (A, B) once
        assert_eq!(outcome.stats.states_expanded, 3);
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let net = Sketch::new(&[("A", "B"), ("B", "A")]);
        let err = find_path(&net, "Z", "A").unwrap_err();
        assert!(err.is_unknown_intersection());
        let err = find_path(&net, "A", "Z").unwrap_err();
        assert!(err.is_unknown_intersection());
        // Unknown start wins even when start == goal
        assert!(find_path(&net, "Z", "Z").is_err());
    }

    #[test]
    fn test_rejected_turn_is_counted_not_visited() {
        let net = Sketch::new(&[
            ("A", "B"),
            ("B", "A C"),
            ("C", "B"),
            ("D", ""),
        ])
        .ban("A", "B", "C");

        let outcome = search(&net, 0, 3);
        assert!(outcome.path.is_none());
        assert!(outcome.stats.turns_rejected >= 1);
        // C is never entered from B
        assert!(outcome.stats.states_enqueued <= 3);
    }
}
