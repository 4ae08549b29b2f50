// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Breadth-first and depth-first search
//!
//! One search loop serves both: the only difference is which end of the
//! worklist the next node comes off.  Neighbors are expanded in their
//! natural order, so a given graph always yields the same visit order.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

/// Which end of the worklist to take from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Frontier {
    /// First in, first out: breadth-first search.
    Queue,
    /// Last in, first out: depth-first search.
    Stack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<N> {
    /// Every node taken off the worklist, in order, ending at the goal.
    pub visited: Vec<N>,
    /// The route found, from the goal back to the start.
    pub path: Vec<N>,
}

/// Search `adjacency` from `start` until `goal` comes off the worklist.
pub fn search<N>(
    adjacency: &BTreeMap<N, BTreeSet<N>>,
    start: N,
    goal: N,
    frontier: Frontier,
) -> Result<SearchResult<N>>
where
    N: Copy + Ord + std::fmt::Debug,
{
    let mut worklist: VecDeque<(N, Option<N>)> = VecDeque::new();
    let mut seen = BTreeSet::new();
    let mut came_from = BTreeMap::new();
    let mut visited = Vec::new();
    worklist.push_back((start, None));

    loop {
        let next = match frontier {
            Frontier::Queue => worklist.pop_front(),
            Frontier::Stack => worklist.pop_back(),
        };
        let (node, parent) = match next {
            Some(entry) => entry,
            None => {
                debug!(?start, ?goal, visited = visited.len(), "search exhausted");
                return Err(Error::NoPathFound);
            }
        };
        if !seen.insert(node) {
            continue;
        }
        if let Some(parent) = parent {
            came_from.insert(node, parent);
        }
        visited.push(node);
        if node == goal {
            break;
        }
        if let Some(neighbors) = adjacency.get(&node) {
            worklist.extend(
                neighbors
                    .iter()
                    .filter(|n| !seen.contains(*n))
                    .map(|n| (*n, Some(node))),
            );
        }
    }

    let path = reconstruct(&came_from, start, goal).ok_or(Error::NoPathFound)?;
    debug!(?frontier, visited = visited.len(), path = path.len(), "search complete");
    Ok(SearchResult { visited, path })
}

/// Walk `came_from` back from `goal` to `origin`, which has no entry of
/// its own.  `None` when the chain breaks or loops before reaching it.
pub fn reconstruct<N>(came_from: &BTreeMap<N, N>, origin: N, goal: N) -> Option<Vec<N>>
where
    N: Copy + Ord,
{
    let mut path = vec![goal];
    let mut at = goal;
    while at != origin {
        if path.len() > came_from.len() {
            return None;
        }
        at = *came_from.get(&at)?;
        path.push(at);
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(u32, u32)]) -> BTreeMap<u32, BTreeSet<u32>> {
        let mut map: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
        for &(a, b) in edges {
            map.entry(a).or_default().insert(b);
            map.entry(b).or_default().insert(a);
        }
        map
    }

    //      0
    //     / \
    //    1   2
    //   / \   \
    //  3   4   5
    const TREE: [(u32, u32); 5] = [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5)];

    #[test]
    fn breadth_first_visits_by_level() {
        let result = search(&graph(&TREE), 0, 5, Frontier::Queue).unwrap();
        assert_eq!(result.visited, [0, 1, 2, 3, 4, 5]);
        assert_eq!(result.path, [5, 2, 0]);
    }

    #[test]
    fn depth_first_dives() {
        let result = search(&graph(&TREE), 0, 4, Frontier::Stack).unwrap();
        // The last-pushed neighbor comes off first.
        assert_eq!(result.visited, [0, 2, 5, 1, 4]);
        assert_eq!(result.path, [4, 1, 0]);
    }

    #[test]
    fn start_is_goal() {
        let result = search(&graph(&TREE), 3, 3, Frontier::Queue).unwrap();
        assert_eq!(result.visited, [3]);
        assert_eq!(result.path, [3]);
    }

    #[test]
    fn unreachable_goal_is_an_error() {
        let map = graph(&[(0, 1), (2, 3)]);
        assert_eq!(search(&map, 0, 3, Frontier::Queue), Err(Error::NoPathFound));
        assert_eq!(search(&map, 0, 3, Frontier::Stack), Err(Error::NoPathFound));
    }

    #[test]
    fn cycles_are_visited_once() {
        let map = graph(&[(0, 1), (1, 2), (2, 0), (2, 3)]);
        for frontier in [Frontier::Queue, Frontier::Stack].iter() {
            let result = search(&map, 0, 3, *frontier).unwrap();
            let distinct: BTreeSet<_> = result.visited.iter().collect();
            assert_eq!(distinct.len(), result.visited.len());
            assert_eq!(result.path.first(), Some(&3));
            assert_eq!(result.path.last(), Some(&0));
            for pair in result.path.windows(2) {
                assert!(map[&pair[0]].contains(&pair[1]));
            }
        }
    }

    #[test]
    fn reconstruct_ends_at_the_origin() {
        let mut came_from = BTreeMap::new();
        came_from.insert(7, 4);
        came_from.insert(4, 1);
        assert_eq!(reconstruct(&came_from, 1, 7), Some(vec![7, 4, 1]));
        assert_eq!(reconstruct(&came_from, 1, 1), Some(vec![1]));
    }

    #[test]
    fn broken_chains_do_not_invent_a_step() {
        let mut came_from = BTreeMap::new();
        came_from.insert(7, 4);
        came_from.insert(4, 2);
        assert_eq!(reconstruct(&came_from, 1, 7), None);

        let mut looped = BTreeMap::new();
        looped.insert(7, 4);
        looped.insert(4, 7);
        assert_eq!(reconstruct(&looped, 1, 7), None);
    }
}
