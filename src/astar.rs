//! A best-first search in the shape of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html),
//! with two deliberate departures from a textbook A*: the frontier is a plain
//! insertion-ordered list scanned linearly for the smallest estimate (ties go
//! to the earliest insertion, which keeps path shapes stable), and a node that
//! has been expanded once is never expanded again even if a cheaper route to
//! it turns up later. Both properties are part of the planner contract.

use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::warn;
use std::hash::Hash;

/// One row of the frontier. Superseded rows are not removed when a better
/// route to their node is found; they linger and are skipped on arrival.
struct FrontierNode<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

/// Arena entry for a visited node: parent arena index for path
/// reconstruction, best known cost, and whether the node has been expanded.
struct NodeEntry<C> {
    parent: usize,
    cost: C,
    closed: bool,
}

impl<C> NodeEntry<C> {
    fn open(parent: usize, cost: C) -> NodeEntry<C> {
        NodeEntry {
            parent,
            cost,
            closed: false,
        }
    }
}

fn reverse_path<N, C>(parents: &FxIndexMap<N, NodeEntry<C>>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, entry)| {
            *i = entry.parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut frontier: Vec<FrontierNode<C>> = Vec::new();
    frontier.push(FrontierNode {
        estimated_cost: Zero::zero(),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, NodeEntry<C>> = FxIndexMap::default();
    parents.insert(start.clone(), NodeEntry::open(usize::MAX, Zero::zero()));
    while !frontier.is_empty() {
        // Linear scan with a strict comparison: on equal estimates the
        // earliest-inserted row wins, and removal keeps the rest in order.
        let mut best = 0;
        for i in 1..frontier.len() {
            if frontier[i].estimated_cost < frontier[best].estimated_cost {
                best = i;
            }
        }
        let FrontierNode { cost, index, .. } = frontier.remove(best);
        let successors = {
            let (node, entry) = parents.get_index(index).unwrap();
            if success(node) {
                let path = reverse_path(&parents, index);
                return Some((path, cost));
            }
            // A stale row for an already expanded node; the row that closed
            // it carried a smaller estimate and was taken earlier.
            if entry.closed {
                continue;
            }
            successors(node)
        };
        let (_, entry) = parents.get_index_mut(index).unwrap();
        entry.closed = true;
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(NodeEntry::open(index, new_cost));
                }
                Occupied(mut e) => {
                    let known = e.get();
                    if known.closed || known.cost <= new_cost {
                        continue;
                    }
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(NodeEntry::open(index, new_cost));
                }
            }

            frontier.push(FrontierNode {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    warn!("Frontier exhausted before the goal, is the reachability index consistent?");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn open_grid_successors(size: i32) -> impl FnMut(&Cell) -> Vec<(Cell, i32)> {
        move |cell: &Cell| {
            cell.orthogonal_neighbours()
                .into_iter()
                .filter(|c| c.row >= 0 && c.col >= 0 && c.row < size && c.col < size)
                .map(|c| (c, 1))
                .collect()
        }
    }

    #[test]
    fn test_start_is_goal() {
        let start = Cell::new(1, 1);
        let (path, cost) = astar(
            &start,
            open_grid_successors(3),
            |c| c.squared_euclidean(&start),
            |c| *c == start,
        )
        .unwrap();
        assert_eq!(path, vec![start]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_tie_break_follows_insertion_order() {
        let goal = Cell::new(2, 2);
        let (path, cost) = astar(
            &Cell::new(0, 0),
            open_grid_successors(3),
            |c| c.squared_euclidean(&goal),
            |c| *c == goal,
        )
        .unwrap();
        assert_eq!(
            path,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(1, 2),
                Cell::new(2, 2)
            ]
        );
        assert_eq!(cost, 4);
    }

    #[test]
    fn test_exhausted_frontier_is_none() {
        let result = astar(
            &0,
            |&n: &i32| if n < 2 { vec![(n + 1, 1)] } else { vec![] },
            |_| 0,
            |&n| n == 9,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_better_route_reopens_frontier_not_closed_nodes() {
        let mut expansions: Vec<char> = Vec::new();
        let (path, cost) = astar(
            &'s',
            |&node: &char| {
                expansions.push(node);
                match node {
                    's' => vec![('a', 1), ('c', 5)],
                    'a' => vec![('c', 1)],
                    'c' => vec![('g', 1)],
                    'g' => vec![('t', 10)],
                    _ => vec![],
                }
            },
            |_| 0,
            |&node| node == 't',
        )
        .unwrap();
        assert_eq!(path, vec!['s', 'a', 'c', 'g', 't']);
        assert_eq!(cost, 13);
        // The direct s->c edge leaves a stale frontier row behind once the
        // cheaper route through 'a' supersedes it; that row must be skipped
        // rather than expanded a second time.
        assert_eq!(expansions.iter().filter(|&&n| n == 'c').count(), 1);
        assert_eq!(expansions, vec!['s', 'a', 'c', 'g']);
    }
}
