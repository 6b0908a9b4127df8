//! Least-cost search over graphs whose edges carry the cost of entering their
//! target node.
//!
//! The binary heap has no decrease-key, so an improved cost is pushed as a
//! fresh entry and the outdated one is discarded whenever it is popped. The
//! recorded-cost map is the authority on which entries are still live.

use std::{
    cmp::Reverse,
    collections::{hash_map::Entry, BinaryHeap, HashMap},
    fmt::Debug,
    hash::Hash,
};

use bitvec::prelude::*;
use thiserror::Error;

use crate::grid::{Cell, Grid};

pub trait WeightedGraph {
    type Node: Copy + Eq + Hash + Ord + Debug;

    fn node_count(&self) -> usize;

    /// Dense index in `0..node_count()`, or `None` if the node is not part of the graph.
    fn index_of(&self, node: Self::Node) -> Option<usize>;

    /// Nodes reachable in one step, each with the cost of entering it.
    fn successors(&self, node: Self::Node) -> impl Iterator<Item = (Self::Node, u64)> + '_;
}

impl WeightedGraph for Grid {
    type Node = Cell;

    fn node_count(&self) -> usize {
        self.cell_count()
    }

    fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(self.position(cell))
        } else {
            None
        }
    }

    fn successors(&self, cell: Cell) -> impl Iterator<Item = (Cell, u64)> + '_ {
        self.neighbors(cell).map(move |next| (next, self[next]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError<N> {
    #[error("{0:?} is not part of the graph")]
    OutOfBounds(N),

    #[error("no path reaches {0:?}")]
    Unreachable(N),
}

/// Dijkstra's search from a single source.
///
/// Iterating yields every reachable node exactly once, paired with its final
/// cost, in non-decreasing cost order. The source's own cost is never counted.
pub struct Dijkstra<'a, G: WeightedGraph> {
    graph: &'a G,
    recorded: HashMap<G::Node, u64>,
    finalized: BitVec,
    finalized_count: usize,
    frontier: BinaryHeap<Reverse<(u64, G::Node)>>,
}

impl<'a, G: WeightedGraph> Dijkstra<'a, G> {
    pub fn new(graph: &'a G, source: G::Node) -> Result<Self, RouteError<G::Node>> {
        graph.index_of(source).ok_or(RouteError::OutOfBounds(source))?;

        let mut recorded: HashMap<G::Node, u64> = Default::default();
        recorded.insert(source, 0);

        let mut frontier: BinaryHeap<Reverse<(u64, G::Node)>> = Default::default();
        frontier.push(Reverse((0, source)));

        Ok(Self {
            graph,
            recorded,
            finalized: BitVec::repeat(false, graph.node_count()),
            finalized_count: 0,
            frontier,
        })
    }

    /// Records `candidate` for `node` unless a cheaper or equal cost is already known.
    fn relax(&mut self, node: G::Node, candidate: u64) {
        match self.recorded.entry(node) {
            Entry::Occupied(mut e) => {
                if candidate >= *e.get() {
                    return;
                }
                e.insert(candidate);
            }
            Entry::Vacant(e) => {
                e.insert(candidate);
            }
        }

        self.frontier.push(Reverse((candidate, node)));
    }
}

impl<'a, G: WeightedGraph> Iterator for Dijkstra<'a, G> {
    type Item = (G::Node, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finalized_count == self.finalized.len() {
            return None;
        }

        let graph = self.graph;
        while let Some(Reverse((cost, node))) = self.frontier.pop() {
            let Some(index) = graph.index_of(node) else {
                continue;
            };
            if self.finalized[index] {
                continue;
            }

            let recorded = self.recorded[&node];
            if recorded < cost {
                // superseded by a cheaper entry that is still in the heap
                continue;
            }
            assert_eq!(recorded, cost);

            self.finalized.set(index, true);
            self.finalized_count += 1;

            for (next, entry_cost) in graph.successors(node) {
                match graph.index_of(next) {
                    Some(next_index) if !self.finalized[next_index] => {
                        self.relax(next, cost + entry_cost);
                    }
                    _ => {}
                }
            }

            tracing::trace!(?node, cost, finalized = self.finalized_count, "finalized");
            return Some((node, cost));
        }

        None
    }
}

/// Least total cost of entering every node on the way from `source` to `destination`.
pub fn lowest_total_risk<G: WeightedGraph>(
    graph: &G,
    source: G::Node,
    destination: G::Node,
) -> Result<u64, RouteError<G::Node>> {
    graph
        .index_of(destination)
        .ok_or(RouteError::OutOfBounds(destination))?;

    let mut search = Dijkstra::new(graph, source)?;
    let result = search
        .find(|(node, _)| *node == destination)
        .map(|(_, cost)| cost)
        .ok_or(RouteError::Unreachable(destination));

    tracing::debug!(
        ?source,
        ?destination,
        finalized = search.finalized_count,
        nodes = graph.node_count(),
        "search finished"
    );
    result
}

/// Final cost of every node reachable from `source`.
pub fn risk_map<G: WeightedGraph>(
    graph: &G,
    source: G::Node,
) -> Result<HashMap<G::Node, u64>, RouteError<G::Node>> {
    Ok(Dijkstra::new(graph, source)?.collect())
}
