//! Dijkstra's algorithm in two flavours.
//!
//! [`backward_distances`] grows a full tree over the reversed edges, giving every
//! node's distance *to* a target. [`shortest_path`] answers a single source/target
//! query and stops as soon as the target is settled. Given the target's backward
//! distances `pi` it relaxes with reduced costs `w(u, v) - pi[u] + pi[v]`, which are
//! non-negative and zero along shortest paths to the target, so far fewer nodes get
//! expanded before the target comes off the frontier.

use std::ops::Index;

use log::debug;

use crate::error::{Error, Result};
use crate::frontier::{unreached, Frontier};
use crate::graph::{Cost, Graph, NodeIndex};
use crate::path::{reconstruct_path, Predecessor, PredecessorTable};

/// Shortest distances from every node to `target`, tagged with that target.
#[derive(Clone, Debug, PartialEq)]
pub struct BackwardDistances {
    target: NodeIndex,
    dist: Vec<Cost>,
}

impl BackwardDistances {
    pub fn target(&self) -> NodeIndex {
        self.target
    }

    pub fn as_slice(&self) -> &[Cost] {
        &self.dist
    }
}

impl Index<NodeIndex> for BackwardDistances {
    type Output = Cost;

    fn index(&self, node: NodeIndex) -> &Cost {
        &self.dist[node]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath {
    /// Raw path cost, `f64::INFINITY` if the target is unreachable.
    pub distance: Cost,
    pub predecessors: PredecessorTable,
    /// Nodes expanded before the target was settled.
    pub iterations: usize,
}

impl ShortestPath {
    pub fn route(&self, source: NodeIndex, target: NodeIndex) -> Result<Option<Vec<NodeIndex>>> {
        reconstruct_path(&self.predecessors, source, target)
    }
}

/// Distances from every node to `target` along forward edges, found by running
/// Dijkstra from `target` over the backward adjacency view.
pub fn backward_distances(graph: &Graph, target: NodeIndex) -> Result<BackwardDistances> {
    graph.check_node(target)?;

    let mut dist = unreached(graph.node_count());
    dist[target] = 0.0;
    let mut frontier = Frontier::start(target, 0.0, 0.0);
    let mut settled = 0usize;

    while let Some((node, cost)) = frontier.pop_live(&dist) {
        settled += 1;
        for edge in graph.backward_edges(node) {
            let through = cost + edge.weight;
            if through < dist[edge.tail] {
                dist[edge.tail] = through;
                frontier.push(edge.tail, through, 0.0);
            }
        }
    }

    debug!("backward search to {target}: {settled} nodes settled");
    Ok(BackwardDistances { target, dist })
}

/// Shortest `source -> target` distance, predecessor tree and iteration count.
///
/// With `potential`, edges are relaxed by their reduced cost and the source is seeded
/// with `potential[source]`, so the returned distance is still the raw path cost. The
/// potential must come from [`backward_distances`] for this same `target`.
pub fn shortest_path(
    graph: &Graph,
    source: NodeIndex,
    target: NodeIndex,
    potential: Option<&BackwardDistances>,
) -> Result<ShortestPath> {
    graph.check_node(source)?;
    graph.check_node(target)?;
    let pi = match potential {
        Some(p) if p.target != target => {
            return Err(Error::PotentialMismatch {
                expected: target,
                found: p.target,
            })
        }
        Some(p) if p.dist.len() != graph.node_count() => {
            return Err(Error::PotentialLength {
                expected: graph.node_count(),
                found: p.dist.len(),
            })
        }
        Some(p) => Some(p.as_slice()),
        None => None,
    };

    let mut dist = unreached(graph.node_count());
    let mut predecessors = PredecessorTable::new(graph.node_count());
    let seed = pi.map_or(0.0, |pi| pi[source]);
    predecessors.set(source, Predecessor::Source);

    // The potential already knows the target is out of reach.
    if seed.is_infinite() {
        debug!("{source} -> {target}: unreachable by backward distances");
        return Ok(ShortestPath {
            distance: Cost::INFINITY,
            predecessors,
            iterations: 0,
        });
    }

    dist[source] = seed;
    let mut frontier = Frontier::start(source, seed, seed);
    let mut iterations = 0usize;

    while let Some((node, cost)) = frontier.pop_live(&dist) {
        if node == target {
            break;
        }
        iterations += 1;
        for edge in graph.forward_edges(node) {
            // ties on cost go to the node with more of the way still ahead of it
            let (weight, ahead) = match pi {
                Some(pi) => (edge.weight - pi[edge.tail] + pi[edge.head], pi[edge.head]),
                None => (edge.weight, 0.0),
            };
            let through = cost + weight;
            if through < dist[edge.head] {
                dist[edge.head] = through;
                predecessors.set(edge.head, Predecessor::From(node));
                frontier.push(edge.head, through, ahead);
            }
        }
    }

    debug!(
        "{source} -> {target} ({}): distance {}, {iterations} iterations",
        if pi.is_some() { "reduced" } else { "raw" },
        dist[target]
    );
    Ok(ShortestPath {
        distance: dist[target],
        predecessors,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    // 0 -> 1 -> 3 is the cheap way, 0 -> 2 -> 3 the direct-looking one; 4 is isolated.
    fn diamond() -> Graph {
        let mut builder = GraphBuilder::new();
        for name in ["s", "a", "b", "t", "x"] {
            builder.add_node(name).unwrap();
        }
        builder.add_edge(0, 1, 1.0).unwrap();
        builder.add_edge(1, 3, 1.0).unwrap();
        builder.add_edge(0, 2, 0.5).unwrap();
        builder.add_edge(2, 3, 5.0).unwrap();
        builder.add_edge(1, 2, 0.25).unwrap();
        builder.build()
    }

    #[test]
    fn backward_distances_to_sink() {
        let graph = diamond();
        let back = backward_distances(&graph, 3).unwrap();
        assert_eq!(back.target(), 3);
        assert_eq!(back.as_slice(), &[2.0, 1.0, 5.0, 0.0, f64::INFINITY]);
    }

    #[test]
    fn plain_query() {
        let graph = diamond();
        let sp = shortest_path(&graph, 0, 3, None).unwrap();
        assert_eq!(sp.distance, 2.0);
        assert_eq!(sp.route(0, 3).unwrap(), Some(vec![0, 1, 3]));
        // settles 0, then 2 (0.5), then 1 (1.0)
        assert_eq!(sp.iterations, 3);
        assert_eq!(sp.predecessors[2], Predecessor::From(0));
    }

    #[test]
    fn reduced_query_agrees_and_does_less_work() {
        let graph = diamond();
        let back = backward_distances(&graph, 3).unwrap();
        let sp = shortest_path(&graph, 0, 3, Some(&back)).unwrap();
        assert_eq!(sp.distance, 2.0);
        assert_eq!(sp.route(0, 3).unwrap(), Some(vec![0, 1, 3]));
        assert_eq!(sp.iterations, 2);
    }

    #[test]
    fn unreachable_target() {
        let graph = diamond();
        let sp = shortest_path(&graph, 0, 4, None).unwrap();
        assert!(sp.distance.is_infinite());
        assert_eq!(sp.predecessors[4], Predecessor::Unset);
        assert_eq!(sp.route(0, 4).unwrap(), None);
        assert_eq!(sp.iterations, 4);

        let back = backward_distances(&graph, 4).unwrap();
        let sp = shortest_path(&graph, 0, 4, Some(&back)).unwrap();
        assert_eq!(sp.distance, f64::INFINITY);
        assert_eq!(sp.iterations, 0);
        assert_eq!(sp.route(0, 4).unwrap(), None);
    }

    #[test]
    fn source_is_target() {
        let graph = diamond();
        let sp = shortest_path(&graph, 2, 2, None).unwrap();
        assert_eq!(sp.distance, 0.0);
        assert_eq!(sp.iterations, 0);
        assert_eq!(sp.route(2, 2).unwrap(), Some(vec![2]));
    }

    #[test]
    fn rejects_foreign_potential() {
        let graph = diamond();
        let back = backward_distances(&graph, 1).unwrap();
        assert!(matches!(
            shortest_path(&graph, 0, 3, Some(&back)),
            Err(Error::PotentialMismatch { expected: 3, found: 1 })
        ));

        let mut bigger = GraphBuilder::new();
        for name in ["s", "a", "b", "t", "x", "y"] {
            bigger.add_node(name).unwrap();
        }
        let other = backward_distances(&bigger.build(), 3).unwrap();
        assert!(matches!(
            shortest_path(&graph, 0, 3, Some(&other)),
            Err(Error::PotentialLength { expected: 5, found: 6 })
        ));
    }

    // Zero-weight edges put 0, 2, 3 and 4 on the same reduced key as the target.
    #[test]
    fn zero_weight_ties_do_not_add_work() {
        let mut builder = GraphBuilder::new();
        for name in ["s", "t", "a", "b", "c"] {
            builder.add_node(name).unwrap();
        }
        builder.add_edge(0, 3, 0.0).unwrap();
        builder.add_edge(0, 2, 2.0).unwrap();
        builder.add_edge(3, 1, 2.0).unwrap();
        builder.add_edge(2, 4, 0.0).unwrap();
        builder.add_edge(4, 1, 0.0).unwrap();
        let graph = builder.build();

        let raw = shortest_path(&graph, 0, 1, None).unwrap();
        let back = backward_distances(&graph, 1).unwrap();
        assert_eq!(back.as_slice(), &[2.0, 0.0, 0.0, 2.0, 0.0]);
        let reduced = shortest_path(&graph, 0, 1, Some(&back)).unwrap();
        assert_eq!(raw.distance, 2.0);
        assert_eq!(reduced.distance, 2.0);
        assert_eq!(raw.iterations, 2);
        assert_eq!(reduced.iterations, 2);
        assert_eq!(reduced.route(0, 1).unwrap(), Some(vec![0, 3, 1]));
    }

    #[test]
    fn rejects_out_of_range_nodes() {
        let graph = diamond();
        assert!(matches!(
            backward_distances(&graph, 5),
            Err(Error::NodeOutOfRange { index: 5, node_count: 5 })
        ));
        assert!(matches!(
            shortest_path(&graph, 9, 0, None),
            Err(Error::NodeOutOfRange { index: 9, .. })
        ));
        assert!(matches!(
            shortest_path(&graph, 0, 9, None),
            Err(Error::NodeOutOfRange { index: 9, .. })
        ));
    }
}
