//! Predecessor tables and route reconstruction.

use std::ops::Index;

use crate::error::{Error, Result};
use crate::graph::NodeIndex;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Predecessor {
    /// Not reached (yet).
    #[default]
    Unset,
    /// Start of the path.
    Source,
    /// Best known path arrives over an edge from this node.
    From(NodeIndex),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredecessorTable {
    entries: Vec<Predecessor>,
}

impl PredecessorTable {
    pub fn new(node_count: usize) -> Self {
        Self {
            entries: vec![Predecessor::Unset; node_count],
        }
    }

    pub fn set(&mut self, node: NodeIndex, predecessor: Predecessor) {
        self.entries[node] = predecessor;
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, Predecessor)> + '_ {
        self.entries.iter().copied().enumerate()
    }
}

impl Index<NodeIndex> for PredecessorTable {
    type Output = Predecessor;

    fn index(&self, node: NodeIndex) -> &Predecessor {
        &self.entries[node]
    }
}

/// Route from `source` to `target`, both inclusive, read off `predecessors`.
///
/// `Ok(None)` when `target` was never reached. A chain that does not end at
/// `source` within `node_count` steps is reported as
/// [`Error::BrokenPredecessorChain`] instead of looping.
pub fn reconstruct_path(
    predecessors: &PredecessorTable,
    source: NodeIndex,
    target: NodeIndex,
) -> Result<Option<Vec<NodeIndex>>> {
    let node_count = predecessors.entries.len();
    for index in [source, target] {
        if index >= node_count {
            return Err(Error::NodeOutOfRange { index, node_count });
        }
    }
    if predecessors[target] == Predecessor::Unset {
        return Ok(None);
    }

    let broken = Error::BrokenPredecessorChain {
        start: source,
        target,
    };
    let mut route = vec![target];
    let mut current = target;
    while current != source {
        if route.len() > node_count {
            return Err(broken);
        }
        match predecessors[current] {
            Predecessor::From(prev) if prev < node_count => {
                route.push(prev);
                current = prev;
            }
            _ => return Err(broken),
        }
    }
    route.reverse();
    Ok(Some(route))
}
