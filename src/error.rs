use thiserror::Error;

use crate::graph::NodeIndex;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("node index {index} out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { index: NodeIndex, node_count: usize },

    /// Backward distances are only a valid potential for the target they were computed from.
    #[error("backward distances were computed for target {found}, query target is {expected}")]
    PotentialMismatch {
        expected: NodeIndex,
        found: NodeIndex,
    },

    #[error("backward distances cover {found} nodes, graph has {expected}")]
    PotentialLength { expected: usize, found: usize },

    /// Predecessor links from `target` never lead back to `start`. Only a solver bug produces this.
    #[error("predecessor chain from {target} does not lead back to {start}")]
    BrokenPredecessorChain { start: NodeIndex, target: NodeIndex },

    #[error("edge {tail} -> {head} has invalid weight {weight}")]
    InvalidWeight {
        tail: NodeIndex,
        head: NodeIndex,
        weight: f64,
    },

    #[error("node name {0:?} is already taken")]
    DuplicateNode(String),

    #[error("no node named {0:?}")]
    UnknownNode(String),

    #[error("line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("OSM error: {0}")]
    Osm(#[from] osmpbfreader::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
