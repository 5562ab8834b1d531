//! Read-only directed graph with a forward and a backward adjacency view per node.
//!
//! Edges are stored once and referenced by id from the tail's forward list and the
//! head's backward list. Node indices are dense, `0..node_count`, and never change
//! once the graph is built.

use hashbrown::HashMap;

use crate::error::{Error, Result};

pub mod edge_list;
pub mod osm;

pub type NodeIndex = usize;
pub type EdgeId = usize;
pub type Cost = f64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub tail: NodeIndex,
    pub head: NodeIndex,
    pub weight: Cost,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub index: NodeIndex,
    pub name: String,
    forward: Vec<EdgeId>,
    backward: Vec<EdgeId>,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    by_name: HashMap<String, NodeIndex>,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Fails with [`Error::NodeOutOfRange`] unless `index` names a node of this graph.
    pub fn check_node(&self, index: NodeIndex) -> Result<()> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange {
                index,
                node_count: self.node_count(),
            })
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn name(&self, index: NodeIndex) -> &str {
        self.nodes.get(index).map_or("?", |node| node.name.as_str())
    }

    pub fn node_by_name(&self, name: &str) -> Result<NodeIndex> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownNode(name.to_string()))
    }

    /// Outgoing edges of `index`. Panics if `index` is out of range.
    pub fn forward_edges(&self, index: NodeIndex) -> impl Iterator<Item = &Edge> + '_ {
        self.nodes[index].forward.iter().map(|&id| &self.edges[id])
    }

    /// Incoming edges of `index`. Panics if `index` is out of range.
    pub fn backward_edges(&self, index: NodeIndex) -> impl Iterator<Item = &Edge> + '_ {
        self.nodes[index].backward.iter().map(|&id| &self.edges[id])
    }
}

#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: Graph {
                nodes: Vec::with_capacity(nodes),
                edges: Vec::with_capacity(edges),
                by_name: HashMap::with_capacity(nodes),
            },
        }
    }

    pub fn add_node(&mut self, name: &str) -> Result<NodeIndex> {
        if self.graph.by_name.contains_key(name) {
            return Err(Error::DuplicateNode(name.to_string()));
        }
        Ok(self.push_node(name))
    }

    /// Index of the node called `name`, creating it if it is new.
    pub fn node_or_insert(&mut self, name: &str) -> NodeIndex {
        match self.graph.by_name.get(name) {
            Some(&index) => index,
            None => self.push_node(name),
        }
    }

    fn push_node(&mut self, name: &str) -> NodeIndex {
        let index = self.graph.nodes.len();
        self.graph.nodes.push(Node {
            index,
            name: name.to_string(),
            forward: Vec::new(),
            backward: Vec::new(),
        });
        self.graph.by_name.insert(name.to_string(), index);
        index
    }

    pub fn add_edge(&mut self, tail: NodeIndex, head: NodeIndex, weight: Cost) -> Result<EdgeId> {
        self.graph.check_node(tail)?;
        self.graph.check_node(head)?;
        // Dijkstra's finalisation argument needs non-negative weights.
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight { tail, head, weight });
        }
        let id = self.graph.edges.len();
        self.graph.edges.push(Edge { tail, head, weight });
        self.graph.nodes[tail].forward.push(id);
        self.graph.nodes[head].backward.push(id);
        Ok(id)
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}
