//! Point-to-point shortest paths with Dijkstra's algorithm, optionally goal-directed by
//! reduced costs from precomputed backward distances.
//!
//! ```
//! use goalpath::{backward_distances, shortest_path, GraphBuilder};
//!
//! let mut builder = GraphBuilder::new();
//! let a = builder.add_node("A").unwrap();
//! let b = builder.add_node("B").unwrap();
//! let c = builder.add_node("C").unwrap();
//! builder.add_edge(a, b, 1.0).unwrap();
//! builder.add_edge(b, c, 2.0).unwrap();
//! builder.add_edge(a, c, 4.0).unwrap();
//! let graph = builder.build();
//!
//! let to_c = backward_distances(&graph, c).unwrap();
//! let sp = shortest_path(&graph, a, c, Some(&to_c)).unwrap();
//! assert_eq!(sp.distance, 3.0);
//! assert_eq!(sp.route(a, c).unwrap(), Some(vec![a, b, c]));
//! ```

pub mod dijkstra;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod path;
pub mod report;

pub use dijkstra::{backward_distances, shortest_path, BackwardDistances, ShortestPath};
pub use error::{Error, Result};
pub use graph::{Cost, Edge, Graph, GraphBuilder, Node, NodeIndex};
pub use path::{reconstruct_path, Predecessor, PredecessorTable};
