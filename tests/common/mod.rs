use goalpath::{Graph, GraphBuilder};

pub const NAMES: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

/// Ten-node road-like sample. Nothing leads into F.
pub const EDGES: [(&str, &str, f64); 25] = [
    ("A", "D", 2.24),
    ("A", "E", 2.24),
    ("A", "I", 1.41),
    ("A", "J", 2.0),
    ("B", "I", 2.24),
    ("B", "E", 2.0),
    ("C", "E", 2.0),
    ("D", "B", 3.16),
    ("D", "C", 1.41),
    ("D", "A", 2.24),
    ("E", "A", 2.24),
    ("E", "C", 2.0),
    ("F", "G", 1.41),
    ("F", "B", 3.0),
    ("F", "I", 2.24),
    ("F", "H", 2.0),
    ("G", "H", 1.41),
    ("G", "A", 1.0),
    ("H", "A", 1.0),
    ("H", "J", 2.24),
    ("I", "G", 1.0),
    ("I", "D", 2.24),
    ("I", "A", 1.41),
    ("J", "H", 2.24),
    ("J", "C", 3.0),
];

pub fn sample_graph() -> Graph {
    let mut builder = GraphBuilder::new();
    for name in NAMES {
        builder.add_node(name).unwrap();
    }
    for (tail, head, weight) in EDGES {
        let tail = NAMES.iter().position(|&n| n == tail).unwrap();
        let head = NAMES.iter().position(|&n| n == head).unwrap();
        builder.add_edge(tail, head, weight).unwrap();
    }
    builder.build()
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
