//! Tables built on top of the solvers: backward distance listings, shortest path
//! trees, and iteration counts with raw versus reduced weights.

use std::fmt;
use std::io::Write;

use clap::ValueEnum;
use csv::Writer;

use crate::dijkstra::{backward_distances, shortest_path, BackwardDistances};
use crate::error::{Error, Result};
use crate::graph::{Cost, Graph, NodeIndex};

/// Which edge weights drive a query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Weights {
    /// Edge weights as given.
    Raw,
    /// Reduced costs from the target's backward distances.
    #[default]
    Reduced,
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weights::Raw => write!(f, "raw"),
            Weights::Reduced => write!(f, "reduced"),
        }
    }
}

/// Distance rounded to two places, `inf` when unreachable.
pub fn round2(distance: Cost) -> Cost {
    if distance.is_finite() {
        (distance * 100.0).round() / 100.0
    } else {
        distance
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackwardRow {
    pub index: NodeIndex,
    pub name: String,
    pub distance: Cost,
}

pub fn backward_listing(graph: &Graph, back: &BackwardDistances) -> Vec<BackwardRow> {
    graph
        .nodes()
        .iter()
        .map(|node| BackwardRow {
            index: node.index,
            name: node.name.clone(),
            distance: back[node.index],
        })
        .collect()
}

impl fmt::Display for BackwardRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}: {} [{:<4}]", self.index, self.name, round2(self.distance))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeRow {
    pub target: NodeIndex,
    pub route: Vec<NodeIndex>,
    pub distance: Cost,
}

/// Shortest path from `source` to every other reachable node.
///
/// With [`Weights::Reduced`] each target gets its own backward distances, so the
/// rows must match the raw ones; printing both is a visual check of that.
pub fn path_tree(graph: &Graph, source: NodeIndex, weights: Weights) -> Result<Vec<TreeRow>> {
    graph.check_node(source)?;
    let mut rows = Vec::new();
    for target in (0..graph.node_count()).filter(|&t| t != source) {
        let potential = match weights {
            Weights::Raw => None,
            Weights::Reduced => Some(backward_distances(graph, target)?),
        };
        let sp = shortest_path(graph, source, target, potential.as_ref())?;
        if let Some(route) = sp.route(source, target)? {
            rows.push(TreeRow {
                target,
                route,
                distance: sp.distance,
            });
        }
    }
    Ok(rows)
}

/// `[5.4 ]: A -> D -> B`
pub fn format_route(graph: &Graph, route: &[NodeIndex], distance: Cost) -> String {
    let names: Vec<&str> = route.iter().map(|&i| graph.name(i)).collect();
    format!("[{:<4}]: {}", round2(distance), names.join(" -> "))
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesRow {
    pub target: NodeIndex,
    pub name: String,
    pub distance: Cost,
    pub raw_iterations: usize,
    pub reduced_iterations: usize,
}

/// Iteration counts for `source -> target` with raw and with reduced weights.
pub fn iteration_series(
    graph: &Graph,
    source: NodeIndex,
    targets: &[NodeIndex],
) -> Result<Vec<SeriesRow>> {
    targets
        .iter()
        .map(|&target| {
            let raw = shortest_path(graph, source, target, None)?;
            let back = backward_distances(graph, target)?;
            let reduced = shortest_path(graph, source, target, Some(&back))?;
            Ok(SeriesRow {
                target,
                name: graph.name(target).to_string(),
                distance: raw.distance,
                raw_iterations: raw.iterations,
                reduced_iterations: reduced.iterations,
            })
        })
        .collect()
}

pub fn write_series_csv<W: Write>(rows: &[SeriesRow], out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(["target", "distance", "raw_iterations", "reduced_iterations"])?;
    for row in rows {
        let distance = if row.distance.is_finite() {
            format!("{:.6}", row.distance)
        } else {
            String::from("inf")
        };
        wtr.write_record([
            row.name.clone(),
            distance,
            row.raw_iterations.to_string(),
            row.reduced_iterations.to_string(),
        ])?;
    }
    wtr.flush().map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn line() -> Graph {
        let mut builder = GraphBuilder::new();
        for name in ["A", "B", "C", "D"] {
            builder.add_node(name).unwrap();
        }
        builder.add_edge(0, 1, 1.0).unwrap();
        builder.add_edge(1, 2, 1.254).unwrap();
        builder.add_edge(0, 3, 0.5).unwrap();
        builder.build()
    }

    #[test]
    fn rounding_and_route_format() {
        assert_eq!(round2(2.2360679), 2.24);
        assert!(round2(f64::INFINITY).is_infinite());
        let graph = line();
        assert_eq!(format_route(&graph, &[0, 1, 2], 2.254), "[2.25]: A -> B -> C");
        assert_eq!(format_route(&graph, &[0], 0.0), "[0   ]: A");
    }

    #[test]
    fn backward_rows_cover_every_node() {
        let graph = line();
        let back = backward_distances(&graph, 2).unwrap();
        let rows = backward_listing(&graph, &back);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].to_string(), "  0: A [2.25]");
        assert_eq!(rows[3].to_string(), "  3: D [inf ]");
    }

    #[test]
    fn trees_agree_between_weightings() {
        let graph = line();
        let raw = path_tree(&graph, 0, Weights::Raw).unwrap();
        let reduced = path_tree(&graph, 0, Weights::Reduced).unwrap();
        let routes: Vec<_> = raw.iter().map(|r| r.route.clone()).collect();
        assert_eq!(routes, vec![vec![0, 1], vec![0, 1, 2], vec![0, 3]]);
        assert_eq!(
            raw.iter().map(|r| r.route.clone()).collect::<Vec<_>>(),
            reduced.iter().map(|r| r.route.clone()).collect::<Vec<_>>()
        );
        // nothing reaches A
        assert!(path_tree(&graph, 2, Weights::Raw).unwrap().is_empty());
    }

    #[test]
    fn series_to_csv() {
        let graph = line();
        let rows = iteration_series(&graph, 0, &[2, 3]).unwrap();
        assert_eq!(rows[0].raw_iterations, 3);
        assert_eq!(rows[0].reduced_iterations, 2);
        assert_eq!(rows[1].raw_iterations, 1);
        assert_eq!(rows[1].reduced_iterations, 1);

        let mut out = Vec::new();
        write_series_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "target,distance,raw_iterations,reduced_iterations\nC,2.254000,3,2\nD,0.500000,1,1\n"
        );
    }
}
