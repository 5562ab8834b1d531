//! Road graphs from OpenStreetMap `.pbf` extracts.
//!
//! Two passes over the file: the first keeps routable ways and the node ids they
//! reference, the second reads coordinates for those nodes. Every consecutive pair of
//! way nodes becomes one edge (or two, for ways without a `oneway` restriction)
//! weighted by its great-circle length in meters. Nodes are named by OSM id.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use fnv::FnvHashMap;
use log::{info, warn};
use osmpbfreader::{NodeId, OsmObj, OsmPbfReader, Tags};

use super::{Graph, GraphBuilder, NodeIndex};
use crate::error::Result;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Clone, Copy, Debug)]
pub struct OsmOptions {
    /// Only ways tagged `highway`. Otherwise every linear way is used.
    pub only_highways: bool,
}

impl Default for OsmOptions {
    fn default() -> Self {
        Self {
            only_highways: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
    Both,
}

/// Great-circle distance in meters between two points given in degrees.
pub fn haversine_meters((lat1, lon1): (f64, f64), (lat2, lon2): (f64, f64)) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let dphi = phi2 - phi1;
    let dlambda = (lon2 - lon1).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

fn is_routable(tags: &Tags, only_highways: bool) -> bool {
    if only_highways && !tags.contains_key("highway") {
        return false;
    }
    // areas are closed polygons, not roads
    !tags.get("area").map(|v| v == "yes").unwrap_or(false)
}

fn direction(tags: &Tags) -> Direction {
    if let Some(v) = tags.get("oneway") {
        match v.as_str() {
            "yes" | "true" | "1" => return Direction::Forward,
            "-1" | "reverse" => return Direction::Backward,
            _ => {}
        }
    }
    if tags
        .get("junction")
        .map(|v| v == "roundabout")
        .unwrap_or(false)
    {
        return Direction::Forward;
    }
    Direction::Both
}

/// Directed, weighted hops of one way. Pairs without coordinates or of zero length
/// are skipped.
fn way_edges(
    nodes: &[NodeId],
    dir: Direction,
    coords: &FnvHashMap<NodeId, (f64, f64)>,
) -> Vec<(NodeId, NodeId, f64)> {
    let mut edges = Vec::with_capacity(2 * nodes.len());
    for pair in nodes.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (Some(&pa), Some(&pb)) = (coords.get(&a), coords.get(&b)) else {
            continue;
        };
        let meters = haversine_meters(pa, pb);
        if !meters.is_finite() || meters <= 0.0 {
            continue;
        }
        if dir != Direction::Backward {
            edges.push((a, b, meters));
        }
        if dir != Direction::Forward {
            edges.push((b, a, meters));
        }
    }
    edges
}

pub fn read_pbf<P: AsRef<Path>>(path: P, options: OsmOptions) -> Result<Graph> {
    let path = path.as_ref();

    let mut pbf = OsmPbfReader::new(File::open(path)?);
    let mut referenced: HashSet<NodeId> = HashSet::new();
    let mut ways: Vec<(Vec<NodeId>, Direction)> = Vec::new();
    for obj in pbf.iter() {
        if let OsmObj::Way(way) = obj? {
            if way.nodes.len() >= 2 && is_routable(&way.tags, options.only_highways) {
                referenced.extend(way.nodes.iter().copied());
                let dir = direction(&way.tags);
                ways.push((way.nodes, dir));
            }
        }
    }
    info!(
        "{}: {} routable ways referencing {} nodes",
        path.display(),
        ways.len(),
        referenced.len()
    );

    let mut pbf = OsmPbfReader::new(File::open(path)?);
    let mut coords: FnvHashMap<NodeId, (f64, f64)> = FnvHashMap::default();
    for obj in pbf.iter() {
        if let OsmObj::Node(node) = obj? {
            if referenced.contains(&node.id) {
                coords.insert(node.id, (node.lat(), node.lon()));
            }
        }
    }
    if coords.len() < referenced.len() {
        warn!(
            "{} referenced nodes have no coordinates in the extract",
            referenced.len() - coords.len()
        );
    }

    let mut builder = GraphBuilder::with_capacity(coords.len(), 2 * coords.len());
    let mut index_of: FnvHashMap<NodeId, NodeIndex> = FnvHashMap::default();
    let mut index = |builder: &mut GraphBuilder, id: NodeId| -> NodeIndex {
        *index_of
            .entry(id)
            .or_insert_with(|| builder.node_or_insert(&id.0.to_string()))
    };

    for (nodes, dir) in &ways {
        for (a, b, meters) in way_edges(nodes, *dir, &coords) {
            let (u, v) = (index(&mut builder, a), index(&mut builder, b));
            builder.add_edge(u, v, meters)?;
        }
    }

    let graph = builder.build();
    info!(
        "road graph: {} nodes, {} directed edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
