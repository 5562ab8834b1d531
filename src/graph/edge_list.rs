//! CSV edge lists: a header row, then one `tail,head,weight` record per directed edge.
//! Nodes are named; each name becomes a node the first time it shows up.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::info;

use super::{Graph, GraphBuilder};
use crate::error::{Error, Result};

pub fn read_edge_list<R: Read>(input: R) -> Result<Graph> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(input);

    let mut builder = GraphBuilder::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() < 3 {
            return Err(Error::Parse {
                line,
                message: format!("expected tail,head,weight but found {} fields", record.len()),
            });
        }
        let weight: f64 = record[2].parse().map_err(|_| Error::Parse {
            line,
            message: format!("weight {:?} is not a number", &record[2]),
        })?;
        let tail = builder.node_or_insert(&record[0]);
        let head = builder.node_or_insert(&record[1]);
        builder.add_edge(tail, head, weight)?;
    }

    let graph = builder.build();
    info!(
        "edge list: {} nodes, {} directed edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

pub fn read_edge_list_path<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let file = std::fs::File::open(path)?;
    read_edge_list(std::io::BufReader::new(file))
}
