use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use goalpath::graph::{edge_list, osm};
use goalpath::report::{self, Weights};
use goalpath::{backward_distances, shortest_path, Graph, NodeIndex, Predecessor};

#[derive(Parser, Debug)]
#[command(name = "goalpath")]
#[command(about = "Shortest paths with Dijkstra's algorithm, with raw or goal-directed reduced edge weights.", long_about = None)]
struct Cli {
    /// Graph file: an OSM .pbf extract, or a CSV edge list (tail,head,weight) otherwise
    #[arg(short, long)]
    graph: PathBuf,

    /// OSM input: route over every way, not just those tagged 'highway'
    #[arg(long, default_value_t = false)]
    all_ways: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shortest path between two named nodes
    Route {
        #[arg(short, long)]
        source: String,

        #[arg(short, long)]
        target: String,

        #[arg(short, long, value_enum, default_value_t = Weights::Reduced)]
        weights: Weights,

        /// Print the predecessor table
        #[arg(long, default_value_t = false)]
        predecessors: bool,

        /// Print the path as node names
        #[arg(long, default_value_t = false)]
        path: bool,
    },
    /// Distances from every node to each target
    Backward {
        #[arg(short, long, required = true, num_args = 1..)]
        target: Vec<String>,
    },
    /// Shortest path tree from each source
    Tree {
        #[arg(short, long, required = true, num_args = 1..)]
        source: Vec<String>,

        /// Also print the tree found with reduced weights
        #[arg(long, default_value_t = false)]
        compare: bool,
    },
    /// Iteration counts with raw against reduced weights
    Series {
        #[arg(short, long)]
        source: String,

        #[arg(short, long, required = true, num_args = 1..)]
        target: Vec<String>,

        /// Output CSV. If omitted, prints a table to stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn load_graph(path: &Path, only_highways: bool) -> Result<Graph> {
    let is_pbf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pbf"))
        .unwrap_or(false);
    let graph = if is_pbf {
        osm::read_pbf(path, osm::OsmOptions { only_highways })
    } else {
        edge_list::read_edge_list_path(path)
    };
    graph.with_context(|| format!("reading graph {}", path.display()))
}

fn lookup(graph: &Graph, name: &str) -> Result<NodeIndex> {
    graph
        .node_by_name(name)
        .with_context(|| format!("resolving node {name:?}"))
}

fn run_route(
    graph: &Graph,
    source: &str,
    target: &str,
    weights: Weights,
    show_predecessors: bool,
    show_path: bool,
) -> Result<()> {
    let (s, t) = (lookup(graph, source)?, lookup(graph, target)?);

    let now = Instant::now();
    let potential = match weights {
        Weights::Raw => None,
        Weights::Reduced => Some(backward_distances(graph, t)?),
    };
    let sp = shortest_path(graph, s, t, potential.as_ref())?;
    info!("{weights} query took {:.3} ms", now.elapsed().as_secs_f64() * 1000.0);

    println!("weights: {weights}");
    println!("s -> t shortest path: {}", sp.distance);
    println!("iterations: {}", sp.iterations);
    if show_predecessors {
        let entries: Vec<String> = sp
            .predecessors
            .iter()
            .map(|(_, p)| match p {
                Predecessor::Unset => String::from("-"),
                Predecessor::Source => graph.name(s).to_string(),
                Predecessor::From(prev) => graph.name(prev).to_string(),
            })
            .collect();
        println!("predecessors: [{}]", entries.join(", "));
    }
    if show_path {
        match sp.route(s, t)? {
            Some(route) => println!("path: {}", report::format_route(graph, &route, sp.distance)),
            None => println!("path: none, {target} is unreachable from {source}"),
        }
    }
    Ok(())
}

fn run_backward(graph: &Graph, targets: &[String]) -> Result<()> {
    for name in targets {
        let back = backward_distances(graph, lookup(graph, name)?)?;
        println!("\nBackward distances to {}", graph.name(back.target()));
        for row in report::backward_listing(graph, &back) {
            println!("{row}");
        }
    }
    Ok(())
}

fn run_tree(graph: &Graph, sources: &[String], compare: bool) -> Result<()> {
    let variants: &[Weights] = if compare {
        &[Weights::Raw, Weights::Reduced]
    } else {
        &[Weights::Raw]
    };
    for name in sources {
        let source = lookup(graph, name)?;
        for &weights in variants {
            println!("\n{name}: shortest path tree with {weights} weights");
            for row in report::path_tree(graph, source, weights)? {
                println!("{}", report::format_route(graph, &row.route, row.distance));
            }
        }
    }
    Ok(())
}

fn run_series(graph: &Graph, source: &str, targets: &[String], out: Option<&Path>) -> Result<()> {
    let s = lookup(graph, source)?;
    let targets = targets
        .iter()
        .map(|name| lookup(graph, name))
        .collect::<Result<Vec<_>>>()?;
    let rows = report::iteration_series(graph, s, &targets)?;

    if let Some(out_path) = out {
        let file = File::create(out_path)
            .with_context(|| format!("creating CSV {}", out_path.display()))?;
        report::write_series_csv(&rows, file)?;
        println!("Wrote {} rows to {}", rows.len(), out_path.display());
    } else {
        println!("Source {source}");
        println!("{:<16} {:>12} {:>8} {:>8}", "target", "distance", "raw", "reduced");
        for row in &rows {
            println!(
                "{:<16} {:>12.2} {:>8} {:>8}",
                row.name, row.distance, row.raw_iterations, row.reduced_iterations
            );
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let now = Instant::now();
    let graph = load_graph(&cli.graph, !cli.all_ways)?;
    info!(
        "graph: {} nodes, {} directed edges, loaded in {:.2} s",
        graph.node_count(),
        graph.edge_count(),
        now.elapsed().as_secs_f64()
    );

    match &cli.command {
        Command::Route {
            source,
            target,
            weights,
            predecessors,
            path,
        } => run_route(&graph, source, target, *weights, *predecessors, *path),
        Command::Backward { target } => run_backward(&graph, target),
        Command::Tree { source, compare } => run_tree(&graph, source, *compare),
        Command::Series { source, target, out } => {
            run_series(&graph, source, target, out.as_deref())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
