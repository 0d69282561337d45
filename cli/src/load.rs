use std::fs;
use std::io::{self, Read};

use anyhow::Context;
use graph_step_core::Graph;
use tracing::{debug, info};

use crate::settings::GraphArgs;

/// Parse an edge list: one edge per line, `SOURCE TARGET` separated by
/// whitespace. Extra columns are ignored; lines with fewer than two fields
/// are skipped.
pub fn parse_edge_list(text: &str) -> Vec<(String, String)> {
    let mut edges = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(from), Some(to)) => edges.push((from.to_string(), to.to_string())),
            (Some(_), None) => debug!(line = lineno + 1, "skipping line with a single field"),
            _ => {}
        }
    }

    edges
}

/// Read the configured input (file or stdin) and build the graph.
pub fn load_graph(args: &GraphArgs) -> anyhow::Result<Graph> {
    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read edge list from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read edge list from stdin")?;
            buf
        }
    };

    let graph = Graph::from_edges(parse_edge_list(&text), args.directed);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "graph loaded"
    );
    Ok(graph)
}
