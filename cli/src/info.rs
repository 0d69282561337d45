use std::io::Write;

use graph_step_core::{Adjacency, LabelIndex};
use serde::Serialize;

use crate::load::load_graph;
use crate::settings::{GraphArgs, OutputFormat};

/// Summary of a loaded graph.
#[derive(Debug, Serialize)]
pub struct GraphInfo {
    pub directed: bool,
    pub node_count: usize,
    /// Edges as given in the input, duplicates included.
    pub edge_count: usize,
    /// Distinct adjacency entries after dedupe (both directions when undirected).
    pub adjacency_entries: usize,
    /// Dense id assignment, index = id.
    pub labels: Vec<String>,
}

pub fn execute(args: &GraphArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let graph = load_graph(args)?;
    let index = LabelIndex::from_graph(&graph);
    let adj = Adjacency::build(&graph, &index);

    let info = GraphInfo {
        directed: graph.is_directed(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        adjacency_entries: adj.edge_count(),
        labels: index.labels().to_vec(),
    };

    match args.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?,
        OutputFormat::Text => {
            let mode = if info.directed { "directed" } else { "undirected" };
            writeln!(out, "mode:      {}", mode)?;
            writeln!(out, "nodes:     {}", info.node_count)?;
            writeln!(out, "edges:     {}", info.edge_count)?;
            writeln!(out, "adjacency: {}", info.adjacency_entries)?;
            for (id, label) in info.labels.iter().enumerate() {
                writeln!(out, "  {:>4}  {}", id, label)?;
            }
        }
    }
    Ok(())
}
