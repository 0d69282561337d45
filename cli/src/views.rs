use std::io::Write;

use graph_step_core::{adjacency_list_text, adjacency_matrix, Adjacency, LabelIndex};

use crate::load::load_graph;
use crate::settings::{GraphArgs, OutputFormat};

pub fn matrix(args: &GraphArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let graph = load_graph(args)?;
    let matrix = adjacency_matrix(&graph);
    match args.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&matrix)?)?,
        OutputFormat::Text => write!(out, "{}", matrix)?,
    }
    Ok(())
}

pub fn adjacency(args: &GraphArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let graph = load_graph(args)?;
    match args.format {
        OutputFormat::Json => {
            let index = LabelIndex::from_graph(&graph);
            let adj = Adjacency::build(&graph, &index);
            let lists: serde_json::Map<String, serde_json::Value> = (0..index.len())
                .map(|id| {
                    let neighbors = adj
                        .neighbors(id)
                        .iter()
                        .map(|&v| serde_json::Value::from(index.label(v)))
                        .collect();
                    (index.label(id).to_string(), serde_json::Value::Array(neighbors))
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&lists)?)?;
        }
        OutputFormat::Text => writeln!(out, "{}", adjacency_list_text(&graph))?,
    }
    Ok(())
}
