use std::io::Write;

use anyhow::{bail, Context};
use clap::Args;
use graph_step_core::Algorithm;
use tracing::{info, warn};

use crate::load::load_graph;
use crate::output::{run_text, snapshot_text};
use crate::settings::{GraphArgs, OutputFormat};

/// Arguments for `graph-step run`.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Algorithm: bfs, dfs, topo, or scc.
    pub algorithm: Algorithm,

    /// Start node for bfs/dfs. Defaults to the smallest label.
    #[arg(short, long, env = "GRAPH_STEP_START")]
    pub start: Option<String>,

    /// Print only snapshot N instead of the whole run.
    #[arg(long)]
    pub step: Option<usize>,

    #[command(flatten)]
    pub graph: GraphArgs,
}

pub fn execute(args: &RunArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let graph = load_graph(&args.graph)?;

    if args.start.is_some() && !args.algorithm.uses_start() {
        warn!(algorithm = %args.algorithm, "start node ignored");
    }
    let run = graph_step_core::run(&graph, args.algorithm, args.start.as_deref())
        .with_context(|| format!("{} failed", args.algorithm))?;
    info!(algorithm = %args.algorithm, snapshots = run.len(), "run finished");

    match args.step {
        Some(step) => {
            let Some(snap) = run.get(step) else {
                bail!("step {} out of range: run has {} snapshots", step, run.len());
            };
            match args.graph.format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(snap)?)?,
                OutputFormat::Text => write!(out, "{}", snapshot_text(step, snap))?,
            }
        }
        None => match args.graph.format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&run)?)?,
            OutputFormat::Text => write!(out, "{}", run_text(&run))?,
        },
    }
    Ok(())
}
