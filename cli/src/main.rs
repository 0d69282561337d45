//! graph-step: replay instrumented graph algorithm runs from an edge list.

mod info;
mod load;
mod output;
mod run;
mod settings;
mod views;

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::run::RunArgs;
use crate::settings::{log_filter, GraphArgs};

#[derive(Parser)]
#[command(name = "graph-step")]
#[command(about = "Step through BFS, DFS, topological sort, and SCC runs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an algorithm and print its snapshots
    Run(RunArgs),
    /// Print the adjacency matrix
    Matrix(GraphArgs),
    /// Print the sorted adjacency lists
    Adjacency(GraphArgs),
    /// Print node and edge counts and the label index
    Info(GraphArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(log_filter()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Run(args) => run::execute(args, &mut out)?,
        Command::Matrix(args) => views::matrix(args, &mut out)?,
        Command::Adjacency(args) => views::adjacency(args, &mut out)?,
        Command::Info(args) => info::execute(args, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::settings::OutputFormat;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_args() {
        let cli = Cli::try_parse_from([
            "graph-step", "run", "topo", "--directed", "--input", "g.txt", "--step", "3",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.algorithm, graph_step_core::Algorithm::TopologicalSort);
        assert!(args.graph.directed);
        assert_eq!(args.step, Some(3));
    }

    // Env fallbacks share process state, so they are checked in one test.
    #[test]
    fn test_env_fallbacks() {
        fn parse_run() -> RunArgs {
            let cli = Cli::try_parse_from(["graph-step", "run", "bfs"]).unwrap();
            let Command::Run(args) = cli.command else {
                panic!("expected run");
            };
            args
        }

        std::env::set_var("GRAPH_STEP_FORMAT", "json");
        std::env::set_var("GRAPH_STEP_START", "B");
        for (value, expected) in [
            ("true", true),
            ("1", true),
            ("yes", true),
            ("on", true),
            ("false", false),
            ("0", false),
            ("no", false),
        ] {
            std::env::set_var("GRAPH_STEP_DIRECTED", value);
            let args = parse_run();
            assert_eq!(args.graph.directed, expected, "GRAPH_STEP_DIRECTED={}", value);
            assert_eq!(args.graph.format, OutputFormat::Json);
            assert_eq!(args.start.as_deref(), Some("B"));
        }

        std::env::set_var("GRAPH_STEP_DIRECTED", "sometimes");
        assert!(Cli::try_parse_from(["graph-step", "info"]).is_err());

        // The explicit flag still wins over a falsy env value.
        std::env::set_var("GRAPH_STEP_DIRECTED", "0");
        let cli = Cli::try_parse_from(["graph-step", "matrix", "--directed"]).unwrap();
        let Command::Matrix(graph) = cli.command else {
            panic!("expected matrix");
        };
        assert!(graph.directed);

        for key in ["GRAPH_STEP_FORMAT", "GRAPH_STEP_START", "GRAPH_STEP_DIRECTED"] {
            std::env::remove_var(key);
        }
        let args = parse_run();
        assert!(!args.graph.directed);
        assert_eq!(args.graph.format, OutputFormat::Text);
        assert!(args.start.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_algorithm() {
        assert!(Cli::try_parse_from(["graph-step", "run", "dijkstra"]).is_err());
    }
}
