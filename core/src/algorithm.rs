use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::scc::run_scc;
use crate::snapshot::Run;
use crate::topo::run_topological_sort;
use crate::traversal::{run_bfs, run_dfs};

/// The instrumented algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Bfs,
    Dfs,
    TopologicalSort,
    Scc,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::TopologicalSort,
        Algorithm::Scc,
    ];

    /// Topological sort and SCC are only defined on directed graphs.
    pub fn requires_directed(self) -> bool {
        matches!(self, Algorithm::TopologicalSort | Algorithm::Scc)
    }

    /// Whether a start node changes the traversal.
    pub fn uses_start(self) -> bool {
        matches!(self, Algorithm::Bfs | Algorithm::Dfs)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::TopologicalSort => "topo",
            Algorithm::Scc => "scc",
        })
    }
}

/// Accepts "bfs", "dfs", "topo"/"topological", "scc"/"kosaraju"
/// (case-insensitive).
impl FromStr for Algorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "topo" | "topological" | "toposort" => Ok(Algorithm::TopologicalSort),
            "scc" | "kosaraju" => Ok(Algorithm::Scc),
            _ => Err(GraphError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Run `algorithm` on `graph`. `start` is ignored by topological sort and SCC.
pub fn run(graph: &Graph, algorithm: Algorithm, start: Option<&str>) -> Result<Run> {
    match algorithm {
        Algorithm::Bfs => run_bfs(graph, start),
        Algorithm::Dfs => run_dfs(graph, start),
        Algorithm::TopologicalSort => run_topological_sort(graph),
        Algorithm::Scc => run_scc(graph),
    }
}
