//! graph-step-core: instrumented graph algorithm engine.
//!
//! Runs BFS, DFS with edge classification, DFS-based topological sort, and
//! Kosaraju's strongly connected components, and records a [`Snapshot`] of
//! the algorithm state at every transition. The resulting [`Run`] is a
//! finished, immutable sequence meant for step-by-step playback.
//!
//! Node labels are mapped to dense ids in ascending label order and
//! neighbor lists are sorted, so identical inputs always yield identical
//! runs.

mod algorithm;
mod error;
mod graph;
mod scc;
mod snapshot;
mod topo;
mod traversal;
mod views;

pub use algorithm::{run, Algorithm};
pub use error::{GraphError, Result};
pub use graph::{Adjacency, Graph, LabelIndex, NodeId};
pub use scc::run_scc;
pub use snapshot::{
    AbortReason, EdgeKey, EdgeKind, Frontier, FrontierKind, Run, RunStatus, SccPhase, Snapshot,
    SnapshotDetail, TraversalKind,
};
pub use topo::run_topological_sort;
pub use traversal::{run_bfs, run_dfs};
pub use views::{adjacency_list_text, adjacency_matrix, AdjacencyMatrix};
