use thiserror::Error;

/// Errors raised before an engine starts traversing.
///
/// A cycle found by topological sort is not an error: it ends the run with
/// [`RunStatus::Aborted`](crate::RunStatus::Aborted) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A queried label (e.g. the requested start node) is not in the node set.
    #[error("unknown node label '{0}'")]
    UnknownLabel(String),

    /// The algorithm is only defined for directed graphs.
    #[error("{algorithm} requires a directed graph")]
    InvalidMode { algorithm: String },

    /// An algorithm name that does not match any engine.
    #[error("unknown algorithm '{0}' (use 'bfs', 'dfs', 'topo', or 'scc')")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
