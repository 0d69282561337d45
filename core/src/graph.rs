use tracing::debug;

use crate::error::{GraphError, Result};

/// Dense node identifier: position of the label in sorted label order.
pub type NodeId = usize;

/// Input graph: unique node labels, an ordered edge list, and directedness.
///
/// Edges are expected to reference declared labels. Edges that don't are
/// kept here as given and dropped when an [`Adjacency`] is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<String>,
    edges: Vec<(String, String)>,
    directed: bool,
}

impl Graph {
    /// Build a graph from an explicit node set. Repeated labels collapse.
    pub fn new<N, E, S>(nodes: N, edges: E, directed: bool) -> Self
    where
        N: IntoIterator<Item = S>,
        E: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut node_list: Vec<String> = nodes.into_iter().map(Into::into).collect();
        node_list.sort();
        node_list.dedup();

        Self {
            nodes: node_list,
            edges: edges
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
            directed,
        }
    }

    /// Build a graph whose node set is exactly the set of edge endpoints.
    pub fn from_edges<E, S>(edges: E, directed: bool) -> Self
    where
        E: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let edges: Vec<(String, String)> = edges
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .collect();
        let nodes: Vec<String> = edges
            .iter()
            .flat_map(|(from, to)| [from.clone(), to.clone()])
            .collect();
        Self::new(nodes, edges, directed)
    }

    /// Node labels, sorted and unique.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Edges in input order, duplicates included.
    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Bidirectional mapping between labels and dense ids.
///
/// Ids follow ascending label order, so the numbering depends only on the
/// node set and never on edge order. Lookups binary-search the sorted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelIndex {
    labels: Vec<String>,
}

impl LabelIndex {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        labels.dedup();
        Self { labels }
    }

    pub fn from_graph(graph: &Graph) -> Self {
        // Graph already keeps its labels sorted and unique.
        Self {
            labels: graph.nodes().to_vec(),
        }
    }

    /// Id for `label`, or `None` if the label is not indexed.
    pub fn get(&self, label: &str) -> Option<NodeId> {
        self.labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .ok()
    }

    /// Id for `label`, failing with [`GraphError::UnknownLabel`].
    pub fn id(&self, label: &str) -> Result<NodeId> {
        self.get(label)
            .ok_or_else(|| GraphError::UnknownLabel(label.to_string()))
    }

    /// Label for a valid id. Panics if `id >= len()`.
    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Per-node sorted neighbor lists over dense ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: Vec<Vec<NodeId>>,
}

impl Adjacency {
    /// Forward adjacency. Undirected graphs get both directions per edge.
    pub fn build(graph: &Graph, index: &LabelIndex) -> Self {
        Self::build_with(graph, index, false)
    }

    /// Transpose adjacency: every edge reversed, nothing mirrored.
    pub fn transpose(graph: &Graph, index: &LabelIndex) -> Self {
        Self::build_with(graph, index, true)
    }

    fn build_with(graph: &Graph, index: &LabelIndex, reverse: bool) -> Self {
        let mut neighbors: Vec<Vec<NodeId>> = vec![Vec::new(); index.len()];
        let mirror = !graph.is_directed() && !reverse;

        for (from, to) in graph.edges() {
            let (Some(u), Some(v)) = (index.get(from), index.get(to)) else {
                debug!(from = %from, to = %to, "dropping edge with undeclared endpoint");
                continue;
            };
            let (src, dst) = if reverse { (v, u) } else { (u, v) };
            neighbors[src].push(dst);
            if mirror {
                neighbors[dst].push(src);
            }
        }

        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Self { neighbors }
    }

    /// Sorted, duplicate-free neighbors of `id`.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.neighbors[id]
    }

    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of stored (src, dst) entries. Undirected edges count twice.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }
}

/// Traversal roots: `start` first when given, then every other id ascending.
pub(crate) fn seed_order(node_count: usize, start: Option<NodeId>) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(node_count);
    order.extend(start);
    order.extend((0..node_count).filter(|&id| Some(id) != start));
    order
}
