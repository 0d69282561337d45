use std::collections::VecDeque;

use tracing::debug;

use crate::error::Result;
use crate::graph::{seed_order, Adjacency, Graph, LabelIndex, NodeId};
use crate::snapshot::{
    EdgeKind, Frontier, Recorder, Run, RunStatus, Snapshot, SnapshotDetail, TraversalKind,
};

/// Breadth-first search over every component of `graph`.
///
/// The component containing `start` is traversed first; the remaining
/// components are seeded from unvisited nodes in ascending label order.
/// Node annotations are BFS levels (hop count from the component root).
pub fn run_bfs(graph: &Graph, start: Option<&str>) -> Result<Run> {
    let index = LabelIndex::from_graph(graph);
    let start = start.map(|label| index.id(label)).transpose()?;
    let adj = Adjacency::build(graph, &index);

    let run = Bfs::new(&index, &adj, graph.is_directed()).run(start);
    debug!(snapshots = run.len(), "bfs finished");
    Ok(run)
}

/// Depth-first search over every component with tree/back/cross
/// classification.
///
/// Uses an explicit frame stack, so deep graphs never touch the call stack.
/// Node annotations are DFS tree depths.
pub fn run_dfs(graph: &Graph, start: Option<&str>) -> Result<Run> {
    let index = LabelIndex::from_graph(graph);
    let start = start.map(|label| index.id(label)).transpose()?;
    let adj = Adjacency::build(graph, &index);

    let run = Dfs::new(&index, &adj, graph.is_directed()).run(start);
    debug!(snapshots = run.len(), "dfs finished");
    Ok(run)
}

struct Bfs<'a> {
    adj: &'a Adjacency,
    rec: Recorder<'a>,
    visited: Vec<bool>,
    levels: Vec<Option<usize>>,
    visit_order: Vec<NodeId>,
    queue: VecDeque<NodeId>,
    components: usize,
}

impl<'a> Bfs<'a> {
    fn new(index: &'a LabelIndex, adj: &'a Adjacency, directed: bool) -> Self {
        let n = index.len();
        Self {
            adj,
            rec: Recorder::new(index.labels(), directed),
            visited: vec![false; n],
            levels: vec![None; n],
            visit_order: Vec::with_capacity(n),
            queue: VecDeque::new(),
            components: 0,
        }
    }

    fn run(mut self, start: Option<NodeId>) -> Run {
        for root in seed_order(self.visited.len(), start) {
            if self.visited[root] {
                continue;
            }
            self.components += 1;
            self.visited[root] = true;
            self.levels[root] = Some(0);
            self.queue.push_back(root);
            self.emit(
                None,
                format!(
                    "Component #{} started (root: {})",
                    self.components,
                    self.rec.label(root)
                ),
            );
            self.drain_queue();
        }

        self.emit(
            None,
            format!("BFS complete: {} component(s)", self.components),
        );
        self.rec.finish(RunStatus::Completed)
    }

    fn drain_queue(&mut self) {
        let adj = self.adj;
        while let Some(u) = self.queue.pop_front() {
            self.visit_order.push(u);
            let level = self.levels[u].unwrap_or(0);
            self.emit(
                None,
                format!("Dequeued {} (level {})", self.rec.label(u), level),
            );

            for &v in adj.neighbors(u) {
                if self.visited[v] {
                    continue;
                }
                self.visited[v] = true;
                self.levels[v] = Some(level + 1);
                self.rec.classify(u, v, EdgeKind::Tree);
                self.queue.push_back(v);
                self.emit(
                    Some((u, v)),
                    format!(
                        "Discovered {} from {}, enqueued at level {}",
                        self.rec.label(v),
                        self.rec.label(u),
                        level + 1
                    ),
                );
            }
        }
    }

    fn emit(&mut self, active: Option<(NodeId, NodeId)>, message: String) {
        let snapshot = Snapshot {
            visited: self.rec.labels_where(|id| self.visited[id]),
            visit_order: self.rec.labels_of(self.visit_order.iter().copied()),
            frontier: Frontier::queue(self.rec.labels_of(self.queue.iter().copied())),
            active_edge: active.map(|(u, v)| self.rec.edge(u, v)),
            node_annotations: self.rec.annotations(&self.levels),
            edge_classification: self.rec.classification(),
            group_assignment: Default::default(),
            component_count: self.components,
            message,
            detail: SnapshotDetail::Traversal {
                kind: TraversalKind::Bfs,
            },
        };
        self.rec.push(snapshot);
    }
}

/// Node colors shared by the DFS-based engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    /// Not yet discovered.
    White,
    /// Discovered, still open on the stack.
    Gray,
    /// Fully explored.
    Black,
}

/// One explicit DFS stack frame.
struct Frame {
    node: NodeId,
    cursor: usize,
    depth: usize,
}

struct Dfs<'a> {
    adj: &'a Adjacency,
    rec: Recorder<'a>,
    directed: bool,
    colors: Vec<Color>,
    depths: Vec<Option<usize>>,
    visit_order: Vec<NodeId>,
    stack: Vec<Frame>,
    components: usize,
}

impl<'a> Dfs<'a> {
    fn new(index: &'a LabelIndex, adj: &'a Adjacency, directed: bool) -> Self {
        let n = index.len();
        Self {
            adj,
            rec: Recorder::new(index.labels(), directed),
            directed,
            colors: vec![Color::White; n],
            depths: vec![None; n],
            visit_order: Vec::with_capacity(n),
            stack: Vec::new(),
            components: 0,
        }
    }

    fn run(mut self, start: Option<NodeId>) -> Run {
        for root in seed_order(self.colors.len(), start) {
            if self.colors[root] != Color::White {
                continue;
            }
            self.components += 1;
            self.open(root, 0);
            self.emit(
                None,
                format!(
                    "Component #{} started (root: {})",
                    self.components,
                    self.rec.label(root)
                ),
            );
            while !self.stack.is_empty() {
                self.step();
            }
        }

        self.emit(
            None,
            format!("DFS complete: {} component(s)", self.components),
        );
        self.rec.finish(RunStatus::Completed)
    }

    fn open(&mut self, node: NodeId, depth: usize) {
        self.colors[node] = Color::Gray;
        self.depths[node] = Some(depth);
        self.visit_order.push(node);
        self.stack.push(Frame {
            node,
            cursor: 0,
            depth,
        });
    }

    /// Advance the top frame by one neighbor, or close it when exhausted.
    fn step(&mut self) {
        let adj = self.adj;
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        let (u, depth) = (top.node, top.depth);
        let Some(&v) = adj.neighbors(u).get(top.cursor) else {
            self.stack.pop();
            self.colors[u] = Color::Black;
            self.emit(None, format!("Backtrack: {} finished", self.rec.label(u)));
            return;
        };
        top.cursor += 1;

        match self.colors[v] {
            Color::White => {
                self.rec.classify(u, v, EdgeKind::Tree);
                self.open(v, depth + 1);
                self.emit(Some((u, v)), self.edge_message("Tree edge", u, v));
            }
            Color::Gray => {
                if self.is_parent(v) || !self.rec.classify(u, v, EdgeKind::Back) {
                    return;
                }
                self.emit(Some((u, v)), self.edge_message("Back edge", u, v));
            }
            Color::Black => {
                // Undirected DFS has no cross edges: a closed neighbor is
                // always the far end of an already classified back edge.
                if !self.directed || !self.rec.classify(u, v, EdgeKind::Cross) {
                    return;
                }
                self.emit(Some((u, v)), self.edge_message("Cross edge", u, v));
            }
        }
    }

    /// True when `v` is the frame directly below the top in an undirected
    /// graph, i.e. the edge just walked down.
    fn is_parent(&self, v: NodeId) -> bool {
        !self.directed
            && self.stack.len() >= 2
            && self.stack[self.stack.len() - 2].node == v
    }

    fn edge_message(&self, kind: &str, u: NodeId, v: NodeId) -> String {
        format!("{}: {} -> {}", kind, self.rec.label(u), self.rec.label(v))
    }

    fn emit(&mut self, active: Option<(NodeId, NodeId)>, message: String) {
        let snapshot = Snapshot {
            visited: self.rec.labels_where(|id| self.colors[id] != Color::White),
            visit_order: self.rec.labels_of(self.visit_order.iter().copied()),
            frontier: Frontier::stack(self.rec.labels_of(self.stack.iter().map(|f| f.node))),
            active_edge: active.map(|(u, v)| self.rec.edge(u, v)),
            node_annotations: self.rec.annotations(&self.depths),
            edge_classification: self.rec.classification(),
            group_assignment: Default::default(),
            component_count: self.components,
            message,
            detail: SnapshotDetail::Traversal {
                kind: TraversalKind::Dfs,
            },
        };
        self.rec.push(snapshot);
    }
}
