use tracing::{debug, info};

use crate::error::{GraphError, Result};
use crate::graph::{Adjacency, Graph, LabelIndex, NodeId};
use crate::snapshot::{
    AbortReason, Frontier, Recorder, Run, RunStatus, Snapshot, SnapshotDetail,
};
use crate::traversal::Color;

/// Topological sort by DFS finish order, with cycle detection.
///
/// Rejects undirected graphs with [`GraphError::InvalidMode`] before any
/// traversal. If a cycle is found the run ends with
/// [`RunStatus::Aborted`] and no ordering; a partial order is never offered.
/// On success the finish stack is popped one node per snapshot, and node
/// annotations give each node's 1-based rank in the final ordering.
pub fn run_topological_sort(graph: &Graph) -> Result<Run> {
    if !graph.is_directed() {
        return Err(GraphError::InvalidMode {
            algorithm: "topological sort".to_string(),
        });
    }

    let index = LabelIndex::from_graph(graph);
    let adj = Adjacency::build(graph, &index);

    let run = TopoSort::new(&index, &adj).run();
    debug!(snapshots = run.len(), completed = run.is_completed(), "topological sort finished");
    Ok(run)
}

/// Outcome of visiting one node.
enum Step {
    Progress,
    /// The edge `(u, v)` reached a gray node and closes a cycle.
    CycleClosing(NodeId, NodeId),
}

struct TopoSort<'a> {
    adj: &'a Adjacency,
    rec: Recorder<'a>,
    colors: Vec<Color>,
    visit_order: Vec<NodeId>,
    finish_stack: Vec<NodeId>,
    ordering: Vec<NodeId>,
    ranks: Vec<Option<usize>>,
    components: usize,
}

impl<'a> TopoSort<'a> {
    fn new(index: &'a LabelIndex, adj: &'a Adjacency) -> Self {
        let n = index.len();
        Self {
            adj,
            rec: Recorder::new(index.labels(), true),
            colors: vec![Color::White; n],
            visit_order: Vec::with_capacity(n),
            finish_stack: Vec::with_capacity(n),
            ordering: Vec::with_capacity(n),
            ranks: vec![None; n],
            components: 0,
        }
    }

    fn run(mut self) -> Run {
        for root in 0..self.colors.len() {
            if self.colors[root] != Color::White {
                continue;
            }
            self.components += 1;
            self.emit(
                None,
                format!(
                    "Component #{} started (root: {})",
                    self.components,
                    self.rec.label(root)
                ),
            );

            if let Step::CycleClosing(u, v) = self.visit(root) {
                return self.abort(u, v);
            }
        }

        self.emit(
            None,
            "DFS complete; popping the finish stack to build the ordering".to_string(),
        );
        while let Some(u) = self.finish_stack.pop() {
            self.ordering.push(u);
            self.ranks[u] = Some(self.ordering.len());
            self.emit(
                None,
                format!("Pop {} (rank {})", self.rec.label(u), self.ordering.len()),
            );
        }

        self.emit(None, "Topological sort complete".to_string());
        self.rec.finish(RunStatus::Completed)
    }

    fn visit(&mut self, u: NodeId) -> Step {
        let adj = self.adj;
        self.colors[u] = Color::Gray;
        self.visit_order.push(u);
        self.emit(None, format!("Visit {}", self.rec.label(u)));

        for &v in adj.neighbors(u) {
            match self.colors[v] {
                Color::White => {
                    if let cycle @ Step::CycleClosing(..) = self.visit(v) {
                        return cycle;
                    }
                }
                Color::Gray => {
                    self.emit(
                        Some((u, v)),
                        format!(
                            "Cycle found: {} -> {} reaches a node still on the path",
                            self.rec.label(u),
                            self.rec.label(v)
                        ),
                    );
                    return Step::CycleClosing(u, v);
                }
                Color::Black => {}
            }
        }

        self.colors[u] = Color::Black;
        self.finish_stack.push(u);
        self.emit(None, format!("Finished {}, pushed to stack", self.rec.label(u)));
        Step::Progress
    }

    fn abort(mut self, u: NodeId, v: NodeId) -> Run {
        let (from, to) = self.rec.edge(u, v);
        info!(from = %from, to = %to, "topological sort aborted on cycle");
        self.emit(
            None,
            "Graph has a cycle; no topological ordering exists".to_string(),
        );
        self.rec
            .finish(RunStatus::Aborted(AbortReason::CycleDetected { from, to }))
    }

    fn emit(&mut self, active: Option<(NodeId, NodeId)>, message: String) {
        let snapshot = Snapshot {
            visited: self.rec.labels_where(|id| self.colors[id] != Color::White),
            visit_order: self.rec.labels_of(self.visit_order.iter().copied()),
            frontier: Frontier::stack(self.rec.labels_of(self.finish_stack.iter().copied())),
            active_edge: active.map(|(u, v)| self.rec.edge(u, v)),
            node_annotations: self.rec.annotations(&self.ranks),
            edge_classification: Default::default(),
            group_assignment: Default::default(),
            component_count: self.components,
            message,
            detail: SnapshotDetail::Topological {
                ordering: self.rec.labels_of(self.ordering.iter().copied()),
            },
        };
        self.rec.push(snapshot);
    }
}
