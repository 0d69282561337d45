use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{Adjacency, Graph, LabelIndex, NodeId};
use crate::snapshot::{Frontier, Recorder, Run, RunStatus, SccPhase, Snapshot, SnapshotDetail};
use crate::traversal::Color;

/// Strongly connected components by Kosaraju's two-pass algorithm.
///
/// Phase 1 runs DFS over the forward edges (roots in ascending label
/// order) and records finish order. Phase 2 pops that order and runs DFS
/// over the transpose; each tree found there is one component. Group ids
/// are assigned in completion order starting at 0.
///
/// Rejects undirected graphs with [`GraphError::InvalidMode`].
pub fn run_scc(graph: &Graph) -> Result<Run> {
    if !graph.is_directed() {
        return Err(GraphError::InvalidMode {
            algorithm: "strongly connected components".to_string(),
        });
    }

    let index = LabelIndex::from_graph(graph);
    let forward = Adjacency::build(graph, &index);
    let reverse = Adjacency::transpose(graph, &index);

    let run = Kosaraju::new(&index, &forward, &reverse).run();
    debug!(snapshots = run.len(), groups = run.groups().len(), "scc finished");
    Ok(run)
}

struct Kosaraju<'a> {
    forward: &'a Adjacency,
    reverse: &'a Adjacency,
    rec: Recorder<'a>,
    phase: SccPhase,
    colors: Vec<Color>,
    visit_order: Vec<NodeId>,
    finish_stack: Vec<NodeId>,
    /// Final group per node once its group has completed.
    groups: Vec<Option<usize>>,
    group_count: usize,
    /// Members of the group being collected.
    current: Vec<NodeId>,
    components: usize,
}

impl<'a> Kosaraju<'a> {
    fn new(index: &'a LabelIndex, forward: &'a Adjacency, reverse: &'a Adjacency) -> Self {
        let n = index.len();
        Self {
            forward,
            reverse,
            rec: Recorder::new(index.labels(), true),
            phase: SccPhase::Finishing,
            colors: vec![Color::White; n],
            visit_order: Vec::with_capacity(n),
            finish_stack: Vec::with_capacity(n),
            groups: vec![None; n],
            group_count: 0,
            current: Vec::new(),
            components: 0,
        }
    }

    fn run(mut self) -> Run {
        for root in 0..self.colors.len() {
            if self.colors[root] == Color::White {
                self.components += 1;
                self.finish(root);
            }
        }

        self.phase = SccPhase::Collecting;
        self.colors.fill(Color::White);
        self.emit("Phase 2: popping the finish stack, DFS on the transpose".to_string());

        while let Some(root) = self.finish_stack.pop() {
            if self.colors[root] != Color::White {
                continue;
            }
            self.collect(root);

            let id = self.group_count;
            for &member in &self.current {
                self.groups[member] = Some(id);
            }
            let members = self.rec.labels_of(self.current.drain(..));
            self.group_count += 1;
            self.emit(format!("Group #{} found: {{{}}}", id, members.join(", ")));
        }

        self.emit(format!(
            "SCC complete: {} group(s)",
            self.group_count
        ));
        self.rec.finish(RunStatus::Completed)
    }

    /// Phase 1 DFS: visit `u`, then push it to the finish stack.
    fn finish(&mut self, u: NodeId) {
        let adj = self.forward;
        self.colors[u] = Color::Gray;
        self.visit_order.push(u);
        self.emit(format!("Phase 1: visit {}", self.rec.label(u)));

        for &v in adj.neighbors(u) {
            if self.colors[v] == Color::White {
                self.finish(v);
            }
        }

        self.colors[u] = Color::Black;
        self.finish_stack.push(u);
        self.emit(format!("Phase 1: finished {}, pushed to stack", self.rec.label(u)));
    }

    /// Phase 2 DFS over the transpose: every node reached joins `current`.
    fn collect(&mut self, u: NodeId) {
        let adj = self.reverse;
        self.colors[u] = Color::Gray;
        self.current.push(u);
        self.emit(format!(
            "Phase 2: visit {} (group #{})",
            self.rec.label(u),
            self.group_count
        ));

        for &v in adj.neighbors(u) {
            if self.colors[v] == Color::White {
                self.collect(v);
            }
        }
        self.colors[u] = Color::Black;
    }

    fn group_assignment(&self) -> BTreeMap<String, usize> {
        let mut assignment = self.rec.annotations(&self.groups);
        for &member in &self.current {
            assignment.insert(self.rec.label(member).to_string(), self.group_count);
        }
        assignment
    }

    fn emit(&mut self, message: String) {
        let snapshot = Snapshot {
            visited: self.rec.labels_where(|id| self.colors[id] != Color::White),
            visit_order: self.rec.labels_of(self.visit_order.iter().copied()),
            frontier: Frontier::stack(self.rec.labels_of(self.finish_stack.iter().copied())),
            active_edge: None,
            node_annotations: Default::default(),
            edge_classification: Default::default(),
            group_assignment: self.group_assignment(),
            component_count: self.components,
            message,
            detail: SnapshotDetail::Scc {
                phase: self.phase,
                group_count: self.group_count,
            },
        };
        self.rec.push(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directed(edges: &[(&str, &str)]) -> Graph {
        Graph::from_edges(edges.iter().copied(), true)
    }

    fn sorted(groups: Vec<Vec<String>>) -> Vec<Vec<String>> {
        let mut groups = groups;
        groups.sort();
        groups
    }

    #[test]
    fn test_scc_two_groups() {
        let run = run_scc(&directed(&[("A", "B"), ("B", "C"), ("C", "A"), ("A", "D")])).unwrap();
        assert!(run.is_completed());
        assert_eq!(
            sorted(run.groups()),
            vec![vec!["A", "B", "C"], vec!["D"]]
        );
        // Source group completes first.
        assert_eq!(run.groups()[0], ["A", "B", "C"]);
        let messages: Vec<&str> = run.iter().map(|s| s.message.as_str()).collect();
        assert!(messages.contains(&"Phase 2: visit A (group #0)"));
        assert!(messages.contains(&"Group #0 found: {A, C, B}"));
        assert!(messages.contains(&"Group #1 found: {D}"));
        assert_eq!(run.last().message, "SCC complete: 2 group(s)");
    }

    #[test]
    fn test_scc_dag_all_singletons() {
        let run = run_scc(&directed(&[("A", "B"), ("B", "C"), ("A", "C")])).unwrap();
        assert_eq!(run.groups(), vec![vec!["A"], vec!["B"], vec!["C"]]);
    }

    #[test]
    fn test_scc_two_cycles_linked() {
        let g = directed(&[
            ("A", "B"),
            ("B", "A"),
            ("B", "C"),
            ("C", "D"),
            ("D", "C"),
            ("E", "E"),
        ]);
        let run = run_scc(&g).unwrap();
        assert_eq!(
            sorted(run.groups()),
            vec![vec!["A", "B"], vec!["C", "D"], vec!["E"]]
        );
    }

    #[test]
    fn test_scc_provisional_group_id() {
        let run = run_scc(&directed(&[("A", "B"), ("B", "A"), ("B", "C")])).unwrap();
        for snap in &run {
            let SnapshotDetail::Scc { group_count, .. } = &snap.detail else {
                panic!("unexpected detail");
            };
            // Ids never exceed the provisional id of the group being formed.
            assert!(snap.group_assignment.values().all(|&g| g <= *group_count));
        }
        let completion = run
            .iter()
            .find(|s| s.message.starts_with("Group #0 found"))
            .unwrap();
        assert!(completion.group_assignment.values().all(|&g| g == 0));
    }

    #[test]
    fn test_scc_phase_one_finish_order() {
        let run = run_scc(&directed(&[("A", "B"), ("B", "C")])).unwrap();
        let phase2 = run
            .iter()
            .find(|s| s.message.starts_with("Phase 2: popping"))
            .unwrap();
        assert_eq!(phase2.frontier.items, ["C", "B", "A"]);
        assert!(phase2.visited.is_empty());
    }

    #[test]
    fn test_scc_rejects_undirected() {
        let g = Graph::from_edges([("A", "B")], false);
        assert!(matches!(
            run_scc(&g),
            Err(GraphError::InvalidMode { .. })
        ));
    }

    #[test]
    fn test_scc_empty_graph() {
        let g = Graph::new(Vec::<&str>::new(), Vec::<(&str, &str)>::new(), true);
        let run = run_scc(&g).unwrap();
        assert!(run.groups().is_empty());
        assert_eq!(run.len(), 2);
    }
}
