use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Which working structure the frontier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierKind {
    /// FIFO queue, front first.
    Queue,
    /// LIFO stack, bottom first.
    Stack,
}

/// Labels currently held by the engine's queue or stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frontier {
    pub kind: FrontierKind,
    pub items: Vec<String>,
}

impl Frontier {
    pub fn queue(items: Vec<String>) -> Self {
        Self {
            kind: FrontierKind::Queue,
            items,
        }
    }

    pub fn stack(items: Vec<String>) -> Self {
        Self {
            kind: FrontierKind::Stack,
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// DFS edge classes. Forward edges in directed graphs are reported as `Cross`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Tree,
    Back,
    Cross,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EdgeKind::Tree => "tree",
            EdgeKind::Back => "back",
            EdgeKind::Cross => "cross",
        })
    }
}

/// Canonical key for a classified edge.
///
/// Undirected keys hold the endpoints in ascending order, so both scan
/// directions of one edge map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub from: String,
    pub to: String,
    pub directed: bool,
}

impl EdgeKey {
    pub fn new(from: &str, to: &str, directed: bool) -> Self {
        let (from, to) = if directed || from <= to {
            (from, to)
        } else {
            (to, from)
        };
        Self {
            from: from.to_string(),
            to: to.to_string(),
            directed,
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.directed { "->" } else { "--" };
        write!(f, "{}{}{}", self.from, arrow, self.to)
    }
}

// Serialized as its display string so classification maps stay JSON objects.
impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalKind {
    Bfs,
    Dfs,
}

/// Kosaraju phase: forward finishing pass, then transpose collection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SccPhase {
    Finishing,
    Collecting,
}

/// Algorithm-specific part of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum SnapshotDetail {
    Traversal {
        kind: TraversalKind,
    },
    Topological {
        /// Ordering produced so far by popping the finish stack.
        ordering: Vec<String>,
    },
    Scc {
        phase: SccPhase,
        /// Completed groups so far.
        group_count: usize,
    },
}

/// Algorithm state at one discrete point of a run.
///
/// Every snapshot owns its data; nothing is shared with the engine or with
/// other snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Labels discovered or finished so far, in id order.
    pub visited: Vec<String>,
    /// Labels in first-visit order.
    pub visit_order: Vec<String>,
    pub frontier: Frontier,
    /// The edge under examination, if any.
    pub active_edge: Option<(String, String)>,
    /// BFS level, DFS depth, or topological rank.
    pub node_annotations: BTreeMap<String, usize>,
    pub edge_classification: BTreeMap<EdgeKey, EdgeKind>,
    /// SCC group ids. The group being formed carries the provisional id.
    pub group_assignment: BTreeMap<String, usize>,
    /// Traversal trees started so far.
    pub component_count: usize,
    pub message: String,
    pub detail: SnapshotDetail,
}

/// Why a run ended early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AbortReason {
    /// A gray node was reached again through `from -> to`; no ordering exists.
    CycleDetected { from: String, to: String },
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::CycleDetected { from, to } => {
                write!(f, "cycle detected at {} -> {}", from, to)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Aborted(AbortReason),
}

/// Finished, immutable output of one engine invocation.
///
/// Always holds at least one snapshot. Index with [`Run::snapshot_at`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    snapshots: Vec<Snapshot>,
    status: RunStatus,
}

impl Run {
    pub(crate) fn new(snapshots: Vec<Snapshot>, status: RunStatus) -> Self {
        assert!(!snapshots.is_empty(), "a run must hold at least one snapshot");
        Self { snapshots, status }
    }

    /// Snapshot `i`. Panics if `i >= len()`.
    pub fn snapshot_at(&self, i: usize) -> &Snapshot {
        assert!(
            i < self.snapshots.len(),
            "snapshot index {} out of range for run of length {}",
            i,
            self.snapshots.len()
        );
        &self.snapshots[i]
    }

    pub fn get(&self, i: usize) -> Option<&Snapshot> {
        self.snapshots.get(i)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// The terminal snapshot.
    pub fn last(&self) -> &Snapshot {
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Final topological ordering. `None` for other algorithms and for
    /// aborted runs.
    pub fn ordering(&self) -> Option<&[String]> {
        match (&self.status, &self.last().detail) {
            (RunStatus::Completed, SnapshotDetail::Topological { ordering }) => {
                Some(ordering.as_slice())
            }
            _ => None,
        }
    }

    /// Final SCC partition, one label list per group in group-id order.
    /// Empty for non-SCC runs.
    pub fn groups(&self) -> Vec<Vec<String>> {
        let last = self.last();
        let SnapshotDetail::Scc { group_count, .. } = &last.detail else {
            return Vec::new();
        };
        let mut groups = vec![Vec::new(); *group_count];
        for (label, &group) in &last.group_assignment {
            if let Some(members) = groups.get_mut(group) {
                members.push(label.clone());
            }
        }
        groups
    }
}

impl<'a> IntoIterator for &'a Run {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Shared snapshot bookkeeping for the engines: label lookups plus the
/// accumulated edge classification.
pub(crate) struct Recorder<'a> {
    labels: &'a [String],
    directed: bool,
    classification: BTreeMap<EdgeKey, EdgeKind>,
    snapshots: Vec<Snapshot>,
}

impl<'a> Recorder<'a> {
    pub(crate) fn new(labels: &'a [String], directed: bool) -> Self {
        Self {
            labels,
            directed,
            classification: BTreeMap::new(),
            snapshots: Vec::new(),
        }
    }

    pub(crate) fn label(&self, id: usize) -> &'a str {
        &self.labels[id]
    }

    pub(crate) fn labels_of(&self, ids: impl IntoIterator<Item = usize>) -> Vec<String> {
        ids.into_iter().map(|id| self.labels[id].clone()).collect()
    }

    /// Labels of every id where `pred` holds, in id order.
    pub(crate) fn labels_where(&self, pred: impl Fn(usize) -> bool) -> Vec<String> {
        self.labels_of((0..self.labels.len()).filter(|&id| pred(id)))
    }

    /// `label -> value` for every id with a value.
    pub(crate) fn annotations(&self, values: &[Option<usize>]) -> BTreeMap<String, usize> {
        values
            .iter()
            .enumerate()
            .filter_map(|(id, v)| v.map(|v| (self.labels[id].clone(), v)))
            .collect()
    }

    pub(crate) fn edge_key(&self, u: usize, v: usize) -> EdgeKey {
        EdgeKey::new(&self.labels[u], &self.labels[v], self.directed)
    }

    pub(crate) fn edge(&self, u: usize, v: usize) -> (String, String) {
        (self.labels[u].clone(), self.labels[v].clone())
    }

    /// Record `kind` for the edge unless it already has a class.
    /// Returns whether a new entry was added.
    pub(crate) fn classify(&mut self, u: usize, v: usize, kind: EdgeKind) -> bool {
        let key = self.edge_key(u, v);
        if self.classification.contains_key(&key) {
            return false;
        }
        self.classification.insert(key, kind);
        true
    }

    pub(crate) fn classification(&self) -> BTreeMap<EdgeKey, EdgeKind> {
        self.classification.clone()
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub(crate) fn finish(self, status: RunStatus) -> Run {
        Run::new(self.snapshots, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(message: &str) -> Snapshot {
        Snapshot {
            visited: Vec::new(),
            visit_order: Vec::new(),
            frontier: Frontier::queue(Vec::new()),
            active_edge: None,
            node_annotations: BTreeMap::new(),
            edge_classification: BTreeMap::new(),
            group_assignment: BTreeMap::new(),
            component_count: 0,
            message: message.to_string(),
            detail: SnapshotDetail::Traversal {
                kind: TraversalKind::Bfs,
            },
        }
    }

    #[test]
    fn test_edge_key_undirected_canonical() {
        assert_eq!(EdgeKey::new("B", "A", false), EdgeKey::new("A", "B", false));
        assert_eq!(EdgeKey::new("B", "A", false).to_string(), "A--B");
    }

    #[test]
    fn test_edge_key_directed_keeps_order() {
        assert_ne!(EdgeKey::new("B", "A", true), EdgeKey::new("A", "B", true));
        assert_eq!(EdgeKey::new("B", "A", true).to_string(), "B->A");
    }

    #[test]
    fn test_recorder_classifies_once() {
        let labels = vec!["A".to_string(), "B".to_string()];
        let mut rec = Recorder::new(&labels, false);
        assert!(rec.classify(0, 1, EdgeKind::Tree));
        assert!(!rec.classify(1, 0, EdgeKind::Back));
        assert_eq!(
            rec.classification().get(&EdgeKey::new("A", "B", false)),
            Some(&EdgeKind::Tree)
        );
    }

    #[test]
    fn test_snapshot_at_repeatable() {
        let run = Run::new(vec![snapshot("one"), snapshot("two")], RunStatus::Completed);
        let first = run.snapshot_at(1).clone();
        let _ = run.snapshot_at(0);
        assert_eq!(run.snapshot_at(1), &first);
        assert_eq!(run.len(), 2);
        assert_eq!(run.last().message, "two");
        assert!(run.get(2).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_snapshot_at_out_of_range() {
        let run = Run::new(vec![snapshot("only")], RunStatus::Completed);
        run.snapshot_at(1);
    }

    #[test]
    fn test_serialize_edge_classification_as_object() {
        let mut snap = snapshot("x");
        snap.edge_classification
            .insert(EdgeKey::new("A", "B", true), EdgeKind::Back);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["edge_classification"]["A->B"], "back");
        assert_eq!(json["frontier"]["kind"], "queue");
        assert_eq!(json["detail"]["algorithm"], "traversal");
    }

    #[test]
    fn test_abort_reason_display() {
        let reason = AbortReason::CycleDetected {
            from: "C".to_string(),
            to: "A".to_string(),
        };
        assert_eq!(reason.to_string(), "cycle detected at C -> A");
    }

    #[test]
    fn test_run_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Run>();
    }
}
