use std::fmt::Write as _;

use graph_step_core::{FrontierKind, Run, RunStatus, Snapshot, SnapshotDetail};

/// One text block per snapshot: step number, message, then the non-empty
/// parts of the state.
pub fn snapshot_text(step: usize, snap: &Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", step, snap.message);

    let kind = match snap.frontier.kind {
        FrontierKind::Queue => "queue",
        FrontierKind::Stack => "stack",
    };
    let _ = writeln!(out, "    {}: [{}]", kind, snap.frontier.items.join(", "));

    if let Some((from, to)) = &snap.active_edge {
        let _ = writeln!(out, "    active: {} -> {}", from, to);
    }
    if !snap.visited.is_empty() {
        let _ = writeln!(out, "    visited: [{}]", snap.visited.join(", "));
    }
    if !snap.node_annotations.is_empty() {
        let _ = writeln!(out, "    annotations: {}", pairs(&snap.node_annotations));
    }
    if !snap.edge_classification.is_empty() {
        let _ = writeln!(out, "    edges: {}", pairs(&snap.edge_classification));
    }
    if !snap.group_assignment.is_empty() {
        let _ = writeln!(out, "    groups: {}", pairs(&snap.group_assignment));
    }
    if let SnapshotDetail::Topological { ordering } = &snap.detail {
        if !ordering.is_empty() {
            let _ = writeln!(out, "    ordering: [{}]", ordering.join(", "));
        }
    }
    out
}

/// Whole run as text, followed by a status line.
pub fn run_text(run: &Run) -> String {
    let mut out: String = run
        .iter()
        .enumerate()
        .map(|(i, snap)| snapshot_text(i, snap))
        .collect();
    let _ = writeln!(out, "{}", status_line(run.status()));
    out
}

pub fn status_line(status: &RunStatus) -> String {
    match status {
        RunStatus::Completed => "status: completed".to_string(),
        RunStatus::Aborted(reason) => format!("status: aborted ({})", reason),
    }
}

fn pairs<K: std::fmt::Display, V: std::fmt::Display>(
    map: &std::collections::BTreeMap<K, V>,
) -> String {
    let items: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{{{}}}", items.join(", "))
}
