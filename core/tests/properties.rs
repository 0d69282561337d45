//! Property tests over random small graphs.

use std::collections::{BTreeMap, BTreeSet};

use graph_step_core::{
    run, run_dfs, run_scc, run_topological_sort, Algorithm, EdgeKind, Graph, RunStatus,
};
use proptest::prelude::*;

fn edge_list(max_nodes: u8, max_edges: usize) -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((0..max_nodes, 0..max_nodes), 0..max_edges).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(a, b)| (format!("n{}", a), format!("n{}", b)))
            .collect()
    })
}

fn graph_strategy() -> impl Strategy<Value = Graph> {
    (edge_list(8, 20), any::<bool>()).prop_map(|(edges, directed)| Graph::from_edges(edges, directed))
}

fn directed_strategy() -> impl Strategy<Value = Graph> {
    edge_list(8, 20).prop_map(|edges| Graph::from_edges(edges, true))
}

fn first_node(graph: &Graph) -> Option<String> {
    graph.nodes().first().cloned()
}

proptest! {
    #[test]
    fn prop_runs_are_deterministic(graph in graph_strategy()) {
        let start = first_node(&graph);
        for algorithm in Algorithm::ALL {
            if algorithm.requires_directed() && !graph.is_directed() {
                continue;
            }
            let a = run(&graph, algorithm, start.as_deref()).unwrap();
            let b = run(&graph, algorithm, start.as_deref()).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert!(!a.is_empty());
        }
    }

    #[test]
    fn prop_traversals_partition_nodes(graph in graph_strategy()) {
        let start = graph.nodes().last().cloned();
        for algorithm in [Algorithm::Bfs, Algorithm::Dfs] {
            let run = run(&graph, algorithm, start.as_deref()).unwrap();
            let last = run.last();
            let order: BTreeSet<&String> = last.visit_order.iter().collect();
            // Every node visited exactly once across all components.
            prop_assert_eq!(order.len(), last.visit_order.len());
            prop_assert_eq!(last.visit_order.len(), graph.node_count());
            prop_assert_eq!(&last.visited, &graph.nodes().to_vec());
            if let Some(start) = &start {
                prop_assert_eq!(&last.visit_order[0], start);
            }
            prop_assert!(last.component_count <= graph.node_count());
        }
    }

    #[test]
    fn prop_undirected_dfs_has_no_cross_edges(edges in edge_list(8, 24)) {
        let graph = Graph::from_edges(edges, false);
        let run = run_dfs(&graph, None).unwrap();
        for snap in &run {
            prop_assert!(snap.edge_classification.values().all(|&k| k != EdgeKind::Cross));
        }
    }

    #[test]
    fn prop_classification_is_monotone(graph in graph_strategy()) {
        let run = run_dfs(&graph, None).unwrap();
        for pair in run.snapshots().windows(2) {
            for (key, kind) in &pair[0].edge_classification {
                prop_assert_eq!(pair[1].edge_classification.get(key), Some(kind));
            }
        }
    }

    #[test]
    fn prop_topological_order_respects_edges(graph in directed_strategy()) {
        let run = run_topological_sort(&graph).unwrap();
        match run.status() {
            RunStatus::Completed => {
                let order = run.ordering().unwrap();
                prop_assert_eq!(order.len(), graph.node_count());
                let position: BTreeMap<&String, usize> =
                    order.iter().enumerate().map(|(i, l)| (l, i)).collect();
                for (u, v) in graph.edges() {
                    prop_assert!(position[u] < position[v]);
                }
            }
            RunStatus::Aborted(_) => {
                // A cycle exists: some SCC has two members or a self-loop.
                let groups = run_scc(&graph).unwrap().groups();
                let has_cycle = groups.iter().any(|g| g.len() > 1)
                    || graph.edges().iter().any(|(u, v)| u == v);
                prop_assert!(has_cycle);
                prop_assert!(run.ordering().is_none());
            }
        }
    }

    #[test]
    fn prop_scc_partition_with_acyclic_condensation(graph in directed_strategy()) {
        let run = run_scc(&graph).unwrap();
        let groups = run.groups();

        let mut group_of: BTreeMap<&str, usize> = BTreeMap::new();
        for (id, members) in groups.iter().enumerate() {
            prop_assert!(!members.is_empty());
            for label in members {
                prop_assert!(group_of.insert(label.as_str(), id).is_none());
            }
        }
        prop_assert_eq!(group_of.len(), graph.node_count());

        // Groups complete in topological order of the condensation.
        let mut condensed = Vec::new();
        for (u, v) in graph.edges() {
            let (gu, gv) = (group_of[u.as_str()], group_of[v.as_str()]);
            if gu != gv {
                prop_assert!(gu < gv);
                condensed.push((format!("g{}", gu), format!("g{}", gv)));
            }
        }
        let condensation = Graph::new(
            (0..groups.len()).map(|g| format!("g{}", g)),
            condensed,
            true,
        );
        prop_assert!(run_topological_sort(&condensation).unwrap().is_completed());
    }

    #[test]
    fn prop_snapshot_access_is_idempotent(graph in graph_strategy(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..10)) {
        let run = run(&graph, Algorithm::Dfs, None).unwrap();
        let copies: Vec<_> = run.iter().cloned().collect();
        for pick in picks.iter().rev().chain(picks.iter()) {
            let i = pick.index(run.len());
            prop_assert_eq!(run.snapshot_at(i), &copies[i]);
        }
    }
}

#[test]
fn bfs_levels_on_sample_graph() {
    let graph = Graph::from_edges(
        [("A", "B"), ("A", "C"), ("B", "D"), ("C", "E"), ("C", "F"), ("E", "F")],
        false,
    );
    let run = run(&graph, Algorithm::Bfs, Some("A")).unwrap();
    let expected: BTreeMap<String, usize> = [("A", 0), ("B", 1), ("C", 1), ("D", 2), ("E", 2), ("F", 2)]
        .into_iter()
        .map(|(l, v)| (l.to_string(), v))
        .collect();
    assert_eq!(run.last().node_annotations, expected);
}

#[test]
fn cycle_aborts_topological_sort() {
    let graph = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "A")], true);
    let run = run_topological_sort(&graph).unwrap();
    assert!(matches!(run.status(), RunStatus::Aborted(_)));
    assert!(run.ordering().is_none());
}

#[test]
fn scc_groups_for_triangle_with_tail() {
    let graph = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "A"), ("A", "D")], true);
    let run = run_scc(&graph).unwrap();
    assert_eq!(run.groups(), vec![vec!["A", "B", "C"], vec!["D"]]);
}
