use std::fmt;

use serde::Serialize;

use crate::graph::{Adjacency, Graph, LabelIndex};

/// Dense 0/1 adjacency matrix with its label header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjacencyMatrix {
    pub labels: Vec<String>,
    /// `cells[i][j] == 1` when an edge `labels[i] -> labels[j]` exists.
    pub cells: Vec<Vec<u8>>,
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.labels.iter().map(String::len).max().unwrap_or(1);
        write!(f, "{:>width$}", "", width = width)?;
        for label in &self.labels {
            write!(f, " {:>width$}", label, width = width)?;
        }
        writeln!(f)?;
        for (label, row) in self.labels.iter().zip(&self.cells) {
            write!(f, "{:>width$}", label, width = width)?;
            for cell in row {
                write!(f, " {:>width$}", cell, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Adjacency matrix of `graph`; symmetric when the graph is undirected.
/// Edges with undeclared endpoints are skipped.
pub fn adjacency_matrix(graph: &Graph) -> AdjacencyMatrix {
    let index = LabelIndex::from_graph(graph);
    let n = index.len();
    let mut cells = vec![vec![0u8; n]; n];

    for (from, to) in graph.edges() {
        if let (Some(u), Some(v)) = (index.get(from), index.get(to)) {
            cells[u][v] = 1;
            if !graph.is_directed() {
                cells[v][u] = 1;
            }
        }
    }

    AdjacencyMatrix {
        labels: index.labels().to_vec(),
        cells,
    }
}

/// One `label -> [neighbors]` line per node, in label order.
pub fn adjacency_list_text(graph: &Graph) -> String {
    let index = LabelIndex::from_graph(graph);
    let adj = Adjacency::build(graph, &index);

    (0..index.len())
        .map(|id| {
            let neighbors: Vec<&str> = adj.neighbors(id).iter().map(|&v| index.label(v)).collect();
            format!("{} -> [{}]", index.label(id), neighbors.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_undirected_symmetric() {
        let g = Graph::from_edges([("A", "B"), ("B", "C")], false);
        let m = adjacency_matrix(&g);
        assert_eq!(m.labels, ["A", "B", "C"]);
        assert_eq!(m.cells, vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn test_matrix_directed() {
        let g = Graph::from_edges([("B", "A")], true);
        let m = adjacency_matrix(&g);
        assert_eq!(m.cells, vec![vec![0, 0], vec![1, 0]]);
        assert_eq!(m.to_string(), "  A B\nA 0 0\nB 1 0\n");
    }

    #[test]
    fn test_list_text() {
        let g = Graph::from_edges([("A", "C"), ("A", "B"), ("B", "C")], true);
        assert_eq!(adjacency_list_text(&g), "A -> [B, C]\nB -> [C]\nC -> []");
    }

    #[test]
    fn test_list_text_undirected() {
        let g = Graph::from_edges([("A", "B")], false);
        assert_eq!(adjacency_list_text(&g), "A -> [B]\nB -> [A]");
    }
}
