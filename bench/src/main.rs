use graph_step_core::{Algorithm, Graph, RunStatus};
use std::collections::VecDeque;
use std::time::Instant;

type Edges = Vec<(String, String)>;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200);

    if mode == "help" || mode == "--help" {
        println!("Usage: graph-step-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Branching tree (acyclic when directed)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense clusters connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default node_count: 200");
        println!("Every run keeps one snapshot per step, so memory grows with");
        println!("steps x nodes. Keep node_count in the low thousands.");
        return;
    }

    println!("graph-step-bench");
    println!("================");
    println!();

    let generators: Vec<(&str, fn(u64) -> Edges)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> Edges),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Edges, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let edges = generator(node_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.1}ms: {} edges",
        gen_time.as_secs_f64() * 1000.0,
        edges.len()
    );

    let undirected = Graph::from_edges(edges.iter().cloned(), false);
    let directed = Graph::from_edges(edges, true);

    println!();
    println!(
        "{:>6} {:>10} {:>10} {:>10} {:>10}",
        "algo", "mode", "snapshots", "result", "time"
    );
    println!("{:->6} {:->10} {:->10} {:->10} {:->10}", "", "", "", "", "");

    for algorithm in Algorithm::ALL {
        let graphs = if algorithm.requires_directed() {
            vec![&directed]
        } else {
            vec![&undirected, &directed]
        };
        for graph in graphs {
            let t = Instant::now();
            let run = match graph_step_core::run(graph, algorithm, None) {
                Ok(run) => run,
                Err(e) => {
                    eprintln!("{} failed: {}", algorithm, e);
                    continue;
                }
            };
            let elapsed = t.elapsed();
            let result = match run.status() {
                RunStatus::Completed if algorithm == Algorithm::Scc => {
                    format!("{} groups", run.groups().len())
                }
                RunStatus::Completed => format!("{} comps", run.last().component_count),
                RunStatus::Aborted(_) => "cycle".to_string(),
            };
            println!(
                "{:>6} {:>10} {:>10} {:>10} {:>8.1}ms",
                algorithm,
                if graph.is_directed() { "directed" } else { "undirected" },
                run.len(),
                result,
                elapsed.as_secs_f64() * 1000.0
            );
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, edge lists over labels c_<i>
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn label(id: u64) -> String {
    format!("c_{}", id)
}

fn edge(from: u64, to: u64) -> (String, String) {
    (label(from), label(to))
}

/// Branching tree: each node spawns 3 children. Parent-to-child edges only,
/// so the directed version always has a topological order.
fn gen_lsystem(node_count: u64) -> Edges {
    let branching = 3u64;
    let mut edges = Vec::with_capacity(node_count as usize);
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                edges.push(edge(parent, child));
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    edges
}

/// Scale-free via edge-list sampling.
///
/// Preferential attachment by picking a random existing edge endpoint.
/// Nodes with more edges are more likely to be picked.
fn gen_scale_free(node_count: u64) -> Edges {
    let edges_per_node = 3u64;
    let mut edges = Vec::with_capacity((node_count * edges_per_node) as usize);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    let seed = 4u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push(edge(i, j));
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            if endpoints.is_empty() {
                break;
            }
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_node {
                edges.push(edge(new_node, target));
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    edges
}

/// Small-world (Watts-Strogatz): ring lattice with random rewiring.
fn gen_small_world(node_count: u64) -> Edges {
    let k = 2u64;
    let p = 0.1f64;
    let mut edges = Vec::with_capacity((node_count * k) as usize);
    let mut rng = FastRng::new(67890);

    if node_count < 2 {
        return edges;
    }
    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let target = if rng.next_f64() < p {
                rng.next(node_count)
            } else {
                neighbor
            };
            if target != i {
                edges.push(edge(i, target));
            }
        }
    }

    edges
}

/// Erdos-Renyi: about 3 uniform random edges per node.
fn gen_random(node_count: u64) -> Edges {
    let target_edges = node_count * 3;
    let mut edges = Vec::with_capacity(target_edges as usize);
    let mut rng = FastRng::new(54321);

    if node_count == 0 {
        return edges;
    }
    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            edges.push(edge(from, to));
        }
    }

    edges
}

/// Barbell: two dense clusters joined by a chain of bridge nodes.
fn gen_barbell(node_count: u64) -> Edges {
    let bridge_len = 10u64.min(node_count / 3);
    let cluster = (node_count - bridge_len) / 2;
    let mut edges = Vec::new();
    let mut rng = FastRng::new(99999);

    let mut add_cluster = |edges: &mut Edges, base: u64| {
        for i in 0..cluster {
            for _ in 0..4u64.min(cluster.saturating_sub(1)) {
                let target = rng.next(cluster);
                if target != i {
                    edges.push(edge(base + i, base + target));
                }
            }
        }
    };

    add_cluster(&mut edges, 0);

    let bridge_start = cluster;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        if id > 0 {
            edges.push(edge(id - 1, id));
        }
    }

    let b_start = bridge_start + bridge_len;
    if cluster > 0 && b_start > 0 {
        edges.push(edge(b_start - 1, b_start));
    }
    add_cluster(&mut edges, b_start);

    edges
}

/// DLA: each new node attaches to a recent surface node, with occasional
/// second connections that close loops.
fn gen_dla(node_count: u64) -> Edges {
    let mut edges = Vec::with_capacity((node_count * 2) as usize);
    let mut rng = FastRng::new(77777);

    let surface_max = 64usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        edges.push(edge(new_node, attach_to));

        // 10% chance of a second connection
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                edges.push(edge(other, new_node));
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    edges
}
