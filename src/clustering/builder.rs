// src/clustering/builder.rs - Duplicate cluster construction
//
// Groups candidate names into clusters using both deterministic keys.
// Names sharing a word-set key OR a spaceless key are linked, and links
// compose transitively across key types: "touch panel", "panel touch" and
// "touchpanel" end up in one cluster even though no two of them share both
// keys at once. Modeled as connected components of an undirected graph
// whose nodes are the unique input names.

use log::debug;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;
use std::collections::HashMap;

use crate::keys::{spaceless_key, word_set_key};

/// Cluster `names` into groups of size >= 2. Total over any input; empty
/// input yields an empty result. Singletons are not emitted - they form
/// the residual set for the semantic matcher.
pub fn cluster_names(names: &[String]) -> Vec<Vec<String>> {
    if names.len() < 2 {
        return Vec::new();
    }

    // Arena of unique names; node identity is the name string.
    let mut graph: UnGraph<usize, ()> = UnGraph::new_undirected();
    let mut name_to_node: HashMap<&str, NodeIndex> = HashMap::new();
    let mut unique_names: Vec<&str> = Vec::new();
    for name in names {
        name_to_node.entry(name.as_str()).or_insert_with(|| {
            unique_names.push(name.as_str());
            graph.add_node(unique_names.len() - 1)
        });
    }

    let mut word_set_buckets: HashMap<String, Vec<NodeIndex>> = HashMap::new();
    let mut spaceless_buckets: HashMap<String, Vec<NodeIndex>> = HashMap::new();
    for name in &unique_names {
        let node = name_to_node[name];
        if let Some(key) = word_set_key(name) {
            word_set_buckets.entry(key).or_default().push(node);
        }
        if let Some(key) = spaceless_key(name) {
            spaceless_buckets.entry(key).or_default().push(node);
        }
    }

    // A simple path through each bucket fully connects it once components
    // are computed; no need for the quadratic edge set.
    for bucket in word_set_buckets.values().chain(spaceless_buckets.values()) {
        for pair in bucket.windows(2) {
            graph.update_edge(pair[0], pair[1], ());
        }
    }

    debug!(
        "Cluster graph: {} nodes, {} edges, {} components",
        graph.node_count(),
        graph.edge_count(),
        connected_components(&graph)
    );

    collect_components(&graph, &unique_names)
}

/// Breadth-first traversal from every unvisited node; components of size 1
/// are dropped. Members keep input encounter order, and clusters are
/// ordered by their earliest member, so output is reproducible.
fn collect_components(graph: &UnGraph<usize, ()>, unique_names: &[&str]) -> Vec<Vec<String>> {
    let mut visited = vec![false; graph.node_count()];
    let mut clusters: Vec<Vec<String>> = Vec::new();

    for start in graph.node_indices() {
        if visited[start.index()] {
            continue;
        }
        let mut member_positions: Vec<usize> = Vec::new();
        let mut bfs = Bfs::new(graph, start);
        while let Some(node) = bfs.next(graph) {
            if !visited[node.index()] {
                visited[node.index()] = true;
                member_positions.push(graph[node]);
            }
        }
        if member_positions.len() >= 2 {
            member_positions.sort_unstable();
            clusters.push(
                member_positions
                    .into_iter()
                    .map(|pos| unique_names[pos].to_string())
                    .collect(),
            );
        }
    }

    clusters
}
