//! Helpers shared by the unit tests of this crate

use itertools::Itertools;
use rand::Rng;

use crate::prelude::*;

/// Creates a graph with the given nodes (in this order) and arcs given by names.
/// ** Panics if any node or arc is rejected **
pub(crate) fn graph_from_arcs<'a, N, A>(names: N, arcs: A) -> Graph
where
    N: IntoIterator<Item = &'a str>,
    A: IntoIterator<Item = (&'a str, &'a str, Weight)>,
{
    let mut graph = Graph::new();
    for name in names {
        graph.add_node(name).unwrap();
    }
    for (u, v, w) in arcs {
        graph.set_arc(u, v, w).unwrap();
    }
    graph
}

/// Creates a graph with `n` default-named nodes at random positions where each possible arc
/// exists with probability `p` and has a weight in `1..100`
pub(crate) fn random_graph<R: Rng>(rng: &mut R, n: NumNodes, p: f64) -> Graph {
    let mut graph = Graph::new();
    for _ in 0..n {
        let position = Position::new(rng.random_range(-100.0..100.0), rng.random());
        graph.add_node_at("", position).unwrap();
    }

    let nodes = graph.node_list().to_vec();
    for (&u, &v) in nodes.iter().cartesian_product(nodes.iter()) {
        if u != v && rng.random_bool(p) {
            graph.set_arc(u, v, rng.random_range(1..100)).unwrap();
        }
    }
    graph
}

/// All arcs as sorted `(start name, end name, weight)` triples.
/// Allows comparing graphs whose handles differ.
pub(crate) fn named_arcs<G: GraphArcOrder>(graph: &G) -> Vec<(String, String, Weight)> {
    graph
        .arcs()
        .map(|arc| {
            (
                graph.name_of(arc.start).unwrap().to_string(),
                graph.name_of(arc.end).unwrap().to_string(),
                arc.weight,
            )
        })
        .sorted()
        .collect_vec()
}

/// All nodes as `(name, position)` pairs in insertion order
pub(crate) fn named_nodes<G: GraphNodeOrder>(graph: &G) -> Vec<(String, Position)> {
    graph
        .nodes()
        .map(|(_, node)| (node.name().to_string(), node.position()))
        .collect_vec()
}

/// Asserts that the cached degrees of every node match the arcs of the graph
pub(crate) fn assert_degrees_consistent<G: GraphArcOrder>(graph: &G) {
    for (u, node) in graph.nodes() {
        assert_eq!(
            node.out_degree() as usize,
            graph.out_arcs_of(u).count(),
            "out-degree of {}",
            node.name()
        );
        assert_eq!(
            node.in_degree() as usize,
            graph.in_arcs_of(u).count(),
            "in-degree of {}",
            node.name()
        );
    }
    assert!(
        graph
            .arcs()
            .all(|arc| graph.has_node(arc.start) && graph.has_node(arc.end) && !arc.is_loop())
    );
}
