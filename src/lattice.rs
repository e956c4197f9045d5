//! Construction of the initial ring lattice.

use crate::{
    edge::{Edge, NodeId},
    graph::Graph,
};

/// How many clockwise neighbours each node is wired to.
pub const REACH: usize = 2;

/// Clears `graph` and wires every node to its [`REACH`] nearest clockwise neighbours.
///
/// Pairs that coincide modulo the population are only wired once, so a population of 3 yields a
/// triangle (3 edges) and a population of 4 the complete graph (6 edges). Every larger population
/// yields exactly `REACH * population` edges.
///
/// # Examples
///
/// ```
/// use smallworld::graph::Graph;
/// use smallworld::lattice::wire_lattice;
///
/// let mut graph = Graph::new(10);
/// wire_lattice(&mut graph);
///
/// assert_eq!(graph.edge_count(), 20);
/// assert!(graph.nodes().all(|n| graph.degree(n) == 4));
/// ```
pub fn wire_lattice(graph: &mut Graph) {
    graph.clear();

    let population = graph.population();
    for n in graph.nodes() {
        for step in 1..=REACH {
            graph.insert(Edge::new(n, clockwise(n, step, population)));
        }
    }
}

/// Builds a fresh ring lattice over `population` nodes.
pub fn ring_lattice(population: usize) -> Graph {
    let mut graph = Graph::new(population);
    wire_lattice(&mut graph);

    graph
}

fn clockwise(node: NodeId, step: usize, population: usize) -> NodeId {
    (node + step) % population
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn edge_counts() {
        assert_eq!(ring_lattice(3).edge_count(), 3);
        assert_eq!(ring_lattice(4).edge_count(), 6);

        for population in 5..40 {
            assert_eq!(ring_lattice(population).edge_count(), 2 * population);
        }
    }

    #[test]
    fn edges_are_unique_lattice_edges() {
        for population in 3..40 {
            let graph = ring_lattice(population);
            let unique: HashSet<Edge> = graph.edges().iter().copied().collect();

            assert_eq!(unique.len(), graph.edge_count());
            assert!(graph.edges().iter().all(|e| !e.is_self_loop()));
            assert!(graph.edges().iter().all(|e| !e.is_rewired()));
        }
    }

    #[test]
    fn small_rings_are_complete() {
        for population in [3, 4] {
            let graph = ring_lattice(population);
            assert!(graph.nodes().all(|n| graph.is_saturated(n)));
        }
    }

    #[test]
    fn wiring() {
        let graph = ring_lattice(6);

        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![1, 2, 4, 5]);
        assert!(graph.contains(&Edge::new(5, 1)));
        assert!(!graph.contains(&Edge::new(0, 3)));
    }

    #[test]
    fn rewiring_the_lattice_clears_first() {
        // 0 and 3 are three steps apart, never neighbours in a seven-node lattice.
        let mut graph = Graph::new(7);
        graph.insert(Edge::rewired(0, 3));

        wire_lattice(&mut graph);

        assert!(!graph.contains(&Edge::new(0, 3)));
        assert!(graph.edges().iter().all(|e| !e.is_rewired()));
        assert_eq!(graph.edge_count(), 14);
    }
}
