//! A module for working with the graph store.

use std::{collections::BTreeSet, ops::Range};

use nalgebra::DMatrix;

use crate::edge::{Edge, NodeId};

/// An undirected graph over a fixed population of nodes.
///
/// Nodes are identified by `0..population` and never change for the lifetime of the store. Edges
/// are kept in insertion order, which random selection relies on to be reproducible for a given
/// seed, and the store guarantees there are no duplicate pairs, no self-loops and no edges
/// pointing outside the population.
#[derive(Clone, Debug)]
pub struct Graph {
    /// The number of nodes, fixed at construction.
    population: usize,
    /// The edges in the graph, in insertion order.
    edges: Vec<Edge>,
    /// A derived view of the edges: the neighbours of each node, indexed by node id.
    ///
    /// The use of a `BTreeSet` keeps neighbour iteration ordered by id, so computations are
    /// reproducible between runs.
    neighbors: Vec<BTreeSet<NodeId>>,
}

impl Graph {
    /// Creates a graph of `population` isolated nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::graph::Graph;
    ///
    /// let graph = Graph::new(5);
    /// assert_eq!(graph.population(), 5);
    /// assert_eq!(graph.edge_count(), 0);
    /// ```
    pub fn new(population: usize) -> Self {
        Self {
            population,
            edges: Vec::new(),
            neighbors: vec![BTreeSet::new(); population],
        }
    }

    pub fn population(&self) -> usize {
        self.population
    }

    /// Returns the node ids of the graph.
    pub fn nodes(&self) -> Range<NodeId> {
        0..self.population
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node < self.population
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Inserts an edge into the graph.
    ///
    /// Returns `false` and leaves the graph untouched if the edge is a self-loop, names a node
    /// outside the population or joins a pair that is already connected.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new(3);
    ///
    /// assert!(graph.insert(Edge::new(0, 1)));
    /// assert!(!graph.insert(Edge::new(1, 0)));
    /// assert!(!graph.insert(Edge::new(2, 2)));
    /// assert!(!graph.insert(Edge::new(2, 3)));
    /// ```
    pub fn insert(&mut self, edge: Edge) -> bool {
        let (a, b) = (edge.source(), edge.target());

        if edge.is_self_loop() || !self.contains_node(a) || !self.contains_node(b) {
            return false;
        }

        if !self.neighbors[a].insert(b) {
            return false;
        }
        self.neighbors[b].insert(a);
        self.edges.push(edge);

        true
    }

    /// Removes an edge from the graph and returns whether it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new(3);
    /// graph.insert(Edge::new(0, 1));
    ///
    /// assert_eq!(graph.remove(&Edge::new(1, 0)), true);
    /// assert_eq!(graph.remove(&Edge::new(0, 2)), false);
    /// ```
    pub fn remove(&mut self, edge: &Edge) -> bool {
        let Some(position) = self.edges.iter().position(|e| e == edge) else {
            return false;
        };

        let removed = self.edges.remove(position);
        self.neighbors[removed.source()].remove(&removed.target());
        self.neighbors[removed.target()].remove(&removed.source());

        true
    }

    /// Removes every edge, keeping the nodes.
    pub fn clear(&mut self) {
        self.edges.clear();
        for neighbors in &mut self.neighbors {
            neighbors.clear();
        }
    }

    /// Checks if the graph contains an edge joining the same pair of nodes.
    pub fn contains(&self, edge: &Edge) -> bool {
        self.are_adjacent(edge.source(), edge.target())
    }

    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors.get(a).map_or(false, |n| n.contains(&b))
    }

    /// Returns the neighbours of a node, ordered by id. Unknown nodes have no neighbours.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors.get(node).into_iter().flatten().copied()
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors.get(node).map_or(0, BTreeSet::len)
    }

    /// Whether `node` is already connected to every other node.
    pub fn is_saturated(&self, node: NodeId) -> bool {
        self.degree(node) >= self.population.saturating_sub(1)
    }

    /// Returns the edges still carrying their lattice flag, in insertion order.
    pub fn lattice_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|edge| !edge.is_rewired())
    }

    /// Whether some lattice edge has a source that can still take a new neighbour, that is
    /// whether a single-step rewire can still change the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::lattice::ring_lattice;
    ///
    /// assert!(ring_lattice(6).has_rewirable_edge());
    /// // Rings of up to five nodes are complete graphs.
    /// assert!(!ring_lattice(5).has_rewirable_edge());
    /// ```
    pub fn has_rewirable_edge(&self) -> bool {
        self.lattice_edges().any(|edge| !self.is_saturated(edge.source()))
    }

    /// Returns the nodes that are neither `node` nor one of its neighbours, ordered by id.
    ///
    /// Runs in `O(population)`.
    pub fn non_neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes()
            .filter(|&other| other != node && !self.are_adjacent(node, other))
            .collect()
    }

    /// Constructs the adjacency matrix for this graph, rows and columns indexed by node id.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new(2);
    /// graph.insert(Edge::new(0, 1));
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0, 1;
    ///              1, 0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<u32> {
        let n = self.population;
        let mut matrix = DMatrix::<u32>::zeros(n, n);

        // The graph is undirected so the matrix is symmetric, both triangles must be written for
        // each edge.
        for edge in &self.edges {
            let (i, j) = (edge.source(), edge.target());
            matrix[(i, j)] = 1;
            matrix[(j, i)] = 1;
        }

        matrix
    }
}
