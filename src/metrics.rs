//! Clustering coefficient, average path length and per-node highlighting.
//!
//! Everything here is a pure function of a [`Graph`] and its [`DistanceMatrix`]: computing the
//! same metrics twice on an unchanged graph gives bit-identical results.

use std::fmt;

use itertools::Itertools;

use crate::{
    edge::NodeId,
    graph::Graph,
    paths::{DistanceMatrix, INFINITY},
};

/// Formats a metric the way it is presented: fixed, four decimals.
///
/// # Examples
///
/// ```
/// use smallworld::metrics::fixed;
///
/// assert_eq!(fixed(0.5), "0.5000");
/// assert_eq!(fixed(5.0 / 3.0), "1.6667");
/// ```
pub fn fixed(value: f64) -> String {
    format!("{value:.4}")
}

/// Local and global clustering coefficients of a graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    global: f64,
    local: Vec<Option<f64>>,
}

impl Clustering {
    /// Computes the coefficients of every node and their mean.
    ///
    /// Nodes with at most one neighbour have no local coefficient and are left out of the mean.
    /// If no node has two neighbours the global coefficient is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::lattice::ring_lattice;
    /// use smallworld::metrics::Clustering;
    ///
    /// let clustering = Clustering::compute(&ring_lattice(10));
    ///
    /// assert_eq!(clustering.global(), 0.5);
    /// assert_eq!(clustering.local(3), Some(0.5));
    /// ```
    pub fn compute(graph: &Graph) -> Self {
        let local: Vec<Option<f64>> = graph
            .nodes()
            .map(|node| local_clustering(graph, node))
            .collect();

        let social: Vec<f64> = local.iter().flatten().copied().collect();
        let global = if social.is_empty() {
            0.0
        } else {
            social.iter().sum::<f64>() / social.len() as f64
        };

        Self { global, local }
    }

    pub fn global(&self) -> f64 {
        self.global
    }

    /// Returns the cached coefficient of `node`, `None` if it has fewer than two neighbours.
    pub fn local(&self, node: NodeId) -> Option<f64> {
        self.local.get(node).copied().flatten()
    }

    pub fn formatted(&self) -> String {
        fixed(self.global)
    }
}

/// The fraction of pairs of `node`'s neighbours that are themselves connected.
///
/// Returns `None` for nodes with at most one neighbour. Runs in `O(k² log k)` for degree `k`.
pub fn local_clustering(graph: &Graph, node: NodeId) -> Option<f64> {
    let k = graph.degree(node);
    if k <= 1 {
        return None;
    }

    // Edges are unique, so counting connected neighbour pairs counts the edges inside the
    // neighbourhood.
    let hood: Vec<NodeId> = graph.neighbors(node).collect();
    let links = hood
        .iter()
        .tuple_combinations()
        .filter(|&(&a, &b)| graph.are_adjacent(a, b))
        .count();

    Some(2.0 * links as f64 / (k * (k - 1)) as f64)
}

/// The mean shortest-path distance over all ordered pairs of distinct nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AveragePathLength {
    Finite(f64),
    /// At least one pair of nodes can't reach each other, so there is no meaningful average.
    Unreachable,
}

impl AveragePathLength {
    /// Averages the distances of a connected graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::lattice::ring_lattice;
    /// use smallworld::metrics::AveragePathLength;
    /// use smallworld::paths::DistanceMatrix;
    ///
    /// let distances = DistanceMatrix::compute(&ring_lattice(4));
    ///
    /// assert_eq!(AveragePathLength::compute(&distances), AveragePathLength::Finite(1.0));
    /// ```
    pub fn compute(distances: &DistanceMatrix) -> Self {
        let n = distances.len();
        let raw = distances.raw();

        let connected_pairs = (0..n)
            .cartesian_product(0..n)
            .filter(|&(i, j)| i != j && raw[(i, j)] < INFINITY)
            .count();

        if connected_pairs != n * n.saturating_sub(1) || connected_pairs == 0 {
            return AveragePathLength::Unreachable;
        }

        // The diagonal is all zeroes, so summing the whole matrix sums the off-diagonal pairs.
        let total: u64 = raw.iter().map(|&d| u64::from(d)).sum();

        AveragePathLength::Finite(total as f64 / connected_pairs as f64)
    }

    pub fn value(self) -> Option<f64> {
        match self {
            AveragePathLength::Finite(apl) => Some(apl),
            AveragePathLength::Unreachable => None,
        }
    }

    pub fn is_unreachable(self) -> bool {
        self == AveragePathLength::Unreachable
    }
}

impl fmt::Display for AveragePathLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AveragePathLength::Finite(apl) => write!(f, "{apl:.4}"),
            AveragePathLength::Unreachable => f.write_str("infinity"),
        }
    }
}

/// How a node relates to the selected node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeHighlight {
    Selected,
    Neighbor,
    None,
}

/// How an edge relates to the selected node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeHighlight {
    /// The edge touches the selected node.
    Neighbor,
    /// Both ends are neighbours of the selected node, closing a triangle with it.
    SecondOrder,
    None,
}

/// The local view of the network around one selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlight {
    /// The selected node.
    pub node: NodeId,
    /// The selected node's cached local clustering coefficient.
    pub clustering_coefficient: Option<f64>,
    /// Mean distance to the nodes reachable from the selected node, itself included.
    pub average_path_length: f64,
    /// How many nodes are reachable from the selected node, itself included.
    pub reachable: usize,
    /// The class of every node, indexed by node id.
    pub nodes: Vec<NodeHighlight>,
    /// The class of every edge, in the order of [`Graph::edges`].
    pub edges: Vec<EdgeHighlight>,
}

impl Highlight {
    /// Classifies the network relative to `node`.
    ///
    /// Only nodes with at least one neighbour can be selected; `None` is returned otherwise, or
    /// if `node` isn't part of the graph.
    pub fn compute(
        graph: &Graph,
        distances: &DistanceMatrix,
        clustering: &Clustering,
        node: NodeId,
    ) -> Option<Self> {
        if !graph.contains_node(node) || graph.degree(node) == 0 {
            return None;
        }

        let reachable: Vec<u32> = distances.row(node).filter_map(|d| d.finite()).collect();
        let average_path_length =
            reachable.iter().map(|&d| f64::from(d)).sum::<f64>() / reachable.len() as f64;

        let nodes = graph
            .nodes()
            .map(|other| {
                if other == node {
                    NodeHighlight::Selected
                } else if graph.are_adjacent(node, other) {
                    NodeHighlight::Neighbor
                } else {
                    NodeHighlight::None
                }
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .map(|edge| {
                if edge.contains(node) {
                    EdgeHighlight::Neighbor
                } else if graph.are_adjacent(node, edge.source())
                    && graph.are_adjacent(node, edge.target())
                {
                    EdgeHighlight::SecondOrder
                } else {
                    EdgeHighlight::None
                }
            })
            .collect();

        Some(Self {
            node,
            clustering_coefficient: clustering.local(node),
            average_path_length,
            reachable: reachable.len(),
            nodes,
            edges,
        })
    }

    /// A one-line description of the selected node's local metrics.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clustering = self
            .clustering_coefficient
            .map_or_else(|| "undefined".to_owned(), fixed);

        write!(
            f,
            "clustering coefficient = {clustering} and average path length = {} for {} nodes.",
            fixed(self.average_path_length),
            self.reachable
        )
    }
}
