//! All-pairs shortest paths.

use std::fmt;

use nalgebra::DMatrix;
use tracing::trace;

use crate::{edge::NodeId, graph::Graph};

/// Internal stand-in for "no path", larger than any real path length in a supported network.
///
/// It only lives inside the matrix so the relaxation can stay plain integer arithmetic; it is
/// never handed out as a number, see [`Distance`].
pub const INFINITY: u32 = 99_999;

/// The shortest-path distance between two nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    /// The number of edges on a shortest path.
    Finite(u32),
    /// No path exists.
    Unreachable,
}

impl Distance {
    fn from_raw(raw: u32) -> Self {
        if raw >= INFINITY {
            Distance::Unreachable
        } else {
            Distance::Finite(raw)
        }
    }

    pub fn finite(self) -> Option<u32> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Distance::Finite(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Unreachable => f.write_str("infinity"),
        }
    }
}

/// The square, symmetric matrix of shortest-path distances between every pair of nodes, rows
/// and columns indexed by node id.
///
/// It is a snapshot: it is recomputed in full from a [`Graph`] and never updated incrementally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMatrix {
    matrix: DMatrix<u32>,
}

impl DistanceMatrix {
    /// Solves all-pairs shortest paths with Floyd-Warshall relaxation, in `O(n³)` for `n` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    /// use smallworld::paths::{Distance, DistanceMatrix};
    ///
    /// let mut graph = Graph::new(4);
    /// graph.insert(Edge::new(0, 1));
    /// graph.insert(Edge::new(1, 2));
    ///
    /// let distances = DistanceMatrix::compute(&graph);
    ///
    /// assert_eq!(distances.get(0, 2), Distance::Finite(2));
    /// assert_eq!(distances.get(0, 3), Distance::Unreachable);
    /// ```
    pub fn compute(graph: &Graph) -> Self {
        let n = graph.population();

        // Start from the direct connections: 0 on the diagonal, 1 for neighbours and "no path"
        // everywhere else.
        let mut matrix = graph
            .adjacency_matrix()
            .map(|a| if a == 1 { 1 } else { INFINITY });
        matrix.fill_diagonal(0);

        for k in 0..n {
            for i in 0..n {
                let through_k = matrix[(i, k)];
                if through_k >= INFINITY {
                    continue;
                }

                for j in 0..n {
                    let candidate = through_k.saturating_add(matrix[(k, j)]);
                    if candidate < matrix[(i, j)] {
                        matrix[(i, j)] = candidate;
                    }
                }
            }
        }

        trace!(nodes = n, "solved all-pairs shortest paths");

        Self { matrix }
    }

    /// Returns the number of nodes covered by the matrix.
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Returns the distance from `source` to `target`.
    ///
    /// # Panics
    ///
    /// Panics if either node lies outside the matrix.
    pub fn get(&self, source: NodeId, target: NodeId) -> Distance {
        Distance::from_raw(self.matrix[(source, target)])
    }

    /// Returns the distances from `node` to every node, itself included, ordered by node id.
    ///
    /// # Panics
    ///
    /// Panics if `node` lies outside the matrix.
    pub fn row(&self, node: NodeId) -> impl Iterator<Item = Distance> + '_ {
        (0..self.len()).map(move |target| self.get(node, target))
    }

    /// Whether every node can reach every other node.
    pub fn is_connected(&self) -> bool {
        self.matrix.iter().all(|&d| d < INFINITY)
    }

    /// Exposes the raw matrix, where unreachable pairs hold [`INFINITY`].
    pub fn raw(&self) -> &DMatrix<u32> {
        &self.matrix
    }
}
