//! A module for working with edges.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// Stable identity of a node, in `0..population`.
pub type NodeId = usize;

/// How an edge came to be part of the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Created by the initial ring construction.
    Lattice,
    /// Created by replacing a lattice edge with a random connection.
    Rewired,
}

/// A pair of nodes representing a network edge. Edges don't have a direction, despite the
/// `source`-`target` nomenclature used, though rewiring always keeps the `source` end fixed.
///
/// Two edges are equal when they join the same pair of nodes, whatever their [`EdgeKind`].
#[derive(Clone, Copy, Debug, Eq)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    kind: EdgeKind,
}

impl Edge {
    /// Creates a new lattice edge from two nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    ///
    /// let edge = Edge::new(0, 1);
    /// assert_eq!(edge, Edge::new(1, 0));
    /// assert!(!edge.is_rewired());
    /// ```
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            kind: EdgeKind::Lattice,
        }
    }

    /// Creates a new edge flagged as the product of rewiring.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::{Edge, EdgeKind};
    ///
    /// let edge = Edge::rewired(0, 5);
    /// assert_eq!(edge.kind(), EdgeKind::Rewired);
    /// ```
    pub fn rewired(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            kind: EdgeKind::Rewired,
        }
    }

    /// Returns the end of the edge that stays put when it is rewired.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Returns the second node forming the edge.
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn is_rewired(&self) -> bool {
        self.kind == EdgeKind::Rewired
    }

    /// Returns whether the edge contains the given node.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    ///
    /// let edge = Edge::new(3, 4);
    ///
    /// assert_eq!(edge.contains(3), true);
    /// assert_eq!(edge.contains(4), true);
    /// assert_eq!(edge.contains(5), false);
    /// ```
    pub fn contains(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// Returns the end opposite `node`, if `node` is one of the ends.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoints ordered from lowest to highest id.
    fn ordered(&self) -> (NodeId, NodeId) {
        match self.source.cmp(&self.target) {
            Ordering::Greater => (self.target, self.source),
            _ => (self.source, self.target),
        }
    }
}

//
// Trait implementations
//

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.ordered() == other.ordered()
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // This ensures the hash is the same for (a, b) as it is for (b, a).
        self.ordered().hash(state);
    }
}
