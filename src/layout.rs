//! Cosmetic placement of nodes for display. Nothing in the graph algorithms depends on it.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::edge::NodeId;

/// How far even-numbered nodes are pulled towards the centre, so neighbouring edges don't
/// overlap on screen.
pub const STAGGER: f64 = 0.5;

/// A position in the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Lays the nodes out clockwise on a circle of the given radius, starting at the top, with every
/// even-numbered node moved [`STAGGER`] units inwards. The result is indexed by node id.
///
/// # Examples
///
/// ```
/// use smallworld::layout::ring;
///
/// let points = ring(4, 10.0);
///
/// assert_eq!(points.len(), 4);
/// assert!((points[0].y - 9.5).abs() < 1e-9);
/// assert!((points[1].x - 10.0).abs() < 1e-9);
/// ```
pub fn ring(population: usize, radius: f64) -> Vec<Point> {
    (0..population)
        .map(|node| position(node, population, radius))
        .collect()
}

fn position(node: NodeId, population: usize, radius: f64) -> Point {
    let angle = FRAC_PI_2 - TAU * node as f64 / population as f64;
    let r = if node % 2 == 0 { radius - STAGGER } else { radius };

    Point {
        x: r * angle.cos(),
        y: r * angle.sin(),
    }
}
