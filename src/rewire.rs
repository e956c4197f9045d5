//! Rewiring of lattice edges into random connections.

use std::num::NonZeroUsize;

use tracing::{debug, instrument};

use crate::{
    edge::Edge,
    error::{Error, Result},
    graph::Graph,
    lattice::wire_lattice,
    paths::DistanceMatrix,
    rng::Chooser,
};

/// What a single-step rewire did to the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewireOutcome {
    /// `removed` was replaced by `added`, which shares its source.
    Rewired { removed: Edge, added: Edge },
    /// The chosen edge's source is already connected to every other node.
    Saturated { edge: Edge },
    /// No lattice edges are left to rewire.
    Exhausted,
}

impl RewireOutcome {
    pub fn is_rewired(&self) -> bool {
        matches!(self, RewireOutcome::Rewired { .. })
    }
}

/// Replaces one uniformly chosen lattice edge with a random edge from the same source.
///
/// The new target is chosen uniformly among the nodes the source isn't connected to yet. The
/// edge count never changes and the graph stays free of duplicates and self-loops.
///
/// # Examples
///
/// ```
/// use smallworld::lattice::ring_lattice;
/// use smallworld::rewire::rewire_one;
/// use smallworld::rng::SimRng;
///
/// let mut graph = ring_lattice(10);
/// let outcome = rewire_one(&mut graph, &mut SimRng::from_seed(1));
///
/// assert!(outcome.is_rewired());
/// assert_eq!(graph.edge_count(), 20);
/// assert_eq!(graph.lattice_edges().count(), 19);
/// ```
pub fn rewire_one<C: Chooser>(graph: &mut Graph, chooser: &mut C) -> RewireOutcome {
    let candidates: Vec<Edge> = graph.lattice_edges().copied().collect();
    let Some(&edge) = chooser.choose(&candidates) else {
        return RewireOutcome::Exhausted;
    };

    match replace(graph, edge, chooser) {
        Some(added) => {
            graph.remove(&edge);
            RewireOutcome::Rewired {
                removed: edge,
                added,
            }
        }
        None => RewireOutcome::Saturated { edge },
    }
}

/// Rebuilds the lattice and gives each lattice edge one chance, with the given probability, of
/// being rewired. Returns the number of edges rewired.
///
/// Replaced edges stay in place until the pass over the lattice is complete, so later edges
/// see the neighbourhoods as they were when the pass started plus the edges added so far.
pub fn rewire_pass<C: Chooser>(graph: &mut Graph, probability: f64, chooser: &mut C) -> usize {
    wire_lattice(graph);

    let lattice: Vec<Edge> = graph.edges().to_vec();
    let mut removals = Vec::new();

    for edge in lattice {
        if graph.is_saturated(edge.source()) || !chooser.chance(probability) {
            continue;
        }

        if replace(graph, edge, chooser).is_some() {
            removals.push(edge);
        }
    }

    for edge in &removals {
        graph.remove(edge);
    }

    removals.len()
}

/// The result of a successful [`rewire_all`].
#[derive(Clone, Debug)]
pub struct FullRewire {
    /// How many passes were needed to find a connected network.
    pub attempts: usize,
    /// How many edges the successful pass rewired.
    pub rewired: usize,
    /// The distances of the connected network, computed for the connectivity check.
    pub distances: DistanceMatrix,
}

/// Repeats [`rewire_pass`] until it produces a connected network.
///
/// Without `max_attempts` this never gives up, which for some parameter combinations means it
/// never returns.
///
/// # Errors
///
/// Returns [`Error::RewireAttemptsExhausted`] once `max_attempts` passes have all produced
/// disconnected networks. The graph then holds the last disconnected attempt.
#[instrument(level = "debug", skip(graph, chooser), fields(population = graph.population()))]
pub fn rewire_all<C: Chooser>(
    graph: &mut Graph,
    probability: f64,
    max_attempts: Option<NonZeroUsize>,
    chooser: &mut C,
) -> Result<FullRewire> {
    let mut attempts = 0;

    loop {
        attempts += 1;

        let rewired = rewire_pass(graph, probability, chooser);
        let distances = DistanceMatrix::compute(graph);

        if distances.is_connected() {
            return Ok(FullRewire {
                attempts,
                rewired,
                distances,
            });
        }

        debug!(attempts, rewired, "rewired network is disconnected, retrying");

        if max_attempts.map_or(false, |max| attempts >= max.get()) {
            return Err(Error::RewireAttemptsExhausted { attempts });
        }
    }
}

/// Adds a rewired edge from `edge`'s source to a uniformly chosen node it isn't connected to.
///
/// Returns the new edge, or `None` if the source is already connected to everyone.
fn replace<C: Chooser>(graph: &mut Graph, edge: Edge, chooser: &mut C) -> Option<Edge> {
    let source = edge.source();
    if graph.is_saturated(source) {
        return None;
    }

    let targets = graph.non_neighbors(source);
    let &target = chooser.choose(&targets)?;

    let added = Edge::rewired(source, target);
    graph.insert(added);

    Some(added)
}
