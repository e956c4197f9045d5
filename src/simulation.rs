//! The simulation facade, keeping the network and its metrics in step.

use std::fmt;

use tracing::{debug, info};

use crate::{
    config::Config,
    edge::{Edge, NodeId},
    error::Result,
    graph::Graph,
    lattice::ring_lattice,
    layout::{self, Point},
    metrics::{AveragePathLength, Clustering, Highlight},
    paths::{Distance, DistanceMatrix},
    rewire::{self, RewireOutcome},
    rng::{Chooser, SimRng},
};

/// A small-world network and its current metrics.
///
/// Every mutating call recomputes the distances and metrics before returning, so a reader never
/// observes edges that disagree with the reported clustering coefficient or average path length.
///
/// # Examples
///
/// ```
/// use smallworld::config::Config;
/// use smallworld::simulation::SmallWorld;
///
/// let config = Config { seed: Some(7), ..Config::new(10, 0.3).unwrap() };
/// let mut world = SmallWorld::new(config).unwrap();
///
/// assert_eq!(world.clustering_coefficient_formatted(), "0.5000");
/// assert_eq!(world.average_path_length().to_string(), "1.6667");
///
/// world.rewire_all().unwrap();
/// assert!(!world.average_path_length().is_unreachable());
/// ```
#[derive(Debug)]
pub struct SmallWorld<C = SimRng> {
    config: Config,
    graph: Graph,
    distances: DistanceMatrix,
    clustering: Clustering,
    average_path_length: AveragePathLength,
    /// Edges rewired since the last setup or full rewire.
    rewired: usize,
    chooser: C,
}

impl SmallWorld<SimRng> {
    /// Builds the initial lattice for `config`, seeding the random choices from `config.seed`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        let chooser = config
            .seed
            .map_or_else(SimRng::from_entropy, SimRng::from_seed);

        Self::with_chooser(config, chooser)
    }
}

impl<C: Chooser> SmallWorld<C> {
    /// Builds the initial lattice for `config`, drawing random choices from `chooser`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid.
    pub fn with_chooser(config: Config, chooser: C) -> Result<Self> {
        config.validate()?;

        let graph = ring_lattice(config.population);
        let distances = DistanceMatrix::compute(&graph);
        let clustering = Clustering::compute(&graph);
        let average_path_length = AveragePathLength::compute(&distances);

        info!(
            population = config.population,
            rewiring_probability = config.rewiring_probability,
            "built ring lattice"
        );

        Ok(Self {
            config,
            graph,
            distances,
            clustering,
            average_path_length,
            rewired: 0,
            chooser,
        })
    }

    /// Discards the network and rebuilds the ring lattice with new parameters.
    ///
    /// # Errors
    ///
    /// Fails if the parameters are invalid, in which case the current network is left as is.
    pub fn setup(&mut self, population: usize, rewiring_probability: f64) -> Result<()> {
        let config = Config {
            population,
            rewiring_probability,
            ..self.config.clone()
        };
        config.validate()?;

        self.config = config;
        self.graph = ring_lattice(population);
        self.rewired = 0;
        self.refresh();

        info!(population, rewiring_probability, "built ring lattice");

        Ok(())
    }

    /// Rewires one randomly chosen lattice edge, see [`rewire::rewire_one`].
    ///
    /// Does nothing when there's no lattice edge left or the chosen edge's source is connected
    /// to every other node.
    pub fn rewire_one(&mut self) -> RewireOutcome {
        let outcome = rewire::rewire_one(&mut self.graph, &mut self.chooser);

        if let RewireOutcome::Rewired { removed, added } = outcome {
            self.rewired += 1;
            self.refresh();

            debug!(
                removed = ?removed,
                added = ?added,
                rewired = self.rewired,
                average_path_length = %self.average_path_length,
                "rewired edge"
            );
        }

        outcome
    }

    /// Rebuilds the lattice and rewires each edge with the configured probability, retrying
    /// until the network is connected. Returns the number of attempts it took.
    ///
    /// # Errors
    ///
    /// Only fails when `max_rewire_attempts` is configured and exhausted; the network then
    /// holds the last, disconnected, attempt.
    pub fn rewire_all(&mut self) -> Result<usize> {
        let result = rewire::rewire_all(
            &mut self.graph,
            self.config.rewiring_probability,
            self.config.max_rewire_attempts,
            &mut self.chooser,
        );

        match result {
            Ok(full) => {
                self.rewired = full.rewired;
                self.distances = full.distances;
                self.refresh_metrics();

                info!(
                    attempts = full.attempts,
                    rewired = full.rewired,
                    clustering_coefficient = self.clustering.global(),
                    average_path_length = %self.average_path_length,
                    "rewired network"
                );

                Ok(full.attempts)
            }
            Err(err) => {
                self.rewired = self.graph.edge_count() - self.graph.lattice_edges().count();
                self.refresh();

                Err(err)
            }
        }
    }

    /// Describes the network as seen from `node`, see [`Highlight::compute`].
    pub fn highlight(&self, node: NodeId) -> Option<Highlight> {
        Highlight::compute(&self.graph, &self.distances, &self.clustering, node)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn edges(&self) -> &[Edge] {
        self.graph.edges()
    }

    /// Returns a view of one node, `None` if it isn't part of the network.
    pub fn node(&self, id: NodeId) -> Option<NodeView<'_, C>> {
        self.graph.contains_node(id).then(|| NodeView { id, world: self })
    }

    /// Returns a view of every node, ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = NodeView<'_, C>> + '_ {
        self.graph.nodes().map(move |id| NodeView { id, world: self })
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn clustering_coefficient(&self) -> f64 {
        self.clustering.global()
    }

    pub fn clustering_coefficient_formatted(&self) -> String {
        self.clustering.formatted()
    }

    pub fn average_path_length(&self) -> AveragePathLength {
        self.average_path_length
    }

    /// The number of edges rewired since the last setup or full rewire.
    pub fn rewired_count(&self) -> usize {
        self.rewired
    }

    /// Positions the nodes on a staggered ring, see [`layout::ring`].
    pub fn layout(&self, radius: f64) -> Vec<Point> {
        layout::ring(self.graph.population(), radius)
    }

    //
    // Private
    //

    /// Recomputes the distances and everything derived from them.
    ///
    /// This should be called every time the set of edges is mutated since the metrics won't
    /// correspond to the new graph.
    fn refresh(&mut self) {
        self.distances = DistanceMatrix::compute(&self.graph);
        self.refresh_metrics();
    }

    fn refresh_metrics(&mut self) {
        self.clustering = Clustering::compute(&self.graph);
        self.average_path_length = AveragePathLength::compute(&self.distances);
    }
}

/// A read-only view of one node of a [`SmallWorld`].
pub struct NodeView<'a, C = SimRng> {
    id: NodeId,
    world: &'a SmallWorld<C>,
}

impl<C> Clone for NodeView<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for NodeView<'_, C> {}

impl<C> fmt::Debug for NodeView<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView").field("id", &self.id).finish()
    }
}

impl<'a, C: Chooser> NodeView<'a, C> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn degree(&self) -> usize {
        self.world.graph.degree(self.id)
    }

    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + 'a {
        let world = self.world;
        world.graph.neighbors(self.id)
    }

    /// The distances from this node to every node, itself included, ordered by node id.
    pub fn distances(&self) -> impl Iterator<Item = Distance> + 'a {
        let world = self.world;
        world.distances.row(self.id)
    }

    /// The local clustering coefficient, `None` for nodes with fewer than two neighbours.
    pub fn clustering_coefficient(&self) -> Option<f64> {
        self.world.clustering.local(self.id)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::{
        error::Error,
        metrics::{EdgeHighlight, NodeHighlight},
        rng::tests::Scripted,
    };

    fn seeded(population: usize, probability: f64, seed: u64) -> SmallWorld {
        let config = Config {
            seed: Some(seed),
            ..Config::new(population, probability).unwrap()
        };

        SmallWorld::new(config).unwrap()
    }

    #[test]
    fn new_builds_the_lattice() {
        let world = seeded(10, 0.5, 1);

        assert_eq!(world.edges().len(), 20);
        assert_eq!(world.rewired_count(), 0);
        assert_eq!(world.clustering_coefficient(), 0.5);
        assert_eq!(world.clustering_coefficient_formatted(), "0.5000");
        assert_eq!(world.average_path_length().to_string(), "1.6667");
        assert!(world.nodes().all(|node| node.degree() == 4));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = Config {
            population: 2,
            ..Config::default()
        };

        assert!(matches!(
            SmallWorld::new(config),
            Err(Error::InvalidPopulation { population: 2 })
        ));
    }

    #[test]
    fn setup_rebuilds() {
        let mut world = seeded(10, 0.5, 3);
        world.rewire_one();
        world.setup(4, 0.2).unwrap();

        assert_eq!(world.config().population, 4);
        assert_eq!(world.config().seed, Some(3));
        assert_eq!(world.edges().len(), 6);
        assert_eq!(world.rewired_count(), 0);
        assert_eq!(world.average_path_length(), AveragePathLength::Finite(1.0));
        assert_eq!(world.clustering_coefficient(), 1.0);
    }

    #[test]
    fn setup_rejects_without_touching_the_network() {
        let mut world = seeded(10, 0.5, 3);
        let edges = world.edges().to_vec();

        assert!(matches!(
            world.setup(10, 1.5),
            Err(Error::InvalidProbability { .. })
        ));
        assert!(world.setup(1, 0.5).is_err());

        assert_eq!(world.edges(), &edges[..]);
        assert_eq!(world.config().rewiring_probability, 0.5);
    }

    #[test]
    fn rewire_one_refreshes_metrics() {
        let config = Config::new(6, 0.5).unwrap();
        let mut world = SmallWorld::with_chooser(config, Scripted::new(&[0, 0], &[])).unwrap();

        let outcome = world.rewire_one();

        assert!(outcome.is_rewired());
        assert_eq!(world.rewired_count(), 1);
        assert_eq!(
            world.distances(),
            &DistanceMatrix::compute(world.graph())
        );
        assert_eq!(world.clustering_coefficient(), Clustering::compute(world.graph()).global());
        assert_eq!(
            world.average_path_length(),
            AveragePathLength::compute(world.distances())
        );
    }

    #[test]
    fn rewire_one_noops_when_exhausted() {
        let mut world = seeded(30, 0.5, 8);

        while world.rewire_one() != RewireOutcome::Exhausted {}
        let rewired = world.rewired_count();
        let apl = world.average_path_length();

        for _ in 0..10 {
            assert_eq!(world.rewire_one(), RewireOutcome::Exhausted);
        }
        assert_eq!(world.rewired_count(), rewired);
        assert_eq!(world.average_path_length(), apl);
        assert_eq!(world.edges().len(), 60);
    }

    #[test]
    fn rewire_one_saturated_leaves_everything_alone() {
        // A five-node ring is already complete.
        let mut world = seeded(5, 0.5, 42);
        let edges = world.edges().to_vec();
        let distances = world.distances().clone();
        let clustering = world.clustering_coefficient_formatted();
        let apl = world.average_path_length();

        assert!(!world.graph().has_rewirable_edge());
        for _ in 0..100 {
            assert!(matches!(world.rewire_one(), RewireOutcome::Saturated { .. }));
        }

        assert_eq!(world.rewired_count(), 0);
        assert_eq!(world.edges(), &edges[..]);
        assert!(world.edges().iter().all(|e| !e.is_rewired()));
        assert_eq!(world.distances(), &distances);
        assert_eq!(world.clustering_coefficient_formatted(), clustering);
        assert_eq!(world.average_path_length(), apl);
    }

    #[test]
    fn rewire_all_is_connected_and_counted() {
        let mut world = seeded(20, 0.9, 4);

        for _ in 0..10 {
            let attempts = world.rewire_all().unwrap();

            assert!(attempts >= 1);
            assert!(!world.average_path_length().is_unreachable());
            assert_eq!(
                world.rewired_count(),
                world.edges().iter().filter(|e| e.is_rewired()).count()
            );
        }
    }

    #[test]
    fn rewire_all_capped_keeps_metrics_consistent() {
        let config = Config {
            max_rewire_attempts: NonZeroUsize::new(1),
            ..Config::new(10, 0.5).unwrap()
        };

        // Split the ring into two complete graphs, see the rewire module.
        let mut chances = vec![false; 20];
        for i in [7, 8, 9, 17, 18, 19] {
            chances[i] = true;
        }
        let scripted = Scripted::new(&[0, 0, 0, 4, 3, 3], &chances);
        let mut world = SmallWorld::with_chooser(config, scripted).unwrap();

        assert!(matches!(
            world.rewire_all(),
            Err(Error::RewireAttemptsExhausted { attempts: 1 })
        ));
        assert_eq!(world.rewired_count(), 6);
        assert!(world.average_path_length().is_unreachable());
        assert_eq!(world.clustering_coefficient(), 1.0);
    }

    #[test]
    fn metrics_are_idempotent() {
        let mut world = seeded(25, 0.4, 9);
        world.rewire_all().unwrap();

        let first = (
            world.clustering_coefficient_formatted(),
            world.average_path_length().to_string(),
        );
        let second = (
            world.clustering_coefficient_formatted(),
            world.average_path_length().to_string(),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn seeds_reproduce() {
        let mut a = seeded(15, 0.7, 42);
        let mut b = seeded(15, 0.7, 42);

        a.rewire_all().unwrap();
        b.rewire_all().unwrap();
        a.rewire_one();
        b.rewire_one();

        assert_eq!(a.edges(), b.edges());
        assert!(a
            .edges()
            .iter()
            .zip(b.edges())
            .all(|(x, y)| x.source() == y.source() && x.kind() == y.kind()));
    }

    #[test]
    fn node_views() {
        let world = seeded(10, 0.5, 0);
        let node = world.node(0).unwrap();

        assert_eq!(node.id(), 0);
        assert_eq!(node.neighbors().collect::<Vec<_>>(), vec![1, 2, 8, 9]);
        assert_eq!(node.clustering_coefficient(), Some(0.5));
        assert_eq!(node.distances().nth(5), Some(Distance::Finite(3)));
        assert!(world.node(10).is_none());
        assert_eq!(world.nodes().count(), 10);
    }

    #[test]
    fn highlight() {
        let world = seeded(10, 0.5, 0);
        let highlight = world.highlight(0).unwrap();

        assert_eq!(highlight.nodes[0], NodeHighlight::Selected);
        assert_eq!(highlight.nodes[9], NodeHighlight::Neighbor);
        assert_eq!(highlight.nodes[5], NodeHighlight::None);
        assert_eq!(highlight.edges.len(), world.edges().len());
        assert_eq!(
            highlight
                .edges
                .iter()
                .filter(|&&e| e == EdgeHighlight::SecondOrder)
                .count(),
            3
        );
        assert_eq!(
            highlight.summary(),
            "clustering coefficient = 0.5000 and average path length = 1.5000 for 10 nodes."
        );
        assert!(world.highlight(10).is_none());
    }

    #[test]
    fn layout() {
        let world = seeded(12, 0.5, 0);

        assert_eq!(world.layout(10.0).len(), 12);
    }
}
