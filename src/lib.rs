//! Smallworld is a small toolkit for simulating the formation of small-world networks in the
//! manner of Watts and Strogatz: a ring lattice whose edges are rewired at random while the
//! clustering coefficient and the average path length are tracked.
//!
//! # Basic usage
//!
//! The library is centered around the [`SmallWorld`](simulation::SmallWorld) structure which
//! owns a [`Graph`](graph::Graph) and keeps its metrics current. The building blocks (lattice
//! construction, rewiring, the shortest-path solver and the metrics) are also usable on their
//! own.
//!
//! ```rust
//! use smallworld::config::Config;
//! use smallworld::simulation::SmallWorld;
//!
//! // Start from a ring of 20 nodes, each wired to its two nearest clockwise neighbours.
//! let config = Config { seed: Some(1), ..Config::new(20, 0.2).unwrap() };
//! let mut world = SmallWorld::new(config).unwrap();
//! println!(
//!     "lattice: C = {}, L = {}",
//!     world.clustering_coefficient_formatted(),
//!     world.average_path_length()
//! );
//!
//! // Rewire edges one at a time...
//! world.rewire_one();
//! assert_eq!(world.rewired_count(), 1);
//!
//! // ...or all at once, retrying until the network is connected.
//! world.rewire_all().unwrap();
//! assert!(!world.average_path_length().is_unreachable());
//!
//! // Inspect the network around one node.
//! let highlight = world.highlight(0).unwrap();
//! println!("{}", highlight.summary());
//! ```

pub mod config;
pub mod edge;
pub mod error;
pub mod graph;
pub mod lattice;
pub mod layout;
pub mod metrics;
pub mod paths;
pub mod rewire;
pub mod rng;
pub mod simulation;

pub use error::{Error, Result};
