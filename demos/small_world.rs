use smallworld::{config::Config, simulation::SmallWorld};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Take the configuration as JSON from the first argument, if any.
    let config = match std::env::args().nth(1) {
        Some(json) => Config::from_json(&json).expect("invalid configuration"),
        None => Config {
            seed: Some(42),
            ..Config::default()
        },
    };

    let mut world = SmallWorld::new(config).expect("invalid configuration");

    println!(
        "\nRing lattice with {} nodes and {} edges",
        world.config().population,
        world.edges().len()
    );
    report(&world);

    // Rewire edges one at a time until there are none left, watching the path length collapse
    // well before the clustering does.
    println!("\nRewiring one edge at a time...");
    // Small rings are complete graphs with nothing left to rewire.
    while world.graph().has_rewirable_edge() {
        if world.rewire_one().is_rewired() && world.rewired_count() % 10 == 0 {
            report(&world);
        }
    }
    report(&world);

    // Start over and rewire everything in one go.
    println!(
        "\nRewiring every edge with probability {}...",
        world.config().rewiring_probability
    );
    let attempts = world.rewire_all().expect("no connected network found");
    println!("Found a connected network after {attempts} attempt(s)");
    report(&world);

    // Look at the network from the first node's point of view.
    if let Some(highlight) = world.highlight(0) {
        println!("\nNode 0: {}", highlight.summary());
    }
}

fn report(world: &SmallWorld) {
    println!(
        "rewired: {:>3}, clustering coefficient: {}, average path length: {}",
        world.rewired_count(),
        world.clustering_coefficient_formatted(),
        world.average_path_length()
    );
}
