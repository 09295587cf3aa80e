pub mod algorithm;
pub mod component;
pub mod network;
pub mod utils;

use log::{info, warn};

use algorithm::{ColonyOptimizer, Dijkstra};
use component::{IterationStat, Route};
use network::{Network, NodeIndex};
use utils::config::Config;
use utils::error::{Error, Result};

/// Resolves stop labels to nodes. With no labels given, the first
/// `fallback_count` nodes of the network are used.
pub fn resolve_stops(network: &Network, labels: &[u64], fallback_count: usize) -> Result<Vec<NodeIndex>> {
    if labels.is_empty() {
        warn!("no stops given, taking the first {} nodes", fallback_count);
        return Ok(network.nodes().take(fallback_count).collect());
    }
    labels.iter()
        .map(|&label| network.lookup(label)
            .ok_or_else(|| Error::invalid(format!("stop {} is not in the network", label))))
        .collect()
}

/// Runs a full optimization with the Dijkstra backend and the run sizes of
/// `config`.
pub fn optimize_routes(network: &Network, stops: &[NodeIndex], config: &Config)
    -> Result<(Vec<Route>, Vec<IterationStat>)> {
    let mut paths = Dijkstra::new(network);
    paths.compute(stops);
    let mut colony = ColonyOptimizer::new(network, &paths, config.clone());
    info!("optimizing {} stops with {} iterations of {} ants",
          stops.len(), config.iterations, config.ants);
    colony.optimize(stops, config.iterations, config.ants, config.max_routes)
}
