mod base;
mod colony;
mod construct;
mod selector;
mod shortest_path;

pub use base::dijkstra::Dijkstra;
pub use base::pheromone::{PheromoneModel, EPSILON};
pub use base::sampler::sample;
pub use colony::{ColonyOptimizer, Phase};
pub use construct::RouteConstructor;
pub use selector::RouteSelector;
pub use shortest_path::ShortestPath;
