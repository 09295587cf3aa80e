pub mod dijkstra;
pub mod heap;
pub mod pheromone;
pub mod sampler;
