use crate::network::{NodeIndex, Path};

/// Shortest path query by edge weight, the only graph capability route
/// construction needs. Implementations must answer deterministically for a
/// fixed network.
pub trait ShortestPath {
    /// Edges from `src` to `dst` in traversal order; empty when they are the
    /// same node, `None` when `dst` cannot be reached.
    fn shortest_path(&self, src: NodeIndex, dst: NodeIndex) -> Option<Path>;
}
