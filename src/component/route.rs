use std::collections::BTreeSet;
use serde::Serialize;
use crate::network::{EdgeIndex, Network, NodeIndex, Path};


/// A built multi-stop route. The cost and node set are derived from the
/// path when the route is made and cannot be changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    path: Path,
    cost: f64,
    nodes: BTreeSet<NodeIndex>,
}

impl Route {
    pub fn new(network: &Network, path: Path) -> Self {
        let cost = network.length_along(&path);
        let nodes = path.iter()
            .flat_map(|&e| {
                let &(u, v) = network.endpoints(e);
                vec![u, v]
            })
            .collect();
        Route { path, cost, nodes }
    }
    pub fn path(&self) -> &[EdgeIndex] {
        &self.path
    }
    pub fn cost(&self) -> f64 {
        self.cost
    }
    pub fn nodes(&self) -> &BTreeSet<NodeIndex> {
        &self.nodes
    }
    pub fn len(&self) -> usize {
        self.path.len()
    }
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
    /// Directed `(u, v)` traversals in order.
    pub fn hops<'a>(&'a self, network: &'a Network)
        -> impl Iterator<Item=(NodeIndex, NodeIndex)> + 'a {
        self.path.iter().map(move |&e| *network.endpoints(e))
    }
}

/// Best cost seen up to and including `iteration`. `None` until some ant
/// has completed a route.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IterationStat {
    pub iteration: usize,
    pub best_cost: Option<f64>,
}
