use std::f64::INFINITY as INF;
use hashbrown::HashMap;

use super::heap::{MyMinHeap, Priority};
use crate::algorithm::ShortestPath;
use crate::network::{EdgeIndex, Network, NodeIndex, Path};


/// Single-source shortest path tree rooted at one node.
#[derive(Clone, Debug)]
struct Tree {
    root: NodeIndex,
    dist: Vec<f64>,
    pred: Vec<Option<EdgeIndex>>,
}

/// Shortest paths by edge weight. Trees of the roots passed to `compute`
/// are kept; other sources are grown on demand and dropped after the query,
/// so the struct stays read-only once shared between ants.
pub struct Dijkstra<'a> {
    network: &'a Network,
    trees: HashMap<NodeIndex, Tree>,
}


impl<'a> Dijkstra<'a> {
    pub fn new(network: &'a Network) -> Self {
        Dijkstra { network, trees: HashMap::new() }
    }
    pub fn compute(&mut self, roots: &[NodeIndex]) {
        for &root in roots {
            self.compute_once(root);
        }
    }
    pub fn compute_once(&mut self, root: NodeIndex) {
        if self.trees.contains_key(&root) || !self.network.contains(root) { return }
        let tree = grow(self.network, root);
        self.trees.insert(root, tree);
    }
    pub fn distance(&self, src: NodeIndex, dst: NodeIndex) -> Option<f64> {
        if !self.network.contains(src) || !self.network.contains(dst) {
            return None;
        }
        let dist = match self.trees.get(&src) {
            Some(tree) => tree.dist[dst.index()],
            None       => grow(self.network, src).dist[dst.index()],
        };
        Some(dist).filter(|d| d.is_finite())
    }
}

impl ShortestPath for Dijkstra<'_> {
    fn shortest_path(&self, src: NodeIndex, dst: NodeIndex) -> Option<Path> {
        if !self.network.contains(src) || !self.network.contains(dst) {
            return None;
        }
        match self.trees.get(&src) {
            Some(tree) => tree.backtrace(self.network, dst),
            None       => grow(self.network, src).backtrace(self.network, dst),
        }
    }
}

impl Tree {
    fn backtrace(&self, network: &Network, dst: NodeIndex) -> Option<Path> {
        if !self.dist[dst.index()].is_finite() {
            return None;
        }
        let mut path = vec![];
        let mut node = dst;
        while node != self.root {
            let edge = self.pred[node.index()]?;
            path.push(edge);
            node = network.endpoints(edge).0;
        }
        path.reverse();
        Some(path)
    }
}

fn grow(network: &Network, root: NodeIndex) -> Tree {
    let count = network.node_count();
    let mut dist = vec![INF; count];
    let mut pred = vec![None; count];
    let mut done = vec![false; count];
    let mut heap = MyMinHeap::new();

    dist[root.index()] = 0.0;
    heap.push(root, Priority::new(0.0, root));

    // 從優先權佇列中移除即為最終距離
    while let Some((v, priority)) = heap.pop() {
        done[v.index()] = true;
        let rv_dist = priority.dist();
        for edge in network.outgoings(v) {
            let u = network.endpoints(edge).1;
            if done[u.index()] { continue; }

            let ru_dist = rv_dist + network.weight(edge);
            if ru_dist >= dist[u.index()] { continue; }

            dist[u.index()] = ru_dist;
            pred[u.index()] = Some(edge);
            let priority = Priority::new(ru_dist, u);
            match heap.get(&u) {
                Some(_) => { heap.change_priority(&u, priority); },
                None    => { heap.push(u, priority); },
            }
        }
    }
    Tree { root, dist, pred }
}
