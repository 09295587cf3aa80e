use std::iter;
use hashbrown::HashMap;
use serde::Serialize;
use crate::utils::error::{Error, Result};

#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    fn new(ix: usize) -> Self {
        NodeIndex(ix)
    }
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeIndex {
    fn from(ix: usize) -> Self {
        NodeIndex::new(ix)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct EdgeIndex(usize);

impl EdgeIndex {
    fn new(ix: usize) -> Self {
        EdgeIndex(ix)
    }
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for EdgeIndex {
    fn from(ix: usize) -> Self {
        EdgeIndex::new(ix)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    label: u64,
    edges: Vec<EdgeIndex>,
}

#[derive(Clone, Debug)]
pub struct Edge {
    ends: (NodeIndex, NodeIndex),
    weight: f64,
}

impl Node {
    pub fn new(label: u64) -> Self {
        Self { label, edges: vec![] }
    }
}
impl Edge {
    pub fn new(ends: (NodeIndex, NodeIndex), weight: f64) -> Self {
        Edge { ends, weight }
    }
}

/// Summary figures of a network, logged before an optimization run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkStats {
    pub nodes: usize,
    pub edges: usize,
    pub avg_degree: f64,
}

/// Directed multigraph with dense indices. Two-way roads are stored as a
/// pair of opposite arcs, so every edge index names one traversal direction.
#[derive(Clone, Debug, Default)]
pub struct Network {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    labels: HashMap<u64, NodeIndex>,
}

impl Network {
    pub fn new() -> Self {
        Self { ..Default::default() }
    }
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    pub fn nodes(&self) -> impl Iterator<Item=NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex::new)
    }
    pub fn edges(&self) -> impl Iterator<Item=EdgeIndex> {
        (0..self.edges.len()).map(EdgeIndex::new)
    }
    pub fn contains(&self, node: NodeIndex) -> bool {
        node.index() < self.nodes.len()
    }
    pub fn endpoints(&self, edge: EdgeIndex) -> &(NodeIndex, NodeIndex) {
        debug_assert!(edge.index() < self.edges.len());
        &self.edges[edge.index()].ends
    }
    pub fn weight(&self, edge: EdgeIndex) -> f64 {
        debug_assert!(edge.index() < self.edges.len());
        self.edges[edge.index()].weight
    }
    pub fn outgoings(&self, node: NodeIndex)
        -> impl Iterator<Item=EdgeIndex> + '_ {
        debug_assert!(node.index() < self.nodes.len());
        self.nodes[node.index()].edges.iter().cloned()
    }
    pub fn neighbors(&self, node: NodeIndex)
        -> impl Iterator<Item=NodeIndex> + '_ {
        debug_assert!(node.index() < self.nodes.len());
        self.nodes[node.index()].edges.iter()
            .map(move |&e| self.edges[e.index()].ends.1)
    }
    pub fn label(&self, node: NodeIndex) -> u64 {
        debug_assert!(node.index() < self.nodes.len());
        self.nodes[node.index()].label
    }
    pub fn lookup(&self, label: u64) -> Option<NodeIndex> {
        self.labels.get(&label).copied()
    }
    /// Returns the node carrying `label`, creating it when absent.
    pub fn add_node(&mut self, label: u64) -> NodeIndex {
        if let Some(&node) = self.labels.get(&label) {
            return node;
        }
        let node = NodeIndex::new(self.nodes.len());
        self.nodes.push(Node::new(label));
        self.labels.insert(label, node);
        node
    }
    /// Appends `count` nodes. Each takes the lowest free label not below
    /// the current node count, so labels already in use are skipped.
    pub fn add_nodes(&mut self, count: usize) {
        let target = self.nodes.len() + count;
        let mut label = self.nodes.len() as u64;
        while self.nodes.len() < target {
            if !self.labels.contains_key(&label) {
                self.add_node(label);
            }
            label += 1;
        }
    }
    /// Adds a single directed arc `src -> dst`.
    pub fn add_arc(&mut self, src: NodeIndex, dst: NodeIndex, weight: f64)
        -> Result<EdgeIndex> {
        if !self.contains(src) || !self.contains(dst) {
            return Err(Error::invalid(format!(
                "edge ({}, {}) refers to an unknown node", src.index(), dst.index())));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::invalid(format!(
                "edge ({}, {}) has weight {}, expected a finite non-negative value",
                self.label(src), self.label(dst), weight)));
        }
        let edge = EdgeIndex::new(self.edges.len());
        self.nodes[src.index()].edges.push(edge);
        self.edges.push(Edge::new((src, dst), weight));
        Ok(edge)
    }
    /// Adds two-way edges given as `(node, node, weight)` index triples.
    pub fn add_edges(&mut self, edges: Vec<(usize, usize, f64)>) -> Result<()> {
        for (end0, end1, weight) in edges {
            self.add_arc(end0.into(), end1.into(), weight)?;
            self.add_arc(end1.into(), end0.into(), weight)?;
        }
        Ok(())
    }
    /// Adds one-way arcs given as `(node, node, weight)` index triples.
    pub fn add_arcs(&mut self, arcs: Vec<(usize, usize, f64)>) -> Result<()> {
        for (src, dst, weight) in arcs {
            self.add_arc(src.into(), dst.into(), weight)?;
        }
        Ok(())
    }
    /// Whether some arc has no arc running the opposite way.
    pub fn has_one_way(&self) -> bool {
        self.edges.iter().any(|edge| {
            let (src, dst) = edge.ends;
            !self.neighbors(dst).any(|n| n == src)
        })
    }
    pub fn length_along(&self, path: &[EdgeIndex]) -> f64 {
        path.iter()
            .map(|&e| self.weight(e))
            .sum::<f64>()
    }
    pub fn node_sequence(&self, path: &[EdgeIndex]) -> Vec<NodeIndex> {
        if path.is_empty() {
            return vec![];
        }
        let head = self.endpoints(path[0]).0;
        let tail = path.iter()
            .map(|&e| self.endpoints(e).1);
        iter::once(head).chain(tail).collect()
    }
    pub fn stats(&self) -> NetworkStats {
        let nodes = self.node_count();
        let edges = self.edge_count();
        // every arc adds one out-degree and one in-degree
        let avg_degree = match nodes {
            0 => 0.0,
            _ => 2.0 * edges as f64 / nodes as f64,
        };
        NetworkStats { nodes, edges, avg_degree }
    }
}
