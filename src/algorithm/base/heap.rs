use std::cmp::Reverse;
use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;
use crate::network::NodeIndex;


pub type MyMinHeap = PriorityQueue<NodeIndex, Priority>;


/// Smaller distance first, ties resolved toward the smaller node index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority (Reverse<(OrderedFloat<f64>, NodeIndex)>);

impl Priority {
    pub fn new(dist: f64, node: NodeIndex) -> Self {
        Self (Reverse((OrderedFloat(dist), node)))
    }
    pub fn dist(&self) -> f64 {
        ((self.0).0).0.into_inner()
    }
}
