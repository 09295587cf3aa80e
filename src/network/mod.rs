mod topology;

pub use topology::{EdgeIndex, Network, NetworkStats, NodeIndex};

pub type Path = Vec<EdgeIndex>;
