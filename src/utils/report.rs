use std::fmt::Write as _;
use std::fs;

use serde::Serialize;

use super::error::Result;
use crate::component::{IterationStat, Route};
use crate::network::Network;

/// Ranked route with node labels, as handed to a renderer.
#[derive(Serialize, Debug, PartialEq)]
pub struct RouteRecord {
    pub rank: usize,
    pub cost: f64,
    pub edges: Vec<[u64; 2]>,
    pub nodes: Vec<u64>,
}

#[derive(Serialize, Debug)]
pub struct Report<'a> {
    pub routes: Vec<RouteRecord>,
    pub stats: &'a [IterationStat],
}

impl RouteRecord {
    pub fn new(network: &Network, rank: usize, route: &Route) -> Self {
        let edges = route.hops(network)
            .map(|(u, v)| [network.label(u), network.label(v)])
            .collect();
        let nodes = route.nodes().iter()
            .map(|&n| network.label(n))
            .collect();
        RouteRecord { rank, cost: route.cost(), edges, nodes }
    }
}

impl<'a> Report<'a> {
    pub fn new(network: &Network, routes: &[Route], stats: &'a [IterationStat]) -> Self {
        let routes = routes.iter()
            .enumerate()
            .map(|(i, route)| RouteRecord::new(network, i + 1, route))
            .collect();
        Report { routes, stats }
    }
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
    pub fn write(&self, path: &str) -> Result<()> {
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }
    /// Plain text summary for the terminal.
    pub fn summary(&self) -> String {
        let mut msg = String::new();
        match self.routes.first() {
            None => { writeln!(msg, "no route was generated").ok(); },
            Some(best) => { writeln!(msg, "best route cost: {:.2}", best.cost).ok(); },
        }
        for record in self.routes.iter() {
            let sequence: Vec<u64> = record.edges.first()
                .map(|first| first[0])
                .into_iter()
                .chain(record.edges.iter().map(|edge| edge[1]))
                .collect();
            writeln!(msg, "- route #{} cost {:.2} through {} nodes: {:?}",
                     record.rank, record.cost, record.nodes.len(), sequence).ok();
        }
        if let Some(last) = self.stats.last() {
            writeln!(msg, "{} iterations, final best cost {:?}",
                     self.stats.len(), last.best_cost).ok();
        }
        msg
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{EdgeIndex, Path};

    #[test]
    fn it_labels_routes() {
        let mut network = Network::new();
        let a = network.add_node(100);
        let b = network.add_node(200);
        let c = network.add_node(300);
        network.add_arc(a, b, 1.0).unwrap();
        network.add_arc(b, c, 2.0).unwrap();
        let path: Path = vec![EdgeIndex::from(0), EdgeIndex::from(1)];
        let route = Route::new(&network, path);
        let stats = vec![IterationStat { iteration: 0, best_cost: Some(3.0) }];
        let report = Report::new(&network, &[route], &stats);
        assert_eq!(report.routes[0], RouteRecord {
            rank: 1,
            cost: 3.0,
            edges: vec![[100, 200], [200, 300]],
            nodes: vec![100, 200, 300],
        });
        let yaml = report.to_yaml().unwrap();
        assert!(yaml.contains("best_cost: 3.0"));
        assert!(report.summary().contains("[100, 200, 300]"));
    }
    #[test]
    fn it_summarizes_empty_result() {
        let network = Network::new();
        let stats = vec![IterationStat { iteration: 0, best_cost: None }];
        let report = Report::new(&network, &[], &stats);
        assert!(report.summary().starts_with("no route was generated"));
        assert!(report.to_yaml().unwrap().contains("best_cost: ~"));
    }
}
