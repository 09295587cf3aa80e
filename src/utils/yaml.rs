use std::fs;

use serde::Deserialize;

use super::config::Config;
use super::error::Result;
use crate::network::Network;

#[derive(Deserialize)]
struct NetworkYaml {
    #[serde(default)]
    nodes: Vec<u64>,
    edges: Vec<NetworkEdgeYaml>,
}

#[derive(Deserialize)]
struct NetworkEdgeYaml {
    ends: [u64; 2],
    weight: f64,
    #[serde(default)]
    oneway: bool,
}

pub fn load_network(path: &str) -> Result<Network> {
    let text = fs::read_to_string(path)?;
    parse_network(&text)
}

pub fn parse_network(text: &str) -> Result<Network> {
    let yaml: NetworkYaml = serde_yaml::from_str(text)?;
    let mut network = Network::default();
    for label in yaml.nodes {
        network.add_node(label);
    }
    for edge in yaml.edges {
        let src = network.add_node(edge.ends[0]);
        let dst = network.add_node(edge.ends[1]);
        network.add_arc(src, dst, edge.weight)?;
        if !edge.oneway {
            network.add_arc(dst, src, edge.weight)?;
        }
    }
    Ok(network)
}

pub fn load_config(path: &str) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(text)?;
    config.validate()?;
    Ok(config)
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::error::Error;

    #[test]
    fn test_parse_network() {
        let text = "
nodes: [7]
edges:
  - { ends: [10, 20], weight: 2.5 }
  - { ends: [20, 30], weight: 1.0, oneway: true }
";
        let network = parse_network(text).unwrap();
        assert_eq!(network.node_count(), 4);
        assert_eq!(network.edge_count(), 3);
        let a = network.lookup(10).unwrap();
        let c = network.lookup(30).unwrap();
        assert_eq!(network.label(a), 10);
        assert!(network.neighbors(c).next().is_none());
        assert!(network.has_one_way());
    }
    #[test]
    fn test_parse_network_negative_weight() {
        let text = "edges:\n  - { ends: [1, 2], weight: -3.0 }\n";
        assert!(matches!(parse_network(text), Err(Error::InvalidInput(_))));
    }
    #[test]
    fn test_parse_config() {
        let text = "
name: small
seed: 7
iterations: 12
ants: 4
max_routes: 3
parameters:
  alpha: 1.0
  beta: 2.0
  rho: 0.2
  q: 10.0
  tau0: 0.5
";
        let config = parse_config(text).unwrap();
        assert_eq!(config.name, "small");
        assert_eq!(config.timeout, 0);
        assert_eq!(config.stop_count, 10);
        assert!(config.parameters.symmetric);
        assert_eq!(config.parameters.rho, 0.2);
    }
    #[test]
    fn test_parse_config_rejects_bad_rho() {
        let text = "
name: bad
seed: 7
iterations: 1
ants: 1
max_routes: 1
parameters: { alpha: 1.0, beta: 1.0, rho: 1.2, q: 1.0, tau0: 1.0 }
";
        assert!(parse_config(text).is_err());
    }
}
