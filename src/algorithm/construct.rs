use itertools::Itertools;
use rand::RngCore;

use super::base::pheromone::PheromoneModel;
use super::base::sampler;
use super::ShortestPath;
use crate::component::Route;
use crate::network::{EdgeIndex, Network, NodeIndex};
use crate::utils::error::{Error, Result};


/// Builds one route per call by repeatedly moving to a randomly chosen
/// remaining stop along its shortest path.
pub struct RouteConstructor<'a, S> {
    network: &'a Network,
    paths: &'a S,
    alpha: f64,
    beta: f64,
}

impl<'a, S: ShortestPath> RouteConstructor<'a, S> {
    pub fn new(network: &'a Network, paths: &'a S, alpha: f64, beta: f64) -> Self {
        RouteConstructor { network, paths, alpha, beta }
    }
    /// Returns `Error::NoRoute` when the ant gets stuck, which only ends
    /// this ant. Any other error is fatal for the caller.
    pub fn construct<R: RngCore + ?Sized>(
        &self,
        pheromone: &PheromoneModel,
        stops: &[NodeIndex],
        rng: &mut R,
    ) -> Result<Route> {
        if stops.len() < 2 {
            return Err(Error::invalid(format!(
                "a route needs at least 2 stops, got {}", stops.len())));
        }
        let mut current = stops[0];
        let mut remaining: Vec<NodeIndex> = stops[1..].iter()
            .copied()
            .filter(|&stop| stop != current)
            .unique()
            .collect();
        let mut path = vec![];

        while !remaining.is_empty() {
            let mut legs: Vec<_> = remaining.iter()
                .map(|&candidate| self.paths.shortest_path(current, candidate))
                .collect();
            let mut scores = Vec::with_capacity(legs.len());
            for leg in legs.iter() {
                let score = match leg {
                    Some(leg) => self.score(pheromone, leg)?,
                    None      => f64::NEG_INFINITY,
                };
                scores.push(score);
            }
            let pick = sampler::sample(&scores, rng)?
                .ok_or(Error::NoRoute)?;
            let leg = legs.swap_remove(pick)
                .ok_or(Error::NoRoute)?;
            path.extend(leg);
            current = remaining.remove(pick);
        }

        if path.is_empty() {
            return Err(Error::NoRoute);
        }
        Ok(Route::new(self.network, path))
    }
    /// Natural log of `pher^alpha * heur^beta` for one leg, where `pher` is
    /// the product of pheromone levels and `heur` the sum of inverse weights.
    fn score(&self, pheromone: &PheromoneModel, leg: &[EdgeIndex]) -> Result<f64> {
        let mut ln_pheromone = 0.0;
        let mut heuristic = 0.0;
        for &edge in leg {
            let weight = self.network.weight(edge);
            if !(weight > 0.0) {
                let &(u, v) = self.network.endpoints(edge);
                return Err(Error::invalid(format!(
                    "edge ({}, {}) has weight {}, the heuristic needs positive weights",
                    self.network.label(u), self.network.label(v), weight)));
            }
            ln_pheromone += pheromone.level_of(edge).ln();
            heuristic += 1.0 / weight;
        }
        Ok(powered(ln_pheromone, self.alpha) + powered(heuristic.ln(), self.beta))
    }
}

// x^0 is 1 even for x = 0
fn powered(ln_x: f64, exponent: f64) -> f64 {
    if exponent == 0.0 { 0.0 } else { exponent * ln_x }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::base::dijkstra::Dijkstra;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 { 0 }
        fn next_u64(&mut self) -> u64 { 0 }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {}
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unplugged"))
        }
    }

    fn line(weights: &[f64]) -> Network {
        let mut network = Network::new();
        network.add_nodes(weights.len() + 1);
        let edges = weights.iter()
            .enumerate()
            .map(|(i, &w)| (i, i + 1, w))
            .collect();
        network.add_edges(edges).unwrap();
        network
    }

    #[test]
    fn it_builds_two_stop_route() {
        let network = line(&[5.0]);
        let paths = Dijkstra::new(&network);
        let pheromone = PheromoneModel::initialize(&network, 1.0, true).unwrap();
        let constructor = RouteConstructor::new(&network, &paths, 1.0, 2.0);
        let mut rng = ChaChaRng::seed_from_u64(0);
        let route = constructor.construct(&pheromone, &[NodeIndex::from(0), NodeIndex::from(1)], &mut rng).unwrap();
        assert_eq!(route.path(), &[EdgeIndex::from(0)]);
        assert_eq!(route.cost(), 5.0);
    }
    #[test]
    fn it_rejects_single_stop() {
        let network = line(&[5.0]);
        let paths = Dijkstra::new(&network);
        let pheromone = PheromoneModel::initialize(&network, 1.0, true).unwrap();
        let constructor = RouteConstructor::new(&network, &paths, 1.0, 2.0);
        let mut rng = ChaChaRng::seed_from_u64(0);
        let result = constructor.construct(&pheromone, &[NodeIndex::from(0)], &mut rng);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
    #[test]
    fn it_visits_every_stop() {
        let network = line(&[1.0, 2.0, 3.0, 4.0]);
        let paths = Dijkstra::new(&network);
        let pheromone = PheromoneModel::initialize(&network, 1.0, true).unwrap();
        let constructor = RouteConstructor::new(&network, &paths, 1.0, 1.0);
        let stops: Vec<NodeIndex> = vec![2.into(), 0.into(), 4.into()];
        for seed in 0..20 {
            let mut rng = ChaChaRng::seed_from_u64(seed);
            let route = constructor.construct(&pheromone, &stops, &mut rng).unwrap();
            for stop in stops.iter() {
                assert!(route.nodes().contains(stop));
            }
            let sum: f64 = route.path().iter().map(|&e| network.weight(e)).sum();
            assert!((route.cost() - sum).abs() < 1e-9);
            // starts at the first stop and the legs join up
            let sequence = network.node_sequence(route.path());
            assert_eq!(sequence[0], stops[0]);
        }
    }
    #[test]
    fn it_fails_ant_on_unreachable_stop() {
        let mut network = line(&[1.0]);
        network.add_nodes(1);
        let paths = Dijkstra::new(&network);
        let pheromone = PheromoneModel::initialize(&network, 1.0, true).unwrap();
        let constructor = RouteConstructor::new(&network, &paths, 1.0, 1.0);
        let mut rng = ChaChaRng::seed_from_u64(0);
        let result = constructor.construct(&pheromone, &[NodeIndex::from(0), NodeIndex::from(2)], &mut rng);
        assert!(matches!(result, Err(Error::NoRoute)));
    }
    #[test]
    fn it_rejects_zero_weight_on_used_leg() {
        let network = line(&[0.0, 1.0]);
        let paths = Dijkstra::new(&network);
        let pheromone = PheromoneModel::initialize(&network, 1.0, true).unwrap();
        let constructor = RouteConstructor::new(&network, &paths, 1.0, 1.0);
        let mut rng = ChaChaRng::seed_from_u64(0);
        let result = constructor.construct(&pheromone, &[NodeIndex::from(0), NodeIndex::from(2)], &mut rng);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
    #[test]
    fn it_treats_repeated_stops_once() {
        let network = line(&[1.0, 1.0]);
        let paths = Dijkstra::new(&network);
        let pheromone = PheromoneModel::initialize(&network, 1.0, true).unwrap();
        let constructor = RouteConstructor::new(&network, &paths, 1.0, 1.0);
        let mut rng = ChaChaRng::seed_from_u64(0);
        let stops: Vec<NodeIndex> = vec![0.into(), 2.into(), 0.into(), 2.into()];
        let route = constructor.construct(&pheromone, &stops, &mut rng).unwrap();
        assert_eq!(route.len(), 2);
        let same: Vec<NodeIndex> = vec![1.into(), 1.into()];
        let result = constructor.construct(&pheromone, &same, &mut rng);
        assert!(matches!(result, Err(Error::NoRoute)));
    }
    #[test]
    fn it_prefers_reinforced_legs() {
        // star: 0 in the middle, 1 and 2 at equal distance
        let mut network = Network::new();
        network.add_nodes(3);
        network.add_edges(vec![(0, 1, 1.0), (0, 2, 1.0)]).unwrap();
        let paths = Dijkstra::new(&network);
        let mut pheromone = PheromoneModel::initialize(&network, 1.0, true).unwrap();
        pheromone.deposit(&[EdgeIndex::from(2)], 99.0).unwrap();
        let constructor = RouteConstructor::new(&network, &paths, 1.0, 1.0);
        let mut rng = ChaChaRng::seed_from_u64(5);
        let stops: Vec<NodeIndex> = vec![0.into(), 1.into(), 2.into()];
        let mut first_to_two = 0;
        for _ in 0..200 {
            let route = constructor.construct(&pheromone, &stops, &mut rng).unwrap();
            if route.path()[0] == EdgeIndex::from(2) {
                first_to_two += 1;
            }
        }
        assert!(first_to_two > 180, "went to 2 first {} times", first_to_two);
    }
    #[test]
    fn it_passes_up_random_source_failure() {
        let network = line(&[1.0, 2.0]);
        let paths = Dijkstra::new(&network);
        let pheromone = PheromoneModel::initialize(&network, 1.0, true).unwrap();
        let constructor = RouteConstructor::new(&network, &paths, 1.0, 1.0);
        let stops: Vec<NodeIndex> = vec![0.into(), 2.into()];
        let result = constructor.construct(&pheromone, &stops, &mut BrokenRng);
        assert!(matches!(result, Err(Error::RandomSource(_))));
    }
}
