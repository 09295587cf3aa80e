use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, info};
use ordered_float::OrderedFloat;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use super::base::pheromone::PheromoneModel;
use super::construct::RouteConstructor;
use super::selector::RouteSelector;
use super::ShortestPath;
use crate::component::{IterationStat, Route};
use crate::network::{EdgeIndex, Network, NodeIndex};
use crate::utils::config::Config;
use crate::utils::error::{Error, Result};


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Iterating(usize),
    Completed,
}

/// Runs the colony: iterations one after another, the ants of one
/// iteration in parallel against a frozen pheromone model, then a single
/// deposit and evaporation step before the next iteration starts.
pub struct ColonyOptimizer<'a, S> {
    network: &'a Network,
    paths: &'a S,
    config: Config,
    cancel: Option<Arc<AtomicBool>>,
    phase: Phase,
    pheromone: Option<PheromoneModel>,
}

impl<'a, S: ShortestPath + Sync> ColonyOptimizer<'a, S> {
    pub fn new(network: &'a Network, paths: &'a S, config: Config) -> Self {
        ColonyOptimizer {
            network,
            paths,
            config,
            cancel: None,
            phase: Phase::Initialized,
            pheromone: None,
        }
    }
    /// Checked between iterations; once set the run ends early.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    /// Pheromone model as left by the latest run.
    pub fn pheromone(&self) -> Option<&PheromoneModel> {
        self.pheromone.as_ref()
    }
    pub fn optimize(
        &mut self,
        stops: &[NodeIndex],
        iterations: usize,
        ants_per_iteration: usize,
        max_routes: usize,
    ) -> Result<(Vec<Route>, Vec<IterationStat>)> {
        if stops.len() < 2 {
            return Err(Error::invalid(format!(
                "need at least 2 stops for optimization, got {}", stops.len())));
        }
        if let Some(stop) = stops.iter().find(|&&stop| !self.network.contains(stop)) {
            return Err(Error::invalid(format!("stop #{} is not in the network", stop.index())));
        }
        self.config.validate()?;

        let params = self.config.parameters.clone();
        let seed = self.config.seed;
        let mut pheromone = PheromoneModel::initialize(self.network, params.tau0, params.symmetric)?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()?;
        let constructor = RouteConstructor::new(self.network, self.paths, params.alpha, params.beta);
        let deadline = match self.config.timeout {
            0       => None,
            timeout => Some(Instant::now() + Duration::from_micros(timeout)),
        };
        self.phase = Phase::Initialized;
        self.pheromone = None;

        let mut candidates = Vec::<Route>::new();
        let mut stats = Vec::with_capacity(iterations);
        let mut best_cost: Option<f64> = None;

        for iteration in 0..iterations {
            if self.should_stop(deadline) {
                info!("stopped before iteration {} of {}", iteration, iterations);
                break;
            }
            self.phase = Phase::Iterating(iteration);

            let snapshot = &pheromone;
            let outcomes: Vec<Result<Route>> = pool.install(|| {
                (0..ants_per_iteration)
                    .into_par_iter()
                    .map(|ant| {
                        let mut rng = ant_rng(seed, iteration, ant);
                        constructor.construct(snapshot, stops, &mut rng)
                    })
                    .collect()
            });

            let mut routes = Vec::with_capacity(outcomes.len());
            for outcome in outcomes {
                match outcome {
                    Ok(route)          => routes.push(route),
                    Err(Error::NoRoute) => {},
                    Err(err)           => return Err(err),
                }
            }

            let built = routes.len();
            if let Some(cheapest) = routes.iter().position_min_by_key(|route| OrderedFloat(route.cost())) {
                let deposits: Vec<(&[EdgeIndex], f64)> = routes.iter()
                    .map(|route| (route.path(), params.q / route.cost()))
                    .collect();
                pheromone.update(&deposits, params.rho)?;
                let cheapest = routes.swap_remove(cheapest);
                let cost = cheapest.cost();
                best_cost = Some(best_cost.map_or(cost, |best| best.min(cost)));
                candidates.push(cheapest);
            }
            stats.push(IterationStat { iteration, best_cost });
            debug!("iteration {}: {}/{} ants built a route, best cost {:?}",
                   iteration, built, ants_per_iteration, best_cost);
        }

        self.phase = Phase::Completed;
        self.pheromone = Some(pheromone);
        let ranked = RouteSelector::new(max_routes).select(candidates);
        info!("found {} optimized routes over {} iterations", ranked.len(), stats.len());
        Ok((ranked, stats))
    }
    fn should_stop(&self, deadline: Option<Instant>) -> bool {
        let cancelled = self.cancel.as_ref()
            .map_or(false, |flag| flag.load(Ordering::SeqCst));
        let expired = deadline.map_or(false, |deadline| Instant::now() >= deadline);
        cancelled || expired
    }
}

/// Every ant draws from its own ChaCha stream, so the outcome does not
/// depend on which worker runs it or in which order.
fn ant_rng(seed: u64, iteration: usize, ant: usize) -> ChaChaRng {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    rng.set_stream(((iteration as u64) << 32) | ant as u64);
    rng
}
