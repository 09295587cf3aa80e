use serde::{Deserialize, Serialize};
use argh::FromArgs;
use crate::utils::error::{Error, Result};

/// Multi-stop route search over a weighted road network by ant colony optimization
#[derive(FromArgs)]
pub struct Arguments {
    /// path to network yaml file
    #[argh(positional)]
    pub network: String,
    /// node labels of the stops, the first one is where every route starts
    #[argh(positional)]
    pub stops: Vec<u64>,
    /// path to configuration file
    #[argh(option, short='c', default="String::from(\"data/config/default.yaml\")")]
    pub config: String,
    /// override random seed of the colony
    #[argh(option, short='s')]
    pub seed: Option<u64>,
    /// override number of iterations
    #[argh(option, short='i')]
    pub iterations: Option<usize>,
    /// override number of ants per iteration
    #[argh(option, short='a')]
    pub ants: Option<usize>,
    /// override evaporation rate
    #[argh(option, short='r')]
    pub rho: Option<f64>,
    /// take the first N nodes of the network as stops when none are given
    #[argh(option, short='n')]
    pub stop_count: Option<usize>,
    /// write ranked routes and iteration stats to this yaml file
    #[argh(option, short='o')]
    pub output: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub name: String,
    pub seed: u64,
    /// Wall-clock budget in microseconds, checked between iterations; 0 disables it.
    #[serde(default)]
    pub timeout: u64,
    /// Worker threads for the ants of one iteration; 0 leaves it to rayon.
    #[serde(default)]
    pub threads: usize,
    pub iterations: usize,
    pub ants: usize,
    pub max_routes: usize,
    #[serde(default = "default_stop_count")]
    pub stop_count: usize,
    pub parameters: Parameters,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Parameters {
    /// Exponent of the pheromone term.
    pub alpha: f64,
    /// Exponent of the heuristic term.
    pub beta: f64,
    /// Evaporation rate.
    pub rho: f64,
    /// Deposit numerator, a route of cost `c` deposits `q / c`.
    pub q: f64,
    /// Initial pheromone level.
    pub tau0: f64,
    #[serde(default = "default_symmetric")]
    pub symmetric: bool,
}

fn default_stop_count() -> usize {
    10
}

fn default_symmetric() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: String::from("default"),
            seed: 420,
            timeout: 0,
            threads: 0,
            iterations: 100,
            ants: 20,
            max_routes: 5,
            stop_count: default_stop_count(),
            parameters: Parameters::default(),
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            alpha: 1.0,
            beta: 2.0,
            rho: 0.1,
            q: 100.0,
            tau0: 1.0,
            symmetric: default_symmetric(),
        }
    }
}

impl Config {
    pub fn override_from_args(&mut self, args: &Arguments) {
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(iterations) = args.iterations {
            self.iterations = iterations;
        }
        if let Some(ants) = args.ants {
            self.ants = ants;
        }
        if let Some(rho) = args.rho {
            self.parameters.rho = num::clamp(rho, 0.0, 0.999);
        }
        if let Some(stop_count) = args.stop_count {
            self.stop_count = stop_count;
        }
    }
    pub fn validate(&self) -> Result<()> {
        self.parameters.validate()
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<()> {
        let exponent = |x: f64| x.is_finite() && x >= 0.0;
        if !exponent(self.alpha) || !exponent(self.beta) {
            return Err(Error::invalid(format!(
                "alpha and beta must be finite and non-negative, got {} and {}",
                self.alpha, self.beta)));
        }
        if !(0.0..1.0).contains(&self.rho) {
            return Err(Error::invalid(format!("rho must lie in [0, 1), got {}", self.rho)));
        }
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(Error::invalid(format!("q must be positive, got {}", self.q)));
        }
        if !self.tau0.is_finite() || self.tau0 <= 0.0 {
            return Err(Error::invalid(format!("tau0 must be positive, got {}", self.tau0)));
        }
        Ok(())
    }
}
