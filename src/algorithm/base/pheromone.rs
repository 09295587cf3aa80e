use hashbrown::HashMap;
use log::warn;
use crate::network::{EdgeIndex, Network, NodeIndex};
use crate::utils::error::{Error, Result};

/// Level reported for a pair the model holds no entry for.
pub const EPSILON: f64 = 1e-10;


/// Pheromone levels of node pairs.
///
/// Levels live in a flat array; `edge_slot` maps every edge id of the
/// network to its slot and `pairs` serves lookups by node pair. In
/// symmetric mode `(u, v)` and `(v, u)` share one slot, so both directions
/// always hold the same level.
#[derive(Clone, Debug)]
pub struct PheromoneModel {
    levels: Vec<f64>,
    edge_slot: Vec<usize>,
    pairs: HashMap<(NodeIndex, NodeIndex), usize>,
    symmetric: bool,
}

impl PheromoneModel {
    pub fn initialize(network: &Network, initial_value: f64, symmetric: bool) -> Result<Self> {
        if !initial_value.is_finite() || initial_value <= 0.0 {
            return Err(Error::invalid(format!(
                "initial pheromone must be positive, got {}", initial_value)));
        }
        if symmetric && network.has_one_way() {
            warn!("network has one-way arcs but pheromone is shared by both directions");
        }
        let mut levels = vec![];
        let mut pairs = HashMap::new();
        let edge_slot = network.edges()
            .map(|edge| {
                let &(u, v) = network.endpoints(edge);
                let key = pair_key(u, v, symmetric);
                *pairs.entry(key).or_insert_with(|| {
                    levels.push(initial_value);
                    levels.len() - 1
                })
            })
            .collect();
        Ok(PheromoneModel { levels, edge_slot, pairs, symmetric })
    }
    /// Number of distinct pairs holding a level.
    pub fn len(&self) -> usize {
        self.levels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
    pub fn level(&self, u: NodeIndex, v: NodeIndex) -> f64 {
        self.pairs.get(&pair_key(u, v, self.symmetric))
            .map_or(EPSILON, |&slot| self.levels[slot])
    }
    pub fn level_of(&self, edge: EdgeIndex) -> f64 {
        self.edge_slot.get(edge.index())
            .map_or(EPSILON, |&slot| self.levels[slot])
    }
    pub fn deposit(&mut self, path: &[EdgeIndex], amount: f64) -> Result<()> {
        check_amount(amount)?;
        self.deposit_unchecked(path, amount);
        Ok(())
    }
    pub fn evaporate(&mut self, rate: f64) -> Result<()> {
        check_rate(rate)?;
        self.evaporate_unchecked(rate);
        Ok(())
    }
    /// Applies every deposit and then one evaporation. All amounts and the
    /// rate are checked first, so a rejected update leaves no trace.
    pub fn update(&mut self, deposits: &[(&[EdgeIndex], f64)], rate: f64) -> Result<()> {
        check_rate(rate)?;
        for &(_, amount) in deposits {
            check_amount(amount)?;
        }
        for &(path, amount) in deposits {
            self.deposit_unchecked(path, amount);
        }
        self.evaporate_unchecked(rate);
        Ok(())
    }
    fn deposit_unchecked(&mut self, path: &[EdgeIndex], amount: f64) {
        for edge in path {
            if let Some(&slot) = self.edge_slot.get(edge.index()) {
                self.levels[slot] += amount;
            }
        }
    }
    // levels never drop below EPSILON
    fn evaporate_unchecked(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        self.levels.iter_mut()
            .for_each(|level| *level = (*level * keep).max(EPSILON));
    }
}

fn pair_key(u: NodeIndex, v: NodeIndex, symmetric: bool) -> (NodeIndex, NodeIndex) {
    match symmetric {
        true  => (u.min(v), u.max(v)),
        false => (u, v),
    }
}

fn check_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!("deposit must be positive, got {}", amount)))
    }
}

fn check_rate(rate: f64) -> Result<()> {
    if (0.0..1.0).contains(&rate) {
        Ok(())
    } else {
        Err(Error::invalid(format!("evaporation rate must lie in [0, 1), got {}", rate)))
    }
}
