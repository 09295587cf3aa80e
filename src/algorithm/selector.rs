use itertools::Itertools;
use ordered_float::OrderedFloat;
use crate::component::Route;


/// Ranks candidate routes: cheapest first, equal costs in the order they
/// were found, and every distinct edge sequence only once.
#[derive(Clone, Copy, Debug)]
pub struct RouteSelector {
    max_routes: usize,
}

impl RouteSelector {
    pub fn new(max_routes: usize) -> Self {
        RouteSelector { max_routes }
    }
    pub fn select(&self, candidates: Vec<Route>) -> Vec<Route> {
        candidates.into_iter()
            .sorted_by_key(|route| OrderedFloat(route.cost()))
            .unique_by(|route| route.path().to_vec())
            .take(self.max_routes)
            .collect()
    }
}
