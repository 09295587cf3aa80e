mod route;

pub use route::{IterationStat, Route};
