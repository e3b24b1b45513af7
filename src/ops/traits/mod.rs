//! Operation traits

mod prune;

pub use prune::PruneOps;
