pub mod estimator;
pub mod lookup;
pub mod normalizer;
pub mod phase;
