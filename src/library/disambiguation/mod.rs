mod engine;


pub use engine::{decide, majority_fraction, Decision, DistanceCandidate};
