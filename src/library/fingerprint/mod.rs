mod hash_distance;
mod perceptual_hash;

#[cfg(test)]
mod tests;

pub use hash_distance::{distance, duration_matches};
pub use perceptual_hash::{Fingerprint, PerceptualHash};
#[cfg(test)]
pub use perceptual_hash::HashAlgorithm;
