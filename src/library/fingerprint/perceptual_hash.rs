use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::library::definitions::PHASH_BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Phash,
    Oshash,
}

/// A fingerprint as submitted to a metadata provider: the hash in hex, the algorithm that
/// produced it, and the media duration (seconds) the submitter reported alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub hash: String,
    pub algorithm: HashAlgorithm,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl Fingerprint {
    pub fn phash(hash: impl Into<String>, duration: Option<f64>) -> Self {
        Self {
            hash: hash.into(),
            algorithm: HashAlgorithm::Phash,
            duration,
        }
    }

    /// Decode the hash if this is a perceptual hash. OSHASH fingerprints are whole-file
    /// hashes, so a bit distance between them means nothing.
    pub fn perceptual_hash(&self) -> Option<Result<PerceptualHash, HashParseError>> {
        match self.algorithm {
            HashAlgorithm::Phash => Some(PerceptualHash::from_hex(&self.hash)),
            HashAlgorithm::Oshash => None,
        }
    }
}

/// A fixed-width perceptual hash bit vector.
#[derive(Clone, PartialEq, Eq, Hash, Default, Ord, PartialOrd)]
pub struct PerceptualHash {
    bytes: Vec<u8>,
}

impl PerceptualHash {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, HashParseError> {
        let trimmed = hex_str.trim();
        if trimmed.is_empty() {
            return Err(HashParseError::Empty);
        }

        let bytes = hex::decode(trimmed).map_err(|e| HashParseError::InvalidHex {
            hash: trimmed.to_string(),
            src: format!("{}", e),
        })?;

        Ok(Self { bytes })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit_width(&self) -> u32 {
        self.bytes.len() as u32 * 8
    }

    pub fn is_standard_width(&self) -> bool {
        self.bit_width() == PHASH_BITS
    }
}

impl std::fmt::Debug for PerceptualHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "PerceptualHash({})", self.to_hex())
    }
}

impl From<u64> for PerceptualHash {
    fn from(val: u64) -> Self {
        Self::from_bytes(val.to_be_bytes().to_vec())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashParseError {
    #[error("hash is empty")]
    Empty,

    #[error("hash {hash} is not valid hex: {src}")]
    InvalidHex { hash: String, src: String },
}
