use serde::{Deserialize, Serialize};

use super::errors::ThresholdError;

/// Hash distance thresholds consumed by the disambiguation engine.
///
/// Relationships between the values are checked once by [`Thresholds::validate`] when
/// the configuration is loaded. The engine itself trusts whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub accept_distance: u32,
    pub ambiguous_min: u32,
    pub ambiguous_max: u32,
    pub distance_margin_accept: u32,
    pub majority_accept_fraction: f64,
}

impl Thresholds {
    /// Build thresholds from user supplied (possibly negative) values and validate them.
    pub fn from_signed(
        accept_distance: i64,
        ambiguous_min: i64,
        ambiguous_max: i64,
        distance_margin_accept: i64,
        majority_accept_fraction: f64,
    ) -> Result<Self, ThresholdError> {
        fn non_negative(name: &'static str, value: i64) -> Result<u32, ThresholdError> {
            if value < 0 {
                Err(ThresholdError::Negative { name, value })
            } else if value > u32::MAX as i64 {
                Err(ThresholdError::TooLarge { name, value })
            } else {
                Ok(value as u32)
            }
        }

        let ret = Self {
            accept_distance: non_negative("accept_distance", accept_distance)?,
            ambiguous_min: non_negative("ambiguous_min", ambiguous_min)?,
            ambiguous_max: non_negative("ambiguous_max", ambiguous_max)?,
            distance_margin_accept: non_negative("distance_margin_accept", distance_margin_accept)?,
            majority_accept_fraction,
        };

        ret.validate()?;
        Ok(ret)
    }

    pub fn validate(&self) -> Result<(), ThresholdError> {
        use ThresholdError::*;

        if !(0.0..=1.0).contains(&self.majority_accept_fraction) {
            return Err(FractionOutOfRange(self.majority_accept_fraction));
        }

        if self.accept_distance >= self.ambiguous_min {
            return Err(AcceptNotBelowAmbiguous {
                accept_distance: self.accept_distance,
                ambiguous_min: self.ambiguous_min,
            });
        }

        if self.ambiguous_min > self.ambiguous_max {
            return Err(AmbiguousBandInverted {
                ambiguous_min: self.ambiguous_min,
                ambiguous_max: self.ambiguous_max,
            });
        }

        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        super::definitions::DEFAULT_THRESHOLDS
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringCfg {
    pub duration_tolerance: f64,
}

impl Default for ScoringCfg {
    fn default() -> Self {
        Self {
            duration_tolerance: super::definitions::DEFAULT_DURATION_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatchCfg {
    pub thresholds: Thresholds,
    pub scoring: ScoringCfg,
}
