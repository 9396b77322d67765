//! Minting rule: how much a step mints given its value and the running average.
//!
//! Unclamped, a step mints `x / average`. Clamped, the average is raised to a
//! floor, scaled down before dividing, and the result is capped.

use num_bigint::BigUint;
use tracing::debug;

use crate::constants::{AVERAGE_SCALE, MAX_MINTED, MIN_AVERAGE};
use crate::error::CurveError;

/// Floor, ceiling and divisor scale for clamped minting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampPolicy {
    min_average: u64,
    max_minted: u64,
    average_scale: u64,
}

impl Default for ClampPolicy {
    fn default() -> Self {
        Self {
            min_average: MIN_AVERAGE,
            max_minted: MAX_MINTED,
            average_scale: AVERAGE_SCALE,
        }
    }
}

impl ClampPolicy {
    /// Build a policy, rejecting any whose clamped divisor could reach zero.
    pub fn new(min_average: u64, max_minted: u64, average_scale: u64) -> Result<Self, CurveError> {
        if average_scale == 0 || min_average < average_scale {
            return Err(CurveError::InvalidClampPolicy {
                min_average,
                average_scale,
            });
        }
        Ok(Self {
            min_average,
            max_minted,
            average_scale,
        })
    }

    pub fn min_average(&self) -> u64 {
        self.min_average
    }

    pub fn max_minted(&self) -> u64 {
        self.max_minted
    }

    pub fn average_scale(&self) -> u64 {
        self.average_scale
    }
}

/// How a step converts `x` and the running average into a minted amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MintRule {
    /// `minted = x / average`
    #[default]
    Unclamped,
    /// `minted = min(x / (max(average, floor) / scale), ceiling)`
    Clamped(ClampPolicy),
}

/// Outcome of applying a [`MintRule`] to one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minting {
    /// Average after the floor clamp (equal to the input when unclamped).
    pub average: BigUint,
    pub minted: BigUint,
}

impl MintRule {
    pub fn is_clamped(&self) -> bool {
        matches!(self, Self::Clamped(_))
    }

    /// Apply the rule. `average` must be non-zero when unclamped.
    pub fn mint(&self, x: &BigUint, average: BigUint) -> Minting {
        match self {
            Self::Unclamped => {
                let minted = x / &average;
                Minting { average, minted }
            }
            Self::Clamped(policy) => {
                let floor = BigUint::from(policy.min_average);
                let average = if average < floor {
                    debug!(%average, %floor, "average floor engaged");
                    floor
                } else {
                    average
                };

                let divisor = &average / policy.average_scale;
                let mut minted = x / divisor;

                let ceiling = BigUint::from(policy.max_minted);
                if minted > ceiling {
                    debug!(%minted, %ceiling, "minted ceiling engaged");
                    minted = ceiling;
                }
                Minting { average, minted }
            }
        }
    }
}
