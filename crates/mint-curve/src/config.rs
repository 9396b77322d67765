//! Simulation configuration.
//!
//! Provides [`SimConfig`] whose defaults reproduce the canonical run:
//! quadratic growth over `i = 1..20`, no clamping, three output columns.

use crate::constants::{DEFAULT_BOUND, LONG_RUN_BOUND};
use crate::growth::GrowthFn;
use crate::mint::{ClampPolicy, MintRule};

/// Configuration for one simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Exclusive upper bound of the step counter.
    pub bound: u64,
    /// Growth function producing each step's `x`.
    pub growth: GrowthFn,
    /// Clamp policy, or `None` for unclamped minting.
    pub clamp: Option<ClampPolicy>,
    /// Append the minted amount to every output line.
    pub show_minted: bool,
    /// Log level filter string (e.g. "info", "debug", "mint_curve=trace").
    pub log_level: String,
    /// Log output format ("text" or "json").
    pub log_format: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bound: DEFAULT_BOUND,
            growth: GrowthFn::default(),
            clamp: None,
            show_minted: false,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl SimConfig {
    /// Clamped configuration over the long-run bound.
    pub fn long_run(growth: GrowthFn) -> Self {
        Self {
            bound: LONG_RUN_BOUND,
            growth,
            clamp: Some(ClampPolicy::default()),
            ..Self::default()
        }
    }

    pub fn mint_rule(&self) -> MintRule {
        match self.clamp {
            Some(policy) => MintRule::Clamped(policy),
            None => MintRule::Unclamped,
        }
    }

    /// Clamped runs always print the minted column.
    pub fn emits_minted(&self) -> bool {
        self.show_minted || self.clamp.is_some()
    }
}
