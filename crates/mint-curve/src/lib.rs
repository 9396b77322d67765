//! # mint-curve — Token minting growth simulator.
//!
//! All calculations use arbitrary-precision integer arithmetic only.
//!
//! Each step feeds a value `x = growth(i)` into a running total, derives the
//! running average `total / count`, and mints `x / average` into the supply:
//! - **Growth functions**: constant, linear, quadratic, cubic, exponential,
//!   sublinear and an approximate square root of the step counter.
//! - **Clamping**: optional floor on the average and ceiling on the minted
//!   amount, with the divisor scaled down by [`constants::AVERAGE_SCALE`].
//! - **Simulator**: an iterator of [`Step`]s plus a [`run`] driver that writes
//!   one line per step.

pub mod config;
pub mod constants;
pub mod error;
pub mod growth;
pub mod mint;
pub mod simulator;

pub use config::SimConfig;
pub use error::CurveError;
pub use growth::{approx_sqrt, GrowthFn};
pub use mint::{ClampPolicy, MintRule, Minting};
pub use simulator::{run, MintState, RunSummary, Simulator, Step};
