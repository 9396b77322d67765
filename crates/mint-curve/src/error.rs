//! Error types for the mint curve.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurveError {
    #[error("unknown growth function: {0}")] UnknownGrowthFn(String),
    #[error("invalid clamp policy: min_average {min_average} must be >= average_scale {average_scale} > 0")]
    InvalidClampPolicy { min_average: u64, average_scale: u64 },
    #[error("output: {0}")] Io(#[from] std::io::Error),
}
