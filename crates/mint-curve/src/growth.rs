//! Growth functions mapping the step counter `i` to the step value `x`.
//!
//! Every function yields `x >= 1` for `i >= 1`, which keeps the running
//! average at or above 1 and the unclamped divisor non-zero.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::One;

use crate::constants::{SUBLINEAR_DENOMINATOR, SUBLINEAR_NUMERATOR};
use crate::error::CurveError;

/// Selectable per-step growth formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GrowthFn {
    /// `x = 1`
    Constant,
    /// `x = i`
    Linear,
    /// `x = i^2`
    #[default]
    Quadratic,
    /// `x = i^3`
    Cubic,
    /// `x = 2^i`
    Exponential,
    /// `x = (50 * i / 100) + 1`
    Sublinear,
    /// `x = approx_sqrt(i)`
    Sqrt,
}

impl GrowthFn {
    /// Every growth function, in declaration order.
    pub const ALL: [GrowthFn; 7] = [
        GrowthFn::Constant,
        GrowthFn::Linear,
        GrowthFn::Quadratic,
        GrowthFn::Cubic,
        GrowthFn::Exponential,
        GrowthFn::Sublinear,
        GrowthFn::Sqrt,
    ];

    /// Compute `x` for step `i`.
    pub fn apply(&self, i: u64) -> BigUint {
        let n = BigUint::from(i);
        match self {
            Self::Constant => BigUint::one(),
            Self::Linear => n,
            Self::Quadratic => n.pow(2),
            Self::Cubic => n.pow(3),
            Self::Exponential => BigUint::one() << i,
            Self::Sublinear => n * SUBLINEAR_NUMERATOR / SUBLINEAR_DENOMINATOR + 1u32,
            Self::Sqrt => approx_sqrt(&n),
        }
    }

    /// Lowercase name accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::Cubic => "cubic",
            Self::Exponential => "exponential",
            Self::Sublinear => "sublinear",
            Self::Sqrt => "sqrt",
        }
    }
}

impl fmt::Display for GrowthFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrowthFn {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.name() == wanted)
            .ok_or_else(|| CurveError::UnknownGrowthFn(s.to_string()))
    }
}

/// Coarse square root: the largest power of two whose square is `<= n`.
///
/// Doubles a candidate while its square still fits under `n`. This is not the
/// exact integer square root (`approx_sqrt(9) == 2`), and `approx_sqrt(0)`
/// returns 1 because the loop never runs.
pub fn approx_sqrt(n: &BigUint) -> BigUint {
    let mut result = BigUint::one();
    let mut current = BigUint::one();
    while &current * &current <= *n {
        result = current.clone();
        current <<= 1u32;
    }
    result
}
