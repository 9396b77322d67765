//! Curve constants. All quantities are unitless integers.

/// Starting value of the running total.
pub const INITIAL_TOTAL: u64 = 1;

/// Starting value of the step count.
pub const INITIAL_COUNT: u64 = 1;

/// Starting value of the minted supply.
pub const INITIAL_SUPPLY: u64 = 0;

/// Exclusive upper bound of the step counter for a default run.
pub const DEFAULT_BOUND: u64 = 20;

/// Exclusive upper bound of the step counter for a long run.
pub const LONG_RUN_BOUND: u64 = 10_000_000_000;

/// Clamped runs never divide by an average below this floor.
pub const MIN_AVERAGE: u64 = 1_000;

/// Clamped runs never mint more than this in a single step.
pub const MAX_MINTED: u64 = 1_000_000;

/// Clamped runs divide `x` by `average / AVERAGE_SCALE`.
pub const AVERAGE_SCALE: u64 = 1_000;

/// Sublinear growth is `(SUBLINEAR_NUMERATOR * i / SUBLINEAR_DENOMINATOR) + 1`.
pub const SUBLINEAR_NUMERATOR: u64 = 50;

/// See [`SUBLINEAR_NUMERATOR`].
pub const SUBLINEAR_DENOMINATOR: u64 = 100;
