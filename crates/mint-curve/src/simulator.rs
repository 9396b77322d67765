//! Growth simulator: the accumulation loop over `i = 1, 2, ..., bound - 1`.
//!
//! [`MintState`] holds the running totals, [`Simulator`] iterates the steps,
//! and [`run`] drives a full simulation into any [`Write`] sink.

use std::io::Write;

use num_bigint::BigUint;
use num_traits::One;
use tracing::{info, trace};

use crate::config::SimConfig;
use crate::constants::{INITIAL_COUNT, INITIAL_SUPPLY, INITIAL_TOTAL};
use crate::error::CurveError;
use crate::growth::GrowthFn;
use crate::mint::MintRule;

/// Every value computed during one iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub i: u64,
    pub x: BigUint,
    /// Running total after adding `x`.
    pub total: BigUint,
    /// Step count after this step (`i + 1` for a fresh run).
    pub count: BigUint,
    /// `total / count`, after the floor clamp if any.
    pub average: BigUint,
    pub minted: BigUint,
    /// Supply after adding `minted`.
    pub supply: BigUint,
}

impl Step {
    /// Output line: `x total supply`, with ` minted` appended when requested.
    pub fn line(&self, with_minted: bool) -> String {
        if with_minted {
            format!("{} {} {} {}", self.x, self.total, self.supply, self.minted)
        } else {
            format!("{} {} {}", self.x, self.total, self.supply)
        }
    }
}

/// Running totals carried between steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintState {
    pub total: BigUint,
    pub count: BigUint,
    pub supply: BigUint,
}

impl Default for MintState {
    fn default() -> Self {
        Self::new()
    }
}

impl MintState {
    pub fn new() -> Self {
        Self {
            total: BigUint::from(INITIAL_TOTAL),
            count: BigUint::from(INITIAL_COUNT),
            supply: BigUint::from(INITIAL_SUPPLY),
        }
    }

    /// Fold step `i` with value `x` into the totals and report the step.
    pub fn advance(&mut self, i: u64, x: BigUint, rule: &MintRule) -> Step {
        self.total += &x;
        self.count += 1u32;

        let average = &self.total / &self.count;
        let minting = rule.mint(&x, average);
        self.supply += &minting.minted;

        Step {
            i,
            x,
            total: self.total.clone(),
            count: self.count.clone(),
            average: minting.average,
            minted: minting.minted,
            supply: self.supply.clone(),
        }
    }
}

/// Iterator over the steps of one simulation.
#[derive(Debug, Clone)]
pub struct Simulator {
    growth: GrowthFn,
    rule: MintRule,
    bound: u64,
    next_i: u64,
    state: MintState,
}

impl Simulator {
    /// Steps run for `i` in `1..bound`; a bound of 0 or 1 yields nothing.
    pub fn new(growth: GrowthFn, rule: MintRule, bound: u64) -> Self {
        Self {
            growth,
            rule,
            bound,
            next_i: 1,
            state: MintState::new(),
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.growth, config.mint_rule(), config.bound)
    }

    pub fn state(&self) -> &MintState {
        &self.state
    }

    pub fn growth(&self) -> GrowthFn {
        self.growth
    }

    pub fn rule(&self) -> &MintRule {
        &self.rule
    }
}

impl Iterator for Simulator {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.next_i >= self.bound {
            return None;
        }
        let i = self.next_i;
        self.next_i += 1;

        let x = self.growth.apply(i);
        let step = self.state.advance(i, x, &self.rule);
        trace!(
            i,
            x = %step.x,
            total = %step.total,
            average = %step.average,
            minted = %step.minted,
            supply = %step.supply,
            "step"
        );
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bound.saturating_sub(self.next_i);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Totals at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub total: BigUint,
    pub count: BigUint,
    pub supply: BigUint,
}

/// Run the configured simulation, writing one line per step to `out`.
pub fn run<W: Write>(config: &SimConfig, out: &mut W) -> Result<RunSummary, CurveError> {
    let with_minted = config.emits_minted();
    let mut sim = Simulator::from_config(config);
    info!(
        growth = %config.growth,
        bound = config.bound,
        clamp = ?config.clamp,
        "starting simulation"
    );

    let mut steps = 0u64;
    for step in sim.by_ref() {
        writeln!(out, "{}", step.line(with_minted))?;
        steps += 1;
    }
    out.flush()?;

    let state = sim.state();
    let summary = RunSummary {
        steps,
        total: state.total.clone(),
        count: state.count.clone(),
        supply: state.supply.clone(),
    };
    info!(
        steps,
        total = %summary.total,
        supply = %summary.supply,
        "simulation complete"
    );
    debug_assert_eq!(summary.count, BigUint::one() + steps);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mint::ClampPolicy;
    use proptest::prelude::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    fn tuple(s: &Step) -> (u64, u64, u64, u64, u64, u64) {
        let n = |v: &BigUint| u64::try_from(v).unwrap();
        (n(&s.x), n(&s.total), n(&s.count), n(&s.average), n(&s.minted), n(&s.supply))
    }

    // ------------------------------------------------------------------
    // MintState
    // ------------------------------------------------------------------

    #[test]
    fn initial_state() {
        let s = MintState::new();
        assert_eq!(s.total, big(1));
        assert_eq!(s.count, big(1));
        assert_eq!(s.supply, big(0));
        assert_eq!(MintState::default(), s);
    }

    #[test]
    fn advance_updates_totals() {
        let mut s = MintState::new();
        let step = s.advance(1, big(1), &MintRule::Unclamped);
        assert_eq!(tuple(&step), (1, 2, 2, 1, 1, 1));
        assert_eq!(s.total, big(2));
        assert_eq!(s.count, big(2));
        assert_eq!(s.supply, big(1));
    }

    // ------------------------------------------------------------------
    // Simulator
    // ------------------------------------------------------------------

    #[test]
    fn linear_first_steps() {
        let steps: Vec<_> = Simulator::new(GrowthFn::Linear, MintRule::Unclamped, 5).collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(tuple(&steps[0]), (1, 2, 2, 1, 1, 1));
        assert_eq!(tuple(&steps[1]), (2, 4, 3, 1, 2, 3));
        assert_eq!(tuple(&steps[2]), (3, 7, 4, 1, 3, 6));
        assert_eq!(tuple(&steps[3]), (4, 11, 5, 2, 2, 8));
    }

    #[test]
    fn quadratic_first_steps() {
        let steps: Vec<_> =
            Simulator::new(GrowthFn::Quadratic, MintRule::Unclamped, 5).collect();
        assert_eq!(tuple(&steps[0]), (1, 2, 2, 1, 1, 1));
        assert_eq!(tuple(&steps[1]), (4, 6, 3, 2, 2, 3));
        assert_eq!(tuple(&steps[2]), (9, 15, 4, 3, 3, 6));
        assert_eq!(tuple(&steps[3]), (16, 31, 5, 6, 2, 8));
    }

    #[test]
    fn constant_mints_one_every_step() {
        for step in Simulator::new(GrowthFn::Constant, MintRule::Unclamped, 200) {
            assert_eq!(step.average, big(1), "average at i={}", step.i);
            assert_eq!(step.minted, big(1), "minted at i={}", step.i);
            assert_eq!(step.supply, big(step.i));
        }
    }

    #[test]
    fn bound_is_exclusive() {
        let sim = Simulator::new(GrowthFn::Linear, MintRule::Unclamped, 20);
        assert_eq!(sim.size_hint(), (19, Some(19)));
        let last = sim.last().unwrap();
        assert_eq!(last.i, 19);
    }

    #[test]
    fn tiny_bounds_yield_nothing() {
        assert_eq!(Simulator::new(GrowthFn::Linear, MintRule::Unclamped, 0).count(), 0);
        assert_eq!(Simulator::new(GrowthFn::Linear, MintRule::Unclamped, 1).count(), 0);
    }

    #[test]
    fn exhausted_simulator_stays_exhausted() {
        let mut sim = Simulator::new(GrowthFn::Linear, MintRule::Unclamped, 2);
        assert!(sim.next().is_some());
        assert!(sim.next().is_none());
        assert!(sim.next().is_none());
        assert_eq!(sim.state().count, big(2));
    }

    #[test]
    fn clamped_exponential_leaves_floor() {
        // The clamped divisor stays at 1 through i = 13, so minted == x there.
        let rule = MintRule::Clamped(ClampPolicy::default());
        let steps: Vec<_> = Simulator::new(GrowthFn::Exponential, rule, 25).collect();
        assert_eq!(steps[0].minted, big(2));
        assert_eq!(steps[0].average, big(1_000));
        assert_eq!(steps[12].minted, big(8_192));
        assert_eq!(steps[13].minted, big(8_192));
        assert_eq!(steps.last().unwrap().supply, big(128_932));
    }

    // ------------------------------------------------------------------
    // Step::line
    // ------------------------------------------------------------------

    #[test]
    fn line_formats() {
        let mut sim = Simulator::new(GrowthFn::Quadratic, MintRule::Unclamped, 20);
        let step = sim.nth(3).unwrap();
        assert_eq!(step.line(false), "16 31 8");
        assert_eq!(step.line(true), "16 31 8 2");
    }

    // ------------------------------------------------------------------
    // run
    // ------------------------------------------------------------------

    #[test]
    fn run_writes_one_line_per_step() {
        let config = SimConfig::default();
        let mut out = Vec::new();
        let summary = run(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 19);
        assert_eq!(summary.steps, 19);
        assert_eq!(summary.count, big(20));
        assert!(text.starts_with("1 2 1\n4 6 3\n"));
    }

    #[test]
    fn run_propagates_write_errors() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let err = run(&SimConfig::default(), &mut Closed).unwrap_err();
        assert!(matches!(err, CurveError::Io(_)));
    }

    // --- proptest ---

    fn any_growth() -> impl Strategy<Value = GrowthFn> {
        (0..GrowthFn::ALL.len()).prop_map(|idx| GrowthFn::ALL[idx])
    }

    proptest! {
        #[test]
        fn running_totals_hold(growth in any_growth(), clamp in any::<bool>(), bound in 0u64..120) {
            let rule = if clamp { MintRule::Clamped(ClampPolicy::default()) } else { MintRule::Unclamped };
            let mut sum_x = big(1);
            let mut sum_minted = big(0);
            let mut prev_supply = big(0);
            for (n, step) in Simulator::new(growth, rule, bound).enumerate() {
                sum_x += &step.x;
                sum_minted += &step.minted;
                prop_assert_eq!(&step.total, &sum_x);
                prop_assert_eq!(&step.count, &big(n as u64 + 2));
                prop_assert_eq!(&step.supply, &sum_minted);
                prop_assert!(step.supply >= prev_supply);
                prev_supply = step.supply.clone();
            }
        }

        #[test]
        fn clamped_minted_bounded(growth in any_growth(), bound in 0u64..200) {
            let rule = MintRule::Clamped(ClampPolicy::default());
            for step in Simulator::new(growth, rule, bound) {
                prop_assert!(step.minted <= big(1_000_000));
            }
        }
    }
}
