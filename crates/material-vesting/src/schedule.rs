//! Pure release arithmetic.
//!
//! Given the last processed cycle, the current elapsed cycle count, the
//! per-cycle quantum and the custody balance, compute what each newly
//! elapsed cycle releases. No state is touched here; the engine applies
//! the plan only after the ledger transfer succeeds.
//!
//! Cycles are walked in increasing order. Each receives
//! `min(quantum, remaining)`. The first cycle that finds custody empty is
//! recorded as processed with a zero release and the walk stops there, so
//! any later elapsed cycles stay unprocessed until the next claim. A zeroed
//! cycle is final: refunding does not revisit it.

use material_types::Amount;

/// Release computed for one claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    /// `(cycle, amount)` for every cycle that releases a non-zero amount,
    /// in increasing cycle order.
    pub releases: Vec<(u64, Amount)>,
    /// Cycle that found custody empty and is closed with nothing.
    pub zeroed_cycle: Option<u64>,
    /// Sum of all releases; moved in a single transfer.
    pub total: Amount,
    /// Cycle the schedule is processed up to afterwards.
    pub processed_to: u64,
}

impl ReleasePlan {
    /// Plan the release of cycles `last_processed + 1 ..= elapsed`.
    ///
    /// Returns an empty plan when `elapsed <= last_processed`.
    ///
    /// Time and memory are linear in the number of cycles walked, which is
    /// at most `balance / quantum + 2`. A small quantum against a large
    /// balance therefore makes one catch-up claim proportionally large.
    #[must_use]
    pub fn compute(last_processed: u64, elapsed: u64, quantum: Amount, balance: Amount) -> Self {
        let mut releases = Vec::new();
        let mut zeroed_cycle = None;
        let mut remaining = balance;
        let mut cycle = last_processed;

        while cycle < elapsed {
            cycle += 1;
            let amount = quantum.min(remaining);
            if amount == 0 {
                zeroed_cycle = Some(cycle);
                break;
            }
            remaining -= amount;
            releases.push((cycle, amount));
        }

        Self {
            releases,
            zeroed_cycle,
            total: balance - remaining,
            processed_to: cycle,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q: Amount = 1_000;

    #[test]
    fn one_cycle_fully_funded() {
        let plan = ReleasePlan::compute(0, 1, Q, 10 * Q);
        assert_eq!(plan.releases, vec![(1, Q)]);
        assert_eq!(plan.total, Q);
        assert_eq!(plan.zeroed_cycle, None);
        assert_eq!(plan.processed_to, 1);
    }

    #[test]
    fn catch_up_several_cycles() {
        let plan = ReleasePlan::compute(2, 5, Q, 10 * Q);
        assert_eq!(plan.releases, vec![(3, Q), (4, Q), (5, Q)]);
        assert_eq!(plan.total, 3 * Q);
        assert_eq!(plan.processed_to, 5);
    }

    #[test]
    fn underfunded_walk_stops_at_first_empty_cycle() {
        let plan = ReleasePlan::compute(0, 5, Q, 2 * Q + 7);
        assert_eq!(plan.releases, vec![(1, Q), (2, Q), (3, 7)]);
        assert_eq!(plan.zeroed_cycle, Some(4));
        assert_eq!(plan.total, 2 * Q + 7);
        // Cycle 5 is left for a later claim.
        assert_eq!(plan.processed_to, 4);
    }

    #[test]
    fn exact_funding_zeroes_next_cycle() {
        let plan = ReleasePlan::compute(0, 3, Q, 2 * Q);
        assert_eq!(plan.releases, vec![(1, Q), (2, Q)]);
        assert_eq!(plan.zeroed_cycle, Some(3));
        assert_eq!(plan.processed_to, 3);
    }

    #[test]
    fn exact_funding_to_elapsed_zeroes_nothing() {
        let plan = ReleasePlan::compute(0, 2, Q, 2 * Q);
        assert_eq!(plan.zeroed_cycle, None);
        assert_eq!(plan.processed_to, 2);
    }

    #[test]
    fn small_deposit_goes_to_next_cycle() {
        let plan = ReleasePlan::compute(18, 19, Q, 100);
        assert_eq!(plan.releases, vec![(19, 100)]);
        assert_eq!(plan.total, 100);
    }

    #[test]
    fn nothing_elapsed_is_empty() {
        let plan = ReleasePlan::compute(3, 3, Q, 10 * Q);
        assert!(plan.is_empty());
        assert!(plan.releases.is_empty());
        assert_eq!(plan.zeroed_cycle, None);
        assert_eq!(plan.processed_to, 3);
    }

    #[test]
    fn empty_balance_zeroes_first_cycle_only() {
        let plan = ReleasePlan::compute(0, 4, Q, 0);
        assert!(plan.is_empty());
        assert_eq!(plan.zeroed_cycle, Some(1));
        assert_eq!(plan.processed_to, 1);
    }

    #[test]
    fn far_future_height_does_not_walk_every_cycle() {
        let plan = ReleasePlan::compute(0, u64::MAX, Q, 3 * Q);
        assert_eq!(plan.releases.len(), 3);
        assert_eq!(plan.zeroed_cycle, Some(4));
        assert_eq!(plan.processed_to, 4);
    }

    #[test]
    fn unit_quantum_walk_is_bounded_by_balance() {
        let plan = ReleasePlan::compute(0, u64::MAX, 1, 1_000);
        assert_eq!(plan.releases.len(), 1_000);
        assert_eq!(plan.total, 1_000);
        assert_eq!(plan.processed_to, 1_001);
    }
}
