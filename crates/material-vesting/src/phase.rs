//! Derived lifecycle phase of a vesting schedule.
//!
//! Phases are never stored; they are computed from the block height, the
//! custody balance and the last processed cycle. There is no terminal
//! phase: a drained schedule returns to `Draining` whenever it is refunded
//! and a new cycle has elapsed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a schedule stands at a given height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VestingPhase {
    /// Height is before the start block.
    Unstarted,
    /// Started, but nothing new to release: no unprocessed cycle or no
    /// custody balance.
    Pending,
    /// Custody is funded and at least one elapsed cycle is unprocessed.
    Draining,
}

impl VestingPhase {
    /// Whether `claim` would succeed in this phase.
    #[must_use]
    pub fn is_claimable(self) -> bool {
        matches!(self, Self::Draining)
    }
}

impl fmt::Display for VestingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unstarted => write!(f, "UNSTARTED"),
            Self::Pending => write!(f, "PENDING"),
            Self::Draining => write!(f, "DRAINING"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_draining_is_claimable() {
        assert!(!VestingPhase::Unstarted.is_claimable());
        assert!(!VestingPhase::Pending.is_claimable());
        assert!(VestingPhase::Draining.is_claimable());
    }

    #[test]
    fn phase_display() {
        assert_eq!(format!("{}", VestingPhase::Unstarted), "UNSTARTED");
        assert_eq!(format!("{}", VestingPhase::Pending), "PENDING");
        assert_eq!(format!("{}", VestingPhase::Draining), "DRAINING");
    }

    #[test]
    fn phase_serde_name() {
        let json = serde_json::to_string(&VestingPhase::Draining).unwrap();
        assert_eq!(json, "\"draining\"");
    }
}
