//! Capped issuance and the supply conservation invariant.
//!
//! Invariants enforced by the ledger:
//! ```text
//! total_supply ≤ supply_cap
//! Σ(balances) == total_supply
//! ```
//!
//! Minting is the only way `total_supply` changes, and it only grows.
//! Transfers move balance between holders and never touch it.

use material_types::{Amount, MaterialError, Result};

/// Tracks total issuance against the cap.
#[derive(Debug, Clone)]
pub struct SupplyTracker {
    /// Maximum total supply.
    cap: Amount,
    /// Everything minted since genesis.
    total: Amount,
}

impl SupplyTracker {
    #[must_use]
    pub fn new(cap: Amount) -> Self {
        Self { cap, total: 0 }
    }

    #[must_use]
    pub fn cap(&self) -> Amount {
        self.cap
    }

    #[must_use]
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Amount that can still be minted.
    #[must_use]
    pub fn mintable(&self) -> Amount {
        self.cap - self.total
    }

    /// Check that `amount` fits under the cap without recording it.
    ///
    /// # Errors
    /// Returns [`MaterialError::SupplyExceeded`] if `total + amount > cap`.
    pub fn check_mint(&self, amount: Amount) -> Result<()> {
        if amount > self.mintable() {
            return Err(MaterialError::SupplyExceeded {
                requested: amount,
                mintable: self.mintable(),
            });
        }
        Ok(())
    }

    /// Record a mint, re-checking the cap.
    pub fn record_mint(&mut self, amount: Amount) -> Result<()> {
        self.check_mint(amount)?;
        self.total += amount;
        Ok(())
    }

    /// Verify that the sum of all balances equals total issuance.
    ///
    /// # Errors
    /// Returns [`MaterialError::SupplyInvariantViolation`] if they differ.
    pub fn verify(&self, actual_supply: Amount) -> Result<()> {
        if actual_supply != self.total {
            return Err(MaterialError::SupplyInvariantViolation {
                reason: format!(
                    "sum of balances {actual_supply} != total supply {} (cap={})",
                    self.total, self.cap
                ),
            });
        }
        Ok(())
    }
}
