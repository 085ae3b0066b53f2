//! The vesting engine: releases a pre-funded custody balance to a single
//! wallet, one fixed quantum per elapsed cycle.
//!
//! ```text
//! elapsed(h) = (h - start) / len
//! claim at height h releases cycles last+1 ..= elapsed(h)
//! ```
//!
//! `claim` is permissionless. Funds move through the ledger's ordinary
//! transfer from the schedule's custody address, so the ledger's own
//! checks (gate, balance) apply. If that transfer fails, nothing here
//! changes.

use std::collections::BTreeMap;

use material_ledger::AssetLedger;
use material_types::{Address, Amount, Event, EventLog, MaterialError, Result, VestingConfig};
use tracing::{debug, info, warn};

use crate::phase::VestingPhase;
use crate::schedule::ReleasePlan;

/// Cycle-based release schedule for one asset and one beneficiary.
#[derive(Debug, Clone)]
pub struct VestingEngine {
    /// Custody account holding the funds to release.
    address: Address,
    /// The asset ledger's address.
    token: Address,
    admin: Address,
    wallet: Address,
    start_block: u64,
    unlock_cycle_blocks: u64,
    unlock_amount_per_cycle: Amount,
    last_processed_cycle: u64,
    /// Non-zero releases by cycle. Processed cycles absent here released 0.
    /// Holds one entry per funded cycle ever released.
    unlocked: BTreeMap<u64, Amount>,
    events: EventLog,
}

impl VestingEngine {
    /// Create a schedule with no processed cycles.
    ///
    /// # Errors
    /// `Configuration` if any address is zero, the wallet is the custody
    /// address, or the cycle length or quantum is zero.
    pub fn new(config: VestingConfig) -> Result<Self> {
        config.validate()?;
        info!(
            address = %config.address,
            token = %config.token,
            wallet = %config.wallet,
            start_block = config.start_block,
            cycle_blocks = config.unlock_cycle_blocks,
            per_cycle = config.unlock_amount_per_cycle,
            "vesting schedule created"
        );
        Ok(Self {
            address: config.address,
            token: config.token,
            admin: config.admin,
            wallet: config.wallet,
            start_block: config.start_block,
            unlock_cycle_blocks: config.unlock_cycle_blocks,
            unlock_amount_per_cycle: config.unlock_amount_per_cycle,
            last_processed_cycle: 0,
            unlocked: BTreeMap::new(),
            events: EventLog::new(),
        })
    }

    /// The production MTRL schedule for a ledger, deployed at `deployed_at`.
    pub fn material(
        address: Address,
        ledger: &AssetLedger,
        admin: Address,
        wallet: Address,
        deployed_at: u64,
    ) -> Result<Self> {
        Self::new(VestingConfig::material(address, ledger.address(), admin, wallet, deployed_at))
    }

    // -----------------------------------------------------------------
    // Release
    // -----------------------------------------------------------------

    /// Release newly elapsed cycles to the wallet. Returns the amount moved.
    ///
    /// Catches up on every elapsed cycle, stopping early at the first cycle
    /// that finds custody empty (that cycle is closed with nothing).
    ///
    /// # Errors
    /// - `TokenMismatch` if `ledger` is not this schedule's asset
    /// - `NotStarted` before the start block
    /// - `NoTokens` if custody holds nothing
    /// - `NotClaimable` if no new cycle has elapsed
    /// - any ledger transfer error, with no bookkeeping change
    pub fn claim(&mut self, ledger: &mut AssetLedger, height: u64) -> Result<Amount> {
        self.check_token(ledger)?;
        if height < self.start_block {
            return Err(MaterialError::NotStarted { start_block: self.start_block, height });
        }
        let elapsed = self.elapsed_cycles(height);
        let balance = ledger.balance_of(&self.address);
        if balance == 0 {
            debug!(height, elapsed, "claim rejected: custody empty");
            return Err(MaterialError::NoTokens);
        }
        if elapsed <= self.last_processed_cycle {
            return Err(MaterialError::NotClaimable {
                elapsed,
                last_processed: self.last_processed_cycle,
            });
        }

        let plan = ReleasePlan::compute(
            self.last_processed_cycle,
            elapsed,
            self.unlock_amount_per_cycle,
            balance,
        );
        debug!(
            from_cycle = self.last_processed_cycle + 1,
            to_cycle = elapsed,
            total = plan.total,
            "release planned"
        );

        ledger.transfer(self.address, self.wallet, plan.total)?;

        if let Some(cycle) = plan.zeroed_cycle {
            warn!(cycle, "cycle processed with zero release (custody exhausted)");
        }
        self.unlocked.extend(plan.releases.iter().copied());
        self.last_processed_cycle = plan.processed_to;
        self.events.emit(Event::Claimed {
            amount: plan.total,
            cycle: plan.processed_to,
            wallet: self.wallet,
        });
        info!(amount = plan.total, cycle = plan.processed_to, wallet = %self.wallet, "claimed");
        Ok(plan.total)
    }

    /// What `claim` would release at `height`, or 0 if it would fail.
    #[must_use]
    pub fn releasable(&self, ledger: &AssetLedger, height: u64) -> Amount {
        if ledger.address() != self.token || height < self.start_block {
            return 0;
        }
        ReleasePlan::compute(
            self.last_processed_cycle,
            self.elapsed_cycles(height),
            self.unlock_amount_per_cycle,
            ledger.balance_of(&self.address),
        )
        .total
    }

    /// Phase of the schedule at `height`.
    #[must_use]
    pub fn phase(&self, ledger: &AssetLedger, height: u64) -> VestingPhase {
        if height < self.start_block {
            VestingPhase::Unstarted
        } else if ledger.balance_of(&self.address) > 0
            && self.elapsed_cycles(height) > self.last_processed_cycle
        {
            VestingPhase::Draining
        } else {
            VestingPhase::Pending
        }
    }

    fn check_token(&self, ledger: &AssetLedger) -> Result<()> {
        if ledger.address() != self.token {
            return Err(MaterialError::TokenMismatch {
                expected: self.token,
                actual: ledger.address(),
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------

    /// Point future releases at `new_wallet`. Admin only.
    ///
    /// # Errors
    /// `Unauthorized`, or `InvalidWallet` if `new_wallet` is zero, the
    /// current wallet, or the custody address.
    pub fn set_wallet(&mut self, caller: Address, new_wallet: Address) -> Result<()> {
        self.ensure_admin(&caller)?;
        if new_wallet.is_zero() || new_wallet == self.wallet || new_wallet == self.address {
            return Err(MaterialError::InvalidWallet);
        }
        let previous = std::mem::replace(&mut self.wallet, new_wallet);
        self.events.emit(Event::WalletChanged { previous, new: new_wallet });
        info!(previous = %previous, new = %new_wallet, "vesting wallet changed");
        Ok(())
    }

    /// Hand the admin role to `new_admin`.
    ///
    /// # Errors
    /// `Unauthorized`, or `InvalidAdmin` if `new_admin` is zero or the
    /// current admin.
    pub fn transfer_ownership(&mut self, caller: Address, new_admin: Address) -> Result<()> {
        self.ensure_admin(&caller)?;
        if new_admin.is_zero() || new_admin == self.admin {
            return Err(MaterialError::InvalidAdmin);
        }
        let previous = std::mem::replace(&mut self.admin, new_admin);
        self.events.emit(Event::OwnershipTransferred { previous, new: new_admin });
        info!(previous = %previous, new = %new_admin, "vesting ownership transferred");
        Ok(())
    }

    fn ensure_admin(&self, caller: &Address) -> Result<()> {
        if *caller == self.admin {
            Ok(())
        } else {
            warn!(caller = %caller, "rejected: caller is not the vesting admin");
            Err(MaterialError::Unauthorized { caller: *caller })
        }
    }

    /// Drain the event journal.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    // -----------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn token(&self) -> Address {
        self.token
    }

    #[must_use]
    pub fn admin(&self) -> Address {
        self.admin
    }

    #[must_use]
    pub fn wallet(&self) -> Address {
        self.wallet
    }

    #[must_use]
    pub fn start_block(&self) -> u64 {
        self.start_block
    }

    #[must_use]
    pub fn unlock_cycle_blocks(&self) -> u64 {
        self.unlock_cycle_blocks
    }

    #[must_use]
    pub fn unlock_amount_per_cycle(&self) -> Amount {
        self.unlock_amount_per_cycle
    }

    #[must_use]
    pub fn last_processed_cycle(&self) -> u64 {
        self.last_processed_cycle
    }

    /// Amount released for `cycle`; 0 if unprocessed or zeroed.
    #[must_use]
    pub fn unlocked_amount(&self, cycle: u64) -> Amount {
        self.unlocked.get(&cycle).copied().unwrap_or(0)
    }

    /// Whether `cycle` has been processed with a non-zero release.
    #[must_use]
    pub fn is_unlocked(&self, cycle: u64) -> bool {
        cycle <= self.last_processed_cycle && self.unlocked_amount(cycle) > 0
    }

    /// Whole cycles elapsed since the start block; 0 before it.
    #[must_use]
    pub fn elapsed_cycles(&self, height: u64) -> u64 {
        height.saturating_sub(self.start_block) / self.unlock_cycle_blocks
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
