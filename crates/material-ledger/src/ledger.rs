//! The asset ledger: balances, allowances, issuance and the transfer gate.
//!
//! Every mutating operation takes the caller explicitly, validates
//! everything it needs first, and only then mutates. A returned error
//! therefore never leaves partial state behind.

use std::collections::HashMap;

use material_types::{
    Address, Amount, AssetConfig, Event, EventLog, Hash32, MaterialError, Result, constants,
};
use tracing::{debug, info, warn};

use crate::admins::AdminSet;
use crate::nonces::NonceBook;
use crate::permit::PermitDomain;
use crate::supply::SupplyTracker;

/// Capped, admin-issued fungible asset with an optional transfer gate.
#[derive(Debug, Clone)]
pub struct AssetLedger {
    name: String,
    symbol: String,
    decimals: u8,
    /// The asset's own address (EIP-712 `verifyingContract`).
    address: Address,
    chain_id: u64,
    supply: SupplyTracker,
    admins: AdminSet,
    /// When `false`, only transfers touching a privileged account pass.
    transfers_allowed: bool,
    balances: HashMap<Address, Amount>,
    /// `(owner, spender) -> remaining allowance`.
    allowances: HashMap<(Address, Address), Amount>,
    nonces: NonceBook,
    events: EventLog,
}

impl AssetLedger {
    /// Create an empty ledger. The seed admin becomes the primary admin and
    /// sole member of the admin set.
    ///
    /// # Errors
    /// Returns `Configuration` if the config fails validation.
    pub fn new(config: AssetConfig) -> Result<Self> {
        config.validate()?;
        info!(
            name = %config.name,
            symbol = %config.symbol,
            address = %config.address,
            chain_id = config.chain_id,
            seed_admin = %config.seed_admin,
            "asset ledger created"
        );
        Ok(Self {
            name: config.name,
            symbol: config.symbol,
            decimals: config.decimals,
            address: config.address,
            chain_id: config.chain_id,
            supply: SupplyTracker::new(config.supply_cap),
            admins: AdminSet::new(config.seed_admin),
            transfers_allowed: config.transfers_allowed,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            nonces: NonceBook::new(),
            events: EventLog::new(),
        })
    }

    /// The production MTRL asset on `chain_id`.
    pub fn material(address: Address, chain_id: u64, seed_admin: Address) -> Result<Self> {
        Self::new(AssetConfig::material(address, chain_id, seed_admin))
    }

    // -----------------------------------------------------------------
    // Issuance and administration
    // -----------------------------------------------------------------

    /// Mint `amount` new units to `to`.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not in the admin set
    /// - `InvalidAmount` if `amount == 0`
    /// - `InvalidAddress` if `to` is zero
    /// - `SupplyExceeded` if the cap would be passed
    pub fn mint(&mut self, caller: Address, to: Address, amount: Amount) -> Result<()> {
        self.admins.ensure_member(&caller)?;
        if amount == 0 {
            return Err(MaterialError::InvalidAmount);
        }
        if to.is_zero() {
            return Err(MaterialError::InvalidAddress);
        }
        self.supply.check_mint(amount)?;

        self.supply.record_mint(amount)?;
        *self.balances.entry(to).or_insert(0) += amount;
        self.events.emit(Event::Transfer { from: Address::ZERO, to, amount });
        info!(
            minter = %caller,
            to = %to,
            amount,
            total_supply = self.supply.total(),
            "minted"
        );
        Ok(())
    }

    /// Open or close the transfer gate. Primary admin only.
    pub fn set_transfers_allowed(&mut self, caller: Address, allowed: bool) -> Result<()> {
        self.admins.ensure_primary(&caller)?;
        self.transfers_allowed = allowed;
        self.events.emit(Event::TransfersAllowedChanged { allowed });
        info!(admin = %caller, allowed, "transfer gate changed");
        Ok(())
    }

    /// Add `account` to or remove it from the admin set. Any member or the
    /// primary admin may call this.
    ///
    /// A member may revoke itself. The primary admin may leave the set too;
    /// it keeps its primary privileges.
    ///
    /// # Errors
    /// `Unauthorized` for any other caller, `InvalidAddress` for zero.
    pub fn set_admin(&mut self, caller: Address, account: Address, is_admin: bool) -> Result<()> {
        self.admins.ensure_privileged(&caller)?;
        let changed = self.admins.set_member(account, is_admin)?;
        self.events.emit(Event::AdminSet { account, is_admin });
        info!(admin = %caller, account = %account, is_admin, changed, "admin set updated");
        Ok(())
    }

    /// Hand the primary admin role to `new_admin`. Admin set membership is
    /// untouched.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the primary admin; `InvalidAdmin`
    /// if `new_admin` is zero or already the primary admin.
    pub fn transfer_ownership(&mut self, caller: Address, new_admin: Address) -> Result<()> {
        self.admins.ensure_primary(&caller)?;
        let previous = self.admins.replace_primary(new_admin)?;
        self.events.emit(Event::OwnershipTransferred { previous, new: new_admin });
        info!(previous = %previous, new = %new_admin, "asset ownership transferred");
        Ok(())
    }

    // -----------------------------------------------------------------
    // Transfers
    // -----------------------------------------------------------------

    /// Move `amount` from `caller` to `to`.
    ///
    /// # Errors
    /// `TransferDisabled`, `InvalidAddress` or `InsufficientBalance`.
    pub fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> Result<()> {
        self.check_transfer(caller, to, amount)?;
        self.move_balance(caller, to, amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to` on behalf of `spender`, spending
    /// the allowance `from` granted it.
    ///
    /// An allowance of [`constants::UNLIMITED_ALLOWANCE`] is never
    /// decremented.
    ///
    /// # Errors
    /// As [`Self::transfer`], plus `InsufficientAllowance`.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.check_transfer(from, to, amount)?;
        let allowed = self.allowance(&from, &spender);
        if allowed < amount {
            debug!(owner = %from, spender = %spender, allowed, amount, "allowance too low");
            return Err(MaterialError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }

        if allowed != constants::UNLIMITED_ALLOWANCE {
            let remaining = allowed - amount;
            self.allowances.insert((from, spender), remaining);
            self.events.emit(Event::Approval { owner: from, spender, amount: remaining });
        }
        self.move_balance(from, to, amount);
        Ok(())
    }

    /// Everything that must hold before `amount` can move from `from` to `to`.
    fn check_transfer(&self, from: Address, to: Address, amount: Amount) -> Result<()> {
        if !self.transfers_allowed
            && !self.admins.is_privileged(&from)
            && !self.admins.is_privileged(&to)
        {
            debug!(from = %from, to = %to, "transfer blocked by gate");
            return Err(MaterialError::TransferDisabled);
        }
        if from.is_zero() || to.is_zero() {
            return Err(MaterialError::InvalidAddress);
        }
        let available = self.balance_of(&from);
        if available < amount {
            return Err(MaterialError::InsufficientBalance { needed: amount, available });
        }
        Ok(())
    }

    /// Debit then credit. Callers have already run [`Self::check_transfer`].
    fn move_balance(&mut self, from: Address, to: Address, amount: Amount) {
        if let Some(balance) = self.balances.get_mut(&from) {
            *balance -= amount;
        }
        *self.balances.entry(to).or_insert(0) += amount;
        self.events.emit(Event::Transfer { from, to, amount });
        info!(from = %from, to = %to, amount, "transfer");
    }

    // -----------------------------------------------------------------
    // Allowances
    // -----------------------------------------------------------------

    /// Set `spender`'s allowance over `caller`'s balance.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> Result<()> {
        if caller.is_zero() || spender.is_zero() {
            return Err(MaterialError::InvalidAddress);
        }
        self.set_allowance(caller, spender, amount);
        Ok(())
    }

    /// Raise `spender`'s allowance by `added`, saturating at unlimited.
    pub fn increase_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        added: Amount,
    ) -> Result<()> {
        if caller.is_zero() || spender.is_zero() {
            return Err(MaterialError::InvalidAddress);
        }
        let current = self.allowance(&caller, &spender);
        self.set_allowance(caller, spender, current.saturating_add(added));
        Ok(())
    }

    /// Lower `spender`'s allowance by `subtracted`.
    ///
    /// # Errors
    /// `InsufficientAllowance` if that would go below zero.
    pub fn decrease_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        subtracted: Amount,
    ) -> Result<()> {
        if caller.is_zero() || spender.is_zero() {
            return Err(MaterialError::InvalidAddress);
        }
        let current = self.allowance(&caller, &spender);
        let lowered = current.checked_sub(subtracted).ok_or(
            MaterialError::InsufficientAllowance { needed: subtracted, available: current },
        )?;
        self.set_allowance(caller, spender, lowered);
        Ok(())
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
        self.events.emit(Event::Approval { owner, spender, amount });
        info!(owner = %owner, spender = %spender, amount, "approval");
    }

    /// Consume `owner`'s current nonce and grant the permitted allowance.
    /// Signature checks happen in [`crate::ApprovalSigner`].
    pub(crate) fn accept_permit(&mut self, owner: Address, spender: Address, value: Amount) -> u64 {
        let nonce = self.nonces.consume(owner);
        debug!(owner = %owner, nonce, "permit nonce consumed");
        self.set_allowance(owner, spender, value);
        nonce
    }

    // -----------------------------------------------------------------
    // Invariants and events
    // -----------------------------------------------------------------

    /// Recompute Σ balances and compare with total supply.
    ///
    /// # Errors
    /// `SupplyInvariantViolation` if they differ.
    pub fn verify_supply(&self) -> Result<()> {
        let sum = self
            .balances
            .values()
            .try_fold(0u128, |acc, b| acc.checked_add(*b))
            .ok_or_else(|| MaterialError::SupplyInvariantViolation {
                reason: "sum of balances overflows".into(),
            })?;
        self.supply.verify(sum).inspect_err(|e| {
            warn!(error = %e, "supply invariant violated");
        })
    }

    /// Drain the event journal.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    /// Events not yet drained.
    #[must_use]
    pub fn pending_events(&self) -> &[Event] {
        self.events.pending()
    }

    // -----------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    #[must_use]
    pub fn supply_cap(&self) -> Amount {
        self.supply.cap()
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.supply.total()
    }

    #[must_use]
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// Nonce the owner's next permit must be signed over.
    #[must_use]
    pub fn nonce_of(&self, owner: &Address) -> u64 {
        self.nonces.current(owner)
    }

    /// Whether `account` is in the admin (minter) set.
    #[must_use]
    pub fn is_admin(&self, account: &Address) -> bool {
        self.admins.is_member(account)
    }

    /// The primary admin.
    #[must_use]
    pub fn admin(&self) -> Address {
        self.admins.primary()
    }

    /// All admin set members, in address order.
    #[must_use]
    pub fn admins(&self) -> Vec<Address> {
        self.admins.members().copied().collect()
    }

    #[must_use]
    pub fn transfers_allowed(&self) -> bool {
        self.transfers_allowed
    }

    /// EIP-712 domain of this asset.
    #[must_use]
    pub fn domain(&self) -> PermitDomain {
        PermitDomain::new(&self.name, self.chain_id, self.address)
    }

    #[must_use]
    pub fn domain_separator(&self) -> Hash32 {
        self.domain().separator()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ASSET: u64 = 0x100;
    const ADMIN: u64 = 1;
    const ALICE: u64 = 2;
    const BOB: u64 = 3;
    const CAROL: u64 = 4;

    fn addr(n: u64) -> Address {
        Address::from_low_u64_be(n)
    }

    fn ledger() -> AssetLedger {
        let mut config = AssetConfig::material(addr(ASSET), constants::CHAIN_ID_HARDHAT, addr(ADMIN));
        config.supply_cap = 1_000;
        AssetLedger::new(config).unwrap()
    }

    fn funded() -> AssetLedger {
        let mut ledger = ledger();
        ledger.mint(addr(ADMIN), addr(ALICE), 500).unwrap();
        ledger.take_events();
        ledger
    }

    #[test]
    fn metadata() {
        let ledger = AssetLedger::material(addr(ASSET), 1, addr(ADMIN)).unwrap();
        assert_eq!(ledger.name(), "Material");
        assert_eq!(ledger.symbol(), "MTRL");
        assert_eq!(ledger.decimals(), 18);
        assert_eq!(ledger.supply_cap(), constants::SUPPLY_CAP);
        assert_eq!(ledger.total_supply(), 0);
        assert_eq!(ledger.admin(), addr(ADMIN));
        assert!(ledger.is_admin(&addr(ADMIN)));
        assert_eq!(ledger.admins(), vec![addr(ADMIN)]);
        assert!(ledger.transfers_allowed());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = AssetConfig::material(Address::ZERO, 1, addr(ADMIN));
        assert!(matches!(AssetLedger::new(config), Err(MaterialError::Configuration(_))));
    }

    #[test]
    fn mint_credits_and_emits() {
        let mut ledger = ledger();
        ledger.mint(addr(ADMIN), addr(ALICE), 300).unwrap();
        assert_eq!(ledger.balance_of(&addr(ALICE)), 300);
        assert_eq!(ledger.total_supply(), 300);
        assert_eq!(
            ledger.take_events(),
            vec![Event::Transfer { from: Address::ZERO, to: addr(ALICE), amount: 300 }]
        );
        ledger.verify_supply().unwrap();
    }

    #[test]
    fn mint_validation() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.mint(addr(ALICE), addr(ALICE), 1).unwrap_err(),
            MaterialError::Unauthorized { caller: addr(ALICE) }
        );
        assert_eq!(ledger.mint(addr(ADMIN), addr(ALICE), 0).unwrap_err(), MaterialError::InvalidAmount);
        assert_eq!(
            ledger.mint(addr(ADMIN), Address::ZERO, 1).unwrap_err(),
            MaterialError::InvalidAddress
        );
        assert!(ledger.pending_events().is_empty());
    }

    #[test]
    fn mint_up_to_cap_then_reject() {
        let mut ledger = ledger();
        ledger.mint(addr(ADMIN), addr(ALICE), 1_000).unwrap();
        let err = ledger.mint(addr(ADMIN), addr(ALICE), 1).unwrap_err();
        assert_eq!(err, MaterialError::SupplyExceeded { requested: 1, mintable: 0 });
        assert_eq!(ledger.total_supply(), 1_000);
    }

    #[test]
    fn added_admin_can_mint_removed_cannot() {
        let mut ledger = ledger();
        ledger.set_admin(addr(ADMIN), addr(BOB), true).unwrap();
        ledger.mint(addr(BOB), addr(BOB), 10).unwrap();
        ledger.set_admin(addr(ADMIN), addr(BOB), false).unwrap();
        assert!(ledger.mint(addr(BOB), addr(BOB), 10).is_err());
    }

    #[test]
    fn only_admins_manage_admins() {
        let mut ledger = ledger();
        assert!(matches!(
            ledger.set_admin(addr(CAROL), addr(CAROL), true),
            Err(MaterialError::Unauthorized { .. })
        ));
        ledger.set_admin(addr(ADMIN), addr(BOB), true).unwrap();
        ledger.set_admin(addr(BOB), addr(CAROL), true).unwrap();
        assert!(ledger.is_admin(&addr(CAROL)));
        assert_eq!(
            ledger.set_admin(addr(ADMIN), Address::ZERO, true).unwrap_err(),
            MaterialError::InvalidAddress
        );
    }

    #[test]
    fn member_revokes_itself_and_loses_issuance() {
        let mut ledger = ledger();
        ledger.set_admin(addr(ADMIN), addr(BOB), true).unwrap();
        ledger.set_admin(addr(BOB), addr(BOB), false).unwrap();
        assert!(!ledger.is_admin(&addr(BOB)));
        assert_eq!(
            ledger.mint(addr(BOB), addr(BOB), 10).unwrap_err(),
            MaterialError::Unauthorized { caller: addr(BOB) }
        );
        // Once out, it cannot re-add itself.
        assert!(ledger.set_admin(addr(BOB), addr(BOB), true).is_err());
        let events = ledger.take_events();
        assert!(events.contains(&Event::AdminSet { account: addr(BOB), is_admin: false }));
    }

    #[test]
    fn transfer_moves_exact_amount() {
        let mut ledger = funded();
        ledger.transfer(addr(ALICE), addr(BOB), 200).unwrap();
        assert_eq!(ledger.balance_of(&addr(ALICE)), 300);
        assert_eq!(ledger.balance_of(&addr(BOB)), 200);
        assert_eq!(
            ledger.take_events(),
            vec![Event::Transfer { from: addr(ALICE), to: addr(BOB), amount: 200 }]
        );
        ledger.verify_supply().unwrap();
    }

    #[test]
    fn transfer_to_self_is_noop_on_balance() {
        let mut ledger = funded();
        ledger.transfer(addr(ALICE), addr(ALICE), 500).unwrap();
        assert_eq!(ledger.balance_of(&addr(ALICE)), 500);
        ledger.verify_supply().unwrap();
    }

    #[test]
    fn transfer_insufficient_balance_unchanged() {
        let mut ledger = funded();
        let err = ledger.transfer(addr(ALICE), addr(BOB), 501).unwrap_err();
        assert_eq!(err, MaterialError::InsufficientBalance { needed: 501, available: 500 });
        assert_eq!(ledger.balance_of(&addr(ALICE)), 500);
        assert_eq!(ledger.balance_of(&addr(BOB)), 0);
        assert!(ledger.pending_events().is_empty());
    }

    #[test]
    fn transfer_to_zero_rejected() {
        let mut ledger = funded();
        assert_eq!(
            ledger.transfer(addr(ALICE), Address::ZERO, 1).unwrap_err(),
            MaterialError::InvalidAddress
        );
    }

    #[test]
    fn gate_blocks_non_admin_transfers() {
        let mut ledger = funded();
        ledger.set_transfers_allowed(addr(ADMIN), false).unwrap();
        assert_eq!(
            ledger.transfer(addr(ALICE), addr(BOB), 1).unwrap_err(),
            MaterialError::TransferDisabled
        );
        // Either side privileged passes.
        ledger.transfer(addr(ALICE), addr(ADMIN), 10).unwrap();
        ledger.transfer(addr(ADMIN), addr(BOB), 5).unwrap();

        ledger.set_transfers_allowed(addr(ADMIN), true).unwrap();
        ledger.transfer(addr(ALICE), addr(BOB), 1).unwrap();
    }

    #[test]
    fn gate_control_is_primary_only() {
        let mut ledger = ledger();
        ledger.set_admin(addr(ADMIN), addr(BOB), true).unwrap();
        assert!(ledger.set_transfers_allowed(addr(BOB), false).is_err());
        assert!(ledger.set_transfers_allowed(addr(ALICE), false).is_err());
        assert!(ledger.transfers_allowed());
    }

    #[test]
    fn ownership_transfer_moves_gate_control() {
        let mut ledger = ledger();
        ledger.transfer_ownership(addr(ADMIN), addr(BOB)).unwrap();
        assert_eq!(ledger.admin(), addr(BOB));
        assert!(ledger.set_transfers_allowed(addr(ADMIN), false).is_err());
        ledger.set_transfers_allowed(addr(BOB), false).unwrap();
        // Old primary keeps set membership.
        assert!(ledger.is_admin(&addr(ADMIN)));
        assert!(!ledger.is_admin(&addr(BOB)));
    }

    #[test]
    fn ownership_transfer_validation() {
        let mut ledger = ledger();
        assert!(matches!(
            ledger.transfer_ownership(addr(ALICE), addr(BOB)),
            Err(MaterialError::Unauthorized { .. })
        ));
        assert_eq!(
            ledger.transfer_ownership(addr(ADMIN), addr(ADMIN)).unwrap_err(),
            MaterialError::InvalidAdmin
        );
        assert_eq!(
            ledger.transfer_ownership(addr(ADMIN), Address::ZERO).unwrap_err(),
            MaterialError::InvalidAdmin
        );
    }

    #[test]
    fn transfer_from_spends_allowance() {
        let mut ledger = funded();
        ledger.approve(addr(ALICE), addr(BOB), 300).unwrap();
        ledger.take_events();

        ledger.transfer_from(addr(BOB), addr(ALICE), addr(CAROL), 100).unwrap();
        assert_eq!(ledger.allowance(&addr(ALICE), &addr(BOB)), 200);
        assert_eq!(ledger.balance_of(&addr(CAROL)), 100);
        assert_eq!(
            ledger.take_events(),
            vec![
                Event::Approval { owner: addr(ALICE), spender: addr(BOB), amount: 200 },
                Event::Transfer { from: addr(ALICE), to: addr(CAROL), amount: 100 },
            ]
        );
    }

    #[test]
    fn transfer_from_insufficient_allowance() {
        let mut ledger = funded();
        ledger.approve(addr(ALICE), addr(BOB), 50).unwrap();
        let err = ledger.transfer_from(addr(BOB), addr(ALICE), addr(CAROL), 51).unwrap_err();
        assert_eq!(err, MaterialError::InsufficientAllowance { needed: 51, available: 50 });
        assert_eq!(ledger.allowance(&addr(ALICE), &addr(BOB)), 50);
        assert_eq!(ledger.balance_of(&addr(ALICE)), 500);
    }

    #[test]
    fn transfer_from_balance_checked_before_allowance_spent() {
        let mut ledger = funded();
        ledger.approve(addr(ALICE), addr(BOB), 1_000).unwrap();
        assert!(matches!(
            ledger.transfer_from(addr(BOB), addr(ALICE), addr(CAROL), 600),
            Err(MaterialError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.allowance(&addr(ALICE), &addr(BOB)), 1_000);
    }

    #[test]
    fn unlimited_allowance_not_decremented() {
        let mut ledger = funded();
        ledger.approve(addr(ALICE), addr(BOB), constants::UNLIMITED_ALLOWANCE).unwrap();
        ledger.transfer_from(addr(BOB), addr(ALICE), addr(CAROL), 100).unwrap();
        assert_eq!(ledger.allowance(&addr(ALICE), &addr(BOB)), constants::UNLIMITED_ALLOWANCE);
    }

    #[test]
    fn relative_allowance_adjustments() {
        let mut ledger = funded();
        ledger.increase_allowance(addr(ALICE), addr(BOB), 40).unwrap();
        ledger.increase_allowance(addr(ALICE), addr(BOB), 60).unwrap();
        assert_eq!(ledger.allowance(&addr(ALICE), &addr(BOB)), 100);
        ledger.decrease_allowance(addr(ALICE), addr(BOB), 30).unwrap();
        assert_eq!(ledger.allowance(&addr(ALICE), &addr(BOB)), 70);
        let err = ledger.decrease_allowance(addr(ALICE), addr(BOB), 71).unwrap_err();
        assert_eq!(err, MaterialError::InsufficientAllowance { needed: 71, available: 70 });
        assert_eq!(ledger.allowance(&addr(ALICE), &addr(BOB)), 70);
    }

    #[test]
    fn approve_zero_spender_rejected() {
        let mut ledger = funded();
        assert_eq!(
            ledger.approve(addr(ALICE), Address::ZERO, 1).unwrap_err(),
            MaterialError::InvalidAddress
        );
    }

    #[test]
    fn accept_permit_consumes_nonce() {
        let mut ledger = funded();
        assert_eq!(ledger.nonce_of(&addr(ALICE)), 0);
        assert_eq!(ledger.accept_permit(addr(ALICE), addr(BOB), 7), 0);
        assert_eq!(ledger.nonce_of(&addr(ALICE)), 1);
        assert_eq!(ledger.allowance(&addr(ALICE), &addr(BOB)), 7);
    }

    #[test]
    fn domain_separator_depends_on_chain() {
        let a = AssetLedger::material(addr(ASSET), 1, addr(ADMIN)).unwrap();
        let b = AssetLedger::material(addr(ASSET), 42, addr(ADMIN)).unwrap();
        assert_ne!(a.domain_separator(), b.domain_separator());
        assert_eq!(a.domain_separator(), a.domain().separator());
    }
}
