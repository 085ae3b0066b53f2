//! Admin authority for the asset ledger.
//!
//! Two tiers:
//! - the **primary admin**, a single address that controls the gate and its
//!   own succession;
//! - the **admin set**, whose members may mint, manage the set (including
//!   revoking themselves) and move funds while the transfer gate is closed.
//!
//! Every privileged operation passes its caller explicitly; the checks
//! below are the only authorization the ledger performs.

use std::collections::BTreeSet;

use material_types::{Address, MaterialError, Result};

/// Primary admin plus the admin (minter) set.
#[derive(Debug, Clone)]
pub struct AdminSet {
    /// The distinguished owner address.
    primary: Address,
    /// Addresses with issuance privilege.
    members: BTreeSet<Address>,
}

impl AdminSet {
    /// Seed admin becomes both primary admin and the only member.
    #[must_use]
    pub fn new(seed: Address) -> Self {
        Self {
            primary: seed,
            members: BTreeSet::from([seed]),
        }
    }

    #[must_use]
    pub fn primary(&self) -> Address {
        self.primary
    }

    #[must_use]
    pub fn is_member(&self, account: &Address) -> bool {
        self.members.contains(account)
    }

    /// Member of the set or the primary admin.
    #[must_use]
    pub fn is_privileged(&self, account: &Address) -> bool {
        *account == self.primary || self.is_member(account)
    }

    pub fn members(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Guard for admin-set operations (issuance).
    pub fn ensure_member(&self, caller: &Address) -> Result<()> {
        if self.is_member(caller) {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "rejected: caller is not in the admin set");
            Err(MaterialError::Unauthorized { caller: *caller })
        }
    }

    /// Guard for admin-set management: any member, or the primary admin
    /// even after it has left the set.
    pub fn ensure_privileged(&self, caller: &Address) -> Result<()> {
        if self.is_privileged(caller) {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "rejected: caller holds no admin privilege");
            Err(MaterialError::Unauthorized { caller: *caller })
        }
    }

    /// Guard for primary-admin operations.
    pub fn ensure_primary(&self, caller: &Address) -> Result<()> {
        if *caller == self.primary {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "rejected: caller is not the primary admin");
            Err(MaterialError::Unauthorized { caller: *caller })
        }
    }

    /// Add or remove a member. Returns `true` if membership changed.
    ///
    /// # Errors
    /// `InvalidAddress` for the zero address.
    pub fn set_member(&mut self, account: Address, is_admin: bool) -> Result<bool> {
        if account.is_zero() {
            return Err(MaterialError::InvalidAddress);
        }
        let changed = if is_admin {
            self.members.insert(account)
        } else {
            self.members.remove(&account)
        };
        Ok(changed)
    }

    /// Replace the primary admin. Returns the previous one.
    ///
    /// # Errors
    /// `InvalidAdmin` if `new_primary` is zero or already the primary admin.
    pub fn replace_primary(&mut self, new_primary: Address) -> Result<Address> {
        if new_primary.is_zero() || new_primary == self.primary {
            return Err(MaterialError::InvalidAdmin);
        }
        Ok(std::mem::replace(&mut self.primary, new_primary))
    }
}
