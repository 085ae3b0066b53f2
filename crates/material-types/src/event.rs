//! Structured notifications emitted by successful mutating operations.
//!
//! Components append events to their own journal; external monitoring
//! drains it. The core never reads its own events back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Address, Amount};

/// A notification emitted by the ledger or the vesting engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Balance moved between accounts. Mints use `from = Address::ZERO`.
    Transfer { from: Address, to: Address, amount: Amount },
    /// Allowance of `spender` over `owner`'s balance set to `amount`.
    Approval { owner: Address, spender: Address, amount: Amount },
    /// Admin-set membership changed.
    AdminSet { account: Address, is_admin: bool },
    /// Primary admin replaced.
    OwnershipTransferred { previous: Address, new: Address },
    /// Global transfer gate toggled.
    TransfersAllowedChanged { allowed: bool },
    /// Vesting beneficiary replaced.
    WalletChanged { previous: Address, new: Address },
    /// Vesting release: `amount` sent to `wallet`, schedule processed up to `cycle`.
    Claimed { amount: Amount, cycle: u64, wallet: Address },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer { from, to, amount } => {
                write!(f, "Transfer({} -> {}, {amount})", from.short(), to.short())
            }
            Self::Approval { owner, spender, amount } => {
                write!(f, "Approval({} -> {}, {amount})", owner.short(), spender.short())
            }
            Self::AdminSet { account, is_admin } => {
                write!(f, "AdminSet({}, {is_admin})", account.short())
            }
            Self::OwnershipTransferred { previous, new } => {
                write!(f, "OwnershipTransferred({} -> {})", previous.short(), new.short())
            }
            Self::TransfersAllowedChanged { allowed } => {
                write!(f, "TransfersAllowedChanged({allowed})")
            }
            Self::WalletChanged { previous, new } => {
                write!(f, "WalletChanged({} -> {})", previous.short(), new.short())
            }
            Self::Claimed { amount, cycle, wallet } => {
                write!(f, "Claimed({amount}, cycle {cycle}, {})", wallet.short())
            }
        }
    }
}

/// Append-only event journal owned by a component.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Hand all pending events to the consumer, leaving the journal empty.
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Events not yet taken.
    #[must_use]
    pub fn pending(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
