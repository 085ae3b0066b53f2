//! Per-owner permit nonces.
//!
//! Each owner has one strictly sequential counter. A permit is signed over
//! the owner's current value; accepting it consumes that value, so the same
//! signature can never verify twice.

use std::collections::HashMap;

use material_types::Address;

/// Sequential replay counters, one per owner.
#[derive(Debug, Clone, Default)]
pub struct NonceBook {
    next: HashMap<Address, u64>,
}

impl NonceBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The nonce the owner's next permit must be signed over.
    #[must_use]
    pub fn current(&self, owner: &Address) -> u64 {
        self.next.get(owner).copied().unwrap_or(0)
    }

    /// Consume the owner's current nonce and return it.
    pub fn consume(&mut self, owner: Address) -> u64 {
        let slot = self.next.entry(owner).or_insert(0);
        let used = *slot;
        *slot += 1;
        used
    }

    /// Number of owners that have consumed at least one nonce.
    #[must_use]
    pub fn len(&self) -> usize {
        self.next.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }
}
