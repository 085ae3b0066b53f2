//! # material-ledger
//!
//! The **MTRL asset ledger**: capped admin issuance, an optional global
//! transfer gate, ERC-20 style balances and allowances, and EIP-712
//! `permit` approvals.
//!
//! ## Authority
//!
//! - The **primary admin** opens and closes the transfer gate and hands
//!   over its own role. It may also manage the admin set.
//! - Members of the **admin set** may mint and manage the set, including
//!   revoking themselves. While the gate is closed, any transfer with a
//!   privileged party on either side still passes.
//!
//! ## Invariants
//!
//! - `total_supply ≤ supply_cap`, and `total_supply` only grows
//! - `Σ balances == total_supply` (checked by [`AssetLedger::verify_supply`])
//! - a permit signature verifies at most once (per-owner nonces)

pub mod admins;
pub mod ledger;
pub mod nonces;
pub mod permit;
pub mod supply;

pub use admins::AdminSet;
pub use ledger::AssetLedger;
pub use nonces::NonceBook;
pub use permit::{
    ApprovalSigner, Permit, PermitDomain, PermitSignature, Secp256k1Recovery, SignerRecovery,
    sign_permit,
};
pub use supply::SupplyTracker;
