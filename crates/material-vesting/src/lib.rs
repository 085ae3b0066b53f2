//! # material-vesting
//!
//! Cycle-based release of a pre-funded MTRL balance to one wallet.
//!
//! The schedule's custody address holds the funds on the
//! [`material_ledger::AssetLedger`]. Once per elapsed cycle of
//! `unlock_cycle_blocks`, up to `unlock_amount_per_cycle` becomes
//! claimable. Anyone may call [`VestingEngine::claim`]; it catches up on all
//! elapsed cycles in a single transfer. Cycles processed while custody is
//! empty release nothing and stay that way.

pub mod engine;
pub mod phase;
pub mod schedule;

pub use engine::VestingEngine;
pub use phase::VestingPhase;
pub use schedule::ReleasePlan;
