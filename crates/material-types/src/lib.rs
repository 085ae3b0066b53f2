//! # material-types
//!
//! Shared types, errors, and configuration for the **Material** (MTRL)
//! asset ledger and its vesting engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Accounts**: [`Address`], [`Amount`]
//! - **Hashing**: [`keccak256`], [`Hash32`]
//! - **Events**: [`Event`], [`EventLog`]
//! - **Configuration**: [`AssetConfig`], [`VestingConfig`], [`DeploymentConfig`], [`Network`]
//! - **Errors**: [`MaterialError`] with `MTRL_ERR_` prefix codes
//! - **Constants**: token identity, supply cap, schedule defaults

pub mod address;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod hash;

pub use address::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use hash::*;

// Constants are accessed via `material_types::constants::FOO`
// (not re-exported to avoid name collisions).
