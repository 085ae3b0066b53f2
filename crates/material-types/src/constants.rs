//! System-wide constants for the Material asset and its vesting schedule.

use crate::Amount;

/// Asset name, also the EIP-712 domain name.
pub const TOKEN_NAME: &str = "Material";

/// Asset ticker.
pub const TOKEN_SYMBOL: &str = "MTRL";

/// Decimal places of one whole MTRL.
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole MTRL in base units.
pub const ONE_MTRL: Amount = 1_000_000_000_000_000_000;

/// Hard cap on total supply: 100,000,000 MTRL.
pub const SUPPLY_CAP: Amount = 100_000_000 * ONE_MTRL;

/// EIP-712 domain version string.
pub const PERMIT_VERSION: &str = "1";

/// Allowance value treated as unlimited by `transfer_from`.
pub const UNLIMITED_ALLOWANCE: Amount = Amount::MAX;

/// Expected block time of the target chain, in seconds.
pub const BLOCK_TIME_SECS: u64 = 15;

/// Blocks per minute at [`BLOCK_TIME_SECS`].
pub const BLOCKS_PER_MINUTE: u64 = 60 / BLOCK_TIME_SECS;

/// Default unlock cycle: ~30 days of blocks.
pub const DEFAULT_UNLOCK_CYCLE_BLOCKS: u64 = 30 * 24 * 60 * BLOCKS_PER_MINUTE;

/// Default release quantum per cycle: 1,000,000 MTRL.
pub const DEFAULT_UNLOCK_AMOUNT_PER_CYCLE: Amount = 1_000_000 * ONE_MTRL;

/// Default delay between schedule deployment and its start block: ~1 hour.
pub const DEFAULT_VESTING_START_DELAY_BLOCKS: u64 = 60 * BLOCKS_PER_MINUTE;

/// Chain id of Ethereum mainnet.
pub const CHAIN_ID_MAINNET: u64 = 1;

/// Chain id of the Kovan testnet.
pub const CHAIN_ID_KOVAN: u64 = 42;

/// Chain id of a local Hardhat node.
pub const CHAIN_ID_HARDHAT: u64 = 31_337;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
