//! Configuration for the asset ledger, the vesting schedule, and a full
//! deployment of both on one network.
//!
//! Configs are plain `serde` structs. A [`DeploymentConfig`] can be loaded
//! from JSON and is validated before anything is built from it.

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, MaterialError, Result, constants};

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Networks the system is deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Kovan,
    Hardhat,
}

impl Network {
    /// EIP-155 chain id, bound into every permit domain.
    #[must_use]
    pub fn chain_id(self) -> u64 {
        match self {
            Self::Mainnet => constants::CHAIN_ID_MAINNET,
            Self::Kovan => constants::CHAIN_ID_KOVAN,
            Self::Hardhat => constants::CHAIN_ID_HARDHAT,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Kovan => write!(f, "kovan"),
            Self::Hardhat => write!(f, "hardhat"),
        }
    }
}

// ---------------------------------------------------------------------------
// AssetConfig
// ---------------------------------------------------------------------------

/// Construction parameters of the asset ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Asset name (also the EIP-712 domain name).
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display decimals.
    pub decimals: u8,
    /// The asset's own address (EIP-712 `verifyingContract`).
    pub address: Address,
    /// Chain id bound into permit signatures.
    pub chain_id: u64,
    /// Maximum total supply.
    pub supply_cap: Amount,
    /// First admin: primary admin and sole member of the admin set.
    pub seed_admin: Address,
    /// Initial state of the transfer gate.
    #[serde(default = "default_transfers_allowed")]
    pub transfers_allowed: bool,
}

fn default_transfers_allowed() -> bool {
    true
}

impl AssetConfig {
    /// The production MTRL asset.
    #[must_use]
    pub fn material(address: Address, chain_id: u64, seed_admin: Address) -> Self {
        Self {
            name: constants::TOKEN_NAME.to_string(),
            symbol: constants::TOKEN_SYMBOL.to_string(),
            decimals: constants::TOKEN_DECIMALS,
            address,
            chain_id,
            supply_cap: constants::SUPPLY_CAP,
            seed_admin,
            transfers_allowed: true,
        }
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.symbol.is_empty() {
            return Err(MaterialError::Configuration(
                "asset name and symbol must be non-empty".into(),
            ));
        }
        if self.address.is_zero() {
            return Err(MaterialError::Configuration("asset address is zero".into()));
        }
        if self.seed_admin.is_zero() {
            return Err(MaterialError::Configuration("seed admin is zero".into()));
        }
        if self.supply_cap == 0 {
            return Err(MaterialError::Configuration("supply cap is zero".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// VestingConfig
// ---------------------------------------------------------------------------

/// Construction parameters of the vesting schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingConfig {
    /// Custody address of the schedule on the ledger.
    pub address: Address,
    /// Address of the asset being released.
    pub token: Address,
    /// Schedule admin.
    pub admin: Address,
    /// Beneficiary receiving each release.
    pub wallet: Address,
    /// First block of cycle 0.
    pub start_block: u64,
    /// Length of one cycle in blocks.
    pub unlock_cycle_blocks: u64,
    /// Target release per cycle.
    pub unlock_amount_per_cycle: Amount,
}

impl VestingConfig {
    /// The production MTRL schedule deployed at `deployed_at`: starts one
    /// hour later, releases 1,000,000 MTRL every ~30 days.
    #[must_use]
    pub fn material(
        address: Address,
        token: Address,
        admin: Address,
        wallet: Address,
        deployed_at: u64,
    ) -> Self {
        Self {
            address,
            token,
            admin,
            wallet,
            start_block: deployed_at.saturating_add(constants::DEFAULT_VESTING_START_DELAY_BLOCKS),
            unlock_cycle_blocks: constants::DEFAULT_UNLOCK_CYCLE_BLOCKS,
            unlock_amount_per_cycle: constants::DEFAULT_UNLOCK_AMOUNT_PER_CYCLE,
        }
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("address", self.address),
            ("token", self.token),
            ("admin", self.admin),
            ("wallet", self.wallet),
        ] {
            if value.is_zero() {
                return Err(MaterialError::Configuration(format!(
                    "vesting {field} is zero"
                )));
            }
        }
        if self.address == self.wallet {
            return Err(MaterialError::Configuration(
                "vesting wallet must differ from the custody address".into(),
            ));
        }
        if self.unlock_cycle_blocks == 0 {
            return Err(MaterialError::Configuration("unlock cycle is zero blocks".into()));
        }
        if self.unlock_amount_per_cycle == 0 {
            return Err(MaterialError::Configuration("unlock amount per cycle is zero".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DeploymentConfig
// ---------------------------------------------------------------------------

/// Asset plus vesting schedule on one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub network: Network,
    pub asset: AssetConfig,
    pub vesting: VestingConfig,
}

impl DeploymentConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check each part and their cross references.
    pub fn validate(&self) -> Result<()> {
        self.asset.validate()?;
        self.vesting.validate()?;
        if self.asset.chain_id != self.network.chain_id() {
            return Err(MaterialError::Configuration(format!(
                "asset chain id {} does not match {} ({})",
                self.asset.chain_id,
                self.network,
                self.network.chain_id()
            )));
        }
        if self.vesting.token != self.asset.address {
            return Err(MaterialError::Configuration(format!(
                "vesting token {} is not the asset {}",
                self.vesting.token, self.asset.address
            )));
        }
        if self.vesting.address == self.asset.address {
            return Err(MaterialError::Configuration(
                "vesting custody address collides with the asset address".into(),
            ));
        }
        Ok(())
    }
}
