//! Account addresses and amounts.
//!
//! Addresses are 20-byte Ethereum-style identifiers. The same type names
//! holders, admins, the asset itself (its EIP-712 `verifyingContract`) and
//! the vesting schedule's custody account.

use std::{fmt, str::FromStr};

use k256::{ecdsa::VerifyingKey, elliptic_curve::sec1::ToEncodedPoint};
use serde::{Deserialize, Serialize};

use crate::{MaterialError, keccak256};

/// Token quantity in base units (18 decimals for MTRL).
pub type Amount = u128;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account address. Serialized as a `0x`-prefixed hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The null address. Never a valid recipient, admin or wallet.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Address whose trailing eight bytes hold `n` big-endian.
    ///
    /// Handy for fixtures and well-known system accounts.
    #[must_use]
    pub fn from_low_u64_be(n: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 8..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    /// Derive the address controlled by a secp256k1 public key:
    /// the last 20 bytes of `keccak256(uncompressed_point[1..])`.
    #[must_use]
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.as_affine().to_encoded_point(false);
        let hash = keccak256(&point.as_bytes()[1..]);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash[32 - ADDRESS_LEN..]);
        Self(bytes)
    }

    /// Left-pad to a 32-byte ABI word.
    #[must_use]
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[32 - ADDRESS_LEN..].copy_from_slice(&self.0);
        word
    }

    /// Short form for log lines: `0x1234…abcd`.
    #[must_use]
    pub fn short(&self) -> String {
        format!(
            "0x{}…{}",
            hex::encode(&self.0[..2]),
            hex::encode(&self.0[ADDRESS_LEN - 2..])
        )
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let raw = hex::decode(digits)
            .map_err(|e| MaterialError::Serialization(format!("address {s:?}: {e}")))?;
        let bytes: [u8; ADDRESS_LEN] = raw.try_into().map_err(|raw: Vec<u8>| {
            MaterialError::Serialization(format!(
                "address {s:?}: expected {ADDRESS_LEN} bytes, got {}",
                raw.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = MaterialError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

/// Random addresses for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    pub fn random() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; ADDRESS_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }
}

/// Left-pad an amount to a 32-byte big-endian ABI word (`uint256`).
#[must_use]
pub fn amount_word(amount: Amount) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&amount.to_be_bytes());
    word
}

/// Left-pad a `u64` to a 32-byte big-endian ABI word (`uint256`).
#[must_use]
pub fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
