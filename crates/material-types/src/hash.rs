//! Keccak-256, the hash used by addresses and the EIP-712 digest.

use sha3::{Digest, Keccak256};

/// 32-byte hash output.
pub type Hash32 = [u8; 32];

/// Keccak-256 of `data` (the pre-standard SHA-3 padding used by Ethereum).
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash32 {
    Keccak256::digest(data).into()
}

/// Keccak-256 over several byte slices, hashed as one concatenated input.
#[must_use]
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash32 {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
