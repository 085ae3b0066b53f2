//! EIP-712 `permit`: signature-authorized allowances.
//!
//! A holder signs, off-chain, a typed message granting a spender an
//! allowance. Anyone may then submit it. The digest layout is the standard
//! one and must be reproduced bit for bit, otherwise signatures produced by
//! wallets will not verify:
//!
//! ```text
//! domainSeparator = keccak256(DOMAIN_TYPEHASH ‖ keccak256(name) ‖ keccak256("1")
//!                             ‖ chainId ‖ verifyingContract)
//! structHash      = keccak256(PERMIT_TYPEHASH ‖ owner ‖ spender ‖ value
//!                             ‖ nonce ‖ deadline)
//! digest          = keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash)
//! ```
//!
//! Every field is a 32-byte ABI word. Replay is prevented by the owner's
//! sequential nonce, consumed on success.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use material_types::{
    Address, Amount, Hash32, MaterialError, Result, amount_word, constants, keccak256,
    keccak256_concat, u64_word,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::AssetLedger;

/// EIP-712 domain type string.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Permit struct type string.
pub const PERMIT_TYPE: &str =
    "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";

/// `keccak256(DOMAIN_TYPE)`.
#[must_use]
pub fn domain_typehash() -> Hash32 {
    keccak256(DOMAIN_TYPE.as_bytes())
}

/// `keccak256(PERMIT_TYPE)`.
#[must_use]
pub fn permit_typehash() -> Hash32 {
    keccak256(PERMIT_TYPE.as_bytes())
}

// ---------------------------------------------------------------------------
// Domain and message
// ---------------------------------------------------------------------------

/// Binds a signature to one asset on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl PermitDomain {
    #[must_use]
    pub fn new(name: &str, chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: name.to_string(),
            version: constants::PERMIT_VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }

    #[must_use]
    pub fn separator(&self) -> Hash32 {
        keccak256_concat(&[
            &domain_typehash(),
            &keccak256(self.name.as_bytes()),
            &keccak256(self.version.as_bytes()),
            &u64_word(self.chain_id),
            &self.verifying_contract.to_word(),
        ])
    }
}

/// The signed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permit {
    pub owner: Address,
    pub spender: Address,
    pub value: Amount,
    pub nonce: u64,
    /// Unix seconds after which the permit is void.
    pub deadline: u64,
}

impl Permit {
    #[must_use]
    pub fn struct_hash(&self) -> Hash32 {
        keccak256_concat(&[
            &permit_typehash(),
            &self.owner.to_word(),
            &self.spender.to_word(),
            &amount_word(self.value),
            &u64_word(self.nonce),
            &u64_word(self.deadline),
        ])
    }

    /// The final EIP-712 digest that gets signed.
    #[must_use]
    pub fn digest(&self, domain: &PermitDomain) -> Hash32 {
        keccak256_concat(&[&[0x19, 0x01], &domain.separator(), &self.struct_hash()])
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// Recoverable secp256k1 signature in `(v, r, s)` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitSignature {
    /// Recovery byte, 27 or 28 (0 and 1 are accepted too).
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl PermitSignature {
    /// Parse the 65-byte `r ‖ s ‖ v` form wallets produce.
    ///
    /// # Errors
    /// `InvalidSignature` for any other length.
    pub fn from_rsv(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 65 {
            return Err(MaterialError::InvalidSignature);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { v: bytes[64], r, s })
    }

    #[must_use]
    pub fn to_rsv(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// Recovery id with `v` normalised to 0/1.
    fn recovery_id(&self) -> Option<RecoveryId> {
        let v = match self.v {
            27 | 28 => self.v - 27,
            0 | 1 => self.v,
            _ => return None,
        };
        RecoveryId::from_byte(v)
    }
}

/// Recovers the address that signed a digest.
pub trait SignerRecovery {
    /// # Errors
    /// `InvalidSignature` if the signature is malformed or unrecoverable.
    fn recover_signer(&self, digest: &Hash32, signature: &PermitSignature) -> Result<Address>;
}

/// secp256k1 public-key recovery, rejecting high-`s` signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl SignerRecovery for Secp256k1Recovery {
    fn recover_signer(&self, digest: &Hash32, signature: &PermitSignature) -> Result<Address> {
        let recovery_id = signature.recovery_id().ok_or(MaterialError::InvalidSignature)?;

        let mut rs = [0u8; 64];
        rs[..32].copy_from_slice(&signature.r);
        rs[32..].copy_from_slice(&signature.s);
        let sig = Signature::from_slice(&rs).map_err(|_| MaterialError::InvalidSignature)?;
        // Malleable twin of a valid signature.
        if sig.normalize_s().is_some() {
            debug!("rejected high-s signature");
            return Err(MaterialError::InvalidSignature);
        }

        let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
            .map_err(|_| MaterialError::InvalidSignature)?;
        Ok(Address::from_verifying_key(&key))
    }
}

/// Sign a permit with `key`. Used by off-chain producers and tests; the
/// ledger itself only verifies.
///
/// # Errors
/// `InvalidSignature` if signing fails.
pub fn sign_permit(key: &SigningKey, domain: &PermitDomain, permit: &Permit) -> Result<PermitSignature> {
    let digest = permit.digest(domain);
    let (sig, recovery_id) = key
        .sign_prehash_recoverable(&digest)
        .map_err(|_| MaterialError::InvalidSignature)?;
    let bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);
    Ok(PermitSignature { v: 27 + recovery_id.to_byte(), r, s })
}

// ---------------------------------------------------------------------------
// ApprovalSigner
// ---------------------------------------------------------------------------

/// Verifies permits and applies them to a ledger.
#[derive(Debug, Clone, Default)]
pub struct ApprovalSigner<R = Secp256k1Recovery> {
    recovery: R,
}

impl ApprovalSigner<Secp256k1Recovery> {
    #[must_use]
    pub fn new() -> Self {
        Self { recovery: Secp256k1Recovery }
    }
}

impl<R: SignerRecovery> ApprovalSigner<R> {
    /// Use a custom recovery backend.
    pub fn with_recovery(recovery: R) -> Self {
        Self { recovery }
    }

    /// The digest `owner` must sign right now for this grant.
    #[must_use]
    pub fn permit_digest(
        &self,
        ledger: &AssetLedger,
        owner: Address,
        spender: Address,
        value: Amount,
        deadline: u64,
    ) -> Hash32 {
        let permit = Permit { owner, spender, value, nonce: ledger.nonce_of(&owner), deadline };
        permit.digest(&ledger.domain())
    }

    /// Verify `signature` and set `allowance[owner][spender] = value`.
    ///
    /// # Errors
    /// - `ExpiredPermit` if `now > deadline`
    /// - `InvalidAddress` if `owner` or `spender` is zero
    /// - `InvalidSignature` if recovery fails or yields anyone but `owner`
    #[allow(clippy::too_many_arguments)]
    pub fn permit(
        &self,
        ledger: &mut AssetLedger,
        owner: Address,
        spender: Address,
        value: Amount,
        deadline: u64,
        signature: &PermitSignature,
        now: u64,
    ) -> Result<()> {
        if now > deadline {
            return Err(MaterialError::ExpiredPermit { deadline, now });
        }
        if owner.is_zero() || spender.is_zero() {
            return Err(MaterialError::InvalidAddress);
        }

        let digest = self.permit_digest(ledger, owner, spender, value, deadline);
        let signer = self.recovery.recover_signer(&digest, signature)?;
        if signer != owner {
            warn!(owner = %owner, signer = %signer, "permit signer mismatch");
            return Err(MaterialError::InvalidSignature);
        }

        let nonce = ledger.accept_permit(owner, spender, value);
        info!(owner = %owner, spender = %spender, value, nonce, "permit accepted");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
