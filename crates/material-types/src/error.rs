//! Error types for the Material ledger and vesting engine.
//!
//! All errors use the `MTRL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by category:
//! - 1xx: Authorization errors
//! - 2xx: Validation errors
//! - 3xx: Ledger state errors
//! - 4xx: Vesting state errors
//! - 9xx: General / internal errors
//!
//! Every failing operation is rejected before any state change, so an
//! error never implies a partial mutation.

use thiserror::Error;

use crate::{Address, Amount};

/// Central error enum for all Material operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterialError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The caller lacks the role the operation requires.
    #[error("MTRL_ERR_100: Unauthorized caller: {caller}")]
    Unauthorized { caller: Address },

    // =================================================================
    // Validation Errors (2xx)
    // =================================================================
    /// Amount must be strictly positive.
    #[error("MTRL_ERR_200: Invalid amount")]
    InvalidAmount,

    /// The zero address was supplied where a real account is required.
    #[error("MTRL_ERR_201: Invalid address")]
    InvalidAddress,

    /// New admin is the zero address or the current admin.
    #[error("MTRL_ERR_202: Invalid admin")]
    InvalidAdmin,

    /// New wallet is the zero address or the current wallet.
    #[error("MTRL_ERR_203: Invalid wallet")]
    InvalidWallet,

    /// The permit deadline has passed.
    #[error("MTRL_ERR_204: Permit expired: deadline {deadline}, now {now}")]
    ExpiredPermit { deadline: u64, now: u64 },

    /// The permit signature is malformed or was not produced by the owner
    /// over the current nonce.
    #[error("MTRL_ERR_205: Invalid permit signature")]
    InvalidSignature,

    // =================================================================
    // Ledger State Errors (3xx)
    // =================================================================
    /// Minting would push total supply past the cap.
    #[error("MTRL_ERR_300: Supply cap exceeded: requested {requested}, mintable {mintable}")]
    SupplyExceeded { requested: Amount, mintable: Amount },

    /// Sender balance is lower than the transfer amount.
    #[error("MTRL_ERR_301: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// Spender allowance is lower than the transfer amount.
    #[error("MTRL_ERR_302: Insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    /// Transfers are gated off and neither party is an admin.
    #[error("MTRL_ERR_303: Transfers are disabled")]
    TransferDisabled,

    /// Sum of balances no longer equals total supply. Critical safety alert.
    #[error("MTRL_ERR_304: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // Vesting State Errors (4xx)
    // =================================================================
    /// The schedule's start block has not been reached.
    #[error("MTRL_ERR_400: Vesting not started: starts at block {start_block}, now {height}")]
    NotStarted { start_block: u64, height: u64 },

    /// No cycle has elapsed since the last processed one.
    #[error("MTRL_ERR_401: Nothing claimable: elapsed cycles {elapsed}, last processed {last_processed}")]
    NotClaimable { elapsed: u64, last_processed: u64 },

    /// The schedule holds no tokens to release.
    #[error("MTRL_ERR_402: No tokens to release")]
    NoTokens,

    /// The ledger passed in is not the asset this schedule custodies.
    #[error("MTRL_ERR_403: Token mismatch: schedule holds {expected}, got {actual}")]
    TokenMismatch { expected: Address, actual: Address },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Configuration error (invalid config file, inconsistent fields, etc.).
    #[error("MTRL_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("MTRL_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error.
    #[error("MTRL_ERR_902: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MaterialError>;

impl From<std::io::Error> for MaterialError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MaterialError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl MaterialError {
    /// The `MTRL_ERR_nnn` code of this error.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::Unauthorized { .. } => 100,
            Self::InvalidAmount => 200,
            Self::InvalidAddress => 201,
            Self::InvalidAdmin => 202,
            Self::InvalidWallet => 203,
            Self::ExpiredPermit { .. } => 204,
            Self::InvalidSignature => 205,
            Self::SupplyExceeded { .. } => 300,
            Self::InsufficientBalance { .. } => 301,
            Self::InsufficientAllowance { .. } => 302,
            Self::TransferDisabled => 303,
            Self::SupplyInvariantViolation { .. } => 304,
            Self::NotStarted { .. } => 400,
            Self::NotClaimable { .. } => 401,
            Self::NoTokens => 402,
            Self::TokenMismatch { .. } => 403,
            Self::Configuration(_) => 900,
            Self::Serialization(_) => 901,
            Self::Io(_) => 902,
        }
    }

    /// Whether the caller may reasonably retry later (more blocks or more
    /// funding) without changing the request.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NotStarted { .. } | Self::NotClaimable { .. } | Self::NoTokens
        )
    }
}
