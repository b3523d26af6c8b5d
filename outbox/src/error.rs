//! Error types for the CL8Y optimistic outbox contract

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only the resolver channel can resolve disputes")]
    Unauthorized,

    #[error("Unauthorized: cross-chain sender {sender} is not the router")]
    UnauthorizedRouter { sender: String },

    // ========================================================================
    // Claim Record Errors
    // ========================================================================

    #[error("Invalid claim: record does not match commitment for epoch {epoch}")]
    InvalidClaim { epoch: u64 },

    #[error("Claim already exists for epoch {epoch}")]
    ClaimAlreadyExists { epoch: u64 },

    #[error("Claim for epoch {epoch} already challenged")]
    AlreadyChallenged { epoch: u64 },

    #[error("Claim for epoch {epoch} already resolved")]
    AlreadyResolved { epoch: u64 },

    #[error("Claim for epoch {epoch} is challenged and can only be resolved by the router")]
    ClaimChallenged { epoch: u64 },

    #[error("Caller side is not the honest party for epoch {epoch}: claim resolved as {honest}")]
    NotHonestParty { epoch: u64, honest: String },

    #[error("Nothing to withdraw for epoch {epoch}")]
    NothingToWithdraw { epoch: u64 },

    #[error("State root must not be zero")]
    ZeroStateRoot,

    // ========================================================================
    // Window Errors
    // ========================================================================

    #[error("Epoch {epoch} is not claimable: claimable epoch is {claimable}")]
    EpochNotClaimable { epoch: u64, claimable: u64 },

    #[error("Challenge window closed for epoch {epoch}")]
    ChallengeWindowClosed { epoch: u64 },

    #[error("Challenge window still open: {remaining_seconds} seconds remaining")]
    ChallengeWindowOpen { remaining_seconds: u64 },

    #[error("Bridge is shut down")]
    BridgeShutdown,

    #[error("Bridge is running: escape hatch only available after shutdown")]
    BridgeRunning,

    #[error("Liveness check failed: expected block {expected}, observed {observed} (tolerance {tolerance})")]
    LivenessViolation {
        expected: u64,
        observed: u64,
        tolerance: u64,
    },

    // ========================================================================
    // Stake Errors
    // ========================================================================

    #[error("Insufficient stake: expected {expected}, got {got}")]
    InsufficientStake { expected: Uint128, got: Uint128 },

    // ========================================================================
    // Relay Errors
    // ========================================================================

    #[error("Proof too long: depth {depth}, maximum is {max}")]
    ProofTooLong { depth: usize, max: usize },

    #[error("Invalid proof: computed root does not match verified state root")]
    InvalidProof,

    #[error("Message {message_id} already relayed")]
    AlreadyRelayed { message_id: u64 },

    #[error("Invalid recipient {recipient}: {reason}")]
    InvalidRecipient { recipient: String, reason: String },

    #[error("Delivery of message {message_id} failed: {reason}")]
    DeliveryFailure { message_id: u64, reason: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}
