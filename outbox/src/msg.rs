//! Message types for the CL8Y optimistic outbox
//!
//! Claims are passed in full on every operation after `Claim`; see
//! [`common::Claim`].

use common::Claim;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message. All parameters are immutable afterwards.
#[cw_serde]
pub struct InstantiateMsg {
    /// Stake required to claim or challenge (must be non-zero)
    pub deposit: Uint128,
    /// Native denom stakes are paid in
    pub stake_denom: String,
    /// Epoch length in seconds
    pub epoch_period: u64,
    /// Challenge window in seconds, measured from the claim timestamp
    pub challenge_period: u64,
    /// Seconds an epoch must be closed before it is claimable
    pub claim_delay: u64,
    /// Epochs without verification before the bridge shuts down
    pub timeout_epochs: u64,
    /// Tolerated block shortfall for the liveness check
    pub max_missing_blocks: u64,
    /// Expected seconds per block
    pub slot_time: u64,
    /// Sender-side router identity
    pub router: String,
    /// Resolver channel contract address
    pub channel: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Claims
    // ========================================================================
    /// Claim the state root of the currently claimable epoch.
    ///
    /// Authorization: Anyone, with `deposit` of `stake_denom` attached
    Claim {
        epoch: u64,
        /// 32-byte sender-side message tree root
        state_root: Binary,
    },

    /// Challenge a claim within its challenge window.
    ///
    /// Authorization: Anyone, with `deposit` of `stake_denom` attached
    Challenge { epoch: u64, claim: Claim },

    // ========================================================================
    // Verification
    // ========================================================================
    /// Adopt an unchallenged claim after its challenge window.
    ///
    /// Authorization: Anyone (bridge must be running)
    ValidateSnapshot { epoch: u64, claim: Claim },

    /// Deliver an arbitrated state root.
    ///
    /// Authorization: Resolver channel only, reporting the router as sender
    ResolveDisputedClaim {
        epoch: u64,
        /// True 32-byte state root for `epoch`
        state_root: Binary,
        /// Tracked claim to settle, if any
        claim: Option<Claim>,
        /// Cross-chain sender as authenticated by the channel
        sender: String,
    },

    // ========================================================================
    // Deposits
    // ========================================================================
    /// Withdraw the claimer's stake (and reward) after the claim was found honest.
    WithdrawClaimDeposit { epoch: u64, claim: Claim },

    /// Withdraw the challenger's stake and reward after the challenge was upheld.
    WithdrawChallengeDeposit { epoch: u64, claim: Claim },

    /// Recover the claimer's stake from an unresolved claim after shutdown.
    WithdrawClaimerEscapeHatch { epoch: u64, claim: Claim },

    /// Recover the challenger's stake from an unresolved claim after shutdown.
    WithdrawChallengerEscapeHatch { epoch: u64, claim: Claim },

    // ========================================================================
    // Relay
    // ========================================================================
    /// Relay a message proven against the verified state root.
    ///
    /// Authorization: Anyone. `payload` is executed on `recipient`.
    SendMessage {
        /// Sibling digests, bottom-up (each 32 bytes, fewer than 64)
        proof: Vec<Binary>,
        message_id: u64,
        recipient: String,
        payload: Binary,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns epoch clock and verification status
    #[returns(StatusResponse)]
    Status {},

    /// Returns the stored claim commitment for an epoch
    #[returns(ClaimHashResponse)]
    ClaimHash { epoch: u64 },

    /// Computes the commitment for a claim record
    #[returns(ComputeHashResponse)]
    ComputeClaimHash { claim: Claim },

    /// Returns whether a message id has been relayed
    #[returns(MessageRelayedResponse)]
    IsMessageRelayed { message_id: u64 },

    /// Dry-runs proof verification for a message
    #[returns(VerifyMessageResponse)]
    VerifyMessage {
        proof: Vec<Binary>,
        message_id: u64,
        recipient: String,
        payload: Binary,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub deposit: Uint128,
    pub stake_denom: String,
    pub epoch_period: u64,
    pub challenge_period: u64,
    pub claim_delay: u64,
    pub timeout_epochs: u64,
    pub max_missing_blocks: u64,
    pub slot_time: u64,
    pub router: String,
    pub channel: Addr,
}

#[cw_serde]
pub struct StatusResponse {
    pub current_epoch: u64,
    pub claimable_epoch: u64,
    pub latest_verified_epoch: u64,
    pub state_root: Binary,
    /// Last epoch in which the bridge counts as running
    pub timeout_epoch: u64,
    pub running: bool,
}

#[cw_serde]
pub struct ClaimHashResponse {
    pub epoch: u64,
    /// None when no claim is tracked for the epoch
    pub hash: Option<Binary>,
}

#[cw_serde]
pub struct ComputeHashResponse {
    pub hash: Binary,
}

#[cw_serde]
pub struct MessageRelayedResponse {
    pub message_id: u64,
    pub relayed: bool,
}

#[cw_serde]
pub struct VerifyMessageResponse {
    pub leaf: Binary,
    /// Root the proof folds to (None when the proof is malformed)
    pub computed_root: Option<Binary>,
    /// Recipient is a normalized address that delivery can reach
    pub recipient_valid: bool,
    /// Proof folds to the verified root and the recipient is valid
    pub valid: bool,
    pub relayed: bool,
}
