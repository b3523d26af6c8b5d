//! State definitions for the CL8Y optimistic outbox
//!
//! Claims are never stored in full: `CLAIM_HASHES` keeps one 32-byte
//! commitment per epoch and callers supply the record on every operation.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration, fixed at instantiation
#[cw_serde]
pub struct Config {
    /// Stake required from claimers and challengers
    pub deposit: Uint128,
    /// Native denom stakes are paid in
    pub stake_denom: String,
    /// Epoch length in seconds
    pub epoch_period: u64,
    /// Seconds after a claim during which it can be challenged
    pub challenge_period: u64,
    /// Seconds an epoch must be closed before it can be claimed
    pub claim_delay: u64,
    /// Epochs without a verified snapshot before the bridge shuts down
    pub timeout_epochs: u64,
    /// Tolerated shortfall of observed blocks against expected blocks
    pub max_missing_blocks: u64,
    /// Expected seconds per block
    pub slot_time: u64,
    /// Sender-side router identity reported by the resolver channel
    pub router: String,
    /// Contract that delivers arbitrated state roots
    pub channel: Addr,
}

/// Latest trusted sender-side root
#[cw_serde]
pub struct VerifiedState {
    /// Latest verified epoch (never decreases)
    pub epoch: u64,
    /// Sender-side message tree root for `epoch`
    pub state_root: [u8; 32],
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:cl8y-optimistic-outbox";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const VERIFIED: Item<VerifiedState> = Item::new("verified");

/// Claim commitments
/// Key: epoch, Value: keccak256 of the encoded claim
pub const CLAIM_HASHES: Map<u64, [u8; 32]> = Map::new("claim_hashes");
