//! Snapshot verification handlers.
//!
//! Two paths advance the verified root:
//! 1. `ValidateSnapshot` - optimistic: unchallenged claim, window elapsed,
//!    liveness heuristic holds
//! 2. `ResolveDisputedClaim` - arbitrated: root delivered by the resolver
//!    channel on behalf of the sender-side router
//!
//! Both only move `latest_verified_epoch` forward; an older epoch is a no-op
//! for the pointer.

use common::{Claim, Party};
use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, Storage};

use super::claim::{authenticate_claim, claim_matches, store_claim};
use crate::epoch::{expected_block, is_live, is_running};
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, parse_bytes32};
use crate::state::{VerifiedState, CONFIG, VERIFIED};

/// Adopt `state_root` for `epoch` if it is newer than the verified epoch.
fn advance_verified(
    storage: &mut dyn Storage,
    epoch: u64,
    state_root: [u8; 32],
) -> Result<bool, ContractError> {
    let verified = VERIFIED.load(storage)?;
    if epoch <= verified.epoch {
        return Ok(false);
    }
    VERIFIED.save(storage, &VerifiedState { epoch, state_root })?;
    Ok(true)
}

// ============================================================================
// ValidateSnapshot - Optimistic path
// ============================================================================

/// Finalize an unchallenged claim after its challenge window.
pub fn execute_validate_snapshot(
    deps: DepsMut,
    env: Env,
    epoch: u64,
    mut claim: Claim,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let verified = VERIFIED.load(deps.storage)?;
    let now = env.block.time.seconds();

    if !is_running(now, verified.epoch, &config) {
        return Err(ContractError::BridgeShutdown);
    }

    authenticate_claim(deps.storage, epoch, &claim)?;

    let window_end = claim.timestamp.saturating_add(config.challenge_period);
    if now <= window_end {
        return Err(ContractError::ChallengeWindowOpen {
            remaining_seconds: window_end - now + 1,
        });
    }

    let expected = expected_block(claim.block_number, claim.timestamp, now, config.slot_time);
    if !is_live(expected, env.block.height, config.max_missing_blocks) {
        return Err(ContractError::LivenessViolation {
            expected,
            observed: env.block.height,
            tolerance: config.max_missing_blocks,
        });
    }

    if claim.is_challenged() {
        return Err(ContractError::ClaimChallenged { epoch });
    }
    if claim.is_resolved() {
        return Err(ContractError::AlreadyResolved { epoch });
    }

    let state_root = parse_bytes32(&claim.state_root)?;
    let advanced = advance_verified(deps.storage, epoch, state_root)?;

    claim.honest = Party::Claimer;
    store_claim(deps.storage, epoch, &claim)?;

    let mut response = Response::new()
        .add_attribute("action", "validate_snapshot")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("state_root", bytes32_to_hex(&state_root))
        .add_attribute("honest", claim.honest.as_str());
    if advanced {
        response = response.add_attribute("verified_epoch", epoch.to_string());
    }
    Ok(response)
}

// ============================================================================
// ResolveDisputedClaim - Resolver channel
// ============================================================================

/// Apply an arbitrated state root delivered by the resolver channel.
///
/// The root is adopted even when no claim exists for the epoch. A supplied
/// claim is only settled if it matches the stored commitment and is still
/// unresolved; anything else leaves it untouched.
pub fn execute_resolve_disputed_claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    epoch: u64,
    state_root: Binary,
    claim: Option<Claim>,
    sender: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.channel {
        return Err(ContractError::Unauthorized);
    }
    if sender != config.router {
        return Err(ContractError::UnauthorizedRouter { sender });
    }

    let verified = VERIFIED.load(deps.storage)?;
    if !is_running(env.block.time.seconds(), verified.epoch, &config) {
        return Err(ContractError::BridgeShutdown);
    }

    let root = parse_bytes32(&state_root)?;

    let mut response = Response::new()
        .add_attribute("action", "resolve_disputed_claim")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("state_root", bytes32_to_hex(&root));

    if root != [0u8; 32] && advance_verified(deps.storage, epoch, root)? {
        response = response.add_attribute("verified_epoch", epoch.to_string());
    }

    if let Some(mut claim) = claim {
        if claim_matches(deps.storage, epoch, &claim)? && !claim.is_resolved() {
            if claim.state_root.as_slice() == root.as_slice() {
                claim.honest = Party::Claimer;
            } else if claim.is_challenged() {
                claim.honest = Party::Challenger;
            }
            if claim.is_resolved() {
                store_claim(deps.storage, epoch, &claim)?;
            }
            response = response.add_attribute("honest", claim.honest.as_str());
        }
    }

    Ok(response)
}
