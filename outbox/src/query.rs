//! Query handlers for the CL8Y optimistic outbox.

use common::{compute_root, message_leaf, Claim};
use cosmwasm_std::{Binary, Deps, Env, StdResult};

use crate::epoch::{claimable_epoch, current_epoch, is_running, timeout_epoch};
use crate::execute::{decode_proof, validate_recipient};
use crate::hash::hash_claim;
use crate::msg::{
    ClaimHashResponse, ComputeHashResponse, ConfigResponse, MessageRelayedResponse,
    StatusResponse, VerifyMessageResponse,
};
use crate::replay::is_relayed;
use crate::state::{CLAIM_HASHES, CONFIG, VERIFIED};

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        deposit: config.deposit,
        stake_denom: config.stake_denom,
        epoch_period: config.epoch_period,
        challenge_period: config.challenge_period,
        claim_delay: config.claim_delay,
        timeout_epochs: config.timeout_epochs,
        max_missing_blocks: config.max_missing_blocks,
        slot_time: config.slot_time,
        router: config.router,
        channel: config.channel,
    })
}

/// Query the epoch clock and verified state.
pub fn query_status(deps: Deps, env: Env) -> StdResult<StatusResponse> {
    let config = CONFIG.load(deps.storage)?;
    let verified = VERIFIED.load(deps.storage)?;
    let now = env.block.time.seconds();

    Ok(StatusResponse {
        current_epoch: current_epoch(now, config.epoch_period),
        claimable_epoch: claimable_epoch(now, &config),
        latest_verified_epoch: verified.epoch,
        state_root: Binary::from(verified.state_root.to_vec()),
        timeout_epoch: timeout_epoch(verified.epoch, &config),
        running: is_running(now, verified.epoch, &config),
    })
}

/// Query the stored claim commitment for an epoch.
pub fn query_claim_hash(deps: Deps, epoch: u64) -> StdResult<ClaimHashResponse> {
    let hash = CLAIM_HASHES.may_load(deps.storage, epoch)?;
    Ok(ClaimHashResponse {
        epoch,
        hash: hash.map(|h| Binary::from(h.to_vec())),
    })
}

/// Compute the commitment for a claim record (no state lookup).
pub fn query_compute_claim_hash(claim: Claim) -> StdResult<ComputeHashResponse> {
    Ok(ComputeHashResponse {
        hash: Binary::from(hash_claim(&claim).to_vec()),
    })
}

pub fn query_is_message_relayed(deps: Deps, message_id: u64) -> StdResult<MessageRelayedResponse> {
    Ok(MessageRelayedResponse {
        message_id,
        relayed: is_relayed(deps.storage, message_id)?,
    })
}

/// Dry-run `SendMessage` proof verification.
pub fn query_verify_message(
    deps: Deps,
    proof: Vec<Binary>,
    message_id: u64,
    recipient: String,
    payload: Binary,
) -> StdResult<VerifyMessageResponse> {
    let verified = VERIFIED.load(deps.storage)?;
    let leaf = message_leaf(message_id, &recipient, payload.as_slice());
    let computed_root = decode_proof(&proof)
        .ok()
        .map(|siblings| compute_root(leaf, &siblings));

    let recipient_valid = validate_recipient(deps.api, &recipient).is_ok();

    Ok(VerifyMessageResponse {
        leaf: Binary::from(leaf.to_vec()),
        computed_root: computed_root.map(|root| Binary::from(root.to_vec())),
        recipient_valid,
        valid: recipient_valid && computed_root == Some(verified.state_root),
        relayed: is_relayed(deps.storage, message_id)?,
    })
}
