//! CL8Y Optimistic Outbox - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::epoch::claimable_epoch;
use crate::error::ContractError;
use crate::execute::{
    execute_challenge, execute_claim, execute_resolve_disputed_claim, execute_send_message,
    execute_validate_snapshot, execute_withdraw_challenge_deposit,
    execute_withdraw_challenger_escape_hatch, execute_withdraw_claim_deposit,
    execute_withdraw_claimer_escape_hatch, handle_delivery_reply,
};
use crate::hash::bytes32_to_hex;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_claim_hash, query_compute_claim_hash, query_config, query_is_message_relayed,
    query_status, query_verify_message,
};
use crate::state::{Config, VerifiedState, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, VERIFIED};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let channel = deps.api.addr_validate(&msg.channel)?;
    let config = Config {
        deposit: msg.deposit,
        stake_denom: msg.stake_denom,
        epoch_period: msg.epoch_period,
        challenge_period: msg.challenge_period,
        claim_delay: msg.claim_delay,
        timeout_epochs: msg.timeout_epochs,
        max_missing_blocks: msg.max_missing_blocks,
        slot_time: msg.slot_time,
        router: msg.router,
        channel,
    };
    validate_config(&config)?;
    CONFIG.save(deps.storage, &config)?;

    // Start one epoch behind the first claimable epoch so the bridge is
    // running and the first claim can advance the pointer.
    let now = env.block.time.seconds();
    let verified = VerifiedState {
        epoch: claimable_epoch(now, &config).saturating_sub(1),
        state_root: [0u8; 32],
    };
    VERIFIED.save(deps.storage, &verified)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("deposit", config.deposit.to_string())
        .add_attribute("stake_denom", config.stake_denom)
        .add_attribute("epoch_period", config.epoch_period.to_string())
        .add_attribute("challenge_period", config.challenge_period.to_string())
        .add_attribute("timeout_epochs", config.timeout_epochs.to_string())
        .add_attribute("router", config.router)
        .add_attribute("channel", config.channel)
        .add_attribute("latest_verified_epoch", verified.epoch.to_string())
        .add_attribute("state_root", bytes32_to_hex(&verified.state_root)))
}

fn validate_config(config: &Config) -> Result<(), ContractError> {
    let invalid = |reason: &str| ContractError::InvalidConfig {
        reason: reason.to_string(),
    };

    if config.deposit.is_zero() {
        return Err(invalid("deposit must be greater than zero"));
    }
    if config.stake_denom.is_empty() {
        return Err(invalid("stake_denom must not be empty"));
    }
    if config.epoch_period == 0 {
        return Err(invalid("epoch_period must be greater than zero"));
    }
    if config.slot_time == 0 {
        return Err(invalid("slot_time must be greater than zero"));
    }
    if config.claim_delay < config.epoch_period {
        return Err(invalid("claim_delay must be at least one epoch_period"));
    }
    if config.challenge_period == 0 {
        return Err(invalid("challenge_period must be greater than zero"));
    }
    if config.router.is_empty() {
        return Err(invalid("router must not be empty"));
    }

    // A claim must be able to clear its challenge window before the bridge
    // times out.
    let min_timeout = config
        .claim_delay
        .saturating_add(config.challenge_period)
        .saturating_add(config.epoch_period.saturating_mul(2));
    if config.timeout_epochs.saturating_mul(config.epoch_period) < min_timeout {
        return Err(ContractError::InvalidConfig {
            reason: format!(
                "timeout_epochs must cover at least {} seconds, got {}",
                min_timeout,
                config.timeout_epochs.saturating_mul(config.epoch_period)
            ),
        });
    }
    Ok(())
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Claims
        ExecuteMsg::Claim { epoch, state_root } => {
            execute_claim(deps, env, info, epoch, state_root)
        }
        ExecuteMsg::Challenge { epoch, claim } => execute_challenge(deps, env, info, epoch, claim),

        // Verification
        ExecuteMsg::ValidateSnapshot { epoch, claim } => {
            execute_validate_snapshot(deps, env, epoch, claim)
        }
        ExecuteMsg::ResolveDisputedClaim {
            epoch,
            state_root,
            claim,
            sender,
        } => execute_resolve_disputed_claim(deps, env, info, epoch, state_root, claim, sender),

        // Deposits
        ExecuteMsg::WithdrawClaimDeposit { epoch, claim } => {
            execute_withdraw_claim_deposit(deps, epoch, claim)
        }
        ExecuteMsg::WithdrawChallengeDeposit { epoch, claim } => {
            execute_withdraw_challenge_deposit(deps, epoch, claim)
        }
        ExecuteMsg::WithdrawClaimerEscapeHatch { epoch, claim } => {
            execute_withdraw_claimer_escape_hatch(deps, env, epoch, claim)
        }
        ExecuteMsg::WithdrawChallengerEscapeHatch { epoch, claim } => {
            execute_withdraw_challenger_escape_hatch(deps, env, epoch, claim)
        }

        // Relay
        ExecuteMsg::SendMessage {
            proof,
            message_id,
            recipient,
            payload,
        } => execute_send_message(deps, info, proof, message_id, recipient, payload),
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Every submessage is a message delivery whose reply id is the message id.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    handle_delivery_reply(msg)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Status {} => to_json_binary(&query_status(deps, env)?),
        QueryMsg::ClaimHash { epoch } => to_json_binary(&query_claim_hash(deps, epoch)?),
        QueryMsg::ComputeClaimHash { claim } => {
            to_json_binary(&query_compute_claim_hash(claim)?)
        }
        QueryMsg::IsMessageRelayed { message_id } => {
            to_json_binary(&query_is_message_relayed(deps, message_id)?)
        }
        QueryMsg::VerifyMessage {
            proof,
            message_id,
            recipient,
            payload,
        } => to_json_binary(&query_verify_message(
            deps, proof, message_id, recipient, payload,
        )?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
