//! Deposit and reward handlers.
//!
//! Settlement of a finalized claim:
//! - unchallenged: the claimer gets exactly `deposit` back
//! - challenged: `deposit / 2` is burned and the honest party receives the
//!   remaining `2 * deposit - deposit / 2`
//!
//! After shutdown the escape hatches unwind unresolved claims, refunding each
//! party exactly its own `deposit`.

use common::{Claim, Party};
use cosmwasm_std::{Addr, BankMsg, Coin, CosmosMsg, DepsMut, Env, Response, StdError, Uint128};

use super::claim::{authenticate_claim, store_claim};
use crate::epoch::is_running;
use crate::error::ContractError;
use crate::state::{Config, CLAIM_HASHES, CONFIG, VERIFIED};

/// `(payout, burn)` for the honest party of a finalized claim.
pub fn settlement(deposit: Uint128, challenged: bool) -> Result<(Uint128, Uint128), StdError> {
    if !challenged {
        return Ok((deposit, Uint128::zero()));
    }
    let burn = deposit / Uint128::from(2u128);
    let payout = deposit
        .checked_add(deposit - burn)
        .map_err(StdError::from)?;
    Ok((payout, burn))
}

fn stake_messages(config: &Config, to: &Addr, payout: Uint128, burn: Uint128) -> Vec<CosmosMsg> {
    let mut messages: Vec<CosmosMsg> = vec![];
    if !payout.is_zero() {
        messages.push(CosmosMsg::Bank(BankMsg::Send {
            to_address: to.to_string(),
            amount: vec![Coin {
                denom: config.stake_denom.clone(),
                amount: payout,
            }],
        }));
    }
    if !burn.is_zero() {
        messages.push(CosmosMsg::Bank(BankMsg::Burn {
            amount: vec![Coin {
                denom: config.stake_denom.clone(),
                amount: burn,
            }],
        }));
    }
    messages
}

fn require_honest(epoch: u64, claim: &Claim, party: Party) -> Result<(), ContractError> {
    if claim.honest != party {
        return Err(ContractError::NotHonestParty {
            epoch,
            honest: claim.honest.as_str().to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Honest-party withdrawals
// ============================================================================

/// Pay out the claimer of a claim resolved in its favour.
pub fn execute_withdraw_claim_deposit(
    deps: DepsMut,
    epoch: u64,
    claim: Claim,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    authenticate_claim(deps.storage, epoch, &claim)?;
    require_honest(epoch, &claim, Party::Claimer)?;
    let claimer = claim
        .claimer
        .as_ref()
        .ok_or(ContractError::NothingToWithdraw { epoch })?;

    CLAIM_HASHES.remove(deps.storage, epoch);

    let (payout, burn) = settlement(config.deposit, claim.is_challenged())?;

    Ok(Response::new()
        .add_messages(stake_messages(&config, claimer, payout, burn))
        .add_attribute("action", "withdraw_claim_deposit")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("recipient", claimer.to_string())
        .add_attribute("payout", payout.to_string())
        .add_attribute("burned", burn.to_string()))
}

/// Pay out the challenger of a claim resolved in its favour.
pub fn execute_withdraw_challenge_deposit(
    deps: DepsMut,
    epoch: u64,
    claim: Claim,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    authenticate_claim(deps.storage, epoch, &claim)?;
    require_honest(epoch, &claim, Party::Challenger)?;
    let challenger = claim
        .challenger
        .as_ref()
        .ok_or(ContractError::NothingToWithdraw { epoch })?;

    CLAIM_HASHES.remove(deps.storage, epoch);

    let (payout, burn) = settlement(config.deposit, true)?;

    Ok(Response::new()
        .add_messages(stake_messages(&config, challenger, payout, burn))
        .add_attribute("action", "withdraw_challenge_deposit")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("recipient", challenger.to_string())
        .add_attribute("payout", payout.to_string())
        .add_attribute("burned", burn.to_string()))
}

// ============================================================================
// Escape hatches - shutdown only
// ============================================================================

/// Remove one party from an unresolved claim and refund its deposit.
///
/// When the counterpart is still present only this party's identity is
/// cleared and the commitment is rewritten, so the counterpart can escape
/// later with the updated record. Otherwise the commitment is deleted.
fn escape(
    deps: DepsMut,
    env: Env,
    epoch: u64,
    mut claim: Claim,
    party: Party,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let verified = VERIFIED.load(deps.storage)?;
    if is_running(env.block.time.seconds(), verified.epoch, &config) {
        return Err(ContractError::BridgeRunning);
    }

    authenticate_claim(deps.storage, epoch, &claim)?;
    if claim.is_resolved() {
        return Err(ContractError::AlreadyResolved { epoch });
    }

    let (leaving, remaining, action) = match party {
        Party::Claimer => (
            claim.claimer.take(),
            claim.challenger.is_some(),
            "withdraw_claimer_escape_hatch",
        ),
        Party::Challenger => (
            claim.challenger.take(),
            claim.claimer.is_some(),
            "withdraw_challenger_escape_hatch",
        ),
        Party::Unresolved => return Err(ContractError::NothingToWithdraw { epoch }),
    };
    let recipient = leaving.ok_or(ContractError::NothingToWithdraw { epoch })?;

    if remaining {
        store_claim(deps.storage, epoch, &claim)?;
    } else {
        CLAIM_HASHES.remove(deps.storage, epoch);
    }

    Ok(Response::new()
        .add_messages(stake_messages(&config, &recipient, config.deposit, Uint128::zero()))
        .add_attribute("action", action)
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("payout", config.deposit.to_string())
        .add_attribute("claim_deleted", (!remaining).to_string()))
}

pub fn execute_withdraw_claimer_escape_hatch(
    deps: DepsMut,
    env: Env,
    epoch: u64,
    claim: Claim,
) -> Result<Response, ContractError> {
    escape(deps, env, epoch, claim, Party::Claimer)
}

pub fn execute_withdraw_challenger_escape_hatch(
    deps: DepsMut,
    env: Env,
    epoch: u64,
    claim: Claim,
) -> Result<Response, ContractError> {
    escape(deps, env, epoch, claim, Party::Challenger)
}
