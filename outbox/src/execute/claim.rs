//! Claim ledger handlers.
//!
//! Only `hash(Claim)` is stored. Every later operation receives the full
//! record, recomputes the hash and rejects anything that does not match.

use common::{Claim, Party};
use cosmwasm_std::{
    BankMsg, Binary, Coin, DepsMut, Env, MessageInfo, Response, Storage, Uint128,
};

use crate::epoch::claimable_epoch;
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, hash_claim, parse_bytes32};
use crate::state::{Config, CLAIM_HASHES, CONFIG};

// ============================================================================
// Record authenticity
// ============================================================================

/// Whether `claim` is the record committed for `epoch`.
pub(crate) fn claim_matches(
    storage: &dyn Storage,
    epoch: u64,
    claim: &Claim,
) -> Result<bool, ContractError> {
    let stored = CLAIM_HASHES.may_load(storage, epoch)?;
    Ok(stored == Some(hash_claim(claim)))
}

/// Reject a claim record that does not match the stored commitment.
pub(crate) fn authenticate_claim(
    storage: &dyn Storage,
    epoch: u64,
    claim: &Claim,
) -> Result<(), ContractError> {
    if !claim_matches(storage, epoch, claim)? {
        return Err(ContractError::InvalidClaim { epoch });
    }
    Ok(())
}

/// Replace the commitment for `epoch` with the hash of the updated record.
pub(crate) fn store_claim(
    storage: &mut dyn Storage,
    epoch: u64,
    claim: &Claim,
) -> Result<(), ContractError> {
    CLAIM_HASHES.save(storage, epoch, &hash_claim(claim))?;
    Ok(())
}

/// Check the attached stake and return a refund for anything sent beyond it.
pub(crate) fn collect_stake(
    info: &MessageInfo,
    config: &Config,
) -> Result<Option<BankMsg>, ContractError> {
    let paid = info
        .funds
        .iter()
        .find(|c| c.denom == config.stake_denom)
        .map(|c| c.amount)
        .unwrap_or(Uint128::zero());
    if paid < config.deposit {
        return Err(ContractError::InsufficientStake {
            expected: config.deposit,
            got: paid,
        });
    }

    let excess: Vec<Coin> = info
        .funds
        .iter()
        .map(|c| {
            let amount = if c.denom == config.stake_denom {
                c.amount - config.deposit
            } else {
                c.amount
            };
            Coin {
                denom: c.denom.clone(),
                amount,
            }
        })
        .filter(|c| !c.amount.is_zero())
        .collect();

    if excess.is_empty() {
        return Ok(None);
    }
    Ok(Some(BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: excess,
    }))
}

// ============================================================================
// Claim
// ============================================================================

/// Post a state root for the currently claimable epoch.
pub fn execute_claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    epoch: u64,
    state_root: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let refund = collect_stake(&info, &config)?;

    let now = env.block.time.seconds();
    let claimable = claimable_epoch(now, &config);
    if epoch != claimable {
        return Err(ContractError::EpochNotClaimable { epoch, claimable });
    }

    let root = parse_bytes32(&state_root)?;
    if root == [0u8; 32] {
        return Err(ContractError::ZeroStateRoot);
    }

    if CLAIM_HASHES.has(deps.storage, epoch) {
        return Err(ContractError::ClaimAlreadyExists { epoch });
    }

    let claim = Claim {
        state_root: Binary::from(root.to_vec()),
        claimer: Some(info.sender.clone()),
        timestamp: now,
        block_number: env.block.height,
        honest: Party::Unresolved,
        challenger: None,
    };
    store_claim(deps.storage, epoch, &claim)?;

    Ok(Response::new()
        .add_messages(refund)
        .add_attribute("action", "claim")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("claimer", info.sender)
        .add_attribute("state_root", bytes32_to_hex(&root))
        .add_attribute("timestamp", now.to_string())
        .add_attribute("block_number", env.block.height.to_string()))
}

// ============================================================================
// Challenge
// ============================================================================

/// Dispute a claim within its challenge window.
pub fn execute_challenge(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    epoch: u64,
    mut claim: Claim,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    authenticate_claim(deps.storage, epoch, &claim)?;
    if claim.is_challenged() {
        return Err(ContractError::AlreadyChallenged { epoch });
    }
    if claim.is_resolved() {
        return Err(ContractError::AlreadyResolved { epoch });
    }
    let refund = collect_stake(&info, &config)?;

    let window_end = claim.timestamp.saturating_add(config.challenge_period);
    if env.block.time.seconds() >= window_end {
        return Err(ContractError::ChallengeWindowClosed { epoch });
    }

    claim.challenger = Some(info.sender.clone());
    store_claim(deps.storage, epoch, &claim)?;

    Ok(Response::new()
        .add_messages(refund)
        .add_attribute("action", "challenge")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("challenger", info.sender))
}
