//! Message relay handlers.
//!
//! `SendMessage` proves a message against the verified state root, flips its
//! replay bit and executes the payload on the recipient. Delivery is a
//! submessage with `reply_on_error`; the reply turns a failed delivery into
//! `DeliveryFailure`, which reverts the whole transaction including the
//! replay bit, so the message can be relayed again later.

use common::{compute_root, message_leaf, MAX_PROOF_DEPTH};
use cosmwasm_std::{
    Addr, Api, Binary, DepsMut, MessageInfo, Reply, Response, SubMsg, SubMsgResult, WasmMsg,
};

use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, parse_bytes32};
use crate::replay::{is_relayed, mark_relayed};
use crate::state::VERIFIED;

/// Decode proof siblings, rejecting oversized proofs before touching them.
pub fn decode_proof(proof: &[Binary]) -> Result<Vec<[u8; 32]>, ContractError> {
    if proof.len() >= MAX_PROOF_DEPTH {
        return Err(ContractError::ProofTooLong {
            depth: proof.len(),
            max: MAX_PROOF_DEPTH - 1,
        });
    }
    proof.iter().map(parse_bytes32).collect()
}

/// The leaf commits to the recipient string as sent, so it must already be a
/// normalized address on this chain.
pub fn validate_recipient(api: &dyn Api, recipient: &str) -> Result<Addr, ContractError> {
    api.addr_validate(recipient)
        .map_err(|err| ContractError::InvalidRecipient {
            recipient: recipient.to_string(),
            reason: err.to_string(),
        })
}

/// Root that `proof` folds to for the given message.
pub fn message_root(
    proof: &[Binary],
    message_id: u64,
    recipient: &str,
    payload: &[u8],
) -> Result<[u8; 32], ContractError> {
    let siblings = decode_proof(proof)?;
    let leaf = message_leaf(message_id, recipient, payload);
    Ok(compute_root(leaf, &siblings))
}

// ============================================================================
// SendMessage
// ============================================================================

/// Relay a proven message to its recipient, exactly once.
pub fn execute_send_message(
    deps: DepsMut,
    info: MessageInfo,
    proof: Vec<Binary>,
    message_id: u64,
    recipient: String,
    payload: Binary,
) -> Result<Response, ContractError> {
    let root = message_root(&proof, message_id, &recipient, payload.as_slice())?;

    let verified = VERIFIED.load(deps.storage)?;
    if root != verified.state_root {
        return Err(ContractError::InvalidProof);
    }

    if is_relayed(deps.storage, message_id)? {
        return Err(ContractError::AlreadyRelayed { message_id });
    }
    let recipient_addr = validate_recipient(deps.api, &recipient)?;
    mark_relayed(deps.storage, message_id)?;

    let delivery = WasmMsg::Execute {
        contract_addr: recipient_addr.to_string(),
        msg: payload,
        funds: vec![],
    };

    // The reply id carries the message id back to `reply`.
    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_error(delivery, message_id))
        .add_attribute("action", "send_message")
        .add_attribute("message_id", message_id.to_string())
        .add_attribute("recipient", recipient_addr)
        .add_attribute("relayer", info.sender)
        .add_attribute("state_root", bytes32_to_hex(&root)))
}

/// Handle a failed delivery.
pub fn handle_delivery_reply(reply: Reply) -> Result<Response, ContractError> {
    match reply.result {
        SubMsgResult::Err(reason) => Err(ContractError::DeliveryFailure {
            message_id: reply.id,
            reason,
        }),
        SubMsgResult::Ok(_) => Ok(Response::new()
            .add_attribute("action", "delivery")
            .add_attribute("message_id", reply.id.to_string())),
    }
}
