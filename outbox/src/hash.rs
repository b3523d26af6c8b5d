//! Claim commitment hashing
//!
//! The outbox stores `keccak256(encode_claim(claim))` per epoch. Every field
//! of the record is bound into the preimage, so a stale or forged record
//! never matches the stored commitment.
//!
//! # Byte Layout (integers big-endian)
//! - state_root:   u32 length ‖ bytes
//! - claimer:      0x00 (none) | 0x01 ‖ u32 length ‖ utf8 address
//! - timestamp:    u64
//! - block_number: u64
//! - honest:       u8 (0 unresolved, 1 claimer, 2 challenger)
//! - challenger:   0x00 (none) | 0x01 ‖ u32 length ‖ utf8 address

use common::{keccak256, Claim};
use cosmwasm_std::{Addr, Binary};

use crate::error::ContractError;

/// Encode a claim into its canonical hash preimage
pub fn encode_claim(claim: &Claim) -> Vec<u8> {
    let mut data = Vec::with_capacity(128);
    push_bytes(&mut data, claim.state_root.as_slice());
    push_addr(&mut data, claim.claimer.as_ref());
    data.extend_from_slice(&claim.timestamp.to_be_bytes());
    data.extend_from_slice(&claim.block_number.to_be_bytes());
    data.push(claim.honest.as_u8());
    push_addr(&mut data, claim.challenger.as_ref());
    data
}

/// Commitment stored for a claim
pub fn hash_claim(claim: &Claim) -> [u8; 32] {
    keccak256(&encode_claim(claim))
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a 32-byte digest from message input
pub fn parse_bytes32(input: &Binary) -> Result<[u8; 32], ContractError> {
    input
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength { got: input.len() })
}

// ============================================================================
// Internal helpers
// ============================================================================

fn push_bytes(data: &mut Vec<u8>, bytes: &[u8]) {
    data.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    data.extend_from_slice(bytes);
}

fn push_addr(data: &mut Vec<u8>, addr: Option<&Addr>) {
    match addr {
        None => data.push(0),
        Some(addr) => {
            data.push(1);
            push_bytes(data, addr.as_bytes());
        }
    }
}
