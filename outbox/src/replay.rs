//! Replay Guard Module
//!
//! Tracks relayed message ids in a sparse bitmap. Each storage word covers
//! 256 consecutive ids:
//!
//! | Field | Value |
//! |-------|-------|
//! | word key | `message_id >> 8` |
//! | bit | `message_id & 0xff` (byte `bit / 8`, mask `1 << (bit % 8)`) |
//!
//! Bits are only ever set.

use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Map;

/// Relayed message bitmap
/// Key: word index, Value: 256-bit word
pub const RELAYED: Map<u64, [u8; 32]> = Map::new("relayed");

fn locate(message_id: u64) -> (u64, usize, u8) {
    let word = message_id >> 8;
    let bit = (message_id & 0xff) as usize;
    (word, bit / 8, 1u8 << (bit % 8))
}

/// Whether `message_id` has been relayed
pub fn is_relayed(storage: &dyn Storage, message_id: u64) -> StdResult<bool> {
    let (word, byte, mask) = locate(message_id);
    let bits = RELAYED.may_load(storage, word)?.unwrap_or_default();
    Ok(bits[byte] & mask != 0)
}

/// Mark `message_id` as relayed
pub fn mark_relayed(storage: &mut dyn Storage, message_id: u64) -> StdResult<()> {
    let (word, byte, mask) = locate(message_id);
    let mut bits = RELAYED.may_load(storage, word)?.unwrap_or_default();
    bits[byte] |= mask;
    RELAYED.save(storage, word, &bits)
}
