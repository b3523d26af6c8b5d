//! Claim record types.
//!
//! The outbox never stores a `Claim`; it stores `hash(Claim)` per epoch and
//! callers hand the full record back on every later operation.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary};

/// Which side of a claim was found honest.
#[cw_serde]
#[derive(Copy, Default)]
pub enum Party {
    #[default]
    Unresolved,
    Claimer,
    Challenger,
}

impl Party {
    /// Single-byte tag used in the claim hash preimage.
    pub fn as_u8(&self) -> u8 {
        match self {
            Party::Unresolved => 0,
            Party::Claimer => 1,
            Party::Challenger => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Party::Unresolved => "unresolved",
            Party::Claimer => "claimer",
            Party::Challenger => "challenger",
        }
    }
}

/// A committed assertion that `state_root` is the sender-side message tree
/// root for one epoch.
#[cw_serde]
pub struct Claim {
    /// 32-byte sender-side message tree root
    pub state_root: Binary,
    /// Claimant; cleared only when the claimer leaves through the escape hatch
    pub claimer: Option<Addr>,
    /// Block time (seconds) when the claim was posted
    pub timestamp: u64,
    /// Block height when the claim was posted (liveness heuristic only)
    pub block_number: u64,
    /// Adjudicated outcome
    pub honest: Party,
    /// Challenger, if the claim was disputed
    pub challenger: Option<Addr>,
}

impl Claim {
    pub fn is_challenged(&self) -> bool {
        self.challenger.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.honest != Party::Unresolved
    }
}
