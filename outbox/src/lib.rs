//! CL8Y Optimistic Outbox - Epoch Snapshot Bridge for TerraClassic
//!
//! The sender chain's inbox commits its outgoing message tree once per epoch.
//! This contract is the receiver side: it trusts a claimed tree root after a
//! challenge window and relays messages proven against it.
//!
//! # Snapshot Flow
//! 1. A claimer stakes `deposit` and claims the root of a recently closed epoch
//! 2. Anyone may stake `deposit` and challenge it within `challenge_period`
//! 3. Unchallenged: after the window, `ValidateSnapshot` adopts the root if the
//!    liveness heuristic holds
//! 4. Challenged: the resolver channel delivers the arbitrated root from the
//!    sender-side router and the honest party is recorded
//! 5. The honest party withdraws its stake (and half the loser's stake)
//!
//! # Relay Flow
//! 1. A relayer submits a merkle proof for `(message_id, recipient, payload)`
//! 2. The proof must fold to the verified state root
//! 3. The message id is marked relayed and the payload is executed on the
//!    recipient; a failed delivery reverts everything
//!
//! # Security
//! - Only claim hashes are stored; stale or forged records are rejected
//! - Half of the losing stake is burned on every dispute
//! - Escape hatches return every stake after the bridge times out

pub mod contract;
pub mod epoch;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod replay;
pub mod state;

pub use crate::error::ContractError;
pub use crate::execute::settlement;
pub use crate::hash::{bytes32_to_hex, hash_claim};
pub use common::{message_leaf, Claim, MerkleTree, Party};
