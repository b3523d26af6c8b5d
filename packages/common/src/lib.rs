//! Common - Shared Types and Utilities for the CL8Y Optimistic Outbox
//!
//! This package provides the claim record exchanged with the outbox contract
//! and the merkle helpers shared by the sender-side inbox, off-chain relayers,
//! and the outbox proof verifier.

pub mod claim;
pub mod merkle;

pub use claim::{Claim, Party};
pub use merkle::{
    compute_root, hash_pair, keccak256, message_leaf, MerkleTree, MAX_PROOF_DEPTH,
};
