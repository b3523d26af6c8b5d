//! Message tree hashing.
//!
//! # Leaf
//! `keccak256(keccak256(message_id ‖ recipient_len ‖ recipient ‖ payload))`
//! - `message_id`: u64 big-endian (8 bytes)
//! - `recipient_len`: u32 big-endian length of the recipient address string
//! - `recipient`: UTF-8 bytes of the recipient address
//! - `payload`: raw message bytes
//!
//! The outer hash keeps a 64-byte internal node from ever being accepted as a
//! leaf preimage.
//!
//! # Internal nodes
//! `keccak256(min(a, b) ‖ max(a, b))`, comparing the digests as big-endian
//! byte strings, so a proof carries no left/right flags.

use tiny_keccak::{Hasher, Keccak};

/// Proofs must be strictly shorter than this.
pub const MAX_PROOF_DEPTH: usize = 64;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Double-hashed leaf for a relayed message.
pub fn message_leaf(message_id: u64, recipient: &str, payload: &[u8]) -> [u8; 32] {
    let recipient_bytes = recipient.as_bytes();
    let mut data = Vec::with_capacity(8 + 4 + recipient_bytes.len() + payload.len());
    data.extend_from_slice(&message_id.to_be_bytes());
    data.extend_from_slice(&(recipient_bytes.len() as u32).to_be_bytes());
    data.extend_from_slice(recipient_bytes);
    data.extend_from_slice(payload);
    keccak256(&keccak256(&data))
}

/// Hash two sibling nodes, smaller operand first.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(lo);
    data[32..].copy_from_slice(hi);
    keccak256(&data)
}

/// Fold a proof upward from `leaf`.
///
/// Depth is not checked here; callers reject proofs of `MAX_PROOF_DEPTH` or
/// more before decoding them.
pub fn compute_root(leaf: [u8; 32], proof: &[[u8; 32]]) -> [u8; 32] {
    proof
        .iter()
        .fold(leaf, |node, sibling| hash_pair(&node, sibling))
}

/// Batch-built sorted-pair merkle tree.
///
/// An unpaired node at the end of a level is carried up unchanged, so its
/// proof has no entry for that level.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    pub fn from_leaves(leaves: Vec<[u8; 32]>) -> Self {
        let mut levels = vec![leaves];
        while levels.last().map_or(false, |level| level.len() > 1) {
            let next = levels
                .last()
                .map(|level| {
                    level
                        .chunks(2)
                        .map(|pair| match pair.get(1) {
                            Some(right) => hash_pair(&pair[0], right),
                            None => pair[0],
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            levels.push(next);
        }
        Self { levels }
    }

    /// Root of the tree; all zeros for an empty tree.
    pub fn root(&self) -> [u8; 32] {
        self.levels
            .last()
            .and_then(|level| level.first().copied())
            .unwrap_or([0u8; 32])
    }

    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sibling path for the leaf at `index`, bottom-up.
    pub fn proof(&self, index: usize) -> Option<Vec<[u8; 32]>> {
        if index >= self.len() {
            return None;
        }
        let mut proof = Vec::new();
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = position ^ 1;
            if let Some(node) = level.get(sibling) {
                proof.push(*node);
            }
            position /= 2;
        }
        Some(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(n: u64) -> Vec<[u8; 32]> {
        (0..n)
            .map(|i| message_leaf(i, "terra1recipient", format!("payload-{i}").as_bytes()))
            .collect()
    }

    #[test]
    fn test_keccak256_basic() {
        // keccak256("hello")
        let result = keccak256(b"hello");
        assert_eq!(
            hex_string(&result),
            "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_hash_pair_is_order_independent() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));

        let mut expected = [0u8; 64];
        expected[..32].copy_from_slice(&a);
        expected[32..].copy_from_slice(&b);
        assert_eq!(hash_pair(&b, &a), keccak256(&expected));
    }

    #[test]
    fn test_leaf_is_double_hashed() {
        let mut data = Vec::new();
        data.extend_from_slice(&7u64.to_be_bytes());
        data.extend_from_slice(&3u32.to_be_bytes());
        data.extend_from_slice(b"bob");
        data.extend_from_slice(b"hi");
        assert_eq!(message_leaf(7, "bob", b"hi"), keccak256(&keccak256(&data)));
    }

    #[test]
    fn test_leaf_binds_every_field() {
        let base = message_leaf(1, "bob", b"hi");
        assert_ne!(base, message_leaf(2, "bob", b"hi"));
        assert_ne!(base, message_leaf(1, "bo", b"bhi"));
        assert_ne!(base, message_leaf(1, "bob", b"ho"));
    }

    #[test]
    fn test_single_leaf_tree() {
        let tree = MerkleTree::from_leaves(leaves(1));
        assert_eq!(tree.root(), leaves(1)[0]);
        assert_eq!(tree.proof(0), Some(vec![]));
        assert_eq!(tree.proof(1), None);
    }

    #[test]
    fn test_empty_tree() {
        let tree = MerkleTree::from_leaves(vec![]);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), [0u8; 32]);
        assert_eq!(tree.proof(0), None);
    }

    #[test]
    fn test_every_proof_folds_to_root() {
        for n in [2u64, 3, 5, 8, 13] {
            let leaves = leaves(n);
            let tree = MerkleTree::from_leaves(leaves.clone());
            for (i, leaf) in leaves.iter().enumerate() {
                let proof = tree.proof(i).unwrap();
                assert_eq!(compute_root(*leaf, &proof), tree.root(), "n={n} i={i}");
            }
        }
    }

    #[test]
    fn test_unpaired_leaf_skips_level() {
        let tree = MerkleTree::from_leaves(leaves(3));
        assert_eq!(tree.proof(0).unwrap().len(), 2);
        assert_eq!(tree.proof(2).unwrap().len(), 1);
    }

    #[test]
    fn test_wrong_leaf_does_not_fold_to_root() {
        let tree = MerkleTree::from_leaves(leaves(4));
        let proof = tree.proof(1).unwrap();
        let forged = message_leaf(1, "terra1recipient", b"forged");
        assert_ne!(compute_root(forged, &proof), tree.root());
    }

    fn hex_string(bytes: &[u8; 32]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
