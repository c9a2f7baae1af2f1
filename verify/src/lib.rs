//! Shared claim-leaf encoding and Merkle proof verification.
//!
//! The reward-set builder and the distributor ledger must agree byte-for-byte
//! on every leaf hash, so both depend on this crate rather than each carrying
//! their own copy of the encoding.

use alloy::{
    primitives::{keccak256, Address, B256, U256},
    sol_types::SolValue,
};

/// ABI-encodes one claim tuple:
/// `(uint256 cycle, uint256 index, address account, address[] tokens, uint256[] cumulativeAmounts)`.
///
/// This is the canonical leaf pre-image. `tokens` and `amounts` are
/// positionally paired; callers validate lengths before handing data in,
/// so a mismatch here is a bug in the caller, not bad user input.
pub fn encode_claim(
    cycle: u64,
    index: u64,
    account: Address,
    tokens: &[Address],
    amounts: &[U256],
) -> Vec<u8> {
    assert_eq!(
        tokens.len(),
        amounts.len(),
        "tokens and amounts must be the same length"
    );

    (
        U256::from(cycle),
        U256::from(index),
        account,
        tokens.to_vec(),
        amounts.to_vec(),
    )
        .abi_encode()
}

/// Leaf hash of one claim: `keccak256(encode_claim(..))`.
///
/// No domain-separation prefix: the hash must match the paired on-chain
/// verifier, which hashes the raw ABI encoding.
pub fn hash_claim(
    cycle: u64,
    index: u64,
    account: Address,
    tokens: &[Address],
    amounts: &[U256],
) -> B256 {
    keccak256(encode_claim(cycle, index, account, tokens, amounts))
}

/// Returns true if `leaf` can be proved to be part of the Merkle tree defined
/// by `root`, given the sibling hashes on the branch from the leaf to the
/// root. Pairs are hashed in sorted order, so no left/right position data is
/// carried in the proof. Port of OpenZeppelin's `MerkleProof.verify`.
pub fn verify(proof: &[B256], root: B256, leaf: B256) -> bool {
    let mut computed_hash = leaf;
    for proof_element in proof {
        computed_hash = hash_pair(&computed_hash, proof_element);
    }
    computed_hash == root
}

/// keccak256 of the sorted concatenation of two nodes.
pub fn hash_pair(a: &B256, b: &B256) -> B256 {
    let mut buf = [0u8; 64];
    if a <= b {
        buf[..32].copy_from_slice(a.as_slice());
        buf[32..].copy_from_slice(b.as_slice());
    } else {
        buf[..32].copy_from_slice(b.as_slice());
        buf[32..].copy_from_slice(a.as_slice());
    }
    keccak256(buf)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    fn word(v: u64) -> [u8; 32] {
        U256::from(v).to_be_bytes::<32>()
    }

    fn address_word(a: Address) -> [u8; 32] {
        let mut w = [0u8; 32];
        w[12..].copy_from_slice(a.as_slice());
        w
    }

    // Pins the ABI layout: head words for the static fields, tail offsets for
    // the two dynamic arrays, then length-prefixed array contents.
    #[test]
    fn test_encode_claim_layout() {
        let account = address!("3f5CE5FBFe3E9af3971dD833D26bA9b5C936f0bE");
        let tokens = [
            address!("dd974D5C2e2928deA5F71b9825b8b646686BD200"),
            address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            address!("2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
            address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE"),
        ];
        let amounts = [
            U256::from(100),
            U256::from(200),
            U256::from(300),
            U256::from(400),
        ];

        let mut expected = Vec::new();
        expected.extend_from_slice(&word(5)); // cycle
        expected.extend_from_slice(&word(10)); // index
        expected.extend_from_slice(&address_word(account));
        expected.extend_from_slice(&word(0xa0)); // offset of tokens tail
        expected.extend_from_slice(&word(0x140)); // offset of amounts tail
        expected.extend_from_slice(&word(4)); // tokens length
        for token in &tokens {
            expected.extend_from_slice(&address_word(*token));
        }
        expected.extend_from_slice(&word(4)); // amounts length
        for amount in [100u64, 200, 300, 400] {
            expected.extend_from_slice(&word(amount));
        }

        let encoded = encode_claim(5, 10, account, &tokens, &amounts);
        assert_eq!(encoded, expected);
        assert_eq!(
            hash_claim(5, 10, account, &tokens, &amounts),
            keccak256(&expected)
        );
    }

    #[test]
    fn test_encode_claim_empty_lists() {
        let account = address!("3f5CE5FBFe3E9af3971dD833D26bA9b5C936f0bE");

        let mut expected = Vec::new();
        expected.extend_from_slice(&word(0));
        expected.extend_from_slice(&word(0));
        expected.extend_from_slice(&address_word(account));
        expected.extend_from_slice(&word(0xa0));
        expected.extend_from_slice(&word(0xc0));
        expected.extend_from_slice(&word(0)); // tokens length
        expected.extend_from_slice(&word(0)); // amounts length

        assert_eq!(encode_claim(0, 0, account, &[], &[]), expected);
    }

    #[test]
    fn test_hash_claim_binds_every_field() {
        let account = address!("3f5CE5FBFe3E9af3971dD833D26bA9b5C936f0bE");
        let other = address!("dd974D5C2e2928deA5F71b9825b8b646686BD200");
        let tokens = [other];
        let amounts = [U256::from(1)];

        let base = hash_claim(1, 2, account, &tokens, &amounts);
        assert_ne!(base, hash_claim(2, 2, account, &tokens, &amounts));
        assert_ne!(base, hash_claim(1, 3, account, &tokens, &amounts));
        assert_ne!(base, hash_claim(1, 2, other, &tokens, &amounts));
        assert_ne!(base, hash_claim(1, 2, account, &tokens, &[U256::from(2)]));
    }

    #[test]
    fn test_verify_single_leaf() {
        let leaf = keccak256(b"leaf");
        assert!(verify(&[], leaf, leaf));
        assert!(!verify(&[], leaf, keccak256(b"other")));
    }

    #[test]
    fn test_verify_is_order_independent() {
        let a = keccak256(b"a");
        let b = keccak256(b"b");
        let root = hash_pair(&a, &b);
        assert_eq!(root, hash_pair(&b, &a));
        assert!(verify(&[b], root, a));
        assert!(verify(&[a], root, b));
    }

    #[test]
    fn test_verify_rejects_tampered_proof() {
        let a = keccak256(b"a");
        let b = keccak256(b"b");
        let c = keccak256(b"c");
        let ab = hash_pair(&a, &b);
        let root = hash_pair(&ab, &c);

        assert!(verify(&[b, c], root, a));

        let mut tampered = b;
        tampered.0[0] = tampered.0[0].wrapping_add(1);
        assert!(!verify(&[tampered, c], root, a));
        assert!(!verify(&[b], root, a));
    }
}
