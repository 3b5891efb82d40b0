//! Commitment hashing
//!
//! Fixes the preimage layout for every `H(choice ‖ salt)` commitment in the
//! program, the same way a tournament program fixes its own strategy-reveal
//! preimage.

/// `H(choice ‖ salt)` for a generic u64 choice (RPS move, Stag choice,
/// Pirate vote).
pub fn hash_choice(choice: u64, salt: &[u8; 16]) -> [u8; 32] {
    let mut preimage = Vec::with_capacity(8 + 16);
    preimage.extend_from_slice(&choice.to_le_bytes());
    preimage.extend_from_slice(salt);
    solana_sha256_hasher::hash(&preimage).to_bytes()
}
