//! Commit-reveal key policy
//!
//! The key is `(session, round, player)`. RPS and Stag Hunt pin `round = 0`;
//! Pirate uses the current elimination round, so a single player legitimately
//! holds multiple independent commit records across rounds. `H` itself (the
//! collision-resistant hash) is a host primitive — this module only encodes
//! the admissibility and ordering rules around it, so the program layer
//! supplies `hash_matches` already computed.

use crate::error::CoreError;

/// Snapshot of what is already on record for a `(session, round, player)`
/// key, as seen by the caller before attempting a commit or reveal.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommitState {
    pub has_commit: bool,
    pub revealed: bool,
}

/// Validate a `commit(session, round, player, hash)` call.
pub fn check_commit(phase_ok: bool, state: CommitState) -> Result<(), CoreError> {
    if !phase_ok {
        return Err(CoreError::PhaseViolation);
    }
    if state.has_commit {
        return Err(CoreError::AlreadyCommitted);
    }
    Ok(())
}

/// Validate a `reveal(session, round, player, choice, salt)` call.
///
/// Ordering matches spec: phase first, then whether a commit exists at all,
/// then whether it has already been consumed, then the hash itself.
pub fn check_reveal(
    phase_ok: bool,
    state: CommitState,
    hash_matches: bool,
) -> Result<(), CoreError> {
    if !phase_ok {
        return Err(CoreError::PhaseViolation);
    }
    if !state.has_commit {
        return Err(CoreError::NoCommit);
    }
    // A second reveal attempt finds a commit record with nothing left to
    // reveal against — treated as NoCommit rather than a distinct
    // "AlreadyRevealed" kind (see DESIGN.md).
    if state.revealed {
        return Err(CoreError::NoCommit);
    }
    if !hash_matches {
        return Err(CoreError::InvalidReveal);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_commit_is_rejected() {
        let state = CommitState { has_commit: true, revealed: false };
        assert_eq!(check_commit(true, state), Err(CoreError::AlreadyCommitted));
    }

    #[test]
    fn reveal_without_commit_is_rejected() {
        let state = CommitState::default();
        assert_eq!(check_reveal(true, state, true), Err(CoreError::NoCommit));
    }

    #[test]
    fn reveal_with_mismatched_hash_is_rejected() {
        let state = CommitState { has_commit: true, revealed: false };
        assert_eq!(check_reveal(true, state, false), Err(CoreError::InvalidReveal));
    }

    #[test]
    fn reveal_outside_phase_is_rejected_before_hash_check() {
        let state = CommitState { has_commit: true, revealed: false };
        assert_eq!(check_reveal(false, state, false), Err(CoreError::PhaseViolation));
    }

    #[test]
    fn valid_reveal_succeeds() {
        let state = CommitState { has_commit: true, revealed: false };
        assert_eq!(check_reveal(true, state, true), Ok(()));
    }

    #[test]
    fn double_reveal_is_rejected() {
        let state = CommitState { has_commit: true, revealed: true };
        assert_eq!(check_reveal(true, state, true), Err(CoreError::NoCommit));
    }
}
