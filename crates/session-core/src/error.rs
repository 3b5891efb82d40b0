//! Pure-logic error taxonomy
//!
//! The Anchor program maps each of these onto its own `#[error_code]`
//! variant (see `programs/game-sessions/src/error.rs`); this crate never
//! depends on Anchor so it can be unit-tested in isolation.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    #[error("operation not admissible in the current phase")]
    PhaseViolation,
    #[error("a commit already exists for this key")]
    AlreadyCommitted,
    #[error("no commit exists for this key")]
    NoCommit,
    #[error("revealed value does not hash to the stored commitment")]
    InvalidReveal,
    #[error("choice is outside the game's valid domain")]
    InvalidChoice,
    #[error("distribution does not sum to the pot")]
    DistributionMismatch,
    #[error("pirate is not alive")]
    NotAlive,
    #[error("session is already finished")]
    AlreadyFinished,
    #[error("entitlement already claimed")]
    AlreadyClaimed,
    #[error("caller has no entitlement for this session")]
    NotClaimant,
    #[error("arithmetic overflow")]
    Overflow,
    #[error("balance insufficient to cover computed entitlements")]
    InsolvencyBug,
}
