//! Custom error codes
//!
//! Variants mirror the error kinds enumerated in the protocol's error
//! taxonomy. `From<session_core::CoreError>` maps the pure-logic crate's
//! errors onto this Anchor-facing set.

use anchor_lang::prelude::*;
use session_core::CoreError;

#[error_code]
pub enum SessionError {
    #[msg("No session exists with this ID")]
    SessionNotFound = 6000,

    #[msg("Operation not admissible in the session's current phase")]
    PhaseViolation = 6001,

    #[msg("Caller has already joined this session")]
    AlreadyJoined = 6002,

    #[msg("Session has reached its player capacity")]
    CapacityFull = 6003,

    #[msg("Payment did not match the required amount exactly")]
    PaymentMismatch = 6004,

    #[msg("Choice is outside the game's valid domain")]
    InvalidChoice = 6005,

    #[msg("Revealed value does not hash to the stored commitment")]
    InvalidReveal = 6006,

    #[msg("No commit exists for this key")]
    NoCommit = 6007,

    #[msg("A commit already exists for this key")]
    AlreadyCommitted = 6008,

    #[msg("Caller is not the current proposer")]
    NotProposer = 6009,

    #[msg("Proposed distribution does not sum to the pot")]
    DistributionMismatch = 6010,

    #[msg("Pirate is not alive")]
    NotAlive = 6011,

    #[msg("Session is already finished")]
    AlreadyFinished = 6012,

    #[msg("Entitlement already claimed")]
    AlreadyClaimed = 6013,

    #[msg("Caller has no entitlement for this session")]
    NotClaimant = 6014,

    #[msg("Not authorized to perform this action")]
    Unauthorized = 6015,

    #[msg("Computed state violates a solvency invariant")]
    InsolvencyBug = 6016,

    #[msg("Arithmetic overflow")]
    Overflow = 6017,

    #[msg("Deadlines must be strictly increasing")]
    InvalidDeadlines = 6018,

    #[msg("Claim period has expired")]
    ClaimExpired = 6019,

    #[msg("Session still has open entries or unclaimed entitlements")]
    EntriesRemaining = 6020,

    #[msg("The current proposer's own yes vote is already counted")]
    ProposerCannotVote = 6021,
}

impl From<CoreError> for SessionError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::PhaseViolation => SessionError::PhaseViolation,
            CoreError::AlreadyCommitted => SessionError::AlreadyCommitted,
            CoreError::NoCommit => SessionError::NoCommit,
            CoreError::InvalidReveal => SessionError::InvalidReveal,
            CoreError::InvalidChoice => SessionError::InvalidChoice,
            CoreError::DistributionMismatch => SessionError::DistributionMismatch,
            CoreError::NotAlive => SessionError::NotAlive,
            CoreError::AlreadyFinished => SessionError::AlreadyFinished,
            CoreError::AlreadyClaimed => SessionError::AlreadyClaimed,
            CoreError::NotClaimant => SessionError::NotClaimant,
            CoreError::Overflow => SessionError::Overflow,
            CoreError::InsolvencyBug => SessionError::InsolvencyBug,
        }
    }
}
