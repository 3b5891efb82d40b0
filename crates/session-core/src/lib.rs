//! Session Core
//!
//! Pure game logic for the commit-reveal session engine shared by the
//! Rock-Paper-Scissors, Stag Hunt and Pirate Game rule families.
//! This crate holds no Anchor/Solana types so it can be unit-tested without
//! a validator and reused by an off-chain simulator.

mod error;
mod types;
mod phase;
mod commit;
mod rps;
mod stag;
mod pirate;
mod payout;

pub use error::CoreError;
pub use types::{GameFamily, PlayerId};
pub use phase::{Phase, PirateRoundPhase, commit_phase, registration_phase, resolvable, reveal_phase};
pub use commit::{CommitState, check_commit, check_reveal};
pub use rps::{
    RpsOutcome, outcome as rps_outcome, split as rps_split, validate_choice as rps_valid_choice,
};
pub use stag::{
    StagResolution, resolve as resolve_stag, validate_choice as stag_valid_choice,
};
pub use pirate::{
    lone_survivor_distribution, next_alive_proposer, pass_threshold, validate_distribution,
    validate_vote as pirate_valid_vote,
};
pub use payout::claim;
