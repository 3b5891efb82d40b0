//! Game Sessions
//!
//! Commit-reveal multiplayer betting sessions on Solana: Rock-Paper-Scissors,
//! Stag Hunt and the Pirate Game each run as a `Session` account governed by
//! the same escrow, phase and payout machinery, with per-family resolution
//! rules supplied by `session-core`.

use anchor_lang::prelude::*;

mod state;
mod instructions;
mod error;
mod hash;

use instructions::*;

declare_id!("3YRasYJTaBzG7XZ2PgnGtrVtafaopFBW7kEE8qNT4QgH");

#[cfg(not(feature = "no-idl"))]
solana_security_txt::security_txt! {
    name: "game-sessions",
    project_url: "https://github.com/example/game-sessions",
    contacts: "email:security@example.com",
    policy: "https://github.com/example/game-sessions/blob/main/SECURITY.md",
    source_code: "https://github.com/example/game-sessions"
}

#[program]
pub mod game_sessions {
    use super::*;

    /// Initialize the global config (one-time setup).
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        params: InitializeConfigParams,
    ) -> Result<()> {
        instructions::admin::initialize_config(ctx, params)
    }

    /// Update config parameters (admin only).
    pub fn update_config(ctx: Context<UpdateConfig>, params: UpdateConfigParams) -> Result<()> {
        instructions::admin::update_config(ctx, params)
    }

    /// Withdraw accumulated house fees (admin only).
    pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
        instructions::admin::withdraw_fees(ctx)
    }

    /// Initialize the process-wide Stag Hunt jackpot (one-time setup).
    pub fn initialize_jackpot(ctx: Context<InitializeJackpot>) -> Result<()> {
        instructions::admin::initialize_jackpot(ctx)
    }

    /// Create a Rock-Paper-Scissors, Stag Hunt or Pirate Game session.
    pub fn create_session(ctx: Context<CreateSession>, params: CreateSessionParams) -> Result<()> {
        instructions::session::create_session(ctx, params)
    }

    /// Join a Rock-Paper-Scissors or Stag Hunt session, staking the
    /// participation fee and submitting a round-0 commit hash.
    pub fn join(ctx: Context<JoinSession>, commit_hash: [u8; 32]) -> Result<()> {
        instructions::session::join(ctx, commit_hash)
    }

    /// Reveal a Rock-Paper-Scissors or Stag Hunt round-0 commitment.
    pub fn reveal(ctx: Context<RevealMove>, choice: u64, salt: [u8; 16]) -> Result<()> {
        instructions::commit_reveal::reveal(ctx, choice, salt)
    }

    /// Resolve a Rock-Paper-Scissors session once both players have revealed.
    pub fn resolve_rps(ctx: Context<ResolveRps>) -> Result<()> {
        instructions::rps::resolve_rps(ctx)
    }

    /// Finalize a Rock-Paper-Scissors session after the reveal window
    /// closes without both players revealing.
    pub fn claim_timeout_victory(ctx: Context<ResolveRps>) -> Result<()> {
        instructions::rps::claim_timeout_victory(ctx)
    }

    /// Resolve a Stag Hunt session: tally stags vs hares against the
    /// threshold and pay into or out of the shared jackpot.
    pub fn resolve_session(ctx: Context<ResolveStagSession>) -> Result<()> {
        instructions::stag::resolve_session(ctx)
    }

    /// Retune a Stag Hunt session's hare-refund/threshold percentages
    /// before resolution (creator only).
    pub fn update_game_rules(
        ctx: Context<UpdateGameRules>,
        hare_refund_pct: Option<u8>,
        stag_threshold_pct: Option<u8>,
    ) -> Result<()> {
        instructions::stag::update_game_rules(ctx, hare_refund_pct, stag_threshold_pct)
    }

    /// Register for a Pirate Game session during its registration window.
    pub fn register_pirate(ctx: Context<RegisterPirate>) -> Result<()> {
        instructions::pirate::register_pirate(ctx)
    }

    /// Refund every registered pirate when a session never reaches the
    /// minimum crew size.
    pub fn registration_timeout(ctx: Context<PirateRegistrationTimeout>) -> Result<()> {
        instructions::pirate::registration_timeout(ctx)
    }

    /// Submit the current proposer's distribution for this round.
    pub fn propose_distribution(ctx: Context<ProposeDistribution>, distribution: Vec<u64>) -> Result<()> {
        instructions::pirate::propose_distribution(ctx, distribution)
    }

    /// Commit a yes/no vote hash on the current round's proposal.
    pub fn commit_vote(ctx: Context<CommitVote>, round: u32, hash: [u8; 32]) -> Result<()> {
        instructions::pirate::commit_vote(ctx, round, hash)
    }

    /// Open the vote-reveal window once the commit window has closed.
    pub fn open_vote_reveal(ctx: Context<ExecuteRound>) -> Result<()> {
        instructions::pirate::open_vote_reveal(ctx)
    }

    /// Reveal a committed vote.
    pub fn reveal_vote(ctx: Context<RevealVote>, round: u32, vote: u64, salt: [u8; 16]) -> Result<()> {
        instructions::pirate::reveal_vote(ctx, round, vote, salt)
    }

    /// Tally the current round once its reveal window has closed: either
    /// the proposal passes and the session finishes, or the proposer is
    /// eliminated and the next round begins.
    pub fn execute_round(ctx: Context<ExecuteRound>) -> Result<()> {
        instructions::pirate::execute_round(ctx)
    }

    /// Eliminate a proposer who lets their proposal window lapse without
    /// ever submitting a distribution, the same way a failed vote would.
    pub fn proposal_timeout(ctx: Context<ExecuteRound>) -> Result<()> {
        instructions::pirate::proposal_timeout(ctx)
    }

    /// Claim an entitlement from a finished session (any game family).
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::claim(ctx)
    }

    /// Reclaim rent from a finished session once its claim window has
    /// expired (admin only).
    pub fn close_session(ctx: Context<CloseSession>) -> Result<()> {
        instructions::session::close_session(ctx)
    }
}
