//! Session creation and joining

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use crate::state::{
    CommitRecord, Config, GameFamily, GameState, Phase, PirateState, RpsState, Session, StagState,
    CLAIM_EXPIRY_SLOTS, MAX_PIRATES, MIN_PIRATES,
};
use crate::error::SessionError;

/// Stag Hunt has no fixed capacity range; 2..=50 is this protocol's choice
/// (see DESIGN.md).
pub const MIN_STAG_PLAYERS: u16 = 2;
pub const MAX_STAG_PLAYERS: u16 = 50;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateSessionParams {
    pub game: GameFamily,
    pub participation_fee: u64,
    pub start_at: u64,
    pub end_commit_at: u64,
    pub end_reveal_at: u64,
    /// Ignored for RPS (always 2). Roster capacity for Stag. Pirate
    /// capacity (3..=20); Pirate's actual `total_pirates` is finalized at
    /// the first proposal, not at creation.
    pub max_players: u16,
    /// Stag only; defaults to `Config::default_hare_refund_pct`.
    pub hare_refund_pct: Option<u8>,
    /// Stag only; defaults to `Config::default_stag_threshold_pct`.
    pub stag_threshold_pct: Option<u8>,
    /// Pirate only; duration in slots of each round's commit/reveal window.
    pub commit_duration: Option<u64>,
    pub reveal_duration: Option<u64>,
}

#[derive(Accounts)]
#[instruction(params: CreateSessionParams)]
pub struct CreateSession<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = creator,
        space = Session::space(effective_capacity(&params), params.game),
        seeds = [b"session", config.next_session_id.to_le_bytes().as_ref()],
        bump
    )]
    pub session: Account<'info, Session>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

fn effective_capacity(params: &CreateSessionParams) -> u16 {
    match params.game {
        GameFamily::Rps => 2,
        _ => params.max_players,
    }
}

pub fn create_session(ctx: Context<CreateSession>, params: CreateSessionParams) -> Result<()> {
    require!(
        params.start_at < params.end_commit_at && params.end_commit_at < params.end_reveal_at,
        SessionError::InvalidDeadlines
    );
    require!(params.participation_fee > 0, SessionError::PaymentMismatch);

    let max_players = effective_capacity(&params);
    match params.game {
        GameFamily::Rps => {}
        GameFamily::Stag => require!(
            (MIN_STAG_PLAYERS..=MAX_STAG_PLAYERS).contains(&max_players),
            SessionError::CapacityFull
        ),
        GameFamily::Pirate => require!(
            (MIN_PIRATES..=MAX_PIRATES).contains(&max_players),
            SessionError::CapacityFull
        ),
    }

    let config = &mut ctx.accounts.config;
    let session = &mut ctx.accounts.session;

    session.session_id = config.next_session_id;
    session.game = params.game;
    session.creator = ctx.accounts.creator.key();
    session.participation_fee = params.participation_fee;
    session.start_at = params.start_at;
    session.end_commit_at = params.end_commit_at;
    session.end_reveal_at = params.end_reveal_at;
    session.balance = 0;
    session.phase = Phase::Registration;
    session.max_players = max_players;
    session.players = Vec::new();
    session.claimed = Vec::new();
    session.bump = ctx.bumps.session;

    session.game_state = match params.game {
        GameFamily::Rps => GameState::Rps(RpsState::default()),
        GameFamily::Stag => GameState::Stag(StagState {
            stags: 0,
            hares: 0,
            resolved: false,
            successful: false,
            reward_per_stag: 0,
            hare_refund_unit: 0,
            hare_refund_pct: params.hare_refund_pct.unwrap_or(config.default_hare_refund_pct),
            stag_threshold_pct: params
                .stag_threshold_pct
                .unwrap_or(config.default_stag_threshold_pct),
        }),
        GameFamily::Pirate => {
            let commit_duration = params
                .commit_duration
                .unwrap_or(params.end_commit_at - params.start_at);
            let reveal_duration = params
                .reveal_duration
                .unwrap_or(params.end_reveal_at - params.end_commit_at);
            GameState::Pirate(PirateState {
                round_phase: crate::state::PirateRoundPhase::Proposal,
                current_round: 0,
                total_pirates: 0,
                alive_count: 0,
                current_proposer_index: 0,
                commit_duration,
                reveal_duration,
                round_propose_deadline: params
                    .start_at
                    .checked_add(commit_duration)
                    .ok_or(SessionError::Overflow)?,
                round_commit_deadline: 0,
                round_reveal_deadline: 0,
                alive: Vec::new(),
                distribution: Vec::new(),
                votes_for: 0,
                votes_against: 0,
            })
        }
    };

    config.next_session_id = config
        .next_session_id
        .checked_add(1)
        .ok_or(SessionError::Overflow)?;

    msg!(
        "Session {} created ({:?}), fee={}, start_at={}",
        session.session_id,
        session.game,
        session.participation_fee,
        session.start_at
    );
    Ok(())
}

/// Join a RPS or Stag Hunt session: stake + the player's round-0 commit
/// hash arrive together.
#[derive(Accounts)]
pub struct JoinSession<'info> {
    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump,
        realloc = session.space_for_next_player(),
        realloc::payer = player,
        realloc::zero = false
    )]
    pub session: Account<'info, Session>,

    #[account(
        init,
        payer = player,
        space = CommitRecord::LEN,
        seeds = [b"commit", session.key().as_ref(), 0u32.to_le_bytes().as_ref(), player.key().as_ref()],
        bump
    )]
    pub commit_record: Account<'info, CommitRecord>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn join(ctx: Context<JoinSession>, commit_hash: [u8; 32]) -> Result<()> {
    let session = &mut ctx.accounts.session;
    let player = &ctx.accounts.player;
    let r = Clock::get()?.slot;

    require!(
        matches!(session.game, GameFamily::Rps | GameFamily::Stag),
        SessionError::PhaseViolation
    );
    require!(session.phase != Phase::Finished, SessionError::AlreadyFinished);
    require!(
        session_core::registration_phase(r, session.start_at),
        SessionError::PhaseViolation
    );
    require!(
        !session.players.contains(&player.key()),
        SessionError::AlreadyJoined
    );
    require!(
        session.players.len() < session.max_players as usize,
        SessionError::CapacityFull
    );

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: player.to_account_info(),
                to: session.to_account_info(),
            },
        ),
        session.participation_fee,
    )?;

    let commit_record = &mut ctx.accounts.commit_record;
    commit_record.session = session.key();
    commit_record.player = player.key();
    commit_record.round = 0;
    commit_record.hash = commit_hash;
    commit_record.revealed_choice = None;
    commit_record.bump = ctx.bumps.commit_record;

    session.players.push(player.key());
    session.claimed.push(false);
    session.balance = session
        .balance
        .checked_add(session.participation_fee)
        .ok_or(SessionError::Overflow)?;

    msg!(
        "Player {} joined session {} at index {}",
        player.key(),
        session.session_id,
        session.players.len() - 1
    );
    Ok(())
}

/// Reclaim rent from a finished session once its claim window has expired
/// (supplemented feature, see DESIGN.md). Whatever lamports remain —
/// unclaimed stakes plus the account's rent-exempt minimum — flow to the
/// admin via the `close` constraint.
#[derive(Accounts)]
pub struct CloseSession<'info> {
    #[account(seeds = [b"config"], bump = config.bump, has_one = admin @ SessionError::Unauthorized)]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump,
        close = admin
    )]
    pub session: Account<'info, Session>,

    #[account(mut)]
    pub admin: Signer<'info>,
}

pub fn close_session(ctx: Context<CloseSession>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &ctx.accounts.session;

    require!(session.phase == Phase::Finished, SessionError::PhaseViolation);
    require!(
        r >= session
            .finished_at_slot
            .checked_add(CLAIM_EXPIRY_SLOTS)
            .ok_or(SessionError::Overflow)?,
        SessionError::PhaseViolation
    );

    let unclaimed = session.claimed.iter().filter(|c| !**c).count();
    msg!(
        "Session {} closed, {} unclaimed slots swept to admin",
        session.session_id,
        unclaimed
    );
    Ok(())
}
