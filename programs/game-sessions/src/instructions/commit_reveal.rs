//! Shared round-0 reveal for Rock-Paper-Scissors and Stag Hunt

use anchor_lang::prelude::*;
use crate::state::{CommitRecord, Config, GameFamily, GameState, Phase, Session};
use crate::error::SessionError;
use crate::hash::hash_choice;

#[derive(Accounts)]
pub struct RevealMove<'info> {
    #[account(mut, seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump
    )]
    pub session: Account<'info, Session>,

    #[account(
        mut,
        seeds = [b"commit", session.key().as_ref(), 0u32.to_le_bytes().as_ref(), player.key().as_ref()],
        bump = commit_record.bump,
        has_one = player
    )]
    pub commit_record: Account<'info, CommitRecord>,

    pub player: Signer<'info>,
}

pub fn reveal(ctx: Context<RevealMove>, choice: u64, salt: [u8; 16]) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;
    let commit_record = &mut ctx.accounts.commit_record;

    require!(session.phase != Phase::Finished, SessionError::AlreadyFinished);
    require!(
        matches!(session.game, GameFamily::Rps | GameFamily::Stag),
        SessionError::PhaseViolation
    );

    let phase_ok = session_core::reveal_phase(r, session.end_commit_at, session.end_reveal_at);
    let state = session_core::CommitState {
        has_commit: true,
        revealed: commit_record.revealed_choice.is_some(),
    };
    let hash_matches = hash_choice(choice, &salt) == commit_record.hash;

    session_core::check_reveal(phase_ok, state, hash_matches).map_err(SessionError::from)?;

    let domain_ok = match session.game {
        GameFamily::Rps => session_core::rps_valid_choice(choice),
        GameFamily::Stag => session_core::stag_valid_choice(choice),
        GameFamily::Pirate => false,
    };
    require!(domain_ok, SessionError::InvalidChoice);

    commit_record.revealed_choice = Some(choice);

    if let GameState::Stag(stag_state) = &mut session.game_state {
        if choice == 0 {
            stag_state.stags = stag_state.stags.checked_add(1).ok_or(SessionError::Overflow)?;
        } else {
            stag_state.hares = stag_state.hares.checked_add(1).ok_or(SessionError::Overflow)?;
        }
    }

    // A lone RPS joiner has no opponent who can ever reveal; resolve right
    // away instead of waiting on a reveal window nobody else can complete,
    // which would otherwise trap their stake behind `Phase::Finished`.
    if session.game == GameFamily::Rps && session.players.len() == 1 {
        let config = &mut ctx.accounts.config;
        let fee = ((session.balance as u128) * (config.house_fee_bps as u128) / 10_000) as u64;
        let net = session.balance.checked_sub(fee).ok_or(SessionError::Overflow)?;
        config.accumulated_fees = config
            .accumulated_fees
            .checked_add(fee)
            .ok_or(SessionError::Overflow)?;
        session.balance = net;
        if fee > 0 {
            **session.to_account_info().try_borrow_mut_lamports()? -= fee;
            **config.to_account_info().try_borrow_mut_lamports()? += fee;
        }
        if let GameState::Rps(state) = &mut session.game_state {
            state.entitlement = [net, 0];
        }
        session.phase = Phase::Finished;
        session.finished_at_slot = r;
        msg!(
            "RPS session {} resolved: lone joiner claims the full pot",
            session.session_id
        );
        return Ok(());
    }

    msg!(
        "Player {} revealed choice {} in session {}",
        ctx.accounts.player.key(),
        choice,
        session.session_id
    );
    Ok(())
}
