//! Stag Hunt resolution and per-session rule overrides

use anchor_lang::prelude::*;
use crate::state::{Config, GameFamily, GameState, GlobalJackpot, Phase, Session};
use crate::error::SessionError;

#[derive(Accounts)]
pub struct ResolveStagSession<'info> {
    #[account(mut, seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump
    )]
    pub session: Account<'info, Session>,

    #[account(mut, seeds = [b"jackpot"], bump = jackpot.bump)]
    pub jackpot: Account<'info, GlobalJackpot>,
}

/// Idempotent once `Finished`: a second call is rejected by the
/// `AlreadyFinished` check before it can touch the jackpot twice.
pub fn resolve_session(ctx: Context<ResolveStagSession>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;
    let jackpot = &mut ctx.accounts.jackpot;
    let config = &mut ctx.accounts.config;

    require!(session.game == GameFamily::Stag, SessionError::PhaseViolation);
    require!(session.phase != Phase::Finished, SessionError::AlreadyFinished);
    require!(
        session_core::resolvable(r, session.end_reveal_at),
        SessionError::PhaseViolation
    );

    let stag_state = match &session.game_state {
        GameState::Stag(s) => s.clone(),
        _ => return err!(SessionError::PhaseViolation),
    };

    let house_fee = ((session.balance as u128) * (config.house_fee_bps as u128) / 10_000) as u64;
    let net_balance = session.balance.checked_sub(house_fee).ok_or(SessionError::Overflow)?;

    let res = session_core::resolve_stag(
        stag_state.stags as u64,
        stag_state.hares as u64,
        net_balance,
        session.participation_fee,
        stag_state.hare_refund_pct,
        stag_state.stag_threshold_pct,
        jackpot.balance,
    )
    .map_err(SessionError::from)?;

    config.accumulated_fees = config
        .accumulated_fees
        .checked_add(house_fee)
        .ok_or(SessionError::Overflow)?;
    jackpot.balance = res.new_jackpot;
    session.balance = net_balance;
    if house_fee > 0 {
        **session.to_account_info().try_borrow_mut_lamports()? -= house_fee;
        **config.to_account_info().try_borrow_mut_lamports()? += house_fee;
    }

    if let GameState::Stag(s) = &mut session.game_state {
        s.resolved = true;
        s.successful = res.successful;
        s.reward_per_stag = res.reward_per_stag;
        s.hare_refund_unit = res.hare_refund_unit;
    }
    session.phase = Phase::Finished;
    session.finished_at_slot = r;

    msg!(
        "Stag session {} resolved: successful={}, reward_per_stag={}",
        session.session_id,
        res.successful,
        res.reward_per_stag
    );
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateGameRules<'info> {
    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump,
        has_one = creator @ SessionError::Unauthorized
    )]
    pub session: Account<'info, Session>,

    pub creator: Signer<'info>,
}

/// Lets the creator retune the hare-refund/stag-threshold percentages
/// before resolution; sessions are created with `Config`'s defaults but
/// a creator may want a different split for their own session.
pub fn update_game_rules(
    ctx: Context<UpdateGameRules>,
    hare_refund_pct: Option<u8>,
    stag_threshold_pct: Option<u8>,
) -> Result<()> {
    let session = &mut ctx.accounts.session;
    require!(session.game == GameFamily::Stag, SessionError::PhaseViolation);
    require!(session.phase != Phase::Finished, SessionError::AlreadyFinished);

    if let GameState::Stag(state) = &mut session.game_state {
        if let Some(pct) = hare_refund_pct {
            require!(pct <= 100, SessionError::Overflow);
            state.hare_refund_pct = pct;
        }
        if let Some(pct) = stag_threshold_pct {
            require!(pct <= 100, SessionError::Overflow);
            state.stag_threshold_pct = pct;
        }
    }

    msg!("Session {} game rules updated", session.session_id);
    Ok(())
}
