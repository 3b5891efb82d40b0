//! Rock-Paper-Scissors resolution

use anchor_lang::prelude::*;
use crate::state::{CommitRecord, Config, GameFamily, GameState, Phase, Session};
use crate::error::SessionError;

#[derive(Accounts)]
pub struct ResolveRps<'info> {
    #[account(mut, seeds = [b"config"], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump
    )]
    pub session: Account<'info, Session>,

    #[account(
        seeds = [b"commit", session.key().as_ref(), 0u32.to_le_bytes().as_ref(), session.players[0].as_ref()],
        bump = commit_p1.bump
    )]
    pub commit_p1: Account<'info, CommitRecord>,

    /// Absent for a one-player session; a lone joiner has no opponent
    /// commit record to resolve against. Not PDA-constrained here since
    /// `session.players[1]` doesn't exist in that case — checked by hand
    /// in the handler instead.
    pub commit_p2: Option<Account<'info, CommitRecord>>,
}

fn verify_commit_p2(session: &Account<Session>, commit_p2: &CommitRecord) -> Result<()> {
    require!(commit_p2.session == session.key(), SessionError::NotClaimant);
    require!(
        commit_p2.player == session.players[1],
        SessionError::NotClaimant
    );
    require!(commit_p2.round == 0, SessionError::NotClaimant);
    Ok(())
}

fn entitlement_for(
    c1: Option<u64>,
    c2: Option<u64>,
    pot_after_fee: u64,
) -> [u64; 2] {
    match (c1, c2) {
        (Some(a), Some(b)) => match session_core::rps_outcome(a, b) {
            session_core::RpsOutcome::P1Wins => [pot_after_fee, 0],
            session_core::RpsOutcome::P2Wins => [0, pot_after_fee],
            session_core::RpsOutcome::Draw => {
                let (x, y) = session_core::rps_split(pot_after_fee);
                [x, y]
            }
        },
        (Some(_), None) => [pot_after_fee, 0],
        (None, Some(_)) => [0, pot_after_fee],
        (None, None) => {
            let (x, y) = session_core::rps_split(pot_after_fee);
            [x, y]
        }
    }
}

fn finalize(session: &mut Session, entitlement: [u64; 2], r: u64) {
    if let GameState::Rps(state) = &mut session.game_state {
        state.entitlement = entitlement;
    }
    session.phase = Phase::Finished;
    session.finished_at_slot = r;
}

fn house_fee_and_net(balance: u64, house_fee_bps: u16) -> Result<(u64, u64)> {
    let fee = ((balance as u128) * (house_fee_bps as u128) / 10_000) as u64;
    let net = balance.checked_sub(fee).ok_or(SessionError::Overflow)?;
    Ok((fee, net))
}

/// Moves the fee lamports actually taken out of the session PDA into the
/// config PDA, so `withdraw_fees` has real lamports to pay out rather than
/// just the bookkeeping total in `accumulated_fees`.
fn sweep_fee(session: &AccountInfo, config: &AccountInfo, fee: u64) -> Result<()> {
    if fee > 0 {
        **session.try_borrow_mut_lamports()? -= fee;
        **config.try_borrow_mut_lamports()? += fee;
    }
    Ok(())
}

/// Resolve an Rock-Paper-Scissors session once the revealer(s) are in. A
/// one-player session resolves as soon as the lone joiner reveals (see
/// `instructions::commit_reveal::reveal`); this path covers the normal
/// two-player case.
pub fn resolve_rps(ctx: Context<ResolveRps>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;
    let config = &mut ctx.accounts.config;

    require!(session.game == GameFamily::Rps, SessionError::PhaseViolation);
    require!(session.phase != Phase::Finished, SessionError::AlreadyFinished);
    require!(session.players.len() == 2, SessionError::PhaseViolation);

    let commit_p2 = ctx.accounts.commit_p2.as_ref().ok_or(SessionError::NoCommit)?;
    verify_commit_p2(session, commit_p2)?;

    let c1 = ctx.accounts.commit_p1.revealed_choice;
    let c2 = commit_p2.revealed_choice;
    require!(c1.is_some() && c2.is_some(), SessionError::NoCommit);

    let (fee, net) = house_fee_and_net(session.balance, config.house_fee_bps)?;
    config.accumulated_fees = config
        .accumulated_fees
        .checked_add(fee)
        .ok_or(SessionError::Overflow)?;
    session.balance = net;
    sweep_fee(
        &session.to_account_info(),
        &config.to_account_info(),
        fee,
    )?;

    let entitlement = entitlement_for(c1, c2, net);
    finalize(session, entitlement, r);

    msg!("RPS session {} resolved: {:?}", session.session_id, entitlement);
    Ok(())
}

/// Finalize a Rock-Paper-Scissors session after the reveal window has
/// closed without both players revealing: one reveal wins the full pot, no
/// reveals split evenly. A one-player session always lands in the "one
/// reveal or none" branch below, so a would-be opponent who never joined
/// can never trap the lone joiner's stake.
pub fn claim_timeout_victory(ctx: Context<ResolveRps>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;
    let config = &mut ctx.accounts.config;

    require!(session.game == GameFamily::Rps, SessionError::PhaseViolation);
    require!(session.phase != Phase::Finished, SessionError::AlreadyFinished);
    require!(!session.players.is_empty(), SessionError::NoCommit);
    require!(
        session_core::resolvable(r, session.end_reveal_at),
        SessionError::PhaseViolation
    );

    let c1 = ctx.accounts.commit_p1.revealed_choice;
    let c2 = match ctx.accounts.commit_p2.as_ref() {
        Some(commit_p2) => {
            verify_commit_p2(session, commit_p2)?;
            commit_p2.revealed_choice
        }
        None => {
            require!(session.players.len() == 1, SessionError::NoCommit);
            None
        }
    };

    let (fee, net) = house_fee_and_net(session.balance, config.house_fee_bps)?;
    config.accumulated_fees = config
        .accumulated_fees
        .checked_add(fee)
        .ok_or(SessionError::Overflow)?;
    session.balance = net;
    sweep_fee(
        &session.to_account_info(),
        &config.to_account_info(),
        fee,
    )?;

    let entitlement = if session.players.len() == 1 {
        [net, 0]
    } else {
        entitlement_for(c1, c2, net)
    };
    finalize(session, entitlement, r);

    msg!("RPS session {} finalized at timeout", session.session_id);
    Ok(())
}
