//! Pull-based payout

use anchor_lang::prelude::*;
use crate::state::{CommitRecord, GameState, Phase, Session, CLAIM_EXPIRY_SLOTS};
use crate::error::SessionError;

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump
    )]
    pub session: Account<'info, Session>,

    /// Only consulted for Stag Hunt, to learn whether the claimant revealed
    /// stag or hare; pass `None` for RPS/Pirate.
    pub commit_record: Option<Account<'info, CommitRecord>>,

    #[account(mut)]
    pub player: Signer<'info>,
}

fn stag_entitlement(
    resolved: bool,
    successful: bool,
    reward_per_stag: u64,
    hare_refund_unit: u64,
    commit_record: Option<&Account<CommitRecord>>,
    claimant: &Pubkey,
) -> Result<Option<u64>> {
    if !resolved {
        return Ok(None);
    }
    let commit_record = commit_record.ok_or(SessionError::NotClaimant)?;
    require!(&commit_record.player == claimant, SessionError::NotClaimant);

    Ok(Some(match commit_record.revealed_choice {
        Some(0) if successful => reward_per_stag,
        Some(1) => hare_refund_unit,
        _ => 0,
    }))
}

pub fn claim(ctx: Context<Claim>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;
    let player = ctx.accounts.player.key();

    require!(session.phase == Phase::Finished, SessionError::PhaseViolation);
    require!(
        r < session
            .finished_at_slot
            .checked_add(CLAIM_EXPIRY_SLOTS)
            .ok_or(SessionError::Overflow)?,
        SessionError::ClaimExpired
    );

    let idx = session
        .players
        .iter()
        .position(|p| p == &player)
        .ok_or(SessionError::NotClaimant)?;
    let already_claimed = session.claimed[idx];

    let entitlement = match &session.game_state {
        GameState::Rps(state) => Some(state.entitlement[idx]),
        GameState::Pirate(state) => state.distribution.get(idx).copied(),
        GameState::Stag(state) => stag_entitlement(
            state.resolved,
            state.successful,
            state.reward_per_stag,
            state.hare_refund_unit,
            ctx.accounts.commit_record.as_ref(),
            &player,
        )?,
    };

    let amount = session_core::claim(entitlement, already_claimed).map_err(SessionError::from)?;

    session.claimed[idx] = true;
    if amount > 0 {
        session.balance = session
            .balance
            .checked_sub(amount)
            .ok_or(SessionError::Overflow)?;
        **session.to_account_info().try_borrow_mut_lamports()? -= amount;
        **ctx.accounts.player.try_borrow_mut_lamports()? += amount;
    }

    msg!(
        "Player {} claimed {} from session {}",
        player,
        amount,
        session.session_id
    );
    Ok(())
}
