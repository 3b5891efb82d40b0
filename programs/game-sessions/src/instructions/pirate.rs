//! Pirate Game: registration, proposal/vote rounds and elimination

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use crate::state::{
    CommitRecord, GameFamily, GameState, Phase, PirateRoundPhase, Session, MIN_PIRATES,
};
use crate::error::SessionError;
use crate::hash::hash_choice;

#[derive(Accounts)]
pub struct RegisterPirate<'info> {
    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump,
        realloc = session.space_for_next_player(),
        realloc::payer = player,
        realloc::zero = false
    )]
    pub session: Account<'info, Session>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn register_pirate(ctx: Context<RegisterPirate>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;
    let player = &ctx.accounts.player;

    require!(session.game == GameFamily::Pirate, SessionError::PhaseViolation);
    require!(session.phase == Phase::Registration, SessionError::PhaseViolation);
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

    session.players.push(player.key());
    session.claimed.push(false);
    session.balance = session
        .balance
        .checked_add(session.participation_fee)
        .ok_or(SessionError::Overflow)?;

    if let GameState::Pirate(state) = &mut session.game_state {
        state.total_pirates = state.total_pirates.checked_add(1).ok_or(SessionError::Overflow)?;
        state.alive_count = state.alive_count.checked_add(1).ok_or(SessionError::Overflow)?;
        state.alive.push(true);
        state.distribution.push(0);
    }

    msg!(
        "Pirate {} registered for session {} (seniority {})",
        player.key(),
        session.session_id,
        session.players.len() - 1
    );
    Ok(())
}

/// Below-minimum registration: refunds every registered pirate in full
/// instead of starting the proposal loop.
#[derive(Accounts)]
pub struct PirateRegistrationTimeout<'info> {
    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump
    )]
    pub session: Account<'info, Session>,
}

pub fn registration_timeout(ctx: Context<PirateRegistrationTimeout>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;

    require!(session.game == GameFamily::Pirate, SessionError::PhaseViolation);
    require!(session.phase == Phase::Registration, SessionError::PhaseViolation);
    require!(r >= session.start_at, SessionError::PhaseViolation);
    require!(
        (session.players.len() as u16) < MIN_PIRATES,
        SessionError::EntriesRemaining
    );

    let refund = session.participation_fee;
    let refunds: Vec<u64> = session.players.iter().map(|_| refund).collect();

    session.phase = Phase::Finished;
    session.finished_at_slot = r;
    if let GameState::Pirate(state) = &mut session.game_state {
        state.distribution = refunds;
    }

    msg!(
        "Pirate session {} cancelled below minimum, refunding {} pirates",
        session.session_id,
        session.players.len()
    );
    Ok(())
}

#[derive(Accounts)]
pub struct ProposeDistribution<'info> {
    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump
    )]
    pub session: Account<'info, Session>,

    pub proposer: Signer<'info>,
}

pub fn propose_distribution(ctx: Context<ProposeDistribution>, distribution: Vec<u64>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;
    let proposer = ctx.accounts.proposer.key();
    let pot = session.balance;
    let player_count = session.players.len();

    require!(session.game == GameFamily::Pirate, SessionError::PhaseViolation);
    require!(session.phase != Phase::Finished, SessionError::AlreadyFinished);
    require!(distribution.len() == player_count, SessionError::DistributionMismatch);
    require!(
        session_core::validate_distribution(&distribution, pot),
        SessionError::DistributionMismatch
    );

    let idx = session
        .players
        .iter()
        .position(|p| p == &proposer)
        .ok_or(SessionError::NotAlive)?;

    let pirate_state = match &mut session.game_state {
        GameState::Pirate(s) => s,
        _ => return err!(SessionError::PhaseViolation),
    };

    require!(pirate_state.alive[idx], SessionError::NotAlive);
    require!(idx as u16 == pirate_state.current_proposer_index, SessionError::NotProposer);
    require!(
        pirate_state.round_phase == PirateRoundPhase::Proposal,
        SessionError::PhaseViolation
    );
    require!(r < pirate_state.round_propose_deadline, SessionError::PhaseViolation);

    pirate_state.distribution = distribution;
    pirate_state.round_phase = PirateRoundPhase::VoteCommit;
    pirate_state.round_commit_deadline = r
        .checked_add(pirate_state.commit_duration)
        .ok_or(SessionError::Overflow)?;
    // the proposer is assumed to vote for their own proposal.
    pirate_state.votes_for = 1;
    pirate_state.votes_against = 0;

    msg!(
        "Pirate {} proposed a distribution for round {}",
        proposer,
        pirate_state.current_round
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(round: u32, hash: [u8; 32])]
pub struct CommitVote<'info> {
    #[account(
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump
    )]
    pub session: Account<'info, Session>,

    #[account(
        init,
        payer = voter,
        space = CommitRecord::LEN,
        seeds = [b"commit", session.key().as_ref(), round.to_le_bytes().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub commit_record: Account<'info, CommitRecord>,

    #[account(mut)]
    pub voter: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn commit_vote(ctx: Context<CommitVote>, round: u32, hash: [u8; 32]) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &ctx.accounts.session;
    let voter = ctx.accounts.voter.key();

    require!(session.game == GameFamily::Pirate, SessionError::PhaseViolation);
    let idx = session
        .players
        .iter()
        .position(|p| p == &voter)
        .ok_or(SessionError::NotAlive)?;

    let pirate_state = match &session.game_state {
        GameState::Pirate(s) => s,
        _ => return err!(SessionError::PhaseViolation),
    };
    require!(pirate_state.alive[idx], SessionError::NotAlive);
    require!(
        idx as u16 != pirate_state.current_proposer_index,
        SessionError::ProposerCannotVote
    );
    require!(round == pirate_state.current_round, SessionError::PhaseViolation);
    require!(
        pirate_state.round_phase == PirateRoundPhase::VoteCommit,
        SessionError::PhaseViolation
    );
    require!(r < pirate_state.round_commit_deadline, SessionError::PhaseViolation);

    let commit_record = &mut ctx.accounts.commit_record;
    commit_record.session = session.key();
    commit_record.player = voter;
    commit_record.round = round;
    commit_record.hash = hash;
    commit_record.revealed_choice = None;
    commit_record.bump = ctx.bumps.commit_record;

    msg!("Pirate {} committed a vote for round {}", voter, round);
    Ok(())
}

#[derive(Accounts)]
#[instruction(round: u32)]
pub struct RevealVote<'info> {
    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump
    )]
    pub session: Account<'info, Session>,

    #[account(
        mut,
        seeds = [b"commit", session.key().as_ref(), round.to_le_bytes().as_ref(), voter.key().as_ref()],
        bump = commit_record.bump
    )]
    pub commit_record: Account<'info, CommitRecord>,

    pub voter: Signer<'info>,
}

pub fn reveal_vote(ctx: Context<RevealVote>, round: u32, vote: u64, salt: [u8; 16]) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;
    let commit_record = &mut ctx.accounts.commit_record;

    require!(session.game == GameFamily::Pirate, SessionError::PhaseViolation);

    let hash_matches = hash_choice(vote, &salt) == commit_record.hash;
    let state = session_core::CommitState {
        has_commit: true,
        revealed: commit_record.revealed_choice.is_some(),
    };

    let pirate_state = match &mut session.game_state {
        GameState::Pirate(s) => s,
        _ => return err!(SessionError::PhaseViolation),
    };
    require!(round == pirate_state.current_round, SessionError::PhaseViolation);
    require!(
        pirate_state.round_phase == PirateRoundPhase::VoteReveal,
        SessionError::PhaseViolation
    );
    require!(r < pirate_state.round_reveal_deadline, SessionError::PhaseViolation);
    require!(session_core::pirate_valid_vote(vote), SessionError::InvalidChoice);

    session_core::check_reveal(true, state, hash_matches).map_err(SessionError::from)?;

    commit_record.revealed_choice = Some(vote);
    if vote == 1 {
        pirate_state.votes_for = pirate_state.votes_for.checked_add(1).ok_or(SessionError::Overflow)?;
    } else {
        pirate_state.votes_against = pirate_state
            .votes_against
            .checked_add(1)
            .ok_or(SessionError::Overflow)?;
    }

    msg!("Pirate voted {} in round {}", vote, round);
    Ok(())
}

#[derive(Accounts)]
pub struct ExecuteRound<'info> {
    #[account(
        mut,
        seeds = [b"session", session.session_id.to_le_bytes().as_ref()],
        bump = session.bump
    )]
    pub session: Account<'info, Session>,
}

/// What happens to a round whose proposal never passes, whether because the
/// vote failed or because the proposer let their window lapse.
enum EliminationOutcome {
    Finished { survivor: u16 },
    Advanced { next_proposer: u16 },
}

/// Eliminates the current proposer and either finalizes on a lone survivor
/// or opens the next round. Shared by a failed vote (`execute_round`) and a
/// proposer who never submits (`proposal_timeout`).
fn eliminate_proposer_and_advance(session: &mut Session, r: u64) -> Result<EliminationOutcome> {
    let n = session.players.len() as u16;
    let balance = session.balance;

    let pirate_state = match &mut session.game_state {
        GameState::Pirate(s) => s,
        _ => return err!(SessionError::PhaseViolation),
    };

    let proposer_idx = pirate_state.current_proposer_index;
    pirate_state.alive[proposer_idx as usize] = false;
    pirate_state.alive_count = pirate_state
        .alive_count
        .checked_sub(1)
        .ok_or(SessionError::Overflow)?;

    if pirate_state.alive_count == 1 {
        let survivor = pirate_state.alive.iter().position(|&a| a).unwrap() as u16;
        pirate_state.distribution = session_core::lone_survivor_distribution(n, survivor, balance);
        pirate_state.round_phase = PirateRoundPhase::Execute;
        session.phase = Phase::Finished;
        session.finished_at_slot = r;
        return Ok(EliminationOutcome::Finished { survivor });
    }

    let next_proposer = session_core::next_alive_proposer(proposer_idx, &pirate_state.alive)
        .ok_or(SessionError::NotAlive)?;
    pirate_state.current_proposer_index = next_proposer;
    pirate_state.current_round = pirate_state
        .current_round
        .checked_add(1)
        .ok_or(SessionError::Overflow)?;
    pirate_state.round_phase = PirateRoundPhase::Proposal;
    pirate_state.distribution = vec![0; n as usize];
    pirate_state.votes_for = 0;
    pirate_state.votes_against = 0;
    pirate_state.round_propose_deadline = r
        .checked_add(pirate_state.commit_duration)
        .ok_or(SessionError::Overflow)?;

    Ok(EliminationOutcome::Advanced { next_proposer })
}

/// Tallies the current round's reveal window. Missing votes count neither
/// for nor against, so a proposal that never reaches quorum simply fails
/// once the window passes without anyone calling this early.
pub fn execute_round(ctx: Context<ExecuteRound>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;
    let balance = session.balance;

    require!(session.game == GameFamily::Pirate, SessionError::PhaseViolation);
    require!(session.phase != Phase::Finished, SessionError::AlreadyFinished);

    let (votes_for, alive_count, distribution) = {
        let pirate_state = match &session.game_state {
            GameState::Pirate(s) => s,
            _ => return err!(SessionError::PhaseViolation),
        };
        require!(
            pirate_state.round_phase == PirateRoundPhase::VoteReveal,
            SessionError::PhaseViolation
        );
        require!(r >= pirate_state.round_reveal_deadline, SessionError::PhaseViolation);
        (
            pirate_state.votes_for,
            pirate_state.alive_count,
            pirate_state.distribution.clone(),
        )
    };

    let threshold = session_core::pass_threshold(alive_count);

    if votes_for >= threshold {
        require!(
            session_core::validate_distribution(&distribution, balance),
            SessionError::DistributionMismatch
        );
        if let GameState::Pirate(s) = &mut session.game_state {
            s.round_phase = PirateRoundPhase::Execute;
        }
        session.phase = Phase::Finished;
        session.finished_at_slot = r;
        msg!("Pirate session {} finalized: proposal passed", session.session_id);
        return Ok(());
    }

    match eliminate_proposer_and_advance(session, r)? {
        EliminationOutcome::Finished { survivor } => msg!(
            "Pirate session {} finalized: lone survivor at seniority {}",
            session.session_id,
            survivor
        ),
        EliminationOutcome::Advanced { next_proposer } => msg!(
            "Pirate session {} round advanced: proposal failed, next proposer at seniority {}",
            session.session_id,
            next_proposer
        ),
    }
    Ok(())
}

/// Permissionless: eliminates a proposer who lets their proposal window
/// lapse without submitting a distribution, the same way a failed vote
/// would. Without this, a silent proposer would permanently strand the
/// pot — nothing else can act on `round_phase == Proposal`.
pub fn proposal_timeout(ctx: Context<ExecuteRound>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;

    require!(session.game == GameFamily::Pirate, SessionError::PhaseViolation);
    require!(session.phase != Phase::Finished, SessionError::AlreadyFinished);

    {
        let pirate_state = match &session.game_state {
            GameState::Pirate(s) => s,
            _ => return err!(SessionError::PhaseViolation),
        };
        require!(
            pirate_state.round_phase == PirateRoundPhase::Proposal,
            SessionError::PhaseViolation
        );
        require!(r >= pirate_state.round_propose_deadline, SessionError::PhaseViolation);
    }

    match eliminate_proposer_and_advance(session, r)? {
        EliminationOutcome::Finished { survivor } => msg!(
            "Pirate session {} finalized: lone survivor at seniority {} after a proposer timeout",
            session.session_id,
            survivor
        ),
        EliminationOutcome::Advanced { next_proposer } => msg!(
            "Pirate session {} round advanced: proposer missed their window, next proposer at seniority {}",
            session.session_id,
            next_proposer
        ),
    }
    Ok(())
}

/// Closes the vote-commit window early once everyone alive has committed,
/// opening the reveal window. Anyone may call it once the commit deadline
/// passes, regardless of turnout.
pub fn open_vote_reveal(ctx: Context<ExecuteRound>) -> Result<()> {
    let r = Clock::get()?.slot;
    let session = &mut ctx.accounts.session;

    require!(session.game == GameFamily::Pirate, SessionError::PhaseViolation);
    require!(session.phase != Phase::Finished, SessionError::AlreadyFinished);

    let pirate_state = match &mut session.game_state {
        GameState::Pirate(s) => s,
        _ => return err!(SessionError::PhaseViolation),
    };
    require!(
        pirate_state.round_phase == PirateRoundPhase::VoteCommit,
        SessionError::PhaseViolation
    );
    require!(r >= pirate_state.round_commit_deadline, SessionError::PhaseViolation);

    pirate_state.round_phase = PirateRoundPhase::VoteReveal;
    pirate_state.round_reveal_deadline = r
        .checked_add(pirate_state.reveal_duration)
        .ok_or(SessionError::Overflow)?;

    msg!("Pirate session {} entered vote-reveal", session.session_id);
    Ok(())
}
