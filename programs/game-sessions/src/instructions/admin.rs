//! Admin instructions

use anchor_lang::prelude::*;
use crate::state::{Config, GlobalJackpot};
use crate::error::SessionError;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeConfigParams {
    pub operator: Pubkey,
    pub house_fee_bps: u16,
    pub default_hare_refund_pct: u8,
    pub default_stag_threshold_pct: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct UpdateConfigParams {
    pub operator: Option<Pubkey>,
    pub house_fee_bps: Option<u16>,
    pub default_hare_refund_pct: Option<u8>,
    pub default_stag_threshold_pct: Option<u8>,
}

/// Initialize the global config (one-time setup).
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = Config::LEN,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_config(ctx: Context<InitializeConfig>, params: InitializeConfigParams) -> Result<()> {
    require!(params.house_fee_bps <= 10_000, SessionError::Overflow);
    require!(params.default_hare_refund_pct <= 100, SessionError::Overflow);
    require!(params.default_stag_threshold_pct <= 100, SessionError::Overflow);

    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.operator = params.operator;
    config.house_fee_bps = params.house_fee_bps;
    config.next_session_id = 0;
    config.default_hare_refund_pct = params.default_hare_refund_pct;
    config.default_stag_threshold_pct = params.default_stag_threshold_pct;
    config.accumulated_fees = 0;
    config.bump = ctx.bumps.config;

    msg!("Config initialized by {}, operator = {}", config.admin, config.operator);
    Ok(())
}

/// Update config parameters (admin only).
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ SessionError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

pub fn update_config(ctx: Context<UpdateConfig>, params: UpdateConfigParams) -> Result<()> {
    let config = &mut ctx.accounts.config;

    if let Some(op) = params.operator {
        config.operator = op;
    }
    if let Some(fee) = params.house_fee_bps {
        require!(fee <= 10_000, SessionError::Overflow);
        config.house_fee_bps = fee;
    }
    if let Some(pct) = params.default_hare_refund_pct {
        require!(pct <= 100, SessionError::Overflow);
        config.default_hare_refund_pct = pct;
    }
    if let Some(pct) = params.default_stag_threshold_pct {
        require!(pct <= 100, SessionError::Overflow);
        config.default_stag_threshold_pct = pct;
    }

    msg!("Config updated");
    Ok(())
}

/// Withdraw accumulated house fees (admin only).
#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ SessionError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,
}

pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    require!(config.accumulated_fees > 0, SessionError::NotClaimant);

    let rent = Rent::get()?;
    let min_balance = rent.minimum_balance(config.to_account_info().data_len());
    let max_withdraw = config.to_account_info().lamports().saturating_sub(min_balance);
    let amount = config.accumulated_fees.min(max_withdraw);

    config.accumulated_fees = config
        .accumulated_fees
        .checked_sub(amount)
        .ok_or(SessionError::Overflow)?;

    **config.to_account_info().try_borrow_mut_lamports()? -= amount;
    **ctx.accounts.admin.try_borrow_mut_lamports()? += amount;

    msg!("Withdrew {} lamports in fees", amount);
    Ok(())
}

/// Initialize the process-wide Stag Hunt jackpot (one-time setup).
#[derive(Accounts)]
pub struct InitializeJackpot<'info> {
    #[account(
        init,
        payer = admin,
        space = GlobalJackpot::LEN,
        seeds = [b"jackpot"],
        bump
    )]
    pub jackpot: Account<'info, GlobalJackpot>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_jackpot(ctx: Context<InitializeJackpot>) -> Result<()> {
    let jackpot = &mut ctx.accounts.jackpot;
    jackpot.balance = 0;
    jackpot.bump = ctx.bumps.jackpot;
    msg!("Jackpot initialized");
    Ok(())
}
