//! Account state definitions

use anchor_lang::prelude::*;

/// Minimum pirates for a Pirate Game session (below this, registration
/// timeout refunds everyone instead of starting the proposal loop).
pub const MIN_PIRATES: u16 = 3;
/// Maximum pirates for a Pirate Game session.
pub const MAX_PIRATES: u16 = 20;

/// Claim window after a session becomes `Finished`, in slots (supplemented
/// feature, see DESIGN.md).
#[cfg(not(feature = "testing"))]
pub const CLAIM_EXPIRY_SLOTS: u64 = 2_592_000;
#[cfg(feature = "testing")]
pub const CLAIM_EXPIRY_SLOTS: u64 = 2;

/// Global configuration account.
#[account]
#[derive(Default)]
pub struct Config {
    /// Admin who can update config and withdraw fees.
    pub admin: Pubkey,
    /// Operator who may run permissionless lifecycle calls on a protocol's behalf.
    pub operator: Pubkey,
    /// House fee in basis points (0-10000, where 100 = 1%), taken from the
    /// net pot at resolution.
    pub house_fee_bps: u16,
    /// Next SessionID to allocate.
    pub next_session_id: u64,
    /// Default Stag Hunt hare refund percentage for new sessions.
    pub default_hare_refund_pct: u8,
    /// Default Stag Hunt threshold percentage for new sessions.
    pub default_stag_threshold_pct: u8,
    /// Accumulated house fees pending withdrawal.
    pub accumulated_fees: u64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Config {
    pub const LEN: usize = 8 // discriminator
        + 32 // admin
        + 32 // operator
        + 2  // house_fee_bps
        + 8  // next_session_id
        + 1  // default_hare_refund_pct
        + 1  // default_stag_threshold_pct
        + 8  // accumulated_fees
        + 1  // bump
        + 16; // padding for future fields
}

/// Which rule family a session runs.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum GameFamily {
    #[default]
    Rps,
    Stag,
    Pirate,
}

impl From<GameFamily> for session_core::GameFamily {
    fn from(g: GameFamily) -> Self {
        match g {
            GameFamily::Rps => session_core::GameFamily::Rps,
            GameFamily::Stag => session_core::GameFamily::Stag,
            GameFamily::Pirate => session_core::GameFamily::Pirate,
        }
    }
}

/// Session-wide phase.
///
/// `Committing`/`Revealing`/`ResolvableNow` are never actually stored — they
/// are pure functions of the round counter against the session's deadlines
/// (see `session_core::phase`), so there is nothing for any instruction to
/// explicitly advance. `Session::phase` only ever holds `Registration`
/// (the initial value) or `Finished` (set once by a resolver); the
/// intermediate variants exist so the type still names every named phase.
/// Pirate additionally tracks its own richer alphabet in
/// `PirateState::round_phase`, which genuinely is event-driven (entering
/// `VoteCommit` requires a proposal to be submitted, not just time to pass).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Phase {
    #[default]
    Registration,
    Committing,
    Revealing,
    ResolvableNow,
    Finished,
}

/// Per-round phase for the Pirate Game.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum PirateRoundPhase {
    #[default]
    Proposal,
    VoteCommit,
    VoteReveal,
    Execute,
}

/// RPS-specific session payload.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug)]
pub struct RpsState {
    /// Computed at resolution; index-aligned with `Session::players`.
    pub entitlement: [u64; 2],
}

/// Stag Hunt-specific session payload.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug)]
pub struct StagState {
    pub stags: u32,
    pub hares: u32,
    pub resolved: bool,
    pub successful: bool,
    pub reward_per_stag: u64,
    pub hare_refund_unit: u64,
    /// Snapshotted from `Config` at creation; updatable by the creator via
    /// `update_game_rules` until resolution.
    pub hare_refund_pct: u8,
    pub stag_threshold_pct: u8,
}

/// Pirate Game-specific session payload.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug)]
pub struct PirateState {
    pub round_phase: PirateRoundPhase,
    pub current_round: u32,
    pub total_pirates: u16,
    pub alive_count: u16,
    pub current_proposer_index: u16,
    pub commit_duration: u64,
    pub reveal_duration: u64,
    /// Slot the current round's proposal window closes; set when the round
    /// begins (session creation for round 0, round advance thereafter). A
    /// proposer who lets this pass without proposing is eliminated exactly
    /// like a proposal that fails its vote.
    pub round_propose_deadline: u64,
    /// Slot the current round's vote-commit window closes; set when the
    /// proposer submits a proposal.
    pub round_commit_deadline: u64,
    /// Slot the current round's vote-reveal window closes; set once the
    /// commit window closes and reveal begins.
    pub round_reveal_deadline: u64,
    /// Index-aligned with `Session::players` (seniority order).
    pub alive: Vec<bool>,
    /// Current or winning proposal, index-aligned with `Session::players`.
    pub distribution: Vec<u64>,
    pub votes_for: u16,
    pub votes_against: u16,
}

/// Per-game payload, tagged by `Session::game`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub enum GameState {
    Rps(RpsState),
    Stag(StagState),
    Pirate(PirateState),
}

impl Default for GameState {
    fn default() -> Self {
        GameState::Rps(RpsState::default())
    }
}

/// Bytes added per player: pubkey + claim flag.
pub const BYTES_PER_PLAYER: usize = 32 + 1;
/// Extra bytes per pirate beyond `BYTES_PER_PLAYER`: alive flag + one
/// distribution slot.
pub const BYTES_PER_PIRATE_EXTRA: usize = 1 + 8;

/// One session per game, keyed by `session_id`.
#[account]
pub struct Session {
    pub session_id: u64,
    pub game: GameFamily,
    pub creator: Pubkey,
    pub participation_fee: u64,
    pub start_at: u64,
    pub end_commit_at: u64,
    pub end_reveal_at: u64,
    pub balance: u64,
    pub phase: Phase,
    /// Slot `phase` flipped to `Finished`; 0 until then. Anchors the claim
    /// expiry window (supplemented feature, see DESIGN.md).
    pub finished_at_slot: u64,
    pub max_players: u16,
    /// Insertion-ordered; index = seniority for Pirate.
    pub players: Vec<Pubkey>,
    /// Index-aligned with `players`.
    pub claimed: Vec<bool>,
    pub game_state: GameState,
    pub bump: u8,
}

impl Session {
    /// Base space for a session with empty vecs and the smallest
    /// `GameState` variant; grown via `realloc` as players join. Pirate's
    /// three extra `u64` deadlines in `PirateState` are covered by the
    /// generous inline-payload allowance below.
    pub const BASE_SPACE: usize = 8 // discriminator
        + 8  // session_id
        + 1  // game
        + 32 // creator
        + 8  // participation_fee
        + 8 * 3 // start_at, end_commit_at, end_reveal_at
        + 8  // balance
        + 1  // phase
        + 8  // finished_at_slot
        + 2  // max_players
        + 4  // players vec len
        + 4  // claimed vec len
        + 1  // game_state enum discriminant
        + 64 // RpsState/StagState inline payload, generous upper bound
        + 1  // bump
        + 32; // padding for future fields

    /// Extra fixed bytes for Pirate's `alive`/`distribution` vec length
    /// prefixes (the elements themselves are counted per-player below).
    const PIRATE_VEC_HEADERS: usize = 4 + 4;

    pub fn space(max_players: u16, game: GameFamily) -> usize {
        let per_player = Self::BASE_SPACE + (max_players as usize) * BYTES_PER_PLAYER;
        match game {
            GameFamily::Pirate => {
                per_player
                    + Self::PIRATE_VEC_HEADERS
                    + (max_players as usize) * BYTES_PER_PIRATE_EXTRA
            }
            _ => per_player,
        }
    }

    pub fn space_for_next_player(&self) -> usize {
        Self::space(self.max_players, self.game)
    }
}

/// Commit record for `(session, round, player)`.
#[account]
#[derive(Default)]
pub struct CommitRecord {
    pub session: Pubkey,
    pub player: Pubkey,
    pub round: u32,
    pub hash: [u8; 32],
    pub revealed_choice: Option<u64>,
    pub bump: u8,
}

impl CommitRecord {
    pub const LEN: usize = 8 // discriminator
        + 32 // session
        + 32 // player
        + 4  // round
        + 32 // hash
        + (1 + 8) // revealed_choice: Option<u64>
        + 1  // bump
        + 16; // padding
}

/// Process-wide Stag Hunt jackpot, fed by failed sessions, drained
/// (modulo indivisible remainder) by successful ones.
#[account]
#[derive(Default)]
pub struct GlobalJackpot {
    pub balance: u64,
    pub bump: u8,
}

impl GlobalJackpot {
    pub const LEN: usize = 8 + 8 + 1 + 16;
}
