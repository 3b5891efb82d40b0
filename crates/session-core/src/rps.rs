//! Resolver — Rock-Paper-Scissors

use serde::{Deserialize, Serialize};

/// A revealed choice, 0=Rock, 1=Paper, 2=Scissors.
pub const CHOICE_DOMAIN: std::ops::RangeInclusive<u64> = 0..=2;

pub fn validate_choice(choice: u64) -> bool {
    CHOICE_DOMAIN.contains(&choice)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpsOutcome {
    P1Wins,
    P2Wins,
    Draw,
}

/// R beats S, P beats R, S beats P.
pub fn outcome(c1: u64, c2: u64) -> RpsOutcome {
    if c1 == c2 {
        return RpsOutcome::Draw;
    }
    let p1_wins = matches!((c1, c2), (0, 2) | (1, 0) | (2, 1));
    if p1_wins {
        RpsOutcome::P1Wins
    } else {
        RpsOutcome::P2Wins
    }
}

/// Even split of `balance` between the two players; any 1-unit dust is
/// retained (not distributed) by the caller.
pub fn split(balance: u64) -> (u64, u64) {
    let half = balance / 2;
    (half, half)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_table_is_correct() {
        assert_eq!(outcome(0, 2), RpsOutcome::P1Wins); // rock beats scissors
        assert_eq!(outcome(1, 0), RpsOutcome::P1Wins); // paper beats rock
        assert_eq!(outcome(2, 1), RpsOutcome::P1Wins); // scissors beats paper
        assert_eq!(outcome(2, 0), RpsOutcome::P2Wins);
        assert_eq!(outcome(0, 1), RpsOutcome::P2Wins);
        assert_eq!(outcome(1, 2), RpsOutcome::P2Wins);
    }

    #[test]
    fn ties_are_draws() {
        for c in 0..=2u64 {
            assert_eq!(outcome(c, c), RpsOutcome::Draw);
        }
    }

    // S1 — RPS happy path: fee=100, pot=200, P1 plays Rock vs P2 Scissors.
    #[test]
    fn s1_happy_path_winner_takes_pot() {
        assert_eq!(outcome(0, 2), RpsOutcome::P1Wins);
    }

    // S2 — RPS draw: pot=200, split 100/100, odd pot keeps 1-unit dust.
    #[test]
    fn s2_draw_splits_evenly_with_dust_retained() {
        assert_eq!(split(200), (100, 100));
        assert_eq!(split(201), (100, 100)); // 1-unit dust stays in escrow
    }

    #[test]
    fn choice_domain_rejects_out_of_range() {
        assert!(validate_choice(0) && validate_choice(2));
        assert!(!validate_choice(3));
    }
}
