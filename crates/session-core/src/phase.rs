//! Phase admissibility
//!
//! Deadlines are absolute round numbers, never wall-clock time, so
//! adversarial latency cannot extend a phase — all timing is derived from
//! a single monotone round counter supplied by the host.

use serde::{Deserialize, Serialize};

/// Session-wide phase for RPS and Stag Hunt.
///
/// Pirate reuses `Registration` and `Finished` but replaces the three
/// middle phases with [`PirateRoundPhase`], re-derived every elimination
/// round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Registration,
    Committing,
    Revealing,
    ResolvableNow,
    Finished,
}

/// Per-round phase for the Pirate Game, recomputed from `commit_duration`
/// and `reveal_duration` every time the proposer advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PirateRoundPhase {
    Proposal,
    VoteCommit,
    VoteReveal,
    Execute,
}

/// `r < start_at` — `join()` allowed.
pub fn registration_phase(r: u64, start_at: u64) -> bool {
    r < start_at
}

/// `start_at <= r <= end_commit_at` — `commit()` allowed.
pub fn commit_phase(r: u64, start_at: u64, end_commit_at: u64) -> bool {
    r >= start_at && r <= end_commit_at
}

/// `end_commit_at < r <= end_reveal_at` — `reveal()` allowed.
pub fn reveal_phase(r: u64, end_commit_at: u64, end_reveal_at: u64) -> bool {
    r > end_commit_at && r <= end_reveal_at
}

/// `r > end_reveal_at` — `resolve()`/`timeout()` allowed.
pub fn resolvable(r: u64, end_reveal_at: u64) -> bool {
    r > end_reveal_at
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn phases_are_mutually_exclusive_around_deadlines() {
        let (start, end_commit, end_reveal) = (10u64, 20u64, 30u64);

        assert!(registration_phase(9, start));
        assert!(!registration_phase(10, start));

        assert!(commit_phase(10, start, end_commit));
        assert!(commit_phase(20, start, end_commit));
        assert!(!commit_phase(21, start, end_commit));

        assert!(reveal_phase(21, end_commit, end_reveal));
        assert!(reveal_phase(30, end_commit, end_reveal));
        assert!(!reveal_phase(20, end_commit, end_reveal));

        assert!(resolvable(31, end_reveal));
        assert!(!resolvable(30, end_reveal));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            max_global_rejects: 1_000_000,
            ..ProptestConfig::default()
        })]
        // Every round number lands in exactly one of the four named phases,
        // for any ordering of deadlines a caller might (mis)construct.
        #[test]
        fn every_round_has_exactly_one_phase(
            r in 0u64..1000,
            start in 0u64..1000,
            end_commit in 0u64..1000,
            end_reveal in 0u64..1000,
        ) {
            prop_assume!(start < end_commit && end_commit < end_reveal);

            let count = [
                registration_phase(r, start),
                commit_phase(r, start, end_commit),
                reveal_phase(r, end_commit, end_reveal),
                resolvable(r, end_reveal),
            ]
            .iter()
            .filter(|&&b| b)
            .count();

            prop_assert_eq!(count, 1);
        }
    }
}
