//! Resolver — Pirate Game

pub fn validate_vote(v: u64) -> bool {
    v == 0 || v == 1
}

/// A proposal must distribute the pot exactly — no more, no less.
pub fn validate_distribution(dist: &[u64], pot: u64) -> bool {
    dist.iter().try_fold(0u64, |acc, &x| acc.checked_add(x))
        .map(|sum| sum == pot)
        .unwrap_or(false)
}

/// Strict majority with proposer-casting tie-break: `(alive_count + 1) / 2`.
pub fn pass_threshold(alive_count: u16) -> u16 {
    (alive_count + 1) / 2
}

/// Linear forward search with wraparound over the seniority list for the
/// next alive pirate after `current`. `None` only if nobody is alive, which
/// an `alive_count >= 1` invariant makes unreachable in practice.
pub fn next_alive_proposer(current: u16, alive: &[bool]) -> Option<u16> {
    let n = alive.len();
    if n == 0 {
        return None;
    }
    for step in 1..=n {
        let idx = (current as usize + step) % n;
        if alive[idx] {
            return Some(idx as u16);
        }
    }
    None
}

/// When exactly one pirate remains, they take the entire pot; everyone
/// else's slot is zero.
pub fn lone_survivor_distribution(n: u16, survivor: u16, pot: u64) -> Vec<u64> {
    let mut dist = vec![0u64; n as usize];
    if (survivor as usize) < dist.len() {
        dist[survivor as usize] = pot;
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    // S6 — 3 pirates, first proposal fails, second passes.
    #[test]
    fn s6_pass_threshold_and_elimination_order() {
        assert_eq!(pass_threshold(3), 2);

        // Round 1: proposer 0 proposes [3e6, 0, 0], only self votes yes.
        assert!(validate_distribution(&[3_000_000, 0, 0], 3_000_000));
        let votes_for = 1u16;
        assert!(votes_for < pass_threshold(3));

        // Proposer 0 eliminated, seniority list is [false, true, true].
        let alive = [false, true, true];
        assert_eq!(next_alive_proposer(0, &alive), Some(1));

        // Round 2: proposer 1 proposes [0, 2e6, 1e6], votes_for = 2 >= 2.
        assert!(validate_distribution(&[0, 2_000_000, 1_000_000], 3_000_000));
        assert!(2u16 >= pass_threshold(2));
    }

    #[test]
    fn wraparound_search_skips_dead_pirates() {
        let alive = [true, false, false, true];
        assert_eq!(next_alive_proposer(3, &alive), Some(0));
        assert_eq!(next_alive_proposer(0, &alive), Some(3));
    }

    // S8 — cascading failures down to one survivor.
    #[test]
    fn s8_lone_survivor_takes_entire_pot() {
        let dist = lone_survivor_distribution(5, 2, 1_000_000);
        assert_eq!(dist, vec![0, 0, 1_000_000, 0, 0]);
    }

    #[test]
    fn distribution_must_sum_exactly_to_pot() {
        assert!(!validate_distribution(&[1, 2, 3], 7));
        assert!(validate_distribution(&[1, 2, 4], 7));
    }

    #[test]
    fn no_alive_pirates_is_unreachable() {
        assert_eq!(next_alive_proposer(0, &[false, false]), None);
    }
}
