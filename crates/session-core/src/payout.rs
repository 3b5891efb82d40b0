//! Payout engine
//!
//! Pull-based: the engine never pushes funds on resolution, only on an
//! explicit `claim`. This keeps per-call cost bounded and isolates a single
//! unresponsive recipient from blocking anyone else.

use crate::error::CoreError;

/// Validate and size a single `claim(session)` call.
///
/// `entitlement` is `None` when the caller never revealed (or lost, or
/// wasn't part of the session) — there is nothing to look up. The caller is
/// responsible for setting the claim marker *before* emitting the payment
/// and for skipping the payment entirely when the returned amount is 0.
pub fn claim(entitlement: Option<u64>, already_claimed: bool) -> Result<u64, CoreError> {
    if already_claimed {
        return Err(CoreError::AlreadyClaimed);
    }
    entitlement.ok_or(CoreError::NotClaimant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_entitlement_is_not_a_claimant() {
        assert_eq!(claim(None, false), Err(CoreError::NotClaimant));
    }

    #[test]
    fn double_claim_is_rejected_even_with_an_entitlement() {
        assert_eq!(claim(Some(100), true), Err(CoreError::AlreadyClaimed));
    }

    #[test]
    fn zero_amount_entitlement_still_claims_successfully() {
        assert_eq!(claim(Some(0), false), Ok(0));
    }

    #[test]
    fn valid_claim_returns_amount() {
        assert_eq!(claim(Some(200), false), Ok(200));
    }
}
