//! Shared primitive types
//!
//! Kept free of any Solana/Anchor dependency so this crate stays portable.

use serde::{Deserialize, Serialize};

/// A participant's address, opaque to this crate (the host supplies a
/// 32-byte public key).
pub type PlayerId = [u8; 32];

/// Which rule family a session is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameFamily {
    Rps,
    Stag,
    Pirate,
}
