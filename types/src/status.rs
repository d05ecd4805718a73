//! Status and relationship enums for video verification.

use serde::{Deserialize, Serialize};

/// The trust status of a video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Collecting attestations; below the consensus threshold.
    Pending,
    /// Consensus threshold reached. Terminal under this engine.
    Verified,
    /// Rejected by an external moderation action. Terminal.
    Rejected,
}

impl VerificationStatus {
    /// Whether new attestations may still be appended.
    pub fn accepts_attestations(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether this status can never change again under this engine.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Rejected)
    }
}

/// A verifier's self-declared relationship to the athlete.
///
/// Display/record-keeping only; it carries no weight in the consensus or
/// dedup decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Coach,
    Teammate,
    Parent,
    Friend,
    Witness,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_accepts_attestations() {
        assert!(VerificationStatus::Pending.accepts_attestations());
        assert!(!VerificationStatus::Verified.accepts_attestations());
        assert!(!VerificationStatus::Rejected.accepts_attestations());
    }

    #[test]
    fn terminal_states() {
        assert!(!VerificationStatus::Pending.is_terminal());
        assert!(VerificationStatus::Verified.is_terminal());
        assert!(VerificationStatus::Rejected.is_terminal());
    }
}
