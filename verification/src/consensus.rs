//! Consensus engine — pure status computation from accumulated attestations.
//!
//! No I/O and no clock. The transition rule, evaluated after every
//! successful append:
//!
//! ```text
//! status = count(attestations) >= threshold ? verified : pending
//! ```
//!
//! Monotonic and idempotent: re-evaluating without new attestations never
//! changes the result, and a terminal status (verified, rejected) is never
//! left. Rejection is only ever set by an external moderation action.

use serde::{Deserialize, Serialize};
use vouch_store::VideoRecord;
use vouch_types::{Timestamp, VerificationStatus};

/// Recompute a video's status from its attestation count.
///
/// `current` dominates when terminal; otherwise the threshold rule decides.
pub fn compute_status(
    current: VerificationStatus,
    attestation_count: u32,
    threshold: u32,
) -> VerificationStatus {
    match current {
        VerificationStatus::Verified => VerificationStatus::Verified,
        VerificationStatus::Rejected => VerificationStatus::Rejected,
        VerificationStatus::Pending => {
            if attestation_count >= threshold {
                VerificationStatus::Verified
            } else {
                VerificationStatus::Pending
            }
        }
    }
}

/// Caller-facing projection — enough to render "2/3 verifications".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationProgress {
    pub verifications: u32,
    pub threshold: u32,
    pub status: VerificationStatus,
}

/// Project a record into its progress view.
pub fn progress(record: &VideoRecord) -> VerificationProgress {
    VerificationProgress {
        verifications: record.attestation_count(),
        threshold: record.threshold,
        status: record.status,
    }
}

/// Whether the record's deadline (if any) lies at or before `now`.
///
/// Informational only: nothing in this engine polls or enforces the
/// deadline. An external scheduled collaborator reads this and invokes the
/// moderation hook.
pub fn deadline_passed(record: &VideoRecord, now: Timestamp) -> bool {
    record.deadline.is_some_and(|d| d.is_past(now))
}
