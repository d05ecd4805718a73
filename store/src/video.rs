//! Video record model and storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use vouch_types::{
    ClientIp, DeviceFingerprint, Relationship, Timestamp, UserId, VerificationStatus, VideoId,
};

/// One verifier's claim that a video is authentic.
///
/// `verifier_id` is client-generated and display-only; the anti-fraud keys
/// are `fingerprint` and `ip`. Persisted attestations always carry both
/// signals — a submission with either missing is rejected before it gets
/// anywhere near the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationAttestation {
    pub verifier_id: String,
    pub verifier_name: String,
    pub verifier_email: String,
    pub relationship: Relationship,
    pub verified_at: Timestamp,
    pub message: Option<String>,
    pub fingerprint: DeviceFingerprint,
    pub ip: ClientIp,
    pub user_agent: String,
}

/// Persisted entity holding a video's metadata and accumulated attestations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: VideoId,
    pub owner_id: UserId,
    pub title: String,
    pub sport: String,
    pub skill_category: String,
    pub uploaded_at: Timestamp,
    pub duration_secs: u32,
    pub view_count: u64,
    pub status: VerificationStatus,
    /// Consensus threshold, fixed at creation.
    pub threshold: u32,
    /// Intended verification cutoff. Stored only; enforcement is delegated
    /// to an external scheduled collaborator.
    pub deadline: Option<Timestamp>,
    /// Append-ordered; entries are never edited, removed, or reordered.
    pub attestations: Vec<VerificationAttestation>,
    /// Optimistic-concurrency version, bumped by every store write.
    pub revision: u64,
}

impl VideoRecord {
    /// A freshly uploaded video: pending, no attestations, revision zero.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: VideoId,
        owner_id: UserId,
        title: impl Into<String>,
        sport: impl Into<String>,
        skill_category: impl Into<String>,
        uploaded_at: Timestamp,
        duration_secs: u32,
        threshold: u32,
        deadline: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            owner_id,
            title: title.into(),
            sport: sport.into(),
            skill_category: skill_category.into(),
            uploaded_at,
            duration_secs,
            view_count: 0,
            status: VerificationStatus::Pending,
            threshold,
            deadline,
            attestations: Vec::new(),
            revision: 0,
        }
    }

    pub fn attestation_count(&self) -> u32 {
        self.attestations.len() as u32
    }
}

/// Whether a store may move a record from `from` to `to`.
///
/// Pending may advance to Verified or Rejected; terminal states only accept
/// an idempotent rewrite of themselves. Shared by every backend so none of
/// them can resurrect a terminal record.
pub fn status_transition_allowed(from: VerificationStatus, to: VerificationStatus) -> bool {
    from == to || from == VerificationStatus::Pending
}

/// Trait for video record storage.
///
/// The dedup-check-then-append sequence in the submission handler is a
/// read-check-write pattern; `append_attestation` is the atomic conditional
/// write that makes it safe. Implementations must serialize writes per
/// video id (a write transaction or per-record lock).
pub trait VideoStore: Send + Sync {
    fn get_video(&self, id: &VideoId) -> Result<VideoRecord, StoreError>;

    /// Create or replace a record wholesale. Bumps the revision.
    fn put_video(&self, record: &VideoRecord) -> Result<(), StoreError>;

    /// Atomically append one attestation and set the recomputed status,
    /// conditional on the record still being at `expected_revision`.
    ///
    /// Returns the updated record, or `StoreError::Conflict` if another
    /// write landed first — the caller re-reads and revalidates.
    fn append_attestation(
        &self,
        id: &VideoId,
        expected_revision: u64,
        attestation: &VerificationAttestation,
        new_status: VerificationStatus,
    ) -> Result<VideoRecord, StoreError>;

    /// Moderation hook: set the status directly (e.g. external rejection).
    /// Transitions out of a terminal status are refused as `Corruption`.
    fn set_status(
        &self,
        id: &VideoId,
        status: VerificationStatus,
    ) -> Result<VideoRecord, StoreError>;

    /// Atomic view-count increment, independent of verification writes.
    /// Returns the new count. Never a cached read-modify-write in the
    /// caller.
    fn increment_view_count(&self, id: &VideoId) -> Result<u64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_pending_and_empty() {
        let record = VideoRecord::new(
            VideoId::new("v1"),
            UserId::new("u1"),
            "Backflip",
            "gymnastics",
            "tumbling",
            Timestamp::new(1000),
            42,
            3,
            None,
        );
        assert_eq!(record.status, VerificationStatus::Pending);
        assert_eq!(record.attestation_count(), 0);
        assert_eq!(record.view_count, 0);
        assert_eq!(record.revision, 0);
    }

    #[test]
    fn terminal_statuses_cannot_be_left() {
        use VerificationStatus::*;
        assert!(status_transition_allowed(Pending, Verified));
        assert!(status_transition_allowed(Pending, Rejected));
        assert!(status_transition_allowed(Pending, Pending));
        assert!(status_transition_allowed(Verified, Verified));
        assert!(status_transition_allowed(Rejected, Rejected));
        assert!(!status_transition_allowed(Verified, Pending));
        assert!(!status_transition_allowed(Verified, Rejected));
        assert!(!status_transition_allowed(Rejected, Pending));
        assert!(!status_transition_allowed(Rejected, Verified));
    }
}
