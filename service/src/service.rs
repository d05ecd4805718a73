//! The wiring facade: one object the host application talks to.

use tracing::info;

use vouch_store::{StoreError, VideoRecord, VideoStore};
use vouch_types::{
    Timestamp, UserId, VerificationParams, VerificationStatus, VideoId,
};
use vouch_verification::consensus::{self, VerificationProgress};
use vouch_verification::link::mint_verification_link;
use vouch_verification::{AttestationRequest, SubmissionHandler, VerificationError};

/// Owns the store and parameters; exposes the engine's operations to the
/// host application.
pub struct VerificationService<S: VideoStore> {
    store: S,
    params: VerificationParams,
}

impl<S: VideoStore> VerificationService<S> {
    pub fn new(store: S, params: VerificationParams) -> Self {
        Self { store, params }
    }

    /// Register a freshly uploaded video: pending, empty attestation list,
    /// threshold fixed from the current parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn create_video(
        &self,
        id: VideoId,
        owner_id: UserId,
        title: impl Into<String>,
        sport: impl Into<String>,
        skill_category: impl Into<String>,
        duration_secs: u32,
        deadline: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<VideoRecord, VerificationError> {
        let record = VideoRecord::new(
            id,
            owner_id,
            title,
            sport,
            skill_category,
            now,
            duration_secs,
            self.params.default_threshold,
            deadline,
        );
        self.store.put_video(&record)?;
        info!(video = %record.id, threshold = record.threshold, "video registered");
        Ok(record)
    }

    /// Submit one attestation attempt. See `SubmissionHandler::submit`.
    pub fn submit_attestation(
        &self,
        video_id: &VideoId,
        request: &AttestationRequest,
        now: Timestamp,
    ) -> Result<VideoRecord, VerificationError> {
        SubmissionHandler::new(&self.store, &self.params).submit(video_id, request, now)
    }

    /// The caller-facing projection: count, threshold, status.
    pub fn progress(&self, video_id: &VideoId) -> Result<VerificationProgress, VerificationError> {
        let record = self.load(video_id)?;
        Ok(consensus::progress(&record))
    }

    /// Atomic view-count bump; returns the new count. Independent of
    /// verification writes.
    pub fn record_view(&self, video_id: &VideoId) -> Result<u64, VerificationError> {
        match self.store.increment_view_count(video_id) {
            Ok(count) => Ok(count),
            Err(StoreError::NotFound(_)) => {
                Err(VerificationError::VideoNotFound(video_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// External moderation hook: reject a video. A verified record is not
    /// demoted; the call reports `AlreadyVerified` instead.
    ///
    /// Goes straight to the store's guarded status write — a separate
    /// read-then-write here would race a submission that reaches consensus
    /// in between.
    pub fn reject_video(&self, video_id: &VideoId) -> Result<VideoRecord, VerificationError> {
        match self.store.set_status(video_id, VerificationStatus::Rejected) {
            Ok(updated) => {
                info!(video = %video_id, "video rejected by moderation");
                Ok(updated)
            }
            Err(StoreError::NotFound(_)) => {
                Err(VerificationError::VideoNotFound(video_id.clone()))
            }
            // the store refuses to demote a verified record
            Err(StoreError::Corruption(_)) => {
                Err(VerificationError::AlreadyVerified(video_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Entry point for the external deadline scheduler. Rejects a
    /// still-pending video whose deadline has passed; otherwise a no-op.
    /// The engine itself neither polls nor assumes a scheduler exists.
    pub fn on_deadline_passed(
        &self,
        video_id: &VideoId,
        now: Timestamp,
    ) -> Result<Option<VideoRecord>, VerificationError> {
        let record = self.load(video_id)?;
        if record.status != VerificationStatus::Pending
            || !consensus::deadline_passed(&record, now)
        {
            return Ok(None);
        }
        match self.store.set_status(video_id, VerificationStatus::Rejected) {
            Ok(updated) => {
                info!(video = %video_id, "pending video rejected at deadline");
                Ok(Some(updated))
            }
            // a submission reached consensus between the read and the
            // write; the deadline no longer applies
            Err(StoreError::Corruption(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Mint the shareable verification link for a video.
    pub fn verification_link(&self, video_id: &VideoId) -> Result<String, VerificationError> {
        let record = self.load(video_id)?;
        Ok(mint_verification_link(
            &self.params.link_base_url,
            &record.owner_id,
            &record.id,
        ))
    }

    fn load(&self, video_id: &VideoId) -> Result<VideoRecord, VerificationError> {
        match self.store.get_video(video_id) {
            Ok(record) => Ok(record),
            Err(StoreError::NotFound(_)) => {
                Err(VerificationError::VideoNotFound(video_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_nullables::{NullClock, NullVideoStore};
    use vouch_types::{ClientIp, ClientSignals, DeviceFingerprint, Relationship};

    fn service() -> VerificationService<NullVideoStore> {
        VerificationService::new(NullVideoStore::new(), VerificationParams::standard())
    }

    fn request(name: &str, fp: &str, ip: &str) -> AttestationRequest {
        AttestationRequest {
            verifier_id: "1700000000123".to_string(),
            verifier_name: name.to_string(),
            verifier_email: format!("{}@example.com", name.to_lowercase()),
            relationship: Relationship::Coach,
            message: None,
            signals: ClientSignals {
                fingerprint: Some(DeviceFingerprint::new(fp).unwrap()),
                ip: Some(ClientIp::new(ip).unwrap()),
                user_agent: Some("ua".to_string()),
            },
        }
    }

    fn create(service: &VerificationService<NullVideoStore>, deadline: Option<u64>) -> VideoId {
        let id = VideoId::new("v1");
        service
            .create_video(
                id.clone(),
                UserId::new("athlete"),
                "No-look pass",
                "basketball",
                "passing",
                18,
                deadline.map(Timestamp::new),
                Timestamp::new(1_000),
            )
            .unwrap();
        id
    }

    #[test]
    fn end_to_end_consensus_flow() {
        let service = service();
        let video = create(&service, None);

        service
            .submit_attestation(&video, &request("Alice", "fp-1", "10.0.0.1"), Timestamp::new(2_000))
            .unwrap();
        service
            .submit_attestation(&video, &request("Bob", "fp-2", "10.0.0.2"), Timestamp::new(2_001))
            .unwrap();

        let progress = service.progress(&video).unwrap();
        assert_eq!(progress.verifications, 2);
        assert_eq!(progress.threshold, 3);
        assert_eq!(progress.status, VerificationStatus::Pending);

        service
            .submit_attestation(&video, &request("Cara", "fp-3", "10.0.0.3"), Timestamp::new(2_002))
            .unwrap();
        let progress = service.progress(&video).unwrap();
        assert_eq!(progress.verifications, 3);
        assert_eq!(progress.status, VerificationStatus::Verified);
    }

    #[test]
    fn progress_projection_serializes_for_callers() {
        let service = service();
        let video = create(&service, None);
        service
            .submit_attestation(&video, &request("Alice", "fp-1", "10.0.0.1"), Timestamp::new(2_000))
            .unwrap();

        let progress = service.progress(&video).unwrap();
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "verifications": 1,
                "threshold": 3,
                "status": "pending",
            })
        );
    }

    #[test]
    fn view_counts_are_independent_of_attestations() {
        let service = service();
        let video = create(&service, None);

        assert_eq!(service.record_view(&video).unwrap(), 1);
        assert_eq!(service.record_view(&video).unwrap(), 2);
        service
            .submit_attestation(&video, &request("Alice", "fp-1", "10.0.0.1"), Timestamp::new(2_000))
            .unwrap();
        assert_eq!(service.record_view(&video).unwrap(), 3);
        assert_eq!(service.progress(&video).unwrap().verifications, 1);
    }

    #[test]
    fn moderation_cannot_demote_verified() {
        let service = VerificationService::new(
            NullVideoStore::new(),
            VerificationParams {
                default_threshold: 1,
                ..VerificationParams::standard()
            },
        );
        let video = create(&service, None);
        service
            .submit_attestation(&video, &request("Alice", "fp-1", "10.0.0.1"), Timestamp::new(2_000))
            .unwrap();

        // the store's own guard produces the refusal, so a submission
        // landing between a read and the write cannot slip a demotion
        // through as an infrastructure fault
        let err = service.reject_video(&video).unwrap_err();
        assert!(matches!(err, VerificationError::AlreadyVerified(_)));

        let progress = service.progress(&video).unwrap();
        assert_eq!(progress.status, VerificationStatus::Verified);
        assert_eq!(progress.verifications, 1);
    }

    #[test]
    fn rejecting_missing_video_reports_not_found() {
        let service = service();
        let err = service.reject_video(&VideoId::new("ghost")).unwrap_err();
        assert!(matches!(err, VerificationError::VideoNotFound(_)));
    }

    #[test]
    fn deadline_hook_ignores_verified_video() {
        let service = VerificationService::new(
            NullVideoStore::new(),
            VerificationParams {
                default_threshold: 1,
                ..VerificationParams::standard()
            },
        );
        let video = create(&service, Some(5_000));
        service
            .submit_attestation(&video, &request("Alice", "fp-1", "10.0.0.1"), Timestamp::new(2_000))
            .unwrap();

        assert!(service
            .on_deadline_passed(&video, Timestamp::new(9_000))
            .unwrap()
            .is_none());
        assert_eq!(
            service.progress(&video).unwrap().status,
            VerificationStatus::Verified
        );
    }

    #[test]
    fn deadline_hook_rejects_only_stale_pending() {
        let service = service();
        let video = create(&service, Some(5_000));
        let clock = NullClock::new(4_999);

        // not yet due
        assert!(service
            .on_deadline_passed(&video, clock.now())
            .unwrap()
            .is_none());

        clock.advance(1);
        let updated = service
            .on_deadline_passed(&video, clock.now())
            .unwrap()
            .expect("stale pending video should be rejected");
        assert_eq!(updated.status, VerificationStatus::Rejected);

        // idempotent: already rejected, nothing further happens
        clock.set(6_000);
        assert!(service
            .on_deadline_passed(&video, clock.now())
            .unwrap()
            .is_none());
    }

    #[test]
    fn link_is_deterministic_and_owner_scoped() {
        let service = service();
        let video = create(&service, None);
        let link = service.verification_link(&video).unwrap();
        assert_eq!(link, "https://vouch.app/verify/athlete/v1");
        assert_eq!(service.verification_link(&video).unwrap(), link);
    }
}
