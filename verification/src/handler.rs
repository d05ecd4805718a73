//! Verification submission handler.
//!
//! One attestation attempt runs through a fixed validation order: record
//! status, syntactic fields, signal presence, sybil dedup, then the atomic
//! conditional append. Rejected attempts persist nothing, so every failure
//! is safely retryable; a lost revision race surfaces as `StoreConflict`
//! and the caller resubmits the identical validated candidate.

use tracing::{debug, info, warn};

use crate::consensus;
use crate::dedup;
use crate::error::{MissingSignals, VerificationError};
use crate::validate;
use vouch_store::{StoreError, VerificationAttestation, VideoRecord, VideoStore};
use vouch_types::{ClientSignals, Relationship, Timestamp, VerificationStatus, VideoId};

/// One verification attempt as the client submits it, plus the signals the
/// collector resolved out-of-band beforehand.
#[derive(Clone, Debug)]
pub struct AttestationRequest {
    /// Client-generated, display-only. Carries no security weight; the
    /// anti-fraud keys are in `signals`.
    pub verifier_id: String,
    pub verifier_name: String,
    pub verifier_email: String,
    pub relationship: Relationship,
    pub message: Option<String>,
    pub signals: ClientSignals,
}

/// Validates, dedups, and appends attestations against an injected store.
pub struct SubmissionHandler<'a, S: VideoStore> {
    store: &'a S,
    params: &'a vouch_types::VerificationParams,
}

impl<'a, S: VideoStore> SubmissionHandler<'a, S> {
    pub fn new(store: &'a S, params: &'a vouch_types::VerificationParams) -> Self {
        Self { store, params }
    }

    /// Submit one attestation attempt for a video.
    ///
    /// Returns the updated record on success; the status flip to verified,
    /// if the threshold is reached, happens in the same store operation
    /// that appends.
    pub fn submit(
        &self,
        video_id: &VideoId,
        request: &AttestationRequest,
        now: Timestamp,
    ) -> Result<VideoRecord, VerificationError> {
        let record = match self.store.get_video(video_id) {
            Ok(record) => record,
            Err(StoreError::NotFound(_)) => {
                return Err(VerificationError::VideoNotFound(video_id.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        if !record.status.accepts_attestations() {
            return Err(if record.status == VerificationStatus::Verified {
                VerificationError::AlreadyVerified(video_id.clone())
            } else {
                VerificationError::Rejected(video_id.clone())
            });
        }

        validate::validate_request(request, self.params)?;

        let (fingerprint, ip) = match (&request.signals.fingerprint, &request.signals.ip) {
            (Some(fingerprint), Some(ip)) => (fingerprint.clone(), ip.clone()),
            (fingerprint, ip) => {
                let missing = MissingSignals::from_presence(fingerprint.is_some(), ip.is_some())
                    .expect("at least one signal is absent in this arm");
                return Err(VerificationError::AntiCheatUnavailable { missing });
            }
        };

        if let Some(hit) = dedup::find_duplicate(&record.attestations, &fingerprint, &ip) {
            warn!(
                video = %video_id,
                reason = %hit.reason,
                verifier = %request.verifier_name,
                "attestation rejected as duplicate"
            );
            return Err(VerificationError::Duplicate(hit));
        }

        let attestation = VerificationAttestation {
            verifier_id: request.verifier_id.clone(),
            verifier_name: request.verifier_name.trim().to_string(),
            verifier_email: request.verifier_email.trim().to_string(),
            relationship: request.relationship,
            verified_at: now,
            message: request.message.clone(),
            fingerprint,
            ip,
            user_agent: request.signals.user_agent.clone().unwrap_or_default(),
        };

        let new_status = consensus::compute_status(
            record.status,
            record.attestation_count() + 1,
            record.threshold,
        );

        let updated = match self.store.append_attestation(
            &record.id,
            record.revision,
            &attestation,
            new_status,
        ) {
            Ok(updated) => updated,
            Err(StoreError::Conflict { expected, actual }) => {
                debug!(video = %video_id, expected, actual, "append lost a revision race");
                return Err(VerificationError::StoreConflict);
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            video = %video_id,
            verifications = updated.attestation_count(),
            threshold = updated.threshold,
            status = ?updated.status,
            "attestation accepted"
        );
        Ok(updated)
    }
}
