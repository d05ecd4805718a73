use crate::dedup::DuplicateMatch;
use crate::validate::ValidationFault;
use std::fmt;
use thiserror::Error;
use vouch_store::StoreError;
use vouch_types::VideoId;

/// Which anti-fraud signals the collector failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingSignals {
    Fingerprint,
    Ip,
    Both,
}

impl MissingSignals {
    pub fn from_presence(has_fingerprint: bool, has_ip: bool) -> Option<Self> {
        match (has_fingerprint, has_ip) {
            (true, true) => None,
            (false, true) => Some(Self::Fingerprint),
            (true, false) => Some(Self::Ip),
            (false, false) => Some(Self::Both),
        }
    }
}

impl fmt::Display for MissingSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fingerprint => "device fingerprint",
            Self::Ip => "ip address",
            Self::Both => "device fingerprint and ip address",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("video {0} not found")]
    VideoNotFound(VideoId),

    #[error("invalid submission: {0}")]
    Validation(ValidationFault),

    /// Retryable: the client should re-acquire its signals and resubmit.
    #[error("anti-cheat signals unavailable ({missing}); re-acquire and retry")]
    AntiCheatUnavailable { missing: MissingSignals },

    /// Terminal for this attempt.
    #[error("{0}")]
    Duplicate(DuplicateMatch),

    #[error("video {0} is already verified; no further attestations accepted")]
    AlreadyVerified(VideoId),

    #[error("video {0} was rejected by moderation")]
    Rejected(VideoId),

    /// Lost a concurrency race; resubmit the identical validated candidate.
    #[error("submission lost a concurrent-write race; try again")]
    StoreConflict,

    #[error("storage failure: {0}")]
    Infrastructure(StoreError),
}

impl From<StoreError> for VerificationError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict { .. } => VerificationError::StoreConflict,
            other => VerificationError::Infrastructure(other),
        }
    }
}

impl From<ValidationFault> for VerificationError {
    fn from(fault: ValidationFault) -> Self {
        VerificationError::Validation(fault)
    }
}
