//! Verification consensus and anti-fraud engine.
//!
//! Athletes upload talent videos; anonymous third parties attest to their
//! authenticity. This crate decides whether an attestation attempt is
//! accepted and deterministically computes a video's trust status from the
//! accumulated attestations:
//!
//! 1. **Submission handling**: ordered validation of one attestation
//!    attempt (identity signals present, fields well-formed).
//! 2. **Sybil dedup**: a new attestation must not share a device
//!    fingerprint *or* an IP address with any prior attestation on the same
//!    video. Either signal alone is weak; uniqueness on both dimensions is
//!    the defense.
//! 3. **Threshold consensus**: a pending video flips to verified once its
//!    attestation count reaches the threshold fixed at upload.
//!
//! Persistence is injected via the `vouch-store` traits; the append runs as
//! an atomic conditional write so concurrent colliding submissions can
//! never both land.

pub mod collector;
pub mod consensus;
pub mod dedup;
pub mod error;
pub mod handler;
pub mod link;
pub mod validate;

pub use collector::{IpProvider, IpProviderChain, SignalCollector};
pub use consensus::VerificationProgress;
pub use dedup::{DuplicateMatch, DuplicateReason};
pub use error::{MissingSignals, VerificationError};
pub use handler::{AttestationRequest, SubmissionHandler};
pub use validate::ValidationFault;
