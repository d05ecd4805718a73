//! Abstract storage traits for the Vouch verification engine.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The engine depends only on the traits, so the consensus and
//! anti-fraud logic stays unit-testable without infrastructure.

pub mod error;
pub mod video;

pub use error::StoreError;
pub use video::{VerificationAttestation, VideoRecord, VideoStore};
