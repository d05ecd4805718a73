//! Fundamental types for the Vouch verification engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: ids, timestamps, identity signals, status enums, and engine
//! parameters.

pub mod id;
pub mod params;
pub mod signals;
pub mod status;
pub mod time;

pub use id::{UserId, VideoId};
pub use params::VerificationParams;
pub use signals::{ClientIp, ClientSignals, DeviceFingerprint, SignalError};
pub use status::{Relationship, VerificationStatus};
pub use time::Timestamp;
