//! Client identity signals used by the anti-fraud dedup check.
//!
//! A device fingerprint and an IP address are each weak and spoofable on
//! their own; the engine requires uniqueness on both dimensions
//! independently. A signal the client could not resolve is `None` — never
//! an empty string, which would collide across every anonymous submission
//! and quietly defeat the dedup check.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignalError {
    #[error("identity signal must not be empty")]
    Empty,
}

/// Stable, opaque hash derived from client/device characteristics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceFingerprint(String);

impl DeviceFingerprint {
    /// An empty fingerprint is refused; represent "unavailable" with `None`.
    pub fn new(raw: impl Into<String>) -> Result<Self, SignalError> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(SignalError::Empty);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Best-effort client IP address, resolved out-of-band by the collector.
/// Stored as the provider-reported string; the engine only ever compares
/// for exact equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientIp(String);

impl ClientIp {
    pub fn new(raw: impl Into<String>) -> Result<Self, SignalError> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(SignalError::Empty);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the fingerprint collector managed to resolve for one submission.
///
/// Acquisition runs before the submission handler; the handler rejects a
/// submission whose signals are incomplete rather than resolving them
/// itself mid-transaction.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClientSignals {
    pub fingerprint: Option<DeviceFingerprint>,
    pub ip: Option<ClientIp>,
    pub user_agent: Option<String>,
}

impl ClientSignals {
    /// Both anti-fraud keys resolved.
    pub fn is_complete(&self) -> bool {
        self.fingerprint.is_some() && self.ip.is_some()
    }
}
