//! Fingerprint collector boundary.
//!
//! The engine never resolves identity signals itself; a collector runs on
//! the client edge *before* the submission handler and hands over whatever
//! it managed to acquire. Partial failure is expressed as `None` fields in
//! `ClientSignals` — the handler turns that into a retryable
//! `AntiCheatUnavailable`, never into an empty identifier.

use tracing::trace;
use vouch_types::{ClientIp, ClientSignals};

/// Resolves the identity signals for one submission attempt.
pub trait SignalCollector {
    fn acquire(&self) -> ClientSignals;
}

/// One best-effort source of the client's public IP.
pub trait IpProvider {
    /// A short label for logging.
    fn name(&self) -> &str;

    fn resolve(&self) -> Option<ClientIp>;
}

/// Closures work as providers in tests and simple deployments.
impl<F> IpProvider for F
where
    F: Fn() -> Option<ClientIp>,
{
    fn name(&self) -> &str {
        "closure"
    }

    fn resolve(&self) -> Option<ClientIp> {
        self()
    }
}

/// Fallback chain over IP providers: tries each in order and returns the
/// first answer. The chain itself does no network work; providers do.
pub struct IpProviderChain {
    providers: Vec<Box<dyn IpProvider + Send + Sync>>,
}

impl IpProviderChain {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn with(mut self, provider: impl IpProvider + Send + Sync + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// First successful provider wins; `None` when every provider failed.
    pub fn resolve(&self) -> Option<ClientIp> {
        for provider in &self.providers {
            match provider.resolve() {
                Some(ip) => {
                    trace!(provider = provider.name(), "resolved client ip");
                    return Some(ip);
                }
                None => {
                    trace!(provider = provider.name(), "ip provider failed, falling back");
                }
            }
        }
        None
    }
}

impl Default for IpProviderChain {
    fn default() -> Self {
        Self::new()
    }
}
