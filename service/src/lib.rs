//! Service-level wiring for the Vouch verification engine.
//!
//! The host application embeds [`VerificationService`] with whatever store
//! backend it runs (LMDB in production, the nullable store in tests), a
//! [`ServiceConfig`] loaded from TOML, and [`init_logging`] called once at
//! startup.

pub mod config;
pub mod logging;
pub mod service;

pub use config::{ConfigError, ServiceConfig};
pub use logging::{init_logging, LogFormat};
pub use service::VerificationService;
