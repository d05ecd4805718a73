//! LMDB storage backend for the Vouch engine.
//!
//! Implements the storage traits from `vouch-store` using the `heed` LMDB
//! bindings. LMDB's single-writer transactions give the serialization the
//! engine's read-check-write append requires: every conditional write runs
//! inside one `write_txn`.

pub mod environment;
pub mod error;
pub mod video;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use video::LmdbVideoStore;
