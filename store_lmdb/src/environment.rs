//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use tracing::info;

use crate::video::LmdbVideoStore;
use crate::LmdbError;

/// Default map size: 1 GiB. Records are small; this is headroom, not usage.
pub const DEFAULT_MAP_SIZE: usize = 1024 * 1024 * 1024;

const MAX_DBS: u32 = 4;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    videos_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)
            .map_err(|e| LmdbError::Heed(format!("create data dir {}: {e}", path.display())))?;

        // Safety: the path is not opened by another process in this
        // program; heed requires the caller to uphold LMDB's single-open
        // constraint.
        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(MAX_DBS)
                .map_size(map_size)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let videos_db = env.create_database(&mut wtxn, Some("videos"))?;
        wtxn.commit()?;

        info!(path = %path.display(), "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            videos_db,
        })
    }

    /// A video store handle backed by this environment.
    pub fn video_store(&self) -> LmdbVideoStore {
        LmdbVideoStore {
            env: Arc::clone(&self.env),
            videos_db: self.videos_db,
        }
    }
}
