//! LMDB implementation of `VideoStore`.
//!
//! One `videos` database: video-id bytes → bincode-encoded `VideoRecord`.
//! Every conditional write (append, status change, view-count bump) runs
//! read-check-write inside a single write transaction; LMDB's single-writer
//! rule serializes them per environment, which satisfies the per-video
//! serialization the store contract requires.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, RwTxn};
use tracing::{debug, trace};

use vouch_store::video::status_transition_allowed;
use vouch_store::{StoreError, VerificationAttestation, VideoRecord, VideoStore};
use vouch_types::{VerificationStatus, VideoId};

use crate::LmdbError;

pub struct LmdbVideoStore {
    pub(crate) env: Arc<Env>,
    pub(crate) videos_db: Database<Bytes, Bytes>,
}

fn encode(record: &VideoRecord) -> Result<Vec<u8>, LmdbError> {
    bincode::serialize(record).map_err(|e| LmdbError::Serialization(e.to_string()))
}

fn decode(bytes: &[u8], id: &VideoId) -> Result<VideoRecord, LmdbError> {
    bincode::deserialize(bytes)
        .map_err(|e| LmdbError::Serialization(format!("video {id}: {e}")))
}

impl LmdbVideoStore {
    fn read_in_txn(&self, wtxn: &RwTxn<'_>, id: &VideoId) -> Result<VideoRecord, LmdbError> {
        let bytes = self
            .videos_db
            .get(wtxn, id.as_str().as_bytes())?
            .ok_or_else(|| LmdbError::NotFound(id.to_string()))?;
        decode(bytes, id)
    }

    fn write_in_txn(
        &self,
        wtxn: &mut RwTxn<'_>,
        record: &VideoRecord,
    ) -> Result<(), LmdbError> {
        let bytes = encode(record)?;
        self.videos_db
            .put(wtxn, record.id.as_str().as_bytes(), &bytes)?;
        Ok(())
    }
}

impl VideoStore for LmdbVideoStore {
    fn get_video(&self, id: &VideoId) -> Result<VideoRecord, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .videos_db
            .get(&rtxn, id.as_str().as_bytes())
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(id.to_string()))?;
        Ok(decode(bytes, id)?)
    }

    fn put_video(&self, record: &VideoRecord) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut stored = record.clone();
        if let Ok(existing) = self.read_in_txn(&wtxn, &record.id) {
            stored.revision = existing.revision + 1;
        }
        self.write_in_txn(&mut wtxn, &stored)?;
        wtxn.commit().map_err(LmdbError::from)?;
        trace!(video = %record.id, revision = stored.revision, "put video record");
        Ok(())
    }

    fn append_attestation(
        &self,
        id: &VideoId,
        expected_revision: u64,
        attestation: &VerificationAttestation,
        new_status: VerificationStatus,
    ) -> Result<VideoRecord, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut record = self.read_in_txn(&wtxn, id)?;

        if record.revision != expected_revision {
            debug!(
                video = %id,
                expected = expected_revision,
                actual = record.revision,
                "attestation append lost a revision race"
            );
            return Err(StoreError::Conflict {
                expected: expected_revision,
                actual: record.revision,
            });
        }
        if !status_transition_allowed(record.status, new_status) {
            return Err(StoreError::Corruption(format!(
                "video {id}: illegal status transition {:?} -> {:?}",
                record.status, new_status
            )));
        }

        record.attestations.push(attestation.clone());
        record.status = new_status;
        record.revision += 1;
        self.write_in_txn(&mut wtxn, &record)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(record)
    }

    fn set_status(
        &self,
        id: &VideoId,
        status: VerificationStatus,
    ) -> Result<VideoRecord, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut record = self.read_in_txn(&wtxn, id)?;

        if !status_transition_allowed(record.status, status) {
            return Err(StoreError::Corruption(format!(
                "video {id}: illegal status transition {:?} -> {:?}",
                record.status, status
            )));
        }
        if record.status != status {
            record.status = status;
            record.revision += 1;
            self.write_in_txn(&mut wtxn, &record)?;
            wtxn.commit().map_err(LmdbError::from)?;
        }
        Ok(record)
    }

    fn increment_view_count(&self, id: &VideoId) -> Result<u64, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let mut record = self.read_in_txn(&wtxn, id)?;

        // View counts are commutative with verification writes, so this
        // does not bump the revision — an in-flight attestation append must
        // not be conflicted away by a viewer.
        record.view_count += 1;
        let count = record.view_count;
        self.write_in_txn(&mut wtxn, &record)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(count)
    }
}
