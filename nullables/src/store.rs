//! Nullable store — thread-safe in-memory video storage for testing.
//!
//! Implements the same conditional-write semantics as the LMDB backend
//! (revision compare-and-swap under one lock), so concurrency scenarios can
//! be exercised without a real database.

use std::collections::HashMap;
use std::sync::Mutex;

use vouch_store::video::status_transition_allowed;
use vouch_store::{StoreError, VerificationAttestation, VideoRecord, VideoStore};
use vouch_types::{VerificationStatus, VideoId};

/// An in-memory video store for testing.
/// Thread-safe; the single mutex plays the role of LMDB's write lock.
pub struct NullVideoStore {
    videos: Mutex<HashMap<String, VideoRecord>>,
}

impl NullVideoStore {
    pub fn new() -> Self {
        Self {
            videos: Mutex::new(HashMap::new()),
        }
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.videos.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NullVideoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoStore for NullVideoStore {
    fn get_video(&self, id: &VideoId) -> Result<VideoRecord, StoreError> {
        self.videos
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn put_video(&self, record: &VideoRecord) -> Result<(), StoreError> {
        let mut videos = self.videos.lock().unwrap();
        let mut stored = record.clone();
        if let Some(existing) = videos.get(record.id.as_str()) {
            stored.revision = existing.revision + 1;
        }
        videos.insert(record.id.to_string(), stored);
        Ok(())
    }

    fn append_attestation(
        &self,
        id: &VideoId,
        expected_revision: u64,
        attestation: &VerificationAttestation,
        new_status: VerificationStatus,
    ) -> Result<VideoRecord, StoreError> {
        let mut videos = self.videos.lock().unwrap();
        let record = videos
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if record.revision != expected_revision {
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
        Ok(record.clone())
    }

    fn set_status(
        &self,
        id: &VideoId,
        status: VerificationStatus,
    ) -> Result<VideoRecord, StoreError> {
        let mut videos = self.videos.lock().unwrap();
        let record = videos
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if !status_transition_allowed(record.status, status) {
            return Err(StoreError::Corruption(format!(
                "video {id}: illegal status transition {:?} -> {:?}",
                record.status, status
            )));
        }
        if record.status != status {
            record.status = status;
            record.revision += 1;
        }
        Ok(record.clone())
    }

    fn increment_view_count(&self, id: &VideoId) -> Result<u64, StoreError> {
        let mut videos = self.videos.lock().unwrap();
        let record = videos
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // Commutative with verification writes; does not bump the revision.
        record.view_count += 1;
        Ok(record.view_count)
    }
}
