use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use shared::models::Voter;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Voter {0} not found")]
    NotFound(u64),
    #[error("Voter {0} already exists")]
    AlreadyExists(u64),
    #[error("Failed to acquire store lock")]
    LockFailed,
    #[error("Storage backend error: {0}")]
    Backend(String),
    #[error("Stored record could not be decoded: {0}")]
    Codec(String),
}

/// Key-value storage for voter records.
///
/// Every call is an independent operation on a single record (or on the whole
/// set for `list` and `clear`); callers that read, modify and write back a
/// record get no isolation from concurrent writers.
#[rocket::async_trait]
pub trait VoterStore: Send + Sync {
    async fn add(&self, voter: Voter) -> Result<(), StoreError>;
    async fn get(&self, id: u64) -> Result<Voter, StoreError>;
    async fn update(&self, voter: Voter) -> Result<(), StoreError>;
    async fn delete(&self, id: u64) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<Voter>, StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

pub type VoterMap = HashMap<u64, Voter>;

#[derive(Debug, Default)]
pub struct MemoryStore {
    voters: Mutex<VoterMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, VoterMap>, StoreError> {
        self.voters.lock().map_err(|e| {
            error!("Failed to acquire voter store lock: {}", e);
            StoreError::LockFailed
        })
    }
}

#[rocket::async_trait]
impl VoterStore for MemoryStore {
    async fn add(&self, voter: Voter) -> Result<(), StoreError> {
        let mut voters = self.lock()?;
        if voters.contains_key(&voter.id) {
            return Err(StoreError::AlreadyExists(voter.id));
        }
        voters.insert(voter.id, voter);
        Ok(())
    }

    async fn get(&self, id: u64) -> Result<Voter, StoreError> {
        self.lock()?
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, voter: Voter) -> Result<(), StoreError> {
        match self.lock()?.get_mut(&voter.id) {
            Some(slot) => {
                *slot = voter;
                Ok(())
            }
            None => Err(StoreError::NotFound(voter.id)),
        }
    }

    async fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.lock()?
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Voter>, StoreError> {
        let mut voters: Vec<Voter> = self.lock()?.values().cloned().collect();
        voters.sort_by_key(|v| v.id);
        Ok(voters)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.lock()?.clear();
        Ok(())
    }
}
