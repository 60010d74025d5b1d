use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};

use super::domain::{RatingAggregate, ReputationBucket, SessionId, UserId, UserTrustProfile};

/// Uniqueness key for a review received by one target: the same author may
/// review the same target once per session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewKey {
    pub author_id: UserId,
    pub session_id: SessionId,
}

/// Authoritative per-member aggregate owned by the reputation ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTrustRecord {
    pub user_id: UserId,
    pub sessions_joined: u32,
    pub sessions_hosted: u32,
    pub host_ratings: RatingAggregate,
    pub player_ratings: RatingAggregate,
    pub received_reviews: HashSet<ReviewKey>,
}

impl UserTrustRecord {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            sessions_joined: 0,
            sessions_hosted: 0,
            host_ratings: RatingAggregate::default(),
            player_ratings: RatingAggregate::default(),
            received_reviews: HashSet::new(),
        }
    }

    pub fn ratings(&self, bucket: ReputationBucket) -> &RatingAggregate {
        match bucket {
            ReputationBucket::Host => &self.host_ratings,
            ReputationBucket::Player => &self.player_ratings,
        }
    }

    pub fn ratings_mut(&mut self, bucket: ReputationBucket) -> &mut RatingAggregate {
        match bucket {
            ReputationBucket::Host => &mut self.host_ratings,
            ReputationBucket::Player => &mut self.player_ratings,
        }
    }

    pub fn to_profile(&self) -> UserTrustProfile {
        UserTrustProfile {
            user_id: self.user_id.clone(),
            sessions_joined: i64::from(self.sessions_joined),
            sessions_hosted: i64::from(self.sessions_hosted),
            host_reputation: self.host_ratings.mean(),
            player_reputation: self.player_ratings.mean(),
            host_review_count: self.host_ratings.count,
            player_review_count: self.player_ratings.count,
        }
    }
}

/// Storage abstraction so the ledger can be exercised in isolation.
///
/// `update` must run `mutate` with exclusive access to one member's record;
/// updates for different members must not contend with each other.
pub trait ReputationStore: Send + Sync {
    /// Apply `mutate` to the member's record, creating an empty record on
    /// first touch. Returns the committed record; if `mutate` errors, the
    /// stored record is left exactly as it was.
    fn update(
        &self,
        user: &UserId,
        mutate: &mut dyn FnMut(&mut UserTrustRecord) -> Result<(), StoreError>,
    ) -> Result<UserTrustRecord, StoreError>;

    /// Point-in-time copy of the member's record, if the member has history.
    fn fetch(&self, user: &UserId) -> Result<Option<UserTrustRecord>, StoreError>;
}

/// Error enumeration for reputation store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already holds this contribution")]
    Conflict,
    #[error("reputation store poisoned by a failed writer")]
    Poisoned,
    #[error("reputation store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store keeping one lock per member so writers for different
/// targets proceed in parallel. The outer map lock is held only long enough
/// to look up or insert a member's cell.
#[derive(Default, Clone)]
pub struct InMemoryReputationStore {
    records: Arc<RwLock<HashMap<UserId, Arc<Mutex<UserTrustRecord>>>>>,
}

impl InMemoryReputationStore {
    fn cell(&self, user: &UserId) -> Result<Arc<Mutex<UserTrustRecord>>, StoreError> {
        {
            let map = self.records.read().map_err(|_| StoreError::Poisoned)?;
            if let Some(cell) = map.get(user) {
                return Ok(Arc::clone(cell));
            }
        }

        let mut map = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let cell = map
            .entry(user.clone())
            .or_insert_with(|| Arc::new(Mutex::new(UserTrustRecord::new(user.clone()))));
        Ok(Arc::clone(cell))
    }
}

impl ReputationStore for InMemoryReputationStore {
    fn update(
        &self,
        user: &UserId,
        mutate: &mut dyn FnMut(&mut UserTrustRecord) -> Result<(), StoreError>,
    ) -> Result<UserTrustRecord, StoreError> {
        let cell = self.cell(user)?;
        let mut record = cell.lock().map_err(|_| StoreError::Poisoned)?;

        // Mutate a scratch copy so a failed closure commits nothing.
        let mut staged = record.clone();
        mutate(&mut staged)?;
        *record = staged.clone();

        Ok(staged)
    }

    fn fetch(&self, user: &UserId) -> Result<Option<UserTrustRecord>, StoreError> {
        let cell = {
            let map = self.records.read().map_err(|_| StoreError::Poisoned)?;
            map.get(user).cloned()
        };

        match cell {
            Some(cell) => {
                let record = cell.lock().map_err(|_| StoreError::Poisoned)?;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }
}
