use std::sync::Arc;

use super::config::{TrustPolicyConfig, MAX_REVIEW_RATING, MIN_REVIEW_RATING};
use super::domain::{ParticipantRole, ReputationBucket, Review, UserId, UserTrustProfile};
use super::store::{ReputationStore, ReviewKey, StoreError};

/// Validation errors raised before any aggregate is touched.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("rating must be between 1 and 5, got {rating}")]
    RatingOutOfRange { rating: u8 },
    #[error("review content must be between {min} and {max} characters, got {length}")]
    ContentLength {
        length: usize,
        min: usize,
        max: usize,
    },
    #[error("members cannot review themselves")]
    SelfReview,
    #[error("a review by this author for this member and session already exists")]
    DuplicateReview,
}

/// Error raised by the reputation ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ReviewValidationError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        // A conflict inside the atomic region means the (author, target,
        // session) key was already folded in.
        match err {
            StoreError::Conflict => LedgerError::Validation(ReviewValidationError::DuplicateReview),
            other => LedgerError::Store(other),
        }
    }
}

/// Ledger guarding the per-member reputation aggregates. All mutation runs
/// inside the store's per-target region, so concurrent reviews for the same
/// member serialize while different members proceed in parallel.
pub struct ReputationLedger<S> {
    store: Arc<S>,
    min_content_chars: usize,
    max_content_chars: usize,
}

impl<S> ReputationLedger<S>
where
    S: ReputationStore + 'static,
{
    pub fn new(store: Arc<S>, config: &TrustPolicyConfig) -> Self {
        Self {
            store,
            min_content_chars: config.min_review_chars,
            max_content_chars: config.max_review_chars,
        }
    }

    /// Fold an accepted review into the target's record, returning the
    /// target's refreshed profile. Duplicate submissions are rejected and
    /// leave the aggregates untouched.
    pub fn submit_review(&self, review: &Review) -> Result<UserTrustProfile, LedgerError> {
        self.validate(review)?;

        let key = ReviewKey {
            author_id: review.author_id.clone(),
            session_id: review.session_id.clone(),
        };
        let bucket = ReputationBucket::for_review(review.is_host_review);
        let rating = review.rating;

        let record = self.store.update(&review.target_id, &mut |record| {
            if record.received_reviews.contains(&key) {
                return Err(StoreError::Conflict);
            }
            record.received_reviews.insert(key.clone());
            record.ratings_mut(bucket).fold(rating);
            Ok(())
        })?;

        Ok(record.to_profile())
    }

    /// Bump the member's join or host counter after a completed session.
    pub fn record_participation(
        &self,
        user: &UserId,
        role: ParticipantRole,
    ) -> Result<UserTrustProfile, LedgerError> {
        let record = self.store.update(user, &mut |record| {
            match role {
                ParticipantRole::Host => record.sessions_hosted += 1,
                ParticipantRole::Player => record.sessions_joined += 1,
            }
            Ok(())
        })?;

        Ok(record.to_profile())
    }

    pub fn profile(&self, user: &UserId) -> Result<Option<UserTrustProfile>, LedgerError> {
        Ok(self.store.fetch(user)?.map(|record| record.to_profile()))
    }

    fn validate(&self, review: &Review) -> Result<(), ReviewValidationError> {
        if !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&review.rating) {
            return Err(ReviewValidationError::RatingOutOfRange {
                rating: review.rating,
            });
        }

        let length = review.content.chars().count();
        if length < self.min_content_chars || length > self.max_content_chars {
            return Err(ReviewValidationError::ContentLength {
                length,
                min: self.min_content_chars,
                max: self.max_content_chars,
            });
        }

        if review.author_id == review.target_id {
            return Err(ReviewValidationError::SelfReview);
        }

        Ok(())
    }
}
