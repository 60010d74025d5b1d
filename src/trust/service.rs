//! Orchestrates the policy engines behind one service surface.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::cancellation::{CancellationPolicyEvaluator, PolicyDecision};
use super::config::TrustPolicyConfig;
use super::domain::{
    MessageDraft, ParticipantRole, PolicyInputError, Review, ReviewId, ReviewSubmission,
    SessionSnapshot, UserId, UserTrustProfile,
};
use super::eligibility::{EligibilityResult, HostEligibilityGate};
use super::integrity::{ContentIntegrityService, IntegrityFlags};
use super::reputation::{LedgerError, ReputationLedger, ReviewValidationError};
use super::store::{ReputationStore, StoreError};
use super::{similarity, spoiler};

static REVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_review_id() -> ReviewId {
    let id = REVIEW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReviewId(format!("rev-{id:06}"))
}

/// Failures surfaced by the service entry points.
#[derive(Debug, thiserror::Error)]
pub enum TrustServiceError {
    #[error(transparent)]
    Input(#[from] PolicyInputError),
    #[error(transparent)]
    Validation(ReviewValidationError),
    #[error(transparent)]
    Store(StoreError),
}

impl From<LedgerError> for TrustServiceError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::Validation(validation) => Self::Validation(validation),
            LedgerError::Store(store) => Self::Store(store),
        }
    }
}

/// Outcome of an accepted review: the stored review plus the target's
/// refreshed trust profile.
#[derive(Debug, Clone)]
pub struct ReviewReceipt {
    pub review: Review,
    pub target_profile: UserTrustProfile,
}

/// Single entry point over cancellation, eligibility, reputation, and
/// content-integrity policy.
pub struct TrustPolicyService<S: ReputationStore + 'static> {
    cancellation: CancellationPolicyEvaluator,
    eligibility: HostEligibilityGate,
    ledger: ReputationLedger<S>,
    integrity: ContentIntegrityService,
    config: TrustPolicyConfig,
}

impl<S: ReputationStore + 'static> TrustPolicyService<S> {
    pub fn new(store: Arc<S>, config: TrustPolicyConfig) -> Self {
        Self {
            cancellation: CancellationPolicyEvaluator::new(&config),
            eligibility: HostEligibilityGate::from_config(&config),
            ledger: ReputationLedger::new(store, &config),
            integrity: ContentIntegrityService::new(&config),
            config,
        }
    }

    pub fn policy(&self) -> &TrustPolicyConfig {
        &self.config
    }

    pub fn evaluate_cancellation(
        &self,
        session: &SessionSnapshot,
        role: ParticipantRole,
        now: DateTime<Utc>,
    ) -> Result<PolicyDecision, TrustServiceError> {
        Ok(self.cancellation.evaluate(session, role, now)?)
    }

    pub fn evaluate_host_eligibility(
        &self,
        profile: &UserTrustProfile,
    ) -> Result<EligibilityResult, TrustServiceError> {
        Ok(self.eligibility.evaluate_profile(profile)?)
    }

    /// Eligibility for a stored user. Users the ledger has never seen are
    /// treated as having an empty history rather than rejected.
    pub fn host_eligibility_for(
        &self,
        user: &UserId,
    ) -> Result<EligibilityResult, TrustServiceError> {
        let profile = self
            .ledger
            .profile(user)?
            .unwrap_or_else(|| UserTrustProfile::empty(user.clone()));
        Ok(self.eligibility.evaluate_profile(&profile)?)
    }

    pub fn submit_review(
        &self,
        submission: ReviewSubmission,
    ) -> Result<ReviewReceipt, TrustServiceError> {
        let review = Review {
            review_id: next_review_id(),
            session_id: submission.session_id,
            author_id: submission.author_id,
            target_id: submission.target_id,
            rating: submission.rating,
            content: submission.content,
            is_host_review: submission.is_host_review,
            created_at: Utc::now(),
        };

        let target_profile = self.ledger.submit_review(&review)?;
        Ok(ReviewReceipt {
            review,
            target_profile,
        })
    }

    pub fn record_participation(
        &self,
        user: &UserId,
        role: ParticipantRole,
    ) -> Result<UserTrustProfile, TrustServiceError> {
        Ok(self.ledger.record_participation(user, role)?)
    }

    pub fn profile(&self, user: &UserId) -> Result<Option<UserTrustProfile>, TrustServiceError> {
        Ok(self.ledger.profile(user)?)
    }

    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        similarity::score(a, b)
    }

    pub fn classify_spoiler(&self, text: &str) -> bool {
        spoiler::classify(text)
    }

    pub fn check_message(
        &self,
        draft: &MessageDraft,
        recent_messages: &[MessageDraft],
    ) -> IntegrityFlags {
        self.integrity.evaluate(draft, recent_messages)
    }
}
