//! Community trust and session-lifecycle policy.
//!
//! Covers late-cancellation penalties, the session-count gate that protects
//! hosting, review validation with per-role reputation aggregation, and
//! content integrity checks for cross-channel duplicates and spoilers.

pub mod cancellation;
pub mod config;
pub mod domain;
pub mod eligibility;
pub mod history;
pub mod integrity;
pub mod reputation;
pub mod router;
pub mod service;
pub mod similarity;
pub mod spoiler;
pub mod store;

#[cfg(test)]
mod tests;

pub use cancellation::{
    CancellationPolicyEvaluator, PenaltyKind, PolicyDecision, PolicyExplanation,
};
pub use config::TrustPolicyConfig;
pub use domain::{
    ChannelId, ExperienceLevel, MessageDraft, ParticipantRole, PolicyInputError, RatingAggregate,
    ReputationBucket, Review, ReviewId, ReviewSubmission, RsvpRecord, RsvpState, SessionId,
    SessionSnapshot, SessionStatus, UserId, UserTrustProfile,
};
pub use eligibility::{EligibilityResult, HostEligibilityGate};
pub use history::{HistoryImportError, MessageHistoryImporter};
pub use integrity::{ContentIntegrityService, DuplicateFlag, IntegrityFlags};
pub use reputation::{LedgerError, ReputationLedger, ReviewValidationError};
pub use router::{trust_router, ReviewSubmissionView, TrustProfileView};
pub use service::{ReviewReceipt, TrustPolicyService, TrustServiceError};
pub use store::{InMemoryReputationStore, ReputationStore, ReviewKey, StoreError, UserTrustRecord};
