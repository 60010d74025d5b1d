use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    MessageDraft, ParticipantRole, ReviewId, ReviewSubmission, SessionSnapshot, UserId,
    UserTrustProfile,
};
use super::eligibility::EligibilityResult;
use super::reputation::ReviewValidationError;
use super::service::{ReviewReceipt, TrustPolicyService, TrustServiceError};
use super::store::ReputationStore;

/// Router builder exposing HTTP endpoints for the trust policy engine.
pub fn trust_router<S>(service: Arc<TrustPolicyService<S>>) -> Router
where
    S: ReputationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/trust/cancellation",
            post(cancellation_handler::<S>),
        )
        .route("/api/v1/trust/eligibility", post(eligibility_handler::<S>))
        .route("/api/v1/trust/reviews", post(submit_review_handler::<S>))
        .route(
            "/api/v1/trust/participation",
            post(participation_handler::<S>),
        )
        .route("/api/v1/trust/profiles/:user_id", get(profile_handler::<S>))
        .route(
            "/api/v1/trust/messages/check",
            post(message_check_handler::<S>),
        )
        .route("/api/v1/trust/similarity", post(similarity_handler::<S>))
        .route("/api/v1/trust/spoiler", post(spoiler_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CancellationCheckRequest {
    pub(crate) session: SessionSnapshot,
    pub(crate) role: ParticipantRole,
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParticipationRequest {
    pub(crate) user_id: UserId,
    pub(crate) role: ParticipantRole,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageCheckRequest {
    pub(crate) draft: MessageDraft,
    #[serde(default)]
    pub(crate) recent_messages: Vec<MessageDraft>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SimilarityRequest {
    pub(crate) left: String,
    pub(crate) right: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpoilerCheckRequest {
    pub(crate) content: String,
}

/// Profile as returned over the wire, with reputations rounded for display
/// and the hosting gate evaluated against the stored history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustProfileView {
    pub user_id: UserId,
    pub sessions_joined: i64,
    pub sessions_hosted: i64,
    pub host_reputation: Option<f64>,
    pub player_reputation: Option<f64>,
    pub host_review_count: u32,
    pub player_review_count: u32,
    pub host_eligibility: EligibilityResult,
}

impl TrustProfileView {
    fn new(profile: &UserTrustProfile, host_eligibility: EligibilityResult) -> Self {
        Self {
            user_id: profile.user_id.clone(),
            sessions_joined: profile.sessions_joined,
            sessions_hosted: profile.sessions_hosted,
            host_reputation: profile.display_host_reputation(),
            player_reputation: profile.display_player_reputation(),
            host_review_count: profile.host_review_count,
            player_review_count: profile.player_review_count,
            host_eligibility,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSubmissionView {
    pub review_id: ReviewId,
    pub target_id: UserId,
    pub target_profile: TrustProfileView,
}

fn profile_view<S>(
    service: &TrustPolicyService<S>,
    profile: UserTrustProfile,
) -> Result<TrustProfileView, TrustServiceError>
where
    S: ReputationStore + 'static,
{
    let eligibility = service.evaluate_host_eligibility(&profile)?;
    Ok(TrustProfileView::new(&profile, eligibility))
}

pub(crate) async fn cancellation_handler<S>(
    State(service): State<Arc<TrustPolicyService<S>>>,
    axum::Json(request): axum::Json<CancellationCheckRequest>,
) -> Response
where
    S: ReputationStore + 'static,
{
    let now = request.now.unwrap_or_else(Utc::now);
    match service.evaluate_cancellation(&request.session, request.role, now) {
        Ok(decision) => (StatusCode::OK, axum::Json(decision)).into_response(),
        Err(TrustServiceError::Input(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn eligibility_handler<S>(
    State(service): State<Arc<TrustPolicyService<S>>>,
    axum::Json(profile): axum::Json<UserTrustProfile>,
) -> Response
where
    S: ReputationStore + 'static,
{
    match service.evaluate_host_eligibility(&profile) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(TrustServiceError::Input(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submit_review_handler<S>(
    State(service): State<Arc<TrustPolicyService<S>>>,
    axum::Json(submission): axum::Json<ReviewSubmission>,
) -> Response
where
    S: ReputationStore + 'static,
{
    let outcome = service.submit_review(submission).and_then(|receipt| {
        let ReviewReceipt {
            review,
            target_profile,
        } = receipt;
        let target_profile = profile_view(service.as_ref(), target_profile)?;
        Ok(ReviewSubmissionView {
            review_id: review.review_id,
            target_id: review.target_id,
            target_profile,
        })
    });

    match outcome {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(TrustServiceError::Validation(ReviewValidationError::DuplicateReview)) => {
            let payload = json!({
                "error": "review already exists for this member and session",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(TrustServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn participation_handler<S>(
    State(service): State<Arc<TrustPolicyService<S>>>,
    axum::Json(request): axum::Json<ParticipationRequest>,
) -> Response
where
    S: ReputationStore + 'static,
{
    let outcome = service
        .record_participation(&request.user_id, request.role)
        .and_then(|profile| profile_view(service.as_ref(), profile));

    match outcome {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn profile_handler<S>(
    State(service): State<Arc<TrustPolicyService<S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: ReputationStore + 'static,
{
    let user = UserId(user_id);
    let outcome = service.profile(&user).and_then(|stored| {
        let profile = stored.unwrap_or_else(|| UserTrustProfile::empty(user.clone()));
        profile_view(service.as_ref(), profile)
    });

    match outcome {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn message_check_handler<S>(
    State(service): State<Arc<TrustPolicyService<S>>>,
    axum::Json(request): axum::Json<MessageCheckRequest>,
) -> Response
where
    S: ReputationStore + 'static,
{
    let flags = service.check_message(&request.draft, &request.recent_messages);
    (StatusCode::OK, axum::Json(flags)).into_response()
}

pub(crate) async fn similarity_handler<S>(
    State(service): State<Arc<TrustPolicyService<S>>>,
    axum::Json(request): axum::Json<SimilarityRequest>,
) -> Response
where
    S: ReputationStore + 'static,
{
    let score = service.similarity(&request.left, &request.right);
    let payload = json!({
        "score": score,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn spoiler_handler<S>(
    State(service): State<Arc<TrustPolicyService<S>>>,
    axum::Json(request): axum::Json<SpoilerCheckRequest>,
) -> Response
where
    S: ReputationStore + 'static,
{
    let spoiler = service.classify_spoiler(&request.content);
    let payload = json!({
        "spoiler": spoiler,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
