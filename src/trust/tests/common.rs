use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::trust::config::TrustPolicyConfig;
use crate::trust::domain::{
    ChannelId, ExperienceLevel, MessageDraft, ReviewSubmission, SessionId, SessionSnapshot,
    SessionStatus, UserId,
};
use crate::trust::store::{InMemoryReputationStore, ReputationStore, StoreError, UserTrustRecord};
use crate::trust::{trust_router, TrustPolicyService};

pub(super) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 18, 19, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn session(start: Option<DateTime<Utc>>) -> SessionSnapshot {
    SessionSnapshot {
        session_id: SessionId("ses-000101".to_string()),
        host_id: UserId("gm-hollis".to_string()),
        start_time: start,
        end_time: start.map(|instant| instant + Duration::hours(4)),
        min_players: 3,
        max_players: 6,
        experience_level: ExperienceLevel::Open,
        status: SessionStatus::Scheduled,
    }
}

pub(super) fn scheduled_session() -> SessionSnapshot {
    session(Some(start_time()))
}

pub(super) fn review_submission() -> ReviewSubmission {
    ReviewSubmission {
        session_id: SessionId("ses-000101".to_string()),
        author_id: UserId("player-ines".to_string()),
        target_id: UserId("gm-hollis".to_string()),
        rating: 4,
        content: "Great pacing and a fair ruling on the contested flank.".to_string(),
        is_host_review: true,
    }
}

pub(super) fn draft(author: &str, channel: &str, content: &str) -> MessageDraft {
    MessageDraft {
        author_id: UserId(author.to_string()),
        channel_id: ChannelId(channel.to_string()),
        content: content.to_string(),
        sent_at: start_time(),
    }
}

pub(super) fn trust_config() -> TrustPolicyConfig {
    TrustPolicyConfig::default()
}

pub(super) fn build_service() -> (
    TrustPolicyService<InMemoryReputationStore>,
    Arc<InMemoryReputationStore>,
) {
    let store = Arc::new(InMemoryReputationStore::default());
    let service = TrustPolicyService::new(store.clone(), trust_config());
    (service, store)
}

pub(super) struct UnavailableStore;

impl ReputationStore for UnavailableStore {
    fn update(
        &self,
        _user: &UserId,
        _mutate: &mut dyn FnMut(&mut UserTrustRecord) -> Result<(), StoreError>,
    ) -> Result<UserTrustRecord, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _user: &UserId) -> Result<Option<UserTrustRecord>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn trust_router_with_service(
    service: TrustPolicyService<InMemoryReputationStore>,
) -> axum::Router {
    trust_router(Arc::new(service))
}
