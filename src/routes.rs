use crate::error::AppError;
use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

use crate::trust::{
    trust_router, ContentIntegrityService, IntegrityFlags, MessageDraft, MessageHistoryImporter,
    ReputationStore, TrustPolicyConfig, TrustPolicyService,
};

#[derive(Debug, Deserialize)]
pub(crate) struct MessageAuditRequest {
    pub(crate) draft: MessageDraft,
    #[serde(default)]
    pub(crate) recent_messages: Vec<MessageDraft>,
    #[serde(default)]
    pub(crate) history_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageAuditResponse {
    pub(crate) data_source: HistoryDataSource,
    pub(crate) history_size: usize,
    pub(crate) flags: IntegrityFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum HistoryDataSource {
    CsvExport,
    Inline,
}

pub(crate) fn with_trust_routes<S>(service: Arc<TrustPolicyService<S>>) -> axum::Router
where
    S: ReputationStore + 'static,
{
    trust_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/trust/messages/audit",
            axum::routing::post(message_audit_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn message_audit_endpoint(
    Json(payload): Json<MessageAuditRequest>,
) -> Result<Json<MessageAuditResponse>, AppError> {
    let MessageAuditRequest {
        draft,
        mut recent_messages,
        history_csv,
    } = payload;

    let data_source = if let Some(csv) = history_csv {
        let reader = Cursor::new(csv.into_bytes());
        let imported = MessageHistoryImporter::from_reader(reader)?;
        recent_messages.extend(imported);
        HistoryDataSource::CsvExport
    } else {
        HistoryDataSource::Inline
    };

    let integrity = ContentIntegrityService::new(&TrustPolicyConfig::default());
    let flags = integrity.evaluate(&draft, &recent_messages);

    Ok(Json(MessageAuditResponse {
        data_source,
        history_size: recent_messages.len(),
        flags,
    }))
}
