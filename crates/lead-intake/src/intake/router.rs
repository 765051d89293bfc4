use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::LeadId;
use super::form::LeadForm;
use super::notifications::LeadNotifier;
use super::repository::{LeadQuery, LeadRepository};
use super::service::{IntakeServiceError, LeadIntakeService};

/// Header carrying the dashboard password.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Router builder exposing HTTP endpoints for intake and the lead dashboard.
pub fn lead_router<R, N>(service: Arc<LeadIntakeService<R, N>>) -> Router
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/leads",
            post(submit_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route("/api/v1/leads/score", post(preview_handler::<R, N>))
        .route("/api/v1/leads/:lead_id", get(lead_handler::<R, N>))
        .with_state(service)
}

/// Dashboard listing parameters, named the way the admin page sends them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    pub(crate) category: Option<String>,
    pub(crate) sort_by: Option<String>,
    pub(crate) order: Option<String>,
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<LeadIntakeService<R, N>>>,
    axum::Json(form): axum::Json<LeadForm>,
) -> Response
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    match service.submit(form) {
        Ok(receipt) => {
            let payload = json!({
                "success": true,
                "message": "Lead submitted successfully",
                "leadId": receipt.lead.lead_id,
                "score": receipt.lead.score,
                "category": receipt.lead.category,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preview_handler<R, N>(
    State(service): State<Arc<LeadIntakeService<R, N>>>,
    axum::Json(form): axum::Json<LeadForm>,
) -> Response
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    match service.preview(form) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<LeadIntakeService<R, N>>>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Response
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    let password = admin_password(&headers);
    if let Err(err) = service.authorize(password) {
        return error_response(err);
    }

    let query = match LeadQuery::from_params(
        params.category.as_deref(),
        params.sort_by.as_deref(),
        params.order.as_deref(),
    ) {
        Ok(query) => query,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.list(password, &query) {
        Ok(listing) => {
            let payload = json!({
                "success": true,
                "leads": listing.leads,
                "stats": listing.stats,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn lead_handler<R, N>(
    State(service): State<Arc<LeadIntakeService<R, N>>>,
    headers: HeaderMap,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: LeadNotifier + 'static,
{
    match service.get(admin_password(&headers), &LeadId(lead_id)) {
        Ok(lead) => {
            let payload = json!({
                "success": true,
                "lead": lead.summary_view(),
                "components": lead.components,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn admin_password(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
}

fn error_response(err: IntakeServiceError) -> Response {
    let status = match &err {
        IntakeServiceError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        IntakeServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        IntakeServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        IntakeServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "success": false,
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
