//! Search endpoint

use super::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use eagle_core::{Error, SearchRequest};
use serde::Deserialize;
use tracing::{error, warn};

/// Query string of `GET /api/search`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: String,
    pub limit: Option<usize>,
    pub org_id: Option<i64>,
    pub team_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl SearchParams {
    fn into_request(self, default_limit: usize) -> SearchRequest {
        SearchRequest {
            query: self.query,
            limit: self.limit.unwrap_or(default_limit),
            org_id: self.org_id,
            team_id: self.team_id,
            user_id: self.user_id,
        }
    }
}

/// `GET /api/search?query=&limit=&orgId=&teamId=&userId=`
///
/// Responds with the bare user array on success.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let request = params.into_request(state.default_limit);

    match state
        .service
        .search_with_cancel(&request, &state.shutdown)
        .await
    {
        Ok(users) => Json(users).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: Error) -> Response {
    let status = if e.is_transport() || matches!(e, Error::Cancelled) {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    match &e {
        Error::OutputDecoding { reason, raw } => {
            error!(reason = %reason, raw = %raw, "Search failed: undecodable model output")
        }
        Error::Cancelled => warn!("Search cancelled by shutdown"),
        other => error!(error = %other, "Search failed"),
    }

    (status, Json(ApiError::new(e.to_string()))).into_response()
}
