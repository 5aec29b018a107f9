//! Chat relay HTTP handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use studybuddy_types::ConversationRequest;
use tracing::debug;

use crate::response;
use crate::server::AppState;

/// POST /api/chat
///
/// Request body: `{"instruction": "...", "messages": [{"role": "user", "content": "..."}]}`
///
/// Responses:
/// - `200 {"text": "..."}` with the reply, or the raw provider payload when no
///   reply text could be extracted
/// - `400 {"error": "..."}` for a malformed request body
/// - `500 {"error": "..."}` when the upstream call fails
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ConversationRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "Rejected chat request body");
            return response::bad_request(rejection.body_text()).into_response();
        }
    };

    if request.messages.is_empty() {
        return response::bad_request("messages must not be empty").into_response();
    }

    match state.relay.forward(&request).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => response::internal_error(format!("LLM request failed: {}", e)).into_response(),
    }
}

/// OPTIONS /api/chat
///
/// Preflights carrying `Access-Control-Request-Method` are answered by the CORS
/// layer before reaching this handler.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
