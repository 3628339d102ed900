// src/handlers/chat.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PermUseAssistant, RequirePermission},
    },
    models::chat::{ChatPayload, ChatResponse},
};

// POST /api/chat — l'assistant. Le serveur recalcule l'instantané des
// métriques et le joint au prompt système ; le client n'envoie que sa
// question et l'historique de conversation.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Assistant",
    request_body = ChatPayload,
    responses(
        (status = 200, description = "Réponse de l'assistant", body = ChatResponse),
        (status = 502, description = "Fournisseur LLM indisponible")
    ),
    security(("api_jwt" = []))
)]
pub async fn chat(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermUseAssistant>,
    Json(payload): Json<ChatPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let response = app_state
        .chat_service
        .chat(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(response)))
}
