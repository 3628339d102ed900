// src/handlers/devices.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PermManageDevices, RequirePermission},
    },
    models::device::{
        BanDevicePayload, BannedDevice, DeviceSession, DeviceSignals, FingerprintResponse,
        ValidateDevicePayload, ValidateDeviceResponse,
    },
    services::device_service::generate_fingerprint,
};

// POST /api/devices/fingerprint — public : le client dérive son
// empreinte une fois puis la persiste localement. Même signaux,
// même empreinte.
#[utoipa::path(
    post,
    path = "/api/devices/fingerprint",
    tag = "Devices",
    request_body = DeviceSignals,
    responses((status = 200, description = "Empreinte dérivée (SHA-256)", body = FingerprintResponse))
)]
pub async fn derive_fingerprint(
    Json(signals): Json<DeviceSignals>,
) -> Json<FingerprintResponse> {
    Json(FingerprintResponse {
        fingerprint: generate_fingerprint(&signals),
    })
}

// POST /api/devices/validate — le validateur appelé avant tout rendu :
// contrôle de bannissement (fail-open) + verdict.
#[utoipa::path(
    post,
    path = "/api/devices/validate",
    tag = "Devices",
    request_body = ValidateDevicePayload,
    responses((status = 200, description = "Verdict d'admission", body = ValidateDeviceResponse))
)]
pub async fn validate_device(
    State(app_state): State<AppState>,
    Json(payload): Json<ValidateDevicePayload>,
) -> Json<ValidateDeviceResponse> {
    Json(app_state.device_service.validate(&payload.fingerprint).await)
}

// GET /api/devices/sessions
#[utoipa::path(
    get,
    path = "/api/devices/sessions",
    tag = "Devices",
    responses((status = 200, description = "Sessions appareil observées", body = Vec<DeviceSession>)),
    security(("api_jwt" = []))
)]
pub async fn list_sessions(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageDevices>,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = app_state
        .device_service
        .list_sessions()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(sessions)))
}

// GET /api/devices/bans
#[utoipa::path(
    get,
    path = "/api/devices/bans",
    tag = "Devices",
    responses((status = 200, description = "Historique des bannissements", body = Vec<BannedDevice>)),
    security(("api_jwt" = []))
)]
pub async fn list_bans(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageDevices>,
) -> Result<impl IntoResponse, ApiError> {
    let bans = app_state
        .device_service
        .list_bans()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(bans)))
}

// POST /api/devices/ban
#[utoipa::path(
    post,
    path = "/api/devices/ban",
    tag = "Devices",
    request_body = BanDevicePayload,
    responses((status = 201, description = "Appareil banni", body = BannedDevice)),
    security(("api_jwt" = []))
)]
pub async fn ban_device(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageDevices>,
    Json(payload): Json<BanDevicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let ban = app_state
        .device_service
        .ban_device(&payload.fingerprint, payload.reason.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(ban)))
}

// POST /api/devices/bans/{id}/unban — soft delete, l'historique reste
#[utoipa::path(
    post,
    path = "/api/devices/bans/{id}/unban",
    tag = "Devices",
    responses(
        (status = 204, description = "Bannissement levé"),
        (status = 404, description = "Bannissement introuvable ou déjà levé")
    ),
    params(("id" = Uuid, Path, description = "ID du bannissement")),
    security(("api_jwt" = []))
)]
pub async fn unban_device(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageDevices>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .device_service
        .unban_device(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
