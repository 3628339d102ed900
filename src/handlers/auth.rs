// src/handlers/auth.rs

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::{headers::UserAgent, TypedHeader};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, device::DeviceFingerprint, i18n::Locale, rbac::{PermManageRoles, RequirePermission}},
    models::auth::{AssignRolePayload, AuthResponse, LoginUserPayload, MeResponse, RegisterUserPayload},
};

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Compte créé", body = AuthResponse),
        (status = 400, description = "Données invalides"),
        (status = 409, description = "E-mail déjà utilisé")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (_user, token) = app_state
        .auth_service
        .register_user(&payload.email, &payload.password, payload.display_name.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Connexion réussie", body = AuthResponse),
        (status = 401, description = "Identifiants invalides"),
        (status = 403, description = "Appareil banni")
    ),
    params(
        ("x-device-fingerprint" = Option<String>, Header, description = "Empreinte de l'appareil")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    fingerprint: DeviceFingerprint,
    user_agent: Option<TypedHeader<UserAgent>>,
    headers: HeaderMap,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (user, token) = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Journal de session appareil : best-effort, ne bloque jamais la
    // connexion (observabilité, pas une barrière).
    if let DeviceFingerprint(Some(fp)) = fingerprint {
        let device_service = app_state.device_service.clone();
        let user_id = user.id;
        let ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let ua = user_agent.map(|TypedHeader(ua)| ua.as_str().to_owned());

        tokio::spawn(async move {
            device_service
                .log_session(&fp, user_id, ip.as_deref(), ua.as_deref())
                .await;
        });
    }

    Ok((StatusCode::OK, Json(AuthResponse { token })))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Profil, rôle et permissions", body = MeResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Json<MeResponse> {
    let role = app_state.access_service.resolve_role(&user).await;
    let permissions = role
        .map(|r| r.permissions().iter().map(|p| p.slug()).collect())
        .unwrap_or_default();

    Json(MeResponse { user, role, permissions })
}

// PUT /api/users/{id}/role
#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    tag = "Users",
    request_body = AssignRolePayload,
    responses(
        (status = 204, description = "Rôle affecté"),
        (status = 403, description = "Permission manquante")
    ),
    params(("id" = Uuid, Path, description = "ID de l'utilisateur")),
    security(("api_jwt" = []))
)]
pub async fn assign_role(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermManageRoles>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<AssignRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .access_service
        .assign_role(user_id, payload.role)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
