// src/middleware/device.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState};

// L'en-tête envoyé par le client avec son empreinte persistée
const FINGERPRINT_HEADER: &str = "x-device-fingerprint";

// L'empreinte de la requête courante, posée par device_guard pour les
// handlers qui journalisent les sessions. Peut être absente : un
// client sans empreinte est admis (même politique que le fail-open).
#[derive(Debug, Clone)]
pub struct DeviceFingerprint(pub Option<String>);

// La porte d'entrée appareil : un contrôle par requête, avant tout
// handler métier. Banni -> 403, Allowed/Unknown -> admis.
pub async fn device_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let fingerprint = request
        .headers()
        .get(FINGERPRINT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    if let Some(fp) = &fingerprint {
        let verdict = app_state.device_service.check_ban_status(fp).await;
        if !verdict.policy_allows() {
            tracing::info!(fingerprint = %fp, "⛔ Appareil banni refoulé");
            return Err(AppError::DeviceBanned);
        }
    }

    request.extensions_mut().insert(DeviceFingerprint(fingerprint));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for DeviceFingerprint
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<DeviceFingerprint>()
            .cloned()
            .unwrap_or(DeviceFingerprint(None)))
    }
}
