// src/handlers/documents.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PermExportDocuments, RequirePermission},
    },
};

// GET /api/documents/invoices/{sale_id}
#[utoipa::path(
    get,
    path = "/api/documents/invoices/{sale_id}",
    tag = "Documents",
    responses(
        (status = 200, description = "Facture PDF (pièce jointe)"),
        (status = 404, description = "Vente introuvable")
    ),
    params(("sale_id" = Uuid, Path, description = "ID de la vente")),
    security(("api_jwt" = []))
)]
pub async fn generate_invoice_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermExportDocuments>,
    Path(sale_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let pdf_bytes = app_state
        .document_service
        .generate_invoice_pdf(sale_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Les headers pour que le navigateur télécharge le PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"facture_{}.pdf\"", sale_id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}

// GET /api/documents/pelerins/{pelerin_id}/payments
#[utoipa::path(
    get,
    path = "/api/documents/pelerins/{pelerin_id}/payments",
    tag = "Documents",
    responses(
        (status = 200, description = "Historique de versements PDF (pièce jointe)"),
        (status = 404, description = "Pèlerin introuvable")
    ),
    params(("pelerin_id" = Uuid, Path, description = "ID du pèlerin")),
    security(("api_jwt" = []))
)]
pub async fn generate_payment_history_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermExportDocuments>,
    Path(pelerin_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let pdf_bytes = app_state
        .document_service
        .generate_payment_history_pdf(pelerin_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"versements_{}.pdf\"", pelerin_id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
