use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Notre type d'erreur métier, avec `thiserror` pour l'ergonomie.
// Les handlers le convertissent en ApiError localisé via `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erreur de validation")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail déjà utilisé")]
    EmailAlreadyExists,

    #[error("Identifiants invalides")]
    InvalidCredentials,

    #[error("Token invalide")]
    InvalidToken,

    #[error("Utilisateur introuvable")]
    UserNotFound,

    // Refus d'autorisation : un booléen devenu 403, jamais une exception.
    #[error("Permission manquante : {0}")]
    AccessDenied(&'static str),

    #[error("Appareil banni")]
    DeviceBanned,

    #[error("Ressource introuvable : {0}")]
    NotFound(&'static str),

    #[error("Le paiement dépasse le montant restant dû")]
    PaymentExceedsDue,

    #[error("Contrainte d'unicité violée : {0}")]
    UniqueConstraintViolation(String),

    #[error("Erreur de base de données")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Fournisseur LLM indisponible : {0}")]
    LlmUnavailable(String),

    #[error("Police de caractères introuvable : {0}")]
    FontNotFound(String),

    // Variante générique pour tout autre imprévu.
    // `anyhow::Error` capture le contexte de l'erreur.
    #[error("Erreur interne du serveur")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erreur Bcrypt : {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erreur JWT : {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    // Clé de message stable, résolue dans le catalogue i18n.
    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::UserNotFound => "user_not_found",
            AppError::AccessDenied(_) => "access_denied",
            AppError::DeviceBanned => "device_banned",
            AppError::NotFound(_) => "not_found",
            AppError::PaymentExceedsDue => "payment_exceeds_due",
            AppError::UniqueConstraintViolation(_) => "unique_violation",
            AppError::LlmUnavailable(_) => "assistant_unavailable",
            _ => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AccessDenied(_) | AppError::DeviceBanned => StatusCode::FORBIDDEN,
            AppError::PaymentExceedsDue => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::LlmUnavailable(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erreur interne du serveur : {}", self);
        }

        // La validation retourne le détail de chaque champ en plus du message.
        if let AppError::ValidationError(errors) = self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            return ApiError {
                status,
                error: store.resolve(&locale.0, self.message_key()),
                details: serde_json::to_value(details).ok(),
            };
        }

        if let AppError::AccessDenied(permission) = self {
            return ApiError {
                status,
                error: store.resolve(&locale.0, self.message_key()),
                details: Some(json!({ "permission": permission })),
            };
        }

        ApiError {
            status,
            error: store.resolve(&locale.0, self.message_key()),
            details: None,
        }
    }
}

// L'erreur telle qu'elle part sur le réseau : statut + message localisé.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Les middlewares retournent AppError directement ; on répond alors
// dans la langue par défaut du catalogue.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let store = I18nStore::new();
        self.to_api_error(&Locale::default(), &store).into_response()
    }
}
