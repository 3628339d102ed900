// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::access::Role;

// Représente un utilisateur venant de la base de données
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    #[schema(example = "amine@ziyara-voyages.dz")]
    pub email: String,

    #[serde(skip_serializing)] // ne doit jamais sortir sur le réseau
    #[schema(ignore)]
    pub password_hash: String,

    #[schema(example = "Amine B.")]
    pub display_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Données pour l'inscription d'un nouvel utilisateur
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "amine@ziyara-voyages.dz")]
    pub email: String,

    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,

    pub display_name: Option<String>,
}

// Données pour la connexion
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserPayload {
    #[validate(email(message = "invalid_email"))]
    pub email: String,

    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,
}

// Réponse d'authentification avec le token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Profil renvoyé par /me : l'identité, le rôle résolu et les permissions
// dérivées. Un rôle non résolu signifie AUCUNE permission, jamais un
// accès par défaut.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: User,

    pub role: Option<Role>,

    #[schema(value_type = Vec<String>, example = json!(["sales:view", "crm:view"]))]
    pub permissions: Vec<&'static str>,
}

// Affectation d'un rôle par le gérant
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolePayload {
    pub role: Role,
}

// Structure des "claims" dans le JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID de l'utilisateur)
    pub exp: usize, // Expiration
    pub iat: usize, // Issued At
}
