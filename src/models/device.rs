// src/models/device.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Les signaux navigateur/environnement envoyés par le client pour
// dériver son empreinte. Identifiant heuristique, pas une preuve
// cryptographique : deux machines identiques peuvent collisionner.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSignals {
    #[schema(example = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)")]
    pub user_agent: String,

    #[schema(example = "1920x1080")]
    pub screen_resolution: String,

    #[schema(example = "Africa/Algiers")]
    pub timezone: String,

    #[schema(example = "fr-FR")]
    pub language: String,

    #[schema(example = 24)]
    pub color_depth: i32,

    #[schema(example = 8)]
    pub hardware_concurrency: i32,

    #[schema(example = "ANGLE (Intel, Intel(R) UHD Graphics)")]
    pub webgl_renderer: String,

    // Empreinte du rendu canvas, déjà hachée côté client
    pub canvas_hash: String,
}

// Résultat typé du contrôle de bannissement. `Unknown` couvre tout
// échec transport/serveur ; seul `policy_allows` décide ce qu'on en
// fait. Le choix disponibilité-avant-sécurité est ici, et nulle part
// ailleurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanCheckResult {
    Allowed,
    Banned,
    Unknown,
}

impl BanCheckResult {
    // Politique d'admission : fail-open. Un contrôle qui n'a pas pu
    // aboutir admet l'appareil.
    pub fn policy_allows(self) -> bool {
        match self {
            BanCheckResult::Allowed => true,
            BanCheckResult::Banned => false,
            BanCheckResult::Unknown => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannedDevice {
    pub id: Uuid,

    #[schema(example = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")]
    pub fingerprint: String,

    // Le débannissement passe ce flag à false ; la ligne reste
    pub is_active: bool,

    #[schema(example = "Poste partagé suspect")]
    pub reason: Option<String>,

    pub banned_at: DateTime<Utc>,
}

// Observabilité uniquement : jamais utilisé pour bloquer
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSession {
    pub id: Uuid,
    pub fingerprint: String,
    pub user_id: Uuid,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub last_seen_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDevicePayload {
    pub fingerprint: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDeviceResponse {
    pub allowed: bool,
    pub banned: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintResponse {
    pub fingerprint: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BanDevicePayload {
    pub fingerprint: String,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // La politique fail-open est épinglée au niveau du type : un
    // changement ici doit être un choix délibéré, pas un accident
    // de gestion d'erreur.
    #[test]
    fn unknown_is_admitted_banned_is_not() {
        assert!(BanCheckResult::Allowed.policy_allows());
        assert!(BanCheckResult::Unknown.policy_allows());
        assert!(!BanCheckResult::Banned.policy_allows());
    }
}
