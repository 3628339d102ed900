// src/db/device_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::device::{BannedDevice, DeviceSession},
};

#[derive(Clone)]
pub struct DeviceRepository {
    pool: PgPool,
}

impl DeviceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Vrai s'il existe un bannissement ACTIF pour cette empreinte.
    // L'appelant (DeviceService) décide quoi faire d'une erreur ;
    // ici on la propage telle quelle.
    pub async fn active_ban_exists(&self, fingerprint: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM banned_devices WHERE fingerprint = $1 AND is_active = true)",
        )
        .bind(fingerprint)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn insert_ban(
        &self,
        fingerprint: &str,
        reason: Option<&str>,
    ) -> Result<BannedDevice, AppError> {
        let ban = sqlx::query_as::<_, BannedDevice>(
            r#"
            INSERT INTO banned_devices (fingerprint, reason)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(fingerprint)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(ban)
    }

    // Soft delete : l'historique des bannissements est conservé
    pub async fn deactivate_ban(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE banned_devices SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_bans(&self) -> Result<Vec<BannedDevice>, AppError> {
        let bans = sqlx::query_as::<_, BannedDevice>(
            "SELECT * FROM banned_devices ORDER BY banned_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bans)
    }

    // Une ligne par couple (empreinte, utilisateur), horodatée au
    // dernier passage
    pub async fn upsert_session(
        &self,
        fingerprint: &str,
        user_id: Uuid,
        ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO device_sessions (fingerprint, user_id, ip, user_agent)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (fingerprint, user_id)
            DO UPDATE SET ip = EXCLUDED.ip, user_agent = EXCLUDED.user_agent, last_seen_at = now()
            "#,
        )
        .bind(fingerprint)
        .bind(user_id)
        .bind(ip)
        .bind(user_agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_sessions(&self) -> Result<Vec<DeviceSession>, AppError> {
        let sessions = sqlx::query_as::<_, DeviceSession>(
            "SELECT * FROM device_sessions ORDER BY last_seen_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }
}
