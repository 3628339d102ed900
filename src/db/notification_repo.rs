// src/db/notification_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::notifications::Notification};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = false",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    // Portée par user_id : on ne marque jamais la notification d'un autre
    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE notifications SET read = true WHERE id = $1 AND user_id = $2 AND read = false",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // Matérialise les alertes de dépenses non approuvées depuis plus
    // de 24h, une seule fois par dépense (garde NOT EXISTS).
    pub async fn generate_expense_alerts(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, kind, title, body)
            SELECT e.user_id, 'EXPENSE_ALERT',
                   'Dépense en attente d''approbation',
                   e.label
            FROM expenses e
            WHERE e.approved = false
              AND e.created_at < now() - INTERVAL '24 hours'
              AND NOT EXISTS (
                  SELECT 1 FROM notifications n
                  WHERE n.user_id = e.user_id
                    AND n.kind = 'EXPENSE_ALERT'
                    AND n.body = e.label
                    AND n.read = false
              )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    // Devis encore SENT qui expirent sous 7 jours
    pub async fn generate_quote_expiry_alerts(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, kind, title, body)
            SELECT q.user_id, 'QUOTE_EXPIRY',
                   'Devis bientôt expiré',
                   'Devis de ' || q.amount || ' DA valable jusqu''au ' || q.valid_until
            FROM quotes q
            WHERE q.status = 'SENT'
              AND q.valid_until IS NOT NULL
              AND q.valid_until <= CURRENT_DATE + INTERVAL '7 days'
              AND NOT EXISTS (
                  SELECT 1 FROM notifications n
                  WHERE n.user_id = q.user_id
                    AND n.kind = 'QUOTE_EXPIRY'
                    AND n.body LIKE 'Devis de ' || q.amount || '%'
                    AND n.read = false
              )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
