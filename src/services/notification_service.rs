// src/services/notification_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::NotificationRepository,
    models::notifications::Notification,
};

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository) -> Self {
        Self { repo }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, AppError> {
        self.repo.list_for_user(user_id).await
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, AppError> {
        self.repo.unread_count(user_id).await
    }

    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if !self.repo.mark_read(id, user_id).await? {
            return Err(AppError::NotFound("notification"));
        }
        Ok(())
    }

    // L'équivalent de la procédure generate_notifications : matérialise
    // les alertes en attente. Retourne le nombre de lignes créées.
    pub async fn generate(&self) -> Result<u64, AppError> {
        let expenses = self.repo.generate_expense_alerts().await?;
        let quotes = self.repo.generate_quote_expiry_alerts().await?;

        if expenses + quotes > 0 {
            tracing::info!("🔔 {} notification(s) générée(s)", expenses + quotes);
        }

        Ok(expenses + quotes)
    }
}
