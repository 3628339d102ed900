// src/db/crm_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crm::{Activity, ActivityKind, Prospect, ProspectStatus, Quote, QuoteStatus},
};

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PROSPECTS
    // =========================================================================

    pub async fn list_prospects(&self) -> Result<Vec<Prospect>, AppError> {
        let prospects = sqlx::query_as::<_, Prospect>(
            "SELECT * FROM prospects ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(prospects)
    }

    pub async fn find_prospect(&self, id: Uuid) -> Result<Option<Prospect>, AppError> {
        let prospect = sqlx::query_as::<_, Prospect>("SELECT * FROM prospects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(prospect)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_prospect(
        &self,
        user_id: Uuid,
        full_name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        destination: Option<&str>,
        budget: Option<Decimal>,
        notes: Option<&str>,
    ) -> Result<Prospect, AppError> {
        let prospect = sqlx::query_as::<_, Prospect>(
            r#"
            INSERT INTO prospects (user_id, full_name, phone, email, destination, budget, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(phone)
        .bind(email)
        .bind(destination)
        .bind(budget)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(prospect)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_prospect(
        &self,
        id: Uuid,
        full_name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        status: ProspectStatus,
        destination: Option<&str>,
        budget: Option<Decimal>,
        notes: Option<&str>,
    ) -> Result<Prospect, AppError> {
        let prospect = sqlx::query_as::<_, Prospect>(
            r#"
            UPDATE prospects
            SET full_name = $2, phone = $3, email = $4, status = $5,
                destination = $6, budget = $7, notes = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(phone)
        .bind(email)
        .bind(status)
        .bind(destination)
        .bind(budget)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(prospect)
    }

    // La seule suppression physique du système
    pub async fn delete_prospect(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM prospects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  ACTIVITÉS
    // =========================================================================

    pub async fn list_activities(&self, prospect_id: Uuid) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT * FROM activities WHERE prospect_id = $1 ORDER BY created_at DESC",
        )
        .bind(prospect_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }

    pub async fn create_activity(
        &self,
        prospect_id: Uuid,
        user_id: Uuid,
        kind: ActivityKind,
        summary: &str,
    ) -> Result<Activity, AppError> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (prospect_id, user_id, kind, summary)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(prospect_id)
        .bind(user_id)
        .bind(kind)
        .bind(summary)
        .fetch_one(&self.pool)
        .await?;

        Ok(activity)
    }

    // =========================================================================
    //  DEVIS
    // =========================================================================

    pub async fn list_quotes(&self) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }

    pub async fn list_quotes_for_prospect(&self, prospect_id: Uuid) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE prospect_id = $1 ORDER BY created_at DESC",
        )
        .bind(prospect_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }

    pub async fn create_quote(
        &self,
        prospect_id: Uuid,
        user_id: Uuid,
        amount: Decimal,
        valid_until: Option<NaiveDate>,
    ) -> Result<Quote, AppError> {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (prospect_id, user_id, amount, valid_until)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(prospect_id)
        .bind(user_id)
        .bind(amount)
        .bind(valid_until)
        .fetch_one(&self.pool)
        .await?;

        Ok(quote)
    }

    pub async fn update_quote_status(
        &self,
        id: Uuid,
        status: QuoteStatus,
    ) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quote)
    }
}
