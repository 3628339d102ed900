// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardSummary, SalesChartEntry, TopServiceEntry},
};

// Tous les agrégats du système vivent ici, en SQL. C'est la seule
// source de vérité : aucun total n'est recalculé ailleurs.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Résumé général (cartes du tableau de bord).
    // Une transaction pour un instantané cohérent des quatre sommes.
    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        let sales_today = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(selling_price), 0) FROM sales WHERE created_at::date = CURRENT_DATE",
        )
        .fetch_one(&mut *tx)
        .await?;

        let profit_today = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(profit), 0) FROM sales WHERE created_at::date = CURRENT_DATE",
        )
        .fetch_one(&mut *tx)
        .await?;

        let sales_month = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(selling_price), 0) FROM sales
            WHERE date_trunc('month', created_at) = date_trunc('month', now())
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let expenses_month = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0) FROM expenses
            WHERE date_trunc('month', created_at) = date_trunc('month', now())
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let balance_total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM balance_records",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            sales_today,
            profit_today,
            sales_month,
            expenses_month,
            balance_total,
        })
    }

    // 2. Graphique de ventes (30 derniers jours)
    pub async fn sales_last_30_days(&self) -> Result<Vec<SalesChartEntry>, AppError> {
        let data = sqlx::query_as::<_, SalesChartEntry>(
            r#"
            SELECT
                to_char(created_at, 'YYYY-MM-DD') AS date,
                SUM(selling_price) AS total
            FROM sales
            WHERE created_at >= (CURRENT_DATE - INTERVAL '30 days')
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    // 3. Prestations les plus vendues (top 5 en chiffre d'affaires)
    pub async fn top_services(&self) -> Result<Vec<TopServiceEntry>, AppError> {
        let data = sqlx::query_as::<_, TopServiceEntry>(
            r#"
            SELECT
                sale_type,
                COUNT(*) AS total_count,
                SUM(selling_price) AS total_revenue
            FROM sales
            GROUP BY sale_type
            ORDER BY total_revenue DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    // --- Procédures d'agrégat unitaires ---

    pub async fn sales_daily_total(&self) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(selling_price), 0) FROM sales WHERE created_at::date = CURRENT_DATE",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    pub async fn sales_monthly_total(&self) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(selling_price), 0) FROM sales
            WHERE date_trunc('month', created_at) = date_trunc('month', now())
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    pub async fn expenses_daily_total(&self) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE created_at::date = CURRENT_DATE",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    pub async fn expenses_monthly_total(&self) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0) FROM expenses
            WHERE date_trunc('month', created_at) = date_trunc('month', now())
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    pub async fn unapproved_expenses_daily_count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM expenses WHERE approved = false AND created_at::date = CURRENT_DATE",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn unapproved_expenses_monthly_count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM expenses
            WHERE approved = false
              AND date_trunc('month', created_at) = date_trunc('month', now())
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
