// src/db/sales_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sales::{Sale, SaleSystem, SaleType},
};

#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Liste complète, la plus récente d'abord (invariant d'affichage)
    pub async fn list_all(&self) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sales ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        client_name: &str,
        sale_type: SaleType,
        system: SaleSystem,
        buying_price: Decimal,
        selling_price: Decimal,
        profit: Decimal,
        notes: Option<&str>,
    ) -> Result<Sale, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (user_id, client_name, sale_type, system, buying_price, selling_price, profit, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(client_name)
        .bind(sale_type)
        .bind(system)
        .bind(buying_price)
        .bind(selling_price)
        .bind(profit)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(sale)
    }

    // Le service a déjà fusionné les champs : on écrit l'état final
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        client_name: &str,
        sale_type: SaleType,
        system: SaleSystem,
        buying_price: Decimal,
        selling_price: Decimal,
        profit: Decimal,
        notes: Option<&str>,
    ) -> Result<Sale, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET client_name = $2, sale_type = $3, system = $4,
                buying_price = $5, selling_price = $6, profit = $7,
                notes = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_name)
        .bind(sale_type)
        .bind(system)
        .bind(buying_price)
        .bind(selling_price)
        .bind(profit)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(sale)
    }

    // Idempotent : le garde `cashed_in = false` rend le second appel
    // sans effet. Retourne true si la ligne a réellement basculé.
    pub async fn cash_in(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE sales SET cashed_in = true, updated_at = now() WHERE id = $1 AND cashed_in = false",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
