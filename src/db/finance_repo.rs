// src/db/finance_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{BalanceKind, BalanceRecord, Debt, DebtDirection, Expense, SystemBalance},
    models::sales::SaleSystem,
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  DÉPENSES
    // =========================================================================

    pub async fn list_expenses(&self) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn find_expense(&self, id: Uuid) -> Result<Option<Expense>, AppError> {
        let expense = sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(expense)
    }

    pub async fn create_expense(
        &self,
        user_id: Uuid,
        label: &str,
        amount: Decimal,
        category: Option<&str>,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (user_id, label, amount, category)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(label)
        .bind(amount)
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn update_expense(
        &self,
        id: Uuid,
        label: &str,
        amount: Decimal,
        category: Option<&str>,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET label = $2, amount = $3, category = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(label)
        .bind(amount)
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn approve_expense(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE expenses SET approved = true, updated_at = now() WHERE id = $1 AND approved = false",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  MOUVEMENTS DE SOLDE
    // =========================================================================

    pub async fn list_balance_records(&self) -> Result<Vec<BalanceRecord>, AppError> {
        let records = sqlx::query_as::<_, BalanceRecord>(
            "SELECT * FROM balance_records ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn create_balance_record(
        &self,
        user_id: Uuid,
        system: SaleSystem,
        amount: Decimal,
        kind: BalanceKind,
        note: Option<&str>,
    ) -> Result<BalanceRecord, AppError> {
        let record = sqlx::query_as::<_, BalanceRecord>(
            r#"
            INSERT INTO balance_records (user_id, system, amount, kind, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(system)
        .bind(amount)
        .bind(kind)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    // Soldes de tous les canaux d'un coup (équivalent de
    // get_all_system_balances)
    pub async fn all_system_balances(&self) -> Result<Vec<SystemBalance>, AppError> {
        let balances = sqlx::query_as::<_, SystemBalance>(
            r#"
            SELECT system, COALESCE(SUM(amount), 0) AS balance
            FROM balance_records
            GROUP BY system
            ORDER BY system
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(balances)
    }

    pub async fn system_balance(&self, system: SaleSystem) -> Result<Decimal, AppError> {
        let balance = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM balance_records WHERE system = $1",
        )
        .bind(system)
        .fetch_one(&self.pool)
        .await?;

        Ok(balance)
    }

    // =========================================================================
    //  DETTES
    // =========================================================================

    pub async fn list_debts(&self) -> Result<Vec<Debt>, AppError> {
        let debts = sqlx::query_as::<_, Debt>(
            "SELECT * FROM debts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(debts)
    }

    pub async fn create_debt(
        &self,
        user_id: Uuid,
        party_name: &str,
        amount: Decimal,
        direction: DebtDirection,
        notes: Option<&str>,
    ) -> Result<Debt, AppError> {
        let debt = sqlx::query_as::<_, Debt>(
            r#"
            INSERT INTO debts (user_id, party_name, amount, direction, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(party_name)
        .bind(amount)
        .bind(direction)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(debt)
    }

    pub async fn settle_debt(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE debts SET settled = true, updated_at = now() WHERE id = $1 AND settled = false",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
