// src/services/finance_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::finance::{
        BalanceRecord, CreateBalanceRecordPayload, CreateDebtPayload, CreateExpensePayload, Debt,
        Expense, SystemBalance, UpdateExpensePayload,
    },
    models::sales::SaleSystem,
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository) -> Self {
        Self { repo }
    }

    // --- Dépenses ---

    pub async fn list_expenses(&self) -> Result<Vec<Expense>, AppError> {
        self.repo.list_expenses().await
    }

    pub async fn create_expense(
        &self,
        user_id: Uuid,
        payload: CreateExpensePayload,
    ) -> Result<Expense, AppError> {
        self.repo
            .create_expense(
                user_id,
                &payload.label,
                payload.amount,
                payload.category.as_deref(),
            )
            .await
    }

    pub async fn update_expense(
        &self,
        id: Uuid,
        payload: UpdateExpensePayload,
    ) -> Result<Expense, AppError> {
        let current = self
            .repo
            .find_expense(id)
            .await?
            .ok_or(AppError::NotFound("expense"))?;

        let label = payload.label.unwrap_or(current.label);
        let amount = payload.amount.unwrap_or(current.amount);
        let category = payload.category.or(current.category);

        self.repo
            .update_expense(id, &label, amount, category.as_deref())
            .await
    }

    // Approbation idempotente, comme l'encaissement des ventes
    pub async fn approve_expense(&self, id: Uuid) -> Result<Expense, AppError> {
        self.repo.approve_expense(id).await?;

        self.repo
            .find_expense(id)
            .await?
            .ok_or(AppError::NotFound("expense"))
    }

    // --- Soldes ---

    pub async fn list_balance_records(&self) -> Result<Vec<BalanceRecord>, AppError> {
        self.repo.list_balance_records().await
    }

    pub async fn record_balance_movement(
        &self,
        user_id: Uuid,
        payload: CreateBalanceRecordPayload,
    ) -> Result<BalanceRecord, AppError> {
        self.repo
            .create_balance_record(
                user_id,
                payload.system,
                payload.amount,
                payload.kind,
                payload.note.as_deref(),
            )
            .await
    }

    pub async fn all_system_balances(&self) -> Result<Vec<SystemBalance>, AppError> {
        self.repo.all_system_balances().await
    }

    pub async fn system_balance(&self, system: SaleSystem) -> Result<Decimal, AppError> {
        self.repo.system_balance(system).await
    }

    // --- Dettes ---

    pub async fn list_debts(&self) -> Result<Vec<Debt>, AppError> {
        self.repo.list_debts().await
    }

    pub async fn create_debt(
        &self,
        user_id: Uuid,
        payload: CreateDebtPayload,
    ) -> Result<Debt, AppError> {
        self.repo
            .create_debt(
                user_id,
                &payload.party_name,
                payload.amount,
                payload.direction,
                payload.notes.as_deref(),
            )
            .await
    }

    pub async fn settle_debt(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.settle_debt(id).await? {
            return Err(AppError::NotFound("debt"));
        }
        Ok(())
    }
}
