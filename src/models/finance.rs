// src/models/finance.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::sales::SaleSystem;

// --- Dépenses ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "Carburant navette aéroport")]
    pub label: String,

    #[schema(example = "3500.00")]
    pub amount: Decimal,

    #[schema(example = "transport")]
    pub category: Option<String>,

    pub approved: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    #[validate(length(min = 1, message = "required"))]
    pub label: String,
    pub amount: Decimal,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpensePayload {
    #[validate(length(min = 1, message = "required"))]
    pub label: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
}

// --- Mouvements de solde ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "balance_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum BalanceKind {
    Deposit,
    Withdrawal,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub system: SaleSystem,

    // Montant signé : positif = dépôt, négatif = retrait
    #[schema(example = "100000.00")]
    pub amount: Decimal,

    pub kind: BalanceKind,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBalanceRecordPayload {
    pub system: SaleSystem,
    pub amount: Decimal,
    pub kind: BalanceKind,
    pub note: Option<String>,
}

// Solde agrégé d'un canal : SUM(amount) calculé en SQL
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemBalance {
    pub system: SaleSystem,

    #[schema(example = "250000.00")]
    pub balance: Decimal,
}

// --- Dettes ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "debt_direction", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum DebtDirection {
    OwedToUs,
    OwedByUs,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "Agence partenaire Oran")]
    pub party_name: String,

    pub amount: Decimal,
    pub direction: DebtDirection,
    pub settled: bool,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDebtPayload {
    #[validate(length(min = 1, message = "required"))]
    pub party_name: String,
    pub amount: Decimal,
    pub direction: DebtDirection,
    pub notes: Option<String>,
}
