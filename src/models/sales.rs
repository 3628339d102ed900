// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum SaleType {
    Flight,
    Hotel,
    Visa,
    Insurance,
    Omra,
    Transfer,
    Other,
}

// Le canal de paiement par lequel la vente transite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_system", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum SaleSystem {
    Accelaero,
    Ttp,
    Cash,
    Other,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "M. Benali Karim")]
    pub client_name: String,

    pub sale_type: SaleType,
    pub system: SaleSystem,

    #[schema(example = "45000.00")]
    pub buying_price: Decimal,
    #[schema(example = "52000.00")]
    pub selling_price: Decimal,

    // Toujours selling - buying, calculé côté serveur
    #[schema(example = "7000.00")]
    pub profit: Decimal,

    pub cashed_in: bool,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "M. Benali Karim")]
    pub client_name: String,

    pub sale_type: SaleType,
    pub system: SaleSystem,

    #[schema(example = "45000.00")]
    pub buying_price: Decimal,
    #[schema(example = "52000.00")]
    pub selling_price: Decimal,

    pub notes: Option<String>,
}

// Patch ciblé : seuls les champs fournis sont modifiés.
// Le profit est recalculé dès qu'un des deux prix change.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalePayload {
    #[validate(length(min = 1, message = "required"))]
    pub client_name: Option<String>,
    pub sale_type: Option<SaleType>,
    pub system: Option<SaleSystem>,
    pub buying_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub notes: Option<String>,
}
