// src/models/omra.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Hôtels ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "hotel_city", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum HotelCity {
    Makkah,
    Medina,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,

    #[schema(example = "Dar Al Tawhid")]
    pub name: String,

    pub city: HotelCity,

    #[schema(example = 5)]
    pub stars: Option<i16>,

    // Distance à pied jusqu'au Haram, en mètres
    #[schema(example = 150)]
    pub distance_to_haram_m: Option<i32>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    pub city: HotelCity,
    pub stars: Option<i16>,
    pub distance_to_haram_m: Option<i32>,
}

// --- Programmes ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OmraProgram {
    pub id: Uuid,

    #[schema(example = "Omra Ramadan 2026 - 15 jours")]
    pub name: String,

    #[schema(value_type = String, format = Date)]
    pub departure_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub return_date: NaiveDate,

    // Prix par pèlerin ; le restant dû s'en déduit
    #[schema(example = "320000.00")]
    pub price: Decimal,

    pub makkah_hotel_id: Option<Uuid>,
    pub medina_hotel_id: Option<Uuid>,

    #[schema(example = 45)]
    pub capacity: i32,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    #[schema(value_type = String, format = Date)]
    pub departure_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub return_date: NaiveDate,

    pub price: Decimal,
    pub makkah_hotel_id: Option<Uuid>,
    pub medina_hotel_id: Option<Uuid>,

    #[serde(default)]
    pub capacity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgramPayload {
    pub name: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub departure_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub return_date: Option<NaiveDate>,
    pub price: Option<Decimal>,
    pub makkah_hotel_id: Option<Uuid>,
    pub medina_hotel_id: Option<Uuid>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

// --- Pèlerins ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "pelerin_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum PelerinStatus {
    Registered,
    Confirmed,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pelerin {
    pub id: Uuid,
    pub program_id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "Bouaziz Mohamed")]
    pub full_name: String,

    #[schema(example = "163549822")]
    pub passport_number: String,

    pub phone: Option<String>,
    pub status: PelerinStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePelerinPayload {
    #[validate(length(min = 1, message = "required"))]
    pub full_name: String,

    #[validate(length(min = 5, message = "invalid_passport"))]
    pub passport_number: String,

    pub phone: Option<String>,
}

// --- Paiements ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Bank,
    Cheque,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PelerinPayment {
    pub id: Uuid,
    pub pelerin_id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "80000.00")]
    pub amount: Decimal,

    pub method: PaymentMethod,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentPayload {
    pub amount: Decimal,
    pub method: PaymentMethod,
}

// État de compte d'un pèlerin : prix du programme, total versé, restant dû
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PelerinAccount {
    #[serde(flatten)]
    pub pelerin: Pelerin,

    #[schema(example = "320000.00")]
    pub program_price: Decimal,

    #[schema(example = "160000.00")]
    pub total_paid: Decimal,

    #[schema(example = "160000.00")]
    pub remaining_due: Decimal,
}
