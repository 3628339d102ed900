// src/db/omra_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::omra::{
        Hotel, HotelCity, OmraProgram, PaymentMethod, Pelerin, PelerinPayment, PelerinStatus,
    },
};

#[derive(Clone)]
pub struct OmraRepository {
    pool: PgPool,
}

impl OmraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  HÔTELS
    // =========================================================================

    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, AppError> {
        let hotels = sqlx::query_as::<_, Hotel>(
            "SELECT * FROM hotels ORDER BY city, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(hotels)
    }

    pub async fn create_hotel(
        &self,
        name: &str,
        city: HotelCity,
        stars: Option<i16>,
        distance_to_haram_m: Option<i32>,
    ) -> Result<Hotel, AppError> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            INSERT INTO hotels (name, city, stars, distance_to_haram_m)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(city)
        .bind(stars)
        .bind(distance_to_haram_m)
        .fetch_one(&self.pool)
        .await?;

        Ok(hotel)
    }

    // =========================================================================
    //  PROGRAMMES
    // =========================================================================

    pub async fn list_programs(&self) -> Result<Vec<OmraProgram>, AppError> {
        let programs = sqlx::query_as::<_, OmraProgram>(
            "SELECT * FROM omra_programs ORDER BY departure_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(programs)
    }

    pub async fn find_program(&self, id: Uuid) -> Result<Option<OmraProgram>, AppError> {
        let program = sqlx::query_as::<_, OmraProgram>(
            "SELECT * FROM omra_programs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(program)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_program(
        &self,
        name: &str,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        price: Decimal,
        makkah_hotel_id: Option<Uuid>,
        medina_hotel_id: Option<Uuid>,
        capacity: i32,
    ) -> Result<OmraProgram, AppError> {
        let program = sqlx::query_as::<_, OmraProgram>(
            r#"
            INSERT INTO omra_programs
                (name, departure_date, return_date, price, makkah_hotel_id, medina_hotel_id, capacity)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(departure_date)
        .bind(return_date)
        .bind(price)
        .bind(makkah_hotel_id)
        .bind(medina_hotel_id)
        .bind(capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(program)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_program(
        &self,
        id: Uuid,
        name: &str,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        price: Decimal,
        makkah_hotel_id: Option<Uuid>,
        medina_hotel_id: Option<Uuid>,
        capacity: i32,
        is_active: bool,
    ) -> Result<OmraProgram, AppError> {
        let program = sqlx::query_as::<_, OmraProgram>(
            r#"
            UPDATE omra_programs
            SET name = $2, departure_date = $3, return_date = $4, price = $5,
                makkah_hotel_id = $6, medina_hotel_id = $7, capacity = $8,
                is_active = $9, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(departure_date)
        .bind(return_date)
        .bind(price)
        .bind(makkah_hotel_id)
        .bind(medina_hotel_id)
        .bind(capacity)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(program)
    }

    // =========================================================================
    //  PÈLERINS
    // =========================================================================

    pub async fn list_pelerins(&self, program_id: Uuid) -> Result<Vec<Pelerin>, AppError> {
        let pelerins = sqlx::query_as::<_, Pelerin>(
            "SELECT * FROM pelerins WHERE program_id = $1 ORDER BY created_at DESC",
        )
        .bind(program_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pelerins)
    }

    pub async fn find_pelerin(&self, id: Uuid) -> Result<Option<Pelerin>, AppError> {
        let pelerin = sqlx::query_as::<_, Pelerin>("SELECT * FROM pelerins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(pelerin)
    }

    pub async fn create_pelerin(
        &self,
        program_id: Uuid,
        user_id: Uuid,
        full_name: &str,
        passport_number: &str,
        phone: Option<&str>,
    ) -> Result<Pelerin, AppError> {
        let pelerin = sqlx::query_as::<_, Pelerin>(
            r#"
            INSERT INTO pelerins (program_id, user_id, full_name, passport_number, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(program_id)
        .bind(user_id)
        .bind(full_name)
        .bind(passport_number)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(pelerin)
    }

    pub async fn set_pelerin_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: PelerinStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE pelerins SET status = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }

    // =========================================================================
    //  PAIEMENTS
    // =========================================================================

    pub async fn list_payments(&self, pelerin_id: Uuid) -> Result<Vec<PelerinPayment>, AppError> {
        let payments = sqlx::query_as::<_, PelerinPayment>(
            "SELECT * FROM pelerin_payments WHERE pelerin_id = $1 ORDER BY paid_at DESC",
        )
        .bind(pelerin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    // Les deux méthodes ci-dessous prennent un executor : le service
    // les enchaîne dans une transaction pour que le contrôle du
    // restant dû et l'insertion soient atomiques.
    pub async fn sum_payments<'e, E>(
        &self,
        executor: E,
        pelerin_id: Uuid,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM pelerin_payments WHERE pelerin_id = $1",
        )
        .bind(pelerin_id)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }

    pub async fn insert_payment<'e, E>(
        &self,
        executor: E,
        pelerin_id: Uuid,
        user_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
    ) -> Result<PelerinPayment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, PelerinPayment>(
            r#"
            INSERT INTO pelerin_payments (pelerin_id, user_id, amount, method)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(pelerin_id)
        .bind(user_id)
        .bind(amount)
        .bind(method)
        .fetch_one(executor)
        .await?;

        Ok(payment)
    }
}
