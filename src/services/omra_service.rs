// src/services/omra_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OmraRepository,
    models::omra::{
        CreateHotelPayload, CreatePaymentPayload, CreatePelerinPayload, CreateProgramPayload,
        Hotel, OmraProgram, Pelerin, PelerinAccount, PelerinPayment, PelerinStatus,
        UpdateProgramPayload,
    },
};

#[derive(Clone)]
pub struct OmraService {
    repo: OmraRepository,
    pool: PgPool,
}

impl OmraService {
    pub fn new(repo: OmraRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // --- Hôtels ---

    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, AppError> {
        self.repo.list_hotels().await
    }

    pub async fn create_hotel(&self, payload: CreateHotelPayload) -> Result<Hotel, AppError> {
        self.repo
            .create_hotel(
                &payload.name,
                payload.city,
                payload.stars,
                payload.distance_to_haram_m,
            )
            .await
    }

    // --- Programmes ---

    pub async fn list_programs(&self) -> Result<Vec<OmraProgram>, AppError> {
        self.repo.list_programs().await
    }

    pub async fn create_program(
        &self,
        payload: CreateProgramPayload,
    ) -> Result<OmraProgram, AppError> {
        self.repo
            .create_program(
                &payload.name,
                payload.departure_date,
                payload.return_date,
                payload.price,
                payload.makkah_hotel_id,
                payload.medina_hotel_id,
                payload.capacity,
            )
            .await
    }

    pub async fn update_program(
        &self,
        id: Uuid,
        payload: UpdateProgramPayload,
    ) -> Result<OmraProgram, AppError> {
        let current = self
            .repo
            .find_program(id)
            .await?
            .ok_or(AppError::NotFound("program"))?;

        let name = payload.name.unwrap_or(current.name);
        let departure_date = payload.departure_date.unwrap_or(current.departure_date);
        let return_date = payload.return_date.unwrap_or(current.return_date);
        let price = payload.price.unwrap_or(current.price);
        let makkah_hotel_id = payload.makkah_hotel_id.or(current.makkah_hotel_id);
        let medina_hotel_id = payload.medina_hotel_id.or(current.medina_hotel_id);
        let capacity = payload.capacity.unwrap_or(current.capacity);
        let is_active = payload.is_active.unwrap_or(current.is_active);

        self.repo
            .update_program(
                id,
                &name,
                departure_date,
                return_date,
                price,
                makkah_hotel_id,
                medina_hotel_id,
                capacity,
                is_active,
            )
            .await
    }

    // --- Pèlerins ---

    pub async fn list_pelerins(&self, program_id: Uuid) -> Result<Vec<Pelerin>, AppError> {
        self.repo.list_pelerins(program_id).await
    }

    pub async fn register_pelerin(
        &self,
        program_id: Uuid,
        user_id: Uuid,
        payload: CreatePelerinPayload,
    ) -> Result<Pelerin, AppError> {
        self.repo
            .find_program(program_id)
            .await?
            .ok_or(AppError::NotFound("program"))?;

        self.repo
            .create_pelerin(
                program_id,
                user_id,
                &payload.full_name,
                &payload.passport_number,
                payload.phone.as_deref(),
            )
            .await
    }

    // État de compte : prix du programme, total versé, restant dû
    pub async fn pelerin_account(&self, pelerin_id: Uuid) -> Result<PelerinAccount, AppError> {
        let pelerin = self
            .repo
            .find_pelerin(pelerin_id)
            .await?
            .ok_or(AppError::NotFound("pelerin"))?;

        let program = self
            .repo
            .find_program(pelerin.program_id)
            .await?
            .ok_or(AppError::NotFound("program"))?;

        let total_paid = self.repo.sum_payments(&self.pool, pelerin_id).await?;

        Ok(PelerinAccount {
            remaining_due: program.price - total_paid,
            program_price: program.price,
            total_paid,
            pelerin,
        })
    }

    pub async fn list_payments(&self, pelerin_id: Uuid) -> Result<Vec<PelerinPayment>, AppError> {
        self.repo.list_payments(pelerin_id).await
    }

    // Enregistre un versement. Transaction : le contrôle du restant dû
    // et l'insertion doivent être atomiques, sinon deux guichets
    // simultanés pourraient dépasser le prix du programme.
    pub async fn record_payment(
        &self,
        pelerin_id: Uuid,
        user_id: Uuid,
        payload: CreatePaymentPayload,
    ) -> Result<PelerinPayment, AppError> {
        if payload.amount <= Decimal::ZERO {
            return Err(AppError::PaymentExceedsDue);
        }

        let pelerin = self
            .repo
            .find_pelerin(pelerin_id)
            .await?
            .ok_or(AppError::NotFound("pelerin"))?;

        let program = self
            .repo
            .find_program(pelerin.program_id)
            .await?
            .ok_or(AppError::NotFound("program"))?;

        let mut tx = self.pool.begin().await?;

        let already_paid = self.repo.sum_payments(&mut *tx, pelerin_id).await?;
        if already_paid + payload.amount > program.price {
            return Err(AppError::PaymentExceedsDue);
        }

        let payment = self
            .repo
            .insert_payment(&mut *tx, pelerin_id, user_id, payload.amount, payload.method)
            .await?;

        // Soldé : le pèlerin passe au statut PAID dans la même transaction
        if already_paid + payload.amount >= program.price {
            self.repo
                .set_pelerin_status(&mut *tx, pelerin_id, PelerinStatus::Paid)
                .await?;
        }

        tx.commit().await?;

        Ok(payment)
    }
}
