// src/services/crm_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CrmRepository,
    models::crm::{
        Activity, CreateActivityPayload, CreateProspectPayload, CreateQuotePayload, Prospect,
        Quote, QuoteStatus, UpdateProspectPayload,
    },
};

#[derive(Clone)]
pub struct CrmService {
    repo: CrmRepository,
}

impl CrmService {
    pub fn new(repo: CrmRepository) -> Self {
        Self { repo }
    }

    // --- Prospects ---

    pub async fn list_prospects(&self) -> Result<Vec<Prospect>, AppError> {
        self.repo.list_prospects().await
    }

    pub async fn create_prospect(
        &self,
        user_id: Uuid,
        payload: CreateProspectPayload,
    ) -> Result<Prospect, AppError> {
        self.repo
            .create_prospect(
                user_id,
                &payload.full_name,
                payload.phone.as_deref(),
                payload.email.as_deref(),
                payload.destination.as_deref(),
                payload.budget,
                payload.notes.as_deref(),
            )
            .await
    }

    pub async fn update_prospect(
        &self,
        id: Uuid,
        payload: UpdateProspectPayload,
    ) -> Result<Prospect, AppError> {
        let current = self
            .repo
            .find_prospect(id)
            .await?
            .ok_or(AppError::NotFound("prospect"))?;

        let full_name = payload.full_name.unwrap_or(current.full_name);
        let phone = payload.phone.or(current.phone);
        let email = payload.email.or(current.email);
        let status = payload.status.unwrap_or(current.status);
        let destination = payload.destination.or(current.destination);
        let budget = payload.budget.or(current.budget);
        let notes = payload.notes.or(current.notes);

        self.repo
            .update_prospect(
                id,
                &full_name,
                phone.as_deref(),
                email.as_deref(),
                status,
                destination.as_deref(),
                budget,
                notes.as_deref(),
            )
            .await
    }

    pub async fn delete_prospect(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_prospect(id).await? {
            return Err(AppError::NotFound("prospect"));
        }
        Ok(())
    }

    // --- Activités ---

    pub async fn list_activities(&self, prospect_id: Uuid) -> Result<Vec<Activity>, AppError> {
        self.repo.list_activities(prospect_id).await
    }

    pub async fn create_activity(
        &self,
        prospect_id: Uuid,
        user_id: Uuid,
        payload: CreateActivityPayload,
    ) -> Result<Activity, AppError> {
        // L'activité doit pointer sur un prospect existant
        self.repo
            .find_prospect(prospect_id)
            .await?
            .ok_or(AppError::NotFound("prospect"))?;

        self.repo
            .create_activity(prospect_id, user_id, payload.kind, &payload.summary)
            .await
    }

    // --- Devis ---

    pub async fn list_quotes(&self) -> Result<Vec<Quote>, AppError> {
        self.repo.list_quotes().await
    }

    pub async fn list_quotes_for_prospect(&self, prospect_id: Uuid) -> Result<Vec<Quote>, AppError> {
        self.repo.list_quotes_for_prospect(prospect_id).await
    }

    pub async fn create_quote(
        &self,
        prospect_id: Uuid,
        user_id: Uuid,
        payload: CreateQuotePayload,
    ) -> Result<Quote, AppError> {
        self.repo
            .find_prospect(prospect_id)
            .await?
            .ok_or(AppError::NotFound("prospect"))?;

        self.repo
            .create_quote(prospect_id, user_id, payload.amount, payload.valid_until)
            .await
    }

    pub async fn update_quote_status(
        &self,
        id: Uuid,
        status: QuoteStatus,
    ) -> Result<Quote, AppError> {
        self.repo
            .update_quote_status(id, status)
            .await?
            .ok_or(AppError::NotFound("quote"))
    }
}
