// src/services/sales_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SalesRepository,
    models::sales::{CreateSalePayload, Sale, UpdateSalePayload},
};

// La marge appartient au serveur : le client envoie les deux prix,
// jamais le profit.
pub fn compute_profit(buying_price: Decimal, selling_price: Decimal) -> Decimal {
    selling_price - buying_price
}

#[derive(Clone)]
pub struct SalesService {
    repo: SalesRepository,
}

impl SalesService {
    pub fn new(repo: SalesRepository) -> Self {
        Self { repo }
    }

    pub async fn list_sales(&self) -> Result<Vec<Sale>, AppError> {
        self.repo.list_all().await
    }

    pub async fn create_sale(
        &self,
        user_id: Uuid,
        payload: CreateSalePayload,
    ) -> Result<Sale, AppError> {
        let profit = compute_profit(payload.buying_price, payload.selling_price);

        self.repo
            .create(
                user_id,
                &payload.client_name,
                payload.sale_type,
                payload.system,
                payload.buying_price,
                payload.selling_price,
                profit,
                payload.notes.as_deref(),
            )
            .await
    }

    // Patch ciblé : on fusionne avec l'existant puis on écrit l'état
    // final, profit recalculé.
    pub async fn update_sale(
        &self,
        id: Uuid,
        payload: UpdateSalePayload,
    ) -> Result<Sale, AppError> {
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("sale"))?;

        let client_name = payload.client_name.unwrap_or(current.client_name);
        let sale_type = payload.sale_type.unwrap_or(current.sale_type);
        let system = payload.system.unwrap_or(current.system);
        let buying_price = payload.buying_price.unwrap_or(current.buying_price);
        let selling_price = payload.selling_price.unwrap_or(current.selling_price);
        let notes = payload.notes.or(current.notes);
        let profit = compute_profit(buying_price, selling_price);

        self.repo
            .update(
                id,
                &client_name,
                sale_type,
                system,
                buying_price,
                selling_price,
                profit,
                notes.as_deref(),
            )
            .await
    }

    // Encaissement idempotent : le second appel ne change rien et
    // renvoie la vente telle quelle.
    pub async fn cash_in_sale(&self, id: Uuid) -> Result<Sale, AppError> {
        let flipped = self.repo.cash_in(id).await?;

        let sale = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("sale"))?;

        if !flipped {
            tracing::debug!(sale_id = %id, "Vente déjà encaissée, aucun effet");
        }

        Ok(sale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profit_is_selling_minus_buying() {
        let profit = compute_profit(Decimal::from(100), Decimal::from(150));
        assert_eq!(profit, Decimal::from(50));
    }

    #[test]
    fn profit_can_be_negative_on_a_loss() {
        let profit = compute_profit(Decimal::from(150), Decimal::from(100));
        assert_eq!(profit, Decimal::from(-50));
    }
}
