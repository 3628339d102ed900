// src/models/chat.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Un tour de conversation, au format des API de chat-completion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    #[schema(example = "user")]
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Quel est notre chiffre d'affaires du mois ?")]
    pub message: String,

    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
}

// L'instantané des métriques de l'agence injecté dans le prompt
// système. Calculé côté serveur à partir des mêmes agrégats SQL que
// le tableau de bord — le client n'envoie jamais ses propres chiffres.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencySnapshot {
    pub sales_today: Decimal,
    pub profit_today: Decimal,
    pub sales_month: Decimal,
    pub expenses_month: Decimal,
    pub balance_total: Decimal,
    pub unapproved_expenses_month: i64,
}
