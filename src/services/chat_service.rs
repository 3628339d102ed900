// src/services/chat_service.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::time::sleep;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::chat::{AgencySnapshot, ChatMessage, ChatPayload, ChatResponse},
};

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

// Le dernier échange suffit largement au contexte ; au-delà on
// tronque pour borner la taille du prompt.
const MAX_HISTORY_MESSAGES: usize = 10;

// Le port vers le fournisseur LLM. Un seul vrai client HTTP en
// production ; les tests peuvent brancher autre chose.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, AppError>;
}

pub struct HttpLlmClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl HttpLlmClient {
    pub fn new(endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint,
            model,
            api_key,
        }
    }

    // Réessaie sur 5xx et 429 avec backoff exponentiel ; les erreurs
    // terminales (4xx) partent immédiatement.
    async fn send_with_retry(&self, payload: &Value) -> Result<String, AppError> {
        let mut retries = 0;
        let mut backoff = INITIAL_BACKOFF_MS;

        loop {
            let res = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .header("Content-Type", "application/json")
                .json(payload)
                .send()
                .await;

            match res {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body: Value = response.json().await.map_err(|e| {
                            AppError::LlmUnavailable(format!("réponse illisible : {}", e))
                        })?;
                        return extract_content(&body);
                    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if retries >= MAX_RETRIES {
                            let text = response.text().await.unwrap_or_default();
                            return Err(AppError::LlmUnavailable(format!("{} - {}", status, text)));
                        }
                        tracing::warn!(
                            "Erreur transitoire du fournisseur LLM {}. Nouvel essai dans {}ms...",
                            status,
                            backoff
                        );
                    } else {
                        let text = response.text().await.unwrap_or_default();
                        return Err(AppError::LlmUnavailable(format!("{} - {}", status, text)));
                    }
                }
                Err(e) => {
                    if retries >= MAX_RETRIES {
                        return Err(AppError::LlmUnavailable(format!("erreur réseau : {}", e)));
                    }
                    tracing::warn!("Erreur réseau LLM. Nouvel essai dans {}ms... {}", backoff, e);
                }
            }

            sleep(Duration::from_millis(backoff)).await;
            retries += 1;
            backoff *= 2;
        }
    }
}

fn extract_content(body: &Value) -> Result<String, AppError> {
    body.get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|first| first.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
        .map(|s| s.trim().to_string())
        .ok_or_else(|| AppError::LlmUnavailable("réponse sans contenu".to_string()))
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, AppError> {
        let mut all_messages = vec![json!({ "role": "system", "content": system_prompt })];
        for m in messages {
            all_messages.push(json!({ "role": &m.role, "content": &m.content }));
        }

        let payload = json!({
            "model": self.model,
            "messages": all_messages,
            "temperature": 0.4,
            "max_tokens": 1500,
        });

        self.send_with_retry(&payload).await
    }
}

// Construit le prompt système avec l'instantané des métriques.
// Les chiffres viennent du SQL, jamais du client.
pub fn build_system_prompt(snapshot: &AgencySnapshot) -> String {
    format!(
        "Tu es l'assistant interne de l'agence de voyages Ziyara Voyages (Alger). \
         Tu réponds en français, de façon brève et factuelle, aux questions de \
         l'équipe sur l'activité de l'agence. Voici l'état actuel :\n\
         - Ventes du jour : {} DA\n\
         - Marge du jour : {} DA\n\
         - Ventes du mois : {} DA\n\
         - Dépenses du mois : {} DA\n\
         - Soldes cumulés des canaux : {} DA\n\
         - Dépenses en attente d'approbation ce mois : {}\n\
         Si une question sort de ce périmètre, dis-le simplement.",
        snapshot.sales_today,
        snapshot.profit_today,
        snapshot.sales_month,
        snapshot.expenses_month,
        snapshot.balance_total,
        snapshot.unapproved_expenses_month,
    )
}

// Ne garde que la fin de l'historique, l'ordre préservé
pub fn trim_history(history: &[ChatMessage]) -> &[ChatMessage] {
    if history.len() > MAX_HISTORY_MESSAGES {
        &history[history.len() - MAX_HISTORY_MESSAGES..]
    } else {
        history
    }
}

#[derive(Clone)]
pub struct ChatService {
    dashboard_repo: DashboardRepository,
    llm: Arc<dyn LlmClient>,
}

impl ChatService {
    pub fn new(dashboard_repo: DashboardRepository, llm: Arc<dyn LlmClient>) -> Self {
        Self { dashboard_repo, llm }
    }

    pub async fn chat(&self, payload: ChatPayload) -> Result<ChatResponse, AppError> {
        // L'instantané est recalculé à chaque question : mêmes agrégats
        // que le tableau de bord
        let summary = self.dashboard_repo.get_summary().await?;
        let unapproved = self.dashboard_repo.unapproved_expenses_monthly_count().await?;

        let snapshot = AgencySnapshot {
            sales_today: summary.sales_today,
            profit_today: summary.profit_today,
            sales_month: summary.sales_month,
            expenses_month: summary.expenses_month,
            balance_total: summary.balance_total,
            unapproved_expenses_month: unapproved,
        };

        let system_prompt = build_system_prompt(&snapshot);

        let mut messages: Vec<ChatMessage> = trim_history(&payload.conversation_history).to_vec();
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: payload.message,
        });

        let response = self.llm.complete(&system_prompt, &messages).await?;

        Ok(ChatResponse { response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn snapshot() -> AgencySnapshot {
        AgencySnapshot {
            sales_today: Decimal::from(52000),
            profit_today: Decimal::from(7000),
            sales_month: Decimal::from(830000),
            expenses_month: Decimal::from(120000),
            balance_total: Decimal::from(450000),
            unapproved_expenses_month: 3,
        }
    }

    #[test]
    fn system_prompt_embeds_every_metric() {
        let prompt = build_system_prompt(&snapshot());
        assert!(prompt.contains("52000"));
        assert!(prompt.contains("7000"));
        assert!(prompt.contains("830000"));
        assert!(prompt.contains("120000"));
        assert!(prompt.contains("450000"));
        assert!(prompt.contains("approbation ce mois : 3"));
    }

    #[test]
    fn history_is_trimmed_to_the_most_recent_messages() {
        let history: Vec<ChatMessage> = (0..25)
            .map(|i| ChatMessage {
                role: "user".to_string(),
                content: format!("message {}", i),
            })
            .collect();

        let trimmed = trim_history(&history);
        assert_eq!(trimmed.len(), MAX_HISTORY_MESSAGES);
        assert_eq!(trimmed.first().unwrap().content, "message 15");
        assert_eq!(trimmed.last().unwrap().content, "message 24");
    }

    #[test]
    fn extract_content_reads_the_first_choice() {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "  Bonjour.  " } }]
        });
        assert_eq!(extract_content(&body).unwrap(), "Bonjour.");

        let empty = serde_json::json!({ "choices": [] });
        assert!(matches!(
            extract_content(&empty),
            Err(AppError::LlmUnavailable(_))
        ));
    }
}
