// src/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::common::i18n::I18nStore;
use crate::db::{
    CrmRepository, DashboardRepository, DeviceRepository, FinanceRepository,
    NotificationRepository, OmraRepository, RoleRepository, SalesRepository, UserRepository,
};
use crate::services::{
    access::AccessService,
    auth::AuthService,
    chat_service::{ChatService, HttpLlmClient},
    crm_service::CrmService,
    dashboard_service::DashboardService,
    device_service::DeviceService,
    document_service::DocumentService,
    finance_service::FinanceService,
    notification_service::NotificationService,
    omra_service::OmraService,
    sales_service::SalesService,
};

const DEFAULT_LLM_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

// L'état partagé, accessible dans toute l'application. Le graphe de
// services est assemblé ici, une fois, et injecté explicitement :
// pas d'état global ambiant.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub access_service: AccessService,
    pub sales_service: SalesService,
    pub finance_service: FinanceService,
    pub crm_service: CrmService,
    pub omra_service: OmraService,
    pub notification_service: NotificationService,
    pub device_service: DeviceService,
    pub dashboard_service: DashboardService,
    pub chat_service: ChatService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL doit être définie");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET doit être défini");

        let llm_endpoint =
            env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_LLM_ENDPOINT.to_string());
        let llm_model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());
        let llm_api_key = env::var("LLM_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("LLM_API_KEY absente : l'assistant répondra en erreur");
            String::new()
        });

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Connexion à la base de données établie !");

        // --- Assemblage du graphe de dépendances ---
        let user_repo = UserRepository::new(db_pool.clone());
        let role_repo = RoleRepository::new(db_pool.clone());
        let sales_repo = SalesRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());
        let omra_repo = OmraRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());
        let device_repo = DeviceRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let llm_client = Arc::new(HttpLlmClient::new(llm_endpoint, llm_model, llm_api_key));

        Ok(Self {
            auth_service: AuthService::new(user_repo, jwt_secret),
            access_service: AccessService::new(role_repo),
            sales_service: SalesService::new(sales_repo.clone()),
            finance_service: FinanceService::new(finance_repo),
            crm_service: CrmService::new(crm_repo),
            omra_service: OmraService::new(omra_repo.clone(), db_pool.clone()),
            notification_service: NotificationService::new(notification_repo),
            device_service: DeviceService::new(device_repo),
            dashboard_service: DashboardService::new(dashboard_repo.clone()),
            chat_service: ChatService::new(dashboard_repo, llm_client),
            document_service: DocumentService::new(sales_repo, omra_repo),
            i18n_store: I18nStore::new(),
            db_pool,
        })
    }
}
