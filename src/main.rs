// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;
use crate::middleware::device::device_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() est voulu ici : si la configuration échoue,
    // l'application ne doit pas démarrer.
    let app_state = AppState::new()
        .await
        .expect("Échec de l'initialisation de l'état de l'application.");

    // Les migrations SQLx tournent au démarrage
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Échec des migrations de la base de données.");

    tracing::info!("✅ Migrations de la base de données exécutées !");

    // Routes publiques : dérivation d'empreinte et validateur
    // d'appareil (le validateur fait son propre contrôle).
    let public_routes = Router::new()
        .route("/fingerprint", post(handlers::devices::derive_fingerprint))
        .route("/validate", post(handlers::devices::validate_device));

    // Routes d'authentification : pas de token, mais la porte
    // appareil s'applique déjà (un appareil banni ne voit même pas
    // l'écran de connexion).
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            device_guard,
        ));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/{id}/role", put(handlers::auth::assign_role));

    let sales_routes = Router::new()
        .route(
            "/",
            post(handlers::sales::create_sale).get(handlers::sales::list_sales),
        )
        .route("/{id}", patch(handlers::sales::update_sale))
        .route("/{id}/cash-in", post(handlers::sales::cash_in_sale));

    let expense_routes = Router::new()
        .route(
            "/",
            post(handlers::finance::create_expense).get(handlers::finance::list_expenses),
        )
        .route("/totals", get(handlers::finance::expense_totals))
        .route("/{id}", patch(handlers::finance::update_expense))
        .route("/{id}/approve", post(handlers::finance::approve_expense));

    let balance_routes = Router::new()
        .route("/", get(handlers::finance::all_system_balances))
        .route(
            "/records",
            post(handlers::finance::create_balance_record)
                .get(handlers::finance::list_balance_records),
        );

    let debt_routes = Router::new()
        .route(
            "/",
            post(handlers::finance::create_debt).get(handlers::finance::list_debts),
        )
        .route("/{id}/settle", post(handlers::finance::settle_debt));

    let crm_routes = Router::new()
        .route(
            "/prospects",
            post(handlers::crm::create_prospect).get(handlers::crm::list_prospects),
        )
        .route(
            "/prospects/{id}",
            patch(handlers::crm::update_prospect).delete(handlers::crm::delete_prospect),
        )
        .route(
            "/prospects/{id}/activities",
            post(handlers::crm::create_activity).get(handlers::crm::list_activities),
        )
        .route(
            "/prospects/{id}/quotes",
            post(handlers::crm::create_quote).get(handlers::crm::list_quotes_for_prospect),
        )
        .route("/quotes", get(handlers::crm::list_quotes))
        .route("/quotes/{id}/status", patch(handlers::crm::update_quote_status));

    let omra_routes = Router::new()
        .route(
            "/hotels",
            post(handlers::omra::create_hotel).get(handlers::omra::list_hotels),
        )
        .route(
            "/programs",
            post(handlers::omra::create_program).get(handlers::omra::list_programs),
        )
        .route("/programs/{id}", patch(handlers::omra::update_program))
        .route(
            "/programs/{id}/pelerins",
            post(handlers::omra::register_pelerin).get(handlers::omra::list_pelerins),
        )
        .route("/pelerins/{id}/account", get(handlers::omra::pelerin_account))
        .route(
            "/pelerins/{id}/payments",
            post(handlers::omra::record_payment).get(handlers::omra::list_payments),
        );

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .route("/unread-count", get(handlers::notifications::unread_count))
        .route("/generate", post(handlers::notifications::generate))
        .route("/{id}/read", post(handlers::notifications::mark_read));

    let device_admin_routes = Router::new()
        .route("/sessions", get(handlers::devices::list_sessions))
        .route("/bans", get(handlers::devices::list_bans))
        .route("/ban", post(handlers::devices::ban_device))
        .route("/bans/{id}/unban", post(handlers::devices::unban_device));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/sales-chart", get(handlers::dashboard::get_sales_chart))
        .route("/top-services", get(handlers::dashboard::get_top_services))
        .route("/sales-totals", get(handlers::dashboard::sales_totals));

    let document_routes = Router::new()
        .route(
            "/invoices/{sale_id}",
            get(handlers::documents::generate_invoice_pdf),
        )
        .route(
            "/pelerins/{pelerin_id}/payments",
            get(handlers::documents::generate_payment_history_pdf),
        );

    // Tout le périmètre protégé : la porte appareil d'abord, puis le
    // token. Un appareil banni est refoulé avant toute logique métier.
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/sales", sales_routes)
        .nest("/expenses", expense_routes)
        .nest("/balances", balance_routes)
        .nest("/debts", debt_routes)
        .nest("/crm", crm_routes)
        .nest("/omra", omra_routes)
        .nest("/notifications", notification_routes)
        .nest("/devices", device_admin_routes)
        .nest("/dashboard", dashboard_routes)
        .nest("/documents", document_routes)
        .route("/chat", post(handlers::chat::chat))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            device_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/devices", public_routes)
        .nest("/api", protected_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Échec du démarrage du listener TCP");
    tracing::info!("🚀 Serveur à l'écoute sur {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erreur du serveur Axum");
}
