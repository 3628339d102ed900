// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::assign_role,

        // --- Sales ---
        handlers::sales::list_sales,
        handlers::sales::create_sale,
        handlers::sales::update_sale,
        handlers::sales::cash_in_sale,

        // --- Finance ---
        handlers::finance::list_expenses,
        handlers::finance::create_expense,
        handlers::finance::update_expense,
        handlers::finance::approve_expense,
        handlers::finance::expense_totals,
        handlers::finance::list_balance_records,
        handlers::finance::create_balance_record,
        handlers::finance::all_system_balances,
        handlers::finance::list_debts,
        handlers::finance::create_debt,
        handlers::finance::settle_debt,

        // --- CRM ---
        handlers::crm::list_prospects,
        handlers::crm::create_prospect,
        handlers::crm::update_prospect,
        handlers::crm::delete_prospect,
        handlers::crm::list_activities,
        handlers::crm::create_activity,
        handlers::crm::list_quotes,
        handlers::crm::list_quotes_for_prospect,
        handlers::crm::create_quote,
        handlers::crm::update_quote_status,

        // --- Omra ---
        handlers::omra::list_hotels,
        handlers::omra::create_hotel,
        handlers::omra::list_programs,
        handlers::omra::create_program,
        handlers::omra::update_program,
        handlers::omra::list_pelerins,
        handlers::omra::register_pelerin,
        handlers::omra::pelerin_account,
        handlers::omra::list_payments,
        handlers::omra::record_payment,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::unread_count,
        handlers::notifications::mark_read,
        handlers::notifications::generate,

        // --- Devices ---
        handlers::devices::derive_fingerprint,
        handlers::devices::validate_device,
        handlers::devices::list_sessions,
        handlers::devices::list_bans,
        handlers::devices::ban_device,
        handlers::devices::unban_device,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_sales_chart,
        handlers::dashboard::get_top_services,
        handlers::dashboard::sales_totals,

        // --- Assistant ---
        handlers::chat::chat,

        // --- Documents ---
        handlers::documents::generate_invoice_pdf,
        handlers::documents::generate_payment_history_pdf,
    ),
    components(
        schemas(
            // --- Access ---
            models::access::Role,
            models::access::Permission,

            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,
            models::auth::AssignRolePayload,

            // --- Sales ---
            models::sales::SaleType,
            models::sales::SaleSystem,
            models::sales::Sale,
            models::sales::CreateSalePayload,
            models::sales::UpdateSalePayload,

            // --- Finance ---
            models::finance::Expense,
            models::finance::CreateExpensePayload,
            models::finance::UpdateExpensePayload,
            models::finance::BalanceKind,
            models::finance::BalanceRecord,
            models::finance::CreateBalanceRecordPayload,
            models::finance::SystemBalance,
            models::finance::DebtDirection,
            models::finance::Debt,
            models::finance::CreateDebtPayload,

            // --- CRM ---
            models::crm::ProspectStatus,
            models::crm::Prospect,
            models::crm::CreateProspectPayload,
            models::crm::UpdateProspectPayload,
            models::crm::ActivityKind,
            models::crm::Activity,
            models::crm::CreateActivityPayload,
            models::crm::QuoteStatus,
            models::crm::Quote,
            models::crm::CreateQuotePayload,
            models::crm::UpdateQuoteStatusPayload,

            // --- Omra ---
            models::omra::HotelCity,
            models::omra::Hotel,
            models::omra::CreateHotelPayload,
            models::omra::OmraProgram,
            models::omra::CreateProgramPayload,
            models::omra::UpdateProgramPayload,
            models::omra::PelerinStatus,
            models::omra::Pelerin,
            models::omra::CreatePelerinPayload,
            models::omra::PaymentMethod,
            models::omra::PelerinPayment,
            models::omra::CreatePaymentPayload,
            models::omra::PelerinAccount,

            // --- Devices ---
            models::device::DeviceSignals,
            models::device::FingerprintResponse,
            models::device::ValidateDevicePayload,
            models::device::ValidateDeviceResponse,
            models::device::BannedDevice,
            models::device::DeviceSession,
            models::device::BanDevicePayload,

            // --- Notifications ---
            models::notifications::NotificationKind,
            models::notifications::Notification,
            models::notifications::UnreadCount,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::SalesChartEntry,
            models::dashboard::TopServiceEntry,

            // --- Assistant ---
            models::chat::ChatMessage,
            models::chat::ChatPayload,
            models::chat::ChatResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Authentification et inscription"),
        (name = "Users", description = "Profil, rôles et permissions"),
        (name = "Sales", description = "Saisie et encaissement des ventes"),
        (name = "Finance", description = "Dépenses, soldes et dettes"),
        (name = "CRM", description = "Prospects, activités et devis"),
        (name = "Omra", description = "Programmes, pèlerins et versements"),
        (name = "Notifications", description = "Alertes internes"),
        (name = "Devices", description = "Contrôle d'accès par appareil"),
        (name = "Dashboard", description = "Indicateurs et agrégats"),
        (name = "Assistant", description = "Assistant conversationnel"),
        (name = "Documents", description = "Factures et historiques PDF")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
