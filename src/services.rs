pub mod access;
pub mod auth;
pub mod chat_service;
pub mod crm_service;
pub mod dashboard_service;
pub mod device_service;
pub mod document_service;
pub mod finance_service;
pub mod notification_service;
pub mod omra_service;
pub mod sales_service;
