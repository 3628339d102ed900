pub mod access;
pub mod auth;
pub mod chat;
pub mod crm;
pub mod dashboard;
pub mod device;
pub mod finance;
pub mod notifications;
pub mod omra;
pub mod sales;
