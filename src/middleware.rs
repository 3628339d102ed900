pub mod auth;
pub mod device;
pub mod i18n;
pub mod rbac;
