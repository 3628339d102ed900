pub mod user_repo;
pub use user_repo::UserRepository;
pub mod role_repo;
pub use role_repo::RoleRepository;
pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod crm_repo;
pub use crm_repo::CrmRepository;
pub mod omra_repo;
pub use omra_repo::OmraRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
pub mod device_repo;
pub use device_repo::DeviceRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
