// src/services/dashboard_service.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{DashboardSummary, SalesChartEntry, TopServiceEntry},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        self.repo.get_summary().await
    }

    pub async fn get_sales_chart(&self) -> Result<Vec<SalesChartEntry>, AppError> {
        self.repo.sales_last_30_days().await
    }

    pub async fn get_top_services(&self) -> Result<Vec<TopServiceEntry>, AppError> {
        self.repo.top_services().await
    }

    pub async fn sales_daily_total(&self) -> Result<Decimal, AppError> {
        self.repo.sales_daily_total().await
    }

    pub async fn sales_monthly_total(&self) -> Result<Decimal, AppError> {
        self.repo.sales_monthly_total().await
    }

    pub async fn expenses_daily_total(&self) -> Result<Decimal, AppError> {
        self.repo.expenses_daily_total().await
    }

    pub async fn expenses_monthly_total(&self) -> Result<Decimal, AppError> {
        self.repo.expenses_monthly_total().await
    }

    pub async fn unapproved_expenses_daily_count(&self) -> Result<i64, AppError> {
        self.repo.unapproved_expenses_daily_count().await
    }

    pub async fn unapproved_expenses_monthly_count(&self) -> Result<i64, AppError> {
        self.repo.unapproved_expenses_monthly_count().await
    }
}
