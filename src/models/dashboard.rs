// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Résumé du jour (les cartes du haut du tableau de bord).
// Tous les chiffres viennent du SQL : le serveur fait autorité,
// rien n'est recalculé côté client.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub sales_today: Decimal,    // Chiffre d'affaires du jour
    pub profit_today: Decimal,   // Marge du jour
    pub sales_month: Decimal,    // CA du mois en cours
    pub expenses_month: Decimal, // Dépenses du mois en cours
    pub balance_total: Decimal,  // Soldes cumulés de tous les canaux
}

// 2. Graphique de ventes (30 derniers jours)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesChartEntry {
    pub date: Option<String>, // le SQL renvoie la date en texte (YYYY-MM-DD)
    pub total: Option<Decimal>,
}

// 3. Classement des prestations les plus vendues
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopServiceEntry {
    pub sale_type: crate::models::sales::SaleType,
    pub total_count: Option<i64>,
    pub total_revenue: Option<Decimal>,
}

