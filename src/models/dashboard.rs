// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Os três cartões do painel inicial.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[schema(example = 2)]
    pub critical_equipment: i64,
    #[schema(example = 65)]
    pub technician_utilization_pct: u32,
    #[schema(example = 7)]
    pub open_requests: i64,
    #[schema(example = 1)]
    pub overdue_requests: i64,
}

/// Contagens brutas lidas em um único snapshot do banco.
#[derive(Debug, Clone)]
pub struct DashboardCounts {
    pub critical_equipment: i64,
    pub technicians: i64,
    pub open_requests: i64,
    pub overdue_requests: i64,
    pub scheduled_hours: Decimal,
}
