// src/services/dashboard_service.rs

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError, db::DashboardRepository, models::dashboard::DashboardSummary,
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
        let counts = self.repo.get_counts().await?;

        Ok(DashboardSummary {
            critical_equipment: counts.critical_equipment,
            technician_utilization_pct: utilization_pct(counts.scheduled_hours, counts.technicians),
            open_requests: counts.open_requests,
            overdue_requests: counts.overdue_requests,
        })
    }
}

/// Carga dos técnicos assumindo jornada de 8 horas por técnico,
/// arredondada e limitada a 100%.
pub(crate) fn utilization_pct(scheduled_hours: Decimal, technicians: i64) -> u32 {
    // Sem técnicos cadastrados a conta ainda precisa fazer sentido
    let technicians = technicians.max(1);
    let capacity = Decimal::from(technicians * 8);

    let pct = (scheduled_hours / capacity) * Decimal::from(100);
    pct.round().to_u32().unwrap_or(0).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utilization_is_a_simple_ratio() {
        // 4 horas para um técnico de 8 horas: 50%
        assert_eq!(utilization_pct(Decimal::from(4), 1), 50);
        // 16 horas para dois técnicos: capacidade cheia
        assert_eq!(utilization_pct(Decimal::from(16), 2), 100);
        assert_eq!(utilization_pct(Decimal::ZERO, 3), 0);
    }

    #[test]
    fn utilization_is_capped_at_100() {
        assert_eq!(utilization_pct(Decimal::from(100), 1), 100);
        assert_eq!(utilization_pct(Decimal::from(1000), 2), 100);
    }

    #[test]
    fn zero_technicians_counts_as_one() {
        assert_eq!(utilization_pct(Decimal::from(8), 0), 100);
        assert_eq!(utilization_pct(Decimal::from(2), 0), 25);
    }

    #[test]
    fn utilization_rounds_to_the_nearest_point() {
        // 1 hora sobre 24 = 4,1666...% -> 4
        assert_eq!(utilization_pct(Decimal::from(1), 3), 4);
        // 7 horas sobre 8 = 87,5% -> arredondamento bancário do Decimal: 88
        assert_eq!(utilization_pct(Decimal::from(7), 1), 88);
    }
}
