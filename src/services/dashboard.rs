use chrono::{Local, NaiveDate};

use crate::domain::enrichment::enrich_appointments;
use crate::domain::stats::DashboardStats;
use crate::dto::dashboard::DashboardData;
use crate::repository::{AppointmentReader, ClientReader, PhotoReader, ServiceReader};
use crate::services::ServiceResult;

/// Statistics and schedule as of `today`.
pub fn load_dashboard_for<R>(repo: &R, today: NaiveDate) -> ServiceResult<DashboardData>
where
    R: ClientReader + ServiceReader + AppointmentReader + PhotoReader + ?Sized,
{
    let clients = repo.list_clients()?;
    let services = repo.list_services()?;
    let appointments = enrich_appointments(
        repo.list_appointments_sorted()?,
        &clients,
        &services,
    );
    let total_photos = repo.list_photos()?.len();

    let stats = DashboardStats::compute(today, &clients, &appointments, total_photos);
    let today_views = appointments
        .into_iter()
        .filter(|v| v.appointment.date == today)
        .collect();

    Ok(DashboardData {
        stats,
        today: today_views,
    })
}

/// Dashboard for the studio's current local date.
pub fn load_dashboard<R>(repo: &R) -> ServiceResult<DashboardData>
where
    R: ClientReader + ServiceReader + AppointmentReader + PhotoReader + ?Sized,
{
    load_dashboard_for(repo, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    #[test]
    fn empty_store_yields_zeroes() {
        let repo = crate::repository::memory::MemoryRepository::new();
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let data = load_dashboard_for(&repo, today).unwrap();

        assert_eq!(data.stats.total_clients, 0);
        assert_eq!(data.stats.revenue_total, Decimal::ZERO);
        assert!(data.today.is_empty());
    }

    #[test]
    fn read_failure_is_propagated() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients()
            .returning(|| Err(RepositoryError::ConnectionError("pool exhausted".to_string())));

        let result = load_dashboard(&repo);

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
