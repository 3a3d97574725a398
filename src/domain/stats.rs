//! Dashboard counters derived from the store.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::appointment::AppointmentStatus;
use crate::domain::client::Client;
use crate::domain::enrichment::AppointmentView;

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_clients: usize,
    pub appointments_today: usize,
    /// All-time revenue of completed appointments.
    pub revenue_total: Decimal,
    /// Revenue of completed appointments dated on or after the first of the month.
    pub revenue_month: Decimal,
    pub total_photos: usize,
    /// Clients registered on or after the first of the month.
    pub new_clients: usize,
}

/// First calendar day of `date`'s month.
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl DashboardStats {
    pub fn compute(
        today: NaiveDate,
        clients: &[Client],
        appointments: &[AppointmentView],
        total_photos: usize,
    ) -> Self {
        let month_start = first_day_of_month(today);

        let mut stats = DashboardStats {
            total_clients: clients.len(),
            total_photos,
            new_clients: clients
                .iter()
                .filter(|c| c.created_at.date() >= month_start)
                .count(),
            ..DashboardStats::default()
        };

        for view in appointments {
            let appointment = &view.appointment;
            if appointment.date == today {
                stats.appointments_today += 1;
            }
            if appointment.status != AppointmentStatus::Completed {
                continue;
            }
            stats.revenue_total += view.effective_price;
            if appointment.date >= month_start {
                stats.revenue_month += view.effective_price;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::domain::appointment::Appointment;
    use crate::domain::types::{AppointmentId, ClientId, ClientName, PhoneNumber, Price};

    fn at(date: NaiveDate) -> chrono::NaiveDateTime {
        date.and_hms_opt(8, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn view(id: i32, date: NaiveDate, status: AppointmentStatus, cents: i64) -> AppointmentView {
        let appointment = Appointment {
            id: AppointmentId::new(id).unwrap(),
            client_id: ClientId::new(1).unwrap(),
            service_id: None,
            service_name: None,
            date,
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            status,
            notes: None,
            price: Some(Price::new(Decimal::new(cents, 2)).unwrap()),
            created_at: at(date),
        };
        AppointmentView::resolve(appointment, None, None)
    }

    fn client(id: i32, registered: NaiveDate) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            name: ClientName::new(format!("Client {id}")).unwrap(),
            phone: PhoneNumber::new("11999990000").unwrap(),
            tax_id: None,
            created_at: at(registered),
        }
    }

    #[test]
    fn sums_completed_revenue_by_period() {
        let today = day(2026, 10, 16);
        let appointments = vec![
            view(1, today, AppointmentStatus::Scheduled, 2500),
            view(2, day(2026, 10, 2), AppointmentStatus::Completed, 4000),
            view(3, day(2026, 9, 28), AppointmentStatus::Completed, 3000),
            view(4, today, AppointmentStatus::Canceled, 9900),
        ];
        let clients = vec![client(1, day(2026, 8, 1)), client(2, day(2026, 10, 1))];

        let stats = DashboardStats::compute(today, &clients, &appointments, 5);

        assert_eq!(stats.total_clients, 2);
        assert_eq!(stats.new_clients, 1);
        assert_eq!(stats.appointments_today, 2);
        assert_eq!(stats.revenue_total, Decimal::new(7000, 2));
        assert_eq!(stats.revenue_month, Decimal::new(4000, 2));
        assert_eq!(stats.total_photos, 5);
        assert!(stats.revenue_total >= stats.revenue_month);
    }

    #[test]
    fn completed_without_price_counts_as_zero() {
        let today = day(2026, 10, 16);
        let mut free = view(1, today, AppointmentStatus::Completed, 0);
        free.appointment.price = None;
        free.effective_price = Decimal::ZERO;

        let stats = DashboardStats::compute(today, &[], &[free], 0);
        assert_eq!(stats.revenue_total, Decimal::ZERO);
        assert_eq!(stats.appointments_today, 1);
    }

    #[test]
    fn month_start_is_first_day() {
        assert_eq!(first_day_of_month(day(2026, 2, 28)), day(2026, 2, 1));
    }
}
