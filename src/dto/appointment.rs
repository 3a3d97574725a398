use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::enrichment::AppointmentView;
use crate::domain::types::ClientId;

/// Scheduled appointments of one client on one date, served together.
#[derive(Debug, Serialize, PartialEq)]
pub struct AttendanceSession {
    pub client_id: ClientId,
    pub client_name: Option<String>,
    pub date: NaiveDate,
    pub appointments: Vec<AppointmentView>,
    /// Sum of the effective prices.
    pub total: Decimal,
}

impl AttendanceSession {
    pub fn new(client_id: ClientId, date: NaiveDate, appointments: Vec<AppointmentView>) -> Self {
        let client_name = appointments.iter().find_map(|v| v.client_name.clone());
        let total = appointments.iter().map(|v| v.effective_price).sum();

        Self {
            client_id,
            client_name,
            date,
            appointments,
            total,
        }
    }
}
