//! Read-time join of appointments with their client and service.
//!
//! Nothing computed here is ever written back to storage. Dangling client or
//! service ids degrade to placeholders instead of failing the read.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::appointment::Appointment;
use crate::domain::client::Client;
use crate::domain::service::Service;
use crate::domain::types::{ClientId, ServiceId};

/// Appointment together with the display fields resolved at read time.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    /// Name of the referenced client, absent when the client is gone.
    pub client_name: Option<String>,
    /// Referenced service name, else the legacy free-text name.
    #[serde(rename = "service")]
    pub service_label: Option<String>,
    /// Referenced service price, else the stored snapshot, else zero.
    pub effective_price: Decimal,
}

impl AppointmentView {
    /// Builds the view from the already looked-up client and service.
    pub fn resolve(
        appointment: Appointment,
        client: Option<&Client>,
        service: Option<&Service>,
    ) -> Self {
        let client_name = client.map(|c| c.name.as_str().to_string());
        let service_label = service
            .map(|s| s.name.as_str().to_string())
            .or_else(|| appointment.service_name.clone());
        let effective_price = service
            .map(|s| s.price.amount())
            .or_else(|| appointment.price.map(|p| p.amount()))
            .unwrap_or(Decimal::ZERO);

        Self {
            appointment,
            client_name,
            service_label,
            effective_price,
        }
    }
}

/// Enriches every appointment, preserving input order.
pub fn enrich_appointments(
    appointments: Vec<Appointment>,
    clients: &[Client],
    services: &[Service],
) -> Vec<AppointmentView> {
    let clients: HashMap<ClientId, &Client> = clients.iter().map(|c| (c.id, c)).collect();
    let services: HashMap<ServiceId, &Service> = services.iter().map(|s| (s.id, s)).collect();

    appointments
        .into_iter()
        .map(|a| {
            let client = clients.get(&a.client_id).copied();
            let service = a.service_id.and_then(|id| services.get(&id).copied());
            AppointmentView::resolve(a, client, service)
        })
        .collect()
}

/// Enriches a single appointment.
pub fn enrich_appointment(
    appointment: Appointment,
    clients: &[Client],
    services: &[Service],
) -> AppointmentView {
    let client = clients.iter().find(|c| c.id == appointment.client_id);
    let service = appointment
        .service_id
        .and_then(|id| services.iter().find(|s| s.id == id));
    AppointmentView::resolve(appointment, client, service)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::domain::appointment::AppointmentStatus;
    use crate::domain::types::{
        AppointmentId, ClientName, DurationMinutes, PhoneNumber, Price, ServiceName,
    };

    fn noon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn client(id: i32, name: &str) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            name: ClientName::new(name).unwrap(),
            phone: PhoneNumber::new("11988887777").unwrap(),
            tax_id: None,
            created_at: noon(),
        }
    }

    fn service(id: i32, name: &str, cents: i64) -> Service {
        Service {
            id: ServiceId::new(id).unwrap(),
            name: ServiceName::new(name).unwrap(),
            price: Price::new(Decimal::new(cents, 2)).unwrap(),
            duration: DurationMinutes::new(30).unwrap(),
            created_at: noon(),
        }
    }

    fn appointment(client_id: i32, service_id: Option<i32>) -> Appointment {
        Appointment {
            id: AppointmentId::new(1).unwrap(),
            client_id: ClientId::new(client_id).unwrap(),
            service_id: service_id.map(|id| ServiceId::new(id).unwrap()),
            service_name: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            status: AppointmentStatus::Scheduled,
            notes: None,
            price: None,
            created_at: noon(),
        }
    }

    #[test]
    fn joins_client_and_service() {
        let view = enrich_appointment(
            appointment(1, Some(3)),
            &[client(1, "Maria Silva")],
            &[service(3, "Manicure Simples", 2500)],
        );
        assert_eq!(view.client_name.as_deref(), Some("Maria Silva"));
        assert_eq!(view.service_label.as_deref(), Some("Manicure Simples"));
        assert_eq!(view.effective_price, Decimal::new(2500, 2));
    }

    #[test]
    fn dangling_client_leaves_name_absent() {
        let view = enrich_appointment(appointment(42, None), &[client(1, "Maria")], &[]);
        assert!(view.client_name.is_none());
        assert!(view.service_label.is_none());
        assert_eq!(view.effective_price, Decimal::ZERO);
    }

    #[test]
    fn missing_service_falls_back_to_embedded_fields() {
        let mut stored = appointment(1, Some(9));
        stored.service_name = Some("Pedicure".to_string());
        stored.price = Some(Price::new(Decimal::new(3000, 2)).unwrap());

        let view = enrich_appointment(stored, &[client(1, "Maria")], &[]);
        assert_eq!(view.service_label.as_deref(), Some("Pedicure"));
        assert_eq!(view.effective_price, Decimal::new(3000, 2));
    }

    #[test]
    fn live_service_price_wins_over_snapshot() {
        let mut stored = appointment(1, Some(3));
        stored.price = Some(Price::new(Decimal::new(2000, 2)).unwrap());

        let view = enrich_appointment(stored, &[], &[service(3, "Gel", 4500)]);
        assert_eq!(view.effective_price, Decimal::new(4500, 2));
    }
}
