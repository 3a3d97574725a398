use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use log::warn;

use crate::domain::appointment::{
    Appointment as DomainAppointment, AppointmentStatus, NewAppointment as DomainNewAppointment,
};
use crate::domain::types::{
    AppointmentId, ClientId, Price, SanitizedText, ServiceId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::appointments)]
/// Diesel model for [`crate::domain::appointment::Appointment`].
pub struct Appointment {
    pub id: i32,
    pub client_id: i32,
    pub service_id: Option<i32>,
    pub service_name: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub status: String,
    pub notes: Option<String>,
    pub price: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::appointments)]
pub struct NewAppointment<'a> {
    pub client_id: i32,
    pub service_id: Option<i32>,
    pub service_name: Option<&'a str>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub status: &'static str,
    pub notes: Option<&'a str>,
    pub price: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::appointments, treat_none_as_null = true)]
pub struct AppointmentChangeset<'a> {
    pub client_id: i32,
    pub service_id: Option<i32>,
    pub service_name: Option<&'a str>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub status: &'static str,
    pub notes: Option<&'a str>,
    pub price: Option<String>,
}

impl TryFrom<Appointment> for DomainAppointment {
    type Error = TypeConstraintError;

    fn try_from(row: Appointment) -> Result<Self, Self::Error> {
        // A broken price must not make the whole appointment unreadable.
        let price = row.price.as_deref().and_then(|raw| match raw.parse::<Price>() {
            Ok(price) => Some(price),
            Err(err) => {
                warn!("Ignoring malformed price `{raw}` on appointment {}: {err}", row.id);
                None
            }
        });

        Ok(Self {
            id: AppointmentId::new(row.id)?,
            client_id: ClientId::new(row.client_id)?,
            service_id: row.service_id.map(ServiceId::new).transpose()?,
            service_name: row.service_name,
            date: row.scheduled_date,
            time: row.scheduled_time,
            status: row.status.parse::<AppointmentStatus>()?,
            notes: SanitizedText::optional(row.notes),
            price,
            created_at: row.created_at,
        })
    }
}

impl<'a> NewAppointment<'a> {
    pub fn from_domain(appointment: &'a DomainNewAppointment, created_at: NaiveDateTime) -> Self {
        Self {
            client_id: appointment.client_id.get(),
            service_id: appointment.service_id.map(ServiceId::get),
            service_name: appointment.service_name.as_deref(),
            scheduled_date: appointment.date,
            scheduled_time: appointment.time,
            status: AppointmentStatus::Scheduled.as_str(),
            notes: appointment.notes.as_ref().map(SanitizedText::as_str),
            price: appointment.price.map(|p| p.amount().to_string()),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainAppointment> for AppointmentChangeset<'a> {
    fn from(appointment: &'a DomainAppointment) -> Self {
        Self {
            client_id: appointment.client_id.get(),
            service_id: appointment.service_id.map(ServiceId::get),
            service_name: appointment.service_name.as_deref(),
            scheduled_date: appointment.date,
            scheduled_time: appointment.time,
            status: appointment.status.as_str(),
            notes: appointment.notes.as_ref().map(SanitizedText::as_str),
            price: appointment.price.map(|p| p.amount().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn row(price: Option<&str>, status: &str) -> Appointment {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        Appointment {
            id: 3,
            client_id: 1,
            service_id: Some(2),
            service_name: None,
            scheduled_date: date,
            scheduled_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            status: status.to_string(),
            notes: Some("  ".to_string()),
            price: price.map(str::to_string),
            created_at: date.and_hms_opt(8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn row_into_domain() {
        let appointment = DomainAppointment::try_from(row(Some("25.00"), "concluido")).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Completed);
        assert_eq!(appointment.price.unwrap().amount(), Decimal::new(2500, 2));
        assert_eq!(appointment.service_id.unwrap().get(), 2);
        assert!(appointment.notes.is_none());
    }

    #[test]
    fn malformed_price_becomes_none() {
        let appointment = DomainAppointment::try_from(row(Some("R$ vinte"), "agendado")).unwrap();
        assert!(appointment.price.is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(DomainAppointment::try_from(row(None, "pending")).is_err());
    }
}
