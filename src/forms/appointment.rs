//! Forms for scheduling and editing appointments.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::domain::appointment::{AppointmentStatus, NewAppointment, UpdateAppointment};
use crate::domain::types::{ClientId, Price, SanitizedText, ServiceId};
use crate::forms::{FormError, non_blank, parse_time};

#[derive(Debug, Deserialize, Validate)]
/// Payload for scheduling a single appointment.
pub struct AppointmentForm {
    #[validate(range(min = 1))]
    pub client_id: i32,
    #[serde(default)]
    pub service_id: Option<i32>,
    /// Free-text service used when no catalog entry applies.
    #[serde(default)]
    pub service_name: Option<String>,
    pub date: NaiveDate,
    /// `HH:MM`
    #[validate(length(min = 1))]
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Stored instead of the service's price as the snapshot shown once the
    /// service is deleted.
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl TryFrom<AppointmentForm> for NewAppointment {
    type Error = FormError;

    fn try_from(form: AppointmentForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let mut appointment = NewAppointment::new(
            ClientId::new(form.client_id)?,
            form.service_id.map(ServiceId::new).transpose()?,
            form.date,
            parse_time(&form.time)?,
        )
        .notes(SanitizedText::optional(form.notes))
        .price(form.price.map(Price::new).transpose()?);

        if let Some(name) = non_blank(form.service_name) {
            appointment = appointment.service_name(name.trim());
        }

        Ok(appointment)
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Multi-service checkout: one appointment per selected service, all sharing
/// the client, date and time.
pub struct BookingForm {
    #[validate(range(min = 1))]
    pub client_id: i32,
    pub service_ids: Vec<i32>,
    pub date: NaiveDate,
    #[validate(length(min = 1))]
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Validated booking request.
#[derive(Clone, Debug, PartialEq)]
pub struct Booking {
    pub client_id: ClientId,
    pub service_ids: Vec<ServiceId>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<SanitizedText>,
}

impl TryFrom<BookingForm> for Booking {
    type Error = FormError;

    fn try_from(form: BookingForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let mut service_ids = form
            .service_ids
            .into_iter()
            .map(ServiceId::new)
            .collect::<Result<Vec<_>, _>>()?;
        let mut seen = HashSet::new();
        service_ids.retain(|id| seen.insert(*id));
        if service_ids.is_empty() {
            return Err(FormError::NoServices);
        }

        Ok(Booking {
            client_id: ClientId::new(form.client_id)?,
            service_ids,
            date: form.date,
            time: parse_time(&form.time)?,
            notes: SanitizedText::optional(form.notes),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    /// `agendado`/`concluido`/`cancelado` or their English names.
    pub status: String,
}

impl TryFrom<StatusForm> for AppointmentStatus {
    type Error = FormError;

    fn try_from(form: StatusForm) -> Result<Self, Self::Error> {
        Ok(AppointmentStatus::from_str(&form.status)?)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Partial appointment update. Blank `notes` or `service_name` clear them.
pub struct UpdateAppointmentForm {
    #[validate(range(min = 1))]
    pub client_id: Option<i32>,
    #[validate(range(min = 1))]
    pub service_id: Option<i32>,
    pub service_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub price: Option<Decimal>,
}

impl TryFrom<UpdateAppointmentForm> for UpdateAppointment {
    type Error = FormError;

    fn try_from(form: UpdateAppointmentForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(UpdateAppointment {
            client_id: form.client_id.map(ClientId::new).transpose()?,
            service_id: form
                .service_id
                .map(|id| ServiceId::new(id).map(Some))
                .transpose()?,
            service_name: form
                .service_name
                .map(|name| Some(name.trim().to_string()).filter(|n| !n.is_empty())),
            date: form.date,
            time: form.time.as_deref().map(parse_time).transpose()?,
            status: form
                .status
                .as_deref()
                .map(AppointmentStatus::from_str)
                .transpose()?,
            notes: form.notes.map(|n| SanitizedText::optional(Some(n))),
            price: form
                .price
                .map(|p| Price::new(p).map(Some))
                .transpose()?,
        })
    }
}
