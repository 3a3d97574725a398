use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::types::{
    AppointmentId, ClientId, Price, SanitizedText, ServiceId, TypeConstraintError,
};

/// Lifecycle state of an appointment.
///
/// `Completed` and `Canceled` are terminal.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    #[default]
    #[serde(rename = "agendado", alias = "scheduled")]
    Scheduled,
    #[serde(rename = "concluido", alias = "completed")]
    Completed,
    #[serde(rename = "cancelado", alias = "canceled")]
    Canceled,
}

impl AppointmentStatus {
    /// Persisted representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "agendado",
            AppointmentStatus::Completed => "concluido",
            AppointmentStatus::Canceled => "cancelado",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }

    /// Re-applying the current status is always accepted.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        self == next
            || matches!(
                (self, next),
                (
                    AppointmentStatus::Scheduled,
                    AppointmentStatus::Completed | AppointmentStatus::Canceled
                )
            )
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "agendado" | "scheduled" => Ok(AppointmentStatus::Scheduled),
            "concluido" | "completed" => Ok(AppointmentStatus::Completed),
            "cancelado" | "canceled" | "cancelled" => Ok(AppointmentStatus::Canceled),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown appointment status `{other}`"
            ))),
        }
    }
}

/// Stored appointment record. Client and service are referenced by id only;
/// display fields come from [`crate::domain::enrichment`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: ClientId,
    pub service_id: Option<ServiceId>,
    /// Free-text service name kept by legacy records without a service id.
    pub service_name: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub notes: Option<SanitizedText>,
    /// Price snapshot taken at creation.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<Price>,
    pub created_at: NaiveDateTime,
}

/// Reads a stored price, mapping anything unparseable to `None`.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }))
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub client_id: ClientId,
    pub service_id: Option<ServiceId>,
    pub service_name: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<SanitizedText>,
    /// Explicit price; when absent the referenced service's price is copied.
    pub price: Option<Price>,
}

impl NewAppointment {
    #[must_use]
    pub fn new(
        client_id: ClientId,
        service_id: Option<ServiceId>,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            client_id,
            service_id,
            service_name: None,
            date,
            time,
            notes: None,
            price: None,
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: Option<SanitizedText>) -> Self {
        self.notes = notes;
        self
    }

    #[must_use]
    pub fn price(mut self, price: Option<Price>) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into()).filter(|s: &String| !s.trim().is_empty());
        self
    }
}

/// Partial appointment update. Nested options distinguish "leave as is"
/// (`None`) from "clear" (`Some(None)`).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateAppointment {
    pub client_id: Option<ClientId>,
    pub service_id: Option<Option<ServiceId>>,
    pub service_name: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<Option<SanitizedText>>,
    pub price: Option<Option<Price>>,
}

impl UpdateAppointment {
    /// Shorthand for a status-only update.
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, appointment: &mut Appointment) {
        if let Some(client_id) = self.client_id {
            appointment.client_id = client_id;
        }
        if let Some(service_id) = self.service_id {
            appointment.service_id = service_id;
        }
        if let Some(service_name) = &self.service_name {
            appointment.service_name = service_name.clone();
        }
        if let Some(date) = self.date {
            appointment.date = date;
        }
        if let Some(time) = self.time {
            appointment.time = time;
        }
        if let Some(status) = self.status {
            appointment.status = status;
        }
        if let Some(notes) = &self.notes {
            appointment.notes = notes.clone();
        }
        if let Some(price) = self.price {
            appointment.price = price;
        }
    }
}
