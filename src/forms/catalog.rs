//! Forms for the service catalog.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::domain::service::{NewService, UpdateService};
use crate::domain::types::{DurationMinutes, Price, ServiceName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct ServiceForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Accepts a JSON number or a decimal string.
    pub price: Decimal,
    /// Duration in minutes.
    #[validate(range(min = 1))]
    pub duration: i32,
}

impl TryFrom<ServiceForm> for NewService {
    type Error = FormError;

    fn try_from(form: ServiceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewService::new(
            ServiceName::new(form.name)?,
            Price::new(form.price)?,
            DurationMinutes::new(form.duration)?,
        ))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateServiceForm {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
}

impl TryFrom<UpdateServiceForm> for UpdateService {
    type Error = FormError;

    fn try_from(form: UpdateServiceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(UpdateService {
            name: form.name.map(ServiceName::new).transpose()?,
            price: form.price.map(Price::new).transpose()?,
            duration: form.duration.map(DurationMinutes::new).transpose()?,
        })
    }
}
