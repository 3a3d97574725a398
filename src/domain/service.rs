use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{DurationMinutes, Price, ServiceId, ServiceName};

/// Catalog entry offered by the studio.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    pub name: ServiceName,
    pub price: Price,
    pub duration: DurationMinutes,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewService {
    pub name: ServiceName,
    pub price: Price,
    pub duration: DurationMinutes,
}

impl NewService {
    #[must_use]
    pub fn new(name: ServiceName, price: Price, duration: DurationMinutes) -> Self {
        Self {
            name,
            price,
            duration,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateService {
    pub name: Option<ServiceName>,
    pub price: Option<Price>,
    pub duration: Option<DurationMinutes>,
}

impl UpdateService {
    pub fn apply_to(&self, service: &mut Service) {
        if let Some(name) = &self.name {
            service.name = name.clone();
        }
        if let Some(price) = self.price {
            service.price = price;
        }
        if let Some(duration) = self.duration {
            service.duration = duration;
        }
    }
}
