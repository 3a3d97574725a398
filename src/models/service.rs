use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::service::{NewService as DomainNewService, Service as DomainService};
use crate::domain::types::{DurationMinutes, ServiceId, ServiceName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::services)]
/// Diesel model for [`crate::domain::service::Service`]. Prices are stored as
/// decimal text.
pub struct Service {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub duration: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService<'a> {
    pub name: &'a str,
    pub price: String,
    pub duration: i32,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::services)]
pub struct ServiceChangeset<'a> {
    pub name: &'a str,
    pub price: String,
    pub duration: i32,
}

impl TryFrom<Service> for DomainService {
    type Error = TypeConstraintError;

    fn try_from(service: Service) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ServiceId::new(service.id)?,
            name: ServiceName::new(service.name)?,
            price: service.price.parse()?,
            duration: DurationMinutes::new(service.duration)?,
            created_at: service.created_at,
        })
    }
}

impl<'a> NewService<'a> {
    pub fn from_domain(service: &'a DomainNewService, created_at: NaiveDateTime) -> Self {
        Self {
            name: service.name.as_str(),
            price: service.price.amount().to_string(),
            duration: service.duration.get(),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainService> for ServiceChangeset<'a> {
    fn from(service: &'a DomainService) -> Self {
        Self {
            name: service.name.as_str(),
            price: service.price.amount().to_string(),
            duration: service.duration.get(),
        }
    }
}
