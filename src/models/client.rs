use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, NewClient as DomainNewClient};
use crate::domain::types::{ClientId, ClientName, PhoneNumber, TaxId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub tax_id: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub tax_id: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients, treat_none_as_null = true)]
/// Full column set written back after a partial update has been applied.
pub struct ClientChangeset<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub tax_id: Option<&'a str>,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            name: ClientName::new(client.name)?,
            phone: PhoneNumber::new(client.phone)?,
            tax_id: client.tax_id.as_deref().map(TaxId::new).transpose()?,
            created_at: client.created_at,
        })
    }
}

impl<'a> NewClient<'a> {
    pub fn from_domain(client: &'a DomainNewClient, created_at: NaiveDateTime) -> Self {
        Self {
            name: client.name.as_str(),
            phone: client.phone.as_str(),
            tax_id: client.tax_id.as_ref().map(TaxId::as_str),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainClient> for ClientChangeset<'a> {
    fn from(client: &'a DomainClient) -> Self {
        Self {
            name: client.name.as_str(),
            phone: client.phone.as_str(),
            tax_id: client.tax_id.as_ref().map(TaxId::as_str),
        }
    }
}
