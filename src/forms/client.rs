//! Forms for registering and editing clients.

use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{ClientName, PhoneNumber, TaxId};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
/// Payload for registering a client.
pub struct ClientForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
    /// CPF with or without punctuation; blank means none.
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl TryFrom<ClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let tax_id = non_blank(form.tax_id).map(TaxId::new).transpose()?;

        Ok(NewClient::new(
            ClientName::new(form.name)?,
            PhoneNumber::new(form.phone)?,
            tax_id,
        ))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Partial client update. An empty `tax_id` clears the stored one.
pub struct UpdateClientForm {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub phone: Option<String>,
    pub tax_id: Option<String>,
}

impl TryFrom<UpdateClientForm> for UpdateClient {
    type Error = FormError;

    fn try_from(form: UpdateClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let tax_id = match form.tax_id {
            None => None,
            Some(raw) if raw.trim().is_empty() => Some(None),
            Some(raw) => Some(Some(TaxId::new(raw)?)),
        };

        Ok(UpdateClient {
            name: form.name.map(ClientName::new).transpose()?,
            phone: form.phone.map(PhoneNumber::new).transpose()?,
            tax_id,
        })
    }
}
