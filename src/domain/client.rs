use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientName, PhoneNumber, TaxId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub phone: PhoneNumber,
    /// National tax id (CPF); unique across clients when present.
    pub tax_id: Option<TaxId>,
    /// Registration timestamp in the studio's local time.
    pub created_at: NaiveDateTime,
}

impl Client {
    /// Case-insensitive match on the name, or a plain substring match on the
    /// phone or the tax id digits.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let lowered = term.to_lowercase();
        let digits: String = term.chars().filter(char::is_ascii_digit).collect();

        self.name.to_lowercase().contains(&lowered)
            || self.phone.as_str().contains(term)
            || (!digits.is_empty() && self.phone.as_str().contains(&digits))
            || self
                .tax_id
                .as_ref()
                .is_some_and(|t| !digits.is_empty() && t.as_str().contains(&digits))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewClient {
    pub name: ClientName,
    pub phone: PhoneNumber,
    pub tax_id: Option<TaxId>,
}

impl NewClient {
    #[must_use]
    pub fn new(name: ClientName, phone: PhoneNumber, tax_id: Option<TaxId>) -> Self {
        Self {
            name,
            phone,
            tax_id,
        }
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateClient {
    pub name: Option<ClientName>,
    pub phone: Option<PhoneNumber>,
    /// `Some(None)` clears the tax id.
    pub tax_id: Option<Option<TaxId>>,
}

impl UpdateClient {
    /// Applies the present fields onto `client`.
    pub fn apply_to(&self, client: &mut Client) {
        if let Some(name) = &self.name {
            client.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            client.phone = phone.clone();
        }
        if let Some(tax_id) = &self.tax_id {
            client.tax_id = tax_id.clone();
        }
    }
}
