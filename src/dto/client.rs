use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::enrichment::AppointmentView;

/// Query string of `GET /clients`.
#[derive(Debug, Default, Deserialize)]
pub struct ClientSearchQuery {
    pub search: Option<String>,
}

/// Completed visits of one client, newest first.
#[derive(Debug, Serialize, PartialEq)]
pub struct ClientHistory {
    pub client: Client,
    pub appointments: Vec<AppointmentView>,
    pub total_spent: Decimal,
}
