use serde::Deserialize;

/// Query string of `GET /calendar`; missing parts default to the current month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// Appointments listed per day before the rest are counted as hidden.
    pub limit: Option<usize>,
}
