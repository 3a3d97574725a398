use chrono::NaiveDate;
use diesel::prelude::*;

#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::blocked_dates)]
/// Row of the blocked date set.
pub struct BlockedDate {
    pub blocked_date: NaiveDate,
}
