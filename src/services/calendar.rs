//! Month view and blocked-date management.

use chrono::{Datelike, Local, NaiveDate};

use crate::domain::calendar::{BlockedDates, CalendarMonth, MonthGrid};
use crate::dto::calendar::MonthQuery;
use crate::repository::{
    AppointmentReader, BlockedDateReader, BlockedDateWriter, ClientReader, ServiceReader,
};
use crate::services::appointments::enrich_all;
use crate::services::{ServiceError, ServiceResult};

/// Per-day appointment limit used when the caller gives none.
pub const DEFAULT_DAY_LIMIT: usize = 2;

/// Picks the requested month, falling back to the month of `today` for
/// missing parts.
pub fn resolve_month(query: &MonthQuery, today: NaiveDate) -> ServiceResult<CalendarMonth> {
    CalendarMonth::new(
        query.year.unwrap_or(today.year()),
        query.month.unwrap_or(today.month()),
    )
    .map_err(|err| {
        log::warn!("Rejected calendar query: {err}");
        ServiceError::from(err)
    })
}

/// Builds the six-week grid of `month` with appointments and blocked dates.
pub fn load_month<R>(
    repo: &R,
    month: CalendarMonth,
    per_day_limit: Option<usize>,
) -> ServiceResult<MonthGrid>
where
    R: ClientReader + ServiceReader + AppointmentReader + BlockedDateReader + ?Sized,
{
    let appointments = enrich_all(repo, repo.list_appointments_sorted()?)?;
    let blocked = repo.list_blocked_dates()?;

    Ok(MonthGrid::build(month, &appointments, &blocked, per_day_limit))
}

/// Month grid for a query string, relative to the studio's local date.
pub fn load_month_for_query<R>(
    repo: &R,
    query: &MonthQuery,
    default_limit: usize,
) -> ServiceResult<MonthGrid>
where
    R: ClientReader + ServiceReader + AppointmentReader + BlockedDateReader + ?Sized,
{
    let month = resolve_month(query, Local::now().date_naive())?;
    load_month(repo, month, Some(query.limit.unwrap_or(default_limit)))
}

/// Blocks an open date or reopens a blocked one. Returns whether the date is
/// blocked afterwards. Existing appointments on the date are left alone.
pub fn toggle_blocked_date<R>(repo: &R, date: NaiveDate) -> ServiceResult<bool>
where
    R: BlockedDateReader + BlockedDateWriter + ?Sized,
{
    let blocked = repo.is_date_blocked(date)?;

    let result = if blocked {
        repo.unblock_date(date).map(|_| false)
    } else {
        repo.block_date(date).map(|_| true)
    };

    result.map_err(|err| {
        log::error!("Failed to toggle blocked date {date}: {err}");
        ServiceError::from(err)
    })
}

pub fn list_blocked_dates<R>(repo: &R) -> ServiceResult<BlockedDates>
where
    R: BlockedDateReader + ?Sized,
{
    repo.list_blocked_dates().map_err(ServiceError::from)
}
