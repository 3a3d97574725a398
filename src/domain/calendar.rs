//! Month grid and blocked-date types backing the calendar view.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::domain::enrichment::AppointmentView;
use crate::domain::types::TypeConstraintError;

/// Number of cells in a month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

/// Dates marked unavailable for new appointments, ordered for display.
pub type BlockedDates = BTreeSet<NaiveDate>;

/// ISO `YYYY-MM-DD` key used to persist a blocked date.
pub fn blocked_date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a blocked-date key back into a date.
pub fn parse_blocked_date_key(key: &str) -> Result<NaiveDate, TypeConstraintError> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d")
        .map_err(|_| TypeConstraintError::InvalidValue(format!("invalid date `{key}`")))
}

/// A calendar month (`month` in `1..=12`) whose whole six-week grid lies
/// within the representable date range.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
    #[serde(skip)]
    grid_start: NaiveDate,
}

/// Sunday opening the grid of `year`-`month`, if all 42 cells exist.
fn grid_start(year: i32, month: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let start = first.checked_sub_days(Days::new(lead))?;
    start.checked_add_days(Days::new(GRID_CELLS as u64 - 1))?;
    Some(start)
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, TypeConstraintError> {
        let grid_start = grid_start(year, month).ok_or_else(|| {
            TypeConstraintError::InvalidValue(format!("invalid month {year}-{month}"))
        })?;
        Ok(Self {
            year,
            month,
            grid_start,
        })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self, TypeConstraintError> {
        Self::new(date.year(), date.month())
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    /// First cell of the grid, a Sunday on or before the first of the month.
    pub const fn grid_start(self) -> NaiveDate {
        self.grid_start
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// `None` past the earliest month with a full grid.
    pub fn previous(self) -> Option<Self> {
        let (year, month) = if self.month == 1 {
            (self.year.checked_sub(1)?, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self::new(year, month).ok()
    }

    /// `None` past the latest month with a full grid.
    pub fn next(self) -> Option<Self> {
        let (year, month) = if self.month == 12 {
            (self.year.checked_add(1)?, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self::new(year, month).ok()
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub blocked: bool,
    /// Appointments of the day ordered by time, possibly truncated.
    pub appointments: Vec<AppointmentView>,
    /// How many appointments were cut by the per-day limit.
    pub hidden_appointments: usize,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MonthGrid {
    pub month: CalendarMonth,
    pub days: Vec<CalendarDay>,
}

impl MonthGrid {
    /// Lays out the six weeks (Sunday first) covering `month`.
    pub fn build(
        month: CalendarMonth,
        appointments: &[AppointmentView],
        blocked: &BlockedDates,
        per_day_limit: Option<usize>,
    ) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<&AppointmentView>> = BTreeMap::new();
        for view in appointments {
            by_date.entry(view.appointment.date).or_default().push(view);
        }

        let days = month
            .grid_start()
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| {
                let mut todays = by_date.remove(&date).unwrap_or_default();
                todays.sort_by_key(|v| v.appointment.time);
                let total = todays.len();
                let shown = per_day_limit.map_or(total, |limit| limit.min(total));

                CalendarDay {
                    date,
                    in_current_month: month.contains(date),
                    blocked: blocked.contains(&date),
                    appointments: todays.into_iter().take(shown).cloned().collect(),
                    hidden_appointments: total - shown,
                }
            })
            .collect();

        Self { month, days }
    }
}
