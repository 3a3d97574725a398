use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::calendar::BlockedDates;
use crate::models::blocked_date::BlockedDate as DbBlockedDate;
use crate::repository::errors::RepositoryResult;
use crate::repository::{BlockedDateReader, BlockedDateWriter, DieselRepository};

impl BlockedDateReader for DieselRepository {
    fn list_blocked_dates(&self) -> RepositoryResult<BlockedDates> {
        use crate::schema::blocked_dates;

        let mut conn = self.conn()?;
        let dates = blocked_dates::table
            .select(blocked_dates::blocked_date)
            .load::<NaiveDate>(&mut conn)?;

        Ok(dates.into_iter().collect())
    }

    fn is_date_blocked(&self, date: NaiveDate) -> RepositoryResult<bool> {
        use crate::schema::blocked_dates;

        let mut conn = self.conn()?;
        let found = blocked_dates::table
            .find(date)
            .select(blocked_dates::blocked_date)
            .first::<NaiveDate>(&mut conn)
            .optional()?;

        Ok(found.is_some())
    }
}

impl BlockedDateWriter for DieselRepository {
    fn block_date(&self, date: NaiveDate) -> RepositoryResult<bool> {
        use crate::schema::blocked_dates;

        let mut conn = self.conn()?;
        let inserted = diesel::insert_into(blocked_dates::table)
            .values(&DbBlockedDate { blocked_date: date })
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        Ok(inserted > 0)
    }

    fn unblock_date(&self, date: NaiveDate) -> RepositoryResult<bool> {
        use crate::schema::blocked_dates;

        let mut conn = self.conn()?;
        let removed = diesel::delete(blocked_dates::table.find(date)).execute(&mut conn)?;

        Ok(removed > 0)
    }
}
