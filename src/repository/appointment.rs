use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::types::{AppointmentId, ClientId};
use crate::models::appointment::{
    Appointment as DbAppointment, AppointmentChangeset as DbAppointmentChangeset,
    NewAppointment as DbNewAppointment,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AppointmentReader, AppointmentWriter, DieselRepository, local_now};

fn into_domain(rows: Vec<DbAppointment>) -> RepositoryResult<Vec<Appointment>> {
    rows.into_iter()
        .map(|a| Appointment::try_from(a).map_err(RepositoryError::from))
        .collect()
}

impl AppointmentReader for DieselRepository {
    fn get_appointment_by_id(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let appointment = appointments::table
            .find(id.get())
            .first::<DbAppointment>(&mut conn)
            .optional()?;

        appointment
            .map(Appointment::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_appointments(&self) -> RepositoryResult<Vec<Appointment>> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let rows = appointments::table
            .order(appointments::id.asc())
            .load::<DbAppointment>(&mut conn)?;
        into_domain(rows)
    }

    fn list_appointments_sorted(&self) -> RepositoryResult<Vec<Appointment>> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let rows = appointments::table
            .order((
                appointments::scheduled_date.asc(),
                appointments::scheduled_time.asc(),
                appointments::id.asc(),
            ))
            .load::<DbAppointment>(&mut conn)?;
        into_domain(rows)
    }

    fn list_appointments_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<Appointment>> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let rows = appointments::table
            .filter(appointments::scheduled_date.eq(date))
            .order((appointments::scheduled_time.asc(), appointments::id.asc()))
            .load::<DbAppointment>(&mut conn)?;
        into_domain(rows)
    }

    fn list_appointments_by_client(
        &self,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<Appointment>> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let rows = appointments::table
            .filter(appointments::client_id.eq(client_id.get()))
            .order(appointments::id.asc())
            .load::<DbAppointment>(&mut conn)?;
        into_domain(rows)
    }
}

fn insert_appointment(
    conn: &mut SqliteConnection,
    new_appointment: &NewAppointment,
) -> RepositoryResult<Appointment> {
    use crate::schema::appointments;

    let insertable = DbNewAppointment::from_domain(new_appointment, local_now());
    let created = diesel::insert_into(appointments::table)
        .values(&insertable)
        .get_result::<DbAppointment>(conn)?;

    Ok(Appointment::try_from(created)?)
}

fn apply_update(
    conn: &mut SqliteConnection,
    id: AppointmentId,
    updates: &UpdateAppointment,
) -> RepositoryResult<Option<Appointment>> {
    use crate::schema::appointments;

    let Some(current) = appointments::table
        .find(id.get())
        .first::<DbAppointment>(conn)
        .optional()?
    else {
        return Ok(None);
    };

    let mut appointment = Appointment::try_from(current)?;
    updates.apply_to(&mut appointment);

    let updated = diesel::update(appointments::table.find(id.get()))
        .set(&DbAppointmentChangeset::from(&appointment))
        .get_result::<DbAppointment>(conn)?;

    Ok(Some(Appointment::try_from(updated)?))
}

impl AppointmentWriter for DieselRepository {
    fn create_appointment(
        &self,
        new_appointment: &NewAppointment,
    ) -> RepositoryResult<Appointment> {
        let mut conn = self.conn()?;
        insert_appointment(&mut conn, new_appointment)
    }

    fn create_appointments(
        &self,
        new_appointments: &[NewAppointment],
    ) -> RepositoryResult<Vec<Appointment>> {
        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            new_appointments
                .iter()
                .map(|new_appointment| insert_appointment(conn, new_appointment))
                .collect()
        })
    }

    fn update_appointment(
        &self,
        id: AppointmentId,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Option<Appointment>> {
        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| apply_update(conn, id, updates))
    }

    fn delete_appointment(&self, id: AppointmentId) -> RepositoryResult<bool> {
        use crate::schema::appointments;

        let mut conn = self.conn()?;
        let affected = diesel::delete(appointments::table.find(id.get())).execute(&mut conn)?;
        Ok(affected > 0)
    }

    fn set_appointments_status(
        &self,
        ids: &[AppointmentId],
        status: AppointmentStatus,
    ) -> RepositoryResult<Vec<Appointment>> {
        let updates = UpdateAppointment::status(status);
        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            ids.iter()
                .map(|id| {
                    apply_update(conn, *id, &updates)
                        .and_then(|updated| updated.ok_or(RepositoryError::NotFound))
                })
                .collect()
        })
    }
}
