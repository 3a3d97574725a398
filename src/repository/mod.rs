//! Entity store contracts and their backends.
//!
//! Every collection gets a reader and a writer trait. Unknown ids are reported
//! as `Ok(None)` / `Ok(false)`, never as errors. Three backends implement all
//! of them: [`DieselRepository`] (SQLite), and [`memory::MemoryRepository`]
//! either purely in memory or persisting each collection as a JSON file.

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::calendar::BlockedDates;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::photo::{NewPhoto, Photo, UpdatePhoto};
use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::{AppointmentId, ClientId, PhotoId, ServiceId, TaxId};
use crate::repository::errors::RepositoryResult;

pub mod appointment;
pub mod blocked_date;
pub mod client;
pub mod errors;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod photo;
pub mod service;

/// Timestamp assigned to newly created records (studio local time).
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Diesel-backed store sharing one SQLite connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    /// All clients in insertion order.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    fn find_client_by_tax_id(&self, tax_id: &TaxId) -> RepositoryResult<Option<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(
        &self,
        id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Option<Client>>;
    fn delete_client(&self, id: ClientId) -> RepositoryResult<bool>;
}

pub trait ServiceReader {
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
    fn list_services(&self) -> RepositoryResult<Vec<Service>>;
}

pub trait ServiceWriter {
    fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service>;
    fn update_service(
        &self,
        id: ServiceId,
        updates: &UpdateService,
    ) -> RepositoryResult<Option<Service>>;
    fn delete_service(&self, id: ServiceId) -> RepositoryResult<bool>;
}

pub trait AppointmentReader {
    fn get_appointment_by_id(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>>;
    /// All appointments in insertion order.
    fn list_appointments(&self) -> RepositoryResult<Vec<Appointment>>;
    /// All appointments ordered by date, then time.
    fn list_appointments_sorted(&self) -> RepositoryResult<Vec<Appointment>>;
    fn list_appointments_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<Appointment>>;
    fn list_appointments_by_client(
        &self,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<Appointment>>;
}

pub trait AppointmentWriter {
    fn create_appointment(&self, new_appointment: &NewAppointment)
    -> RepositoryResult<Appointment>;
    /// Inserts all of `new_appointments` or none of them.
    fn create_appointments(
        &self,
        new_appointments: &[NewAppointment],
    ) -> RepositoryResult<Vec<Appointment>>;
    fn update_appointment(
        &self,
        id: AppointmentId,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Option<Appointment>>;
    fn delete_appointment(&self, id: AppointmentId) -> RepositoryResult<bool>;
    /// Sets `status` on every appointment in `ids` or on none of them. An
    /// unknown id fails the whole batch with [`errors::RepositoryError::NotFound`].
    fn set_appointments_status(
        &self,
        ids: &[AppointmentId],
        status: AppointmentStatus,
    ) -> RepositoryResult<Vec<Appointment>>;
}

pub trait PhotoReader {
    fn get_photo_by_id(&self, id: PhotoId) -> RepositoryResult<Option<Photo>>;
    fn list_photos(&self) -> RepositoryResult<Vec<Photo>>;
}

pub trait PhotoWriter {
    fn create_photo(&self, new_photo: &NewPhoto) -> RepositoryResult<Photo>;
    fn update_photo(&self, id: PhotoId, updates: &UpdatePhoto) -> RepositoryResult<Option<Photo>>;
    fn delete_photo(&self, id: PhotoId) -> RepositoryResult<bool>;
}

pub trait BlockedDateReader {
    fn list_blocked_dates(&self) -> RepositoryResult<BlockedDates>;
    fn is_date_blocked(&self, date: NaiveDate) -> RepositoryResult<bool>;
}

pub trait BlockedDateWriter {
    /// Returns `true` when the date was not blocked before.
    fn block_date(&self, date: NaiveDate) -> RepositoryResult<bool>;
    /// Returns `true` when the date was blocked before.
    fn unblock_date(&self, date: NaiveDate) -> RepositoryResult<bool>;
}

/// Every capability of the entity store behind one object-safe handle.
pub trait Store:
    ClientReader
    + ClientWriter
    + ServiceReader
    + ServiceWriter
    + AppointmentReader
    + AppointmentWriter
    + PhotoReader
    + PhotoWriter
    + BlockedDateReader
    + BlockedDateWriter
    + Send
    + Sync
{
}

impl<T> Store for T where
    T: ClientReader
        + ClientWriter
        + ServiceReader
        + ServiceWriter
        + AppointmentReader
        + AppointmentWriter
        + PhotoReader
        + PhotoWriter
        + BlockedDateReader
        + BlockedDateWriter
        + Send
        + Sync
{
}
