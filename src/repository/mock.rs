//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDate;
use mockall::mock;

use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::calendar::BlockedDates;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::photo::{NewPhoto, Photo, UpdatePhoto};
use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::{AppointmentId, ClientId, PhotoId, ServiceId, TaxId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AppointmentReader, AppointmentWriter, BlockedDateReader, BlockedDateWriter, ClientReader,
    ClientWriter, PhotoReader, PhotoWriter, ServiceReader, ServiceWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn find_client_by_tax_id(&self, tax_id: &TaxId) -> RepositoryResult<Option<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(
            &self,
            id: ClientId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Option<Client>>;
        fn delete_client(&self, id: ClientId) -> RepositoryResult<bool>;
    }

    impl ServiceReader for Repository {
        fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
        fn list_services(&self) -> RepositoryResult<Vec<Service>>;
    }

    impl ServiceWriter for Repository {
        fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service>;
        fn update_service(
            &self,
            id: ServiceId,
            updates: &UpdateService,
        ) -> RepositoryResult<Option<Service>>;
        fn delete_service(&self, id: ServiceId) -> RepositoryResult<bool>;
    }

    impl AppointmentReader for Repository {
        fn get_appointment_by_id(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>>;
        fn list_appointments(&self) -> RepositoryResult<Vec<Appointment>>;
        fn list_appointments_sorted(&self) -> RepositoryResult<Vec<Appointment>>;
        fn list_appointments_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<Appointment>>;
        fn list_appointments_by_client(
            &self,
            client_id: ClientId,
        ) -> RepositoryResult<Vec<Appointment>>;
    }

    impl AppointmentWriter for Repository {
        fn create_appointment(
            &self,
            new_appointment: &NewAppointment,
        ) -> RepositoryResult<Appointment>;
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
        fn set_appointments_status(
            &self,
            ids: &[AppointmentId],
            status: AppointmentStatus,
        ) -> RepositoryResult<Vec<Appointment>>;
    }

    impl PhotoReader for Repository {
        fn get_photo_by_id(&self, id: PhotoId) -> RepositoryResult<Option<Photo>>;
        fn list_photos(&self) -> RepositoryResult<Vec<Photo>>;
    }

    impl PhotoWriter for Repository {
        fn create_photo(&self, new_photo: &NewPhoto) -> RepositoryResult<Photo>;
        fn update_photo(&self, id: PhotoId, updates: &UpdatePhoto) -> RepositoryResult<Option<Photo>>;
        fn delete_photo(&self, id: PhotoId) -> RepositoryResult<bool>;
    }

    impl BlockedDateReader for Repository {
        fn list_blocked_dates(&self) -> RepositoryResult<BlockedDates>;
        fn is_date_blocked(&self, date: NaiveDate) -> RepositoryResult<bool>;
    }

    impl BlockedDateWriter for Repository {
        fn block_date(&self, date: NaiveDate) -> RepositoryResult<bool>;
        fn unblock_date(&self, date: NaiveDate) -> RepositoryResult<bool>;
    }
}
