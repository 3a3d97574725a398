//! Scheduling, lifecycle and attendance of appointments.
//!
//! Every read returns [`AppointmentView`]s so callers always see the client
//! name and the effective price.

use chrono::{Local, NaiveDate};

use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::enrichment::{AppointmentView, enrich_appointment, enrich_appointments};
use crate::domain::service::Service;
use crate::domain::types::{AppointmentId, ClientId, ServiceId};
use crate::dto::appointment::AttendanceSession;
use crate::forms::appointment::{
    AppointmentForm, Booking, BookingForm, UpdateAppointmentForm,
};
use crate::repository::{
    AppointmentReader, AppointmentWriter, BlockedDateReader, ClientReader, ServiceReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Joins appointments with the current clients and services.
pub(crate) fn enrich_all<R>(
    repo: &R,
    appointments: Vec<Appointment>,
) -> ServiceResult<Vec<AppointmentView>>
where
    R: ClientReader + ServiceReader + ?Sized,
{
    if appointments.is_empty() {
        return Ok(Vec::new());
    }
    let clients = repo.list_clients()?;
    let services = repo.list_services()?;
    Ok(enrich_appointments(appointments, &clients, &services))
}

fn enrich_one<R>(repo: &R, appointment: Appointment) -> ServiceResult<AppointmentView>
where
    R: ClientReader + ServiceReader + ?Sized,
{
    let client = repo.get_client_by_id(appointment.client_id)?;
    let service = match appointment.service_id {
        Some(id) => repo.get_service_by_id(id)?,
        None => None,
    };
    Ok(enrich_appointment(
        appointment,
        client.as_slice(),
        service.as_slice(),
    ))
}

fn ensure_client_exists<R>(repo: &R, client_id: ClientId) -> ServiceResult<()>
where
    R: ClientReader + ?Sized,
{
    if repo.get_client_by_id(client_id)?.is_none() {
        log::warn!("Appointment refers to unknown client {client_id}");
        return Err(ServiceError::Form(format!("client {client_id} does not exist")));
    }
    Ok(())
}

fn require_service<R>(repo: &R, service_id: ServiceId) -> ServiceResult<Service>
where
    R: ServiceReader + ?Sized,
{
    repo.get_service_by_id(service_id)?.ok_or_else(|| {
        log::warn!("Appointment refers to unknown service {service_id}");
        ServiceError::Form(format!("service {service_id} does not exist"))
    })
}

fn ensure_date_open<R>(repo: &R, date: NaiveDate) -> ServiceResult<()>
where
    R: BlockedDateReader + ?Sized,
{
    if repo.is_date_blocked(date)? {
        log::warn!("Rejected appointment on blocked date {date}");
        return Err(ServiceError::Form(format!("date {date} is blocked")));
    }
    Ok(())
}

fn load_appointment<R>(repo: &R, id: AppointmentId) -> ServiceResult<Appointment>
where
    R: AppointmentReader + ?Sized,
{
    repo.get_appointment_by_id(id)?
        .ok_or(ServiceError::NotFound)
}

/// Snapshots the service name and, unless given explicitly, its price.
fn snapshot_service(new_appointment: NewAppointment, service: &Service) -> NewAppointment {
    let price = new_appointment.price.or(Some(service.price));
    new_appointment
        .service_name(service.name.as_str())
        .price(price)
}

/// Schedules one appointment.
///
/// The client and the service must exist and the date must not be blocked.
pub fn create_appointment<R>(repo: &R, form: AppointmentForm) -> ServiceResult<AppointmentView>
where
    R: ClientReader + ServiceReader + AppointmentWriter + BlockedDateReader + ?Sized,
{
    let mut new_appointment = NewAppointment::try_from(form).map_err(|err| {
        log::warn!("Rejected appointment form: {err}");
        ServiceError::from(err)
    })?;

    ensure_client_exists(repo, new_appointment.client_id)?;
    if let Some(service_id) = new_appointment.service_id {
        let service = require_service(repo, service_id)?;
        new_appointment = snapshot_service(new_appointment, &service);
    }
    ensure_date_open(repo, new_appointment.date)?;

    let created = repo.create_appointment(&new_appointment).map_err(|err| {
        log::error!("Failed to create appointment: {err}");
        ServiceError::from(err)
    })?;

    enrich_one(repo, created)
}

/// Books several services for the same client, date and time as sibling
/// appointments. Either every sibling is stored or none is.
pub fn book_services<R>(repo: &R, form: BookingForm) -> ServiceResult<Vec<AppointmentView>>
where
    R: ClientReader + ServiceReader + AppointmentWriter + BlockedDateReader + ?Sized,
{
    let booking = Booking::try_from(form).map_err(|err| {
        log::warn!("Rejected booking form: {err}");
        ServiceError::from(err)
    })?;

    ensure_client_exists(repo, booking.client_id)?;
    let services = booking
        .service_ids
        .iter()
        .map(|id| require_service(repo, *id))
        .collect::<ServiceResult<Vec<_>>>()?;
    ensure_date_open(repo, booking.date)?;

    let new_appointments: Vec<_> = services
        .iter()
        .map(|service| {
            snapshot_service(
                NewAppointment::new(booking.client_id, Some(service.id), booking.date, booking.time)
                    .notes(booking.notes.clone()),
                service,
            )
        })
        .collect();

    let created = repo
        .create_appointments(&new_appointments)
        .map_err(|err| {
            log::error!(
                "Failed to book {} services for client {}: {err}",
                new_appointments.len(),
                booking.client_id
            );
            ServiceError::from(err)
        })?;

    enrich_all(repo, created)
}

/// Partially updates an appointment.
///
/// Status changes follow the lifecycle, a new date must not be blocked and a
/// new service refreshes the name and price snapshot.
pub fn update_appointment<R>(
    repo: &R,
    id: AppointmentId,
    form: UpdateAppointmentForm,
) -> ServiceResult<AppointmentView>
where
    R: ClientReader
        + ServiceReader
        + AppointmentReader
        + AppointmentWriter
        + BlockedDateReader
        + ?Sized,
{
    let mut updates = UpdateAppointment::try_from(form).map_err(|err| {
        log::warn!("Rejected appointment update form: {err}");
        ServiceError::from(err)
    })?;

    let current = load_appointment(repo, id)?;

    if let Some(status) = updates.status
        && !current.status.can_transition_to(status)
    {
        log::warn!(
            "Rejected status change of appointment {id}: {} -> {status}",
            current.status
        );
        return Err(ServiceError::Conflict(format!(
            "appointment is already {}",
            current.status
        )));
    }

    if let Some(client_id) = updates.client_id
        && client_id != current.client_id
    {
        ensure_client_exists(repo, client_id)?;
    }

    if let Some(Some(service_id)) = updates.service_id
        && Some(service_id) != current.service_id
    {
        let service = require_service(repo, service_id)?;
        updates.service_name = Some(Some(service.name.as_str().to_string()));
        if updates.price.is_none() {
            updates.price = Some(Some(service.price));
        }
    }

    if let Some(date) = updates.date
        && date != current.date
    {
        ensure_date_open(repo, date)?;
    }

    let updated = repo
        .update_appointment(id, &updates)
        .map_err(|err| {
            log::error!("Failed to update appointment {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)?;

    enrich_one(repo, updated)
}

/// Moves an appointment along its lifecycle. Re-applying the current status
/// is a no-op.
pub fn set_appointment_status<R>(
    repo: &R,
    id: AppointmentId,
    status: AppointmentStatus,
) -> ServiceResult<AppointmentView>
where
    R: ClientReader + ServiceReader + AppointmentReader + AppointmentWriter + ?Sized,
{
    let current = load_appointment(repo, id)?;

    if current.status == status {
        return enrich_one(repo, current);
    }

    if !current.status.can_transition_to(status) {
        log::warn!(
            "Rejected status change of appointment {id}: {} -> {status}",
            current.status
        );
        return Err(ServiceError::Conflict(format!(
            "appointment is already {}",
            current.status
        )));
    }

    let updated = repo
        .update_appointment(id, &UpdateAppointment::status(status))
        .map_err(|err| {
            log::error!("Failed to set status of appointment {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)?;

    enrich_one(repo, updated)
}

pub fn delete_appointment<R>(repo: &R, id: AppointmentId) -> ServiceResult<()>
where
    R: AppointmentWriter + ?Sized,
{
    let deleted = repo.delete_appointment(id).map_err(|err| {
        log::error!("Failed to delete appointment {id}: {err}");
        ServiceError::from(err)
    })?;

    if deleted {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

/// All appointments ordered by date, then time.
pub fn list_appointments<R>(repo: &R) -> ServiceResult<Vec<AppointmentView>>
where
    R: ClientReader + ServiceReader + AppointmentReader + ?Sized,
{
    let appointments = repo.list_appointments_sorted()?;
    enrich_all(repo, appointments)
}

/// Appointments of `date` ordered by time.
pub fn appointments_on<R>(repo: &R, date: NaiveDate) -> ServiceResult<Vec<AppointmentView>>
where
    R: ClientReader + ServiceReader + AppointmentReader + ?Sized,
{
    let appointments = repo.list_appointments_by_date(date)?;
    enrich_all(repo, appointments)
}

/// Appointments of the studio's current local date.
pub fn todays_appointments<R>(repo: &R) -> ServiceResult<Vec<AppointmentView>>
where
    R: ClientReader + ServiceReader + AppointmentReader + ?Sized,
{
    appointments_on(repo, Local::now().date_naive())
}

pub fn get_appointment<R>(repo: &R, id: AppointmentId) -> ServiceResult<AppointmentView>
where
    R: ClientReader + ServiceReader + AppointmentReader + ?Sized,
{
    let appointment = load_appointment(repo, id)?;
    enrich_one(repo, appointment)
}

/// Gathers every scheduled appointment the client has on the same date as
/// `id`, the set served in one sitting.
pub fn start_attendance<R>(repo: &R, id: AppointmentId) -> ServiceResult<AttendanceSession>
where
    R: ClientReader + ServiceReader + AppointmentReader + ?Sized,
{
    let anchor = load_appointment(repo, id)?;

    if anchor.status != AppointmentStatus::Scheduled {
        log::warn!("Attendance requested for {} appointment {id}", anchor.status);
        return Err(ServiceError::Conflict(format!(
            "appointment is already {}",
            anchor.status
        )));
    }

    let siblings = repo
        .list_appointments_by_date(anchor.date)?
        .into_iter()
        .filter(|a| a.client_id == anchor.client_id && a.status == AppointmentStatus::Scheduled)
        .collect();

    let appointments = enrich_all(repo, siblings)?;
    Ok(AttendanceSession::new(
        anchor.client_id,
        anchor.date,
        appointments,
    ))
}

/// Completes every appointment of the attendance session started from `id`,
/// all at once.
pub fn finish_attendance<R>(repo: &R, id: AppointmentId) -> ServiceResult<AttendanceSession>
where
    R: ClientReader + ServiceReader + AppointmentReader + AppointmentWriter + ?Sized,
{
    let session = start_attendance(repo, id)?;

    let ids: Vec<_> = session
        .appointments
        .iter()
        .map(|view| view.appointment.id)
        .collect();
    let completed = repo
        .set_appointments_status(&ids, AppointmentStatus::Completed)
        .map_err(|err| {
            log::error!("Failed to finish attendance of appointment {id}: {err}");
            ServiceError::from(err)
        })?;

    Ok(AttendanceSession::new(
        session.client_id,
        session.date,
        enrich_all(repo, completed)?,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::client::NewClient;
    use crate::domain::service::NewService;
    use crate::domain::types::{ClientName, DurationMinutes, PhoneNumber, Price, ServiceName};
    use crate::repository::errors::RepositoryError;
    use crate::repository::memory::MemoryRepository;
    use crate::repository::mock::MockRepository;
    use crate::repository::{BlockedDateWriter, ClientWriter, ServiceWriter};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
    }

    fn seeded() -> (MemoryRepository, ClientId, ServiceId) {
        seed(MemoryRepository::new())
    }

    fn seed(repo: MemoryRepository) -> (MemoryRepository, ClientId, ServiceId) {
        let client = repo
            .create_client(&NewClient::new(
                ClientName::new("Maria Silva").unwrap(),
                PhoneNumber::new("11999999999").unwrap(),
                None,
            ))
            .unwrap();
        let service = repo
            .create_service(&NewService::new(
                ServiceName::new("Manicure Simples").unwrap(),
                Price::new(Decimal::new(2500, 2)).unwrap(),
                DurationMinutes::new(30).unwrap(),
            ))
            .unwrap();
        (repo, client.id, service.id)
    }

    fn form(client_id: ClientId, service_id: ServiceId, time: &str) -> AppointmentForm {
        AppointmentForm {
            client_id: client_id.get(),
            service_id: Some(service_id.get()),
            service_name: None,
            date: date(),
            time: time.to_string(),
            notes: None,
            price: None,
        }
    }

    #[test]
    fn create_snapshots_service_price_and_name() {
        let (repo, client_id, service_id) = seeded();

        let view = create_appointment(&repo, form(client_id, service_id, "09:00")).unwrap();

        assert_eq!(view.client_name.as_deref(), Some("Maria Silva"));
        assert_eq!(view.effective_price, Decimal::new(2500, 2));
        assert_eq!(
            view.appointment.price.map(Price::amount),
            Some(Decimal::new(2500, 2))
        );
        assert_eq!(
            view.appointment.service_name.as_deref(),
            Some("Manicure Simples")
        );
        assert_eq!(view.appointment.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn create_on_blocked_date_is_rejected_without_write() {
        let (repo, client_id, service_id) = seeded();
        repo.block_date(date()).unwrap();

        let result = create_appointment(&repo, form(client_id, service_id, "09:00"));

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(repo.list_appointments().unwrap().is_empty());
    }

    #[test]
    fn create_for_unknown_client_is_rejected() {
        let (repo, _, service_id) = seeded();

        let result = create_appointment(
            &repo,
            form(ClientId::new(99).unwrap(), service_id, "09:00"),
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn terminal_status_cannot_change() {
        let (repo, client_id, service_id) = seeded();
        let view = create_appointment(&repo, form(client_id, service_id, "09:00")).unwrap();
        let id = view.appointment.id;

        set_appointment_status(&repo, id, AppointmentStatus::Completed).unwrap();
        let again = set_appointment_status(&repo, id, AppointmentStatus::Completed).unwrap();
        let result = set_appointment_status(&repo, id, AppointmentStatus::Canceled);

        assert_eq!(again.appointment.status, AppointmentStatus::Completed);
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn reschedule_onto_blocked_date_is_rejected() {
        let (repo, client_id, service_id) = seeded();
        let view = create_appointment(&repo, form(client_id, service_id, "09:00")).unwrap();
        let blocked = date().succ_opt().unwrap();
        repo.block_date(blocked).unwrap();

        let result = update_appointment(
            &repo,
            view.appointment.id,
            UpdateAppointmentForm {
                date: Some(blocked),
                ..UpdateAppointmentForm::default()
            },
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(
            repo.get_appointment_by_id(view.appointment.id)
                .unwrap()
                .unwrap()
                .date,
            date()
        );
    }

    #[test]
    fn booking_validates_every_service_first() {
        let (repo, client_id, service_id) = seeded();

        let result = book_services(
            &repo,
            BookingForm {
                client_id: client_id.get(),
                service_ids: vec![service_id.get(), 42],
                date: date(),
                time: "10:00".to_string(),
                notes: None,
            },
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(repo.list_appointments().unwrap().is_empty());
    }

    #[test]
    fn attendance_groups_same_client_and_date() {
        let (repo, client_id, service_id) = seeded();
        let pedicure = repo
            .create_service(&NewService::new(
                ServiceName::new("Pedicure").unwrap(),
                Price::new(Decimal::new(3000, 2)).unwrap(),
                DurationMinutes::new(45).unwrap(),
            ))
            .unwrap();
        let booked = book_services(
            &repo,
            BookingForm {
                client_id: client_id.get(),
                service_ids: vec![service_id.get(), pedicure.id.get()],
                date: date(),
                time: "10:00".to_string(),
                notes: None,
            },
        )
        .unwrap();

        let session = start_attendance(&repo, booked[0].appointment.id).unwrap();
        assert_eq!(session.appointments.len(), 2);
        assert_eq!(session.total, Decimal::new(5500, 2));
        assert_eq!(session.client_name.as_deref(), Some("Maria Silva"));

        let finished = finish_attendance(&repo, booked[0].appointment.id).unwrap();
        assert!(
            finished
                .appointments
                .iter()
                .all(|v| v.appointment.status == AppointmentStatus::Completed)
        );
        assert!(matches!(
            start_attendance(&repo, booked[1].appointment.id),
            Err(ServiceError::Conflict(_))
        ));
    }

    fn add_pedicure(repo: &MemoryRepository) -> ServiceId {
        repo.create_service(&NewService::new(
            ServiceName::new("Pedicure").unwrap(),
            Price::new(Decimal::new(3000, 2)).unwrap(),
            DurationMinutes::new(45).unwrap(),
        ))
        .unwrap()
        .id
    }

    fn booking(client_id: ClientId, service_ids: &[ServiceId]) -> BookingForm {
        BookingForm {
            client_id: client_id.get(),
            service_ids: service_ids.iter().map(|id| id.get()).collect(),
            date: date(),
            time: "10:00".to_string(),
            notes: None,
        }
    }

    #[test]
    fn booking_is_written_as_one_batch() {
        let (seed_repo, client_id, service_id) = seeded();
        let pedicure_id = add_pedicure(&seed_repo);
        let client = seed_repo.get_client_by_id(client_id).unwrap();
        let services = seed_repo.list_services().unwrap();

        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .returning(move |_| Ok(client.clone()));
        repo.expect_get_service_by_id()
            .returning(move |id| Ok(services.iter().find(|s| s.id == id).cloned()));
        repo.expect_is_date_blocked().returning(|_| Ok(false));
        repo.expect_create_appointment().never();
        repo.expect_create_appointments()
            .withf(|batch| batch.len() == 2)
            .times(1)
            .returning(|_| Err(RepositoryError::Storage("disk full".to_string())));

        let result = book_services(&repo, booking(client_id, &[service_id, pedicure_id]));

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn failed_booking_stores_no_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let (repo, client_id, service_id) = seed(MemoryRepository::open(&data_dir).unwrap());
        let pedicure_id = add_pedicure(&repo);
        std::fs::remove_dir_all(&data_dir).unwrap();

        let result = book_services(&repo, booking(client_id, &[service_id, pedicure_id]));

        assert!(matches!(result, Err(ServiceError::Repository(_))));
        assert!(repo.list_appointments().unwrap().is_empty());
    }

    #[test]
    fn failed_finish_leaves_session_scheduled() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let (repo, client_id, service_id) = seed(MemoryRepository::open(&data_dir).unwrap());
        let pedicure_id = add_pedicure(&repo);
        let booked = book_services(&repo, booking(client_id, &[service_id, pedicure_id])).unwrap();
        std::fs::remove_dir_all(&data_dir).unwrap();

        let result = finish_attendance(&repo, booked[0].appointment.id);

        assert!(matches!(result, Err(ServiceError::Repository(_))));
        assert!(
            repo.list_appointments()
                .unwrap()
                .iter()
                .all(|a| a.status == AppointmentStatus::Scheduled)
        );
        assert_eq!(
            start_attendance(&repo, booked[1].appointment.id)
                .unwrap()
                .appointments
                .len(),
            2
        );
    }

    #[test]
    fn list_is_sorted_by_date_then_time() {
        let (repo, client_id, service_id) = seeded();
        create_appointment(&repo, form(client_id, service_id, "15:00")).unwrap();
        create_appointment(&repo, form(client_id, service_id, "09:00")).unwrap();

        let times: Vec<_> = list_appointments(&repo)
            .unwrap()
            .into_iter()
            .map(|v| v.appointment.time)
            .collect();

        assert_eq!(
            times,
            vec![
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(15, 0, 0).unwrap()
            ]
        );
    }

    #[test]
    fn failed_status_write_is_reported() {
        let mut repo = MockRepository::new();
        let (seed, client_id, service_id) = seeded();
        let stored = create_appointment(&seed, form(client_id, service_id, "09:00"))
            .unwrap()
            .appointment;
        let id = stored.id;

        repo.expect_get_appointment_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_update_appointment()
            .returning(|_, _| Err(RepositoryError::Storage("read-only".to_string())));

        let result = set_appointment_status(&repo, id, AppointmentStatus::Completed);

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
