use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use nail_studio::domain::appointment::{AppointmentStatus, NewAppointment, UpdateAppointment};
use nail_studio::domain::client::{NewClient, UpdateClient};
use nail_studio::domain::photo::{NewPhoto, UpdatePhoto};
use nail_studio::domain::service::{NewService, UpdateService};
use nail_studio::domain::types::{
    AppointmentId, ClientName, DurationMinutes, ImageUrl, PhoneNumber, PhotoTitle, Price,
    SanitizedText, ServiceName, TaxId,
};
use nail_studio::repository::errors::RepositoryError;
use nail_studio::repository::{
    AppointmentReader, AppointmentWriter, BlockedDateReader, BlockedDateWriter, ClientReader,
    ClientWriter, DieselRepository, PhotoReader, PhotoWriter, ServiceReader, ServiceWriter,
};

mod common;

fn new_client(name: &str, phone: &str, tax_id: Option<&str>) -> NewClient {
    NewClient::new(
        ClientName::new(name).unwrap(),
        PhoneNumber::new(phone).unwrap(),
        tax_id.map(|t| TaxId::new(t).unwrap()),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let maria = repo
        .create_client(&new_client("Maria Silva", "11999999999", Some("12345678909")))
        .unwrap();
    let joana = repo
        .create_client(&new_client("Joana Souza", "21988887777", None))
        .unwrap();

    assert_eq!(maria.phone.as_str(), "+5511999999999");
    assert_eq!(repo.list_clients().unwrap(), vec![maria.clone(), joana.clone()]);

    let found = repo
        .find_client_by_tax_id(&TaxId::new("123.456.789-09").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(found.id, maria.id);

    let updated = repo
        .update_client(
            joana.id,
            &UpdateClient {
                name: Some(ClientName::new("Joana S.").unwrap()),
                ..UpdateClient::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.name.as_str(), "Joana S.");
    assert_eq!(updated.phone, joana.phone);

    let cleared = repo
        .update_client(
            maria.id,
            &UpdateClient {
                tax_id: Some(None),
                ..UpdateClient::default()
            },
        )
        .unwrap()
        .unwrap();
    assert!(cleared.tax_id.is_none());

    assert!(repo.delete_client(maria.id).unwrap());
    assert!(!repo.delete_client(maria.id).unwrap());
    assert!(repo.get_client_by_id(maria.id).unwrap().is_none());
    assert!(
        repo.update_client(maria.id, &UpdateClient::default())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_duplicate_tax_id_violates_unique_index() {
    let test_db = common::TestDb::new("test_duplicate_tax_id.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_client(&new_client("Maria", "11999999999", Some("12345678909")))
        .unwrap();
    repo.create_client(&new_client("Ana", "11977777777", None))
        .unwrap();
    repo.create_client(&new_client("Bia", "11966666666", None))
        .unwrap();

    let result = repo.create_client(&new_client("Joana", "11988888888", Some("12345678909")));

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[test]
fn test_deleted_ids_are_not_reused() {
    let test_db = common::TestDb::new("test_deleted_ids.db");
    let repo = DieselRepository::new(test_db.pool());

    let first = repo
        .create_client(&new_client("Maria", "11999999999", None))
        .unwrap();
    repo.delete_client(first.id).unwrap();
    let second = repo
        .create_client(&new_client("Joana", "11988888888", None))
        .unwrap();

    assert!(second.id > first.id);
}

#[test]
fn test_service_repository_crud() {
    let test_db = common::TestDb::new("test_service_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let service = repo
        .create_service(&NewService::new(
            ServiceName::new("Manicure Simples").unwrap(),
            Price::new(Decimal::new(2500, 2)).unwrap(),
            DurationMinutes::new(30).unwrap(),
        ))
        .unwrap();
    assert_eq!(service.price.amount(), Decimal::new(2500, 2));

    let updated = repo
        .update_service(
            service.id,
            &UpdateService {
                price: Some(Price::new(Decimal::new(2750, 2)).unwrap()),
                ..UpdateService::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.price.to_string(), "27.50");
    assert_eq!(updated.duration.get(), 30);
    assert_eq!(repo.list_services().unwrap(), vec![updated.clone()]);

    assert!(repo.delete_service(service.id).unwrap());
    assert!(repo.get_service_by_id(service.id).unwrap().is_none());
}

#[test]
fn test_appointment_repository_crud_and_ordering() {
    let test_db = common::TestDb::new("test_appointment_repository.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo
        .create_client(&new_client("Maria", "11999999999", None))
        .unwrap();

    let late = repo
        .create_appointment(
            &NewAppointment::new(client.id, None, date(2026, 10, 20), time(15, 0))
                .service_name("Esmaltação")
                .price(Some(Price::new(Decimal::from(20)).unwrap()))
                .notes(SanitizedText::optional(Some("<b>cor</b> vermelha"))),
        )
        .unwrap();
    let early = repo
        .create_appointment(&NewAppointment::new(
            client.id,
            None,
            date(2026, 10, 20),
            time(9, 0),
        ))
        .unwrap();
    let before = repo
        .create_appointment(&NewAppointment::new(
            client.id,
            None,
            date(2026, 10, 19),
            time(18, 0),
        ))
        .unwrap();

    assert_eq!(late.status, AppointmentStatus::Scheduled);
    assert_eq!(late.service_name.as_deref(), Some("Esmaltação"));
    assert_eq!(late.price.map(Price::amount), Some(Decimal::from(20)));

    let sorted: Vec<_> = repo
        .list_appointments_sorted()
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(sorted, vec![before.id, early.id, late.id]);

    let on_day: Vec<_> = repo
        .list_appointments_by_date(date(2026, 10, 20))
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(on_day, vec![early.id, late.id]);
    assert_eq!(repo.list_appointments_by_client(client.id).unwrap().len(), 3);

    let completed = repo
        .update_appointment(late.id, &UpdateAppointment::status(AppointmentStatus::Completed))
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);
    assert_eq!(completed.price, late.price);

    let cleared = repo
        .update_appointment(
            late.id,
            &UpdateAppointment {
                notes: Some(None),
                price: Some(None),
                ..UpdateAppointment::default()
            },
        )
        .unwrap()
        .unwrap();
    assert!(cleared.notes.is_none());
    assert!(cleared.price.is_none());

    assert!(repo.delete_appointment(early.id).unwrap());
    assert_eq!(repo.list_appointments().unwrap().len(), 2);
}

#[test]
fn test_deleting_client_keeps_appointments() {
    let test_db = common::TestDb::new("test_soft_references.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo
        .create_client(&new_client("Maria", "11999999999", None))
        .unwrap();
    repo.create_appointment(&NewAppointment::new(
        client.id,
        None,
        date(2026, 10, 20),
        time(9, 0),
    ))
    .unwrap();

    repo.delete_client(client.id).unwrap();

    let orphaned = repo.list_appointments().unwrap();
    assert_eq!(orphaned.len(), 1);
    assert_eq!(orphaned[0].client_id, client.id);
    assert_eq!(repo.list_appointments_by_client(client.id).unwrap().len(), 1);
}

#[test]
fn test_photo_repository_crud() {
    let test_db = common::TestDb::new("test_photo_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    let photo = repo
        .create_photo(&NewPhoto::new(
            PhotoTitle::new("Francesinha").unwrap(),
            SanitizedText::optional(Some("Clássica")),
            ImageUrl::new("https://example.com/francesinha.jpg").unwrap(),
        ))
        .unwrap();

    let updated = repo
        .update_photo(
            photo.id,
            &UpdatePhoto {
                description: Some(None),
                ..UpdatePhoto::default()
            },
        )
        .unwrap()
        .unwrap();
    assert!(updated.description.is_none());
    assert_eq!(updated.title.as_str(), "Francesinha");

    assert_eq!(repo.list_photos().unwrap(), vec![updated]);
    assert!(repo.delete_photo(photo.id).unwrap());
    assert!(repo.get_photo_by_id(photo.id).unwrap().is_none());
}

#[test]
fn test_blocked_dates() {
    let test_db = common::TestDb::new("test_blocked_dates.db");
    let repo = DieselRepository::new(test_db.pool());
    let christmas = date(2026, 12, 25);

    assert!(repo.block_date(christmas).unwrap());
    assert!(!repo.block_date(christmas).unwrap());
    assert!(repo.is_date_blocked(christmas).unwrap());
    assert!(!repo.is_date_blocked(date(2026, 12, 24)).unwrap());
    assert_eq!(
        repo.list_blocked_dates().unwrap().into_iter().collect::<Vec<_>>(),
        vec![christmas]
    );

    assert!(repo.unblock_date(christmas).unwrap());
    assert!(!repo.unblock_date(christmas).unwrap());
    assert!(repo.list_blocked_dates().unwrap().is_empty());
}

#[test]
fn test_appointment_batches_are_all_or_nothing() {
    let test_db = common::TestDb::new("test_appointment_batches.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo
        .create_client(&new_client("Maria", "11999999999", None))
        .unwrap();

    let created = repo
        .create_appointments(&[
            NewAppointment::new(client.id, None, date(2026, 10, 20), time(10, 0))
                .service_name("Manicure"),
            NewAppointment::new(client.id, None, date(2026, 10, 20), time(10, 0))
                .service_name("Pedicure"),
        ])
        .unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[1].service_name.as_deref(), Some("Pedicure"));

    let missing = AppointmentId::new(created[1].id.get() + 100).unwrap();
    let result = repo.set_appointments_status(
        &[created[0].id, missing],
        AppointmentStatus::Completed,
    );
    assert!(matches!(result, Err(RepositoryError::NotFound)));
    assert_eq!(
        repo.get_appointment_by_id(created[0].id)
            .unwrap()
            .unwrap()
            .status,
        AppointmentStatus::Scheduled
    );

    let completed = repo
        .set_appointments_status(
            &[created[0].id, created[1].id],
            AppointmentStatus::Completed,
        )
        .unwrap();
    assert!(
        completed
            .iter()
            .all(|a| a.status == AppointmentStatus::Completed)
    );
}
