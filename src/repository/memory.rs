//! In-memory store, optionally persisted to JSON files on local disk.
//!
//! With persistence enabled, every mutation rewrites the whole affected
//! collection under its own key (`clients`, `appointments`, `services`,
//! `portfolio`, `blockedDates`). Mutations run against a copy of the state and
//! only replace it once the write succeeded, so a failed write leaves the
//! store exactly as it was.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::calendar::BlockedDates;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::photo::{NewPhoto, Photo, UpdatePhoto};
use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::{AppointmentId, ClientId, PhotoId, ServiceId, TaxId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AppointmentReader, AppointmentWriter, BlockedDateReader, BlockedDateWriter, ClientReader,
    ClientWriter, PhotoReader, PhotoWriter, ServiceReader, ServiceWriter, local_now,
};

/// Storage keys, one file per collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionKey {
    Clients,
    Appointments,
    Services,
    Portfolio,
    BlockedDates,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 5] = [
        CollectionKey::Clients,
        CollectionKey::Appointments,
        CollectionKey::Services,
        CollectionKey::Portfolio,
        CollectionKey::BlockedDates,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Clients => "clients",
            CollectionKey::Appointments => "appointments",
            CollectionKey::Services => "services",
            CollectionKey::Portfolio => "portfolio",
            CollectionKey::BlockedDates => "blockedDates",
        }
    }

    fn file_name(self) -> String {
        format!("{}.json", self.as_str())
    }
}

trait Record {
    fn record_id(&self) -> i32;
}

impl Record for Client {
    fn record_id(&self) -> i32 {
        self.id.get()
    }
}

impl Record for Service {
    fn record_id(&self) -> i32 {
        self.id.get()
    }
}

impl Record for Appointment {
    fn record_id(&self) -> i32 {
        self.id.get()
    }
}

impl Record for Photo {
    fn record_id(&self) -> i32 {
        self.id.get()
    }
}

/// One persisted collection. `last_id` only grows so ids of deleted records
/// are never handed out again.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
struct Table<T> {
    last_id: i32,
    records: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            records: Vec::new(),
        }
    }
}

impl<T: Record> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn find(&self, id: i32) -> Option<&T> {
        self.records.iter().find(|r| r.record_id() == id)
    }

    fn find_mut(&mut self, id: i32) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.record_id() == id)
    }

    fn remove(&mut self, id: i32) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.record_id() != id);
        self.records.len() != before
    }

    fn reconcile_last_id(&mut self) {
        let max = self.records.iter().map(Record::record_id).max().unwrap_or(0);
        self.last_id = self.last_id.max(max);
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Collections {
    clients: Table<Client>,
    services: Table<Service>,
    appointments: Table<Appointment>,
    photos: Table<Photo>,
    blocked_dates: BlockedDates,
}

#[derive(Debug)]
struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    fn path(&self, key: CollectionKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    fn read<T: DeserializeOwned + Default>(&self, key: CollectionKey) -> RepositoryResult<T> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(T::default());
        }
        let raw = fs::read_to_string(&path)?;
        if raw.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn load(&self) -> RepositoryResult<Collections> {
        let mut collections = Collections {
            clients: self.read(CollectionKey::Clients)?,
            services: self.read(CollectionKey::Services)?,
            appointments: self.read(CollectionKey::Appointments)?,
            photos: self.read(CollectionKey::Portfolio)?,
            blocked_dates: self.read(CollectionKey::BlockedDates)?,
        };
        collections.clients.reconcile_last_id();
        collections.services.reconcile_last_id();
        collections.appointments.reconcile_last_id();
        collections.photos.reconcile_last_id();
        Ok(collections)
    }

    /// Writes to a sibling temp file first, then renames over the target.
    fn write(&self, key: CollectionKey, collections: &Collections) -> RepositoryResult<()> {
        let payload = match key {
            CollectionKey::Clients => serde_json::to_string_pretty(&collections.clients)?,
            CollectionKey::Services => serde_json::to_string_pretty(&collections.services)?,
            CollectionKey::Appointments => {
                serde_json::to_string_pretty(&collections.appointments)?
            }
            CollectionKey::Portfolio => serde_json::to_string_pretty(&collections.photos)?,
            CollectionKey::BlockedDates => {
                serde_json::to_string_pretty(&collections.blocked_dates)?
            }
        };

        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        debug!("Persisted `{}` to {}", key.as_str(), path.display());
        Ok(())
    }
}

/// Store holding every collection in memory behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: Mutex<Collections>,
    storage: Option<JsonStorage>,
}

impl MemoryRepository {
    /// Volatile store; everything is lost on drop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store persisted under `dir`, loading whatever collections already exist.
    pub fn open(dir: impl AsRef<Path>) -> RepositoryResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let storage = JsonStorage { dir };
        let state = storage.load()?;

        Ok(Self {
            state: Mutex::new(state),
            storage: Some(storage),
        })
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Collections>> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unexpected("store lock poisoned".to_string()))
    }

    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> RepositoryResult<T> {
        let state = self.lock()?;
        Ok(f(&state))
    }

    /// Applies `f` to a draft and commits it only after the collection under
    /// `key` was persisted.
    fn mutate<T>(
        &self,
        key: CollectionKey,
        f: impl FnOnce(&mut Collections) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut state = self.lock()?;
        let mut draft = state.clone();
        let out = f(&mut draft)?;

        if draft == *state {
            return Ok(out);
        }

        if let Some(storage) = &self.storage {
            if let Err(err) = storage.write(key, &draft) {
                error!("Failed to persist `{}`: {err}", key.as_str());
                return Err(err);
            }
        }

        *state = draft;
        Ok(out)
    }
}

fn sorted_by_schedule(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by_key(|a| (a.date, a.time, a.id));
    appointments
}

impl ClientReader for MemoryRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        self.read(|s| s.clients.find(id.get()).cloned())
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        self.read(|s| s.clients.records.clone())
    }

    fn find_client_by_tax_id(&self, tax_id: &TaxId) -> RepositoryResult<Option<Client>> {
        self.read(|s| {
            s.clients
                .records
                .iter()
                .find(|c| c.tax_id.as_ref() == Some(tax_id))
                .cloned()
        })
    }
}

impl ClientWriter for MemoryRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        self.mutate(CollectionKey::Clients, |s| {
            let client = Client {
                id: ClientId::new(s.clients.next_id())?,
                name: new_client.name.clone(),
                phone: new_client.phone.clone(),
                tax_id: new_client.tax_id.clone(),
                created_at: local_now(),
            };
            s.clients.records.push(client.clone());
            Ok(client)
        })
    }

    fn update_client(
        &self,
        id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Option<Client>> {
        self.mutate(CollectionKey::Clients, |s| {
            Ok(s.clients.find_mut(id.get()).map(|client| {
                updates.apply_to(client);
                client.clone()
            }))
        })
    }

    fn delete_client(&self, id: ClientId) -> RepositoryResult<bool> {
        self.mutate(CollectionKey::Clients, |s| Ok(s.clients.remove(id.get())))
    }
}

impl ServiceReader for MemoryRepository {
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        self.read(|s| s.services.find(id.get()).cloned())
    }

    fn list_services(&self) -> RepositoryResult<Vec<Service>> {
        self.read(|s| s.services.records.clone())
    }
}

impl ServiceWriter for MemoryRepository {
    fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service> {
        self.mutate(CollectionKey::Services, |s| {
            let service = Service {
                id: ServiceId::new(s.services.next_id())?,
                name: new_service.name.clone(),
                price: new_service.price,
                duration: new_service.duration,
                created_at: local_now(),
            };
            s.services.records.push(service.clone());
            Ok(service)
        })
    }

    fn update_service(
        &self,
        id: ServiceId,
        updates: &UpdateService,
    ) -> RepositoryResult<Option<Service>> {
        self.mutate(CollectionKey::Services, |s| {
            Ok(s.services.find_mut(id.get()).map(|service| {
                updates.apply_to(service);
                service.clone()
            }))
        })
    }

    fn delete_service(&self, id: ServiceId) -> RepositoryResult<bool> {
        self.mutate(CollectionKey::Services, |s| Ok(s.services.remove(id.get())))
    }
}

impl AppointmentReader for MemoryRepository {
    fn get_appointment_by_id(&self, id: AppointmentId) -> RepositoryResult<Option<Appointment>> {
        self.read(|s| s.appointments.find(id.get()).cloned())
    }

    fn list_appointments(&self) -> RepositoryResult<Vec<Appointment>> {
        self.read(|s| s.appointments.records.clone())
    }

    fn list_appointments_sorted(&self) -> RepositoryResult<Vec<Appointment>> {
        self.list_appointments().map(sorted_by_schedule)
    }

    fn list_appointments_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<Appointment>> {
        self.read(|s| {
            s.appointments
                .records
                .iter()
                .filter(|a| a.date == date)
                .cloned()
                .collect()
        })
        .map(sorted_by_schedule)
    }

    fn list_appointments_by_client(
        &self,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<Appointment>> {
        self.read(|s| {
            s.appointments
                .records
                .iter()
                .filter(|a| a.client_id == client_id)
                .cloned()
                .collect()
        })
    }
}

fn push_appointment(
    s: &mut Collections,
    new_appointment: &NewAppointment,
) -> RepositoryResult<Appointment> {
    let appointment = Appointment {
        id: AppointmentId::new(s.appointments.next_id())?,
        client_id: new_appointment.client_id,
        service_id: new_appointment.service_id,
        service_name: new_appointment.service_name.clone(),
        date: new_appointment.date,
        time: new_appointment.time,
        status: Default::default(),
        notes: new_appointment.notes.clone(),
        price: new_appointment.price,
        created_at: local_now(),
    };
    s.appointments.records.push(appointment.clone());
    Ok(appointment)
}

impl AppointmentWriter for MemoryRepository {
    fn create_appointment(
        &self,
        new_appointment: &NewAppointment,
    ) -> RepositoryResult<Appointment> {
        self.mutate(CollectionKey::Appointments, |s| {
            push_appointment(s, new_appointment)
        })
    }

    fn create_appointments(
        &self,
        new_appointments: &[NewAppointment],
    ) -> RepositoryResult<Vec<Appointment>> {
        self.mutate(CollectionKey::Appointments, |s| {
            new_appointments
                .iter()
                .map(|new_appointment| push_appointment(s, new_appointment))
                .collect()
        })
    }

    fn update_appointment(
        &self,
        id: AppointmentId,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Option<Appointment>> {
        self.mutate(CollectionKey::Appointments, |s| {
            Ok(s.appointments.find_mut(id.get()).map(|appointment| {
                updates.apply_to(appointment);
                appointment.clone()
            }))
        })
    }

    fn delete_appointment(&self, id: AppointmentId) -> RepositoryResult<bool> {
        self.mutate(CollectionKey::Appointments, |s| {
            Ok(s.appointments.remove(id.get()))
        })
    }

    fn set_appointments_status(
        &self,
        ids: &[AppointmentId],
        status: AppointmentStatus,
    ) -> RepositoryResult<Vec<Appointment>> {
        let updates = UpdateAppointment::status(status);
        self.mutate(CollectionKey::Appointments, |s| {
            ids.iter()
                .map(|id| match s.appointments.find_mut(id.get()) {
                    Some(appointment) => {
                        updates.apply_to(appointment);
                        Ok(appointment.clone())
                    }
                    None => Err(RepositoryError::NotFound),
                })
                .collect()
        })
    }
}

impl PhotoReader for MemoryRepository {
    fn get_photo_by_id(&self, id: PhotoId) -> RepositoryResult<Option<Photo>> {
        self.read(|s| s.photos.find(id.get()).cloned())
    }

    fn list_photos(&self) -> RepositoryResult<Vec<Photo>> {
        self.read(|s| s.photos.records.clone())
    }
}

impl PhotoWriter for MemoryRepository {
    fn create_photo(&self, new_photo: &NewPhoto) -> RepositoryResult<Photo> {
        self.mutate(CollectionKey::Portfolio, |s| {
            let photo = Photo {
                id: PhotoId::new(s.photos.next_id())?,
                title: new_photo.title.clone(),
                description: new_photo.description.clone(),
                image_url: new_photo.image_url.clone(),
                created_at: local_now(),
            };
            s.photos.records.push(photo.clone());
            Ok(photo)
        })
    }

    fn update_photo(&self, id: PhotoId, updates: &UpdatePhoto) -> RepositoryResult<Option<Photo>> {
        self.mutate(CollectionKey::Portfolio, |s| {
            Ok(s.photos.find_mut(id.get()).map(|photo| {
                updates.apply_to(photo);
                photo.clone()
            }))
        })
    }

    fn delete_photo(&self, id: PhotoId) -> RepositoryResult<bool> {
        self.mutate(CollectionKey::Portfolio, |s| Ok(s.photos.remove(id.get())))
    }
}

impl BlockedDateReader for MemoryRepository {
    fn list_blocked_dates(&self) -> RepositoryResult<BlockedDates> {
        self.read(|s| s.blocked_dates.clone())
    }

    fn is_date_blocked(&self, date: NaiveDate) -> RepositoryResult<bool> {
        self.read(|s| s.blocked_dates.contains(&date))
    }
}

impl BlockedDateWriter for MemoryRepository {
    fn block_date(&self, date: NaiveDate) -> RepositoryResult<bool> {
        self.mutate(CollectionKey::BlockedDates, |s| {
            Ok(s.blocked_dates.insert(date))
        })
    }

    fn unblock_date(&self, date: NaiveDate) -> RepositoryResult<bool> {
        self.mutate(CollectionKey::BlockedDates, |s| {
            Ok(s.blocked_dates.remove(&date))
        })
    }
}
