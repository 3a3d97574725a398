//! Service catalog maintenance.

use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::ServiceId;
use crate::forms::catalog::{ServiceForm, UpdateServiceForm};
use crate::repository::{ServiceReader, ServiceWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn create_service<R>(repo: &R, form: ServiceForm) -> ServiceResult<Service>
where
    R: ServiceWriter + ?Sized,
{
    let new_service = NewService::try_from(form).map_err(|err| {
        log::warn!("Rejected service form: {err}");
        ServiceError::from(err)
    })?;

    repo.create_service(&new_service).map_err(|err| {
        log::error!("Failed to create service: {err}");
        ServiceError::from(err)
    })
}

/// Existing appointments keep their price snapshot; only the effective price
/// shown for them follows the catalog.
pub fn update_service<R>(
    repo: &R,
    service_id: ServiceId,
    form: UpdateServiceForm,
) -> ServiceResult<Service>
where
    R: ServiceWriter + ?Sized,
{
    let updates = UpdateService::try_from(form).map_err(|err| {
        log::warn!("Rejected service update form: {err}");
        ServiceError::from(err)
    })?;

    repo.update_service(service_id, &updates)
        .map_err(|err| {
            log::error!("Failed to update service {service_id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

/// Appointments referencing the service stay untouched.
pub fn delete_service<R>(repo: &R, service_id: ServiceId) -> ServiceResult<()>
where
    R: ServiceWriter + ?Sized,
{
    let deleted = repo.delete_service(service_id).map_err(|err| {
        log::error!("Failed to delete service {service_id}: {err}");
        ServiceError::from(err)
    })?;

    if deleted {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

pub fn list_services<R>(repo: &R) -> ServiceResult<Vec<Service>>
where
    R: ServiceReader + ?Sized,
{
    repo.list_services().map_err(ServiceError::from)
}
