use rust_decimal::Decimal;

use crate::domain::appointment::AppointmentStatus;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientId, TaxId};
use crate::dto::client::ClientHistory;
use crate::forms::client::{ClientForm, UpdateClientForm};
use crate::repository::{AppointmentReader, ClientReader, ClientWriter, ServiceReader};
use crate::services::appointments::enrich_all;
use crate::services::{ServiceError, ServiceResult};

/// Rejects a tax id already used by another client.
fn ensure_tax_id_available<R>(
    repo: &R,
    tax_id: Option<&TaxId>,
    owner: Option<ClientId>,
) -> ServiceResult<()>
where
    R: ClientReader + ?Sized,
{
    let Some(tax_id) = tax_id else {
        return Ok(());
    };

    match repo.find_client_by_tax_id(tax_id)? {
        Some(existing) if Some(existing.id) != owner => {
            log::warn!("Tax id {tax_id} already belongs to client {}", existing.id);
            Err(ServiceError::Conflict(format!(
                "tax id {tax_id} is already registered"
            )))
        }
        _ => Ok(()),
    }
}

/// Validates the form and registers a new client.
pub fn create_client<R>(repo: &R, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let new_client = NewClient::try_from(form).map_err(|err| {
        log::warn!("Rejected client form: {err}");
        ServiceError::from(err)
    })?;

    ensure_tax_id_available(repo, new_client.tax_id.as_ref(), None)?;

    repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to create client: {err}");
        ServiceError::from(err)
    })
}

/// Applies a partial update to an existing client.
pub fn update_client<R>(repo: &R, client_id: ClientId, form: UpdateClientForm) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let updates = UpdateClient::try_from(form).map_err(|err| {
        log::warn!("Rejected client update form: {err}");
        ServiceError::from(err)
    })?;

    if let Some(tax_id) = &updates.tax_id {
        ensure_tax_id_available(repo, tax_id.as_ref(), Some(client_id))?;
    }

    repo.update_client(client_id, &updates)
        .map_err(|err| {
            log::error!("Failed to update client {client_id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

/// Removes a client. Their appointments are kept and show no client name.
pub fn delete_client<R>(repo: &R, client_id: ClientId) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    let deleted = repo.delete_client(client_id).map_err(|err| {
        log::error!("Failed to delete client {client_id}: {err}");
        ServiceError::from(err)
    })?;

    if deleted {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

pub fn get_client<R>(repo: &R, client_id: ClientId) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    repo.get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn list_clients<R>(repo: &R) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    repo.list_clients().map_err(ServiceError::from)
}

/// Filters clients by name, phone or tax id. A blank term returns everyone.
pub fn search_clients<R>(repo: &R, term: Option<&str>) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    let clients = repo.list_clients()?;

    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(clients);
    };

    Ok(clients.into_iter().filter(|c| c.matches(term)).collect())
}

/// Completed appointments of the client, newest first, with the amount spent.
pub fn client_history<R>(repo: &R, client_id: ClientId) -> ServiceResult<ClientHistory>
where
    R: ClientReader + AppointmentReader + ServiceReader + ?Sized,
{
    let client = get_client(repo, client_id)?;

    let mut completed: Vec<_> = repo
        .list_appointments_by_client(client_id)?
        .into_iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .collect();
    completed.sort_by(|a, b| (b.date, b.time, b.id).cmp(&(a.date, a.time, a.id)));

    let appointments = enrich_all(repo, completed)?;
    let total_spent: Decimal = appointments.iter().map(|v| v.effective_price).sum();

    Ok(ClientHistory {
        client,
        appointments,
        total_spent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::memory::MemoryRepository;
    use crate::repository::mock::MockRepository;

    fn form(name: &str, phone: &str, tax_id: Option<&str>) -> ClientForm {
        ClientForm {
            name: name.to_string(),
            phone: phone.to_string(),
            tax_id: tax_id.map(str::to_string),
        }
    }

    #[test]
    fn duplicate_tax_id_is_a_conflict() {
        let repo = MemoryRepository::new();
        create_client(&repo, form("Maria", "11999999999", Some("12345678909"))).unwrap();

        let result = create_client(&repo, form("Joana", "11988888888", Some("123.456.789-09")));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
        assert_eq!(repo.list_clients().unwrap().len(), 1);
    }

    #[test]
    fn clients_without_tax_id_never_conflict() {
        let repo = MemoryRepository::new();
        create_client(&repo, form("Maria", "11999999999", None)).unwrap();
        create_client(&repo, form("Joana", "11988888888", None)).unwrap();

        assert_eq!(list_clients(&repo).unwrap().len(), 2);
    }

    #[test]
    fn update_keeps_own_tax_id() {
        let repo = MemoryRepository::new();
        let maria =
            create_client(&repo, form("Maria", "11999999999", Some("12345678909"))).unwrap();

        let updated = update_client(
            &repo,
            maria.id,
            UpdateClientForm {
                name: Some("Maria Silva".to_string()),
                tax_id: Some("12345678909".to_string()),
                ..UpdateClientForm::default()
            },
        )
        .unwrap();

        assert_eq!(updated.name.as_str(), "Maria Silva");
    }

    #[test]
    fn update_unknown_client_is_not_found() {
        let repo = MemoryRepository::new();

        let result = update_client(
            &repo,
            ClientId::new(7).unwrap(),
            UpdateClientForm::default(),
        );

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn search_matches_name_and_phone() {
        let repo = MemoryRepository::new();
        create_client(&repo, form("Maria Silva", "11999999999", None)).unwrap();
        create_client(&repo, form("Joana Souza", "21988887777", None)).unwrap();

        let by_name = search_clients(&repo, Some("maria")).unwrap();
        let by_phone = search_clients(&repo, Some("8888")).unwrap();
        let everyone = search_clients(&repo, Some("  ")).unwrap();

        assert_eq!(by_name.len(), 1);
        assert_eq!(by_phone[0].name.as_str(), "Joana Souza");
        assert_eq!(everyone.len(), 2);
    }

    #[test]
    fn invalid_form_writes_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().never();

        let result = create_client(&repo, form("", "11999999999", None));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn storage_failure_surfaces_as_repository_error() {
        let mut repo = MockRepository::new();
        repo.expect_create_client()
            .returning(|_| Err(RepositoryError::Storage("disk full".to_string())));

        let result = create_client(&repo, form("Maria", "11999999999", None));

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn delete_missing_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_client().returning(|_| Ok(false));

        let result = delete_client(&repo, ClientId::new(3).unwrap());

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
