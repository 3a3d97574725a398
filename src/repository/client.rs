use diesel::prelude::*;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientId, TaxId};
use crate::models::client::{
    Client as DbClient, ClientChangeset as DbClientChangeset, NewClient as DbNewClient,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository, local_now};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        client
            .map(Client::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        clients::table
            .order(clients::id.asc())
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(|c| Client::try_from(c).map_err(RepositoryError::from))
            .collect()
    }

    fn find_client_by_tax_id(&self, tax_id: &TaxId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::tax_id.eq(tax_id.as_str()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        client
            .map(Client::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertable = DbNewClient::from_domain(new_client, local_now());
        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(created)?)
    }

    fn update_client(
        &self,
        id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let Some(current) = clients::table
                .find(id.get())
                .first::<DbClient>(conn)
                .optional()?
            else {
                return Ok(None);
            };

            let mut client = Client::try_from(current)?;
            updates.apply_to(&mut client);

            let updated = diesel::update(clients::table.find(id.get()))
                .set(&DbClientChangeset::from(&client))
                .get_result::<DbClient>(conn)?;

            Ok(Some(Client::try_from(updated)?))
        })
    }

    fn delete_client(&self, id: ClientId) -> RepositoryResult<bool> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let affected = diesel::delete(clients::table.find(id.get())).execute(&mut conn)?;
        Ok(affected > 0)
    }
}
