use diesel::prelude::*;

use crate::domain::service::{NewService, Service, UpdateService};
use crate::domain::types::ServiceId;
use crate::models::service::{
    NewService as DbNewService, Service as DbService, ServiceChangeset as DbServiceChangeset,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ServiceReader, ServiceWriter, local_now};

impl ServiceReader for DieselRepository {
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        let service = services::table
            .find(id.get())
            .first::<DbService>(&mut conn)
            .optional()?;

        service
            .map(Service::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_services(&self) -> RepositoryResult<Vec<Service>> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        services::table
            .order(services::id.asc())
            .load::<DbService>(&mut conn)?
            .into_iter()
            .map(|s| Service::try_from(s).map_err(RepositoryError::from))
            .collect()
    }
}

impl ServiceWriter for DieselRepository {
    fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        let insertable = DbNewService::from_domain(new_service, local_now());
        let created = diesel::insert_into(services::table)
            .values(&insertable)
            .get_result::<DbService>(&mut conn)?;

        Ok(Service::try_from(created)?)
    }

    fn update_service(
        &self,
        id: ServiceId,
        updates: &UpdateService,
    ) -> RepositoryResult<Option<Service>> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let Some(current) = services::table
                .find(id.get())
                .first::<DbService>(conn)
                .optional()?
            else {
                return Ok(None);
            };

            let mut service = Service::try_from(current)?;
            updates.apply_to(&mut service);

            let updated = diesel::update(services::table.find(id.get()))
                .set(&DbServiceChangeset::from(&service))
                .get_result::<DbService>(conn)?;

            Ok(Some(Service::try_from(updated)?))
        })
    }

    fn delete_service(&self, id: ServiceId) -> RepositoryResult<bool> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        let affected = diesel::delete(services::table.find(id.get())).execute(&mut conn)?;
        Ok(affected > 0)
    }
}
