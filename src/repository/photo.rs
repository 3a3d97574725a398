use diesel::prelude::*;

use crate::domain::photo::{NewPhoto, Photo, UpdatePhoto};
use crate::domain::types::PhotoId;
use crate::models::photo::{
    NewPhoto as DbNewPhoto, Photo as DbPhoto, PhotoChangeset as DbPhotoChangeset,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, PhotoReader, PhotoWriter, local_now};

impl PhotoReader for DieselRepository {
    fn get_photo_by_id(&self, id: PhotoId) -> RepositoryResult<Option<Photo>> {
        use crate::schema::photos;

        let mut conn = self.conn()?;
        let photo = photos::table
            .find(id.get())
            .first::<DbPhoto>(&mut conn)
            .optional()?;

        photo
            .map(Photo::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_photos(&self) -> RepositoryResult<Vec<Photo>> {
        use crate::schema::photos;

        let mut conn = self.conn()?;
        photos::table
            .order(photos::id.asc())
            .load::<DbPhoto>(&mut conn)?
            .into_iter()
            .map(|p| Photo::try_from(p).map_err(RepositoryError::from))
            .collect()
    }
}

impl PhotoWriter for DieselRepository {
    fn create_photo(&self, new_photo: &NewPhoto) -> RepositoryResult<Photo> {
        use crate::schema::photos;

        let mut conn = self.conn()?;
        let insertable = DbNewPhoto::from_domain(new_photo, local_now());
        let created = diesel::insert_into(photos::table)
            .values(&insertable)
            .get_result::<DbPhoto>(&mut conn)?;

        Ok(Photo::try_from(created)?)
    }

    fn update_photo(&self, id: PhotoId, updates: &UpdatePhoto) -> RepositoryResult<Option<Photo>> {
        use crate::schema::photos;

        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let Some(current) = photos::table
                .find(id.get())
                .first::<DbPhoto>(conn)
                .optional()?
            else {
                return Ok(None);
            };

            let mut photo = Photo::try_from(current)?;
            updates.apply_to(&mut photo);

            let updated = diesel::update(photos::table.find(id.get()))
                .set(&DbPhotoChangeset::from(&photo))
                .get_result::<DbPhoto>(conn)?;

            Ok(Some(Photo::try_from(updated)?))
        })
    }

    fn delete_photo(&self, id: PhotoId) -> RepositoryResult<bool> {
        use crate::schema::photos;

        let mut conn = self.conn()?;
        let affected = diesel::delete(photos::table.find(id.get())).execute(&mut conn)?;
        Ok(affected > 0)
    }
}
