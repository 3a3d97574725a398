//! Portfolio photo management.

use crate::domain::photo::{NewPhoto, Photo, UpdatePhoto};
use crate::domain::types::PhotoId;
use crate::forms::photo::{PhotoForm, UpdatePhotoForm};
use crate::repository::{PhotoReader, PhotoWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn add_photo<R>(repo: &R, form: PhotoForm) -> ServiceResult<Photo>
where
    R: PhotoWriter + ?Sized,
{
    let new_photo = NewPhoto::try_from(form).map_err(|err| {
        log::warn!("Rejected photo form: {err}");
        ServiceError::from(err)
    })?;

    repo.create_photo(&new_photo).map_err(|err| {
        log::error!("Failed to add photo: {err}");
        ServiceError::from(err)
    })
}

pub fn update_photo<R>(repo: &R, photo_id: PhotoId, form: UpdatePhotoForm) -> ServiceResult<Photo>
where
    R: PhotoWriter + ?Sized,
{
    let updates = UpdatePhoto::try_from(form).map_err(|err| {
        log::warn!("Rejected photo update form: {err}");
        ServiceError::from(err)
    })?;

    repo.update_photo(photo_id, &updates)
        .map_err(|err| {
            log::error!("Failed to update photo {photo_id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

pub fn delete_photo<R>(repo: &R, photo_id: PhotoId) -> ServiceResult<()>
where
    R: PhotoWriter + ?Sized,
{
    let deleted = repo.delete_photo(photo_id).map_err(|err| {
        log::error!("Failed to delete photo {photo_id}: {err}");
        ServiceError::from(err)
    })?;

    if deleted {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

/// Newest photos first.
pub fn list_photos<R>(repo: &R) -> ServiceResult<Vec<Photo>>
where
    R: PhotoReader + ?Sized,
{
    let mut photos = repo.list_photos()?;
    photos.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryRepository;

    fn form(title: &str) -> PhotoForm {
        PhotoForm {
            title: title.to_string(),
            description: None,
            image_url: format!("https://example.com/{title}.jpg"),
        }
    }

    #[test]
    fn newest_photo_is_listed_first() {
        let repo = MemoryRepository::new();
        add_photo(&repo, form("first")).unwrap();
        add_photo(&repo, form("second")).unwrap();

        let titles: Vec<_> = list_photos(&repo)
            .unwrap()
            .into_iter()
            .map(|p| p.title.into_inner())
            .collect();

        assert_eq!(titles, vec!["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn update_missing_photo_is_not_found() {
        let repo = MemoryRepository::new();

        let result = update_photo(
            &repo,
            PhotoId::new(5).unwrap(),
            UpdatePhotoForm {
                title: Some("Nova".to_string()),
                ..UpdatePhotoForm::default()
            },
        );

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
